mod app;
use lc_flashcards::*;

use app::ReviewApp;
use chrono::Local;
use lc_flashcards::import::load_questions;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let today = Local::now().date_naive();

    // Both loads are fatal on failure: nothing is shown until they succeed
    let cards = load_questions(&config.questions_path)?;
    let store = HistoryStore::new(config.history_path.clone());
    let history = store.load(today)?;

    let session = ReviewSession::start(cards, history, store, today, config.weights);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([560.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "LeetCode Flashcards",
        options,
        Box::new(|_cc| Ok(Box::new(ReviewApp::new(session)))),
    )?;
    Ok(())
}

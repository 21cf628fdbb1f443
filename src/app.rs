//! Review window: shows the current card face and forwards button presses to the session.

use crate::models::{CardSide, ReviewSession, SessionView, Verdict};
use eframe::egui;

/// Main application state
pub struct ReviewApp {
    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    session: Option<ReviewSession>,
    /// Set when a save fails; the session is dropped and only quitting is offered.
    fatal_error: Option<String>,

    show_result_dialog: bool,
    result_message: String,
}

impl eframe::App for ReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.fatal_error.is_some() {
            self.render_fatal_screen(ctx);
        } else {
            self.render_review_screen(ctx);
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.allowed_to_close || self.fatal_error.is_some() {
                // Allow close
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                self.show_confirmation_dialog = true;
            }
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Quit reviewing?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Every verdict so far is already saved.");
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_result_dialog {
            egui::Window::new("Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }
    }
}

impl ReviewApp {
    pub fn new(session: ReviewSession) -> Self {
        Self {
            show_confirmation_dialog: false,
            allowed_to_close: false,
            session: Some(session),
            fatal_error: None,
            show_result_dialog: false,
            result_message: String::new(),
        }
    }

    /// Renders the card, the flip and verdict buttons, and the progress line
    fn render_review_screen(&mut self, ctx: &egui::Context) {
        let Some(session) = &mut self.session else {
            return;
        };

        // Actions are applied after rendering to avoid borrowing conflicts
        let mut action_flip = false;
        let mut action_mark: Option<Verdict> = None;
        let mut action_export = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("LeetCode Flashcards");
                ui.label(session.today().format("%Y-%m-%d").to_string());
            });
            ui.separator();

            let view = session.current_view();
            match &view {
                SessionView::Card { side, .. } => {
                    let text = view.text().unwrap_or_default();
                    let counter = view.counter().unwrap_or_default();

                    ui.group(|ui| {
                        ui.set_min_height(360.0);
                        egui::ScrollArea::vertical()
                            .id_source("card_text")
                            .max_height(360.0)
                            .show(ui, |ui| {
                                ui.add(
                                    egui::Label::new(egui::RichText::new(text).size(15.0)).wrap(),
                                );
                            });
                    });

                    ui.add_space(10.0);

                    let flip_label = match *side {
                        CardSide::Front => "Show Solution",
                        CardSide::Back => "Show Question",
                    };
                    if ui.button(flip_label).clicked() {
                        action_flip = true;
                    }

                    ui.add_space(10.0);

                    ui.horizontal(|ui| {
                        if ui.button("Solved (Yes)").clicked() {
                            action_mark = Some(Verdict::Solved);
                        }
                        if ui.button("Unsolved (No)").clicked() {
                            action_mark = Some(Verdict::Unsolved);
                        }
                    });

                    ui.add_space(10.0);

                    let (solved, unsolved) = session.today_tally();
                    ui.label(format!("Card {}", counter));
                    ui.label(format!("Today: {} solved, {} unsolved", solved, unsolved));
                }
                SessionView::Complete => {
                    ui.heading("Finished today's flashcards!");
                    ui.label(format!(
                        "Check {} for your progress.",
                        session.history_store().path().display()
                    ));

                    let (solved, unsolved) = session.today_tally();
                    ui.label(format!("Today: {} solved, {} unsolved", solved, unsolved));

                    ui.add_space(20.0);

                    if ui.button("Export History...").clicked() {
                        action_export = true;
                    }
                }
            }
        });

        // Execute deferred actions
        if action_flip {
            session.flip();
        }
        if let Some(verdict) = action_mark {
            if let Err(e) = session.mark(verdict) {
                log::error!("Failed to save history, abandoning session: {}", e);
                self.fatal_error = Some(format!(
                    "Could not save your progress:\n{}\n\nThe session has been stopped so no verdicts are lost silently.",
                    e
                ));
                self.session = None;
                return;
            }
        }
        if action_export {
            self.handle_export();
        }
    }

    /// Shown after a failed save; the only way forward is to quit
    fn render_fatal_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Error");
            if let Some(message) = &self.fatal_error {
                ui.label(message);
            }
            ui.add_space(20.0);
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    /// Handles history export to a CSV file
    fn handle_export(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let store = session.history_store();
        let default_name = store
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "lc_stats.csv".to_string());

        // Open file save dialog
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(default_name)
            .add_filter("CSV files", &["csv"])
            .save_file()
        {
            match store.export_to(&path) {
                Ok(_) => {
                    self.result_message = format!("History exported to {}", path.display());
                    self.show_result_dialog = true;
                }
                Err(e) => {
                    log::warn!("History export failed: {}", e);
                    self.result_message = format!("Export failed: {}", e);
                    self.show_result_dialog = true;
                }
            }
        }
    }
}

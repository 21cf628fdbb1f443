pub mod json;

pub use json::{ImportError, load_questions};

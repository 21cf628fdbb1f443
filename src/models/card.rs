//! Card is a single practice question with its solution on the back.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// A question record from the question bank. `title` is the key used by the history log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub example: String,
    pub constraints: String,
    pub lc_number: u32,
    pub level: Level,
    pub topics: Vec<String>,
    pub hints: String,
    pub solution: String,
}

impl Card {
    /// Question side: title, description, example and constraints.
    pub fn front_text(&self) -> String {
        format!(
            "📝 Title: {}\n\nDescription: {}\n\nExample: {}\n\nConstraints: {}",
            self.title, self.description, self.example, self.constraints
        )
    }

    /// Answer side: problem number, level, topics, hints and solution.
    pub fn back_text(&self) -> String {
        format!(
            "(LeetCode #{}, {})\nTopics: {}\n\nHints: {}\n\nSolution: {}",
            self.lc_number,
            self.level,
            self.topics.join(", "),
            self.hints,
            self.solution
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_card(title: &str) -> Card {
    Card {
        title: title.to_string(),
        description: format!("Description of {}", title),
        example: "Input: [1,2] Output: 3".to_string(),
        constraints: "1 <= n <= 10^4".to_string(),
        lc_number: 1,
        level: Level::Easy,
        topics: vec!["Array".to_string(), "Hash Table".to_string()],
        hints: "Use a map".to_string(),
        solution: "One pass with a hash map".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_text() {
        let card = sample_card("Two Sum");
        let front = card.front_text();

        assert!(front.starts_with("📝 Title: Two Sum\n\n"));
        assert!(front.contains("Description: Description of Two Sum"));
        assert!(front.ends_with("Constraints: 1 <= n <= 10^4"));
        assert!(!front.contains("Solution"));
    }

    #[test]
    fn test_back_text() {
        let mut card = sample_card("Two Sum");
        card.level = Level::Medium;

        assert_eq!(
            card.back_text(),
            "(LeetCode #1, Medium)\nTopics: Array, Hash Table\n\nHints: Use a map\n\nSolution: One pass with a hash map"
        );
    }

    #[test]
    fn test_level_from_json() {
        let level: Level = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(level, Level::Hard);
        assert!(serde_json::from_str::<Level>("\"Impossible\"").is_err());
    }
}

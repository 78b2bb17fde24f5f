use std::collections::HashMap;

use crate::models::Question;

/// Per-link "ticked" flags owned by the presentation layer.
/// Filtering and aggregation never read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    ticked: HashMap<String, bool>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the flag for `link` and returns the new value.
    pub fn toggle(&mut self, link: &str) -> bool {
        let flag = self.ticked.entry(link.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_ticked(&self, link: &str) -> bool {
        self.ticked.get(link).copied().unwrap_or(false)
    }

    /// Reset on every new company search.
    pub fn clear(&mut self) {
        self.ticked.clear();
    }

    /// Number of listed questions whose link is ticked (every occurrence counts).
    pub fn ticked_count(&self, questions: &[Question]) -> usize {
        questions.iter().filter(|q| self.is_ticked(&q.link)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_clear_resets() {
        let mut s = SelectionState::new();
        assert!(!s.is_ticked("q1"));
        assert!(s.toggle("q1"));
        assert!(s.is_ticked("q1"));
        assert!(!s.toggle("q1"));
        s.toggle("q2");
        s.clear();
        assert!(!s.is_ticked("q2"));
    }
}

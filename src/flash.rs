//! Rotating teaser word shown above the typewriter.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlashWords {
    words: Vec<String>,
    index: usize,
}

impl FlashWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.trim().is_empty())
                .collect(),
            index: 0,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.words.get(self.index).map(String::as_str)
    }

    /// Move to the next word, wrapping at the end.
    pub fn advance(&mut self) {
        if !self.words.is_empty() {
            self.index = (self.index + 1) % self.words.len();
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around() {
        let mut words = FlashWords::new(["absurd", "physical", "monthly"]);
        let mut seen = vec![words.current().unwrap().to_string()];
        for _ in 0..3 {
            words.advance();
            seen.push(words.current().unwrap().to_string());
        }
        assert_eq!(seen, ["absurd", "physical", "monthly", "absurd"]);
    }

    #[test]
    fn empty_list_has_no_word() {
        let mut words = FlashWords::new(Vec::<String>::new());
        assert_eq!(words.current(), None);
        words.advance();
        assert_eq!(words.current(), None);
    }

    #[test]
    fn blank_entries_are_dropped() {
        let words = FlashWords::new(["", "yours", "  "]);
        assert_eq!(words.len(), 1);
        assert_eq!(words.current(), Some("yours"));
    }
}

/// Position (offset) in an input.
///
/// For text input the offset counts bytes, for any other input it counts elements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(usize);

impl Position {
    /// Makes a new [`Position`] instance.
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Gets the offset.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the 1-based line and column numbers at where this position is located in the given text.
    ///
    /// Offsets past the end of `text` are clamped to its length.
    pub fn line_and_column(self, text: &str) -> (usize, usize) {
        let offset = std::cmp::min(self.0, text.len());
        let mut line = 1;
        let mut column = 1;
        for c in text[..offset].chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_and_column_counts_newlines() {
        let text = "ab\ncd\n";
        assert_eq!(Position::new(0).line_and_column(text), (1, 1));
        assert_eq!(Position::new(1).line_and_column(text), (1, 2));
        assert_eq!(Position::new(3).line_and_column(text), (2, 1));
        assert_eq!(Position::new(5).line_and_column(text), (2, 3));
        assert_eq!(Position::new(6).line_and_column(text), (3, 1));
    }

    #[test]
    fn line_and_column_clamps_to_text() {
        assert_eq!(Position::new(10).line_and_column("xy"), (1, 3));
    }
}

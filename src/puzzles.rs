use crate::board::Board;
use std::fmt;
use std::fs;
use std::io;

/// Error type for puzzle file parsing operations.
#[derive(Debug)]
pub enum PuzzleError {
    /// IO error when reading from file
    Io(io::Error),
    /// Invalid puzzle content
    InvalidPuzzle(String),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Io(err) => write!(f, "IO error: {}", err),
            PuzzleError::InvalidPuzzle(msg) => write!(f, "Invalid puzzle: {}", msg),
        }
    }
}

impl std::error::Error for PuzzleError {}

impl From<io::Error> for PuzzleError {
    fn from(err: io::Error) -> Self {
        PuzzleError::Io(err)
    }
}

/// A collection of sliding-tile puzzles.
#[derive(Debug)]
pub struct Puzzles {
    puzzles: Vec<Board>,
}

impl Puzzles {
    /// Parse puzzles from a string.
    ///
    /// The format uses:
    /// - Lines starting with `;` as puzzle separators/comments
    /// - One board row per line, cells separated by whitespace, `0` for the blank
    /// - Empty lines between puzzles
    pub fn from_text(contents: &str) -> Result<Self, PuzzleError> {
        let mut puzzles = Vec::new();
        let mut current = String::new();

        for line in contents.lines() {
            let ends_puzzle = line.trim_start().starts_with(';') || line.trim().is_empty();
            if ends_puzzle {
                if !current.is_empty() {
                    puzzles.push(Self::parse_puzzle(&current, puzzles.len() + 1)?);
                    current.clear();
                }
                continue;
            }

            current.push_str(line);
            current.push('\n');
        }

        // Last puzzle when the file doesn't end with an empty line
        if !current.is_empty() {
            puzzles.push(Self::parse_puzzle(&current, puzzles.len() + 1)?);
        }

        Ok(Puzzles { puzzles })
    }

    /// Parse puzzles from a text file.
    pub fn from_file(path: &str) -> Result<Self, PuzzleError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    fn parse_puzzle(text: &str, number: usize) -> Result<Board, PuzzleError> {
        Board::from_text(text)
            .map_err(|err| PuzzleError::InvalidPuzzle(format!("puzzle {}: {}", number, err)))
    }

    /// Get the nth puzzle (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.puzzles.get(index)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_basic() {
        let puzzle1 = "1 2 3\n4 5 6\n7 0 8";
        let puzzle2 = " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14  0 15";
        let puzzle3 = "0 1 2";

        let content = format!(
            "; 1\n\n{}\n\n; 2\n{}\n; 3\n\n\n{}",
            puzzle1, puzzle2, puzzle3
        );

        let puzzles = Puzzles::from_text(&content).unwrap();

        assert_eq!(puzzles.len(), 3);
        assert_eq!(puzzles.get(0).unwrap(), &Board::from_text(puzzle1).unwrap());
        assert_eq!(puzzles.get(1).unwrap().width(), 4);
        assert_eq!(puzzles.get(1).unwrap().to_string().trim_end(), puzzle2);
        assert_eq!(puzzles.get(2).unwrap().height(), 1);
        assert!(puzzles.get(3).is_none());
    }

    #[test]
    fn test_from_text_blank_line_separators() {
        let puzzles = Puzzles::from_text("1 2\n3 0\n\n   \n2 0\n1 3\n").unwrap();
        assert_eq!(puzzles.len(), 2);
        assert!(puzzles.get(0).unwrap().is_solved());
        assert_eq!(puzzles.get(1).unwrap().blank_pos(), (0, 1));
    }

    #[test]
    fn test_from_text_empty() {
        let puzzles = Puzzles::from_text("; nothing here\n\n").unwrap();
        assert!(puzzles.is_empty());
    }

    #[test]
    fn test_from_text_invalid_puzzle() {
        let content = "; 1
1 2 3
4 5 6
7 8 0

; 2
1 2 3
4 4 6
7 8 0
";

        let result = Puzzles::from_text(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidPuzzle(_)));
        assert_eq!(
            err.to_string(),
            "Invalid puzzle: puzzle 2: Value 4 appears more than once"
        );
    }

    #[test]
    fn test_from_text_ragged_puzzle() {
        let result = Puzzles::from_text("1 2 3\n4 0\n");
        assert!(matches!(result.unwrap_err(), PuzzleError::InvalidPuzzle(_)));
    }

    #[test]
    fn test_from_file_no_file() {
        let result = Puzzles::from_file("nonexistent_file.txt");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), PuzzleError::Io(_)));
    }
}

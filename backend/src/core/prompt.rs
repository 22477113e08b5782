use std::fmt::Display;
use std::io;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("Parse failure: {0}")]
    Parse(String),
}

/// Where user input comes from. Production reads the terminal; tests
/// substitute a scripted source.
pub trait PromptSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;
}

pub struct Prompt<S: PromptSource> {
    source: S,
}

impl<S: PromptSource> Prompt<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// A trimmed line of input. May be empty.
    pub fn line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.source.read_line(prompt).map(|s| s.trim().to_string())
    }

    pub fn parse<T>(&mut self, prompt: &str) -> Result<T, PromptError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let s = self.line(prompt)?;
        s.parse::<T>().map_err(|e| PromptError::Parse(e.to_string()))
    }

    /// Price entry: a finite, non-negative number.
    pub fn price(&mut self, prompt: &str) -> Result<f64, PromptError> {
        let value: f64 = self.parse(prompt)?;
        if !value.is_finite() || value < 0.0 {
            return Err(PromptError::Parse(format!(
                "price must be a non-negative number, got {value}"
            )));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted source for automated testing without a terminal.
    struct Script {
        lines: VecDeque<String>,
    }

    impl Script {
        fn of(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl PromptSource for Script {
        fn read_line(&mut self, _prompt: &str) -> Result<String, PromptError> {
            self.lines.pop_front().ok_or_else(|| {
                PromptError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
            })
        }
    }

    #[test]
    fn line_trims_surrounding_whitespace() {
        let mut prompt = Prompt::new(Script::of(&["  blade runner  "]));
        assert_eq!(prompt.line("q: ").unwrap(), "blade runner");
    }

    #[test]
    fn parse_handles_padded_numbers() {
        let mut prompt = Prompt::new(Script::of(&[" 3 "]));
        assert_eq!(prompt.parse::<u32>("page: ").unwrap(), 3);
    }

    #[test]
    fn price_accepts_decimals() {
        let mut prompt = Prompt::new(Script::of(&["12.50"]));
        assert_eq!(prompt.price("price: ").unwrap(), 12.5);
    }

    #[test]
    fn price_rejects_negatives_and_garbage() {
        let mut prompt = Prompt::new(Script::of(&["-3", "cheap"]));
        assert!(matches!(prompt.price("price: "), Err(PromptError::Parse(_))));
        assert!(matches!(prompt.price("price: "), Err(PromptError::Parse(_))));
    }

    #[test]
    fn exhausted_script_reports_io_failure() {
        let mut prompt = Prompt::new(Script::of(&[]));
        assert!(matches!(prompt.line("q: "), Err(PromptError::Io(_))));
    }
}

use crate::core::prompt::{PromptError, PromptSource};
use std::io::{self, Write};

/// Real terminal-based prompt source for production use.
pub struct TerminalPrompt;

impl PromptSource for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut buf = String::new();
        io::stdin().read_line(&mut buf)?;
        Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }
}

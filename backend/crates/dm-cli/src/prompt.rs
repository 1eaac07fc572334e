use crate::{CliError, CliResult};

use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented console conversation.
///
/// Generic over the streams so menus can be driven from a buffer.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> CliResult<()> {
        writeln!(self.output, "{}", line).map_err(CliError::terminal)
    }

    /// Print `question` without a newline and read the answer, trimmed.
    /// `None` once the input is exhausted.
    pub fn ask(&mut self, question: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", question).map_err(CliError::terminal)?;
        self.output.flush().map_err(CliError::terminal)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(CliError::terminal)?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Prompt::ask`], with an empty answer replaced by `default`.
    pub fn ask_with_default(&mut self, question: &str, default: &str) -> CliResult<Option<String>> {
        Ok(self.ask(question)?.map(|answer| {
            if answer.is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    /// `y` or `yes` in any case confirms; anything else, including end of
    /// input, declines.
    pub fn confirm(&mut self, question: &str) -> CliResult<bool> {
        Ok(self
            .ask(question)?
            .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes")))
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

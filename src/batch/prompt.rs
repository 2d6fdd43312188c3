//! Yes/no confirmation prompts.

use std::io::{self, BufRead, Write};

use crate::error::RemapError;

/// Asks the user a yes/no question.
pub trait Prompt {
    /// Shows `question` and returns true only for an affirmative answer.
    fn confirm(&mut self, question: &str) -> Result<bool, RemapError>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn confirm(&mut self, question: &str) -> Result<bool, RemapError> {
        (**self).confirm(question)
    }
}

/// Prompt that writes the question to `writer` and reads one answer line
/// from `reader`.
///
/// End of input counts as a negative answer.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<W: Write> LinePrompt<io::StdinLock<'static>, W> {
    /// Prompt reading answers from the process's stdin.
    pub fn stdin(writer: W) -> Self {
        Self::new(io::stdin().lock(), writer)
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool, RemapError> {
        write!(self.writer, "{question}").map_err(RemapError::Prompt)?;
        self.writer.flush().map_err(RemapError::Prompt)?;

        let mut answer = String::new();
        self.reader
            .read_line(&mut answer)
            .map_err(RemapError::Prompt)?;

        Ok(is_affirmative(&answer))
    }
}

/// True when the trimmed answer is `y` or `Y`.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

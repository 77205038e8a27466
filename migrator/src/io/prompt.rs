//! Blocking yes/no prompts on a line-oriented terminal.
//!
//! Answers are read one byte at a time from an unbuffered handle. The patch
//! script inherits the same stdin and may ask its own questions, so nothing
//! past the current answer line may be consumed here.

use std::fs::File;
use std::io::{ErrorKind, Read, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::phases::parse_answer;
use crate::core::types::ConfirmationResult;

/// Source of operator answers.
pub trait Prompter {
    /// Ask `question` and block for an answer. Default is no.
    fn confirm(&mut self, question: &str) -> Result<ConfirmationResult>;
}

/// Prompter that writes `question (y/N): ` and reads one line.
///
/// `input` should not be buffered (see [`unbuffered_stdin`]); reading stops
/// right after the newline.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read up to and including `\n`. `None` on EOF before any byte.
    fn read_answer_line(&mut self) -> Result<Option<String>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    if byte[0] == b'\n' {
                        return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
                    }
                    line.push(byte[0]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("read answer"),
            }
        }
        if line.is_empty() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&line).into_owned()))
        }
    }
}

impl<R: Read, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<ConfirmationResult> {
        write!(self.output, "{question} (y/N): ").context("write prompt")?;
        self.output.flush().context("flush prompt")?;

        let Some(line) = self.read_answer_line()? else {
            // EOF: nobody is there to say yes.
            writeln!(self.output).context("write prompt")?;
            debug!(question, "input closed, treating as decline");
            return Ok(ConfirmationResult::Declined);
        };
        let answer = parse_answer(&line);
        debug!(question, ?answer, "operator answered");
        Ok(answer)
    }
}

/// Duplicate the process stdin as a `File`, bypassing `io::stdin()`'s buffer.
#[cfg(unix)]
pub fn unbuffered_stdin() -> Result<File> {
    use std::os::fd::AsFd;

    let fd = std::io::stdin()
        .as_fd()
        .try_clone_to_owned()
        .context("duplicate stdin")?;
    Ok(File::from(fd))
}

/// Duplicate the process stdin as a `File`, bypassing `io::stdin()`'s buffer.
#[cfg(windows)]
pub fn unbuffered_stdin() -> Result<File> {
    use std::os::windows::io::AsHandle;

    let handle = std::io::stdin()
        .as_handle()
        .try_clone_to_owned()
        .context("duplicate stdin")?;
    Ok(File::from(handle))
}

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// Where the read-eval-print loop gets its lines from.
pub trait LineSource {
    /// Show `prompt` and read the next line. `Ok(None)` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Line editor for interactive terminals.
///
/// Lines are never added to the history.
pub struct Editor {
    inner: DefaultEditor,
}

impl Editor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.inner.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            // Ctrl-C abandons the current line.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads lines from any buffered reader and writes prompts to `prompt_out`.
///
/// Used when standard input is not a terminal, and by tests.
pub struct PlainLines<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> PlainLines<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }

    /// Gives back the prompt writer, e.g. to inspect what was printed.
    pub fn into_prompt_writer(self) -> W {
        self.prompt_out
    }
}

impl<R: BufRead, W: Write> LineSource for PlainLines<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.prompt_out, "{prompt}")?;
        self.prompt_out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_plain_lines_prompts_before_each_read() {
        let mut lines = PlainLines::new(Cursor::new("first\nsecond"), Vec::new());

        assert_eq!(lines.read_line("> ").unwrap().as_deref(), Some("first\n"));
        assert_eq!(lines.read_line("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(lines.read_line("> ").unwrap(), None);
        assert_eq!(lines.into_prompt_writer(), b"> > > ");
    }

    #[test]
    fn test_plain_lines_rejects_invalid_utf8() {
        let mut lines = PlainLines::new(Cursor::new(vec![0xff, 0xfe, b'\n']), Vec::new());
        assert!(lines.read_line("$ ").is_err());
    }
}

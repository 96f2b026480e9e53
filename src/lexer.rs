//! A module implementing lexical analysis (tokenization) of a single shell input line.
//!
//! The lexer splits a line into words the way a POSIX shell does for simple commands:
//! - single quotes preserve every enclosed character literally;
//! - double quotes preserve whitespace, while a backslash only escapes `$`, `` ` ``, `"`, `\`
//!   and newline;
//! - an unquoted backslash preserves the literal value of the next character;
//! - unquoted whitespace separates words, and runs of it never produce empty words.

use std::fmt::{Display, Formatter};

/// Errors that can occur during the lexical analysis process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexingError {
    /// A closing quote (single or double) was not found.
    ///
    /// `completed` holds the words that were finished before the unterminated region opened.
    UnfinishedQuote { completed: Vec<String> },
}

impl std::error::Error for LexingError {}

impl Display for LexingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LexingError::UnfinishedQuote { .. } => write!(f, "unmatched quote"),
        }
    }
}

/// Quoting mode of the lexer. Being a single value, single and double quoting
/// can never be active at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Unquoted,
    UnquotedEscape,
    SingleQuote,
    DoubleQuote,
    DoubleQuoteEscape,
}

struct LexingFSM {
    state: LexingState,
    words: Vec<String>,
    buffer: String,
}

impl LexingFSM {
    fn new() -> Self {
        LexingFSM {
            state: LexingState::Unquoted,
            words: Vec::new(),
            buffer: String::new(),
        }
    }

    /// Runs the machine over `line` and returns the collected words.
    fn make_words(mut self, line: &str) -> Result<Vec<String>, LexingError> {
        for ch in line.chars() {
            match self.state {
                LexingState::Unquoted => self.handle_unquoted(ch),
                LexingState::UnquotedEscape => self.handle_unquoted_escape(ch),
                LexingState::SingleQuote => self.handle_single_quote(ch),
                LexingState::DoubleQuote => self.handle_double_quote(ch),
                LexingState::DoubleQuoteEscape => self.handle_double_quote_escape(ch),
            }
        }

        match self.state {
            LexingState::SingleQuote | LexingState::DoubleQuote | LexingState::DoubleQuoteEscape => {
                Err(LexingError::UnfinishedQuote {
                    completed: self.words,
                })
            }
            // A dangling backslash has nothing to escape and is dropped.
            LexingState::Unquoted | LexingState::UnquotedEscape => {
                self.finish_word();
                Ok(self.words)
            }
        }
    }

    fn finish_word(&mut self) {
        if !self.buffer.is_empty() {
            self.words.push(std::mem::take(&mut self.buffer));
        }
    }

    fn handle_unquoted(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexingState::SingleQuote,
            '"' => self.state = LexingState::DoubleQuote,
            '\\' => self.state = LexingState::UnquotedEscape,
            c if c.is_whitespace() => self.finish_word(),
            c => self.buffer.push(c),
        }
    }

    fn handle_unquoted_escape(&mut self, ch: char) {
        self.buffer.push(ch);
        self.state = LexingState::Unquoted;
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexingState::Unquoted,
            c => self.buffer.push(c),
        }
    }

    fn handle_double_quote(&mut self, ch: char) {
        match ch {
            '"' => self.state = LexingState::Unquoted,
            '\\' => self.state = LexingState::DoubleQuoteEscape,
            c => self.buffer.push(c),
        }
    }

    fn handle_double_quote_escape(&mut self, ch: char) {
        match ch {
            '$' | '`' | '"' | '\\' | '\n' => self.buffer.push(ch),
            c => {
                self.buffer.push('\\');
                self.buffer.push(c);
            }
        }
        self.state = LexingState::DoubleQuote;
    }
}

/// The main entry point function to perform lexical analysis.
///
/// Returns the words of `line` with quotes removed and escapes resolved,
/// or [`LexingError::UnfinishedQuote`] if a quoted region is never closed.
pub fn split_into_words(line: &str) -> Result<Vec<String>, LexingError> {
    LexingFSM::new().make_words(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        split_into_words(line).expect("line should lex")
    }

    #[test]
    fn test_whitespace_separates_words() {
        assert_eq!(words("echo hello   world"), vec!["echo", "hello", "world"]);
        assert_eq!(words("  echo \t hi  "), vec!["echo", "hi"]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(
            words("echo 'shell     example' 'test''script' world''hello"),
            vec!["echo", "shell     example", "testscript", "worldhello"]
        );
        assert_eq!(words(r#"echo 'a\nb' '"x"'"#), vec!["echo", r"a\nb", r#""x""#]);
    }

    #[test]
    fn test_double_quotes_keep_whitespace_and_single_quotes() {
        assert_eq!(
            words(r#"echo "quz  hello"  "bar""baz" "shell's""#),
            vec!["echo", "quz  hello", "barbaz", "shell's"]
        );
    }

    #[test]
    fn test_double_quote_escapes() {
        assert_eq!(words(r#"echo "a\$b""#), vec!["echo", "a$b"]);
        assert_eq!(words(r#"echo "a\nb""#), vec!["echo", r"a\nb"]);
        assert_eq!(words(r#"echo "\"inner\" \\ \`""#), vec!["echo", r#""inner" \ `"#]);
        assert_eq!(words(r#"echo "before\   after""#), vec!["echo", r"before\   after"]);
    }

    #[test]
    fn test_unquoted_backslash_escapes_next_char() {
        assert_eq!(words(r#"echo \'\"x\"\'"#), vec!["echo", r#"'"x"'"#]);
        assert_eq!(words(r"echo script\ \ \ shell"), vec!["echo", "script   shell"]);
        assert_eq!(words(r"echo example\ntest \\"), vec!["echo", "examplentest", r"\"]);
    }

    #[test]
    fn test_dangling_backslash_is_dropped() {
        assert_eq!(words(r"echo abc\"), vec!["echo", "abc"]);
    }

    #[test]
    fn test_empty_quotes_produce_no_word() {
        assert_eq!(words("echo '' \"\""), vec!["echo"]);
    }

    #[test]
    fn test_unfinished_quote_reports_completed_words() {
        assert_eq!(
            split_into_words("echo 'unterminated"),
            Err(LexingError::UnfinishedQuote {
                completed: vec!["echo".to_string()]
            })
        );
        assert_eq!(
            split_into_words(r#"echo a "b c"#),
            Err(LexingError::UnfinishedQuote {
                completed: vec!["echo".to_string(), "a".to_string()]
            })
        );
        assert_eq!(
            split_into_words("'echo x"),
            Err(LexingError::UnfinishedQuote { completed: vec![] })
        );
        assert_eq!(
            split_into_words(r#"echo "abc\"#),
            Err(LexingError::UnfinishedQuote {
                completed: vec!["echo".to_string()]
            })
        );
    }
}

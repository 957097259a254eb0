use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Source of answers for the interactive menu.
///
/// Answers are single whitespace-delimited tokens, so no value read through
/// this trait ever contains a space.
pub trait PromptSource {
    /// Next token, or `None` once input is exhausted.
    fn next_token(&mut self) -> io::Result<Option<String>>;

    /// Drops whatever is left of the current input line.
    fn discard_line(&mut self);
}

/// Splits a line-oriented reader (stdin, or a byte buffer in tests) into
/// tokens.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> PromptSource for TokenReader<R> {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn discard_line(&mut self) {
        self.pending.clear();
    }
}

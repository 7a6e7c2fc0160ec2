use std::iter::Enumerate;
use std::str::{Lines, SplitWhitespace};

/// One assembly program, held as raw text.
#[derive(Debug)]
pub struct SourceCode {
    source: String,
}

impl SourceCode {
    pub fn new(source: String) -> Self {
        Self { source }
    }

    pub fn iter(&self) -> Lexer<'_> {
        Lexer {
            lines: self.source.lines().enumerate(),
            words: "".split_whitespace(),
            line: 0,
        }
    }
}

/// Splits the source into whitespace-delimited words, one line at a time.
/// Words never span lines.
#[derive(Debug)]
pub struct Lexer<'a> {
    lines: Enumerate<Lines<'a>>,
    words: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Returns the next word, advancing past empty lines as needed.
    pub fn next_word(&mut self) -> Option<&'a str> {
        loop {
            if let Some(word) = self.words.next() {
                return Some(word);
            }
            let (index, line) = self.lines.next()?;
            self.line = index + 1;
            self.words = line.split_whitespace();
        }
    }

    /// Discards the remaining words of the current line.
    pub fn skip_line(&mut self) {
        self.words = "".split_whitespace();
    }

    /// 1-based line number of the last word returned by
    /// [`Lexer::next_word`].
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_word()
    }
}

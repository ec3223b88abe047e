use std::ops::Range;

use crate::node::ReferenceKind;
use crate::options::ParseOptions;
use crate::source::InlineSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal characters between markers.
    Text,
    /// A run of emphasis markers with its flanking classification.
    Delimiter {
        marker: char,
        len: usize,
        can_open: bool,
        can_close: bool,
    },
    /// A run of this many backticks.
    Backticks(usize),
    OpenBracket(ReferenceKind),
    CloseBracket,
    Softbreak,
    Hardbreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<P> {
    pub kind: TokenKind,
    pub start: P,
    pub end: P,
}

/// Single forward pass over an inline span, yielding candidate tokens as
/// ranges into the source. Every character lands in exactly one token.
pub struct Scanner<'s, S: InlineSource + ?Sized> {
    source: &'s S,
    pos: S::Pos,
    lo: S::Pos,
    hi: S::Pos,
    options: ParseOptions,
}

impl<'s, S: InlineSource + ?Sized> Scanner<'s, S> {
    pub fn new(source: &'s S, bounds: Range<S::Pos>, options: ParseOptions) -> Self {
        Self {
            source,
            pos: bounds.start,
            lo: bounds.start,
            hi: bounds.end,
            options,
        }
    }

    fn char_at(&self, pos: S::Pos) -> Option<char> {
        if pos < self.hi {
            self.source.char_at(pos)
        } else {
            None
        }
    }

    fn current_char(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    fn peek_char(&self) -> Option<char> {
        if self.pos >= self.hi {
            return None;
        }
        self.char_at(self.source.step_forward(self.pos))
    }

    fn char_before(&self, pos: S::Pos) -> Option<char> {
        if pos > self.lo {
            self.source.char_at(self.source.step_back(pos))
        } else {
            None
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.pos = self.source.step_forward(self.pos);
        Some(ch)
    }

    fn advance_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(char) -> bool,
    {
        let mut count = 0;
        while let Some(ch) = self.current_char() {
            if !predicate(ch) {
                break;
            }
            self.advance();
            count += 1;
        }
        count
    }

    /// Measure the space run at `pos`. Returns where it ends and whether it
    /// forms a hard break (two or more spaces followed by a newline).
    fn space_run(&self, pos: S::Pos) -> (S::Pos, bool) {
        let mut end = pos;
        let mut count = 0;
        while self.char_at(end) == Some(' ') {
            end = self.source.step_forward(end);
            count += 1;
        }
        (end, count >= 2 && self.char_at(end) == Some('\n'))
    }

    fn delimiter_run(&mut self, marker: char) -> TokenKind {
        let start = self.pos;
        let len = self.advance_while(|c| c == marker);
        let before = self.char_before(start);
        let after = self.current_char();
        let (can_open, can_close) = self.options.classes.can_open_close(marker, before, after);
        TokenKind::Delimiter {
            marker,
            len,
            can_open,
            can_close,
        }
    }

    fn backslash(&mut self) -> TokenKind {
        self.advance(); // consume \
        match self.current_char() {
            Some('\n') => {
                self.advance();
                TokenKind::Hardbreak
            }
            // A backtick after `\` is left to the code span pass, where a
            // backslash is literal.
            Some(c) if c.is_ascii_punctuation() && c != '`' => {
                self.advance();
                TokenKind::Text
            }
            _ => TokenKind::Text,
        }
    }

    fn spaces(&mut self) -> TokenKind {
        let (end, hard) = self.space_run(self.pos);
        if hard {
            self.pos = end;
            self.advance(); // consume \n
            TokenKind::Hardbreak
        } else {
            self.text()
        }
    }

    fn starts_token(&self, ch: char) -> bool {
        match ch {
            '`' | '[' | ']' | '\n' | '\\' => true,
            '!' => self.peek_char() == Some('['),
            c => self.options.is_emphasis_marker(c),
        }
    }

    /// Literal text: always takes the current character, then runs until
    /// something that could start another token.
    fn text(&mut self) -> TokenKind {
        self.advance();
        while let Some(ch) = self.current_char() {
            if ch == ' ' {
                let (end, hard) = self.space_run(self.pos);
                if hard {
                    break;
                }
                self.pos = end;
                continue;
            }
            if self.starts_token(ch) {
                break;
            }
            self.advance();
        }
        TokenKind::Text
    }

    pub fn next_token(&mut self) -> Option<Token<S::Pos>> {
        let start = self.pos;
        let ch = self.current_char()?;

        let kind = match ch {
            c if self.options.is_emphasis_marker(c) => self.delimiter_run(c),

            '`' => TokenKind::Backticks(self.advance_while(|c| c == '`')),

            '[' => {
                self.advance();
                TokenKind::OpenBracket(ReferenceKind::Normal)
            }

            '!' if self.peek_char() == Some('[') => {
                self.advance(); // consume !
                self.advance(); // consume [
                TokenKind::OpenBracket(ReferenceKind::Unwrapped)
            }

            ']' => {
                self.advance();
                TokenKind::CloseBracket
            }

            '\n' => {
                self.advance();
                TokenKind::Softbreak
            }

            '\\' => self.backslash(),

            ' ' => self.spaces(),

            _ => self.text(),
        };

        Some(Token {
            kind,
            start,
            end: self.pos,
        })
    }
}

impl<S: InlineSource + ?Sized> Iterator for Scanner<'_, S> {
    type Item = Token<S::Pos>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token()?;
        log::trace!("Token {:?} at {:?}..{:?}", token.kind, token.start, token.end);
        Some(token)
    }
}

pub fn tokenize<S: InlineSource + ?Sized>(
    source: &S,
    bounds: Range<S::Pos>,
    options: ParseOptions,
) -> Vec<Token<S::Pos>> {
    let tokens: Vec<_> = Scanner::new(source, bounds, options).collect();
    log::debug!("Scanning complete. {} tokens generated.", tokens.len());
    tokens
}

#[cfg(test)]
mod tests;

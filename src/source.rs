use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// A read-only, bidirectional, index-addressable character sequence.
///
/// Positions are opaque and ordered. Offsets are counted in the code units
/// the sequence indexes by (bytes for `str`, chars for `[char]`), which is
/// why markers are only ever skipped with [`InlineSource::offset`] when they
/// are known to be ASCII.
pub trait InlineSource {
    type Pos: Copy + Ord + fmt::Debug;

    fn start(&self) -> Self::Pos;

    fn end(&self) -> Self::Pos;

    /// The element starting at `pos`, or `None` at the end of the sequence.
    fn char_at(&self, pos: Self::Pos) -> Option<char>;

    /// Position just past the element at `pos`.
    fn step_forward(&self, pos: Self::Pos) -> Self::Pos;

    /// Position of the element just before `pos`.
    fn step_back(&self, pos: Self::Pos) -> Self::Pos;

    /// Move `pos` by a signed number of code units.
    fn offset(&self, pos: Self::Pos, units: isize) -> Self::Pos;

    fn text(&self, range: Range<Self::Pos>) -> Cow<'_, str>;
}

impl InlineSource for str {
    type Pos = usize;

    fn start(&self) -> usize {
        0
    }

    fn end(&self) -> usize {
        self.len()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn step_forward(&self, pos: usize) -> usize {
        pos + self.char_at(pos).map_or(1, char::len_utf8)
    }

    fn step_back(&self, pos: usize) -> usize {
        self[..pos]
            .chars()
            .next_back()
            .map_or(pos.saturating_sub(1), |c| pos - c.len_utf8())
    }

    fn offset(&self, pos: usize, units: isize) -> usize {
        pos.saturating_add_signed(units)
    }

    fn text(&self, range: Range<usize>) -> Cow<'_, str> {
        Cow::Borrowed(&self[range])
    }
}

impl InlineSource for [char] {
    type Pos = usize;

    fn start(&self) -> usize {
        0
    }

    fn end(&self) -> usize {
        self.len()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.get(pos).copied()
    }

    fn step_forward(&self, pos: usize) -> usize {
        pos + 1
    }

    fn step_back(&self, pos: usize) -> usize {
        pos.saturating_sub(1)
    }

    fn offset(&self, pos: usize, units: isize) -> usize {
        pos.saturating_add_signed(units)
    }

    fn text(&self, range: Range<usize>) -> Cow<'_, str> {
        Cow::Owned(self[range].iter().collect())
    }
}

/// Reads characters inside a fixed `[pos, hi)` window of a source.
pub(crate) struct Cursor<'s, S: InlineSource + ?Sized> {
    source: &'s S,
    pub pos: S::Pos,
    hi: S::Pos,
}

impl<'s, S: InlineSource + ?Sized> Cursor<'s, S> {
    pub fn new(source: &'s S, pos: S::Pos, hi: S::Pos) -> Self {
        Self { source, pos, hi }
    }

    pub fn peek(&self) -> Option<char> {
        if self.pos < self.hi {
            self.source.char_at(self.pos)
        } else {
            None
        }
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos = self.source.step_forward(self.pos);
        Some(c)
    }

    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume characters while `predicate` holds, returning how many.
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.bump();
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_positions_are_utf8_bytes() {
        let s = "aé*";
        assert_eq!(s.char_at(1), Some('é'));
        assert_eq!(s.step_forward(1), 3);
        assert_eq!(s.step_back(3), 1);
        assert_eq!(s.char_at(3), Some('*'));
        assert_eq!(s.char_at(4), None);
        assert_eq!(s.text(1..3), "é");
    }

    #[test]
    fn char_slice_positions_are_indices() {
        let chars: Vec<char> = "aé*".chars().collect();
        let s: &[char] = &chars;
        assert_eq!(s.char_at(1), Some('é'));
        assert_eq!(s.step_forward(1), 2);
        assert_eq!(s.step_back(2), 1);
        assert_eq!(s.offset(2, -2), 0);
        assert_eq!(s.text(0..2), "aé");
    }

    #[test]
    fn cursor_stops_at_window_end() {
        let s = "abcdef";
        let mut cursor = Cursor::new(s, 1, 3);
        assert_eq!(cursor.peek(), Some('b'));
        assert_eq!(cursor.eat_while(|_| true), 2);
        assert_eq!(cursor.pos, 3);
        assert_eq!(cursor.bump(), None);
    }
}

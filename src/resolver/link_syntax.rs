//! Raw-text parsers for the parts of a reference that follow `]`.

use std::ops::Range;

use crate::definitions::ReferenceDefinition;
use crate::source::{Cursor, InlineSource};

const MAX_PAREN_DEPTH: usize = 32;
const MAX_LABEL_CHARS: usize = 999;

/// Parse `(destination "title")` starting at the `(`. Returns the definition
/// it spells out and the position just past the closing `)`.
pub(super) fn inline_destination<S>(
    source: &S,
    open_paren: S::Pos,
    hi: S::Pos,
) -> Option<(ReferenceDefinition, S::Pos)>
where
    S: InlineSource + ?Sized,
{
    let mut cursor = Cursor::new(source, open_paren, hi);
    if !cursor.eat('(') {
        return None;
    }
    skip_whitespace(&mut cursor);

    let destination = if cursor.peek() == Some('<') {
        angle_destination(&mut cursor)?
    } else {
        bare_destination(&mut cursor)?
    };

    let separated = skip_whitespace(&mut cursor);
    let title = match cursor.peek() {
        Some('"' | '\'' | '(') if separated => {
            let title = link_title(&mut cursor)?;
            skip_whitespace(&mut cursor);
            Some(title)
        }
        _ => None,
    };

    if !cursor.eat(')') {
        return None;
    }
    Some((ReferenceDefinition::new(destination, title), cursor.pos))
}

/// Parse a `[label]` starting at the `[`. Returns the inner range and the
/// position just past `]`. Labels may not contain unescaped brackets.
pub(super) fn link_label<S>(
    source: &S,
    open_bracket: S::Pos,
    hi: S::Pos,
) -> Option<(Range<S::Pos>, S::Pos)>
where
    S: InlineSource + ?Sized,
{
    let mut cursor = Cursor::new(source, open_bracket, hi);
    if !cursor.eat('[') {
        return None;
    }
    let start = cursor.pos;
    let mut count = 0;
    loop {
        let end = cursor.pos;
        match cursor.bump()? {
            ']' => return Some((start..end, cursor.pos)),
            '[' => return None,
            '\\' => {
                if cursor.peek().is_some_and(|c| c.is_ascii_punctuation()) {
                    cursor.bump();
                    count += 1;
                }
            }
            _ => {}
        }
        count += 1;
        if count > MAX_LABEL_CHARS {
            return None;
        }
    }
}

/// Spaces and tabs with at most one line ending. Returns whether anything
/// was skipped.
fn skip_whitespace<S: InlineSource + ?Sized>(cursor: &mut Cursor<'_, S>) -> bool {
    let mut skipped = cursor.eat_while(|c| c == ' ' || c == '\t') > 0;
    if cursor.eat('\n') {
        skipped = true;
        cursor.eat_while(|c| c == ' ' || c == '\t');
    }
    skipped
}

/// Push an escaped character if the backslash at the cursor escapes one.
fn unescape_into<S: InlineSource + ?Sized>(cursor: &mut Cursor<'_, S>, out: &mut String) {
    match cursor.peek() {
        Some(c) if c.is_ascii_punctuation() => {
            cursor.bump();
            out.push(c);
        }
        _ => out.push('\\'),
    }
}

fn angle_destination<S: InlineSource + ?Sized>(cursor: &mut Cursor<'_, S>) -> Option<String> {
    cursor.bump(); // consume <
    let mut destination = String::new();
    loop {
        match cursor.bump()? {
            '>' => return Some(destination),
            '<' | '\n' => return None,
            '\\' => unescape_into(cursor, &mut destination),
            c => destination.push(c),
        }
    }
}

fn bare_destination<S: InlineSource + ?Sized>(cursor: &mut Cursor<'_, S>) -> Option<String> {
    let mut destination = String::new();
    let mut depth = 0usize;
    while let Some(c) = cursor.peek() {
        if c.is_whitespace() || c.is_control() {
            break;
        }
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_PAREN_DEPTH {
                    return None;
                }
            }
            ')' if depth == 0 => break,
            ')' => depth -= 1,
            '\\' => {
                cursor.bump();
                unescape_into(cursor, &mut destination);
                continue;
            }
            _ => {}
        }
        cursor.bump();
        destination.push(c);
    }
    (depth == 0).then_some(destination)
}

fn link_title<S: InlineSource + ?Sized>(cursor: &mut Cursor<'_, S>) -> Option<String> {
    let opener = cursor.bump()?;
    let closer = if opener == '(' { ')' } else { opener };
    let mut title = String::new();
    let mut line_is_blank = false;
    loop {
        let c = cursor.bump()?;
        match c {
            c if c == closer => return Some(title),
            '(' if opener == '(' => return None,
            '\n' => {
                if line_is_blank {
                    return None;
                }
                line_is_blank = true;
                title.push(c);
            }
            '\\' => {
                line_is_blank = false;
                unescape_into(cursor, &mut title);
            }
            ' ' | '\t' => title.push(c),
            c => {
                line_is_blank = false;
                title.push(c);
            }
        }
    }
}

use std::ops::Range;

use super::{Mark, Resolver};
use crate::definitions::ReferenceDefinitions;
use crate::node::{InlineNode, InlineNodeKind};
use crate::scanner::TokenKind;
use crate::source::InlineSource;

/// What is left of a delimiter run while pairing.
#[derive(Debug, Clone)]
struct Run<P> {
    start: P,
    end: P,
    marker: char,
    /// Length as scanned; the multiple-of-3 rule looks at this.
    len: usize,
    remaining: usize,
    can_open: bool,
    can_close: bool,
}

impl<P> Run<P> {
    /// Index into the openers-bottom table.
    fn bottom_slot(&self) -> usize {
        let marker = if self.marker == '_' { 1 } else { 0 };
        marker * 6 + usize::from(self.can_open) * 3 + self.len % 3
    }
}

/// A run that can both open and close may not pair with another if their
/// combined length is a multiple of 3, unless both lengths are.
fn breaks_rule_of_three<P>(opener: &Run<P>, closer: &Run<P>) -> bool {
    (closer.can_open || opener.can_close)
        && (opener.len + closer.len) % 3 == 0
        && !(opener.len % 3 == 0 && closer.len % 3 == 0)
}

/// Drop run `i` from the doubly linked list of candidates.
fn unlink(prev: &mut [Option<usize>], next: &mut [Option<usize>], i: usize) {
    if let Some(p) = prev[i] {
        next[p] = next[i];
    }
    if let Some(n) = next[i] {
        prev[n] = prev[i];
    }
}

impl<S, D> Resolver<'_, S, D>
where
    S: InlineSource + ?Sized,
    D: ReferenceDefinitions + ?Sized,
{
    /// Pair the remaining delimiter runs. Runs only pair with runs in the
    /// same scope: the text of the innermost reference around them, or the
    /// top level.
    pub(super) fn resolve_emphasis(&mut self) {
        let mut groups: Vec<Vec<Run<S::Pos>>> = vec![Vec::new(); self.scopes.len() + 1];

        let mut scopes: Vec<(usize, Range<S::Pos>)> = self
            .scopes
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, range)| (index + 1, range))
            .collect();
        scopes.sort_by_key(|(_, range)| range.start);
        let mut pending = scopes.into_iter().peekable();
        let mut open: Vec<(usize, Range<S::Pos>)> = Vec::new();

        for (token, mark) in self.tokens.iter().zip(&self.marks) {
            let TokenKind::Delimiter {
                marker,
                len,
                can_open,
                can_close,
            } = token.kind
            else {
                continue;
            };
            if *mark != Mark::Live {
                continue;
            }

            while let Some((scope, range)) = pending.next_if(|(_, range)| range.start <= token.start) {
                while open.last().is_some_and(|(_, outer)| outer.end <= range.start) {
                    open.pop();
                }
                open.push((scope, range));
            }
            while open.last().is_some_and(|(_, range)| range.end <= token.start) {
                open.pop();
            }

            let scope = open.last().map_or(0, |(scope, _)| *scope);
            groups[scope].push(Run {
                start: token.start,
                end: token.end,
                marker,
                len,
                remaining: len,
                can_open,
                can_close,
            });
        }

        for runs in groups {
            if !runs.is_empty() {
                self.pair_runs(runs);
            }
        }
    }

    /// CommonMark's delimiter pairing over one scope, walking closers left to
    /// right and searching back for the nearest compatible opener.
    fn pair_runs(&mut self, mut runs: Vec<Run<S::Pos>>) {
        let count = runs.len();
        let mut prev: Vec<Option<usize>> = (0..count).map(|i| i.checked_sub(1)).collect();
        let mut next: Vec<Option<usize>> = (0..count)
            .map(|i| (i + 1 < count).then_some(i + 1))
            .collect();
        // Openers at or below these indices are known not to match closers
        // of the slot's kind.
        let mut openers_bottom: [Option<usize>; 12] = [None; 12];

        let mut closer = Some(0);
        while let Some(c) = closer {
            if !runs[c].can_close {
                closer = next[c];
                continue;
            }

            let slot = runs[c].bottom_slot();
            let mut candidate = prev[c];
            let mut found = None;
            while let Some(o) = candidate {
                if openers_bottom[slot].is_some_and(|bottom| o <= bottom) {
                    break;
                }
                let opener = &runs[o];
                if opener.can_open
                    && opener.marker == runs[c].marker
                    && !breaks_rule_of_three(opener, &runs[c])
                {
                    found = Some(o);
                    break;
                }
                candidate = prev[o];
            }

            let Some(o) = found else {
                openers_bottom[slot] = prev[c];
                let following = next[c];
                if !runs[c].can_open {
                    unlink(&mut prev, &mut next, c);
                }
                closer = following;
                continue;
            };

            let width = if runs[o].remaining >= 2 && runs[c].remaining >= 2 {
                runs[o].remaining.min(runs[c].remaining)
            } else {
                1
            };
            let offset = width as isize;

            // Runs between the pair can no longer match anything.
            next[o] = Some(c);
            prev[c] = Some(o);

            runs[o].end = self.source.offset(runs[o].end, -offset);
            runs[o].remaining -= width;
            let start = runs[o].end;
            let end = self.source.offset(runs[c].start, offset);
            runs[c].start = end;
            runs[c].remaining -= width;

            log::trace!("Emphasis {start:?}..{end:?} (width {width})");
            self.nodes
                .push(InlineNode::new(InlineNodeKind::Emphasis(width), start, end));

            if runs[o].remaining == 0 {
                unlink(&mut prev, &mut next, o);
            }
            if runs[c].remaining == 0 {
                let following = next[c];
                unlink(&mut prev, &mut next, c);
                closer = following;
            }
        }
    }
}

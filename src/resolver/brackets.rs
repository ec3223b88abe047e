use std::ops::Range;

use super::link_syntax::{inline_destination, link_label};
use super::{Mark, Resolver};
use crate::definitions::{ReferenceDefinition, ReferenceDefinitions, is_valid_label};
use crate::node::{InlineNode, InlineNodeKind, Reference, ReferenceKind};
use crate::scanner::TokenKind;
use crate::source::InlineSource;

#[derive(Debug, Clone, Copy)]
struct Opener {
    index: usize,
    kind: ReferenceKind,
}

impl<S, D> Resolver<'_, S, D>
where
    S: InlineSource + ?Sized,
    D: ReferenceDefinitions + ?Sized,
{
    /// Match `]` against the innermost open `[` or `![` and try to turn the
    /// pair into a reference. On success the bracketed text becomes a new
    /// emphasis scope and everything after `]` that belongs to the
    /// reference syntax is claimed. On failure both brackets stay literal
    /// and the opener goes back on the stack. Openers disabled by an
    /// enclosing link are dropped instead.
    pub(super) fn resolve_brackets(&mut self) {
        let mut openers: Vec<Opener> = Vec::new();
        // `Normal` openers below this stack depth sit inside a resolved
        // link and may no longer open one.
        let mut disabled_below = 0;
        let mut index = 0;

        while index < self.tokens.len() {
            if self.marks[index] != Mark::Live {
                index += 1;
                continue;
            }
            match self.tokens[index].kind {
                TokenKind::OpenBracket(kind) => openers.push(Opener { index, kind }),
                TokenKind::CloseBracket => {
                    let Some(opener) = openers.pop() else {
                        index += 1;
                        continue;
                    };
                    let disabled =
                        opener.kind == ReferenceKind::Normal && openers.len() < disabled_below;
                    disabled_below = disabled_below.min(openers.len());
                    if disabled {
                        log::trace!("Bracket at {:?} is inside a link", self.tokens[opener.index].start);
                        index += 1;
                        continue;
                    }

                    if let Some((reference, end)) = self.try_reference(opener, index) {
                        let start = self.tokens[opener.index].start;
                        log::trace!("Reference {start:?}..{end:?} ({:?})", opener.kind);
                        self.marks[opener.index] = Mark::Inert;
                        self.scopes.push(reference.title.clone());
                        self.nodes.push(InlineNode::new(
                            InlineNodeKind::Reference(Box::new(reference)),
                            start,
                            end,
                        ));
                        if opener.kind == ReferenceKind::Normal {
                            disabled_below = openers.len();
                        }
                        index = self.claim_until(index, end);
                        continue;
                    }
                    // Both brackets stay literal, but the opener may still
                    // pair with a later `]`.
                    openers.push(opener);
                }
                _ => {}
            }
            index += 1;
        }
    }

    /// Whether a resolved code span starts in `[after the closer, end)`.
    fn code_span_before(&self, closer: usize, end: S::Pos) -> bool {
        self.tokens[closer + 1..]
            .iter()
            .zip(&self.marks[closer + 1..])
            .take_while(|(token, _)| token.start < end)
            .any(|(_, mark)| *mark == Mark::Code)
    }

    fn lookup(&self, label: Range<S::Pos>) -> Option<ReferenceDefinition> {
        let text = self.source.text(label);
        if !is_valid_label(&text) {
            return None;
        }
        let definition = self.definitions.lookup(&text).cloned();
        if definition.is_none() {
            log::debug!("Unresolved reference label {:?}", text);
        }
        definition
    }

    /// Try the inline, full, collapsed and shortcut forms in that order.
    fn try_reference(
        &self,
        opener: Opener,
        closer: usize,
    ) -> Option<(Reference<S::Pos>, S::Pos)> {
        let open = self.tokens[opener.index];
        let close = self.tokens[closer];
        let title = self.source.offset(open.start, opener.kind.width() as isize)..close.start;
        let after = close.end;
        let hi = self.bounds.end;
        let next = if after < hi {
            self.source.char_at(after)
        } else {
            None
        };
        let reference = |definition| Reference {
            kind: opener.kind,
            title: title.clone(),
            definition,
        };

        if next == Some('(')
            && let Some((definition, end)) = inline_destination(self.source, after, hi)
            && !self.code_span_before(closer, end)
        {
            return Some((reference(definition), end));
        }

        if next == Some('[')
            && let Some((label, end)) = link_label(self.source, after, hi)
            && !self.code_span_before(closer, end)
        {
            // An explicit label that does not resolve is not retried as a
            // shortcut reference.
            let label = if label.start == label.end {
                title.clone()
            } else {
                label
            };
            return self
                .lookup(label)
                .map(|definition| (reference(definition), end));
        }

        self.lookup(title.clone())
            .map(|definition| (reference(definition), after))
    }
}

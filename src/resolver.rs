//! Turns scanned tokens into resolved inline nodes.
//!
//! Resolution runs in three phases over the same token list, each seeing the
//! matches of the previous ones: code spans, then bracketed references, then
//! emphasis. Tokens are never removed; a phase that claims a token marks it
//! so later phases skip it. The output is a flat list of structured nodes
//! (no `Text`); literal text is whatever those nodes leave uncovered, which
//! the assembler fills in.

use std::ops::Range;

use crate::definitions::ReferenceDefinitions;
use crate::node::{InlineNode, InlineNodeKind};
use crate::options::ParseOptions;
use crate::scanner::{Token, TokenKind, tokenize};
use crate::source::InlineSource;

mod brackets;
mod code_spans;
mod emphasis;
mod link_syntax;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Still available to later phases.
    Live,
    /// Opening backtick run of a resolved code span.
    Code,
    /// Claimed by a code span interior or reference syntax.
    Inert,
}

pub(crate) struct Resolver<'a, S: InlineSource + ?Sized, D: ReferenceDefinitions + ?Sized> {
    source: &'a S,
    definitions: &'a D,
    bounds: Range<S::Pos>,
    tokens: Vec<Token<S::Pos>>,
    marks: Vec<Mark>,
    nodes: Vec<InlineNode<S::Pos>>,
    /// Text ranges of resolved references, innermost first.
    scopes: Vec<Range<S::Pos>>,
}

impl<'a, S, D> Resolver<'a, S, D>
where
    S: InlineSource + ?Sized,
    D: ReferenceDefinitions + ?Sized,
{
    pub fn new(
        source: &'a S,
        bounds: Range<S::Pos>,
        definitions: &'a D,
        options: ParseOptions,
    ) -> Self {
        let tokens = tokenize(source, bounds.clone(), options);
        let marks = vec![Mark::Live; tokens.len()];
        Self {
            source,
            definitions,
            bounds,
            tokens,
            marks,
            nodes: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Mark every token from `from` onwards that starts before `end` as
    /// claimed. Returns the index of the first token left untouched.
    fn claim_until(&mut self, from: usize, end: S::Pos) -> usize {
        let mut index = from;
        while index < self.tokens.len() && self.tokens[index].start < end {
            self.marks[index] = Mark::Inert;
            index += 1;
        }
        index
    }

    /// Emit break nodes for line breaks no phase claimed.
    fn resolve_breaks(&mut self) {
        for (token, mark) in self.tokens.iter().zip(&self.marks) {
            if *mark != Mark::Live {
                continue;
            }
            let kind = match token.kind {
                TokenKind::Softbreak => InlineNodeKind::Softbreak,
                TokenKind::Hardbreak => InlineNodeKind::Hardbreak,
                _ => continue,
            };
            self.nodes.push(InlineNode::new(kind, token.start, token.end));
        }
    }

    pub fn resolve(mut self) -> Vec<InlineNode<S::Pos>> {
        log::debug!(
            "Resolving {} tokens in {:?}..{:?}",
            self.tokens.len(),
            self.bounds.start,
            self.bounds.end
        );
        self.resolve_code_spans();
        self.resolve_brackets();
        self.resolve_emphasis();
        self.resolve_breaks();
        log::debug!("Resolution complete. {} structured nodes.", self.nodes.len());
        self.nodes
    }
}

/// Resolve `bounds` of `source` into a flat list of structured nodes.
pub fn resolve<S, D>(
    source: &S,
    bounds: Range<S::Pos>,
    definitions: &D,
    options: ParseOptions,
) -> Vec<InlineNode<S::Pos>>
where
    S: InlineSource + ?Sized,
    D: ReferenceDefinitions + ?Sized,
{
    Resolver::new(source, bounds, definitions, options).resolve()
}

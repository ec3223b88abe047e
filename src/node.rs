use std::ops::Range;

use crate::definitions::ReferenceDefinition;
use crate::source::InlineSource;
use crate::tree::NodeId;

/// How a reference was opened: `[` or `![`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Normal,
    Unwrapped,
}

impl ReferenceKind {
    /// Width of the opening marker in code units.
    pub fn width(self) -> usize {
        match self {
            ReferenceKind::Normal => 1,
            ReferenceKind::Unwrapped => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reference<P> {
    pub kind: ReferenceKind,
    /// Range of the bracketed text between the opener and `]`.
    pub title: Range<P>,
    pub definition: ReferenceDefinition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InlineNodeKind<P> {
    Reference(Box<Reference<P>>),
    /// Code span delimited by this many backticks on each side.
    Code(usize),
    /// Emphasis delimited by this many markers on each side.
    Emphasis(usize),
    Text,
    Softbreak,
    Hardbreak,
}

/// A resolved inline element covering `[start, end)` of its source.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineNode<P> {
    pub kind: InlineNodeKind<P>,
    pub start: P,
    pub end: P,
    pub(crate) children: Vec<NodeId>,
}

impl<P: Copy + Ord> InlineNode<P> {
    pub fn new(kind: InlineNodeKind<P>, start: P, end: P) -> Self {
        debug_assert!(start <= end, "inline node ends before it starts");
        Self {
            kind,
            start,
            end,
            children: Vec::new(),
        }
    }

    pub fn range(&self) -> Range<P> {
        self.start..self.end
    }

    /// The part of the node that holds its inner content, without markers.
    pub fn content_range<S>(&self, source: &S) -> Range<P>
    where
        S: InlineSource<Pos = P> + ?Sized,
    {
        match &self.kind {
            InlineNodeKind::Reference(reference) => reference.title.clone(),
            InlineNodeKind::Code(width) | InlineNodeKind::Emphasis(width) => {
                let width = *width as isize;
                source.offset(self.start, width)..source.offset(self.end, -width)
            }
            _ => self.start..self.end,
        }
    }

    /// Ordering key used when assembling the tree.
    ///
    /// Only the start is compared: nodes never share a start in a finished
    /// tree, so this agrees with range ordering wherever it matters. Kept as
    /// a key function instead of an `Ord` impl so nodes are not mistaken for
    /// range-ordered values elsewhere.
    pub fn sort_key(&self) -> P {
        self.start
    }

    /// Whether parsed inline children may be nested inside this node.
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            InlineNodeKind::Reference(_) | InlineNodeKind::Emphasis(_)
        )
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Ranges taken up by markup rather than content (delimiters, code
    /// spans, breaks, reference syntax around the title).
    pub(crate) fn markup_ranges<S>(&self, source: &S) -> [Option<Range<P>>; 2]
    where
        S: InlineSource<Pos = P> + ?Sized,
    {
        match &self.kind {
            InlineNodeKind::Text => [None, None],
            InlineNodeKind::Code(_) | InlineNodeKind::Softbreak | InlineNodeKind::Hardbreak => {
                [Some(self.start..self.end), None]
            }
            InlineNodeKind::Emphasis(width) => {
                let width = *width as isize;
                [
                    Some(self.start..source.offset(self.start, width)),
                    Some(source.offset(self.end, -width)..self.end),
                ]
            }
            InlineNodeKind::Reference(reference) => [
                Some(self.start..reference.title.start),
                Some(reference.title.end..self.end),
            ],
        }
    }
}

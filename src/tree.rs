use std::fmt::Write;
use std::ops::Index;

use crate::node::{InlineNode, InlineNodeKind};
use crate::source::InlineSource;

/// Index of a node inside an [`InlineTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The resolved inline structure of one span: an arena of nodes plus the
/// ordered top-level ids. Each node lists its children by id, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineTree<P> {
    pub(crate) nodes: Vec<InlineNode<P>>,
    pub(crate) roots: Vec<NodeId>,
}

impl<P> Default for InlineTree<P> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }
}

impl<P: Copy + Ord> InlineTree<P> {
    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn roots(&self) -> impl ExactSizeIterator<Item = &InlineNode<P>> + '_ {
        self.roots.iter().map(|&id| &self.nodes[id.0])
    }

    pub fn get(&self, id: NodeId) -> Option<&InlineNode<P>> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> impl ExactSizeIterator<Item = &InlineNode<P>> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .map(|&child| &self.nodes[child.0])
    }

    /// Total number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, in-order traversal yielding each node with its depth.
    pub fn walk(&self) -> Walk<'_, P> {
        Walk {
            tree: self,
            stack: self.roots.iter().rev().map(|&id| (0, id)).collect(),
        }
    }
}

impl<P> Index<NodeId> for InlineTree<P> {
    type Output = InlineNode<P>;

    fn index(&self, id: NodeId) -> &InlineNode<P> {
        &self.nodes[id.0]
    }
}

pub struct Walk<'t, P> {
    tree: &'t InlineTree<P>,
    stack: Vec<(usize, NodeId)>,
}

impl<P> Iterator for Walk<'_, P> {
    type Item = (usize, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let children = &self.tree.nodes[id.0].children;
        self.stack
            .extend(children.iter().rev().map(|&child| (depth + 1, child)));
        Some((depth, id))
    }
}

/// Render a tree as one indented line per node, e.g.
/// `Emphasis(2) 0..5 "**a**"`.
pub fn dump<S>(tree: &InlineTree<S::Pos>, source: &S) -> String
where
    S: InlineSource + ?Sized,
{
    let mut out = String::new();
    for (depth, id) in tree.walk() {
        let node = &tree[id];
        let label = match &node.kind {
            InlineNodeKind::Reference(reference) => {
                let definition = &reference.definition;
                match &definition.title {
                    Some(title) => format!(
                        "Reference({:?} -> {:?} {:?})",
                        reference.kind, definition.destination, title
                    ),
                    None => format!(
                        "Reference({:?} -> {:?})",
                        reference.kind, definition.destination
                    ),
                }
            }
            InlineNodeKind::Code(width) => format!("Code({width})"),
            InlineNodeKind::Emphasis(width) => format!("Emphasis({width})"),
            InlineNodeKind::Text => "Text".to_string(),
            InlineNodeKind::Softbreak => "Softbreak".to_string(),
            InlineNodeKind::Hardbreak => "Hardbreak".to_string(),
        };
        let _ = writeln!(
            out,
            "{:indent$}{label} {:?}..{:?} {:?}",
            "",
            node.start,
            node.end,
            source.text(node.range()),
            indent = depth * 2
        );
    }
    out
}

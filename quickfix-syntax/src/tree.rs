use crate::kind::SyntaxKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Preorder index of a node inside one [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Half-open UTF-8 byte range `[start, end)` into the tree's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn empty(offset: u32) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn contains_range(self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(self, other: TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Semantic type recorded by analysis for an expression or declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Rendered type without the nullability marker, e.g. `String`.
    pub name: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub primitive: bool,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            primitive: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn primitive(mut self) -> Self {
        self.primitive = true;
        self
    }

    pub fn render(&self) -> String {
        if self.nullable {
            format!("{}?", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
    pub(crate) text: Option<Box<str>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// An immutable, already-analyzed source unit.
///
/// Nodes are stored in preorder, so a parent always has a smaller id than its
/// children. The tree is never mutated after [`crate::TreeBuilder::finish`];
/// edits produce new source text instead.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub(crate) source: String,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) types: BTreeMap<NodeId, TypeInfo>,
}

impl SyntaxTree {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Returns `None` for ids that do not belong to this snapshot.
    pub fn node(&self, id: NodeId) -> Option<SyntaxNode<'_>> {
        (id.index() < self.nodes.len()).then_some(SyntaxNode { tree: self, id })
    }

    pub fn type_of(&self, id: NodeId) -> Option<&TypeInfo> {
        self.types.get(&id)
    }

    /// All nodes of `kind`, in source order.
    pub fn nodes_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode<'_>> {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.kind == kind)
            .map(move |(i, _)| SyntaxNode {
                tree: self,
                id: NodeId(i as u32),
            })
    }

    /// First token whose text equals `text`, in source order.
    pub fn find_token(&self, kind: SyntaxKind, text: &str) -> Option<SyntaxNode<'_>> {
        self.nodes_of_kind(kind)
            .find(|n| n.token_text() == Some(text))
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Cheap cursor over one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{}@{}", self.kind(), self.id, self.range())
    }
}

impl<'t> SyntaxNode<'t> {
    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> SyntaxKind {
        self.tree.data(self.id).kind
    }

    pub fn range(&self) -> TextRange {
        self.tree.data(self.id).range
    }

    pub fn is_token(&self) -> bool {
        self.kind().is_token()
    }

    pub fn is_trivia(&self) -> bool {
        self.kind().is_trivia()
    }

    /// Text of a token; `None` for nodes.
    pub fn token_text(&self) -> Option<&'t str> {
        self.tree.data(self.id).text.as_deref()
    }

    /// Source text covered by this node.
    pub fn text(&self) -> &'t str {
        let r = self.range();
        self.tree
            .source
            .get(r.start as usize..r.end as usize)
            .unwrap_or_default()
    }

    pub fn is_token_with(&self, kind: SyntaxKind, text: &str) -> bool {
        self.kind() == kind && self.token_text() == Some(text)
    }

    pub fn type_info(&self) -> Option<&'t TypeInfo> {
        self.tree.type_of(self.id)
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        let tree = self.tree;
        tree.data(self.id)
            .parent
            .map(|id| SyntaxNode { tree, id })
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + use<'t> {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| SyntaxNode { tree, id })
    }

    /// Children that are not whitespace or comments.
    pub fn significant_children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + use<'t> {
        self.children().filter(|c| !c.is_trivia())
    }

    /// Children that are nodes rather than tokens.
    pub fn child_nodes(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + use<'t> {
        self.children().filter(|c| !c.is_token())
    }

    pub fn first_child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    pub fn child_token(&self, kind: SyntaxKind, text: &str) -> Option<SyntaxNode<'t>> {
        self.children().find(|c| c.is_token_with(kind, text))
    }

    pub fn first_significant_child(&self) -> Option<SyntaxNode<'t>> {
        self.significant_children().next()
    }

    pub fn last_significant_child(&self) -> Option<SyntaxNode<'t>> {
        self.significant_children().next_back()
    }

    fn sibling_at(&self, offset: isize) -> Option<SyntaxNode<'t>> {
        let parent = self.parent()?;
        let siblings = &self.tree.data(parent.id).children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        let idx = pos.checked_add_signed(offset)?;
        siblings.get(idx).map(|&id| SyntaxNode {
            tree: self.tree,
            id,
        })
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.sibling_at(1)
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.sibling_at(-1)
    }

    pub fn next_significant_sibling(&self) -> Option<SyntaxNode<'t>> {
        std::iter::successors(self.next_sibling(), |n| n.next_sibling()).find(|n| !n.is_trivia())
    }

    pub fn prev_significant_sibling(&self) -> Option<SyntaxNode<'t>> {
        std::iter::successors(self.prev_sibling(), |n| n.prev_sibling()).find(|n| !n.is_trivia())
    }

    /// This node followed by its ancestors up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> + use<'t> {
        std::iter::successors(Some(*self), |n| n.parent())
    }

    /// Ancestors, excluding this node.
    pub fn strict_ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> + use<'t> {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    /// This node and everything below it, in preorder.
    pub fn descendants(&self) -> impl Iterator<Item = SyntaxNode<'t>> + use<'t> {
        let mut stack = vec![*self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().rev());
            Some(node)
        })
    }
}

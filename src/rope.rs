// model = "claude-opus-4-5"
// created = "2026-02-01"
// modified = "2026-02-02"
// driver = "Isaac Clayton"

//! Persistent rope
//!
//! A [`Rope`] is an immutable string value backed by a balanced tree of
//! bounded leaves. Every edit returns a new rope; unchanged subtrees are
//! shared between the old and new values, so keeping many versions of a
//! document around costs one spine per edit, not one copy.
//!
//! Edits work in two phases: a history-keeping locate finds the leaf that
//! owns the target index, then the spine from that leaf to the root is
//! rebuilt copy-on-write, replacing exactly one child per level by
//! identity. Everything off the spine is shared as-is.

use std::rc::Rc;

use crate::descent::{Descent, NoVisit, Step};
use crate::error::RopeError;
use crate::history::{HistoryCursor, Located};
use crate::leaf::{split_into_leaves, Leaf, MAX_LEAF};
use crate::node::{create_parent, merge, Node, MAX_CHILDREN};

/// An immutable, persistent string with cheap shared versions.
#[derive(Clone)]
pub struct Rope {
    root: Rc<Node>,
    len: usize,
}

impl Rope {
    /// The empty rope.
    pub fn new() -> Rope {
        return Rope {
            root: Node::empty(),
            len: 0,
        };
    }

    fn from_root(root: Rc<Node>) -> Rope {
        debug_assert!(root.is_empty() || root.is_balanced());
        let len = root.subtree_len();
        return Rope { root, len };
    }

    /// Number of characters.
    #[inline(always)]
    pub fn len(&self) -> usize {
        return self.len;
    }

    /// Whether the rope holds no characters.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Height of the backing tree. A single-leaf rope has height 0.
    pub fn height(&self) -> usize {
        return self.root.height();
    }

    /// Whether the backing tree is in balanced shape. Holds for every
    /// rope the API produces; exposed for inspection and tests.
    pub fn is_balanced(&self) -> bool {
        return self.root.is_empty() || self.root.is_balanced();
    }

    /// The character at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<char> {
        if index >= self.len {
            return None;
        }
        let mut descent = Descent::new(self.root.height());
        return match descent.run(Rc::clone(&self.root), index, &mut NoVisit) {
            Step::Found { ch, .. } => Some(ch),
            Step::OutOfBounds => None,
        };
    }

    /// Global index of the first occurrence of `ch`, if any.
    pub fn index_of(&self, ch: char) -> Option<usize> {
        let mut passed = 0;
        for node in self.leaf_nodes() {
            let leaf = node.as_leaf().expect("collect_leaves yields leaves");
            if let Some(local) = leaf.as_str().chars().position(|c| c == ch) {
                return Some(passed + local);
            }
            passed += leaf.len();
        }
        return None;
    }

    /// The leaf fragments in left-to-right order.
    pub fn leaves(&self) -> Vec<Leaf> {
        return self
            .leaf_nodes()
            .iter()
            .map(|node| node.as_leaf().expect("collect_leaves yields leaves").clone())
            .collect();
    }

    fn leaf_nodes(&self) -> Vec<Rc<Node>> {
        let mut out = Vec::new();
        if !self.root.is_empty() {
            self.root.collect_leaves(&mut out);
        }
        return out;
    }

    /// Iterate the rope's characters from the start.
    pub fn chars(&self) -> Chars {
        return self.chars_from(0);
    }

    /// Iterate the rope's characters starting at `from`. A start past the
    /// end yields nothing.
    pub fn chars_from(&self, from: usize) -> Chars {
        return Chars {
            cursor: HistoryCursor::new(Rc::clone(&self.root), from),
        };
    }

    /// A new rope with `s` inserted at `index`. `index == len` appends.
    pub fn insert(&self, index: usize, s: &str) -> Result<Rope, RopeError> {
        if index > self.len {
            return Err(RopeError::OutOfRange);
        }
        if s.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            // Only index 0 passes the bound check on an empty rope.
            return Ok(Rope::from(s));
        }

        // An append targets the last character's leaf, one slot past it.
        let append = index == self.len;
        let target = if append { index - 1 } else { index };
        let located = HistoryCursor::new(Rc::clone(&self.root), target)
            .locate()
            .ok_or(RopeError::Internal)?;
        let offset = if append {
            located.offset + 1
        } else {
            located.offset
        };
        let leaf = located.leaf.as_leaf().ok_or(RopeError::Internal)?;

        let added = s.chars().count();
        if leaf.len() + added <= MAX_LEAF {
            // Fast path: the leaf absorbs the insertion.
            let patched = Node::leaf(leaf.add(offset, s)?);
            let root = rebuild_spine(&located, &self.root, Rc::clone(&located.leaf), patched)?;
            return Ok(Rope::from_root(root));
        }

        // Slow path: split into capacity-respecting pieces.
        let pieces: Vec<Rc<Node>> = leaf
            .expandable_add(offset, s)?
            .into_iter()
            .map(Node::leaf)
            .collect();
        if Rc::ptr_eq(&located.leaf, &self.root) {
            return Ok(Rope::from_root(merge(pieces)?));
        }

        let parent = Rc::clone(
            located
                .find_parent(&located.leaf)
                .ok_or(RopeError::Internal)?,
        );
        let patched = if parent.child_count() - 1 + pieces.len() <= MAX_CHILDREN {
            // The parent has room: widen it in place.
            let slot = parent
                .position_of(&located.leaf)
                .ok_or(RopeError::Internal)?;
            parent.splice_child(slot, pieces)?
        } else {
            // No room: the pieces become one taller child in the old slot.
            parent.replace_child(&located.leaf, merge(pieces)?)?
        };
        let root = rebuild_spine(&located, &self.root, parent, patched)?;
        return Ok(Rope::from_root(root));
    }

    /// A new rope with the character at `index` removed.
    pub fn delete_at(&self, index: usize) -> Result<Rope, RopeError> {
        if index >= self.len {
            return Err(RopeError::OutOfRange);
        }
        let located = HistoryCursor::new(Rc::clone(&self.root), index)
            .locate()
            .ok_or(RopeError::Internal)?;
        let leaf = located.leaf.as_leaf().ok_or(RopeError::Internal)?;
        let patched = leaf.delete_at(located.offset)?;
        let root = if patched.is_empty() {
            // The leaf vanishes; collapse empty ancestors on the way up.
            rebuild_spine_delete(&located, &self.root, Rc::clone(&located.leaf))?
        } else {
            rebuild_spine(
                &located,
                &self.root,
                Rc::clone(&located.leaf),
                Node::leaf(patched),
            )?
        };
        return Ok(Rope::from_root(root));
    }

    /// The sub-rope covering `lo..hi` (exclusive on the right).
    pub fn sub_rope(&self, lo: usize, hi: usize) -> Result<Rope, RopeError> {
        if lo > hi || hi > self.len {
            return Err(RopeError::OutOfRange);
        }
        if lo == hi {
            return Ok(Rope::new());
        }
        if let Some(leaf) = self.root.as_leaf() {
            return Ok(Rope::from_root(Node::leaf(leaf.slice(lo, hi))));
        }

        let start = HistoryCursor::new(Rc::clone(&self.root), lo)
            .locate()
            .ok_or(RopeError::Internal)?;
        let end = HistoryCursor::new(Rc::clone(&self.root), hi - 1)
            .locate()
            .ok_or(RopeError::Internal)?;

        if Rc::ptr_eq(&start.leaf, &end.leaf) {
            let leaf = start.leaf.as_leaf().ok_or(RopeError::Internal)?;
            return Ok(Rope::from_root(Node::leaf(
                leaf.slice(start.offset, end.offset + 1),
            )));
        }

        // Lowest common ancestor of the two leaves, by identity.
        let mut chain: Vec<*const Node> = Vec::new();
        let mut cur = Rc::clone(&start.leaf);
        chain.push(Rc::as_ptr(&cur));
        while let Some(parent) = start.find_parent(&cur) {
            chain.push(Rc::as_ptr(parent));
            cur = Rc::clone(parent);
        }
        let mut lca = Rc::clone(&end.leaf);
        while !chain.contains(&Rc::as_ptr(&lca)) {
            let parent = end.find_parent(&lca).ok_or(RopeError::Internal)?;
            lca = Rc::clone(parent);
        }

        // Slice the boundary leaves, keep the interior untouched.
        let mut leaves = Vec::new();
        lca.collect_leaves(&mut leaves);
        let first = leaves
            .iter()
            .position(|l| Rc::ptr_eq(l, &start.leaf))
            .ok_or(RopeError::Internal)?;
        let last = leaves
            .iter()
            .position(|l| Rc::ptr_eq(l, &end.leaf))
            .ok_or(RopeError::Internal)?;
        let start_leaf = start.leaf.as_leaf().ok_or(RopeError::Internal)?;
        let end_leaf = end.leaf.as_leaf().ok_or(RopeError::Internal)?;

        let mut pieces: Vec<Rc<Node>> = Vec::with_capacity(last - first + 1);
        pieces.push(Node::leaf(start_leaf.slice(start.offset, start_leaf.len())));
        for node in &leaves[first + 1..last] {
            pieces.push(Rc::clone(node));
        }
        pieces.push(Node::leaf(end_leaf.slice(0, end.offset + 1)));
        pieces.retain(|node| !node.is_empty());
        if pieces.is_empty() {
            return Ok(Rope::new());
        }
        if pieces.len() == 1 {
            return Ok(Rope::from_root(pieces.pop().expect("length checked")));
        }
        return Ok(Rope::from_root(merge(pieces)?));
    }

    /// A new rope with `lo..hi` removed.
    pub fn remove_range(&self, lo: usize, hi: usize) -> Result<Rope, RopeError> {
        if lo > hi || hi > self.len {
            return Err(RopeError::OutOfRange);
        }
        if lo == 0 {
            return self.sub_rope(hi, self.len);
        }
        let left = self.sub_rope(0, lo)?;
        let right = self.sub_rope(hi, self.len)?;
        return Ok(left.concat(&right));
    }

    /// The concatenation of two ropes. Concat with the empty rope is a
    /// no-op; otherwise the roots become siblings under a fresh parent,
    /// which keeps the tree wide and grows height by at most one.
    pub fn concat(&self, other: &Rope) -> Rope {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let root = create_parent(vec![Rc::clone(&self.root), Rc::clone(&other.root)])
            .expect("two balanced roots fit under one parent");
        return Rope::from_root(root);
    }
}

/// Climb from an edited node to the root, replacing one child per level
/// by identity. Everything off the path is shared untouched.
fn rebuild_spine(
    located: &Located,
    root: &Rc<Node>,
    mut old: Rc<Node>,
    mut new: Rc<Node>,
) -> Result<Rc<Node>, RopeError> {
    while !Rc::ptr_eq(&old, root) {
        let parent = located.find_parent(&old).ok_or(RopeError::Internal)?;
        let slot = parent.position_of(&old).ok_or(RopeError::Internal)?;
        let patched = parent.set_child(slot, new)?;
        old = Rc::clone(parent);
        new = patched;
    }
    return Ok(new);
}

/// Delete variant of the spine climb: while the replacement is empty the
/// child's slot is dropped instead, collapsing ancestors that empty out.
fn rebuild_spine_delete(
    located: &Located,
    root: &Rc<Node>,
    mut old: Rc<Node>,
) -> Result<Rc<Node>, RopeError> {
    let mut new = Node::empty();
    while new.is_empty() {
        if Rc::ptr_eq(&old, root) {
            return Ok(Node::empty());
        }
        let parent = located.find_parent(&old).ok_or(RopeError::Internal)?;
        let slot = parent.position_of(&old).ok_or(RopeError::Internal)?;
        new = parent.remove_child(slot)?;
        old = Rc::clone(parent);
    }
    return rebuild_spine(located, root, old, new);
}

/// Character iterator over a rope, driven by a resumable descent.
pub struct Chars {
    cursor: HistoryCursor,
}

impl Iterator for Chars {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if !self.cursor.has_next() {
            return None;
        }
        return self.cursor.next();
    }
}

impl Default for Rope {
    fn default() -> Rope {
        return Rope::new();
    }
}

impl From<&str> for Rope {
    fn from(s: &str) -> Rope {
        if s.is_empty() {
            return Rope::new();
        }
        let mut leaves = split_into_leaves(s);
        if leaves.len() == 1 {
            return Rope::from_root(Node::leaf(leaves.pop().expect("length checked")));
        }
        let nodes: Vec<Rc<Node>> = leaves.into_iter().map(Node::leaf).collect();
        let root = merge(nodes).expect("freshly split leaves fit the builder contract");
        return Rope::from_root(root);
    }
}

impl From<String> for Rope {
    fn from(s: String) -> Rope {
        return Rope::from(s.as_str());
    }
}

impl FromIterator<char> for Rope {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Rope {
        let s: String = iter.into_iter().collect();
        return Rope::from(s);
    }
}

impl<'a> IntoIterator for &'a Rope {
    type Item = char;
    type IntoIter = Chars;

    fn into_iter(self) -> Chars {
        return self.chars();
    }
}

impl std::fmt::Display for Rope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for node in self.leaf_nodes() {
            f.write_str(node.as_leaf().expect("collect_leaves yields leaves").as_str())?;
        }
        return Ok(());
    }
}

impl std::fmt::Debug for Rope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(
            f,
            "Rope {{ len: {}, height: {} }}",
            self.len,
            self.height()
        );
    }
}

impl PartialEq for Rope {
    fn eq(&self, other: &Rope) -> bool {
        return self.len == other.len && self.chars().eq(other.chars());
    }
}

impl Eq for Rope {}

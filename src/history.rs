// model = "claude-opus-4-5"
// created = "2026-02-01"
// modified = "2026-02-02"
// driver = "Isaac Clayton"

//! History-aware traversal
//!
//! [`HistoryCursor`] wraps the descent engine and remembers where it has
//! been: every node entered during a descent is recorded in visitation
//! order, and a child-to-parent link is installed for each, keyed by node
//! identity. The links let a caller climb back up the exact path a locate
//! took, which is what the mutating operations use to rebuild the spine
//! above an edited leaf.
//!
//! The cursor is resumable: after a successful fetch it restarts the
//! engine from the current leaf with the ancestor stack intact, so walking
//! forward character by character does not re-descend from the root.
//!
//! Mutations need exactly one locate-then-rebuild round trip, so the
//! single-shot [`HistoryCursor::locate`] consumes the cursor and hands
//! back a [`Located`] — a second locate is unrepresentable.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::descent::{Descent, Step, Visit};
use crate::node::Node;

/// Visited nodes and the child-to-parent links installed along the way.
pub(crate) struct History {
    /// Nodes in visitation order, most recent last.
    visited: Vec<Rc<Node>>,
    /// Parent of each visited node, keyed by the child's identity.
    links: FxHashMap<*const Node, Rc<Node>>,
}

impl History {
    fn new(root: &Rc<Node>) -> History {
        return History {
            visited: vec![Rc::clone(root)],
            links: FxHashMap::default(),
        };
    }

    /// The recorded parent of `child`. The root has none.
    pub(crate) fn find_parent(&self, child: &Rc<Node>) -> Option<&Rc<Node>> {
        return self.links.get(&Rc::as_ptr(child));
    }
}

impl Visit for History {
    fn on_child(&mut self, node: &Rc<Node>) {
        // The parent is the most recently visited node that owns this
        // child. Scanning backwards finds it even after the engine has
        // wandered into a sibling subtree and come back up.
        let parent = self
            .visited
            .iter()
            .rev()
            .find(|candidate| candidate.position_of(node).is_some());
        debug_assert!(parent.is_some(), "visited child without a visited parent");
        if let Some(parent) = parent {
            self.links.insert(Rc::as_ptr(node), Rc::clone(parent));
        }
        self.visited.push(Rc::clone(node));
    }
}

/// Lookahead state between `has_next` and `next`.
enum Fetch {
    /// Nothing fetched yet for the current position.
    Idle,
    /// A character is fetched and waiting to be consumed.
    Ready(char),
    /// The walk ran past the end; permanent.
    Closed,
}

/// A resumable, history-keeping walk over a rope's characters.
pub(crate) struct HistoryCursor {
    root: Rc<Node>,
    descent: Descent,
    history: History,
    /// Leaf holding the most recent hit.
    leaf: Option<Rc<Node>>,
    /// Global index of `leaf`'s first character.
    leaf_start: usize,
    /// Offset of the most recent hit within `leaf`.
    offset_in_leaf: usize,
    /// Next global index to fetch.
    next_index: usize,
    fetch: Fetch,
}

impl HistoryCursor {
    pub(crate) fn new(root: Rc<Node>, from: usize) -> HistoryCursor {
        let history = History::new(&root);
        let descent = Descent::new(root.height());
        return HistoryCursor {
            root,
            descent,
            history,
            leaf: None,
            leaf_start: 0,
            offset_in_leaf: 0,
            next_index: from,
            fetch: Fetch::Idle,
        };
    }

    /// Fetch the character at the cursor position, if any. Subsequent
    /// calls without an intervening `next` are no-ops; a failed fetch
    /// closes the cursor for good.
    pub(crate) fn has_next(&mut self) -> bool {
        match self.fetch {
            Fetch::Closed => return false,
            Fetch::Ready(_) => return true,
            Fetch::Idle => {}
        }
        let (start, index) = match &self.leaf {
            // Resume forward from the current leaf with the stack intact.
            Some(leaf) if self.next_index >= self.leaf_start => {
                (Rc::clone(leaf), self.next_index - self.leaf_start)
            }
            // First fetch, or a target before the current leaf: restart.
            _ => {
                self.descent.reset();
                (Rc::clone(&self.root), self.next_index)
            }
        };
        return match self.descent.run(start, index, &mut self.history) {
            Step::Found { leaf, offset, ch } => {
                self.leaf_start = self.next_index - offset;
                self.offset_in_leaf = offset;
                self.leaf = Some(leaf);
                self.fetch = Fetch::Ready(ch);
                true
            }
            Step::OutOfBounds => {
                self.fetch = Fetch::Closed;
                false
            }
        };
    }

    /// Consume the fetched character and advance. Requires a prior
    /// successful `has_next`.
    pub(crate) fn next(&mut self) -> Option<char> {
        return match self.fetch {
            Fetch::Ready(ch) => {
                self.fetch = Fetch::Idle;
                self.next_index += 1;
                Some(ch)
            }
            _ => None,
        };
    }

    /// Run the descent once for the cursor's position and hand back the
    /// located leaf together with the recorded history.
    pub(crate) fn locate(mut self) -> Option<Located> {
        if !self.has_next() {
            return None;
        }
        return Some(Located {
            leaf: self.leaf.expect("has_next stored the leaf"),
            offset: self.offset_in_leaf,
            history: self.history,
        });
    }
}

/// The result of a single-shot locate: the leaf containing the target,
/// the target's offset within it, and the parent links needed to rebuild
/// the spine above it.
pub(crate) struct Located {
    pub(crate) leaf: Rc<Node>,
    pub(crate) offset: usize,
    history: History,
}

impl Located {
    /// The recorded parent of `child`. The root has none.
    pub(crate) fn find_parent(&self, child: &Rc<Node>) -> Option<&Rc<Node>> {
        return self.history.find_parent(child);
    }
}

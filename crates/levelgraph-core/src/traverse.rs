//! The single walk primitive every graph algorithm is built on.
//!
//! A walk starts at one node and moves either toward children
//! (forward) or toward parents (reverse), in breadth-first or depth-first
//! order. After each visit the caller hands back an [`Action`] deciding whether the walk expands the node,
//! skips it, or stops.
//!
//! # Breadth-first level filtering
//!
//! ```text
//!        A      level 0
//!       / \
//!      B   \    level 1
//!      |    \
//!      C    /   level 2
//!       \  /
//!        D      level 3
//! ```
//!
//! `D` is a child of `A`, but its level is 3 because of `C`. A breadth-first
//! walk only follows edges whose level delta is exactly one, so `D` is reached
//! through `C` and the order is `A B C D`, never `A B D C`. Each node is
//! enqueued at most once per breadth-first walk.
//!
//! Depth-first walks follow every edge and do not deduplicate: a node reached
//! by two paths is visited twice. Level propagation relies on that, since it
//! runs while levels are still changing.
//!
//! A walk holds no borrow of the nodes between steps, so callers that need
//! to mutate nodes mid-walk (level propagation) can drive it by hand.

use std::collections::{HashSet, VecDeque};
use std::ops::ControlFlow;

use crate::id::NodeId;
use crate::node::NodeArena;

/// Which neighbor set a walk expands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Toward children.
    Forward,
    /// Toward parents.
    Reverse,
}

/// Visiting order of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Queue based, level filtered, each node at most once.
    BreadthFirst,
    /// Stack based, every path, no deduplication.
    DepthFirst,
}

/// Control value returned by a walk callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Expand the neighbors of the visited node.
    Continue,
    /// Abort the whole walk immediately.
    Over,
    /// Do not expand this node; keep walking what is already pending.
    OverSelf,
}

/// Frontier state of one walk.
#[derive(Debug)]
pub(crate) struct Walk {
    direction: Direction,
    mode: Mode,
    frontier: VecDeque<NodeId>,
    enqueued: HashSet<NodeId>,
}

impl Walk {
    /// Creates a walk whose first visit is `start`.
    pub(crate) fn new(start: NodeId, direction: Direction, mode: Mode) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(start);

        let mut enqueued = HashSet::new();
        if mode == Mode::BreadthFirst {
            enqueued.insert(start);
        }

        Walk {
            direction,
            mode,
            frontier,
            enqueued,
        }
    }

    /// Returns the next node to visit, or `None` when the walk is exhausted.
    pub(crate) fn next_node(&mut self) -> Option<NodeId> {
        match self.mode {
            Mode::BreadthFirst => self.frontier.pop_front(),
            Mode::DepthFirst => self.frontier.pop_back(),
        }
    }

    /// Applies the action returned for `visited`.
    ///
    /// Returns `ControlFlow::Break` once the walk was aborted with
    /// [`Action::Over`]; the frontier is dropped at that point.
    pub(crate) fn advance<P>(
        &mut self,
        nodes: &NodeArena<P>,
        visited: NodeId,
        action: Action,
    ) -> ControlFlow<()> {
        match action {
            Action::Continue => {
                self.expand(nodes, visited);
                ControlFlow::Continue(())
            }
            Action::OverSelf => ControlFlow::Continue(()),
            Action::Over => {
                self.frontier.clear();
                ControlFlow::Break(())
            }
        }
    }

    fn expand<P>(&mut self, nodes: &NodeArena<P>, visited: NodeId) {
        let node = nodes.get(visited);
        let next = match self.direction {
            Direction::Forward => node.children(),
            Direction::Reverse => node.parents(),
        };

        match self.mode {
            Mode::BreadthFirst => {
                let level = node.level();
                for &id in next {
                    let other = nodes.get(id).level();
                    let one_level_apart = match self.direction {
                        Direction::Forward => other.checked_sub(level) == Some(1),
                        Direction::Reverse => level.checked_sub(other) == Some(1),
                    };
                    if one_level_apart && self.enqueued.insert(id) {
                        self.frontier.push_back(id);
                    }
                }
            }
            Mode::DepthFirst => {
                self.frontier.extend(next.iter().copied());
            }
        }
    }
}

/// Walks `nodes` from `start`, calling `visit` for every visited node.
pub(crate) fn walk<P, F>(
    nodes: &NodeArena<P>,
    start: NodeId,
    direction: Direction,
    mode: Mode,
    mut visit: F,
)
where
    F: FnMut(NodeId) -> Action,
{
    let mut walk = Walk::new(start, direction, mode);
    while let Some(id) = walk.next_node() {
        let action = visit(id);
        if walk.advance(nodes, id, action).is_break() {
            break;
        }
    }
}

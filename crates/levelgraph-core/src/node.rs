//! Nodes and the arena that owns them.
//!
//! A [`Node`] wraps one participant with its computed level and the ordered
//! id sets of its parents and children. All nodes live in a [`NodeArena`];
//! links are plain [`NodeId`]s, so a node never owns its neighbors.
//!
//! Levels are always driven from the parent side: a node sits one level below
//! its deepest parent, and raising a node's level ripples down through its
//! descendants.

use std::fmt;

use indexmap::IndexSet;

use crate::id::{Level, NodeId};
use crate::traverse::{Action, Direction, Mode, Walk};

/// A vertex of the level graph.
#[derive(Debug, Clone)]
pub struct Node<P> {
    participant: P,
    parents: IndexSet<NodeId>,
    children: IndexSet<NodeId>,
    level: Level,
}

impl<P> Node<P> {
    fn new(participant: P) -> Self {
        Node {
            participant,
            parents: IndexSet::new(),
            children: IndexSet::new(),
            level: 0,
        }
    }

    /// The wrapped participant.
    pub fn participant(&self) -> &P {
        &self.participant
    }

    /// Parent ids in the order they were linked.
    pub fn parents(&self) -> &IndexSet<NodeId> {
        &self.parents
    }

    /// Child ids in the order they were linked.
    pub fn children(&self) -> &IndexSet<NodeId> {
        &self.children
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl<P: fmt::Display> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.participant, self.level)
    }
}

/// Contiguous node storage addressed by [`NodeId`].
///
/// Slot 0 always holds the root.
#[derive(Debug, Clone)]
pub struct NodeArena<P> {
    nodes: Vec<Node<P>>,
}

impl<P> NodeArena<P> {
    /// Creates an arena holding only the root node.
    pub(crate) fn new(root: P) -> Self {
        NodeArena {
            nodes: vec![Node::new(root)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Stores a detached node at level 0 and returns its id.
    ///
    /// The node receives its real level when it is linked below a parent.
    pub(crate) fn push(&mut self, participant: P) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(participant));
        id
    }

    /// Looks up a node, or `None` for an id this arena never minted.
    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id.index())
    }

    /// Looks up a node minted by this arena.
    pub(crate) fn get(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates nodes in arena order, together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<P>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Links `child` below `parent`: the child gains the parent (adjusting
    /// levels), then the parent gains the child.
    ///
    /// Does not check for cycles; the graph facade checks ancestry before linking.
    /// Returns the number of descendants re-examined for a level change.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) -> usize {
        let examined = self.add_parent(child, parent);
        self.add_child(parent, child);
        examined
    }

    /// Adds `parent` to the parent set of `id`.
    ///
    /// When the new parent is at or below the node's current level, the node
    /// moves to `parent.level + 1` and the increase is pushed to its
    /// descendants. Returns the number of descendants re-examined.
    pub(crate) fn add_parent(&mut self, id: NodeId, parent: NodeId) -> usize {
        let parent_level = self.get(parent).level;
        let node = &mut self.nodes[id.index()];
        if !node.parents.insert(parent) || parent_level < node.level {
            return 0;
        }

        node.level = parent_level + 1;
        let level = node.level;
        let examined = self.update_child_level(id);
        tracing::trace!(node = %id, level, examined, "raised level");
        examined
    }

    /// Adds `child` to the child set of `id`. Levels are left alone.
    pub(crate) fn add_child(&mut self, id: NodeId, child: NodeId) {
        self.nodes[id.index()].children.insert(child);
    }

    /// Pushes a level increase of `id` down to its descendants.
    ///
    /// Depth-first without deduplication: the walk cannot rely on levels that
    /// are being rewritten, so a descendant reachable by several paths is
    /// re-checked on each. A descendant that already sits below all of its
    /// parents is left alone together with everything under it.
    ///
    /// Returns how many descendant visits the walk made.
    pub(crate) fn update_child_level(&mut self, id: NodeId) -> usize {
        let mut examined = 0;
        let mut walk = Walk::new(id, Direction::Forward, Mode::DepthFirst);
        while let Some(current) = walk.next_node() {
            let action = if current == id {
                Action::Continue
            } else {
                examined += 1;
                self.settle_level(current)
            };
            if walk.advance(self, current, action).is_break() {
                break;
            }
        }
        examined
    }

    fn settle_level(&mut self, id: NodeId) -> Action {
        let deepest_parent = self
            .get(id)
            .parents
            .iter()
            .map(|&p| self.get(p).level)
            .max()
            .unwrap_or(0);
        let candidate = deepest_parent + 1;

        let node = &mut self.nodes[id.index()];
        if node.level < candidate {
            node.level = candidate;
            tracing::trace!(node = %id, level = candidate, "raised descendant level");
            Action::Continue
        } else {
            Action::OverSelf
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(nodes: &NodeArena<char>) -> Vec<(char, Level)> {
        nodes
            .iter()
            .map(|(_, n)| (*n.participant(), n.level()))
            .collect()
    }

    #[test]
    fn new_arena_has_root_at_level_zero() {
        let nodes = NodeArena::new('A');
        let root = nodes.get(nodes.root());
        assert_eq!(root.level(), 0);
        assert!(root.parents().is_empty());
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn linking_places_child_one_below_parent() {
        let mut nodes = NodeArena::new('A');
        let a = nodes.root();
        let b = nodes.push('B');
        nodes.link(a, b);

        assert_eq!(nodes.get(b).level(), 1);
        assert_eq!(nodes.get(b).parents().iter().copied().collect::<Vec<_>>(), vec![a]);
        assert_eq!(nodes.get(a).children().iter().copied().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn links_are_idempotent() {
        let mut nodes = NodeArena::new('A');
        let a = nodes.root();
        let b = nodes.push('B');
        nodes.link(a, b);
        nodes.link(a, b);

        assert_eq!(nodes.get(b).parents().len(), 1);
        assert_eq!(nodes.get(a).children().len(), 1);
        assert_eq!(nodes.get(b).level(), 1);
    }

    #[test]
    fn shallower_second_parent_keeps_level() {
        let mut nodes = NodeArena::new('A');
        let a = nodes.root();
        let b = nodes.push('B');
        let c = nodes.push('C');
        nodes.link(a, b);
        nodes.link(b, c);
        nodes.link(a, c);

        assert_eq!(nodes.get(c).level(), 2);
        assert_eq!(nodes.get(c).parents().len(), 2);
    }

    #[test]
    fn deeper_parent_raises_whole_subtree() {
        // A -> B -> C -> D, A -> X -> Y; then linking C -> X moves X and Y.
        let mut nodes = NodeArena::new('A');
        let a = nodes.root();
        let b = nodes.push('B');
        let c = nodes.push('C');
        let d = nodes.push('D');
        let x = nodes.push('X');
        let y = nodes.push('Y');
        nodes.link(a, b);
        nodes.link(b, c);
        nodes.link(c, d);
        nodes.link(a, x);
        nodes.link(x, y);
        assert_eq!(nodes.get(y).level(), 2);

        nodes.link(c, x);

        assert_eq!(
            levels(&nodes),
            vec![('A', 0), ('B', 1), ('C', 2), ('D', 3), ('X', 3), ('Y', 4)]
        );
    }

    #[test]
    fn propagation_respects_other_deeper_parents() {
        // Z hangs below both X (level 1) and a chain ending at level 3.
        let mut nodes = NodeArena::new('A');
        let a = nodes.root();
        let b = nodes.push('B');
        let c = nodes.push('C');
        let d = nodes.push('D');
        let x = nodes.push('X');
        let z = nodes.push('Z');
        nodes.link(a, b);
        nodes.link(b, c);
        nodes.link(c, d);
        nodes.link(a, x);
        nodes.link(x, z);
        nodes.link(d, z);
        assert_eq!(nodes.get(z).level(), 4);

        // X moves to level 2; Z stays at 4 because D still dominates.
        nodes.link(b, x);
        assert_eq!(nodes.get(x).level(), 2);
        assert_eq!(nodes.get(z).level(), 4);
    }

    #[test]
    fn raising_a_lattice_prunes_settled_branches() {
        // X sits on top of a two-wide lattice: every node of layer k links to
        // both nodes of layer k + 1, so the lattice has 2^LAYERS paths.
        const LAYERS: usize = 16;
        let mut nodes = NodeArena::new(0u32);
        let root = nodes.root();
        let x = nodes.push(1);
        nodes.link(root, x);

        let mut layer = vec![x];
        let mut next_label = 2;
        let mut lattice = Vec::new();
        for _ in 0..LAYERS {
            let pair = [nodes.push(next_label), nodes.push(next_label + 1)];
            next_label += 2;
            for &above in &layer {
                for &below in &pair {
                    nodes.link(above, below);
                }
            }
            lattice.push(pair);
            layer = pair.to_vec();
        }

        let y = nodes.push(next_label);
        let z = nodes.push(next_label + 1);
        nodes.link(root, y);
        nodes.link(y, z);
        let examined = nodes.link(z, x);

        assert_eq!(nodes.get(x).level(), 3);
        for (depth, pair) in lattice.iter().enumerate() {
            for &id in pair {
                assert_eq!(nodes.get(id).level() as usize, depth + 4);
            }
        }
        assert!(
            examined <= 8 * LAYERS,
            "examined {examined} descendant visits for {LAYERS} layers"
        );
    }

    #[test]
    fn unknown_id_lookup_is_none() {
        let nodes = NodeArena::new('A');
        assert!(nodes.node(nodes.root()).is_some());
        assert!(nodes.node(NodeId(5)).is_none());
    }

    #[test]
    fn display_renders_participant_and_level() {
        let mut nodes = NodeArena::new('A');
        let b = nodes.push('B');
        nodes.link(nodes.root(), b);
        assert_eq!(nodes.get(b).to_string(), "(B,1)");
    }
}

//! LevelGraph: the influence graph facade.
//!
//! [`LevelGraph`] is the single entry point for building and scanning an
//! influence graph. It owns the [`NodeArena`], the identity index from
//! participant to [`NodeId`], and the log of accepted links.
//!
//! # Levels
//!
//! The root sits at level 0; every other node sits one level below its
//! deepest parent. Scans visit nodes level by level and only reach a node
//! once every parent that determines its level has been visited:
//!
//! ```text
//!        A          scan order: A B C D
//!      /   \
//!     B     C
//!      \   /
//!        D
//! ```
//!
//! The structure is append-only. Links that would make a participant its own
//! ancestor are refused and leave the graph untouched.

use std::collections::HashSet;

use indexmap::IndexMap;
use petgraph::graph::DiGraph;
use smallvec::SmallVec;

use crate::error::GraphError;
use crate::id::{Level, NodeId};
use crate::node::NodeArena;
use crate::participant::Participant;
use crate::traverse::{walk, Action, Direction, Mode};

/// A level-aware DAG over participants of type `P`.
#[derive(Debug, Clone)]
pub struct LevelGraph<P: Participant> {
    /// Node storage; slot 0 is the root.
    nodes: NodeArena<P>,
    /// Identity index, in first-insertion order.
    index: IndexMap<P, NodeId>,
    /// Accepted `(parent, child)` links in the order they were made.
    links: Vec<(NodeId, NodeId)>,
}

impl<P: Participant> LevelGraph<P> {
    /// Creates a graph holding only `root` at level 0.
    pub fn new(root: P) -> Self {
        let nodes = NodeArena::new(root.clone());
        let mut index = IndexMap::new();
        index.insert(root, nodes.root());

        LevelGraph {
            nodes,
            index,
            links: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// The root participant.
    pub fn root(&self) -> &P {
        self.nodes.get(self.nodes.root()).participant()
    }

    /// Number of participants, root included.
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// Number of distinct levels: one more than the deepest node's level.
    pub fn level(&self) -> usize {
        let deepest = self
            .nodes
            .iter()
            .map(|(_, node)| node.level())
            .max()
            .unwrap_or(0);
        deepest as usize + 1
    }

    /// Returns `true` when nobody has been influenced yet (only the root).
    pub fn is_empty(&self) -> bool {
        self.size() == 1
    }

    pub fn contains(&self, participant: &P) -> bool {
        self.index.contains_key(participant)
    }

    /// Level of `participant`, or `None` if it was never inserted.
    pub fn level_of(&self, participant: &P) -> Option<Level> {
        self.find(participant).map(|id| self.nodes.get(id).level())
    }

    /// Immediate parents of `participant` in link order.
    pub fn parents_of(&self, participant: &P) -> Option<Vec<&P>> {
        let id = self.find(participant)?;
        Some(self.participants_at(self.nodes.get(id).parents().iter().copied()).collect())
    }

    /// Immediate children of `participant` in link order.
    pub fn children_of(&self, participant: &P) -> Option<Vec<&P>> {
        let id = self.find(participant)?;
        Some(self.participants_at(self.nodes.get(id).children().iter().copied()).collect())
    }

    /// All participants in first-insertion order, root first.
    pub fn participants(&self) -> impl Iterator<Item = &P> {
        self.index.keys()
    }

    /// The node storage backing this graph.
    pub fn nodes(&self) -> &NodeArena<P> {
        &self.nodes
    }

    pub(crate) fn links(&self) -> &[(NodeId, NodeId)] {
        &self.links
    }

    pub(crate) fn find(&self, participant: &P) -> Option<NodeId> {
        self.index.get(participant).copied()
    }

    fn participants_at<'a>(
        &'a self,
        ids: impl Iterator<Item = NodeId> + 'a,
    ) -> impl Iterator<Item = &'a P> + 'a {
        ids.map(move |id| self.nodes.get(id).participant())
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Links `target` directly below the root. See [`LevelGraph::add`].
    pub fn add_to_root(&mut self, target: P) -> bool {
        let root = self.root().clone();
        self.add(&root, target)
    }

    /// Links `target` below `parent`, creating `target` on first sight.
    ///
    /// Returns `false`, leaving the graph unchanged, when `parent == target`,
    /// when `parent` is unknown, or when `target` is already an ancestor of
    /// `parent`. Use [`LevelGraph::try_add`] to learn which.
    pub fn add(&mut self, parent: &P, target: P) -> bool {
        self.try_add(parent, target).is_ok()
    }

    /// Like [`LevelGraph::add`], reporting why a link was refused.
    pub fn try_add(&mut self, parent: &P, target: P) -> Result<(), GraphError> {
        if *parent == target {
            tracing::debug!(participant = ?target, "refused self-parenting link");
            return Err(GraphError::self_parent(&target));
        }

        let Some(parent_id) = self.find(parent) else {
            tracing::debug!(parent = ?parent, target = ?target, "refused link to unknown parent");
            return Err(GraphError::parent_not_found(parent));
        };

        let target_id = match self.find(&target) {
            Some(existing) => {
                if self.is_ancestor(existing, parent_id) {
                    tracing::debug!(parent = ?parent, target = ?target, "refused cycle-forming link");
                    return Err(GraphError::would_cycle(parent, &target));
                }
                existing
            }
            None => {
                // A brand-new node has no descendants, so it cannot close a cycle.
                let id = self.nodes.push(target.clone());
                self.index.insert(target, id);
                tracing::trace!(node = %id, "created node");
                id
            }
        };

        if !self.nodes.get(target_id).parents().contains(&parent_id) {
            self.links.push((parent_id, target_id));
        }
        self.nodes.link(parent_id, target_id);
        tracing::trace!(
            parent = %parent_id,
            child = %target_id,
            level = self.nodes.get(target_id).level(),
            "linked"
        );
        Ok(())
    }

    /// Reverse depth-first search: is `candidate` `of` itself or one of its
    /// ancestors?
    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut found = false;
        let mut examined = HashSet::new();
        walk(&self.nodes, of, Direction::Reverse, Mode::DepthFirst, |id| {
            if id == candidate {
                found = true;
                Action::Over
            } else if examined.insert(id) {
                Action::Continue
            } else {
                Action::OverSelf
            }
        });
        found
    }

    // -----------------------------------------------------------------------
    // Scanning
    // -----------------------------------------------------------------------

    /// Scans the whole graph from the root. See [`LevelGraph::scan_from`].
    pub fn scan<'a, F>(&'a self, consumer: F)
    where
        F: FnMut(&[&'a P], &'a P, &'a LevelGraph<P>) -> Action,
    {
        self.scan_from(self.root(), consumer);
    }

    /// Like [`LevelGraph::scan`], without the callback for the root.
    ///
    /// The root is still expanded; ordering and actions are unchanged for
    /// every other node.
    pub fn scan_no_root<'a, F>(&'a self, mut consumer: F)
    where
        F: FnMut(&[&'a P], &'a P, &'a LevelGraph<P>) -> Action,
    {
        self.scan(|parents, participant, graph| {
            if parents.is_empty() {
                return Action::Continue;
            }
            consumer(parents, participant, graph)
        });
    }

    /// Breadth-first, level-ordered scan starting at `start`.
    ///
    /// Every reachable node is handed to `consumer` exactly once, after all of
    /// the parents that determine its level. The consumer receives the node's
    /// immediate parents in link order (empty for the root), the node's
    /// participant, and the graph itself, so nested scans are possible. All
    /// three borrow from the graph and may outlive the callback. An unknown
    /// `start` is a no-op.
    pub fn scan_from<'a, F>(&'a self, start: &P, mut consumer: F)
    where
        F: FnMut(&[&'a P], &'a P, &'a LevelGraph<P>) -> Action,
    {
        let Some(start_id) = self.find(start) else {
            return;
        };

        walk(&self.nodes, start_id, Direction::Forward, Mode::BreadthFirst, |id| {
            let node = self.nodes.get(id);
            let parents: SmallVec<[&'a P; 4]> = self
                .participants_at(node.parents().iter().copied())
                .collect();
            consumer(parents.as_slice(), node.participant(), self)
        });
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Copies the graph into a petgraph `DiGraph` with parent -> child edges.
    ///
    /// Node indices equal the arena's [`NodeId`]s.
    pub fn to_petgraph(&self) -> DiGraph<P, ()> {
        let mut out = DiGraph::with_capacity(self.nodes.len(), self.links.len());
        for (_, node) in self.nodes.iter() {
            out.add_node(node.participant().clone());
        }
        for (id, node) in self.nodes.iter() {
            for &child in node.children() {
                out.add_edge(id.into(), child.into(), ());
            }
        }
        out
    }
}

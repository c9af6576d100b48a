//! Serialized form of a [`LevelGraph`].
//!
//! Levels are derived data, so a snapshot stores only the root and the
//! accepted links in the order they were made. Loading replays the links
//! through [`LevelGraph::try_add`], which recomputes levels and rejects
//! snapshots that self-link, reference unknown parents, or form cycles.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GraphError;
use crate::graph::LevelGraph;
use crate::participant::Participant;

/// One accepted parent -> child link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link<P> {
    pub parent: P,
    pub child: P,
}

/// Root plus the ordered link log of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot<P> {
    pub root: P,
    pub links: Vec<Link<P>>,
}

impl<P: Participant> LevelGraph<P> {
    /// Captures the root and the link log.
    pub fn snapshot(&self) -> GraphSnapshot<P> {
        let nodes = self.nodes();
        let links = self
            .links()
            .iter()
            .map(|&(parent, child)| Link {
                parent: nodes.get(parent).participant().clone(),
                child: nodes.get(child).participant().clone(),
            })
            .collect();

        GraphSnapshot {
            root: self.root().clone(),
            links,
        }
    }

    /// Rebuilds a graph by replaying `snapshot`'s links in order.
    pub fn from_snapshot(snapshot: GraphSnapshot<P>) -> Result<Self, GraphError> {
        let mut graph = LevelGraph::new(snapshot.root);
        for link in snapshot.links {
            graph.try_add(&link.parent, link.child)?;
        }
        Ok(graph)
    }
}

impl<P: Participant> TryFrom<GraphSnapshot<P>> for LevelGraph<P> {
    type Error = GraphError;

    fn try_from(snapshot: GraphSnapshot<P>) -> Result<Self, Self::Error> {
        LevelGraph::from_snapshot(snapshot)
    }
}

impl<P: Participant + Serialize> Serialize for LevelGraph<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

impl<'de, P: Participant + Deserialize<'de>> Deserialize<'de> for LevelGraph<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = GraphSnapshot::<P>::deserialize(deserializer)?;
        LevelGraph::from_snapshot(snapshot).map_err(serde::de::Error::custom)
    }
}

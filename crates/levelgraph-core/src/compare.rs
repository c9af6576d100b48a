//! Level buckets and structural equality.
//!
//! Two graphs are equal when they hold the same participants at the same
//! levels. Who is whose parent is not compared: graphs with identical level
//! membership but different wiring are equal.

use crate::graph::LevelGraph;
use crate::id::NodeId;
use crate::participant::Participant;
use crate::traverse::{walk, Action, Direction, Mode};

impl<P: Participant> LevelGraph<P> {
    /// Participants grouped by level, each group sorted by [`Participant::id`].
    ///
    /// Index `k` of the result holds the participants at level `k`.
    pub fn levels(&self) -> Vec<Vec<&P>> {
        self.level_buckets()
            .into_iter()
            .map(|bucket| {
                bucket
                    .into_iter()
                    .map(|id| self.nodes().get(id).participant())
                    .collect()
            })
            .collect()
    }

    /// Node ids per level, gathered with one breadth-first scan from the root
    /// and sorted by participant id.
    fn level_buckets(&self) -> Vec<Vec<NodeId>> {
        let nodes = self.nodes();
        let mut buckets: Vec<Vec<NodeId>> = vec![Vec::new(); self.level()];
        walk(nodes, nodes.root(), Direction::Forward, Mode::BreadthFirst, |id| {
            buckets[nodes.get(id).level() as usize].push(id);
            Action::Continue
        });

        for bucket in &mut buckets {
            bucket.sort_by_key(|&id| nodes.get(id).participant().id());
        }
        buckets
    }
}

impl<P: Participant> PartialEq for LevelGraph<P> {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() || self.level() != other.level() {
            return false;
        }

        let ours = self.level_buckets();
        let theirs = other.level_buckets();
        ours.iter().zip(&theirs).all(|(a, b)| {
            a.len() == b.len()
                && a.iter().zip(b).all(|(&x, &y)| {
                    let x = self.nodes().get(x);
                    let y = other.nodes().get(y);
                    x.participant() == y.participant() && x.level() == y.level()
                })
        })
    }
}

impl<P: Participant> Eq for LevelGraph<P> {}

//! Structural invariants over random insertion sequences.

use std::collections::HashSet;

use levelgraph_core::{Action, LevelGraph};
use petgraph::algo::has_path_connecting;
use petgraph::graph::NodeIndex;
use proptest::prelude::*;

/// Applies every `(parent, target)` pair; refused links are simply dropped.
fn build(ops: &[(u8, u8)]) -> LevelGraph<u8> {
    let mut graph = LevelGraph::new(0);
    for &(parent, target) in ops {
        graph.add(&parent, target);
    }
    graph
}

fn ops() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..10, 0u8..10), 0..48)
}

fn scan_all(graph: &LevelGraph<u8>) -> Vec<(u8, Vec<u8>)> {
    let mut out = Vec::new();
    graph.scan(|parents, p, _| {
        out.push((*p, parents.iter().map(|q| **q).collect()));
        Action::Continue
    });
    out
}

proptest! {
    #[test]
    fn every_level_is_one_below_deepest_parent(ops in ops()) {
        let graph = build(&ops);

        for p in graph.participants() {
            let level = graph.level_of(p).unwrap();
            let parents = graph.parents_of(p).unwrap();
            if p == graph.root() {
                prop_assert_eq!(level, 0);
                prop_assert!(parents.is_empty());
            } else {
                prop_assert!(!parents.is_empty());
                let deepest = parents.iter().map(|q| graph.level_of(q).unwrap()).max().unwrap();
                prop_assert_eq!(level, deepest + 1);
            }
        }

        prop_assert!(!petgraph::algo::is_cyclic_directed(&graph.to_petgraph()));
    }

    #[test]
    fn scan_emits_everyone_once_in_level_order(ops in ops()) {
        let graph = build(&ops);
        let scanned = scan_all(&graph);

        prop_assert_eq!(scanned.len(), graph.size());
        prop_assert_eq!(scanned[0].0, *graph.root());
        prop_assert!(scanned[0].1.is_empty());

        let mut seen = HashSet::new();
        for (p, parents) in &scanned {
            if p != graph.root() {
                prop_assert!(!parents.is_empty());
            }
            for parent in parents {
                prop_assert!(seen.contains(parent), "{} emitted before parent {}", p, parent);
            }
            prop_assert!(seen.insert(*p), "{} emitted twice", p);
        }

        let levels: Vec<u32> = scanned.iter().map(|(p, _)| graph.level_of(p).unwrap()).collect();
        prop_assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn scan_no_root_is_scan_without_root(ops in ops()) {
        let graph = build(&ops);

        let mut without_root = Vec::new();
        graph.scan_no_root(|parents, p, _| {
            without_root.push((*p, parents.iter().map(|q| **q).collect::<Vec<_>>()));
            Action::Continue
        });

        let all = scan_all(&graph);
        prop_assert_eq!(&without_root[..], &all[1..]);
    }

    #[test]
    fn equality_survives_a_different_insertion_order(ops in ops()) {
        let graph = build(&ops);

        // Replay the accepted links deepest-child-last, reversed within a level.
        let mut links = graph.snapshot().links;
        links.reverse();
        links.sort_by_key(|link| graph.level_of(&link.child));

        let mut replayed = LevelGraph::new(*graph.root());
        for link in links {
            prop_assert!(replayed.add(&link.parent, link.child));
        }

        prop_assert_eq!(&replayed, &graph);
        prop_assert_eq!(&graph, &replayed);
        for p in graph.participants() {
            prop_assert_eq!(replayed.level_of(p), graph.level_of(p));
        }
    }

    #[test]
    fn refused_links_leave_graph_untouched(ops in ops()) {
        let graph = build(&ops);
        let exported = graph.to_petgraph();
        let participants: Vec<u8> = graph.participants().copied().collect();

        for (i, &parent) in participants.iter().enumerate() {
            for (j, &target) in participants.iter().enumerate() {
                let mut attempt = graph.clone();
                let cyclic = has_path_connecting(&exported, NodeIndex::new(j), NodeIndex::new(i), None);

                if parent == target || cyclic {
                    prop_assert!(!attempt.add(&parent, target));
                    prop_assert_eq!(attempt.snapshot(), graph.snapshot());
                    prop_assert_eq!(attempt.size(), graph.size());
                } else {
                    prop_assert!(attempt.add(&parent, target));
                }
            }
        }

        let mut attempt = graph.clone();
        prop_assert!(!attempt.add(&200, 201));
        prop_assert_eq!(attempt.size(), graph.size());
    }
}

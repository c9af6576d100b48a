//! Diagnostic tree rendering.
//!
//! The graph is printed depth-first from the root, one line per path: a node
//! with several parents shows up once below each of them. Each line is
//! indented by the node's level and rendered as `(participant,level)`.
//!
//! ```text
//! (A,0)
//!    L---(C,1)
//!       L---(D,2)
//!    L---(B,1)
//!       L---(D,2)
//! ```

use std::fmt;

use crate::graph::LevelGraph;
use crate::participant::Participant;
use crate::traverse::{walk, Action, Direction, Mode};

/// Layout of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStyle {
    /// Repeated once per level in front of every line. Default: three spaces.
    pub indent: String,
    /// Leads every non-root line. Default: `L`.
    pub marker: char,
    /// Between the marker and the node. Default: `---`.
    pub connector: String,
}

impl Default for TreeStyle {
    fn default() -> Self {
        TreeStyle {
            indent: "   ".to_string(),
            marker: 'L',
            connector: "---".to_string(),
        }
    }
}

impl<P: Participant + fmt::Display> LevelGraph<P> {
    /// Renders the graph as a text tree using `style`.
    pub fn render_tree(&self, style: &TreeStyle) -> String {
        let nodes = self.nodes();
        let root = nodes.root();
        let mut out = String::new();

        walk(nodes, root, Direction::Forward, Mode::DepthFirst, |id| {
            let node = nodes.get(id);
            if id != root {
                out.push('\n');
            }
            for _ in 0..node.level() {
                out.push_str(&style.indent);
            }
            if id != root {
                out.push(style.marker);
                out.push_str(&style.connector);
            }
            out.push_str(&node.to_string());
            Action::Continue
        });
        out
    }
}

impl<P: Participant + fmt::Display> fmt::Display for LevelGraph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_tree(&TreeStyle::default()))
    }
}

//! Graphviz export of a lowered graph.

use super::{Graph, GraphOp};

/// A trait for types that can be converted into a DOT graph format string.
pub trait ToDot {
    /// The resulting string can be fed to Graphviz to inspect the graph.
    fn to_dot(&self) -> String;
}

impl ToDot for Graph {
    fn to_dot(&self) -> String {
        let mut dot = String::from("digraph G {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box];\n\n");

        for (i, node) in self.nodes().iter().enumerate() {
            let op_str = match &node.op {
                GraphOp::Input => "input".to_string(),
                GraphOp::Undefined => "undefined".to_string(),
                GraphOp::Literal(lit) => format!("literal {:?}", lit.shape().lens()),
                GraphOp::Instruction(op) => op.to_string(),
            };
            let label = format!("{i}: {op_str}\\n{}", node.shape);
            dot.push_str(&format!("  n{i} [label=\"{label}\"];\n"));
            for (arg, src) in node.src.iter().enumerate() {
                dot.push_str(&format!("  n{} -> n{i} [label=\"{arg}\"];\n", src.0));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

//! The IR seam used by the lowering.
//!
//! The lowering never touches a concrete graph. It reads its arguments through
//! [`Operand`] and emits nodes through [`GraphBuilder`]; [`Graph`] is the
//! arena implementation used by the importer and the tests.

pub mod dot;
mod graph;
pub mod literal;
pub mod op;

pub use dot::ToDot;
pub use graph::{Argument, Graph, GraphOp, NodeData};
pub use literal::{Literal, LiteralData};
pub use op::OpParams;

use crate::shape::Shape;

/// A unique identifier for a node within a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Capability for inserting nodes into a graph.
///
/// Taken by `&mut` for the duration of one lowering call, so nodes of a single
/// call are never interleaved with another caller's.
pub trait GraphBuilder {
    /// Appends an instruction consuming `inputs` and returns its handle.
    fn add_instruction(&mut self, op: OpParams, inputs: &[NodeId]) -> NodeId;

    /// Appends a constant tensor and returns its handle.
    fn add_literal(&mut self, literal: Literal) -> NodeId;
}

/// Read-only view of an argument handed to an operator parser.
pub trait Operand {
    /// The node this argument refers to.
    fn id(&self) -> NodeId;

    fn shape(&self) -> &Shape;

    /// Placeholder for an optional ONNX input that was left empty.
    fn is_undefined(&self) -> bool {
        false
    }

    /// The value of the argument if it can be computed without running the
    /// graph.
    fn evaluate(&self) -> Option<Literal>;
}

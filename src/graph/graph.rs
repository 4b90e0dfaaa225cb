use log::trace;

use super::{GraphBuilder, Literal, NodeId, OpParams, Operand};
use crate::shape::{DType, Expr, Shape};

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphOp {
    /// A runtime input of the graph.
    Input,
    /// An optional input that was not provided.
    Undefined,
    /// A constant tensor.
    Literal(Literal),
    Instruction(OpParams),
}

/// The data associated with a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub op: GraphOp,
    /// Inputs of the operation, in argument order.
    pub src: Vec<NodeId>,
    /// The shape (and element type) of the value produced by this node.
    pub shape: Shape,
}

/// Owns all the nodes of a graph in an arena.
///
/// Node ids are indices into the arena, so a node can only reference nodes
/// added before it.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: Vec<NodeData>,
    inputs: Vec<NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, op: GraphOp, src: Vec<NodeId>, shape: Shape) -> NodeId {
        let id = NodeId(self.nodes.len());
        trace!("{id} = {op:?} {src:?} -> {shape}");
        self.nodes.push(NodeData { op, src, shape });
        id
    }

    /// Adds a runtime input.
    pub fn input(&mut self, shape: Shape) -> NodeId {
        let id = self.push(GraphOp::Input, Vec::new(), shape);
        self.inputs.push(id);
        id
    }

    /// Adds the placeholder used for an empty optional input.
    pub fn undefined(&mut self) -> NodeId {
        self.push(GraphOp::Undefined, Vec::new(), Shape::scalar(DType::F32))
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[NodeData] {
        &self.nodes
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn shape(&self, id: NodeId) -> &Shape {
        &self.nodes[id.0].shape
    }

    /// Folds the node to a constant if it only depends on literals.
    pub fn evaluate(&self, id: NodeId) -> Option<Literal> {
        let node = &self.nodes[id.0];
        match &node.op {
            GraphOp::Literal(lit) => Some(lit.clone()),
            // a reshape of a constant is still that constant
            GraphOp::Instruction(OpParams::Reshape { .. }) => {
                let src = self.evaluate(node.src[0])?;
                let lens = node.shape.as_static()?.lens().to_vec();
                Some(Literal::new(lens, src.data().clone()))
            }
            _ => None,
        }
    }

    /// Snapshot of a node as an operator argument.
    pub fn argument(&self, id: NodeId) -> Argument {
        let node = &self.nodes[id.0];
        Argument {
            id,
            shape: node.shape.clone(),
            undefined: matches!(node.op, GraphOp::Undefined),
            value: self.evaluate(id),
        }
    }

    /// Snapshots of several nodes, in order.
    pub fn arguments(&self, ids: &[NodeId]) -> Vec<Argument> {
        ids.iter().map(|&id| self.argument(id)).collect()
    }

    fn infer_shape(&self, op: &OpParams, inputs: &[NodeId], id: NodeId) -> Shape {
        let first = self.shape(inputs[0]);
        match op {
            OpParams::Reshape { dims } => Shape::new(
                first.dtype(),
                dims.iter().map(|&d| Expr::Const(d.max(0) as usize)).collect(),
            ),
            OpParams::Gather { axis } => {
                let indices = self.shape(inputs[1]);
                let mut dims = first.dims()[..*axis].to_vec();
                dims.extend_from_slice(indices.dims());
                dims.extend_from_slice(&first.dims()[axis + 1..]);
                Shape::new(first.dtype(), dims)
            }
            OpParams::Slice { axes, starts, ends } => {
                let mut dims = first.dims().to_vec();
                for ((&axis, &start), &end) in axes.iter().zip(starts).zip(ends) {
                    if let Expr::Const(len) = dims[axis] {
                        let clamp = |v: i64| (v.max(0) as usize).min(len);
                        dims[axis] = Expr::Const(clamp(end).saturating_sub(clamp(start)));
                    }
                }
                Shape::new(first.dtype(), dims)
            }
            OpParams::Add | OpParams::Sub | OpParams::Mul => first.clone(),
            OpParams::Resize { .. } => Shape::new(
                first.dtype(),
                (0..first.rank())
                    .map(|i| Expr::Var(format!("resize{}_{i}", id.0)))
                    .collect(),
            ),
        }
    }
}

impl GraphBuilder for Graph {
    fn add_instruction(&mut self, op: OpParams, inputs: &[NodeId]) -> NodeId {
        debug_assert_eq!(inputs.len(), op.arity(), "wrong input count for {op}");
        let id = NodeId(self.nodes.len());
        let shape = self.infer_shape(&op, inputs, id);
        self.push(GraphOp::Instruction(op), inputs.to_vec(), shape)
    }

    fn add_literal(&mut self, literal: Literal) -> NodeId {
        let shape = Shape::from(literal.shape().clone());
        self.push(GraphOp::Literal(literal), Vec::new(), shape)
    }
}

/// An operator argument captured from a [`Graph`].
///
/// Holds a copy of the node's shape and, when the node folds to a constant,
/// its value, so the graph can be mutated while the argument list is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    id: NodeId,
    shape: Shape,
    undefined: bool,
    value: Option<Literal>,
}

impl Argument {
    /// An argument that is not backed by any graph.
    pub fn new(id: NodeId, shape: Shape, value: Option<Literal>) -> Self {
        Self {
            id,
            shape,
            undefined: false,
            value,
        }
    }

    /// The placeholder for an optional input that was left empty.
    pub fn undefined(id: NodeId) -> Self {
        Self {
            id,
            shape: Shape::scalar(DType::F32),
            undefined: true,
            value: None,
        }
    }
}

impl Operand for Argument {
    fn id(&self) -> NodeId {
        self.id
    }

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn is_undefined(&self) -> bool {
        self.undefined
    }

    fn evaluate(&self) -> Option<Literal> {
        self.value.clone()
    }
}

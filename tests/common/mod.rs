//! Shared helpers for the integration tests: float comparison, logger setup
//! and a small reference interpreter for lowered graphs.

#![allow(dead_code)]

use harp_resize::graph::{
    Argument, Graph, GraphBuilder, GraphOp, Literal, LiteralData, NodeId, OpParams,
};
use harp_resize::shape::{DType, Shape};
use ndarray::{Array, ArrayD, Axis, IxDyn, Slice};

pub const EPSILON: f32 = 1e-5;

pub fn setup_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub fn vec_approx_eq(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| approx_eq(x, y))
}

/// A dense tensor produced by [`run`].
pub type Value = ArrayD<f32>;

/// Builds a [`Value`] from row-major data.
pub fn tensor(lens: &[usize], data: Vec<f32>) -> Value {
    ArrayD::from_shape_vec(IxDyn(lens), data).expect("data does not match shape")
}

/// The elements of `value` in row-major order.
pub fn values(value: &Value) -> Vec<f32> {
    value.iter().copied().collect()
}

fn literal_value(lit: &Literal) -> Value {
    let data = match lit.data() {
        LiteralData::F32(v) => v.clone(),
        LiteralData::F64(v) => v.iter().map(|&x| x as f32).collect(),
        LiteralData::I32(v) => v.iter().map(|&x| x as f32).collect(),
        LiteralData::I64(v) => v.iter().map(|&x| x as f32).collect(),
    };
    tensor(lit.shape().lens(), data)
}

fn literal_indices(data: &LiteralData) -> Option<Vec<usize>> {
    match data {
        LiteralData::I32(v) => Some(v.iter().map(|&x| x as usize).collect()),
        LiteralData::I64(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

/// Evaluates `output`, feeding the graph inputs in declaration order.
///
/// Supports the instructions the static lowering emits; the runtime `resize`
/// instruction panics.
pub fn run(graph: &Graph, inputs: &[Value], output: NodeId) -> Value {
    assert_eq!(graph.inputs().len(), inputs.len(), "input count");
    let mut values: Vec<Option<Value>> = vec![None; graph.len()];
    let mut indices: Vec<Option<Vec<usize>>> = vec![None; graph.len()];
    let mut next_input = 0;

    for (i, node) in graph.nodes().iter().enumerate().take(output.0 + 1) {
        let value = match &node.op {
            GraphOp::Input => {
                let v = inputs[next_input].clone();
                next_input += 1;
                Some(v)
            }
            GraphOp::Undefined => None,
            GraphOp::Literal(lit) => {
                indices[i] = literal_indices(lit.data());
                Some(literal_value(lit))
            }
            GraphOp::Instruction(op) => {
                let arg = |k: usize| {
                    values[node.src[k].0]
                        .as_ref()
                        .expect("instruction input has no value")
                };
                Some(match op {
                    OpParams::Reshape { dims } => {
                        let lens: Vec<usize> = dims.iter().map(|&d| d as usize).collect();
                        arg(0)
                            .clone()
                            .into_shape_with_order(IxDyn(&lens))
                            .expect("reshape changes the element count")
                    }
                    OpParams::Gather { axis } => {
                        let idx = indices[node.src[1].0]
                            .as_ref()
                            .expect("gather indices must be an integer literal");
                        let idx_lens = arg(1).shape().to_vec();
                        let src = arg(0);
                        assert_eq!(src.ndim(), 1, "gather source must be 1-D");
                        src.select(Axis(*axis), idx)
                            .into_shape_with_order(IxDyn(&idx_lens))
                            .expect("gather result does not match the index shape")
                    }
                    OpParams::Slice { axes, starts, ends } => {
                        let mut out = arg(0).view();
                        for ((&axis, &start), &end) in axes.iter().zip(starts).zip(ends) {
                            out.slice_axis_inplace(
                                Axis(axis),
                                Slice::from(start as isize..end as isize),
                            );
                        }
                        out.to_owned()
                    }
                    OpParams::Add => arg(0) + arg(1),
                    OpParams::Sub => arg(0) - arg(1),
                    OpParams::Mul => arg(0) * arg(1),
                    OpParams::Resize { .. } => panic!("runtime resize cannot be interpreted"),
                })
            }
        };
        values[i] = value;
    }

    values[output.0].take().expect("output has no value")
}

/// Instruction names of the nodes added after `start`, literals as `@literal`.
pub fn node_names(graph: &Graph, start: usize) -> Vec<&'static str> {
    graph.nodes()[start..]
        .iter()
        .map(|n| match &n.op {
            GraphOp::Instruction(op) => op.name(),
            GraphOp::Literal(_) => "@literal",
            GraphOp::Input => "@input",
            GraphOp::Undefined => "@undefined",
        })
        .collect()
}

/// A graph with a static float input of `in_lens`, an empty `roi` and a
/// constant scales literal, plus the argument snapshots a parser receives.
pub fn scales_graph(in_lens: &[usize], scales: &[f32]) -> (Graph, Vec<Argument>) {
    let mut graph = Graph::new();
    let x = graph.input(Shape::from_lens(DType::F32, in_lens));
    let roi = graph.undefined();
    let s = graph.add_literal(Literal::from_f32(vec![scales.len()], scales.to_vec()));
    let args = graph.arguments(&[x, roi, s]);
    (graph, args)
}

/// Deterministic input values `0, 1, 2, ...` scaled by `step`.
pub fn ramp(lens: &[usize], step: f32) -> Value {
    let n: usize = lens.iter().product();
    Array::range(0.0, n as f32, 1.0)
        .mapv(|x| x * step)
        .into_shape_with_order(IxDyn(lens))
        .expect("ramp shape")
}

//! Lowering of `Resize` / `Upsample` into IR instructions.
//!
//! Two outcomes:
//! - a single runtime `resize` instruction when shapes or scales are only
//!   known at run time (nearest mode only);
//! - a precomputed subgraph otherwise: `reshape` to 1-D, `gather` with a
//!   literal index tensor and, for linear mode, one `slice`/`sub`/`mul`/`add`
//!   blend per dimension.
//!
//! The whole subgraph is planned before the first node is emitted, so a
//! failing call leaves the builder untouched.

use log::{debug, trace};

use super::config::{InterpolationMode, ResizeConfig};
use super::neighbors::{calc_neighbor_points, checked_len, NeighborIndexTable};
use super::scales::{resolve_scales, ScaleResolution};
use crate::config::LoweringConfig;
use crate::error::{ResizeError, ResizeResult};
use crate::graph::{Argument, GraphBuilder, Literal, NodeId, OpParams, Operand};
use crate::onnx::{NodeInfo, OpParser};
use crate::shape::StaticShape;

/// Parser for the ONNX `Resize` and `Upsample` operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeParser;

impl OpParser for ResizeParser {
    fn operators(&self) -> &'static [&'static str] {
        &["Resize", "Upsample"]
    }

    fn parse(
        &self,
        builder: &mut dyn GraphBuilder,
        info: &NodeInfo,
        args: &[Argument],
        config: &LoweringConfig,
    ) -> ResizeResult<NodeId> {
        lower_resize(builder, info, args, config)
    }
}

/// Lowers one resize node and returns the node holding its result.
///
/// `args[0]` is the data tensor; the remaining arguments follow the ONNX
/// positional convention (roi, scales, sizes), any of which may be a
/// placeholder.
pub fn lower_resize<B, A>(
    builder: &mut B,
    info: &NodeInfo,
    args: &[A],
    config: &LoweringConfig,
) -> ResizeResult<NodeId>
where
    B: GraphBuilder + ?Sized,
    A: Operand,
{
    let plan = plan_resize(info, args, config)?;
    Ok(plan.emit(builder))
}

/// What a resize node lowers to, fully computed but not yet emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizePlan {
    Runtime {
        data: NodeId,
        sizes: RuntimeSizes,
        params: OpParams,
    },
    Nearest {
        data: NodeId,
        total: usize,
        indices: Literal,
    },
    Linear {
        data: NodeId,
        total: usize,
        indices: Literal,
        /// One step per dimension, last dimension first.
        blend: Vec<BlendStep>,
    },
}

/// Second input of the runtime resize instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeSizes {
    /// An argument already in the graph.
    Existing(NodeId),
    /// Scales from the `scales` attribute, materialized as a literal.
    Scales(Literal),
}

/// Blends the lower half of the leading axis with the upper half.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendStep {
    /// Rows in each half along axis 0.
    pub rows: usize,
    /// Interpolation weights, shaped like one half.
    pub delta: Literal,
}

/// Computes the lowering of a resize node without touching any graph.
pub fn plan_resize<A: Operand>(
    info: &NodeInfo,
    args: &[A],
    config: &LoweringConfig,
) -> ResizeResult<ResizePlan> {
    let op = info.tag();
    let resize = ResizeConfig::from_node(info)?;

    let data = args
        .first()
        .ok_or_else(|| ResizeError::MissingInput { op: op.clone() })?;
    let data_shape = data.shape();
    let in_shape = data_shape.to_static(1);

    let resolution = resolve_scales(&info.attributes, args, in_shape.lens(), &op)?;
    let dynamic = data_shape.is_dynamic() || !resolution.is_constant();

    match resize.mode {
        InterpolationMode::Nearest if dynamic || !config.prefer_gather => {
            debug!(
                "{op}: runtime resize (dynamic shape: {}, constant scales: {})",
                data_shape.is_dynamic(),
                resolution.is_constant()
            );
            Ok(runtime_plan(data.id(), &resize, resolution))
        }
        InterpolationMode::Linear if dynamic => Err(ResizeError::UnsupportedDynamicLinear { op }),
        mode => {
            let ScaleResolution::Constant {
                scales, out_lens, ..
            } = resolution
            else {
                // dynamic was false, so the scales are constant
                return Err(ResizeError::UnsupportedDynamicLinear { op });
            };
            let elements = out_lens.iter().try_fold(1usize, |n, &l| n.checked_mul(l));
            checked_len::<usize>(elements, "output", &op)?;
            let out_shape = StaticShape::new(in_shape.dtype(), out_lens);
            debug!(
                "{op}: precomputed {} resize {:?} -> {:?}",
                mode.name(),
                in_shape.lens(),
                out_shape.lens()
            );
            match mode {
                InterpolationMode::Nearest => Ok(nearest_plan(
                    data.id(),
                    &resize,
                    &in_shape,
                    &out_shape,
                    &scales,
                )),
                InterpolationMode::Linear => {
                    linear_plan(data.id(), &resize, &in_shape, &out_shape, &scales, &op)
                }
            }
        }
    }
}

fn runtime_plan(data: NodeId, resize: &ResizeConfig, resolution: ScaleResolution) -> ResizePlan {
    let sizes = match resolution {
        ScaleResolution::Deferred { arg } => RuntimeSizes::Existing(arg),
        ScaleResolution::Constant {
            source: Some(arg), ..
        } => RuntimeSizes::Existing(arg),
        ScaleResolution::Constant {
            scales,
            source: None,
            ..
        } => {
            let values = scales.iter().map(|&s| s as f32).collect();
            RuntimeSizes::Scales(Literal::from_f32(vec![scales.len()], values))
        }
    };
    ResizePlan::Runtime {
        data,
        sizes,
        params: OpParams::Resize {
            nearest_mode: resize.nearest_rounding.name().to_string(),
            coordinate_transformation_mode: resize.coord_transform.name().to_string(),
        },
    }
}

fn nearest_plan(
    data: NodeId,
    resize: &ResizeConfig,
    in_shape: &StaticShape,
    out_shape: &StaticShape,
    scales: &[f64],
) -> ResizePlan {
    let in_lens = in_shape.lens();
    let out_lens = out_shape.lens();
    let mut offsets = vec![0usize; out_shape.elements()];
    let mut in_idx = vec![0usize; in_lens.len()];

    out_shape.for_each_index(|out_idx, flat| {
        for (d, idx) in in_idx.iter_mut().enumerate() {
            let coord = resize
                .coord_transform
                .apply(in_lens[d], out_lens[d], out_idx[d], scales[d]);
            *idx = resize.nearest_rounding.apply(in_lens[d], coord);
        }
        offsets[flat] = in_shape.index(&in_idx);
    });

    ResizePlan::Nearest {
        data,
        total: in_shape.elements(),
        indices: index_literal(out_lens.to_vec(), &offsets, in_shape.elements()),
    }
}

fn linear_plan(
    data: NodeId,
    resize: &ResizeConfig,
    in_shape: &StaticShape,
    out_shape: &StaticShape,
    scales: &[f64],
    op: &str,
) -> ResizeResult<ResizePlan> {
    let rank = out_shape.rank();
    let table =
        NeighborIndexTable::build(in_shape.lens(), out_shape, scales, resize.coord_transform);
    let offsets = calc_neighbor_points(&table, in_shape, op)?;

    let out_lens = out_shape.lens();
    let indices = index_literal(
        stacked_lens(out_lens, 1 << rank, op)?,
        &offsets,
        in_shape.elements(),
    );

    let mut blend = Vec::with_capacity(rank);
    let mut blocks = if rank == 0 { 0 } else { 1usize << (rank - 1) };
    for d in (0..rank).rev() {
        let delta = table.delta(d);
        let mut values = Vec::with_capacity(blocks * delta.len());
        for _ in 0..blocks {
            values.extend_from_slice(delta);
        }
        let lens = stacked_lens(out_lens, blocks, op)?;
        blend.push(BlendStep {
            rows: lens[0],
            delta: Literal::from_f32(lens, values),
        });
        blocks /= 2;
    }

    Ok(ResizePlan::Linear {
        data,
        total: in_shape.elements(),
        indices,
        blend,
    })
}

/// `out_lens` with the leading length multiplied by `factor`.
fn stacked_lens(out_lens: &[usize], factor: usize, op: &str) -> ResizeResult<Vec<usize>> {
    let mut lens = out_lens.to_vec();
    if let Some(first) = lens.first_mut() {
        *first = checked_len::<usize>(first.checked_mul(factor), "stacked output", op)?;
    }
    Ok(lens)
}

/// Gather indices as `int32`, widened to `int64` when the source is too large.
fn index_literal(lens: Vec<usize>, offsets: &[usize], source_elements: usize) -> Literal {
    if source_elements <= i32::MAX as usize {
        Literal::from_i32(lens, offsets.iter().map(|&o| o as i32).collect())
    } else {
        Literal::from_i64(lens, offsets.iter().map(|&o| o as i64).collect())
    }
}

impl ResizePlan {
    /// Appends the planned instructions to `builder` and returns the result
    /// node.
    pub fn emit<B: GraphBuilder + ?Sized>(self, builder: &mut B) -> NodeId {
        match self {
            ResizePlan::Runtime {
                data,
                sizes,
                params,
            } => {
                let sizes = match sizes {
                    RuntimeSizes::Existing(id) => id,
                    RuntimeSizes::Scales(literal) => builder.add_literal(literal),
                };
                builder.add_instruction(params, &[data, sizes])
            }
            ResizePlan::Nearest {
                data,
                total,
                indices,
            } => {
                let flat = reshape_flat(builder, data, total);
                let indices = builder.add_literal(indices);
                builder.add_instruction(OpParams::Gather { axis: 0 }, &[flat, indices])
            }
            ResizePlan::Linear {
                data,
                total,
                indices,
                blend,
            } => {
                let flat = reshape_flat(builder, data, total);
                let indices = builder.add_literal(indices);
                let mut current =
                    builder.add_instruction(OpParams::Gather { axis: 0 }, &[flat, indices]);

                for step in blend {
                    trace!("blending {} rows", step.rows);
                    let rows = step.rows as i64;
                    let delta = builder.add_literal(step.delta);
                    let low = builder.add_instruction(slice_rows(0, rows), &[current]);
                    let high = builder.add_instruction(slice_rows(rows, 2 * rows), &[current]);
                    let diff = builder.add_instruction(OpParams::Sub, &[high, low]);
                    let scaled = builder.add_instruction(OpParams::Mul, &[diff, delta]);
                    current = builder.add_instruction(OpParams::Add, &[scaled, low]);
                }
                current
            }
        }
    }
}

fn reshape_flat<B: GraphBuilder + ?Sized>(builder: &mut B, data: NodeId, total: usize) -> NodeId {
    builder.add_instruction(
        OpParams::Reshape {
            dims: vec![total as i64],
        },
        &[data],
    )
}

fn slice_rows(start: i64, end: i64) -> OpParams {
    OpParams::Slice {
        axes: vec![0],
        starts: vec![start],
        ends: vec![end],
    }
}

//! Resolution of per-dimension scales and output lengths.

use log::debug;

use crate::error::{ResizeError, ResizeResult};
use crate::graph::{NodeId, Operand};
use crate::onnx::AttributeMap;

/// Outcome of scanning the attributes and arguments of a resize node.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleResolution {
    /// Scales and output lengths are known while lowering.
    Constant {
        scales: Vec<f64>,
        out_lens: Vec<usize>,
        /// The argument the values were read from; `None` when they came
        /// from the deprecated `scales` attribute.
        source: Option<NodeId>,
    },
    /// The scale/size argument only has a value at run time and must be
    /// handed to the runtime resize instruction as is.
    Deferred { arg: NodeId },
}

impl ScaleResolution {
    pub fn is_constant(&self) -> bool {
        matches!(self, ScaleResolution::Constant { .. })
    }
}

/// Determines the scales and output lengths of a resize over `in_lens`.
///
/// A non-empty `scales` attribute (the `Upsample` form) wins. Otherwise the
/// first argument after the data that is neither a placeholder nor rank 0
/// decides: integer arguments are output sizes, anything else is read as
/// scales.
pub fn resolve_scales<A: Operand>(
    attributes: &AttributeMap,
    args: &[A],
    in_lens: &[usize],
    op: &str,
) -> ResizeResult<ScaleResolution> {
    let rank = in_lens.len();

    let from_attribute = scales_attribute(attributes, op)?;
    let (scales, mut out_lens, source) = if !from_attribute.is_empty() {
        (from_attribute, vec![0; rank], None)
    } else {
        match scan_arguments(args, in_lens, op)? {
            Scanned::Deferred(arg) => {
                debug!("{op}: scale/size argument {arg} is not constant");
                return Ok(ScaleResolution::Deferred { arg });
            }
            Scanned::Sizes(arg, out_lens) => {
                let scales = in_lens
                    .iter()
                    .zip(&out_lens)
                    .map(|(&i, &o)| o as f64 / i as f64)
                    .collect();
                (scales, out_lens, Some(arg))
            }
            Scanned::Scales(arg, scales) => (scales, vec![0; rank], Some(arg)),
        }
    };

    if scales.len() != rank {
        return Err(ResizeError::RankMismatch {
            op: op.to_string(),
            input: rank,
            scale: scales.len(),
        });
    }

    if out_lens.iter().all(|&o| o == 0) {
        out_lens = in_lens
            .iter()
            .zip(&scales)
            .map(|(&len, &scale)| (len as f64 * scale) as usize)
            .collect();
    }

    debug!("{op}: scales {scales:?}, output lengths {out_lens:?}");
    Ok(ScaleResolution::Constant {
        scales,
        out_lens,
        source,
    })
}

fn scales_attribute(attributes: &AttributeMap, op: &str) -> ResizeResult<Vec<f64>> {
    match attributes.get("scales") {
        None => Ok(Vec::new()),
        Some(value) => value
            .as_floats()
            .map(|v| v.iter().map(|&s| f64::from(s)).collect())
            .ok_or_else(|| ResizeError::AttributeType {
                op: op.to_string(),
                name: "scales".to_string(),
                expected: "a list of floats",
            }),
    }
}

enum Scanned {
    Deferred(NodeId),
    Sizes(NodeId, Vec<usize>),
    Scales(NodeId, Vec<f64>),
}

fn scan_arguments<A: Operand>(args: &[A], in_lens: &[usize], op: &str) -> ResizeResult<Scanned> {
    let data = args.first().map(Operand::id);

    for arg in args {
        if Some(arg.id()) == data || arg.is_undefined() {
            continue;
        }
        // unset optional inputs have no dimensions
        let shape = arg.shape();
        if shape.rank() == 0 {
            continue;
        }

        if shape.dtype().is_integer() {
            let Some(sizes) = arg.evaluate().filter(|v| !v.is_empty()) else {
                return Ok(Scanned::Deferred(arg.id()));
            };
            let out_lens = sizes.to_usize_vec();
            if out_lens.len() != in_lens.len() {
                return Err(ResizeError::OutputRankMismatch {
                    op: op.to_string(),
                    input: in_lens.len(),
                    sizes: out_lens.len(),
                });
            }
            return Ok(Scanned::Sizes(arg.id(), out_lens));
        }

        // a scales argument of the wrong length is still the one chosen; the
        // rank check then reports it
        if shape.dims()[0].as_const() != Some(in_lens.len()) {
            return Ok(Scanned::Scales(arg.id(), Vec::new()));
        }
        let Some(scales) = arg.evaluate().filter(|v| !v.is_empty()) else {
            return Ok(Scanned::Deferred(arg.id()));
        };
        return Ok(Scanned::Scales(arg.id(), scales.to_f64_vec()));
    }

    Err(ResizeError::MissingScaleOrSizeInput { op: op.to_string() })
}

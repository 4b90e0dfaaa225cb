use std::fmt;

/// An IR instruction together with its static parameters.
///
/// These are the only operations the resize lowering emits: the primitive
/// movement/arithmetic ops used by the precomputed path and the generic
/// runtime `resize`.
#[derive(Debug, Clone, PartialEq)]
pub enum OpParams {
    /// Reinterprets the input with new static dimensions.
    Reshape { dims: Vec<i64> },
    /// Selects elements along `axis` by an integer index tensor.
    Gather { axis: usize },
    /// Keeps `[starts[i], ends[i])` along each of `axes`.
    Slice {
        axes: Vec<usize>,
        starts: Vec<i64>,
        ends: Vec<i64>,
    },
    Add,
    Sub,
    Mul,
    /// Runtime resize; reads its second input as scales or sizes depending on
    /// the element type.
    Resize {
        nearest_mode: String,
        coordinate_transformation_mode: String,
    },
}

impl OpParams {
    /// The IR name of the instruction.
    pub fn name(&self) -> &'static str {
        match self {
            OpParams::Reshape { .. } => "reshape",
            OpParams::Gather { .. } => "gather",
            OpParams::Slice { .. } => "slice",
            OpParams::Add => "add",
            OpParams::Sub => "sub",
            OpParams::Mul => "mul",
            OpParams::Resize { .. } => "resize",
        }
    }

    /// Number of inputs the instruction expects.
    pub fn arity(&self) -> usize {
        match self {
            OpParams::Reshape { .. } | OpParams::Slice { .. } => 1,
            OpParams::Gather { .. }
            | OpParams::Add
            | OpParams::Sub
            | OpParams::Mul
            | OpParams::Resize { .. } => 2,
        }
    }
}

impl fmt::Display for OpParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpParams::Reshape { dims } => write!(f, "reshape[dims={dims:?}]"),
            OpParams::Gather { axis } => write!(f, "gather[axis={axis}]"),
            OpParams::Slice { axes, starts, ends } => {
                write!(f, "slice[axes={axes:?},starts={starts:?},ends={ends:?}]")
            }
            OpParams::Resize {
                nearest_mode,
                coordinate_transformation_mode,
            } => write!(
                f,
                "resize[nearest_mode={nearest_mode},coordinate_transformation_mode={coordinate_transformation_mode}]"
            ),
            other => write!(f, "{}", other.name()),
        }
    }
}

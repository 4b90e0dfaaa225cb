//! Errors raised while lowering a resize node.
//!
//! Every variant carries the ONNX operator name (`Resize` or `Upsample`) so the
//! message reads the same way for both entry points.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type ResizeResult<T> = Result<T, ResizeError>;

/// Errors that abort the lowering of a single resize operator.
///
/// None of these are recovered internally: the caller decides whether to abort
/// the whole compilation or report a diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResizeError {
    #[error("PARSE_{op}: \"tf_crop_and_resize\" mode is not supported!")]
    UnsupportedCoordinateTransformMode { op: String },

    #[error("PARSE_{op}: unknown coordinate_transformation_mode \"{mode}\"")]
    UnknownCoordinateTransformMode { op: String, mode: String },

    #[error("PARSE_{op}: only nearest and linear modes are supported, got \"{mode}\"")]
    UnsupportedInterpolationMode { op: String, mode: String },

    #[error("PARSE_{op}: unknown nearest_mode \"{mode}\"")]
    UnknownNearestMode { op: String, mode: String },

    #[error("PARSE_{op}: exclude_outside 1 is not supported!")]
    UnsupportedExcludeOutside { op: String },

    #[error("PARSE_{op}: attribute \"{name}\" should be {expected}")]
    AttributeType {
        op: String,
        name: String,
        expected: &'static str,
    },

    #[error("PARSE_{op}: ranks of input and scale are different! (input {input}, scale {scale})")]
    RankMismatch {
        op: String,
        input: usize,
        scale: usize,
    },

    #[error(
        "PARSE_{op}: specified output size's rank does not match input size (input {input}, sizes {sizes})"
    )]
    OutputRankMismatch {
        op: String,
        input: usize,
        sizes: usize,
    },

    #[error("PARSE_{op}: no shapes or scales input provided")]
    MissingScaleOrSizeInput { op: String },

    #[error("PARSE_{op}: shape dimension {rank} exceeds {max}")]
    DimensionOverflow { op: String, rank: usize, max: usize },

    #[error("PARSE_{op}: {what} has more elements than can be allocated")]
    TooManyElements { op: String, what: &'static str },

    #[error("PARSE_{op}: linear mode not supported for non-constant inputs")]
    UnsupportedDynamicLinear { op: String },

    #[error("PARSE_{op}: missing data input")]
    MissingInput { op: String },

    #[error("no parser registered for operator \"{0}\"")]
    UnsupportedOperator(String),
}

impl ResizeError {
    /// A short, stable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ResizeError::UnsupportedCoordinateTransformMode { .. } => {
                "UnsupportedCoordinateTransformMode"
            }
            ResizeError::UnknownCoordinateTransformMode { .. } => "UnknownCoordinateTransformMode",
            ResizeError::UnsupportedInterpolationMode { .. } => "UnsupportedInterpolationMode",
            ResizeError::UnknownNearestMode { .. } => "UnknownNearestMode",
            ResizeError::UnsupportedExcludeOutside { .. } => "UnsupportedExcludeOutside",
            ResizeError::AttributeType { .. } => "AttributeType",
            ResizeError::RankMismatch { .. } => "RankMismatch",
            ResizeError::OutputRankMismatch { .. } => "OutputRankMismatch",
            ResizeError::MissingScaleOrSizeInput { .. } => "MissingScaleOrSizeInput",
            ResizeError::DimensionOverflow { .. } => "DimensionOverflow",
            ResizeError::TooManyElements { .. } => "TooManyElements",
            ResizeError::UnsupportedDynamicLinear { .. } => "UnsupportedDynamicLinear",
            ResizeError::MissingInput { .. } => "MissingInput",
            ResizeError::UnsupportedOperator(_) => "UnsupportedOperator",
        }
    }
}

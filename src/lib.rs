//! Harp Resize: lowering of ONNX `Resize` / `Upsample` into Harp IR
//!
//! A resize node becomes either a single runtime `resize` instruction (when
//! shapes or scales are only known at run time) or a precomputed subgraph of
//! `reshape`, `gather` and, for linear mode, `slice`/`sub`/`mul`/`add`
//! blends.
//!
//! # Architecture
//!
//! - **shape**: static and symbolic tensor shapes
//! - **graph**: the IR seam (`GraphBuilder`, `Operand`) and an arena graph
//! - **onnx**: node attributes and per-operator parser dispatch
//! - **resize**: the lowering itself
//! - **config**: lowering settings
//!
//! # Environment Variables
//!
//! - `HARP_RESIZE_NO_GATHER`: emit the runtime resize for nearest mode even
//!   when everything is static (see [`LoweringConfig::from_env`])

// ============================================================================
// Core Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod graph;
pub mod onnx;
pub mod resize;
pub mod shape;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::LoweringConfig;
pub use error::{ResizeError, ResizeResult};
pub use graph::{Graph, GraphBuilder, NodeId, Operand, ToDot};
pub use onnx::{AttributeMap, NodeInfo, OpRegistry};
pub use resize::{lower_resize, ResizeParser};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module with commonly used types and traits
pub mod prelude {
    pub use crate::config::LoweringConfig;
    pub use crate::error::{ResizeError, ResizeResult};
    pub use crate::graph::{
        Argument, Graph, GraphBuilder, GraphOp, Literal, LiteralData, NodeId, OpParams, Operand,
    };
    pub use crate::onnx::{AttributeMap, AttributeValue, NodeInfo, OpParser, OpRegistry};
    pub use crate::resize::{lower_resize, CoordTransform, InterpolationMode, NearestMode};
    pub use crate::shape::{DType, Expr, Shape, StaticShape};
}

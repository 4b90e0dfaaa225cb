//! Lowering of the ONNX `Resize` and `Upsample` operators.
//!
//! - `config`: attribute resolution and validation
//! - `policy`: coordinate transforms and nearest rounding
//! - `scales`: scale / output length resolution
//! - `neighbors`: corner offsets and weights for linear mode
//! - `lower`: planning and emission of the IR subgraph

pub mod config;
pub mod lower;
pub mod neighbors;
pub mod policy;
pub mod scales;

pub use config::{InterpolationMode, ResizeConfig};
pub use lower::{lower_resize, plan_resize, BlendStep, ResizeParser, ResizePlan, RuntimeSizes};
pub use neighbors::{calc_neighbor_points, NeighborIndexTable};
pub use policy::{clamp_coord, CoordTransform, NearestMode};
pub use scales::{resolve_scales, ScaleResolution};

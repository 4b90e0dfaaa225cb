//! The slice of ONNX import the resize lowering consumes: decoded attributes,
//! node metadata and per-operator parser dispatch.

mod attribute;
mod node;
mod parser;

pub use attribute::{AttributeMap, AttributeValue};
pub use node::NodeInfo;
pub use parser::{OpParser, OpRegistry};

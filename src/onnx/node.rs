use super::AttributeMap;

/// Everything a parser knows about the ONNX node it lowers, apart from its
/// arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    /// ONNX operator type, e.g. `Resize`.
    pub op_type: String,
    pub attributes: AttributeMap,
}

impl NodeInfo {
    pub fn new(op_type: &str, attributes: AttributeMap) -> Self {
        Self {
            op_type: op_type.to_string(),
            attributes,
        }
    }

    /// Tag used to prefix diagnostics, e.g. `RESIZE`.
    pub fn tag(&self) -> String {
        self.op_type.to_uppercase()
    }
}

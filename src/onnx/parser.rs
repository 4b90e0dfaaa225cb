use log::debug;
use rustc_hash::FxHashMap;

use super::NodeInfo;
use crate::config::LoweringConfig;
use crate::error::{ResizeError, ResizeResult};
use crate::graph::{Argument, GraphBuilder, NodeId};

/// Lowers one kind of ONNX node into IR instructions.
pub trait OpParser {
    /// ONNX operator types handled by this parser.
    fn operators(&self) -> &'static [&'static str];

    /// Emits the instructions for `info` and returns the node producing its
    /// result. On error nothing has been added to `builder`.
    fn parse(
        &self,
        builder: &mut dyn GraphBuilder,
        info: &NodeInfo,
        args: &[Argument],
        config: &LoweringConfig,
    ) -> ResizeResult<NodeId>;
}

/// Dispatches nodes to their parser by ONNX operator type.
#[derive(Default)]
pub struct OpRegistry {
    parsers: Vec<Box<dyn OpParser>>,
    by_name: FxHashMap<&'static str, usize>,
}

impl OpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every parser this crate provides.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::resize::ResizeParser));
        registry
    }

    /// Registers `parser` for all of its operator types. A later
    /// registration for the same type wins.
    pub fn register(&mut self, parser: Box<dyn OpParser>) {
        let slot = self.parsers.len();
        for &name in parser.operators() {
            debug!("Registering parser for {name}");
            self.by_name.insert(name, slot);
        }
        self.parsers.push(parser);
    }

    pub fn supports(&self, op_type: &str) -> bool {
        self.by_name.contains_key(op_type)
    }

    pub fn parse(
        &self,
        builder: &mut dyn GraphBuilder,
        info: &NodeInfo,
        args: &[Argument],
        config: &LoweringConfig,
    ) -> ResizeResult<NodeId> {
        let slot = self
            .by_name
            .get(info.op_type.as_str())
            .ok_or_else(|| ResizeError::UnsupportedOperator(info.op_type.clone()))?;
        self.parsers[*slot].parse(builder, info, args, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::onnx::AttributeMap;

    #[test]
    fn test_defaults_cover_resize_and_upsample() {
        let registry = OpRegistry::with_defaults();
        assert!(registry.supports("Resize"));
        assert!(registry.supports("Upsample"));
        assert!(!registry.supports("Conv"));
    }

    #[test]
    fn test_unknown_operator() {
        let registry = OpRegistry::with_defaults();
        let mut graph = Graph::new();
        let info = NodeInfo::new("Conv", AttributeMap::new());
        let err = registry
            .parse(&mut graph, &info, &[], &LoweringConfig::default())
            .unwrap_err();
        assert_eq!(err, ResizeError::UnsupportedOperator("Conv".to_string()));
        assert!(graph.is_empty());
    }
}

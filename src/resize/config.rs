use super::policy::{CoordTransform, NearestMode};
use crate::error::{ResizeError, ResizeResult};
use crate::onnx::NodeInfo;

/// `mode` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    #[default]
    Nearest,
    Linear,
}

impl InterpolationMode {
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationMode::Nearest => "nearest",
            InterpolationMode::Linear => "linear",
        }
    }
}

/// Validated attributes of a resize node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResizeConfig {
    pub mode: InterpolationMode,
    pub coord_transform: CoordTransform,
    pub nearest_rounding: NearestMode,
    /// Always `false` once resolved; `exclude_outside = 1` is rejected.
    pub exclude_outside: bool,
}

impl ResizeConfig {
    /// Resolves the configuration from the node attributes.
    ///
    /// Checks run in a fixed order so that an unsupported coordinate mode is
    /// reported regardless of the other attributes, then `exclude_outside`,
    /// then `mode`, then `nearest_mode`.
    pub fn from_node(info: &NodeInfo) -> ResizeResult<Self> {
        let op = info.tag();

        let coord_name = string_attr(info, "coordinate_transformation_mode", "half_pixel")?;
        if coord_name == "tf_crop_and_resize" {
            return Err(ResizeError::UnsupportedCoordinateTransformMode { op });
        }
        let coord_transform = CoordTransform::from_name(coord_name).ok_or_else(|| {
            ResizeError::UnknownCoordinateTransformMode {
                op: op.clone(),
                mode: coord_name.to_string(),
            }
        })?;

        if int_attr(info, "exclude_outside", 0)? == 1 {
            return Err(ResizeError::UnsupportedExcludeOutside { op });
        }

        let mode = match string_attr(info, "mode", "nearest")? {
            "nearest" => InterpolationMode::Nearest,
            "linear" => InterpolationMode::Linear,
            other => {
                return Err(ResizeError::UnsupportedInterpolationMode {
                    op,
                    mode: other.to_string(),
                })
            }
        };

        let nearest_name = string_attr(info, "nearest_mode", "round_prefer_floor")?;
        let nearest_rounding =
            NearestMode::from_name(nearest_name).ok_or_else(|| ResizeError::UnknownNearestMode {
                op,
                mode: nearest_name.to_string(),
            })?;

        Ok(Self {
            mode,
            coord_transform,
            nearest_rounding,
            exclude_outside: false,
        })
    }
}

fn string_attr<'a>(info: &'a NodeInfo, name: &str, default: &'a str) -> ResizeResult<&'a str> {
    match info.attributes.get(name) {
        None => Ok(default),
        Some(value) => value.as_str().ok_or_else(|| ResizeError::AttributeType {
            op: info.tag(),
            name: name.to_string(),
            expected: "a string",
        }),
    }
}

fn int_attr(info: &NodeInfo, name: &str, default: i64) -> ResizeResult<i64> {
    match info.attributes.get(name) {
        None => Ok(default),
        Some(value) => value.as_int().ok_or_else(|| ResizeError::AttributeType {
            op: info.tag(),
            name: name.to_string(),
            expected: "an integer",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onnx::AttributeMap;
    use rstest::rstest;

    fn resize(attrs: AttributeMap) -> NodeInfo {
        NodeInfo::new("Resize", attrs)
    }

    #[test]
    fn test_defaults() {
        let config = ResizeConfig::from_node(&resize(AttributeMap::new())).unwrap();
        assert_eq!(config.mode, InterpolationMode::Nearest);
        assert_eq!(config.coord_transform, CoordTransform::HalfPixel);
        assert_eq!(config.nearest_rounding, NearestMode::RoundPreferFloor);
        assert!(!config.exclude_outside);
    }

    #[test]
    fn test_explicit_attributes() {
        let attrs = AttributeMap::new()
            .with("mode", "linear")
            .with("coordinate_transformation_mode", "align_corners")
            .with("nearest_mode", "ceil")
            .with("exclude_outside", 0i64);
        let config = ResizeConfig::from_node(&resize(attrs)).unwrap();
        assert_eq!(config.mode, InterpolationMode::Linear);
        assert_eq!(config.coord_transform, CoordTransform::AlignCorners);
        assert_eq!(config.nearest_rounding, NearestMode::Ceil);
    }

    #[rstest]
    #[case(AttributeMap::new())]
    #[case(AttributeMap::new().with("mode", "cubic"))]
    #[case(AttributeMap::new().with("exclude_outside", 1i64))]
    #[case(AttributeMap::new().with("nearest_mode", "bogus").with("mode", "linear"))]
    fn test_tf_crop_and_resize_always_rejected(#[case] attrs: AttributeMap) {
        let attrs = attrs.with("coordinate_transformation_mode", "tf_crop_and_resize");
        let err = ResizeConfig::from_node(&resize(attrs)).unwrap_err();
        assert_eq!(err.kind(), "UnsupportedCoordinateTransformMode");
    }

    #[rstest]
    #[case(AttributeMap::new())]
    #[case(AttributeMap::new().with("mode", "linear"))]
    #[case(AttributeMap::new().with("mode", "cubic"))]
    #[case(AttributeMap::new().with("coordinate_transformation_mode", "asymmetric"))]
    fn test_exclude_outside_rejected(#[case] attrs: AttributeMap) {
        let attrs = attrs.with("exclude_outside", 1i64);
        let err = ResizeConfig::from_node(&resize(attrs)).unwrap_err();
        assert_eq!(
            err,
            ResizeError::UnsupportedExcludeOutside {
                op: "RESIZE".to_string()
            }
        );
    }

    #[test]
    fn test_unsupported_mode() {
        let err =
            ResizeConfig::from_node(&resize(AttributeMap::new().with("mode", "cubic"))).unwrap_err();
        assert_eq!(
            err,
            ResizeError::UnsupportedInterpolationMode {
                op: "RESIZE".to_string(),
                mode: "cubic".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_policy_names() {
        let err = ResizeConfig::from_node(&resize(
            AttributeMap::new().with("coordinate_transformation_mode", "half"),
        ))
        .unwrap_err();
        assert_eq!(err.kind(), "UnknownCoordinateTransformMode");

        let err = ResizeConfig::from_node(&resize(
            AttributeMap::new().with("nearest_mode", "nearest"),
        ))
        .unwrap_err();
        assert_eq!(err.kind(), "UnknownNearestMode");
    }

    #[test]
    fn test_wrong_attribute_type() {
        let err =
            ResizeConfig::from_node(&resize(AttributeMap::new().with("mode", 1i64))).unwrap_err();
        assert_eq!(
            err,
            ResizeError::AttributeType {
                op: "RESIZE".to_string(),
                name: "mode".to_string(),
                expected: "a string"
            }
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let info = resize(AttributeMap::new().with("mode", "linear"));
        assert_eq!(
            ResizeConfig::from_node(&info).unwrap(),
            ResizeConfig::from_node(&info).unwrap()
        );
    }
}

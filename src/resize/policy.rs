//! Index-mapping policies.
//!
//! A [`CoordTransform`] maps an output coordinate to a continuous source
//! coordinate, a [`NearestMode`] turns that coordinate into an integer source
//! index. Both are closed enumerations resolved once from the attribute
//! strings; every variant is a pure function of its inputs.

/// `coordinate_transformation_mode`.
///
/// `tf_crop_and_resize` has no variant: it needs a region of interest this
/// lowering does not implement and is rejected while resolving the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordTransform {
    /// `(x + 0.5) / scale - 0.5`
    #[default]
    HalfPixel,
    /// Like `HalfPixel`, but a length-1 output always samples coordinate 0.
    PytorchHalfPixel,
    /// `x * (in_len - 1) / (out_len - 1)`
    AlignCorners,
    /// `x / scale`
    Asymmetric,
    /// `(x + 0.5) / scale`
    TfHalfPixelForNn,
}

impl CoordTransform {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "half_pixel" => Some(CoordTransform::HalfPixel),
            "pytorch_half_pixel" => Some(CoordTransform::PytorchHalfPixel),
            "align_corners" => Some(CoordTransform::AlignCorners),
            "asymmetric" => Some(CoordTransform::Asymmetric),
            "tf_half_pixel_for_nn" => Some(CoordTransform::TfHalfPixelForNn),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CoordTransform::HalfPixel => "half_pixel",
            CoordTransform::PytorchHalfPixel => "pytorch_half_pixel",
            CoordTransform::AlignCorners => "align_corners",
            CoordTransform::Asymmetric => "asymmetric",
            CoordTransform::TfHalfPixelForNn => "tf_half_pixel_for_nn",
        }
    }

    /// Continuous source coordinate of output coordinate `x`.
    pub fn apply(&self, in_len: usize, out_len: usize, x: usize, scale: f64) -> f64 {
        let x = x as f64;
        match self {
            CoordTransform::HalfPixel => (x + 0.5) / scale - 0.5,
            CoordTransform::PytorchHalfPixel => {
                if out_len > 1 {
                    (x + 0.5) / scale - 0.5
                } else {
                    0.0
                }
            }
            CoordTransform::AlignCorners => {
                if out_len == 1 {
                    0.0
                } else {
                    x * (in_len as f64 - 1.0) / (out_len as f64 - 1.0)
                }
            }
            CoordTransform::Asymmetric => x / scale,
            CoordTransform::TfHalfPixelForNn => (x + 0.5) / scale,
        }
    }
}

/// `nearest_mode`; also supplies the floor/ceil pair used by linear mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NearestMode {
    /// Round half down.
    #[default]
    RoundPreferFloor,
    /// Round half up.
    RoundPreferCeil,
    Floor,
    Ceil,
}

impl NearestMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "round_prefer_floor" => Some(NearestMode::RoundPreferFloor),
            "round_prefer_ceil" => Some(NearestMode::RoundPreferCeil),
            "floor" => Some(NearestMode::Floor),
            "ceil" => Some(NearestMode::Ceil),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NearestMode::RoundPreferFloor => "round_prefer_floor",
            NearestMode::RoundPreferCeil => "round_prefer_ceil",
            NearestMode::Floor => "floor",
            NearestMode::Ceil => "ceil",
        }
    }

    /// Integer source index in `[0, in_len - 1]` for coordinate `coord`.
    pub fn apply(&self, in_len: usize, coord: f64) -> usize {
        let c = clamp_coord(in_len, coord);
        let rounded = match self {
            NearestMode::RoundPreferFloor => (c - 0.5).ceil(),
            NearestMode::RoundPreferCeil => c.round(),
            NearestMode::Floor => c.floor(),
            NearestMode::Ceil => c.ceil(),
        };
        rounded.max(0.0) as usize
    }
}

/// Clamps a continuous coordinate into the valid source range.
pub fn clamp_coord(in_len: usize, coord: f64) -> f64 {
    let upper = (in_len as f64 - 1.0).max(0.0);
    coord.max(0.0).min(upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CoordTransform::HalfPixel, 4, 8, 0, 2.0, -0.25)]
    #[case(CoordTransform::HalfPixel, 4, 8, 3, 2.0, 1.25)]
    #[case(CoordTransform::PytorchHalfPixel, 4, 8, 3, 2.0, 1.25)]
    #[case(CoordTransform::PytorchHalfPixel, 4, 1, 0, 0.25, 0.0)]
    #[case(CoordTransform::AlignCorners, 4, 7, 2, 1.75, 1.0)]
    #[case(CoordTransform::AlignCorners, 4, 1, 0, 0.25, 0.0)]
    #[case(CoordTransform::Asymmetric, 4, 8, 5, 2.0, 2.5)]
    #[case(CoordTransform::TfHalfPixelForNn, 4, 8, 0, 2.0, 0.25)]
    fn test_coord_transform(
        #[case] transform: CoordTransform,
        #[case] in_len: usize,
        #[case] out_len: usize,
        #[case] x: usize,
        #[case] scale: f64,
        #[case] expected: f64,
    ) {
        assert!((transform.apply(in_len, out_len, x, scale) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(NearestMode::RoundPreferFloor, 1.5, 1)]
    #[case(NearestMode::RoundPreferFloor, 1.6, 2)]
    #[case(NearestMode::RoundPreferCeil, 1.5, 2)]
    #[case(NearestMode::RoundPreferCeil, 1.4, 1)]
    #[case(NearestMode::Floor, 1.9, 1)]
    #[case(NearestMode::Ceil, 1.1, 2)]
    #[case(NearestMode::Floor, -0.25, 0)]
    #[case(NearestMode::Ceil, 3.5, 3)]
    #[case(NearestMode::RoundPreferFloor, 100.0, 3)]
    fn test_nearest_mode(#[case] mode: NearestMode, #[case] coord: f64, #[case] expected: usize) {
        assert_eq!(mode.apply(4, coord), expected);
    }

    #[rstest]
    #[case("half_pixel")]
    #[case("pytorch_half_pixel")]
    #[case("align_corners")]
    #[case("asymmetric")]
    #[case("tf_half_pixel_for_nn")]
    fn test_coord_transform_names_round_trip(#[case] name: &str) {
        assert_eq!(CoordTransform::from_name(name).map(|t| t.name()), Some(name));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(CoordTransform::from_name("tf_crop_and_resize"), None);
        assert_eq!(NearestMode::from_name("round"), None);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CoordTransform::default().name(), "half_pixel");
        assert_eq!(NearestMode::default().name(), "round_prefer_floor");
    }

    #[test]
    fn test_single_element_input_always_maps_to_zero() {
        for mode in [
            NearestMode::RoundPreferFloor,
            NearestMode::RoundPreferCeil,
            NearestMode::Floor,
            NearestMode::Ceil,
        ] {
            assert_eq!(mode.apply(1, 0.7), 0);
        }
    }
}

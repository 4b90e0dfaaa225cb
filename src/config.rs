//! Settings that steer how resize nodes are lowered.

use typed_builder::TypedBuilder;

/// Environment variable that disables the precomputed gather lowering.
pub const NO_GATHER_ENV: &str = "HARP_RESIZE_NO_GATHER";

/// Lowering settings.
///
/// # Example
///
/// ```
/// use harp_resize::LoweringConfig;
///
/// let config = LoweringConfig::builder().prefer_gather(false).build();
/// assert!(!config.prefer_gather);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct LoweringConfig {
    /// Lower static nearest-mode resizes to `reshape` + `gather` with a
    /// precomputed index literal. When `false` the runtime `resize`
    /// instruction is emitted instead. Linear mode is always precomputed.
    #[builder(default = true)]
    pub prefer_gather: bool,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self {
            prefer_gather: true,
        }
    }
}

impl LoweringConfig {
    /// Defaults, adjusted by the environment:
    /// - `HARP_RESIZE_NO_GATHER`: always emit the runtime resize for nearest
    ///   mode.
    pub fn from_env() -> Self {
        Self {
            prefer_gather: std::env::var_os(NO_GATHER_ENV).is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        assert_eq!(LoweringConfig::builder().build(), LoweringConfig::default());
        assert!(LoweringConfig::default().prefer_gather);
    }

    #[test]
    fn test_from_env_reads_no_gather_switch() {
        // the only test in the crate touching this variable
        std::env::set_var(NO_GATHER_ENV, "1");
        assert!(!LoweringConfig::from_env().prefer_gather);

        std::env::remove_var(NO_GATHER_ENV);
        assert_eq!(LoweringConfig::from_env(), LoweringConfig::default());
    }
}

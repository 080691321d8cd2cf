use serde::{Deserialize, Serialize};

use super::branch_config::BranchConfig;
use crate::error::{Result, TreeError};

pub const BRANCHES_RANGE: (i32, i32) = (2, 15);
pub const ANGLE_RANGE: (i32, i32) = (0, 90);
pub const ANGLE_VARIANCE_RANGE: (i32, i32) = (0, 50);
pub const FACTOR_PCT_RANGE: (i32, i32) = (0, 200);
pub const VARIANCE_PCT_RANGE: (i32, i32) = (0, 100);

/// The seven integers a parameter form collects, before normalization.
///
/// Percent fields are whole percentages (`85` means a factor of 0.85).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeParams {
    /// Recursion depth (number of branch generations)
    pub branches: i32,
    /// Base turn applied with opposite signs to the two children
    pub angle: i32,
    pub angle_variance: i32,
    pub length_factor: i32,
    pub length_variance: i32,
    pub radius_factor: i32,
    pub radius_variance: i32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            branches: 9,
            angle: 35,
            angle_variance: 6,
            length_factor: 85,
            length_variance: 15,
            radius_factor: 90,
            radius_variance: 10,
        }
    }
}

impl TreeParams {
    pub fn new(
        branches: i32,
        angle: i32,
        angle_variance: i32,
        length_factor: i32,
        length_variance: i32,
        radius_factor: i32,
        radius_variance: i32,
    ) -> Self {
        Self {
            branches,
            angle,
            angle_variance,
            length_factor,
            length_variance,
            radius_factor,
            radius_variance,
        }
    }

    /// Parse from a YAML document; absent keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| TreeError::Params(format!("YAML parse error: {}", e)))
    }

    /// Pin every field into its documented range, as an input form would
    pub fn clamped(&self) -> Self {
        let clamp = |v: i32, (lo, hi): (i32, i32)| v.clamp(lo, hi);
        Self {
            branches: clamp(self.branches, BRANCHES_RANGE),
            angle: clamp(self.angle, ANGLE_RANGE),
            angle_variance: clamp(self.angle_variance, ANGLE_VARIANCE_RANGE),
            length_factor: clamp(self.length_factor, FACTOR_PCT_RANGE),
            length_variance: clamp(self.length_variance, VARIANCE_PCT_RANGE),
            radius_factor: clamp(self.radius_factor, FACTOR_PCT_RANGE),
            radius_variance: clamp(self.radius_variance, VARIANCE_PCT_RANGE),
        }
    }

    /// Normalize percentages into fractions and validate the result
    pub fn to_config(&self) -> Result<BranchConfig> {
        if self.branches < 0 {
            return Err(TreeError::InvalidConfiguration(format!(
                "branches must be non-negative, got {}",
                self.branches
            )));
        }

        let config = BranchConfig {
            max_depth: self.branches as u32,
            base_angle_deg: self.angle,
            angle_variance_deg: self.angle_variance,
            length_factor: self.length_factor as f64 / 100.0,
            length_variance: self.length_variance as f64 / 100.0,
            radius_factor: self.radius_factor as f64 / 100.0,
            radius_variance: self.radius_variance as f64 / 100.0,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let params = TreeParams::default();
        assert_eq!(params.branches, 9);
        assert_eq!(params.angle, 35);
        assert_eq!(params.radius_variance, 10);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
branches: 4
angle: 20
length_factor: 70
"#;
        let params = TreeParams::from_yaml(yaml).unwrap();
        assert_eq!(params.branches, 4);
        assert_eq!(params.angle, 20);
        assert_eq!(params.length_factor, 70);
        // Unspecified keys fall back to defaults
        assert_eq!(params.angle_variance, 6);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = TreeParams::from_yaml("brnaches: 4\n");
        assert!(matches!(result, Err(TreeError::Params(_))));
    }

    #[test]
    fn test_clamped() {
        let params = TreeParams::new(40, -5, 90, 250, 101, -1, 50).clamped();
        assert_eq!(params, TreeParams::new(15, 0, 50, 200, 100, 0, 50));
    }

    #[test]
    fn test_to_config_normalizes() {
        let config = TreeParams::default().to_config().unwrap();
        assert_eq!(config.max_depth, 9);
        assert!((config.length_factor - 0.85).abs() < 1e-12);
        assert!((config.length_variance - 0.15).abs() < 1e-12);
        assert!((config.radius_factor - 0.90).abs() < 1e-12);
        assert!((config.radius_variance - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_to_config_rejects_out_of_range() {
        let params = TreeParams {
            angle: 120,
            ..Default::default()
        };
        assert!(matches!(
            params.to_config(),
            Err(TreeError::InvalidConfiguration(_))
        ));

        let params = TreeParams {
            branches: -3,
            ..Default::default()
        };
        assert!(params.to_config().is_err());
    }
}

use crate::error::{Result, TreeError};
use crate::math::Vec3;

/// Normalized, immutable configuration for one generation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchConfig {
    /// Depth at which recursion stops (no segment is emitted there)
    pub max_depth: u32,
    pub base_angle_deg: i32,
    pub angle_variance_deg: i32,
    /// Multiplicative length decay from parent to child
    pub length_factor: f64,
    /// Half-width of the uniform band around `length_factor`
    pub length_variance: f64,
    pub radius_factor: f64,
    pub radius_variance: f64,
}

impl BranchConfig {
    pub fn validate(&self) -> Result<()> {
        fn out_of_range<T: std::fmt::Display>(name: &str, value: T, lo: T, hi: T) -> TreeError {
            TreeError::InvalidConfiguration(format!(
                "{} must be within [{}, {}], got {}",
                name, lo, hi, value
            ))
        }

        if !(2..=15).contains(&self.max_depth) {
            return Err(out_of_range("max_depth", self.max_depth, 2, 15));
        }
        if !(0..=90).contains(&self.base_angle_deg) {
            return Err(out_of_range("base_angle_deg", self.base_angle_deg, 0, 90));
        }
        if !(0..=50).contains(&self.angle_variance_deg) {
            return Err(out_of_range("angle_variance_deg", self.angle_variance_deg, 0, 50));
        }

        let fractions = [
            ("length_factor", self.length_factor, 2.0),
            ("length_variance", self.length_variance, 1.0),
            ("radius_factor", self.radius_factor, 2.0),
            ("radius_variance", self.radius_variance, 1.0),
        ];
        for (name, value, hi) in fractions {
            // NaN fails `contains` as well
            if !(0.0..=hi).contains(&value) {
                return Err(out_of_range(name, value, 0.0, hi));
            }
        }

        Ok(())
    }
}

/// Where and how big the trunk segment starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartPose {
    pub origin: Vec3,
    pub direction: Vec3,
    pub radius: f64,
    pub length: f64,
}

impl Default for StartPose {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
            radius: 1.0,
            length: 8.0,
        }
    }
}

impl StartPose {
    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() || !self.direction.is_finite() {
            return Err(TreeError::InvalidConfiguration(
                "start origin and direction must be finite".to_string(),
            ));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(TreeError::InvalidConfiguration(format!(
                "start radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(TreeError::InvalidConfiguration(format!(
                "start length must be positive, got {}",
                self.length
            )));
        }
        Ok(())
    }
}

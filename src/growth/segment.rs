use crate::config::StartPose;
use crate::math::Vec3;

/// Everything a geometry host needs to build one cylinder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRequest {
    pub origin: Vec3,
    /// Unit growth direction
    pub direction: Vec3,
    pub radius: f64,
    pub length: f64,
}

impl SegmentRequest {
    /// End point of the cylinder axis, where children start
    pub fn tip(&self) -> Vec3 {
        self.origin + self.direction.scale(self.length)
    }
}

/// Working value of the recursion, one per segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchState {
    /// Generations from the root (root = 0)
    pub depth: u32,
    pub origin: Vec3,
    /// Unnormalized; perturbations accumulate here across generations
    pub direction: Vec3,
    pub radius: f64,
    pub length: f64,
}

impl BranchState {
    pub fn root(pose: &StartPose) -> Self {
        Self {
            depth: 0,
            origin: pose.origin,
            direction: pose.direction,
            radius: pose.radius,
            length: pose.length,
        }
    }

    pub fn segment(&self) -> SegmentRequest {
        SegmentRequest {
            origin: self.origin,
            direction: self.direction.normalize(),
            radius: self.radius,
            length: self.length,
        }
    }
}

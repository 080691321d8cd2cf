pub mod params;
pub mod branch_config;

pub use params::TreeParams;
pub use branch_config::{BranchConfig, StartPose};

pub mod segment;
pub mod generator;
pub mod rng;

pub use segment::{BranchState, SegmentRequest};
pub use generator::{BranchGenerator, grow_tree};
pub use rng::{tree_rng, TreeRng};

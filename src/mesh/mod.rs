pub mod branch;
pub mod backend;

pub use branch::{Mesh, Vertex};
pub use backend::{MeshBackend, MeshParams};

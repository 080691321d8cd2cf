use wasm_bindgen::prelude::*;

pub mod backend;
pub mod config;
pub mod error;
pub mod growth;
pub mod host;
pub mod math;
pub mod mesh;

pub use backend::{GeometryBackend, RecordingBackend};
pub use config::{BranchConfig, StartPose, TreeParams};
pub use error::{BackendError, TreeError};
pub use growth::{grow_tree, BranchGenerator, BranchState, SegmentRequest};

use host::JsGeometryBackend;
use mesh::{Mesh, MeshBackend, MeshParams};

/// Initialize panic hook and logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    init_logger();
}

cfg_if::cfg_if! {
    if #[cfg(feature = "debug_logs")] {
        fn init_logger() {
            use log::LevelFilter;
            use wasm_bindgen_console_logger::DEFAULT_LOGGER;
            // A second init keeps the logger already installed
            if log::set_logger(&DEFAULT_LOGGER).is_ok() {
                log::set_max_level(LevelFilter::Debug);
            }
        }
    } else {
        fn init_logger() {}
    }
}

fn to_js(err: TreeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Grow one tree into a JavaScript geometry host.
///
/// The seven integers are the parameter form's values and are clamped to
/// their ranges. `host` must provide `createCircle`, `extrude` and `delete`.
/// Returns the number of segments built.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn draw_tree(
    branches: i32,
    angle: i32,
    angle_variance: i32,
    length_factor: i32,
    length_variance: i32,
    radius_factor: i32,
    radius_variance: i32,
    host: JsValue,
    seed: Option<u64>,
) -> Result<u32, JsValue> {
    let params = TreeParams::new(
        branches,
        angle,
        angle_variance,
        length_factor,
        length_variance,
        radius_factor,
        radius_variance,
    );
    let mut backend = JsGeometryBackend::new(host);
    grow_tree(&params, &mut backend, seed)
        .map(|count| count as u32)
        .map_err(to_js)
}

/// Same as `draw_tree`, with parameters read from a YAML document
#[wasm_bindgen]
pub fn draw_tree_yaml(yaml: &str, host: JsValue, seed: Option<u64>) -> Result<u32, JsValue> {
    let params = TreeParams::from_yaml(yaml).map_err(to_js)?;
    let mut backend = JsGeometryBackend::new(host);
    grow_tree(&params, &mut backend, seed)
        .map(|count| count as u32)
        .map_err(to_js)
}

/// A generated tree as renderable buffers
#[wasm_bindgen]
pub struct TreeMesh {
    mesh: Mesh,
    segment_count: u32,
}

#[wasm_bindgen]
impl TreeMesh {
    /// Interleaved position(3) + normal(3) + uv(2) per vertex
    pub fn vertex_data(&self) -> Vec<f32> {
        self.mesh.vertex_data()
    }

    pub fn index_data(&self) -> Vec<u32> {
        self.mesh.index_data().to_vec()
    }

    pub fn segment_count(&self) -> u32 {
        self.segment_count
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        self.mesh.triangle_count() as u32
    }

    pub fn bounds_center(&self) -> Vec<f64> {
        self.mesh.bounds_center.to_array().to_vec()
    }

    pub fn bounds_radius(&self) -> f64 {
        self.mesh.bounds_radius
    }
}

impl TreeMesh {
    /// Grow a tree into a native mesh
    pub fn grow(params: &TreeParams, mesh_params: MeshParams, seed: Option<u64>) -> Result<Self, TreeError> {
        let mut backend = MeshBackend::new(mesh_params);
        let count = grow_tree(params, &mut backend, seed)?;
        Ok(Self {
            mesh: backend.into_mesh(),
            segment_count: count as u32,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

/// Grow a tree into triangle buffers instead of host geometry
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn build_tree_mesh(
    branches: i32,
    angle: i32,
    angle_variance: i32,
    length_factor: i32,
    length_variance: i32,
    radius_factor: i32,
    radius_variance: i32,
    radial_segments: usize,
    seed: Option<u64>,
) -> Result<TreeMesh, JsValue> {
    let params = TreeParams::new(
        branches,
        angle,
        angle_variance,
        length_factor,
        length_variance,
        radius_factor,
        radius_variance,
    );
    TreeMesh::grow(&params, MeshParams { radial_segments }, seed).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_mesh_from_defaults() {
        let params = TreeParams { branches: 5, ..Default::default() };
        let tree = TreeMesh::grow(&params, MeshParams { radial_segments: 6 }, Some(3)).unwrap();

        assert_eq!(tree.segment_count(), 31);
        // Two rings per cylinder, one quad per ring edge
        assert_eq!(tree.vertex_count(), 31 * 2 * 6);
        assert_eq!(tree.triangle_count(), 31 * 2 * 6);
        assert_eq!(tree.vertex_data().len(), 31 * 2 * 6 * 8);
        assert!(tree.bounds_radius() > 0.0);
    }

    #[test]
    fn test_tree_mesh_is_reproducible() {
        let params = TreeParams { branches: 4, ..Default::default() };
        let a = TreeMesh::grow(&params, MeshParams::default(), Some(10)).unwrap();
        let b = TreeMesh::grow(&params, MeshParams::default(), Some(10)).unwrap();
        assert_eq!(a.vertex_data(), b.vertex_data());
        assert_eq!(a.index_data(), b.index_data());
    }

    #[test]
    fn test_trunk_rises_along_z() {
        let params = TreeParams { branches: 2, ..Default::default() };
        let tree = TreeMesh::grow(&params, MeshParams { radial_segments: 4 }, Some(0)).unwrap();
        let top_ring = &tree.mesh().vertices[4..8];
        assert!(top_ring.iter().all(|v| (v.position.z - 8.0).abs() < 1e-9));
    }
}

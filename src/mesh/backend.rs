use std::collections::HashMap;

use log::trace;

use super::branch::{connect_rings, create_ring, Mesh};
use crate::backend::GeometryBackend;
use crate::error::BackendError;
use crate::math::Vec3;

/// Parameters for mesh generation
#[derive(Debug, Clone, Copy)]
pub struct MeshParams {
    /// Vertices around each circle (more = smoother)
    pub radial_segments: usize,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self { radial_segments: 12 }
    }
}

#[derive(Debug, Clone, Copy)]
struct Circle {
    center: Vec3,
    normal: Vec3,
    radius: f64,
}

/// Native geometry host: every extruded circle becomes an open cylinder
/// appended to a single triangle mesh.
#[derive(Debug)]
pub struct MeshBackend {
    params: MeshParams,
    mesh: Mesh,
    curves: HashMap<usize, Circle>,
    next_curve: usize,
    solids: usize,
}

impl MeshBackend {
    pub fn new(params: MeshParams) -> Self {
        Self {
            params: MeshParams {
                radial_segments: params.radial_segments.max(3),
            },
            mesh: Mesh::new(),
            curves: HashMap::new(),
            next_curve: 0,
            solids: 0,
        }
    }

    /// Number of cylinders built so far
    pub fn solid_count(&self) -> usize {
        self.solids
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Finish building and return the mesh with its bounds computed
    pub fn into_mesh(mut self) -> Mesh {
        self.mesh.calculate_bounds();
        self.mesh
    }
}

impl Default for MeshBackend {
    fn default() -> Self {
        Self::new(MeshParams::default())
    }
}

impl GeometryBackend for MeshBackend {
    type Curve = usize;
    type Solid = usize;

    fn create_circle(&mut self, center: Vec3, normal: Vec3, radius: f64) -> Result<usize, BackendError> {
        if !center.is_finite() || !normal.is_finite() {
            return Err(BackendError::new("createCircle", "center and normal must be finite"));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(BackendError::new("createCircle", format!("invalid radius {}", radius)));
        }

        let id = self.next_curve;
        self.next_curve += 1;
        self.curves.insert(id, Circle { center, normal, radius });
        Ok(id)
    }

    fn extrude(&mut self, curve: &usize, direction: Vec3, length: f64) -> Result<usize, BackendError> {
        let circle = *self
            .curves
            .get(curve)
            .ok_or_else(|| BackendError::new("extrude", format!("unknown curve {}", curve)))?;
        if !(length.is_finite() && length >= 0.0) {
            return Err(BackendError::new("extrude", format!("invalid length {}", length)));
        }

        let segments = self.params.radial_segments;
        let top = circle.center + direction.normalize().scale(length);

        let bottom_ring = create_ring(circle.center, circle.normal, circle.radius, segments, 0.0);
        let top_ring = create_ring(top, circle.normal, circle.radius, segments, 1.0);

        let bottom_start = self.mesh.add_vertices(bottom_ring);
        let top_start = self.mesh.add_vertices(top_ring);
        connect_rings(&mut self.mesh, bottom_start, top_start, segments);

        let id = self.solids;
        self.solids += 1;
        trace!("solid {} from curve {} ({} vertices total)", id, curve, self.mesh.vertex_count());
        Ok(id)
    }

    fn delete(&mut self, curve: usize) -> Result<(), BackendError> {
        self.curves
            .remove(&curve)
            .map(|_| ())
            .ok_or_else(|| BackendError::new("delete", format!("unknown curve {}", curve)))
    }
}

use crate::math::Vec3;

/// A vertex with position, normal and UV
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: [0.0, 0.0],
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = [u, v];
        self
    }

    /// Flatten for a GPU buffer.
    /// Layout: position(3) + normal(3) + uv(2) = 8 floats
    pub fn to_array(&self) -> [f32; 8] {
        [
            self.position.x as f32, self.position.y as f32, self.position.z as f32,
            self.normal.x as f32, self.normal.y as f32, self.normal.z as f32,
            self.uv[0], self.uv[1],
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds_center: Vec3,
    pub bounds_radius: f64,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.push(a);
        self.indices.push(b);
        self.indices.push(c);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Calculate bounding sphere around the vertex centroid
    pub fn calculate_bounds(&mut self) {
        if self.vertices.is_empty() {
            self.bounds_center = Vec3::ZERO;
            self.bounds_radius = 0.0;
            return;
        }

        let mut center = Vec3::ZERO;
        for v in &self.vertices {
            center = center + v.position;
        }
        center = center.scale(1.0 / self.vertices.len() as f64);

        let max_dist = self
            .vertices
            .iter()
            .map(|v| v.position.distance(&center))
            .fold(0.0f64, f64::max);

        self.bounds_center = center;
        self.bounds_radius = max_dist;
    }

    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| v.to_array())
            .collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Create a ring of vertices around `center` in the plane normal to `direction`
pub fn create_ring(
    center: Vec3,
    direction: Vec3,
    radius: f64,
    segments: usize,
    v_coord: f32,
) -> Vec<Vertex> {
    let tangent = direction.perpendicular();
    let bitangent = direction.cross(&tangent).normalize();

    (0..segments)
        .map(|i| {
            let angle = (i as f64 / segments as f64) * std::f64::consts::TAU;
            let radial = tangent.scale(angle.cos()) + bitangent.scale(angle.sin());

            Vertex::new(center + radial.scale(radius), radial)
                .with_uv(i as f32 / segments as f32, v_coord)
        })
        .collect()
}

/// Connect two rings with triangles
pub fn connect_rings(mesh: &mut Mesh, ring1_start: u32, ring2_start: u32, segments: usize) {
    for i in 0..segments {
        let i_next = (i + 1) % segments;

        let a = ring1_start + i as u32;
        let b = ring1_start + i_next as u32;
        let c = ring2_start + i_next as u32;
        let d = ring2_start + i as u32;

        mesh.add_quad(a, d, c, b);
    }
}

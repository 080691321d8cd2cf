//! The geometry capability a host must expose to receive generated segments.

mod recording;

pub use recording::RecordingBackend;

use crate::error::BackendError;
use crate::growth::SegmentRequest;
use crate::math::Vec3;

/// Primitive construction calls offered by a 3D host.
///
/// Each segment is built as a closed circle that is extruded into a solid,
/// after which the construction circle is deleted.
pub trait GeometryBackend {
    type Curve;
    type Solid;

    fn create_circle(&mut self, center: Vec3, normal: Vec3, radius: f64) -> Result<Self::Curve, BackendError>;

    fn extrude(&mut self, curve: &Self::Curve, direction: Vec3, length: f64) -> Result<Self::Solid, BackendError>;

    fn delete(&mut self, curve: Self::Curve) -> Result<(), BackendError>;
}

/// Materialize one segment: create, extrude, then delete the curve.
/// The solid handle is not retained.
pub fn emit_segment<B: GeometryBackend + ?Sized>(backend: &mut B, segment: &SegmentRequest) -> Result<(), BackendError> {
    let curve = backend.create_circle(segment.origin, segment.direction, segment.radius)?;
    backend.extrude(&curve, segment.direction, segment.length)?;
    backend.delete(curve)
}

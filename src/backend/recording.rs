use std::collections::HashMap;

use super::GeometryBackend;
use crate::error::BackendError;
use crate::growth::SegmentRequest;
use crate::math::Vec3;

#[derive(Debug, Clone, Copy)]
struct Circle {
    center: Vec3,
    radius: f64,
}

/// Backend that records every extruded circle as a `SegmentRequest`
/// instead of building geometry.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    segments: Vec<SegmentRequest>,
    curves: HashMap<usize, Circle>,
    next_curve: usize,
    /// Extrusion index that should fail, if any
    fail_at: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` extrusions, then reject the next one
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_at: Some(count),
            ..Self::default()
        }
    }

    /// Segments in the order they were extruded
    pub fn segments(&self) -> &[SegmentRequest] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<SegmentRequest> {
        self.segments
    }

    /// Construction curves created but never deleted
    pub fn live_curves(&self) -> usize {
        self.curves.len()
    }
}

impl GeometryBackend for RecordingBackend {
    type Curve = usize;
    type Solid = usize;

    fn create_circle(&mut self, center: Vec3, _normal: Vec3, radius: f64) -> Result<usize, BackendError> {
        let id = self.next_curve;
        self.next_curve += 1;
        self.curves.insert(id, Circle { center, radius });
        Ok(id)
    }

    fn extrude(&mut self, curve: &usize, direction: Vec3, length: f64) -> Result<usize, BackendError> {
        if self.fail_at == Some(self.segments.len()) {
            return Err(BackendError::new("extrude", "rejected by recording backend"));
        }
        let circle = self
            .curves
            .get(curve)
            .ok_or_else(|| BackendError::new("extrude", format!("unknown curve {}", curve)))?;

        self.segments.push(SegmentRequest {
            origin: circle.center,
            direction,
            radius: circle.radius,
            length,
        });
        Ok(self.segments.len() - 1)
    }

    fn delete(&mut self, curve: usize) -> Result<(), BackendError> {
        self.curves
            .remove(&curve)
            .map(|_| ())
            .ok_or_else(|| BackendError::new("delete", format!("unknown curve {}", curve)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::emit_segment;

    fn segment() -> SegmentRequest {
        SegmentRequest {
            origin: Vec3::new(1.0, 2.0, 3.0),
            direction: Vec3::Z,
            radius: 0.5,
            length: 4.0,
        }
    }

    #[test]
    fn test_emit_records_segment() {
        let mut backend = RecordingBackend::new();
        emit_segment(&mut backend, &segment()).unwrap();

        assert_eq!(backend.segments(), &[segment()]);
        assert_eq!(backend.live_curves(), 0);
    }

    #[test]
    fn test_failing_backend_keeps_curve() {
        let mut backend = RecordingBackend::failing_after(1);
        emit_segment(&mut backend, &segment()).unwrap();

        let err = emit_segment(&mut backend, &segment()).unwrap_err();
        assert_eq!(err.operation, "extrude");
        assert_eq!(backend.segments().len(), 1);
        // No rollback: the second circle was never deleted
        assert_eq!(backend.live_curves(), 1);
    }

    #[test]
    fn test_delete_unknown_curve() {
        let mut backend = RecordingBackend::new();
        assert!(backend.delete(7).is_err());
    }
}

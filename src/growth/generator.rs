use log::{debug, trace, warn};
use rand::Rng;

use super::rng::tree_rng;
use super::segment::{BranchState, SegmentRequest};
use crate::backend::{emit_segment, GeometryBackend, RecordingBackend};
use crate::config::{BranchConfig, StartPose, TreeParams};
use crate::error::Result;
use crate::math::Vec3;

/// Direction perturbations are given in hundredths of a unit
const ANGLE_SCALE: f64 = 100.0;

/// Recursive binary branch generator.
///
/// Every node emits its own segment, then spawns a left and a right child
/// that turn away from the parent by the same base angle with opposite signs.
/// Children are generated depth-first, left subtree before right subtree,
/// and all randomness comes from one stream in that order.
#[derive(Debug, Clone)]
pub struct BranchGenerator {
    config: BranchConfig,
}

impl BranchGenerator {
    pub fn new(config: BranchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BranchConfig {
        &self.config
    }

    /// Grow a whole tree into `backend`, returning how many segments were
    /// emitted. A backend failure aborts the run; segments already emitted
    /// are left in place.
    pub fn generate<R, B>(&self, rng: &mut R, backend: &mut B, start: StartPose) -> Result<usize>
    where
        R: Rng + ?Sized,
        B: GeometryBackend + ?Sized,
    {
        start.validate()?;

        let mut emitted = 0;
        let result = self.grow_branch(rng, backend, BranchState::root(&start), &mut emitted);
        match &result {
            Ok(()) => debug!("tree complete: {} segments", emitted),
            Err(e) => warn!("tree aborted after {} segments: {}", emitted, e),
        }
        result.map(|()| emitted)
    }

    /// Run the algorithm against a recording backend and return the
    /// captured segments in emission order
    pub fn segments<R: Rng + ?Sized>(&self, rng: &mut R, start: StartPose) -> Result<Vec<SegmentRequest>> {
        let mut backend = RecordingBackend::new();
        self.generate(rng, &mut backend, start)?;
        Ok(backend.into_segments())
    }

    fn grow_branch<R, B>(
        &self,
        rng: &mut R,
        backend: &mut B,
        state: BranchState,
        emitted: &mut usize,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
        B: GeometryBackend + ?Sized,
    {
        if state.depth >= self.config.max_depth {
            return Ok(());
        }

        let segment = state.segment();
        trace!(
            "segment depth={} origin={:?} direction={:?} radius={} length={}",
            state.depth, segment.origin, segment.direction, segment.radius, segment.length
        );
        emit_segment(backend, &segment)?;
        *emitted += 1;

        let tip = segment.tip();

        // One sign per axis, shared by the pair
        let signs = [random_sign(rng), random_sign(rng), random_sign(rng)];

        let left = self.spawn_child(rng, &state, tip, signs, 1);
        self.grow_branch(rng, backend, left, emitted)?;

        let right = self.spawn_child(rng, &state, tip, signs, -1);
        self.grow_branch(rng, backend, right, emitted)
    }

    /// Derive one child from its parent. `side` is +1 for the left child and
    /// -1 for the right, flipping the shared per-axis signs.
    fn spawn_child<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        parent: &BranchState,
        tip: Vec3,
        signs: [i32; 3],
        side: i32,
    ) -> BranchState {
        let config = &self.config;
        let mut turn = |sign: i32| {
            let base = sign * side * config.base_angle_deg;
            let jitter = rng.random_range(-config.angle_variance_deg..=config.angle_variance_deg);
            (base + jitter) as f64 / ANGLE_SCALE
        };
        let drift = Vec3::new(turn(signs[0]), turn(signs[1]), turn(signs[2]));

        let length = parent.length * decay_scale(rng, config.length_factor, config.length_variance);
        let radius = parent.radius * decay_scale(rng, config.radius_factor, config.radius_variance);

        BranchState {
            depth: parent.depth + 1,
            origin: tip,
            direction: parent.direction + drift,
            radius,
            length,
        }
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(0..=1) * 2 - 1
}

/// Scale uniformly distributed in `[factor - variance, factor + variance]`
/// on a 0.01 grid, clamped so it never goes negative.
fn decay_scale<R: Rng + ?Sized>(rng: &mut R, factor: f64, variance: f64) -> f64 {
    let steps = (variance * 200.0).round() as i64;
    let offset = rng.random_range(0..=steps) as f64 / 100.0;
    (factor + offset - variance).max(0.0)
}

/// Clamp and normalize raw form parameters, then grow one tree with the
/// reference start pose. `seed` replays a previous run; `None` draws one.
pub fn grow_tree<B>(params: &TreeParams, backend: &mut B, seed: Option<u64>) -> Result<usize>
where
    B: GeometryBackend + ?Sized,
{
    let config = params.clamped().to_config()?;
    let generator = BranchGenerator::new(config)?;
    let (mut rng, seed) = tree_rng(seed);
    debug!("growing tree with {:?}, seed {}", config, seed);
    generator.generate(&mut rng, backend, StartPose::default())
}

//! Velocity history
//!
//! Fixed-capacity ring of recent pointer motion samples used to estimate the
//! throw velocity on release.

use bevy::prelude::*;

/// Number of samples kept unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 6;

/// Smallest time step used for velocity math.
pub const MIN_STEP: f32 = 1e-4;

/// Floor a time step so it can be divided by safely.
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        MIN_STEP
    } else {
        dt.max(MIN_STEP)
    }
}

/// Motion of the pointer over one physics step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub screen_delta: Vec2,
    pub world_delta: Vec3,
    /// Always positive.
    pub dt: f32,
}

impl Default for PointerSample {
    fn default() -> Self {
        Self {
            screen_delta: Vec2::ZERO,
            world_delta: Vec3::ZERO,
            dt: MIN_STEP,
        }
    }
}

impl PointerSample {
    pub fn new(screen_delta: Vec2, world_delta: Vec3, dt: f32) -> Self {
        Self {
            screen_delta,
            world_delta,
            dt: sanitize_dt(dt),
        }
    }

    pub fn world_velocity(&self) -> Vec3 {
        self.world_delta / self.dt
    }

    pub fn screen_velocity(&self) -> Vec2 {
        self.screen_delta / self.dt
    }
}

/// Ring buffer of the last `capacity` samples.
#[derive(Clone, Debug)]
pub struct VelocityHistory {
    samples: Box<[PointerSample]>,
    cursor: usize,
    recorded: usize,
}

impl Default for VelocityHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl VelocityHistory {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![PointerSample::default(); capacity.max(1)].into_boxed_slice(),
            cursor: 0,
            recorded: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Slot the next sample will be written to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of slots holding real samples.
    pub fn len(&self) -> usize {
        self.recorded
    }

    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    pub fn push(&mut self, sample: PointerSample) {
        self.samples[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % self.samples.len();
        self.recorded = (self.recorded + 1).min(self.samples.len());
    }

    pub fn reset(&mut self) {
        self.samples.fill(PointerSample::default());
        self.cursor = 0;
        self.recorded = 0;
    }

    /// Mean world and screen velocity over every slot.
    ///
    /// Slots that were never written count as zero, so the estimate is pulled
    /// toward zero until the ring has filled once.
    pub fn average(&self) -> (Vec3, Vec2) {
        let (world, screen) = self
            .samples
            .iter()
            .fold((Vec3::ZERO, Vec2::ZERO), |(w, s), sample| {
                (w + sample.world_velocity(), s + sample.screen_velocity())
            });
        let n = self.samples.len() as f32;
        (world / n, screen / n)
    }
}

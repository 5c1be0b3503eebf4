use foundation::math::Easing;
use foundation::{Millis, Viewpoint};

const TWEEN_EASING: Easing = Easing::InOutQuad;

/// One in-flight camera transition between two poses.
///
/// The start time is pinned by the first [`sample`](Self::sample) call,
/// so a tween created mid-frame begins on the next tick. Longitude
/// interpolates numerically, without wrapping across the antimeridian.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewpointTween {
    start: Viewpoint,
    target: Viewpoint,
    duration_ms: f64,
    started_at: Option<Millis>,
}

impl ViewpointTween {
    pub fn new(start: Viewpoint, target: Viewpoint, duration_ms: f64) -> Self {
        Self {
            start,
            target,
            duration_ms,
            started_at: None,
        }
    }

    /// Pose at `now`, and whether the tween has reached its target.
    ///
    /// A finished tween reports the exact target pose, never an eased
    /// approximation of it.
    pub fn sample(&mut self, now: Millis) -> (Viewpoint, bool) {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.since(started_at);
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            return (self.target, true);
        }
        let t = TWEEN_EASING.apply(elapsed / self.duration_ms);
        let pose = Viewpoint::new(
            lerp(self.start.lat_deg, self.target.lat_deg, t),
            lerp(self.start.lon_deg, self.target.lon_deg, t),
            lerp(self.start.altitude, self.target.altitude, t),
        );
        (pose, false)
    }
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Token identifying one camera flight. Cancelling with a handle from a
/// superseded flight does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenHandle {
    generation: u64,
}

/// Owns at most one active tween and advances it on external ticks.
#[derive(Debug, Default)]
pub struct CameraAnimator {
    tween: Option<ViewpointTween>,
    generation: u64,
}

impl CameraAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a flight from `start` to `target`, replacing any active one.
    pub fn animate_to(
        &mut self,
        start: Viewpoint,
        target: Viewpoint,
        duration_ms: f64,
    ) -> TweenHandle {
        self.generation += 1;
        self.tween = Some(ViewpointTween::new(start, target, duration_ms));
        TweenHandle {
            generation: self.generation,
        }
    }

    pub fn cancel(&mut self, handle: TweenHandle) {
        if handle.generation == self.generation {
            self.tween = None;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance the active flight to `now`.
    ///
    /// Returns the pose to apply this tick, or `None` when idle. The
    /// finishing tick returns the exact target and clears the flight.
    pub fn tick(&mut self, now: Millis) -> Option<Viewpoint> {
        let tween = self.tween.as_mut()?;
        let (pose, done) = tween.sample(now);
        if done {
            self.tween = None;
        }
        Some(pose)
    }
}

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::primitive::{Path, Primitive, PrimitiveId};

#[derive(Debug, Clone)]
struct Track {
    from: Path,
    to: Path,
    start: Instant,
    duration: Duration,
}

impl Track {
    fn settled(path: Path, now: Instant) -> Self {
        Self { from: path.clone(), to: path, start: now, duration: Duration::ZERO }
    }

    fn sample(&self, now: Instant) -> Path {
        let elapsed = now.saturating_duration_since(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to.clone();
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from.lerp(&self.to, t)
    }
}

/// Host-side interpolation of primitive paths.
///
/// When a primitive's path changes, the displayed geometry glides from where it
/// currently is to the new target over the primitive's transition duration. A change
/// in vertex count cannot be interpolated and snaps.
#[derive(Debug, Default)]
pub struct PathAnimator {
    tracks: HashMap<PrimitiveId, Track>,
}

impl PathAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path to display for `primitive` at `now`.
    pub fn sample(&mut self, primitive: &Primitive, now: Instant) -> Path {
        let target = primitive.path();

        let Some(track) = self.tracks.get_mut(&primitive.id()) else {
            self.tracks.insert(primitive.id(), Track::settled(target.clone(), now));
            return target.clone();
        };

        if &track.to != target {
            let shown = track.sample(now);
            let duration = primitive
                .style()
                .transition
                .map_or(Duration::ZERO, |t| t.duration);

            *track = if shown.len() == target.len() && !shown.is_empty() {
                Track { from: shown, to: target.clone(), start: now, duration }
            } else {
                Track::settled(target.clone(), now)
            };
        }

        track.sample(now)
    }

    /// Drops tracks whose primitive is no longer alive.
    pub fn retain<F>(&mut self, mut alive: F)
    where
        F: FnMut(PrimitiveId) -> bool,
    {
        self.tracks.retain(|id, _| alive(*id));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

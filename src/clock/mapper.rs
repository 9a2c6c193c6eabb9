//! Continuous-time angular mapping for the 60-marker seconds ring.
//!
//! Everything here is a pure function of its inputs. The widgets call into
//! this module once per frame to place markers on the circle and to decide
//! how strongly each marker is emphasized.

use std::f64::consts::PI;

/// Number of second markers on the ring.
pub const MARKER_COUNT: u32 = 60;

// Full turns of cumulative rotation kept before the offset is folded back.
// Folding by whole turns is invisible to rendering.
const OFFSET_FOLD_TURNS: f64 = 1024.0;

/// Fractional seconds-of-minute in [0, 60).
pub fn continuous_time(second: u32, millisecond: u32) -> f64 {
    f64::from(second) + f64::from(millisecond) / 1000.0
}

/// Angle in radians for a position on the ring, with 0 seconds at 12 o'clock.
///
/// `t` is a continuous time (or a marker index as f64); the mapping is linear
/// onto a full circle, offset by -90° so the top of the ring is zero.
pub fn marker_angle(t: f64, marker_count: u32) -> f64 {
    let count = marker_count.max(1);
    let degrees = t * (360.0 / f64::from(count)) - 90.0;
    degrees * PI / 180.0
}

/// Shortest distance between two ring positions, going around either way.
///
/// Handles the wraparound boundary: the distance between 59.9 and 0.1 is
/// 0.2, not 59.8. Result is always in [0, marker_count / 2].
pub fn circular_distance(a: f64, b: f64, marker_count: u32) -> f64 {
    let count = f64::from(marker_count.max(1));
    let d = (a - b).abs();
    d.min(count - d)
}

/// Normalized [0, 1] emphasis for a marker at the given circular distance.
///
/// Exactly 1 at distance 0, decays to exactly 0 at `influence_radius`, zero
/// beyond it. A zero or negative radius means no influence at all; we never
/// divide by it.
pub fn proximity(distance: f64, influence_radius: f64) -> f64 {
    if influence_radius <= 0.0 || distance >= influence_radius {
        return 0.0;
    }
    let x = 1.0 - distance / influence_radius;
    smoothstep(x)
}

// Cubic smoothstep on [0, 1]. Chosen over a linear ramp so marker emphasis
// eases in and out instead of kinking at the influence boundary.
fn smoothstep(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Tracks a cumulative rotation offset so an indicator driven by the ring
/// never snaps backward at the 60 -> 0 wraparound.
///
/// Owned by a single animation driver and fed one continuous-time sample per
/// frame. A fresh tracker (or one that has been `reset`) starts from whatever
/// sample it sees next, so a stopped and restarted driver resumes cleanly.
#[derive(Debug, Default)]
pub struct RotationTracker {
    last_time: Option<f64>,
    offset_degrees: f64,
}

impl RotationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next continuous-time sample and get the displayed angle in
    /// degrees, continuous across the minute boundary.
    pub fn displayed_degrees(&mut self, t: f64) -> f64 {
        if let Some(last) = self.last_time {
            let delta = t - last;
            if delta < -30.0 {
                // Wrapped forward from ~59 to ~0
                self.offset_degrees += 360.0;
            } else if delta > 30.0 {
                // Spurious backward jump across the boundary
                self.offset_degrees -= 360.0;
            }
        }
        self.last_time = Some(t);

        // Fold whole turns back so the offset stays bounded on long runs.
        if self.offset_degrees.abs() > 360.0 * OFFSET_FOLD_TURNS {
            self.offset_degrees %= 360.0;
        }

        t * (360.0 / f64::from(MARKER_COUNT)) - 90.0 + self.offset_degrees
    }

    /// Forget all accumulated state. The next sample starts a new run.
    pub fn reset(&mut self) {
        self.last_time = None;
        self.offset_degrees = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn continuous_time_adds_fraction() {
        assert!((continuous_time(30, 500) - 30.5).abs() < EPS);
        assert!((continuous_time(0, 0) - 0.0).abs() < EPS);
        assert!((continuous_time(59, 999) - 59.999).abs() < EPS);
    }

    #[test]
    fn angle_at_half_minute_is_93_degrees() {
        // End-to-end: (seconds=30, ms=500) -> 30.5 -> 30.5 * 6 - 90 = 93°
        let t = continuous_time(30, 500);
        let expected = 93.0_f64.to_radians();
        assert!((marker_angle(t, MARKER_COUNT) - expected).abs() < EPS);
    }

    #[test]
    fn angle_zero_is_top_of_ring() {
        assert!((marker_angle(0.0, MARKER_COUNT) + PI / 2.0).abs() < EPS);
    }

    #[test]
    fn angle_wraps_by_full_turn() {
        let a0 = marker_angle(0.0, MARKER_COUNT);
        let a60 = marker_angle(60.0, MARKER_COUNT);
        assert!((a60 - a0 - 2.0 * PI).abs() < EPS);
    }

    #[test]
    fn angle_is_monotone_within_a_minute() {
        let mut prev = marker_angle(0.0, MARKER_COUNT);
        let mut t = 0.1;
        while t < 60.0 {
            let a = marker_angle(t, MARKER_COUNT);
            assert!(a > prev);
            prev = a;
            t += 0.1;
        }
    }

    #[test]
    fn distance_is_symmetric_and_bounded() {
        let mut t = 0.0;
        while t < 60.0 {
            for i in 0..MARKER_COUNT {
                let i = f64::from(i);
                let d = circular_distance(t, i, MARKER_COUNT);
                let d_rev = circular_distance(i, t, MARKER_COUNT);
                assert!((d - d_rev).abs() < EPS);
                assert!(d >= 0.0 && d <= 30.0 + EPS);
            }
            t += 0.7;
        }
    }

    #[test]
    fn distance_handles_wraparound() {
        assert!((circular_distance(59.9, 0.1, MARKER_COUNT) - 0.2).abs() < 1e-6);
        assert!((circular_distance(0.1, 59.9, MARKER_COUNT) - 0.2).abs() < 1e-6);
        assert!((circular_distance(59.0, 1.0, MARKER_COUNT) - 2.0).abs() < EPS);
    }

    #[test]
    fn proximity_endpoints_are_exact() {
        for r in [0.5, 1.0, 2.5, 10.0] {
            assert_eq!(proximity(0.0, r), 1.0);
            assert_eq!(proximity(r, r), 0.0);
            assert_eq!(proximity(r + 1.0, r), 0.0);
        }
    }

    #[test]
    fn proximity_is_monotone_in_distance() {
        let r = 2.5;
        let mut prev = proximity(0.0, r);
        let mut d = 0.05;
        while d <= r {
            let p = proximity(d, r);
            assert!(p <= prev + EPS);
            assert!((0.0..=1.0).contains(&p));
            prev = p;
            d += 0.05;
        }
    }

    #[test]
    fn zero_or_negative_radius_means_no_influence() {
        assert_eq!(proximity(0.0, 0.0), 0.0);
        assert_eq!(proximity(1.0, 0.0), 0.0);
        assert_eq!(proximity(0.0, -2.0), 0.0);
    }

    #[test]
    fn degenerate_marker_count_does_not_divide_by_zero() {
        assert!(marker_angle(0.5, 0).is_finite());
        assert!(circular_distance(0.2, 0.9, 0).is_finite());
    }

    #[test]
    fn tracker_keeps_angle_increasing_across_wrap() {
        let mut tracker = RotationTracker::new();
        let samples = [59.0, 59.5, 0.1, 0.6];
        let mut prev = f64::NEG_INFINITY;
        for t in samples {
            let angle = tracker.displayed_degrees(t);
            assert!(angle > prev, "angle went backward at t={t}");
            prev = angle;
        }
    }

    #[test]
    fn tracker_compensates_backward_jump() {
        let mut tracker = RotationTracker::new();
        let a = tracker.displayed_degrees(0.5);
        // Clock read jumped backward across the boundary
        let b = tracker.displayed_degrees(59.5);
        assert!(b < a);
        assert!((a - b - 6.0).abs() < EPS); // one second of arc, not a full turn
    }

    #[test]
    fn tracker_reset_forgets_offset() {
        let mut tracker = RotationTracker::new();
        tracker.displayed_degrees(59.5);
        tracker.displayed_degrees(0.1); // offset now +360
        tracker.reset();
        let angle = tracker.displayed_degrees(0.1);
        assert!((angle - (0.1 * 6.0 - 90.0)).abs() < EPS);
    }
}

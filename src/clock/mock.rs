//! Accelerated synthetic clock for visual testing.
//!
//! With the `mock_clock` feature the app runs at 60x speed, so a full trip
//! around the seconds ring takes one real second and the minute wraparound
//! can be checked by eye without waiting.

use std::sync::OnceLock;
use std::time::Instant;

use super::ClockSample;

const SPEEDUP: f64 = 60.0;

fn start() -> Instant {
    static START: OnceLock<Instant> = OnceLock::new();
    *START.get_or_init(Instant::now)
}

pub fn sample() -> ClockSample {
    let elapsed = start().elapsed().as_secs_f64() * SPEEDUP;
    let total_ms = (elapsed * 1000.0) as u64;
    let total_seconds = total_ms / 1000;
    ClockSample {
        hour: ((total_seconds / 3600) % 24) as u32,
        minute: ((total_seconds / 60) % 60) as u32,
        second: (total_seconds % 60) as u32,
        millisecond: (total_ms % 1000) as u32,
    }
}

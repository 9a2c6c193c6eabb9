use chrono::{DateTime, Local, Timelike, Utc};
use chrono_tz::Tz;
use log::warn;

use crate::logging::CLOCK_NAMESPACE;

pub mod mapper;

#[cfg(feature = "mock_clock")]
pub mod mock;

/// One wall-clock read, reduced to the fields the clock face needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSample {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl ClockSample {
    fn from_datetime<T: chrono::TimeZone>(dt: DateTime<T>) -> Self {
        Self {
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            // Leap-second representation can push this past 999; clamp so
            // continuous time stays in [0, 60).
            millisecond: (dt.timestamp_subsec_millis()).min(999),
        }
    }

    /// Fractional seconds-of-minute, the input to the angular mapper.
    pub fn continuous_time(&self) -> f64 {
        mapper::continuous_time(self.second, self.millisecond)
    }
}

/// Resolves the settings timezone string and samples the system clock.
///
/// `"local"` uses the machine timezone; anything else is treated as an IANA
/// name. An unrecognized name falls back to local time and warns once rather
/// than failing, the clock must keep ticking.
pub struct ClockSource {
    zone: Option<Tz>,
    zone_name: String,
    warned_bad_zone: bool,
}

impl ClockSource {
    pub fn new(time_zone: &str) -> Self {
        let mut source = Self {
            zone: None,
            zone_name: String::new(),
            warned_bad_zone: false,
        };
        source.set_time_zone(time_zone);
        source
    }

    pub fn set_time_zone(&mut self, time_zone: &str) {
        if time_zone == self.zone_name {
            return;
        }
        self.zone_name = time_zone.to_string();
        self.warned_bad_zone = false;
        self.zone = if time_zone == "local" {
            None
        } else {
            match time_zone.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(_) => {
                    self.warned_bad_zone = true;
                    warn!(
                        target: CLOCK_NAMESPACE,
                        "Unknown time zone '{}', falling back to local time", time_zone
                    );
                    None
                }
            }
        };
    }

    /// Sample the clock. Passthrough policy: one read per frame, no
    /// averaging or velocity blending of successive samples.
    #[cfg(not(feature = "mock_clock"))]
    pub fn sample(&self) -> ClockSample {
        match self.zone {
            Some(tz) => ClockSample::from_datetime(Utc::now().with_timezone(&tz)),
            None => ClockSample::from_datetime(Local::now()),
        }
    }

    /// Sample the accelerated synthetic clock instead of the wall clock.
    #[cfg(feature = "mock_clock")]
    pub fn sample(&self) -> ClockSample {
        mock::sample()
    }
}

/// Format the HH:MM part of the readout. The AM/PM tag in 12-hour mode is
/// drawn separately by the time widget.
pub fn format_time(sample: &ClockSample, is_24_hour: bool) -> String {
    if is_24_hour {
        format!("{:02}:{:02}", sample.hour, sample.minute)
    } else {
        let display_hours = match sample.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02}", display_hours, sample.minute)
    }
}

/// True in the AM half of the day; only meaningful for 12-hour display.
pub fn is_am(sample: &ClockSample) -> bool {
    sample.hour < 12
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hour: u32, minute: u32) -> ClockSample {
        ClockSample {
            hour,
            minute,
            second: 0,
            millisecond: 0,
        }
    }

    #[test]
    fn formats_24_hour_zero_padded() {
        assert_eq!(format_time(&sample(9, 5), true), "09:05");
        assert_eq!(format_time(&sample(0, 0), true), "00:00");
        assert_eq!(format_time(&sample(23, 59), true), "23:59");
    }

    #[test]
    fn formats_12_hour_with_midnight_and_noon() {
        assert_eq!(format_time(&sample(0, 30), false), "12:30");
        assert_eq!(format_time(&sample(12, 0), false), "12:00");
        assert_eq!(format_time(&sample(13, 7), false), "1:07");
        assert_eq!(format_time(&sample(9, 5), false), "9:05");
    }

    #[test]
    fn am_pm_split() {
        assert!(is_am(&sample(0, 0)));
        assert!(is_am(&sample(11, 59)));
        assert!(!is_am(&sample(12, 0)));
        assert!(!is_am(&sample(23, 0)));
    }

    #[test]
    fn continuous_time_from_sample() {
        let s = ClockSample {
            hour: 10,
            minute: 4,
            second: 30,
            millisecond: 500,
        };
        assert!((s.continuous_time() - 30.5).abs() < 1e-9);
    }

    #[test]
    fn bad_zone_falls_back_to_local() {
        let source = ClockSource::new("Not/AZone");
        assert!(source.zone.is_none());
        assert!(source.warned_bad_zone);
    }

    #[test]
    fn known_zone_is_parsed() {
        let source = ClockSource::new("Europe/Paris");
        assert!(source.zone.is_some());
    }

    #[test]
    fn zone_change_is_applied() {
        let mut source = ClockSource::new("local");
        assert!(source.zone.is_none());
        source.set_time_zone("America/New_York");
        assert!(source.zone.is_some());
        source.set_time_zone("local");
        assert!(source.zone.is_none());
    }
}

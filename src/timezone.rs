//! Coordinate to IANA timezone lookup.

use chrono_tz::Tz;
use thiserror::Error;
use tzf_rs::DefaultFinder;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimezoneError {
    #[error("no timezone found at {latitude}, {longitude}")]
    NotFound { latitude: f64, longitude: f64 },

    #[error("unknown timezone identifier {0:?}")]
    UnknownZone(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait TimezoneResolver: Send + Sync {
    fn resolve(&self, latitude: f64, longitude: f64) -> Result<Tz, TimezoneError>;
}

/// [`TimezoneResolver`] over the timezone boundary polygons bundled with `tzf-rs`.
///
/// Building the finder decodes the whole boundary set, so one instance should be
/// shared for the lifetime of the process.
pub struct TzfResolver {
    finder: DefaultFinder,
}

impl TzfResolver {
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for TzfResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneResolver for TzfResolver {
    fn resolve(&self, latitude: f64, longitude: f64) -> Result<Tz, TimezoneError> {
        // tzf-rs takes (longitude, latitude)
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() {
            return Err(TimezoneError::NotFound { latitude, longitude });
        }

        name.parse::<Tz>()
            .map_err(|_| TimezoneError::UnknownZone(name.to_string()))
    }
}

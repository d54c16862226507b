//! Sunrise, solar noon and sunset for a calendar day at a point on Earth.
//!
//! The computation itself is NREL's SPA as implemented by the `solar-positioning`
//! crate. This module only decides which day is meant and folds the polar cases
//! into errors so callers never see a half-filled result.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use solar_positioning::{spa, time::DeltaT, Horizon, SunriseResult};
use thiserror::Error;

/// UTC instants of the three sun events of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunEvents {
    pub sunrise: DateTime<Utc>,
    pub noon: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolarError {
    #[error("the sun does not set on {0}")]
    PolarDay(NaiveDate),

    #[error("the sun does not rise on {0}")]
    PolarNight(NaiveDate),

    #[error("not every sun event happens on {0}")]
    IncompleteDay(NaiveDate),

    #[error("date {0} is outside the supported range")]
    DateOutOfRange(NaiveDate),

    #[error("solar calculation failed: {0}")]
    Calculation(String),
}

/// Sun events for a local calendar date: `date` is a day on the wall clock of `tz`.
#[cfg_attr(test, mockall::automock)]
pub trait SolarCalculator: Send + Sync {
    /// Sunrise, solar noon and sunset that fall on `date` in `tz`.
    fn sun_events(&self, date: NaiveDate, tz: Tz, latitude: f64, longitude: f64) -> Result<SunEvents, SolarError>;

    /// Solar noon falling on `date` in `tz`. Defined even when the sun never rises or never sets.
    fn solar_noon(&self, date: NaiveDate, tz: Tz, latitude: f64, longitude: f64) -> Result<DateTime<Utc>, SolarError>;
}

/// [`SolarCalculator`] backed by the SPA algorithm.
///
/// SPA works on UTC days. A local day overlaps up to three of them, so each
/// event is taken from whichever of those UTC days puts it on the local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaCalculator;

impl SpaCalculator {
    pub fn new() -> Self {
        Self
    }

    fn utc_day(&self, date: NaiveDate, latitude: f64, longitude: f64) -> Result<SunriseResult<DateTime<Utc>>, SolarError> {
        let day_start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let delta_t = DeltaT::estimate_from_date_like(date).map_err(|_| SolarError::DateOutOfRange(date))?;

        spa::sunrise_sunset_for_horizon(day_start, latitude, longitude, delta_t, Horizon::SunriseSunset)
            .map_err(|e| SolarError::Calculation(e.to_string()))
    }

    /// Results of the UTC days before, on and after `date`.
    fn surrounding_days(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<SunriseResult<DateTime<Utc>>>, SolarError> {
        (-1..=1)
            .map(|offset| {
                let day = date
                    .checked_add_signed(Duration::days(offset))
                    .ok_or(SolarError::DateOutOfRange(date))?;
                self.utc_day(day, latitude, longitude)
            })
            .collect()
    }
}

impl SolarCalculator for SpaCalculator {
    fn sun_events(&self, date: NaiveDate, tz: Tz, latitude: f64, longitude: f64) -> Result<SunEvents, SolarError> {
        let on_date = |t: &DateTime<Utc>| t.with_timezone(&tz).date_naive() == date;
        let days = self.surrounding_days(date, latitude, longitude)?;

        let (mut sunrise, mut noon, mut sunset) = (None, None, None);
        for day in &days {
            match day {
                SunriseResult::RegularDay {
                    sunrise: rise,
                    transit,
                    sunset: set,
                } => {
                    sunrise = sunrise.or(Some(*rise).filter(on_date));
                    noon = noon.or(Some(*transit).filter(on_date));
                    sunset = sunset.or(Some(*set).filter(on_date));
                }
                SunriseResult::AllDay { transit } if on_date(transit) => return Err(SolarError::PolarDay(date)),
                SunriseResult::AllNight { transit } if on_date(transit) => {
                    return Err(SolarError::PolarNight(date))
                }
                _ => {}
            }
        }

        match (sunrise, noon, sunset) {
            (Some(sunrise), Some(noon), Some(sunset)) => Ok(SunEvents { sunrise, noon, sunset }),
            _ => Err(SolarError::IncompleteDay(date)),
        }
    }

    fn solar_noon(&self, date: NaiveDate, tz: Tz, latitude: f64, longitude: f64) -> Result<DateTime<Utc>, SolarError> {
        self.surrounding_days(date, latitude, longitude)?
            .iter()
            .map(|day| *day.transit())
            .find(|transit| transit.with_timezone(&tz).date_naive() == date)
            .ok_or(SolarError::IncompleteDay(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::{America, Arctic, Pacific};

    const SAO_PAULO: (f64, f64) = (-23.55, -46.63);
    const LONGYEARBYEN: (f64, f64) = (78.22, 15.65);
    const APIA: (f64, f64) = (-13.83, -171.76);
    const NUKUALOFA: (f64, f64) = (-21.14, -175.2);

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn events_are_ordered_within_the_day() {
        let (lat, lon) = SAO_PAULO;
        let events = SpaCalculator::new().sun_events(day(2024, 6, 21), America::Sao_Paulo, lat, lon).unwrap();

        assert!(events.sunrise < events.noon);
        assert!(events.noon < events.sunset);
        // June days in São Paulo last a bit under eleven hours.
        let length = events.sunset - events.sunrise;
        assert!(length > Duration::hours(10) && length < Duration::hours(11), "{length}");
    }

    #[test]
    fn noon_follows_longitude() {
        let (lat, lon) = SAO_PAULO;
        let noon = SpaCalculator::new()
            .solar_noon(day(2024, 6, 21), America::Sao_Paulo, lat, lon)
            .unwrap();

        // 46.63° west puts mean noon near 15:06 UTC.
        assert_eq!(noon.date_naive(), day(2024, 6, 21));
        assert_eq!(noon.hour(), 15);
        assert!(noon.minute() < 15, "{noon}");
    }

    #[test]
    fn noon_matches_event_transit() {
        let calc = SpaCalculator::new();
        let (lat, lon) = SAO_PAULO;
        let date = day(2025, 3, 1);

        let events = calc.sun_events(date, America::Sao_Paulo, lat, lon).unwrap();
        assert_eq!(calc.solar_noon(date, America::Sao_Paulo, lat, lon).unwrap(), events.noon);
    }

    #[test]
    fn polar_cases_are_distinguished() {
        let calc = SpaCalculator::new();
        let (lat, lon) = LONGYEARBYEN;

        assert_eq!(
            calc.sun_events(day(2023, 12, 21), Arctic::Longyearbyen, lat, lon),
            Err(SolarError::PolarNight(day(2023, 12, 21)))
        );
        assert_eq!(
            calc.sun_events(day(2024, 6, 21), Arctic::Longyearbyen, lat, lon),
            Err(SolarError::PolarDay(day(2024, 6, 21)))
        );
        assert!(calc.solar_noon(day(2023, 12, 21), Arctic::Longyearbyen, lat, lon).is_ok());
    }

    fn assert_events_on_local_date(tz: Tz, (lat, lon): (f64, f64), date: NaiveDate) {
        let events = SpaCalculator::new().sun_events(date, tz, lat, lon).unwrap();
        for (name, instant) in [("sunrise", events.sunrise), ("noon", events.noon), ("sunset", events.sunset)] {
            assert_eq!(instant.with_timezone(&tz).date_naive(), date, "{name} {instant} in {tz}");
        }
        assert!(events.sunrise < events.noon && events.noon < events.sunset);
        assert_eq!(events.noon.with_timezone(&tz).hour(), 12, "noon {} in {tz}", events.noon);
    }

    #[test]
    fn events_fall_on_the_local_date_far_east() {
        // UTC+13: a UTC day would hand back the next local day's sunrise and noon.
        assert_events_on_local_date(Pacific::Apia, APIA, day(2024, 6, 21));
        assert_events_on_local_date(Pacific::Tongatapu, NUKUALOFA, day(2024, 6, 21));
        assert_events_on_local_date(Pacific::Tongatapu, NUKUALOFA, day(2024, 12, 31));
    }

    #[test]
    fn events_fall_on_the_local_date_west() {
        assert_events_on_local_date(America::Sao_Paulo, SAO_PAULO, day(2024, 6, 21));
        assert_events_on_local_date(America::Sao_Paulo, SAO_PAULO, day(2024, 1, 1));
    }

    #[test]
    fn noon_of_previous_day_lands_before_midnight_far_east() {
        let (lat, lon) = APIA;
        let noon = SpaCalculator::new()
            .solar_noon(day(2024, 6, 20), Pacific::Apia, lat, lon)
            .unwrap()
            .with_timezone(&Pacific::Apia);
        assert_eq!(noon.date_naive(), day(2024, 6, 20));
        assert_eq!(noon.hour(), 12);
    }
}

//! Solar report tables: the four moments of a day in the local time of a point.

use std::sync::Arc;

use chrono::{DateTime, Duration, Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use teloxide::utils::html;
use thiserror::Error;

use crate::solar::{SolarCalculator, SolarError};
use crate::timezone::{TimezoneError, TimezoneResolver};

const ERA_SUFFIX: &str = "e.v.";
const MOMENT_HEADER: &str = "Momento";
const TIME_HEADER: &str = "Horário";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error(transparent)]
    Timezone(#[from] TimezoneError),

    #[error(transparent)]
    Solar(#[from] SolarError),

    #[error("date {0} is outside the supported range")]
    DateOutOfRange(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    Midnight,
    Sunrise,
    Noon,
    Sunset,
}

impl Moment {
    pub fn label(self) -> &'static str {
        match self {
            Moment::Midnight => "Meia noite",
            Moment::Sunrise => "Nascer do sol",
            Moment::Noon => "Meio dia",
            Moment::Sunset => "Pôr do sol",
        }
    }
}

/// The four moments of one date, already in the local time of the location.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarReport {
    pub date: NaiveDate,
    pub timezone: Tz,
    pub moments: [(Moment, DateTime<Tz>); 4],
}

impl SolarReport {
    /// Renders the report as an HTML `<pre>` block.
    pub fn render(&self, locale: Locale) -> String {
        let title = format!(
            "{} {}",
            Utc.from_utc_datetime(&self.date.and_time(NaiveTime::MIN))
                .format_localized("%x", locale),
            ERA_SUFFIX
        );
        let rows: Vec<(&str, String)> = self
            .moments
            .iter()
            .map(|(moment, time)| (moment.label(), time.format("%H:%M:%S").to_string()))
            .collect();

        format!("<pre>{}</pre>", html::escape(&draw_table(&title, &rows)))
    }
}

/// Builds [`SolarReport`]s from the two external lookups.
#[derive(Clone)]
pub struct ReportFormatter {
    solar: Arc<dyn SolarCalculator>,
    timezones: Arc<dyn TimezoneResolver>,
    locale: Locale,
}

impl ReportFormatter {
    pub fn new(solar: Arc<dyn SolarCalculator>, timezones: Arc<dyn TimezoneResolver>, locale: Locale) -> Self {
        Self {
            solar,
            timezones,
            locale,
        }
    }

    /// Calendar date at the location at instant `now`.
    pub fn local_today(&self, latitude: f64, longitude: f64, now: DateTime<Utc>) -> Result<NaiveDate, ReportError> {
        let tz = self.timezones.resolve(latitude, longitude)?;
        Ok(now.with_timezone(&tz).date_naive())
    }

    pub fn report(&self, latitude: f64, longitude: f64, date: NaiveDate) -> Result<SolarReport, ReportError> {
        let tz = self.timezones.resolve(latitude, longitude)?;
        let events = self.solar.sun_events(date, tz, latitude, longitude)?;

        let previous = date.pred_opt().ok_or(ReportError::DateOutOfRange(date))?;
        let previous_noon = self.solar.solar_noon(previous, tz, latitude, longitude)?;
        let midnight = previous_noon.with_timezone(&tz) + Duration::hours(12);

        Ok(SolarReport {
            date,
            timezone: tz,
            moments: [
                (Moment::Midnight, midnight),
                (Moment::Sunrise, events.sunrise.with_timezone(&tz)),
                (Moment::Noon, events.noon.with_timezone(&tz)),
                (Moment::Sunset, events.sunset.with_timezone(&tz)),
            ],
        })
    }

    /// Rendered reports for every date, concatenated in the given order.
    ///
    /// Stops at the first date that cannot be computed; no partial output is returned.
    pub fn render_dates(&self, latitude: f64, longitude: f64, dates: &[NaiveDate]) -> Result<String, ReportError> {
        dates.iter().try_fold(String::new(), |mut out, &date| {
            let report = self.report(latitude, longitude, date)?;
            out.push_str(&report.render(self.locale));
            Ok(out)
        })
    }
}

fn draw_table(title: &str, rows: &[(&str, String)]) -> String {
    let width = |s: &str| s.chars().count();

    let mut left = rows.iter().map(|(label, _)| width(label)).fold(width(MOMENT_HEADER), usize::max);
    let right = rows.iter().map(|(_, time)| width(time)).fold(width(TIME_HEADER), usize::max);
    // "| " + left + " | " + right + " |" minus the two outer bars
    let inner = left + right + 5;
    if width(title) + 2 > inner {
        left += width(title) + 2 - inner;
    }
    let inner = left + right + 5;

    let full_rule = format!("+{}+", "-".repeat(inner));
    let split_rule = format!("+{}+{}+", "-".repeat(left + 2), "-".repeat(right + 2));

    let mut lines = vec![
        full_rule,
        format!("|{title:^inner$}|"),
        split_rule.clone(),
        format!("| {MOMENT_HEADER:<left$} | {TIME_HEADER:^right$} |"),
        split_rule.clone(),
    ];
    for (label, time) in rows {
        lines.push(format!("| {label:<left$} | {time:^right$} |"));
    }
    lines.push(split_rule);

    lines.join("\n")
}

use chrono::{Duration, NaiveDate};
use std::fmt;
use thiserror::Error;

/// Range of days the user asked a report for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySelection {
    Today,
    Tomorrow,
    Week,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized day choice: {0:?}")]
pub struct DaySelectionError(pub String);

impl DaySelection {
    pub const ALL: [DaySelection; 3] = [DaySelection::Today, DaySelection::Tomorrow, DaySelection::Week];

    /// Keyboard label, also the text the user sends back.
    pub fn label(self) -> &'static str {
        match self {
            DaySelection::Today => "Hoje",
            DaySelection::Tomorrow => "Amanhã",
            DaySelection::Week => "Semana",
        }
    }

    pub fn offset_count(self) -> u32 {
        match self {
            DaySelection::Today => 0,
            DaySelection::Tomorrow => 1,
            DaySelection::Week => 7,
        }
    }

    /// Case-insensitive match against the three labels.
    pub fn parse(text: &str) -> Result<Self, DaySelectionError> {
        let wanted = text.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|choice| choice.label().to_lowercase() == wanted)
            .ok_or_else(|| DaySelectionError(text.to_string()))
    }

    /// Dates to report on, ascending.
    ///
    /// A count of 0 or 1 yields the single day `today + count`; a larger count N
    /// yields `today + 1 ..= today + N`.
    pub fn target_dates(self, today: NaiveDate) -> Vec<NaiveDate> {
        let count = i64::from(self.offset_count());
        if count <= 1 {
            vec![today + Duration::days(count)]
        } else {
            (1..=count).map(|i| today + Duration::days(i)).collect()
        }
    }
}

impl fmt::Display for DaySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn offset_counts_match_labels() {
        assert_eq!(DaySelection::parse("Hoje").unwrap().offset_count(), 0);
        assert_eq!(DaySelection::parse("Amanhã").unwrap().offset_count(), 1);
        assert_eq!(DaySelection::parse("Semana").unwrap().offset_count(), 7);
    }

    #[test]
    fn displays_as_its_label() {
        assert_eq!(DaySelection::Tomorrow.to_string(), "Amanhã");
        assert_eq!(format!("{}", DaySelection::Week), DaySelection::Week.label());
    }

    #[test]
    fn parse_ignores_case_and_padding() {
        assert_eq!(DaySelection::parse("  AMANHÃ ").unwrap(), DaySelection::Tomorrow);
        assert_eq!(DaySelection::parse("semana").unwrap(), DaySelection::Week);
        assert_eq!(DaySelection::parse("hOjE").unwrap(), DaySelection::Today);
    }

    #[test]
    fn parse_rejects_other_text() {
        assert!(DaySelection::parse("amanha").is_err());
        assert!(DaySelection::parse("").is_err());
        assert!(DaySelection::parse("Hoje e amanhã").is_err());
    }

    #[test]
    fn single_day_selections() {
        let today = day(2024, 12, 31);
        assert_eq!(DaySelection::Today.target_dates(today), vec![today]);
        assert_eq!(DaySelection::Tomorrow.target_dates(today), vec![day(2025, 1, 1)]);
    }

    #[test]
    fn week_starts_tomorrow() {
        let dates = DaySelection::Week.target_dates(day(2024, 2, 26));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], day(2024, 2, 27));
        assert_eq!(dates[2], day(2024, 2, 29));
        assert_eq!(dates[6], day(2024, 3, 4));
    }
}

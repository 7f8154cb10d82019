use crate::date::civil_to_timestamp_millis;
use crate::shared::entity::{Entity, ID};
use chrono::{Days, Months, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A `Reminder` is a point in (civil) time at which the owner of a `Note`
/// should be notified about it. A `Note` has at most one `Reminder`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `Note` this `Reminder` belongs to
    pub note_id: ID,
    /// Wall-clock time in the configured reminder timezone
    pub reminder_time: NaiveDateTime,
    pub recurring: bool,
    /// Only meaningful when `recurring` is set. A recurring `Reminder`
    /// without a `Frequency` fires once and is then left unarmed.
    pub frequency: Option<Frequency>,
}

impl Reminder {
    pub fn new(note_id: ID, reminder_time: NaiveDateTime) -> Self {
        Self {
            id: Default::default(),
            note_id,
            reminder_time,
            recurring: false,
            frequency: None,
        }
    }

    /// The `Frequency` the reminder repeats with, if it repeats at all
    pub fn recurrence(&self) -> Option<Frequency> {
        if self.recurring {
            self.frequency
        } else {
            None
        }
    }

    /// Finds the first occurrence strictly after `now_millis`, counted from
    /// `reminder_time`. Returns the occurrence index together with its time.
    ///
    /// Non recurring reminders only have the occurrence at index 0.
    pub fn next_occurrence_after(&self, now_millis: i64, tz: &Tz) -> Option<(u32, NaiveDateTime)> {
        let is_after_now = |dt: &NaiveDateTime| match civil_to_timestamp_millis(dt, tz) {
            Some(ts) => ts > now_millis,
            None => false,
        };

        if is_after_now(&self.reminder_time) {
            return Some((0, self.reminder_time));
        }
        let frequency = self.recurrence()?;
        let mut occurrence = 1;
        loop {
            let candidate = frequency.nth_after(&self.reminder_time, occurrence)?;
            if is_after_now(&candidate) {
                return Some((occurrence, candidate));
            }
            occurrence = occurrence.checked_add(1)?;
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// How often a recurring `Reminder` repeats. Steps are taken on the civil
/// calendar, not as fixed durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidFrequencyError {
    #[error("Frequency: `{0}` is not one of daily, weekly, monthly or yearly")]
    Unrecognized(String),
}

impl Frequency {
    /// Parses an optional frequency where an empty value means absent
    pub fn parse_optional(frequency: &str) -> Result<Option<Self>, InvalidFrequencyError> {
        if frequency.trim().is_empty() {
            return Ok(None);
        }
        frequency.parse().map(Some)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// One step forward on the calendar
    pub fn advance(&self, datetime: &NaiveDateTime) -> Option<NaiveDateTime> {
        self.nth_after(datetime, 1)
    }

    /// The `n`th occurrence counted from `anchor`.
    ///
    /// Months and years are added to the anchor directly rather than
    /// stepping from the previous occurrence, so day-of-month is clamped
    /// to the month's last day only where it does not exist (Jan 31 ->
    /// Feb 29 -> Mar 31) and never drifts.
    pub fn nth_after(&self, anchor: &NaiveDateTime, n: u32) -> Option<NaiveDateTime> {
        match self {
            Self::Daily => anchor.checked_add_days(Days::new(n as u64)),
            Self::Weekly => anchor.checked_add_days(Days::new(7 * n as u64)),
            Self::Monthly => anchor.checked_add_months(Months::new(n)),
            Self::Yearly => anchor.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = InvalidFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(InvalidFrequencyError::Unrecognized(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::date::{format_civil_datetime, parse_civil_datetime};

    fn dt(datetime: &str) -> NaiveDateTime {
        parse_civil_datetime(datetime).unwrap()
    }

    fn bangkok() -> Tz {
        "Asia/Bangkok".parse().unwrap()
    }

    #[test]
    fn it_parses_frequencies() {
        assert_eq!("daily".parse(), Ok(Frequency::Daily));
        assert_eq!("Weekly".parse(), Ok(Frequency::Weekly));
        assert_eq!(" MONTHLY ".parse(), Ok(Frequency::Monthly));
        assert_eq!("yearly".parse(), Ok(Frequency::Yearly));
        assert!("hourly".parse::<Frequency>().is_err());
        assert_eq!(Frequency::parse_optional(""), Ok(None));
        assert_eq!(Frequency::parse_optional("  "), Ok(None));
        assert_eq!(Frequency::parse_optional("daily"), Ok(Some(Frequency::Daily)));
        assert!(Frequency::parse_optional("fortnightly").is_err());
    }

    #[test]
    fn it_advances_on_the_civil_calendar() {
        let t = dt("2024-02-28 09:30:00");
        let cases = vec![
            (Frequency::Daily, "2024-02-29 09:30:00"),
            (Frequency::Weekly, "2024-03-06 09:30:00"),
            (Frequency::Monthly, "2024-03-28 09:30:00"),
            (Frequency::Yearly, "2025-02-28 09:30:00"),
        ];
        for (frequency, expected) in cases {
            let next = frequency.advance(&t).unwrap();
            assert_eq!(format_civil_datetime(&next), expected, "{}", frequency);
        }
    }

    #[test]
    fn it_clamps_month_end_without_drifting() {
        let anchor = dt("2024-01-31 08:00:00");
        let occurrences = (1..=4)
            .map(|n| Frequency::Monthly.nth_after(&anchor, n).unwrap())
            .map(|d| format_civil_datetime(&d))
            .collect::<Vec<_>>();
        assert_eq!(
            occurrences,
            vec![
                "2024-02-29 08:00:00",
                "2024-03-31 08:00:00",
                "2024-04-30 08:00:00",
                "2024-05-31 08:00:00",
            ]
        );
    }

    #[test]
    fn it_keeps_leap_day_anchors_on_leap_years() {
        let anchor = dt("2024-02-29 12:00:00");
        let next = Frequency::Yearly.nth_after(&anchor, 1).unwrap();
        assert_eq!(format_civil_datetime(&next), "2025-02-28 12:00:00");
        let leap = Frequency::Yearly.nth_after(&anchor, 4).unwrap();
        assert_eq!(format_civil_datetime(&leap), "2028-02-29 12:00:00");
    }

    #[test]
    fn recurrence_requires_recurring_flag() {
        let mut reminder = Reminder::new(ID::new(), dt("2024-01-01 10:00:00"));
        reminder.frequency = Some(Frequency::Daily);
        assert_eq!(reminder.recurrence(), None);
        reminder.recurring = true;
        assert_eq!(reminder.recurrence(), Some(Frequency::Daily));
        reminder.frequency = None;
        assert_eq!(reminder.recurrence(), None);
    }

    #[test]
    fn it_finds_next_occurrence_after_now() {
        let tz = bangkok();
        let now = civil_to_timestamp_millis(&dt("2024-01-10 12:00:00"), &tz).unwrap();

        let future = Reminder::new(ID::new(), dt("2024-01-11 08:00:00"));
        assert_eq!(
            future.next_occurrence_after(now, &tz),
            Some((0, dt("2024-01-11 08:00:00")))
        );

        let past_one_shot = Reminder::new(ID::new(), dt("2024-01-01 08:00:00"));
        assert_eq!(past_one_shot.next_occurrence_after(now, &tz), None);

        let mut past_daily = past_one_shot.clone();
        past_daily.recurring = true;
        past_daily.frequency = Some(Frequency::Daily);
        assert_eq!(
            past_daily.next_occurrence_after(now, &tz),
            Some((10, dt("2024-01-11 08:00:00")))
        );

        let mut past_weekly = past_daily.clone();
        past_weekly.frequency = Some(Frequency::Weekly);
        assert_eq!(
            past_weekly.next_occurrence_after(now, &tz),
            Some((2, dt("2024-01-15 08:00:00")))
        );
    }
}

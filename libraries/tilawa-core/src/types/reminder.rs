/// Daily verse reminder
use chrono::{Days, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Hour of day the reminder fires (local time)
pub const DAILY_REMINDER_HOUR: u32 = 8;

/// A notification repeated every day at the same wall-clock time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReminder {
    pub title: String,
    pub body: String,
    pub hour: u32,
    pub minute: u32,
}

impl DailyReminder {
    /// Reminder at the default 08:00
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            hour: DAILY_REMINDER_HOUR,
            minute: 0,
        }
    }

    /// Reminder carrying a verse, titled e.g. "Daily Ayah: Al-Kahf 10"
    pub fn for_ayah(surah_name: &str, number_in_surah: u32, arabic: &str, translation: &str) -> Self {
        Self::new(
            format!("Daily Ayah: {surah_name} {number_in_surah}"),
            format!("{arabic}\n{translation}"),
        )
    }

    /// First firing strictly after `now`
    ///
    /// `None` if the configured time is not a valid time of day.
    pub fn next_after(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let today = now.date().and_hms_opt(self.hour, self.minute, 0)?;
        if today > now {
            Some(today)
        } else {
            today.checked_add_days(Days::new(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn ayah_reminder_text() {
        let reminder = DailyReminder::for_ayah(
            "Al-Kahf",
            10,
            "إِذْ أَوَى ٱلْفِتْيَةُ",
            "When the youths retreated",
        );
        assert_eq!(reminder.title, "Daily Ayah: Al-Kahf 10");
        assert_eq!(reminder.body, "إِذْ أَوَى ٱلْفِتْيَةُ\nWhen the youths retreated");
        assert_eq!((reminder.hour, reminder.minute), (8, 0));
    }

    #[test]
    fn fires_today_before_eight() {
        let reminder = DailyReminder::new("Daily Ayah", "");
        assert_eq!(reminder.next_after(at(5, 7, 59)), Some(at(5, 8, 0)));
    }

    #[test]
    fn fires_tomorrow_from_eight_onwards() {
        let reminder = DailyReminder::new("Daily Ayah", "");
        assert_eq!(reminder.next_after(at(5, 8, 0)), Some(at(6, 8, 0)));
        let april_first = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(reminder.next_after(at(31, 22, 15)), Some(april_first));
    }

    #[test]
    fn invalid_time_has_no_firing() {
        let reminder = DailyReminder {
            hour: 25,
            ..DailyReminder::new("Daily Ayah", "")
        };
        assert!(reminder.next_after(at(5, 7, 0)).is_none());
    }
}

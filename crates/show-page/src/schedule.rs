//! Broadcast slot arithmetic: when did the show last air, and is it on now.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::error::ScheduleError;

pub const SHOW_WEEKDAY: Weekday = Weekday::Wed;
pub const SHOW_START_HOUR: u32 = 13;
pub const SHOW_END_HOUR: u32 = 14;

/// Weekly airing window: `weekday`, from `start_hour` (inclusive) to
/// `end_hour` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastSlot {
    weekday: Weekday,
    start_hour: u32,
    end_hour: u32,
    start: NaiveTime,
}

impl BroadcastSlot {
    pub fn new(weekday: Weekday, start_hour: u32, end_hour: u32) -> Result<Self, ScheduleError> {
        if end_hour > 24 {
            return Err(ScheduleError::HourOutOfRange(end_hour));
        }
        let start = NaiveTime::from_hms_opt(start_hour, 0, 0)
            .ok_or(ScheduleError::HourOutOfRange(start_hour))?;
        if start_hour >= end_hour {
            return Err(ScheduleError::EmptySlot {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self {
            weekday,
            start_hour,
            end_hour,
            start,
        })
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Start of the most recent airing on or before `reference`'s day.
    ///
    /// On the show's own weekday this is today's start even when `reference`
    /// is still before it.
    pub fn last_broadcast(&self, reference: NaiveDateTime) -> NaiveDateTime {
        let diff = days_since(reference.weekday(), self.weekday);
        (reference.date() - Duration::days(diff)).and_time(self.start)
    }

    /// Off-air caption, e.g. `Miércoles de 13 a 14 hs.`
    pub fn label(&self) -> String {
        format!(
            "{} de {} a {} hs.",
            weekday_name(self.weekday),
            self.start_hour,
            self.end_hour
        )
    }

    /// Whether `now` falls inside the airing window.
    pub fn is_live(&self, now: NaiveDateTime) -> bool {
        now.weekday() == self.weekday
            && now.hour() >= self.start_hour
            && now.hour() < self.end_hour
    }
}

impl Default for BroadcastSlot {
    fn default() -> Self {
        Self {
            weekday: SHOW_WEEKDAY,
            start_hour: SHOW_START_HOUR,
            end_hour: SHOW_END_HOUR,
            start: NaiveTime::from_hms_opt(SHOW_START_HOUR, 0, 0).unwrap_or_default(),
        }
    }
}

/// Most recent `target` weekday on or before `reference`'s day, at
/// `hour:00:00.000`. `None` when `hour` is not a valid hour of the day.
pub fn last_broadcast_date(
    reference: NaiveDateTime,
    target: Weekday,
    hour: u32,
) -> Option<NaiveDateTime> {
    let diff = days_since(reference.weekday(), target);
    (reference.date() - Duration::days(diff)).and_hms_opt(hour, 0, 0)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Days to step back from `from` to reach `target`, counting weeks from Sunday.
fn days_since(from: Weekday, target: Weekday) -> i64 {
    let diff = from.num_days_from_sunday() as i64 - target.num_days_from_sunday() as i64;
    if diff < 0 {
        diff + 7
    } else {
        diff
    }
}

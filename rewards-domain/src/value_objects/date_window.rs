// Date window value object
// Closed interval a history query is restricted to

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(start_of_day).unwrap_or_else(epoch_floor),
            end: end.map(end_of_day).unwrap_or_else(far_future_ceiling),
        }
    }

    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        self.start <= *at && *at <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| start_of_day(date))
}

fn epoch_floor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .map(start_of_day)
        .unwrap_or(NaiveDateTime::MIN)
}

fn far_future_ceiling() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2999, 12, 31)
        .map(end_of_day)
        .unwrap_or(NaiveDateTime::MAX)
}

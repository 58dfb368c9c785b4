// Time helpers
// Record timestamps are naive wall-clock in the service timezone

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime, SubsecRound, Utc};
use chrono_tz::Tz;

pub const STORED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|err| anyhow!(err))
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|err| anyhow!("unknown timezone '{}': {}", name, err))
}

pub fn local_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local().trunc_subsecs(0)
}

pub fn format_stored(value: &NaiveDateTime) -> String {
    value.format(STORED_FORMAT).to_string()
}

pub fn format_display(value: &NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

pub fn parse_display(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DISPLAY_FORMAT).ok()
}

use chrono::NaiveDateTime;
use chrono_tz::Tz;

use rewards_domain::{local_now, Clock};

pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        local_now(self.timezone)
    }
}

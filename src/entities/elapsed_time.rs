use super::Msec;
use std::fmt;

/// Walking time broken down for display. Sub-second remainders are dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ElapsedTime {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl ElapsedTime {
    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl From<Msec> for ElapsedTime {
    fn from(msec: Msec) -> Self {
        let elapsed_seconds = i64::from(msec) / 1000;
        Self {
            hours: elapsed_seconds / 3600,
            minutes: (elapsed_seconds % 3600) / 60,
            seconds: elapsed_seconds % 60,
        }
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

use chrono::{DateTime, Local, NaiveTime, Timelike};

/// Wall-clock source for snapshot and event timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Time of day truncated to whole seconds, as shown on feed entries.
    fn time_of_day(&self) -> NaiveTime {
        let t = self.now().time();
        t.with_nanosecond(0).unwrap_or(t)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

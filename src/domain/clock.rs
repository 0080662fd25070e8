//! Time source used by rules whose bounds move with the calendar.

use chrono::{Datelike, Local};

/// Supplies the current calendar year.
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Reads the local system clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Local::now().year()
    }
}

/// Always reports the same year.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_matches_local_year() {
        assert_eq!(SystemClock.current_year(), Local::now().year());
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(1999).current_year(), 1999);
    }
}

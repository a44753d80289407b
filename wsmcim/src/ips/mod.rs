//! Classes du schéma IPS

pub mod alarmclock;

pub use alarmclock::{AlarmClockOccurrence, AlarmClockOccurrences};

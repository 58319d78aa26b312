//! Polling cycles and their scheduling
//!
//! A [`Scanner`] runs one cycle at a time over both venue feeds; the
//! [`Scheduler`] repeats cycles on a timer until stopped.

mod cycle;
mod scheduler;
mod warnings;

pub use cycle::{CycleReport, ScanStatus, Scanner};
pub use scheduler::{Scheduler, SchedulerError};
pub use warnings::{Warning, WarningLog};

//! # Miqat
//!
//! Engine for monthly mosque prayer-time schedules: parses the provider's
//! heterogeneous time strings, derives Iqama (congregation) times from
//! declarative per-prayer rules, tracks forward-propagating user overrides,
//! and assembles display-ready per-day rows.
//!
//! ## Modules
//!
//! - `types`: domain types (prayers, rules, settings, provider data, rows)
//! - `clock`: time-string parsing and display formatting
//! - `rules`: Iqama rule evaluation and validity checking
//! - `overrides`: the forward-propagating override store
//! - `schedule`: per-day schedule assembly
//! - `network`: location and provider collaborators (optional)
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use miqat::prelude::*;
//!
//! let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
//! let start = parse_instant(date, "05:12 (EDT)").unwrap();
//! let iqama = compute_iqama(date, "05:12", &IqamaRule::Dynamic(10)).unwrap();
//! assert!(iqama > start);
//! assert_eq!(format_time(iqama, true), "5:22 AM");
//! ```

pub mod clock;
pub mod network;
pub mod overrides;
pub mod rules;
pub mod schedule;
pub mod types;

pub use clock::{MiqatError, format_opt, format_time, parse_instant, parse_provider_date};
pub use overrides::OverrideStore;
pub use rules::{compute_iqama, default_iqama, iqama_after_start};
pub use schedule::{assemble_month, month_heading};
pub use types::{
    CalendarSystem, DayRow, IqamaCell, IqamaRule, MonthQuery, Prayer, ProviderDay, School, Settings,
};

pub mod prelude {
    pub use crate::clock::{format_time, parse_instant};
    pub use crate::overrides::OverrideStore;
    pub use crate::rules::compute_iqama;
    pub use crate::schedule::assemble_month;
    pub use crate::types::*;
    pub use crate::MiqatError;
}

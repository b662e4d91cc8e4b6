//! Sparse table of user-entered Iqama replacements.
//!
//! A non-empty write applies from its date forward to the end of the loaded
//! month (daylight-saving shifts are the common case), while a clear touches
//! only the single date written. Friday is excluded from Dhuhr propagation
//! because Friday middays display Jumu'ah times sourced independently.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clock::{MiqatError, parse_instant};
use crate::rules::iqama_after_start;
use crate::types::{Prayer, ProviderDay};

/// Date-ordered map of per-prayer override text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideStore {
    entries: BTreeMap<NaiveDate, BTreeMap<Prayer, String>>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes or clears an override.
    ///
    /// A non-empty `value` is first validated against the prayer's start on
    /// `date`: if it parses to an instant at or before the start, the write
    /// is rejected and the store is left unchanged. A value that does not
    /// parse at all is accepted as-is (the user may still be typing; the
    /// cell renders the raw text either way). The accepted value is then
    /// written to every loaded day from `date` onward, skipping Fridays when
    /// the prayer is Dhuhr.
    ///
    /// An empty `value` removes only the `(date, prayer)` entry; previously
    /// propagated later dates keep their text.
    ///
    /// # Errors
    /// `DateNotLoaded` if `date` is not in `days`; `IqamaBeforeStart` if the
    /// value parses but is not strictly after the prayer start.
    pub fn set(
        &mut self,
        days: &[ProviderDay],
        date: NaiveDate,
        prayer: Prayer,
        value: &str,
    ) -> Result<(), MiqatError> {
        if value.is_empty() {
            if let Some(day) = self.entries.get_mut(&date) {
                day.remove(&prayer);
                if day.is_empty() {
                    self.entries.remove(&date);
                }
            }
            return Ok(());
        }

        let index = days
            .iter()
            .position(|d| d.date.civil_date().ok() == Some(date))
            .ok_or(MiqatError::DateNotLoaded { date })?;

        let start_raw = days[index].timings.raw_for(prayer);
        if let (Ok(start), Ok(iqama)) = (parse_instant(date, start_raw), parse_instant(date, value))
        {
            if !iqama_after_start(start, iqama) {
                return Err(MiqatError::IqamaBeforeStart {
                    prayer,
                    value: value.to_string(),
                });
            }
        }

        for day in &days[index..] {
            let Ok(civil) = day.date.civil_date() else {
                continue;
            };
            if prayer == Prayer::Dhuhr && civil.weekday() == Weekday::Fri {
                continue;
            }
            self.entries
                .entry(civil)
                .or_default()
                .insert(prayer, value.to_string());
        }

        Ok(())
    }

    /// Looks up the override text for one day and prayer.
    pub fn get(&self, date: NaiveDate, prayer: Prayer) -> Option<&str> {
        self.entries
            .get(&date)
            .and_then(|day| day.get(&prayer))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all overrides, e.g. when a new month is loaded.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

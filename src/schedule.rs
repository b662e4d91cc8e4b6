//! Per-day schedule assembly.
//!
//! Combines raw provider data with the active settings and override store
//! into display-ready rows. Failures stay row-local where possible: an
//! unparseable timing degrades a single cell, while a malformed provider
//! date fails the whole month.

use chrono::{Datelike, Weekday};

use crate::clock::{MiqatError, parse_instant};
use crate::overrides::OverrideStore;
use crate::rules::default_iqama;
use crate::types::{
    CalendarSystem, DayRow, IqamaCell, Prayer, PrayerSlot, ProviderDate, ProviderDay, Settings,
};

/// Assembles the full month of rows.
///
/// # Errors
/// Returns `InvalidDate` if any provider date stamp fails positional
/// parsing; no partial month is produced.
pub fn assemble_month(
    days: &[ProviderDay],
    settings: &Settings,
    overrides: &OverrideStore,
) -> Result<Vec<DayRow>, MiqatError> {
    days.iter()
        .map(|day| assemble_day(day, settings, overrides))
        .collect()
}

fn assemble_day(
    day: &ProviderDay,
    settings: &Settings,
    overrides: &OverrideStore,
) -> Result<DayRow, MiqatError> {
    let civil = day.date.civil_date()?;
    let weekday = civil.weekday();

    let primary = day.date.for_calendar(settings.calendar);
    let day_number = provider_day_number(primary)?;
    let alt_label = alt_date_label(day.date.for_calendar(settings.calendar.other()))?;

    let sunrise = parse_instant(civil, &day.timings.sunrise).ok();

    let slots = Prayer::ALL.map(|prayer| {
        let raw = day.timings.raw_for(prayer);
        let start = parse_instant(civil, raw).ok();

        // Friday middays show Jumu'ah times and are never overridden or
        // validity-checked; overrides otherwise beat the computed default.
        let iqama = if prayer == Prayer::Dhuhr && weekday == Weekday::Fri {
            IqamaCell::Jumuah(settings.jumuah_times.clone())
        } else if let Some(text) = overrides.get(civil, prayer) {
            IqamaCell::Override(text.to_string())
        } else {
            default_iqama(civil, raw, &settings.rule_for(prayer))
        };

        PrayerSlot { start, iqama }
    });

    Ok(DayRow {
        civil_date: civil,
        day_number,
        alt_label,
        weekday,
        sunrise,
        slots,
    })
}

/// Day-of-month from a provider date stamp, leading zero dropped.
fn provider_day_number(stamp: &ProviderDate) -> Result<u32, MiqatError> {
    stamp
        .date
        .split('-')
        .next()
        .and_then(|d| d.parse().ok())
        .ok_or_else(|| MiqatError::invalid_date(&stamp.date))
}

/// Alternate-calendar column label, e.g. `"Safar 14"`.
fn alt_date_label(stamp: &ProviderDate) -> Result<String, MiqatError> {
    let day = provider_day_number(stamp)?;
    Ok(format!("{} {}", normalize_month_name(&stamp.month.en), day))
}

/// Strips diacritics and the ʿ/ʾ letters from Hijri month names so labels
/// survive plain-ASCII export fonts ("Jumādá" -> "Jumada").
///
/// The provider's twelve month names use a closed set of marked letters;
/// combining marks are dropped too in case decomposed text ever arrives.
pub fn normalize_month_name(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            '\u{02BF}' | '\u{02BE}' => None,
            c if ('\u{0300}'..='\u{036F}').contains(&c) => None,
            'ā' | 'á' => Some('a'),
            'Ā' => Some('A'),
            'ī' => Some('i'),
            'ū' => Some('u'),
            'Ū' => Some('U'),
            'ḍ' => Some('d'),
            'Ḍ' => Some('D'),
            'ḥ' => Some('h'),
            'Ḥ' => Some('H'),
            c => Some(c),
        })
        .collect()
}

/// Three-letter weekday label used in rows and exports.
pub fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Title line for the rendered month, with the alternate-calendar range in
/// parentheses. When the primary calendar is Hijri the alternate (Gregorian)
/// month is shortened to three letters and its year to two digits; a range
/// spanning a single alternate month collapses to one label.
///
/// Returns `None` for an empty month.
pub fn month_heading(days: &[ProviderDay], calendar: CalendarSystem) -> Option<String> {
    let first = days.first()?;
    let last = days.last()?;

    let primary = first.date.for_calendar(calendar);
    let month = normalize_month_name(&primary.month.en);
    let year = &primary.year;

    let alt = |stamp: &ProviderDate| -> (String, String) {
        match calendar {
            CalendarSystem::Hijri => (
                stamp.month.en.chars().take(3).collect(),
                stamp.year.get(2..).unwrap_or(&stamp.year).to_string(),
            ),
            CalendarSystem::Gregorian => {
                (normalize_month_name(&stamp.month.en), stamp.year.clone())
            }
        }
    };

    let (first_month, first_year) = alt(first.date.for_calendar(calendar.other()));
    let (last_month, last_year) = alt(last.date.for_calendar(calendar.other()));

    let alt_range = if first_month == last_month && first_year == last_year {
        format!("{} '{}", first_month, first_year)
    } else {
        format!("{} '{} - {} '{}", first_month, first_year, last_month, last_year)
    };

    Some(format!(
        "Monthly Prayer Schedule - {} {} ({})",
        month, year, alt_range
    ))
}

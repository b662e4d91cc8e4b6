use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::fmt;

use crate::clock::{MiqatError, parse_provider_date};

/// The five daily prayers, in day order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a congregation time is derived from a prayer start time.
///
/// `Static` is a fixed clock time on the same date; the prayer's own start
/// is not consulted. `Dynamic` adds a minute offset to the start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum IqamaRule {
    Static(String),
    Dynamic(i64),
}

/// Juristic school for the Asr calculation, mapped to the provider's code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum School {
    Shafi,
    Hanafi,
}

impl School {
    /// Code used by the provider's `school` query parameter.
    pub fn provider_code(&self) -> u8 {
        match self {
            School::Shafi => 0,
            School::Hanafi => 1,
        }
    }
}

impl Default for School {
    fn default() -> Self {
        Self::Shafi
    }
}

/// Which calendar the month is requested and displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarSystem {
    Gregorian,
    Hijri,
}

impl CalendarSystem {
    /// The alternate calendar, shown in the second date column.
    pub fn other(&self) -> CalendarSystem {
        match self {
            CalendarSystem::Gregorian => CalendarSystem::Hijri,
            CalendarSystem::Hijri => CalendarSystem::Gregorian,
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CalendarSystem::Gregorian => "Gregorian",
            CalendarSystem::Hijri => "Hijri",
        };
        write!(f, "{}", s)
    }
}

/// Up to four Jumu'ah start-time strings.
pub type JumuahTimes = SmallVec<[String; 4]>;

/// Schedule configuration, passed explicitly into every computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Postal code resolved to coordinates by the location collaborator.
    pub zip: String,
    pub school: School,
    pub calendar: CalendarSystem,
    /// Target month (1-12) in the selected calendar.
    pub month: u32,
    pub fajr: IqamaRule,
    pub dhuhr: IqamaRule,
    pub asr: IqamaRule,
    /// Maghrib is dynamic-only in this domain; no static variant exists.
    pub maghrib_offset: i64,
    pub isha: IqamaRule,
    /// Friday midday congregation start times, one to four entries.
    pub jumuah_times: JumuahTimes,
    /// Display preference: emit the sunrise column.
    pub include_sunrise: bool,
    /// Display preference: render times with an AM/PM suffix.
    pub hour12: bool,
    /// Shown by exporters above the table; not used by the core.
    pub organization_name: Option<String>,
}

impl Settings {
    /// Returns the active rule for a prayer. Maghrib always yields a
    /// `Dynamic` rule built from `maghrib_offset`.
    pub fn rule_for(&self, prayer: Prayer) -> IqamaRule {
        match prayer {
            Prayer::Fajr => self.fajr.clone(),
            Prayer::Dhuhr => self.dhuhr.clone(),
            Prayer::Asr => self.asr.clone(),
            Prayer::Maghrib => IqamaRule::Dynamic(self.maghrib_offset),
            Prayer::Isha => self.isha.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zip: "10001".to_string(),
            school: School::default(),
            calendar: CalendarSystem::Gregorian,
            month: 1,
            fajr: IqamaRule::Dynamic(10),
            dhuhr: IqamaRule::Dynamic(10),
            asr: IqamaRule::Dynamic(10),
            maghrib_offset: 10,
            isha: IqamaRule::Dynamic(10),
            jumuah_times: smallvec!["1:00 PM".to_string()],
            include_sunrise: true,
            hour12: true,
            organization_name: None,
        }
    }
}

/// Approximate Gregorian-to-Hijri year difference used when requesting a
/// Hijri month from the provider.
pub const HIJRI_YEAR_OFFSET: i32 = 579;

/// An explicit month-fetch request.
///
/// The reference year is an input, never an ambient read of the system
/// clock, so schedule generation stays deterministic under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthQuery {
    pub zip: String,
    pub year: i32,
    pub month: u32,
    pub school: School,
    pub calendar: CalendarSystem,
}

impl MonthQuery {
    /// Builds a query from settings and an explicit reference year.
    ///
    /// For a Hijri calendar the provider expects a Hijri year, approximated
    /// as `reference_year - 579`.
    pub fn from_settings(settings: &Settings, reference_year: i32) -> Self {
        let year = match settings.calendar {
            CalendarSystem::Gregorian => reference_year,
            CalendarSystem::Hijri => reference_year - HIJRI_YEAR_OFFSET,
        };
        Self {
            zip: settings.zip.clone(),
            year,
            month: settings.month,
            school: settings.school,
            calendar: settings.calendar,
        }
    }
}

/// One day of raw provider data: a dual-calendar date stamp plus timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDay {
    pub date: DualDate,
    pub timings: DayTimings,
}

/// The provider's civil and lunar date stamps for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualDate {
    pub gregorian: ProviderDate,
    pub hijri: ProviderDate,
}

impl DualDate {
    /// Resolves the civil (Gregorian) date, parsed positionally.
    pub fn civil_date(&self) -> Result<NaiveDate, MiqatError> {
        parse_provider_date(&self.gregorian.date)
    }

    pub fn for_calendar(&self, calendar: CalendarSystem) -> &ProviderDate {
        match calendar {
            CalendarSystem::Gregorian => &self.gregorian,
            CalendarSystem::Hijri => &self.hijri,
        }
    }
}

/// One calendar's date stamp as the provider reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDate {
    /// `DD-MM-YYYY`, day first.
    pub date: String,
    pub month: MonthName,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthName {
    pub number: u32,
    pub en: String,
}

/// Raw timing strings for one day. Unknown provider keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTimings {
    #[serde(rename = "Fajr")]
    pub fajr: String,
    #[serde(rename = "Sunrise")]
    pub sunrise: String,
    #[serde(rename = "Dhuhr")]
    pub dhuhr: String,
    #[serde(rename = "Asr")]
    pub asr: String,
    #[serde(rename = "Maghrib")]
    pub maghrib: String,
    #[serde(rename = "Isha")]
    pub isha: String,
}

impl DayTimings {
    pub fn raw_for(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }
}

/// The resolved Iqama for one (day, prayer) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IqamaCell {
    /// Default computed from the active rule.
    Computed(NaiveDateTime),
    /// User-entered replacement text, rendered verbatim.
    Override(String),
    /// Friday midday: the configured Jumu'ah start times.
    Jumuah(JumuahTimes),
    /// Static rule whose clock time is not strictly after the prayer start.
    InvalidStatic,
    /// The prayer's raw timing string could not be parsed.
    Unavailable,
}

impl IqamaCell {
    /// Display text for this cell.
    pub fn render(&self, hour12: bool) -> String {
        match self {
            IqamaCell::Computed(instant) => crate::clock::format_time(*instant, hour12),
            IqamaCell::Override(text) => text.clone(),
            IqamaCell::Jumuah(times) => times.join("\n"),
            IqamaCell::InvalidStatic => crate::rules::INVALID_IQAMA_MESSAGE.to_string(),
            IqamaCell::Unavailable => crate::rules::UNAVAILABLE_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, IqamaCell::Override(_))
    }
}

/// Prayer start and resolved Iqama for one slot of a day row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerSlot {
    pub start: Option<NaiveDateTime>,
    pub iqama: IqamaCell,
}

/// Assembled output for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRow {
    pub civil_date: NaiveDate,
    /// Day-of-month in the selected calendar.
    pub day_number: u32,
    /// Alternate-calendar label, e.g. `"Safar 14"`.
    pub alt_label: String,
    /// Weekday of the actual civil date.
    pub weekday: Weekday,
    pub sunrise: Option<NaiveDateTime>,
    /// Slots in `Prayer::ALL` order.
    pub slots: [PrayerSlot; 5],
}

impl DayRow {
    pub fn slot(&self, prayer: Prayer) -> &PrayerSlot {
        &self.slots[prayer as usize]
    }

    pub fn is_friday(&self) -> bool {
        self.weekday == Weekday::Fri
    }
}

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::clock::{MiqatError, parse_instant};
use crate::types::{IqamaCell, IqamaRule};

/// Row-local warning shown when a static Iqama precedes its prayer start.
pub const INVALID_IQAMA_MESSAGE: &str = "Iqama time is provided earlier than prayer start time";

/// Placeholder shown when a provider timing string could not be parsed.
pub const UNAVAILABLE_PLACEHOLDER: &str = "--:--";

/// Computes the congregation instant for one prayer on one date.
///
/// A `Static` rule is a fixed clock time on the same date; the prayer's own
/// start is never consulted. A `Dynamic` rule adds its offset in minutes to
/// the parsed prayer start. Pure function of its inputs.
///
/// # Errors
/// Returns `UnparseableTime` when the relevant time string (the static time,
/// or the prayer's raw timing for a dynamic rule) matches no known shape.
pub fn compute_iqama(
    date: NaiveDate,
    prayer_raw: &str,
    rule: &IqamaRule,
) -> Result<NaiveDateTime, MiqatError> {
    match rule {
        IqamaRule::Static(time) => parse_instant(date, time),
        IqamaRule::Dynamic(offset) => {
            Ok(parse_instant(date, prayer_raw)? + Duration::minutes(*offset))
        }
    }
}

/// True iff the congregation instant is strictly after the prayer start.
pub fn iqama_after_start(start: NaiveDateTime, iqama: NaiveDateTime) -> bool {
    iqama > start
}

/// Resolves the default Iqama cell for one day and prayer.
///
/// Static rules are additionally checked against the prayer start; a static
/// time at or before the start is a recoverable, row-local condition and
/// yields `InvalidStatic` rather than an error. Dynamic rules are not
/// checked: with a non-negative offset they cannot precede the start.
/// An unparseable timing string degrades to `Unavailable`.
pub fn default_iqama(date: NaiveDate, prayer_raw: &str, rule: &IqamaRule) -> IqamaCell {
    let Ok(iqama) = compute_iqama(date, prayer_raw, rule) else {
        return IqamaCell::Unavailable;
    };

    if matches!(rule, IqamaRule::Static(_)) {
        // An unparseable start leaves the static time unverifiable; the
        // start column renders its own placeholder in that case.
        if let Ok(start) = parse_instant(date, prayer_raw) {
            if !iqama_after_start(start, iqama) {
                return IqamaCell::InvalidStatic;
            }
        }
    }

    IqamaCell::Computed(iqama)
}

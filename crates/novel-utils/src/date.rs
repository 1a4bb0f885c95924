// File: novel-utils/src/date.rs
// Purpose: Date offsets from "now" and template-based date formatting

use crate::context::Clock;
use crate::error::{Result, UtilError};
use chrono::{DateTime, Datelike, Days, Duration, Local, Months, NaiveDateTime, TimeZone, Timelike};

/// `now + days`, keeping the wall-clock time
///
/// A wall-clock time that falls in a DST gap moves forward past the gap; an
/// ambiguous one takes the earlier instant.
pub fn add_days<C: Clock + ?Sized>(clock: &C, days: i64) -> Result<DateTime<Local>> {
    shift_days(&clock.now(), days).ok_or(UtilError::DateOutOfRange {
        unit: "days",
        offset: days,
    })
}

/// `now + months`, clamped to the last day of the target month
pub fn add_months<C: Clock + ?Sized>(clock: &C, months: i64) -> Result<DateTime<Local>> {
    shift_months(&clock.now(), months).ok_or(UtilError::DateOutOfRange {
        unit: "months",
        offset: months,
    })
}

/// `now + years`, clamped the same way as [`add_months`]
///
/// Feb 29 plus one year lands on Feb 28.
pub fn add_years<C: Clock + ?Sized>(clock: &C, years: i64) -> Result<DateTime<Local>> {
    years
        .checked_mul(12)
        .and_then(|months| shift_months(&clock.now(), months))
        .ok_or(UtilError::DateOutOfRange {
            unit: "years",
            offset: years,
        })
}

fn shift_days<Tz: TimeZone>(now: &DateTime<Tz>, days: i64) -> Option<DateTime<Tz>> {
    let naive = now.naive_local();
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        naive.checked_add_days(step)?
    } else {
        naive.checked_sub_days(step)?
    };
    in_zone(&now.timezone(), shifted)
}

fn shift_months<Tz: TimeZone>(now: &DateTime<Tz>, months: i64) -> Option<DateTime<Tz>> {
    let naive = now.naive_local();
    let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let shifted = if months >= 0 {
        naive.checked_add_months(step)?
    } else {
        naive.checked_sub_months(step)?
    };
    in_zone(&now.timezone(), shifted)
}

/// Maps a wall-clock time back into `tz`
fn in_zone<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        // Skipped by a spring-forward transition
        let later = naive.checked_add_signed(Duration::hours(1))?;
        tz.from_local_datetime(&later).earliest()
    })
}

/// Formats `date` by substituting tokens in `template`
///
/// Tokens are `Y` (year), `m` (month), `d` (day), `H` (hour), `M` (minute)
/// and `S` (second). For each letter, in that order, only the first run is
/// replaced. A single letter emits the plain number; a longer run pads it
/// with zeros up to the run length but never truncates.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use novel_utils::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 7, 4).unwrap();
/// assert_eq!(format_date("YYYY-mm-dd HH:MM:SS", &date), "2024-03-05 09:07:04");
/// assert_eq!(format_date("Y/m/d", &date), "2024/3/5");
/// assert_eq!(format_date("YY", &date), "2024");
/// ```
pub fn format_date<D: Datelike + Timelike>(template: &str, date: &D) -> String {
    let fields = [
        ('Y', date.year().to_string()),
        ('m', date.month().to_string()),
        ('d', date.day().to_string()),
        ('H', date.hour().to_string()),
        ('M', date.minute().to_string()),
        ('S', date.second().to_string()),
    ];

    let mut out = template.to_string();
    for (token, value) in fields {
        let Some(start) = out.find(token) else {
            continue;
        };
        let run = out[start..].chars().take_while(|c| *c == token).count();
        let replacement = if run == 1 {
            value
        } else {
            format!("{value:0>run$}")
        };
        out.replace_range(start..start + run, &replacement);
    }
    out
}

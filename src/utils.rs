use chrono::{Month, NaiveDate};

/// Split a `YYYYMM` value into its year and month parts.
///
/// Only the shape is checked here: six ASCII digits with a month of 1-12.
/// Year bounds are left to [`crate::models::YearMonth::new`].
pub fn split_yyyymm(value: &str) -> Result<(i32, u32), String> {
    let value = value.trim();
    if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("expected a YYYYMM value, got {:?}", value));
    }

    let year: i32 = value[0..4]
        .parse()
        .map_err(|_| format!("invalid year in {:?}", value))?;
    let month: u32 = value[4..6]
        .parse()
        .map_err(|_| format!("invalid month in {:?}", value))?;

    if !(1..=12).contains(&month) {
        return Err(format!("invalid month {:02} in {:?}", month, value));
    }

    Ok((year, month))
}

/// Parse a `YYYYMM` value into the first day of that month.
pub fn parse_year_month(value: &str) -> Result<NaiveDate, String> {
    let (year, month) = split_yyyymm(value)?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| format!("{:?} is not a calendar month", value))
}

/// Full English month name ("January" .. "December") for a 1-indexed month.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

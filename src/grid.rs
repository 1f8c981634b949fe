use chrono::{Datelike, Duration, Local, NaiveDate};
use itertools::Itertools;

use crate::error::{Error, ErrorKind, Result};

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DAYS_PER_WEEK: i64 = 7;

/// One cell of the month grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDate {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
}

pub type Week = Vec<CalendarDate>;
pub type Weeks = Vec<Week>;

pub fn first_of_month(date: &NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(*date)
}

pub fn last_of_month(date: &NaiveDate) -> NaiveDate {
    // Every month has a 28th, so this always finds a day.
    (28..=31)
        .rev()
        .find_map(|day| date.with_day(day))
        .unwrap_or(*date)
}

pub fn days_of_month(date: &NaiveDate) -> u32 {
    last_of_month(date).day()
}

fn out_of_range(current: &NaiveDate) -> Error {
    Error::new(
        ErrorKind::DateOutOfRange,
        &format!(
            "grid for {}-{:02} exceeds the supported dates",
            current.year(),
            current.month()
        ),
    )
}

/// First day of the grid and the day after its last one.
///
/// The grid starts on the Sunday on or before the first of the month. The end
/// is found by stepping back from the last of the month to its Sunday and then
/// forward one week, so it always falls on a Sunday as well. Months whose grid
/// would leave chrono's date range are rejected.
pub fn grid_bounds(current: &NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let first = first_of_month(current);
    let last = last_of_month(current);

    let first_of_grid = first
        .checked_sub_signed(Duration::days(first.weekday().num_days_from_sunday() as i64))
        .ok_or_else(|| out_of_range(current))?;
    let end_of_grid = last
        .checked_sub_signed(Duration::days(last.weekday().num_days_from_sunday() as i64))
        .and_then(|sunday| sunday.checked_add_signed(Duration::days(DAYS_PER_WEEK)))
        .ok_or_else(|| out_of_range(current))?;

    Ok((first_of_grid, end_of_grid))
}

/// Builds the weeks needed to show `current`'s month, using the local clock
/// to flag today.
pub fn generate_weeks(current: &NaiveDate, selected: &NaiveDate) -> Result<Weeks> {
    generate_weeks_at(current, selected, &Local::now().date_naive())
}

pub fn generate_weeks_at(
    current: &NaiveDate,
    selected: &NaiveDate,
    today: &NaiveDate,
) -> Result<Weeks> {
    let (first_of_grid, end_of_grid) = grid_bounds(current)?;
    let num_days = end_of_grid.signed_duration_since(first_of_grid).num_days();

    log::debug!(
        "Generating grid for {}-{:02}: {} .. {} ({} days)",
        current.year(),
        current.month(),
        first_of_grid,
        end_of_grid,
        num_days
    );

    let chunks = first_of_grid
        .iter_days()
        .take(num_days as usize)
        .map(|date| CalendarDate {
            date,
            is_today: date == *today,
            is_selected: date == *selected,
        })
        .chunks(DAYS_PER_WEEK as usize);

    let weeks: Weeks = chunks.into_iter().map(|week| week.collect()).collect();
    Ok(weeks)
}

/// Advisory check whether the month of `candidate` may be navigated to.
/// Only months strictly before the current one are reported as disallowed.
pub fn is_navigable_month(candidate: &NaiveDate) -> bool {
    is_navigable_month_at(candidate, &Local::now().date_naive())
}

pub fn is_navigable_month_at(candidate: &NaiveDate, today: &NaiveDate) -> bool {
    (candidate.year(), candidate.month()) >= (today.year(), today.month())
}

/// Whether `date` belongs to the displayed month and is not in the future.
pub fn is_selectable_month_day(date: &NaiveDate, current: &NaiveDate, today: &NaiveDate) -> bool {
    (date.year(), date.month()) == (current.year(), current.month()) && date <= today
}

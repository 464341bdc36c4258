//! Month grid for the calendar filter.
//!
//! The grid always has six Monday-first weeks. Days before the 1st come
//! from the previous month and the tail is padded from the next one.

use chrono::{Datelike, Days, NaiveDate, Weekday};

pub const WEEKDAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
pub const GRID_CELLS: usize = 42;

// Cursor years stay four digits so `YYYY-MM` keys always parse back.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// The month the calendar is showing, independent of the selected day.
///
/// Navigation moves freely in both directions but saturates at January of
/// year 1 and December of year 9999. Outside that range the `YYYY-MM` key
/// would not parse back into the same cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        ((1..=12).contains(&month) && (MIN_YEAR..=MAX_YEAR).contains(&year))
            .then_some(Self { year, month })
    }

    pub fn containing(day: NaiveDate) -> Self {
        Self::from_index(day.year() * 12 + day.month0() as i32)
    }

    /// Parse a `YYYY-MM` key.
    pub fn parse(raw: &str) -> Option<Self> {
        let (year, month) = raw.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    fn index(&self) -> i32 {
        self.year * 12 + (self.month as i32 - 1)
    }

    fn from_index(index: i32) -> Self {
        let clamped = index.clamp(MIN_YEAR * 12, MAX_YEAR * 12 + 11);
        Self {
            year: clamped.div_euclid(12),
            month: clamped.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn shift_months(self, months: i32) -> Self {
        Self::from_index(self.index().saturating_add(months))
    }

    pub fn shift_years(self, years: i32) -> Self {
        Self::from_index(self.index().saturating_add(years.saturating_mul(12)))
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// e.g. "June 2024"
    pub fn title(&self) -> String {
        self.first_day()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend: bool,
}

/// Build the 42-cell grid for `cursor`, flagging `today` and `selected`.
pub fn month_grid(cursor: MonthCursor, today: NaiveDate, selected: NaiveDate) -> Vec<DayCell> {
    let Some(first) = cursor.first_day() else {
        return Vec::new();
    };
    let lead = u64::from(first.weekday().num_days_from_monday());
    let Some(start) = first.checked_sub_days(Days::new(lead)) else {
        return Vec::new();
    };

    (0..GRID_CELLS as u64)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| DayCell {
            date,
            day: date.day(),
            in_month: date.year() == cursor.year && date.month() == cursor.month,
            is_today: date == today,
            is_selected: date == selected,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        })
        .collect()
}

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::index::EventIndex;
use crate::model::CalendarEvent;

/// A displayed month. Months are 1-indexed; construction normalizes any
/// out-of-range month by carrying into the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

/// Persisted months go through [`YearMonth::new`] so they are normalized too.
#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: i64,
}

impl From<RawYearMonth> for YearMonth {
    fn from(raw: RawYearMonth) -> Self {
        let months = raw.month.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        Self::new(raw.year, months)
    }
}

// keep a margin so the grid's buffer days stay representable
const MIN_YEAR: i32 = -262_000;
const MAX_YEAR: i32 = 262_000;

impl YearMonth {
    pub fn new(year: i32, month: i32) -> Self {
        let zero_based = month as i64 - 1;
        let year = year as i64 + zero_based.div_euclid(12);
        let month = zero_based.rem_euclid(12) as u32 + 1;

        Self {
            year: year.clamp(MIN_YEAR as i64, MAX_YEAR as i64) as i32,
            month,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month() as i32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn offset(&self, months: i32) -> Self {
        Self::new(self.year, self.month as i32 + months)
    }

    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_day().format("%B"), self.year)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Column header for a Sunday-first week.
pub fn weekday_label(idx: usize) -> &'static str {
    match idx {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    /// false for buffer days borrowed from the neighbouring months
    pub in_month: bool,
}

/// Build the Sunday-first display grid for a month: previous month buffer
/// days, every day of the month, then next month buffer days until the last
/// week row is full.
pub fn build_grid(month: YearMonth) -> Vec<GridDay> {
    let first = month.first_day();
    let leading = first.weekday().num_days_from_sunday() as i64;
    let days = month.days() as i64;
    let trailing = (7 - (leading + days) % 7) % 7;

    let grid_start = first - Duration::days(leading);
    let total = leading + days + trailing;

    (0..total)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            GridDay {
                date,
                in_month: offset >= leading && offset < leading + days,
            }
        })
        .collect()
}

/// One cell of the rendered month: a grid day and the events falling on it.
#[derive(Debug, Clone, Copy)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub events: &'a [&'a CalendarEvent],
}

#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    pub month: YearMonth,
    pub cells: Vec<DayCell<'a>>,
}

impl<'a> MonthView<'a> {
    pub fn new(month: YearMonth, index: &'a EventIndex<'a>) -> Self {
        let cells = build_grid(month)
            .into_iter()
            .map(|day| DayCell {
                date: day.date,
                in_month: day.in_month,
                events: index.on(day.date),
            })
            .collect();

        Self { month, cells }
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell<'a>> {
        self.cells.chunks(7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counts(month: YearMonth) -> (usize, usize, usize) {
        let grid = build_grid(month);
        let leading = grid.iter().take_while(|d| !d.in_month).count();
        let in_month = grid.iter().filter(|d| d.in_month).count();
        (leading, in_month, grid.len() - leading - in_month)
    }

    #[test]
    fn month_normalizes_with_carry() {
        assert_eq!(YearMonth::new(2026, 13), YearMonth::new(2027, 1));
        assert_eq!(YearMonth::new(2026, 0), YearMonth::new(2025, 12));
        assert_eq!(YearMonth::new(2026, -5), YearMonth::new(2025, 7));
        assert_eq!(YearMonth::new(2026, 25).year(), 2028);
        assert_eq!(YearMonth::new(2026, 1).prev(), YearMonth::new(2025, 12));
        assert_eq!(YearMonth::new(2025, 12).next(), YearMonth::new(2026, 1));
    }

    #[test]
    fn leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn march_2026_starts_on_sunday() {
        let grid = build_grid(YearMonth::new(2026, 3));
        assert_eq!(counts(YearMonth::new(2026, 3)), (0, 31, 4));
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[31].date, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
    }

    #[test]
    fn february_2024() {
        let grid = build_grid(YearMonth::new(2024, 2));
        assert_eq!(counts(YearMonth::new(2024, 2)), (4, 29, 2));

        // buffer days are numbered as the neighbouring months' own days
        let leading: Vec<u32> = grid.iter().take(4).map(|d| d.date.day()).collect();
        assert_eq!(leading, vec![28, 29, 30, 31]);
        let trailing: Vec<u32> = grid.iter().skip(33).map(|d| d.date.day()).collect();
        assert_eq!(trailing, vec![1, 2]);
    }

    #[test]
    fn grid_invariants_hold_for_every_month() {
        for year in [1900, 1999, 2000, 2023, 2024, 2026, 2100] {
            for month in 1..=12 {
                let ym = YearMonth::new(year, month);
                let grid = build_grid(ym);
                let (leading, in_month, _) = counts(ym);

                assert_eq!(grid.len() % 7, 0, "{ym}");
                assert_eq!(in_month as u32, days_in_month(year, month as u32), "{ym}");
                assert_eq!(
                    leading as u32,
                    ym.first_day().weekday().num_days_from_sunday(),
                    "{ym}"
                );
                assert!(grid.windows(2).all(|w| w[1].date == w[0].date + Duration::days(1)));
            }
        }
    }

    #[test]
    fn persisted_months_are_normalized() {
        let ym: YearMonth = serde_json::from_str(r#"{"year":2026,"month":13}"#).unwrap();
        assert_eq!(ym, YearMonth::new(2027, 1));
        assert_eq!(counts(ym), (5, 31, 6));

        let ym: YearMonth = serde_json::from_str(r#"{"year":2026,"month":0}"#).unwrap();
        assert_eq!(ym, YearMonth::new(2025, 12));

        let json = serde_json::to_string(&YearMonth::new(2026, 3)).unwrap();
        assert_eq!(json, r#"{"year":2026,"month":3}"#);
    }

    #[test]
    fn display_label() {
        assert_eq!(YearMonth::new(2026, 3).to_string(), "March 2026");
    }
}

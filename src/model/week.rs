use chrono::{Datelike, NaiveDate, Weekday};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Saturday and Sunday are the only non-working days.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One week bucket of a month, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
#[display(fmt = "week {} ({} to {})", week_number, start, end)]
pub struct WeekWindow {
    /// 1-based position within the month.
    #[schema(example = 2)]
    pub week_number: u32,

    #[schema(example = "2024-02-05", value_type = String, format = "date")]
    pub start: NaiveDate,

    #[schema(example = "2024-02-11", value_type = String, format = "date")]
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Every date of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn working_days(&self) -> impl Iterator<Item = NaiveDate> {
        self.days().filter(|day| is_working_day(*day))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "week_number": 2,
        "start": "2024-02-05",
        "end": "2024-02-11",
        "total_working_days": 5,
        "worked_days": 3,
        "availability": 60
    })
)]
pub struct WeeklySummary {
    pub week_number: u32,
    #[schema(value_type = String, format = "date")]
    pub start: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end: NaiveDate,
    pub total_working_days: u32,
    pub worked_days: u32,
    /// Floor of `worked_days * 100 / total_working_days`, 0 for a weekend-only window.
    pub availability: u32,
}

impl WeeklySummary {
    pub fn new(window: &WeekWindow, total_working_days: u32, worked_days: u32) -> Self {
        let availability = if total_working_days == 0 {
            0
        } else {
            worked_days * 100 / total_working_days
        };

        Self {
            week_number: window.week_number,
            start: window.start,
            end: window.end,
            total_working_days,
            worked_days,
            availability,
        }
    }
}

/// Outcome of rewriting one week's presence records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyReconciliation {
    pub employee_id: u64,
    pub window: WeekWindow,
    /// Records deleted before reinsertion.
    pub removed: usize,
    #[schema(value_type = Vec<String>)]
    pub present_dates: Vec<NaiveDate>,
    /// Set when more days were requested than the window has working days.
    pub capped: bool,
}

/// Partition of a month together with its day totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthCalendar {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 2)]
    pub month: u32,
    #[schema(example = 29)]
    pub total_days: u32,
    #[schema(example = 21)]
    pub total_working_days: u32,
    pub weeks: Vec<WeekWindow>,
}

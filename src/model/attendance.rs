use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Presence status stored per employee and calendar day.
///
/// Only `PRESENT` is ever written. A missing row means the employee was not
/// present that day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 42,
        "employee_id": 1,
        "date": "2024-02-05",
        "status": "PRESENT"
    })
)]
pub struct DailyAttendance {
    #[schema(example = 42)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2024-02-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,
}

/// A day record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDailyAttendance {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl NewDailyAttendance {
    pub fn present(employee_id: u64, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            status: AttendanceStatus::Present,
        }
    }
}

impl DailyAttendance {
    pub fn from_new(id: u64, record: NewDailyAttendance) -> Self {
        Self {
            id,
            employee_id: record.employee_id,
            date: record.date,
            status: record.status,
        }
    }
}

/// Raw `attendance_days` row; the status column is plain VARCHAR.
#[derive(Debug, sqlx::FromRow)]
pub struct DailyAttendanceRow {
    pub id: u64,
    pub employee_id: u64,
    pub date: NaiveDate,
    pub status: String,
}

impl TryFrom<DailyAttendanceRow> for DailyAttendance {
    type Error = strum::ParseError;

    fn try_from(row: DailyAttendanceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status: row.status.parse()?,
        })
    }
}

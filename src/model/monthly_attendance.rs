use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Declared attendance for one employee and calendar month.
///
/// Keyed by `(employee_id, month, year)`; submissions for the same period
/// overwrite the figures in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 3,
        "employee_id": 1,
        "month": 2,
        "year": 2024,
        "total_days": 29,
        "total_working_days": 21,
        "worked_days": 18
    })
)]
pub struct MonthlyAttendance {
    /// `None` until the record has been stored.
    #[schema(example = 3, nullable = true)]
    pub id: Option<u64>,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = 2)]
    pub month: u32,

    #[schema(example = 2024)]
    pub year: i32,

    #[schema(example = 29)]
    pub total_days: u32,

    #[schema(example = 21)]
    pub total_working_days: u32,

    #[schema(example = 18)]
    pub worked_days: u32,
}

/// Monthly record joined with the owning employee, for the admin overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeAttendance {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    #[schema(example = "Engineering", nullable = true)]
    pub department: Option<String>,
    #[schema(example = 2)]
    pub month: u32,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 29)]
    pub total_days: u32,
    #[schema(example = 21)]
    pub total_working_days: u32,
    #[schema(example = 18)]
    pub worked_days: u32,
}

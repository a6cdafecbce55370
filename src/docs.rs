use crate::api::attendance::{PeriodQuery, SubmitAttendance, UpdateWeeklyAttendance};
use crate::model::attendance::{AttendanceStatus, DailyAttendance};
use crate::model::employee::Employee;
use crate::model::monthly_attendance::{EmployeeAttendance, MonthlyAttendance};
use crate::model::week::{MonthCalendar, WeekWindow, WeeklyReconciliation, WeeklySummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "1.0.0",
        description = r#"
## Employee Attendance

Tracks monthly attendance declarations and derives weekly availability from
per-day presence records.

### Weeks
A month is split into weeks that end on **Sunday**. The first week starts on
the 1st and the last week ends on the month's last day, so both may be short.
Weeks are numbered from 1. Saturday and Sunday are never working days.

### Key Features
- **Monthly submission**
  - Declared worked, working and total days, validated and upserted per month
- **Weekly update (admin)**
  - Rewrites a week's presence so the first N working days are marked present
  - Asking for more days than the week has fills every working day
- **Weekly summary (admin)**
  - Working days, worked days and availability percentage per week

### Response Format
- JSON bodies; failures carry a `message` field
"#,
    ),
    paths(
        crate::api::attendance::submit_attendance,
        crate::api::attendance::get_attendance_by_employee,
        crate::api::attendance::list_all_attendance,
        crate::api::attendance::list_employees_attendance,
        crate::api::attendance::update_weekly_attendance,
        crate::api::attendance::weekly_summary,
        crate::api::attendance::presence,
        crate::api::attendance::month_calendar
    ),
    components(
        schemas(
            SubmitAttendance,
            UpdateWeeklyAttendance,
            PeriodQuery,
            MonthlyAttendance,
            EmployeeAttendance,
            Employee,
            AttendanceStatus,
            DailyAttendance,
            WeekWindow,
            WeeklySummary,
            WeeklyReconciliation,
            MonthCalendar
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;

use crate::model::monthly_attendance::{EmployeeAttendance, MonthlyAttendance};
use crate::model::week::{MonthCalendar, WeeklyReconciliation, WeeklySummary};
use crate::service::attendance::AttendanceService;
use crate::service::validation::MonthlyFigures;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct SubmitAttendance {
    #[schema(example = 6)]
    pub month: u32,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 30)]
    pub total_days: u32,
    #[schema(example = 20)]
    pub total_working_days: u32,
    #[schema(example = 18)]
    pub worked_days: u32,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateWeeklyAttendance {
    #[schema(example = 2)]
    pub month: u32,
    #[schema(example = 2024)]
    pub year: i32,
    /// 1-based week of the month, weeks end on Sunday
    #[schema(example = 2)]
    pub week_number: i32,
    /// Working days to mark present, earliest first
    #[schema(example = 3)]
    pub worked_days: u32,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PeriodQuery {
    /// Month number, 1-12
    #[schema(example = 2)]
    pub month: u32,
    #[schema(example = 2024)]
    pub year: i32,
}

/// Employee submits monthly attendance
#[utoipa::path(
    post,
    path = "/api/attendance/submit/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    request_body = SubmitAttendance,
    responses(
        (status = 200, description = "Attendance submitted", body = Object, example = json!({
            "message": "Attendance submitted successfully",
            "employee_id": 1,
            "month": 6,
            "year": 2024
        })),
        (status = 400, description = "Inconsistent figures", body = Object, example = json!({
            "message": "Worked days cannot exceed total working days"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn submit_attendance(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
    payload: web::Json<SubmitAttendance>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let payload = payload.into_inner();

    let saved = service
        .submit_monthly(
            employee_id,
            MonthlyFigures {
                month: payload.month,
                year: payload.year,
                total_days: payload.total_days,
                total_working_days: payload.total_working_days,
                worked_days: payload.worked_days,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance submitted successfully",
        "employee_id": saved.employee_id,
        "month": saved.month,
        "year": saved.year
    })))
}

/// Monthly attendance history of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Monthly records, newest first", body = [MonthlyAttendance]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance_by_employee(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let records = service.get_attendance_by_employee(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Admin: every monthly record
#[utoipa::path(
    get,
    path = "/api/attendance/admin/all",
    responses(
        (status = 200, description = "All monthly records", body = [MonthlyAttendance]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_all_attendance(
    service: web::Data<AttendanceService>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(service.get_all_attendance().await?))
}

/// Admin: monthly records with employee details
#[utoipa::path(
    get,
    path = "/api/attendance/admin/employees-attendance",
    responses(
        (status = 200, description = "Monthly records joined with employees", body = [EmployeeAttendance]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_employees_attendance(
    service: web::Data<AttendanceService>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(service.employees_with_attendance().await?))
}

/// Admin: overwrite one week's presence records
#[utoipa::path(
    put,
    path = "/api/attendance/admin/update/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    request_body = UpdateWeeklyAttendance,
    responses(
        (status = 200, description = "Week rewritten", body = WeeklyReconciliation),
        (status = 400, description = "Invalid week number", body = Object, example = json!({
            "message": "Invalid week number"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn update_weekly_attendance(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
    payload: web::Json<UpdateWeeklyAttendance>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let outcome = service
        .reconcile_week(
            employee_id,
            payload.year,
            payload.month,
            payload.week_number,
            payload.worked_days,
        )
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Admin: weekly availability of one employee for a month
#[utoipa::path(
    get,
    path = "/api/attendance/admin/weekly/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "One summary per week", body = [WeeklySummary]),
        (status = 400, description = "Invalid month"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn weekly_summary(
    service: web::Data<AttendanceService>,
    path: web::Path<u64>,
    query: web::Query<PeriodQuery>,
) -> actix_web::Result<impl Responder> {
    let summary = service
        .summarize_month(path.into_inner(), query.month, query.year)
        .await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Whether the employee is marked present on a date
#[utoipa::path(
    get,
    path = "/api/attendance/presence/{employee_id}/{date}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID"),
        ("date" = String, Path, description = "Calendar date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Presence flag", body = Object, example = json!({
            "employee_id": 1,
            "date": "2024-02-05",
            "present": true
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn presence(
    service: web::Data<AttendanceService>,
    path: web::Path<(u64, NaiveDate)>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, date) = path.into_inner();
    let present = service.is_present(employee_id, date).await?;

    Ok(HttpResponse::Ok().json(json!({
        "employee_id": employee_id,
        "date": date,
        "present": present
    })))
}

/// Week windows and day totals of a month
#[utoipa::path(
    get,
    path = "/api/attendance/calendar",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Month partition", body = MonthCalendar),
        (status = 400, description = "Invalid month")
    ),
    tag = "Attendance"
)]
pub async fn month_calendar(
    service: web::Data<AttendanceService>,
    query: web::Query<PeriodQuery>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(service.month_calendar(query.year, query.month)?))
}

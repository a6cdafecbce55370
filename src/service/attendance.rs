//! Monthly submissions, weekly reconciliation and weekly summaries.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::calendar;
use super::locks::WindowLocks;
use super::validation::{MonthlyFigures, validate_monthly};
use crate::error::AttendanceError;
use crate::model::attendance::{AttendanceStatus, NewDailyAttendance};
use crate::model::employee::Employee;
use crate::model::monthly_attendance::{EmployeeAttendance, MonthlyAttendance};
use crate::model::week::{MonthCalendar, WeekWindow, WeeklyReconciliation, WeeklySummary};
use crate::store::{DailyAttendanceStore, EmployeeLookup, MonthlyAttendanceStore};

#[derive(Clone)]
pub struct AttendanceService {
    employees: Arc<dyn EmployeeLookup>,
    monthly: Arc<dyn MonthlyAttendanceStore>,
    daily: Arc<dyn DailyAttendanceStore>,
    locks: WindowLocks,
}

impl AttendanceService {
    pub fn new(
        employees: Arc<dyn EmployeeLookup>,
        monthly: Arc<dyn MonthlyAttendanceStore>,
        daily: Arc<dyn DailyAttendanceStore>,
        lock_idle: Duration,
    ) -> Self {
        Self {
            employees,
            monthly,
            daily,
            locks: WindowLocks::new(lock_idle),
        }
    }

    async fn require_employee(&self, employee_id: u64) -> Result<Employee, AttendanceError> {
        self.employees
            .find_employee(employee_id)
            .await?
            .ok_or(AttendanceError::EmployeeNotFound { employee_id })
    }

    /// Validates and upserts the monthly figures for `(employee, month, year)`.
    pub async fn submit_monthly(
        &self,
        employee_id: u64,
        figures: MonthlyFigures,
    ) -> Result<MonthlyAttendance, AttendanceError> {
        self.require_employee(employee_id).await?;
        validate_monthly(&figures)?;

        let existing = self
            .monthly
            .find_by_employee_month_year(employee_id, figures.month, figures.year)
            .await?;

        let record = MonthlyAttendance {
            id: existing.and_then(|r| r.id),
            employee_id,
            month: figures.month,
            year: figures.year,
            total_days: figures.total_days,
            total_working_days: figures.total_working_days,
            worked_days: figures.worked_days,
        };
        let updating = record.id.is_some();

        let saved = self.monthly.save(record).await?;
        info!(
            employee_id,
            month = figures.month,
            year = figures.year,
            updating,
            "Monthly attendance submitted"
        );

        Ok(saved)
    }

    pub async fn get_attendance_by_employee(
        &self,
        employee_id: u64,
    ) -> Result<Vec<MonthlyAttendance>, AttendanceError> {
        Ok(self.monthly.find_by_employee(employee_id).await?)
    }

    pub async fn get_all_attendance(&self) -> Result<Vec<MonthlyAttendance>, AttendanceError> {
        Ok(self.monthly.find_all().await?)
    }

    pub async fn employees_with_attendance(
        &self,
    ) -> Result<Vec<EmployeeAttendance>, AttendanceError> {
        Ok(self.monthly.find_all_with_employee().await?)
    }

    /// Rewrites the PRESENT records of one week so that exactly the first
    /// `worked_days` working days are marked.
    ///
    /// Existing records in the window are deleted first, so repeating the
    /// call with the same arguments is a no-op. A count above the window's
    /// working days fills every working day and sets `capped` instead of
    /// failing. The rewrite runs in one transaction under the window lock;
    /// any error drops the transaction and leaves the old records in place.
    pub async fn reconcile_week(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        week_number: i32,
        worked_days: u32,
    ) -> Result<WeeklyReconciliation, AttendanceError> {
        let employee = self.require_employee(employee_id).await?;
        let window = calendar::find_window(year, month, week_number)?;

        let lock = self.locks.for_window(employee_id, &window).await;
        let _guard = lock.lock().await;

        let mut tx = self.daily.begin().await?;

        let existing = tx
            .find_by_employee_and_date_range(employee_id, window.start, window.end)
            .await?;
        for record in &existing {
            tx.delete(record).await?;
        }

        let present_dates: Vec<NaiveDate> =
            window.working_days().take(worked_days as usize).collect();
        for date in &present_dates {
            tx.save(NewDailyAttendance::present(employee_id, *date))
                .await?;
        }

        tx.commit().await?;

        let capped = present_dates.len() < worked_days as usize;
        if capped {
            warn!(
                employee_id,
                %window,
                requested = worked_days,
                assigned = present_dates.len(),
                "Requested worked days exceed the week's working days; capped"
            );
        }
        info!(
            employee_id,
            employee = %employee.full_name(),
            %window,
            removed = existing.len(),
            assigned = present_dates.len(),
            "Weekly attendance reconciled"
        );

        Ok(WeeklyReconciliation {
            employee_id,
            window,
            removed: existing.len(),
            present_dates,
            capped,
        })
    }

    async fn summarize_window(
        &self,
        employee_id: u64,
        window: &WeekWindow,
    ) -> Result<WeeklySummary, AttendanceError> {
        // One range read per window keeps its counts on a single snapshot.
        let records = self
            .daily
            .find_by_employee_and_date_range(employee_id, window.start, window.end)
            .await?;

        let mut total_working_days = 0;
        let mut worked_days = 0;
        for day in window.working_days() {
            total_working_days += 1;
            if records
                .iter()
                .any(|r| r.date == day && r.status == AttendanceStatus::Present)
            {
                worked_days += 1;
            }
        }

        Ok(WeeklySummary::new(window, total_working_days, worked_days))
    }

    /// Per-week working-day totals and availability for one month. Read-only.
    pub async fn summarize_month(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> Result<Vec<WeeklySummary>, AttendanceError> {
        let windows = calendar::partition_month(year, month)?;

        let mut summaries = Vec::with_capacity(windows.len());
        for window in &windows {
            summaries.push(self.summarize_window(employee_id, window).await?);
        }

        debug!(employee_id, month, year, weeks = summaries.len(), "Weekly summary computed");
        Ok(summaries)
    }

    pub async fn is_present(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<bool, AttendanceError> {
        Ok(self
            .daily
            .exists_for_employee_and_date(employee_id, date)
            .await?)
    }

    pub fn month_calendar(&self, year: i32, month: u32) -> Result<MonthCalendar, AttendanceError> {
        calendar::month_calendar(year, month)
    }
}

#[cfg(test)]
#[path = "attendance_tests.rs"]
mod tests;

//! Persistence ports consumed by the attendance service.
//!
//! The service only talks to these traits. [`mysql::MySqlStore`] implements
//! all of them against the live schema; tests use the in-memory store.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::attendance::{DailyAttendance, NewDailyAttendance};
use crate::model::employee::Employee;
use crate::model::monthly_attendance::{EmployeeAttendance, MonthlyAttendance};

#[cfg(test)]
pub mod memory;
pub mod mysql;

/// Errors raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage query failed: {message}")]
    Query { message: String },

    #[error("stored row is malformed: {message}")]
    Corrupt { message: String },
}

impl StoreError {
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::query(err.to_string())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeLookup: Send + Sync {
    async fn find_employee(&self, employee_id: u64) -> Result<Option<Employee>, StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MonthlyAttendanceStore: Send + Sync {
    async fn find_by_employee_month_year(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> Result<Option<MonthlyAttendance>, StoreError>;

    /// Newest period first.
    async fn find_by_employee(
        &self,
        employee_id: u64,
    ) -> Result<Vec<MonthlyAttendance>, StoreError>;

    async fn find_all(&self) -> Result<Vec<MonthlyAttendance>, StoreError>;

    async fn find_all_with_employee(&self) -> Result<Vec<EmployeeAttendance>, StoreError>;

    /// Inserts when `record.id` is `None`, otherwise updates that row.
    /// Returns the stored record with its id filled in.
    async fn save(&self, record: MonthlyAttendance) -> Result<MonthlyAttendance, StoreError>;
}

/// Day-level presence storage.
///
/// Writes go through a [`DailyAttendanceTx`] so that a week can be cleared
/// and refilled atomically.
#[async_trait]
pub trait DailyAttendanceStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn DailyAttendanceTx>, StoreError>;

    /// Records with `start <= date <= end`, ascending by date.
    async fn find_by_employee_and_date_range(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyAttendance>, StoreError>;

    async fn exists_for_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<bool, StoreError>;
}

/// Unit of work over the daily store. Dropping it without [`commit`] rolls
/// every change back.
///
/// [`commit`]: DailyAttendanceTx::commit
#[async_trait]
pub trait DailyAttendanceTx: Send {
    async fn find_by_employee_and_date_range(
        &mut self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyAttendance>, StoreError>;

    async fn delete(&mut self, record: &DailyAttendance) -> Result<(), StoreError>;

    async fn save(&mut self, record: NewDailyAttendance) -> Result<DailyAttendance, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

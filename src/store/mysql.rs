use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::debug;

use super::{
    DailyAttendanceStore, DailyAttendanceTx, EmployeeLookup, MonthlyAttendanceStore, StoreError,
};
use crate::model::attendance::{DailyAttendance, DailyAttendanceRow, NewDailyAttendance};
use crate::model::employee::Employee;
use crate::model::monthly_attendance::{EmployeeAttendance, MonthlyAttendance};

const MONTHLY_COLUMNS: &str =
    "id, employee_id, month, year, total_days, total_working_days, worked_days";

/// sqlx-backed implementation of every storage port.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn into_days(rows: Vec<DailyAttendanceRow>) -> Result<Vec<DailyAttendance>, StoreError> {
    rows.into_iter()
        .map(|row| {
            let id = row.id;
            DailyAttendance::try_from(row)
                .map_err(|e| StoreError::corrupt(format!("attendance_days row {id}: {e}")))
        })
        .collect()
}

#[async_trait]
impl EmployeeLookup for MySqlStore {
    async fn find_employee(&self, employee_id: u64) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, last_name, email, department
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }
}

#[async_trait]
impl MonthlyAttendanceStore for MySqlStore {
    async fn find_by_employee_month_year(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> Result<Option<MonthlyAttendance>, StoreError> {
        let sql = format!(
            "SELECT {MONTHLY_COLUMNS} FROM monthly_attendance \
             WHERE employee_id = ? AND month = ? AND year = ?"
        );
        let record = sqlx::query_as::<_, MonthlyAttendance>(&sql)
            .bind(employee_id)
            .bind(month)
            .bind(year)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_by_employee(
        &self,
        employee_id: u64,
    ) -> Result<Vec<MonthlyAttendance>, StoreError> {
        let sql = format!(
            "SELECT {MONTHLY_COLUMNS} FROM monthly_attendance \
             WHERE employee_id = ? ORDER BY year DESC, month DESC"
        );
        let records = sqlx::query_as::<_, MonthlyAttendance>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn find_all(&self) -> Result<Vec<MonthlyAttendance>, StoreError> {
        let sql = format!(
            "SELECT {MONTHLY_COLUMNS} FROM monthly_attendance \
             ORDER BY year DESC, month DESC, employee_id"
        );
        let records = sqlx::query_as::<_, MonthlyAttendance>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn find_all_with_employee(&self) -> Result<Vec<EmployeeAttendance>, StoreError> {
        let rows = sqlx::query_as::<_, EmployeeAttendance>(
            r#"
            SELECT
                e.id AS employee_id,
                CONCAT(e.first_name, ' ', e.last_name) AS name,
                e.email,
                e.department,
                a.month,
                a.year,
                a.total_days,
                a.total_working_days,
                a.worked_days
            FROM monthly_attendance a
            JOIN employees e ON e.id = a.employee_id
            ORDER BY a.year DESC, a.month DESC, e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn save(&self, record: MonthlyAttendance) -> Result<MonthlyAttendance, StoreError> {
        match record.id {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE monthly_attendance
                    SET total_days = ?, total_working_days = ?, worked_days = ?
                    WHERE id = ?
                    "#,
                )
                .bind(record.total_days)
                .bind(record.total_working_days)
                .bind(record.worked_days)
                .bind(id)
                .execute(&self.pool)
                .await?;

                debug!(id, employee_id = record.employee_id, "Updated monthly attendance");
                Ok(record)
            }
            None => {
                // A concurrent insert for the same period turns into an update;
                // LAST_INSERT_ID(id) makes the existing row id come back.
                let result = sqlx::query(
                    r#"
                    INSERT INTO monthly_attendance
                        (employee_id, month, year, total_days, total_working_days, worked_days)
                    VALUES (?, ?, ?, ?, ?, ?)
                    ON DUPLICATE KEY UPDATE
                        id = LAST_INSERT_ID(id),
                        total_days = VALUES(total_days),
                        total_working_days = VALUES(total_working_days),
                        worked_days = VALUES(worked_days)
                    "#,
                )
                .bind(record.employee_id)
                .bind(record.month)
                .bind(record.year)
                .bind(record.total_days)
                .bind(record.total_working_days)
                .bind(record.worked_days)
                .execute(&self.pool)
                .await?;

                let id = result.last_insert_id();
                debug!(id, employee_id = record.employee_id, "Inserted monthly attendance");
                Ok(MonthlyAttendance {
                    id: Some(id),
                    ..record
                })
            }
        }
    }
}

#[async_trait]
impl DailyAttendanceStore for MySqlStore {
    async fn begin(&self) -> Result<Box<dyn DailyAttendanceTx>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(MySqlDailyTx { tx }))
    }

    async fn find_by_employee_and_date_range(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyAttendance>, StoreError> {
        let rows = sqlx::query_as::<_, DailyAttendanceRow>(
            r#"
            SELECT id, employee_id, date, status
            FROM attendance_days
            WHERE employee_id = ? AND date BETWEEN ? AND ?
            ORDER BY date
            "#,
        )
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        into_days(rows)
    }

    async fn exists_for_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM attendance_days WHERE employee_id = ? AND date = ?
            )
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists != 0)
    }
}

pub struct MySqlDailyTx {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl DailyAttendanceTx for MySqlDailyTx {
    async fn find_by_employee_and_date_range(
        &mut self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyAttendance>, StoreError> {
        // FOR UPDATE keeps other connections off the range until commit.
        let rows = sqlx::query_as::<_, DailyAttendanceRow>(
            r#"
            SELECT id, employee_id, date, status
            FROM attendance_days
            WHERE employee_id = ? AND date BETWEEN ? AND ?
            ORDER BY date
            FOR UPDATE
            "#,
        )
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(&mut *self.tx)
        .await?;

        into_days(rows)
    }

    async fn delete(&mut self, record: &DailyAttendance) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM attendance_days WHERE id = ?")
            .bind(record.id)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn save(&mut self, record: NewDailyAttendance) -> Result<DailyAttendance, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_days (employee_id, date, status)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(record.employee_id)
        .bind(record.date)
        .bind(record.status.as_ref())
        .execute(&mut *self.tx)
        .await?;

        Ok(DailyAttendance::from_new(result.last_insert_id(), record))
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}

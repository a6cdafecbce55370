//! In-memory implementation of every storage port, for tests.
//!
//! Transactions stage their deletes and inserts and apply them in one step on
//! commit, so a transaction dropped half way leaves no trace.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{
    DailyAttendanceStore, DailyAttendanceTx, EmployeeLookup, MonthlyAttendanceStore, StoreError,
};
use crate::model::attendance::{DailyAttendance, NewDailyAttendance};
use crate::model::employee::Employee;
use crate::model::monthly_attendance::{EmployeeAttendance, MonthlyAttendance};

type DayKey = (u64, NaiveDate);

#[derive(Default)]
struct State {
    employees: BTreeMap<u64, Employee>,
    monthly: Vec<MonthlyAttendance>,
    days: BTreeMap<DayKey, DailyAttendance>,
    next_id: u64,
    /// Fail the n-th daily insert (0-based) of any transaction.
    fail_insert_at: Option<usize>,
}

impl State {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("in-memory store poisoned")
    }

    pub fn with_employee(self, id: u64, first_name: &str, last_name: &str) -> Self {
        self.state().employees.insert(
            id,
            Employee {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: format!("{}@company.com", first_name.to_lowercase()),
                department: Some("Engineering".to_string()),
            },
        );
        self
    }

    pub fn fail_insert_at(&self, nth: usize) {
        self.state().fail_insert_at = Some(nth);
    }

    /// Writes a presence record directly, bypassing any transaction.
    pub fn mark_present(&self, employee_id: u64, date: NaiveDate) {
        let mut state = self.state();
        let id = state.allocate_id();
        state.days.insert(
            (employee_id, date),
            DailyAttendance::from_new(id, NewDailyAttendance::present(employee_id, date)),
        );
    }

    pub fn present_dates(&self, employee_id: u64) -> Vec<NaiveDate> {
        self.state()
            .days
            .keys()
            .filter(|(id, _)| *id == employee_id)
            .map(|(_, date)| *date)
            .collect()
    }

    pub fn monthly_records(&self) -> Vec<MonthlyAttendance> {
        self.state().monthly.clone()
    }
}

fn in_range(
    days: &BTreeMap<DayKey, DailyAttendance>,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailyAttendance> {
    days.range((employee_id, start)..=(employee_id, end))
        .map(|(_, record)| record.clone())
        .collect()
}

#[async_trait]
impl EmployeeLookup for InMemoryStore {
    async fn find_employee(&self, employee_id: u64) -> Result<Option<Employee>, StoreError> {
        Ok(self.state().employees.get(&employee_id).cloned())
    }
}

#[async_trait]
impl MonthlyAttendanceStore for InMemoryStore {
    async fn find_by_employee_month_year(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> Result<Option<MonthlyAttendance>, StoreError> {
        Ok(self
            .state()
            .monthly
            .iter()
            .find(|r| r.employee_id == employee_id && r.month == month && r.year == year)
            .cloned())
    }

    async fn find_by_employee(
        &self,
        employee_id: u64,
    ) -> Result<Vec<MonthlyAttendance>, StoreError> {
        let mut records: Vec<_> = self
            .state()
            .monthly
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        Ok(records)
    }

    async fn find_all(&self) -> Result<Vec<MonthlyAttendance>, StoreError> {
        Ok(self.state().monthly.clone())
    }

    async fn find_all_with_employee(&self) -> Result<Vec<EmployeeAttendance>, StoreError> {
        let state = self.state();
        let rows = state
            .monthly
            .iter()
            .filter_map(|r| {
                let employee = state.employees.get(&r.employee_id)?;
                Some(EmployeeAttendance {
                    employee_id: employee.id,
                    name: employee.full_name(),
                    email: employee.email.clone(),
                    department: employee.department.clone(),
                    month: r.month,
                    year: r.year,
                    total_days: r.total_days,
                    total_working_days: r.total_working_days,
                    worked_days: r.worked_days,
                })
            })
            .collect();
        Ok(rows)
    }

    async fn save(&self, record: MonthlyAttendance) -> Result<MonthlyAttendance, StoreError> {
        let mut state = self.state();
        match record.id {
            Some(id) => {
                let slot = state
                    .monthly
                    .iter_mut()
                    .find(|r| r.id == Some(id))
                    .ok_or_else(|| StoreError::query(format!("no monthly record {id}")))?;
                *slot = record.clone();
                Ok(record)
            }
            None => {
                let saved = MonthlyAttendance {
                    id: Some(state.allocate_id()),
                    ..record
                };
                state.monthly.push(saved.clone());
                Ok(saved)
            }
        }
    }
}

#[async_trait]
impl DailyAttendanceStore for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn DailyAttendanceTx>, StoreError> {
        Ok(Box::new(InMemoryTx {
            store: self.clone(),
            deleted: BTreeSet::new(),
            inserted: BTreeMap::new(),
        }))
    }

    async fn find_by_employee_and_date_range(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyAttendance>, StoreError> {
        Ok(in_range(&self.state().days, employee_id, start, end))
    }

    async fn exists_for_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<bool, StoreError> {
        Ok(self.state().days.contains_key(&(employee_id, date)))
    }
}

struct InMemoryTx {
    store: InMemoryStore,
    deleted: BTreeSet<DayKey>,
    inserted: BTreeMap<DayKey, DailyAttendance>,
}

#[async_trait]
impl DailyAttendanceTx for InMemoryTx {
    async fn find_by_employee_and_date_range(
        &mut self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyAttendance>, StoreError> {
        let mut view: BTreeMap<DayKey, DailyAttendance> =
            in_range(&self.store.state().days, employee_id, start, end)
                .into_iter()
                .map(|r| ((r.employee_id, r.date), r))
                .filter(|(key, _)| !self.deleted.contains(key))
                .collect();
        view.extend(
            self.inserted
                .range((employee_id, start)..=(employee_id, end))
                .map(|(key, r)| (*key, r.clone())),
        );
        Ok(view.into_values().collect())
    }

    async fn delete(&mut self, record: &DailyAttendance) -> Result<(), StoreError> {
        let key = (record.employee_id, record.date);
        if self.inserted.remove(&key).is_none() {
            self.deleted.insert(key);
        }
        Ok(())
    }

    async fn save(&mut self, record: NewDailyAttendance) -> Result<DailyAttendance, StoreError> {
        let mut state = self.store.state();
        if state.fail_insert_at == Some(self.inserted.len()) {
            return Err(StoreError::query("simulated insert failure"));
        }
        let key = (record.employee_id, record.date);
        let exists = state.days.contains_key(&key) && !self.deleted.contains(&key);
        if exists || self.inserted.contains_key(&key) {
            return Err(StoreError::query(format!(
                "duplicate attendance day {} for employee {}",
                record.date, record.employee_id
            )));
        }
        let saved = DailyAttendance::from_new(state.allocate_id(), record);
        self.inserted.insert(key, saved.clone());
        Ok(saved)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let this = *self;
        let mut state = this.store.state();
        for key in &this.deleted {
            state.days.remove(key);
        }
        state.days.extend(this.inserted);
        Ok(())
    }
}

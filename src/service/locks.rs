use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::lock::Mutex;
use moka::future::Cache;

use crate::model::week::WeekWindow;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WindowKey {
    employee_id: u64,
    start: NaiveDate,
}

/// One async mutex per (employee, week window).
///
/// Entries expire after `idle` without use, which must comfortably exceed
/// the time a reconciliation holds its lock.
#[derive(Clone)]
pub struct WindowLocks {
    locks: Cache<WindowKey, Arc<Mutex<()>>>,
}

impl WindowLocks {
    pub fn new(idle: Duration) -> Self {
        Self {
            locks: Cache::builder().time_to_idle(idle).build(),
        }
    }

    pub async fn for_window(&self, employee_id: u64, window: &WeekWindow) -> Arc<Mutex<()>> {
        let key = WindowKey {
            employee_id,
            start: window.start,
        };
        self.locks
            .get_with(key, async { Arc::new(Mutex::new(())) })
            .await
    }
}

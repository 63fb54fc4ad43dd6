//! The record store seam and the fetch step that reads every report window.

use crate::error::{EarningsError, Result};
use crate::schema::{EarningsRecord, UserId};
use crate::window::{ReportWindows, Window};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::RwLock;

/// Persistence collaborator for raw earnings records.
pub trait RecordStore {
    fn insert_record(&self, record: EarningsRecord) -> Result<()>;

    /// Records owned by `user` whose date falls in `[window.start, window.end)`.
    fn find_records(&self, user: &UserId, window: &Window) -> Result<Vec<EarningsRecord>>;
}

/// A store whose range queries can run concurrently.
pub trait AsyncRecordStore: Sync {
    fn fetch_records(
        &self,
        user: &UserId,
        window: &Window,
    ) -> impl Future<Output = Result<Vec<EarningsRecord>>> + Send;
}

impl<S: RecordStore + Sync> AsyncRecordStore for S {
    fn fetch_records(
        &self,
        user: &UserId,
        window: &Window,
    ) -> impl Future<Output = Result<Vec<EarningsRecord>>> + Send {
        std::future::ready(self.find_records(user, window))
    }
}

/// Outcome of one window query.
#[derive(Debug)]
pub enum WindowFetch {
    Records(Vec<EarningsRecord>),
    Failed(EarningsError),
}

impl From<Result<Vec<EarningsRecord>>> for WindowFetch {
    fn from(result: Result<Vec<EarningsRecord>>) -> Self {
        match result {
            Ok(records) => WindowFetch::Records(records),
            Err(err) => WindowFetch::Failed(err),
        }
    }
}

impl WindowFetch {
    /// A failed query counts as a window with no records; the report carries on.
    pub fn into_records(self, label: &str) -> Vec<EarningsRecord> {
        match self {
            WindowFetch::Records(records) => {
                debug!("Fetched {} record(s) for {} window", records.len(), label);
                records
            }
            WindowFetch::Failed(err) => {
                warn!("Treating {} window as empty after fetch failure: {}", label, err);
                Vec::new()
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, WindowFetch::Failed(_))
    }
}

/// Records for every window of one report, taken at query time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSnapshot {
    pub today: Vec<EarningsRecord>,
    pub trailing_week: Vec<EarningsRecord>,
    pub current_week: Vec<EarningsRecord>,
    pub previous_week: Vec<EarningsRecord>,
    /// Windows whose query failed and were folded into empty sets.
    pub failed_windows: usize,
}

impl RecordSnapshot {
    pub fn fetch<S: RecordStore + ?Sized>(
        store: &S,
        user: &UserId,
        windows: &ReportWindows,
    ) -> Self {
        Self::assemble([
            store.find_records(user, &windows.today).into(),
            store.find_records(user, &windows.trailing_week).into(),
            store.find_records(user, windows.current_week.window()).into(),
            store.find_records(user, windows.previous_week.window()).into(),
        ])
    }

    /// Same as [`RecordSnapshot::fetch`] but issues the four queries at once.
    pub async fn fetch_concurrent<S: AsyncRecordStore>(
        store: &S,
        user: &UserId,
        windows: &ReportWindows,
    ) -> Self {
        let (today, trailing_week, current_week, previous_week) = futures::join!(
            store.fetch_records(user, &windows.today),
            store.fetch_records(user, &windows.trailing_week),
            store.fetch_records(user, windows.current_week.window()),
            store.fetch_records(user, windows.previous_week.window()),
        );

        Self::assemble([
            today.into(),
            trailing_week.into(),
            current_week.into(),
            previous_week.into(),
        ])
    }

    fn assemble(fetches: [WindowFetch; 4]) -> Self {
        let failed_windows = fetches.iter().filter(|fetch| fetch.is_failed()).count();
        let [today, trailing_week, current_week, previous_week] = fetches;

        Self {
            today: today.into_records("today"),
            trailing_week: trailing_week.into_records("trailing week"),
            current_week: current_week.into_records("current week"),
            previous_week: previous_week.into_records("previous week"),
            failed_windows,
        }
    }

    pub fn record_count(&self) -> usize {
        self.today.len()
            + self.trailing_week.len()
            + self.current_week.len()
            + self.previous_week.len()
    }
}

/// Reference store keeping records in memory, keyed by owner.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<BTreeMap<UserId, Vec<EarningsRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = EarningsRecord>) -> Result<Self> {
        let store = Self::new();
        for record in records {
            store.insert_record(record)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> Result<usize> {
        let guard = self
            .records
            .read()
            .map_err(|_| EarningsError::Store("record lock poisoned".to_string()))?;
        Ok(guard.values().map(Vec::len).sum())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert_record(&self, record: EarningsRecord) -> Result<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| EarningsError::Store("record lock poisoned".to_string()))?;
        guard
            .entry(record.user_id().clone())
            .or_default()
            .push(record);
        Ok(())
    }

    fn find_records(&self, user: &UserId, window: &Window) -> Result<Vec<EarningsRecord>> {
        let guard = self
            .records
            .read()
            .map_err(|_| EarningsError::Store("record lock poisoned".to_string()))?;
        Ok(guard
            .get(user)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| window.contains_date(record.date()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

use crate::schema::{DailyBucket, EarningsRecord, Summary};
use crate::utils::day_label;
use crate::window::WeekWindow;
use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Output of bucketing one week of records.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyBuckets {
    pub buckets: [DailyBucket; 7],
    /// Records that did not land on any of the seven bucket dates.
    pub orphaned: usize,
}

/// Records split by whether their date is one of the week's bucket keys.
pub struct Partition<'a> {
    pub matched: Vec<&'a EarningsRecord>,
    pub orphaned: Vec<&'a EarningsRecord>,
}

pub struct WeeklyBucketizer {
    week: WeekWindow,
}

impl WeeklyBucketizer {
    pub fn new(week: WeekWindow) -> Self {
        Self { week }
    }

    pub fn partition<'a>(&self, records: &'a [EarningsRecord]) -> Partition<'a> {
        let keys = self.week.dates();
        let (matched, orphaned): (Vec<_>, Vec<_>) = records
            .iter()
            .partition(|record| keys.contains(&record.date()));
        Partition { matched, orphaned }
    }

    /// Zero-fills all seven days of the week, then folds matching records into
    /// their day. The result is always Monday-first, whatever order the
    /// records arrive in.
    pub fn bucketize(&self, records: &[EarningsRecord]) -> WeeklyBuckets {
        let dates = self.week.dates();
        let mut grid: BTreeMap<NaiveDate, Summary> =
            dates.iter().map(|date| (*date, Summary::zero())).collect();

        let Partition { matched, orphaned } = self.partition(records);

        for record in matched {
            if let Some(slot) = grid.get_mut(&record.date()) {
                slot.absorb(record);
            }
        }

        if !orphaned.is_empty() {
            warn!(
                "Dropped {} earnings record(s) outside week starting {}",
                orphaned.len(),
                self.week.start_date()
            );
        }
        debug!(
            "Bucketed {} record(s) into week starting {}",
            records.len() - orphaned.len(),
            self.week.start_date()
        );

        let buckets = dates.map(|date| DailyBucket {
            date,
            day_name: day_label(date),
            summary: grid.get(&date).copied().unwrap_or_default(),
        });

        WeeklyBuckets {
            buckets,
            orphaned: orphaned.len(),
        }
    }
}

pub fn bucketize_week(week: WeekWindow, records: &[EarningsRecord]) -> WeeklyBuckets {
    WeeklyBucketizer::new(week).bucketize(records)
}

use crate::aggregator::summarize;
use crate::bucketizer::bucketize_week;
use crate::config::EngineConfig;
use crate::context::{format_context, EarningsContext};
use crate::error::Result;
use crate::growth::compare;
use crate::schema::{EarningsReport, GrowthResult, UserId, WeeklyReport};
use crate::store::{AsyncRecordStore, RecordSnapshot, RecordStore};
use crate::window::ReportWindows;
use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};

/// Everything derived from one snapshot of a user's records.
#[derive(Debug, Clone, PartialEq)]
pub struct EarningsAnalysis {
    pub report: EarningsReport,
    pub weekly: WeeklyReport,
    pub growth: GrowthResult,
    pub record_count: usize,
    pub failed_windows: usize,
}

impl EarningsAnalysis {
    pub fn has_data(&self) -> bool {
        self.record_count > 0
    }

    pub fn context(&self) -> EarningsContext {
        EarningsContext {
            today: self.report.today,
            last_week: self.report.last_week,
            current_week: self.weekly.current_week,
            previous_week: self.weekly.previous_week,
            growth_percentage: self.weekly.growth_percentage,
            record_count: self.record_count,
        }
    }
}

/// Single entry point for both the earnings endpoints and the chat context.
#[derive(Debug, Default)]
pub struct EarningsEngine {
    config: EngineConfig,
}

impl EarningsEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current local wall-clock time, for callers without their own clock.
    pub fn local_now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// Pure reduction of an already-fetched snapshot.
    pub fn analyze(&self, snapshot: &RecordSnapshot, windows: &ReportWindows) -> EarningsAnalysis {
        let report = EarningsReport {
            today: summarize(&snapshot.today),
            last_week: summarize(&snapshot.trailing_week),
        };

        let buckets = bucketize_week(windows.current_week, &snapshot.current_week);
        let growth = compare(
            summarize(&snapshot.current_week),
            summarize(&snapshot.previous_week),
        );

        debug!(
            "Week starting {}: current net {:.2}, previous net {:.2}, growth {:.1}%",
            windows.current_week.start_date(),
            growth.current.net(),
            growth.previous.net(),
            growth.percentage
        );

        let weekly = WeeklyReport {
            daily_buckets: buckets.buckets,
            current_week: growth.current,
            previous_week: growth.previous,
            growth_percentage: growth.percentage,
            week_start_date: windows.current_week.start_date(),
            orphaned_records: buckets.orphaned,
        };

        EarningsAnalysis {
            report,
            weekly,
            growth,
            record_count: snapshot.record_count(),
            failed_windows: snapshot.failed_windows,
        }
    }

    pub fn analyze_user<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        user: &UserId,
        now: NaiveDateTime,
    ) -> EarningsAnalysis {
        info!("Building earnings analysis for user {} at {}", user, now);
        let windows = ReportWindows::resolve(now);
        let snapshot = RecordSnapshot::fetch(store, user, &windows);
        self.finish(user, &snapshot, &windows)
    }

    /// Like [`EarningsEngine::analyze_user`], with the four window queries
    /// issued concurrently.
    pub async fn analyze_user_concurrent<S: AsyncRecordStore>(
        &self,
        store: &S,
        user: &UserId,
        now: NaiveDateTime,
    ) -> EarningsAnalysis {
        info!("Building earnings analysis for user {} at {} (concurrent fetch)", user, now);
        let windows = ReportWindows::resolve(now);
        let snapshot = RecordSnapshot::fetch_concurrent(store, user, &windows).await;
        self.finish(user, &snapshot, &windows)
    }

    fn finish(
        &self,
        user: &UserId,
        snapshot: &RecordSnapshot,
        windows: &ReportWindows,
    ) -> EarningsAnalysis {
        if snapshot.failed_windows > 0 {
            warn!(
                "{} of 4 earnings windows failed for user {}; reporting them as zero",
                snapshot.failed_windows, user
            );
        }
        self.analyze(snapshot, windows)
    }

    /// `{today, lastWeek}` for the plain earnings endpoint.
    pub fn earnings_report<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        user: &UserId,
        now: NaiveDateTime,
    ) -> EarningsReport {
        self.analyze_user(store, user, now).report
    }

    pub fn weekly_report<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        user: &UserId,
        now: NaiveDateTime,
    ) -> WeeklyReport {
        self.analyze_user(store, user, now).weekly
    }

    /// Context block for the chat prompt, or `None` when the user has no data.
    pub fn chat_context<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        user: &UserId,
        now: NaiveDateTime,
    ) -> Option<String> {
        self.render_context(&self.analyze_user(store, user, now))
    }

    pub fn render_context(&self, analysis: &EarningsAnalysis) -> Option<String> {
        format_context(&analysis.context(), &self.config)
    }
}

//! # Driver Earnings
//!
//! Temporal aggregation of driver earnings records into the summaries shown on
//! the earnings dashboard and handed to the assistant's chat prompt.
//!
//! ## Core Concepts
//!
//! - **Window**: a half-open `[start, end)` calendar interval used to select records
//! - **Summary**: revenue, expenses, trips and net over a set of records
//! - **Bucket**: one calendar day of a Monday-anchored week, always present even if empty
//! - **Growth**: week-over-week change in net, reported as 0 when last week's net is not positive
//! - **Context block**: the prose rendering of all of the above for prompt injection
//!
//! Every report reads four windows (today, the seven days before today, the
//! current week and the previous week). A window whose query fails is treated
//! as empty instead of failing the report.
//!
//! ## Example
//!
//! ```rust,ignore
//! use driver_earnings::*;
//! use chrono::NaiveDate;
//!
//! let store = InMemoryRecordStore::new();
//! let user = UserId::new("64f1c2a9e4b0a1b2c3d4e5f6")?;
//!
//! record_earnings(
//!     &store,
//!     &user,
//!     EarningsRequest {
//!         date: "2024-03-06".to_string(),
//!         revenue: 1000.0,
//!         expenses: 300.0,
//!         trips: 5,
//!     },
//! )?;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap().and_hms_opt(18, 0, 0).unwrap();
//! let engine = EarningsEngine::default();
//!
//! let weekly = engine.weekly_report(&store, &user, now);
//! assert_eq!(weekly.current_week.net(), 700.0);
//!
//! if let Some(block) = engine.chat_context(&store, &user, now) {
//!     println!("{block}");
//! }
//! ```

pub mod aggregator;
pub mod bucketizer;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod growth;
pub mod ingestion;
pub mod schema;
pub mod store;
pub mod utils;
pub mod window;

pub use aggregator::summarize;
pub use bucketizer::{bucketize_week, WeeklyBucketizer, WeeklyBuckets};
pub use config::EngineConfig;
pub use context::{format_context, EarningsContext};
pub use engine::{EarningsAnalysis, EarningsEngine};
pub use error::{EarningsError, Result};
pub use growth::{compare, growth_percentage};
pub use ingestion::{record_earnings, EarningsRequest};
pub use schema::*;
pub use store::{AsyncRecordStore, InMemoryRecordStore, RecordSnapshot, RecordStore, WindowFetch};
pub use window::{ReportWindows, WeekWindow, Window};

use crate::error::{EarningsError, Result};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the driver that owns a set of earnings records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EarningsError::InvalidUserId(
                "user id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single day of driving activity.
///
/// Records are immutable once built: every constructor (including
/// deserialization) validates the amounts and derives `net` from them, so a
/// record can never carry a net figure that disagrees with its revenue and
/// expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecordFields")]
pub struct EarningsRecord {
    user_id: UserId,
    date: NaiveDate,
    revenue: f64,
    expenses: f64,
    trips: u32,
    #[serde(rename = "netEarnings")]
    net: f64,
}

impl EarningsRecord {
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        revenue: f64,
        expenses: f64,
        trips: u32,
    ) -> Result<Self> {
        validate_amount("revenue", revenue)?;
        validate_amount("expenses", expenses)?;

        Ok(Self {
            user_id,
            date,
            revenue,
            expenses,
            trips,
            net: revenue - expenses,
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn expenses(&self) -> f64 {
        self.expenses
    }

    pub fn trips(&self) -> u32 {
        self.trips
    }

    pub fn net(&self) -> f64 {
        self.net
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    user_id: UserId,
    date: NaiveDate,
    revenue: f64,
    expenses: f64,
    trips: u32,
}

impl TryFrom<RecordFields> for EarningsRecord {
    type Error = EarningsError;

    fn try_from(fields: RecordFields) -> Result<Self> {
        EarningsRecord::new(
            fields.user_id,
            fields.date,
            fields.revenue,
            fields.expenses,
            fields.trips,
        )
    }
}

fn validate_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EarningsError::InvalidAmount { field, value });
    }
    Ok(())
}

/// Aggregated revenue, expenses, trips and net over some set of records.
///
/// `net` is private and only ever recomputed from the totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", from = "SummaryTotals")]
pub struct Summary {
    #[schemars(description = "Total gross revenue")]
    revenue: f64,
    #[schemars(description = "Total expenses")]
    expenses: f64,
    trips: u32,
    #[serde(rename = "netEarnings")]
    #[schemars(description = "Revenue minus expenses; recomputed from the totals on input")]
    net: f64,
}

impl Summary {
    pub fn new(revenue: f64, expenses: f64, trips: u32) -> Self {
        Self {
            revenue,
            expenses,
            trips,
            net: revenue - expenses,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn expenses(&self) -> f64 {
        self.expenses
    }

    pub fn trips(&self) -> u32 {
        self.trips
    }

    pub fn net(&self) -> f64 {
        self.net
    }

    pub fn is_zero(&self) -> bool {
        self.revenue == 0.0 && self.expenses == 0.0 && self.trips == 0
    }

    /// Adds one record's figures into the running totals.
    pub fn absorb(&mut self, record: &EarningsRecord) {
        *self = Summary::new(
            self.revenue + record.revenue(),
            self.expenses + record.expenses(),
            self.trips.saturating_add(record.trips()),
        );
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryTotals {
    revenue: f64,
    expenses: f64,
    trips: u32,
}

impl From<SummaryTotals> for Summary {
    fn from(totals: SummaryTotals) -> Self {
        Summary::new(totals.revenue, totals.expenses, totals.trips)
    }
}

/// One calendar day inside a week window. Present even when no records exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    pub date: NaiveDate,
    #[schemars(description = "Short English day label, e.g. \"Mon\"")]
    pub day_name: String,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Percentage change in net earnings between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthResult {
    pub current: Summary,
    pub previous: Summary,
    pub percentage: f64,
}

/// Today's totals against the trailing seven days before today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReport {
    pub today: Summary,
    pub last_week: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    #[serde(rename = "weeklyData")]
    #[schemars(description = "Seven daily buckets, Monday first")]
    pub daily_buckets: [DailyBucket; 7],
    pub current_week: Summary,
    pub previous_week: Summary,
    #[schemars(description = "Week-over-week change in net; 0 when last week's net is not positive")]
    pub growth_percentage: f64,
    #[schemars(description = "Monday of the current week")]
    pub week_start_date: NaiveDate,
    /// Records returned for the current week that matched no bucket date.
    #[serde(skip)]
    pub orphaned_records: usize,
}

impl WeeklyReport {
    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(WeeklyReport);
        serde_json::to_string_pretty(&schema)
    }
}

use crate::error::{EarningsError, Result};
use crate::schema::{EarningsRecord, UserId};
use crate::store::RecordStore;
use crate::utils::parse_record_date;
use log::info;
use serde::{Deserialize, Serialize};

/// Incoming "add earnings" payload, as posted by the driver app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsRequest {
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    pub revenue: f64,
    pub expenses: f64,
    pub trips: u32,
}

impl EarningsRequest {
    pub fn into_record(self, user: UserId) -> Result<EarningsRecord> {
        let date = parse_record_date(&self.date)
            .ok_or_else(|| EarningsError::InvalidDate(self.date.clone()))?;
        EarningsRecord::new(user, date, self.revenue, self.expenses, self.trips)
    }
}

/// Validates `request` and stores the resulting record for `user`.
pub fn record_earnings<S: RecordStore + ?Sized>(
    store: &S,
    user: &UserId,
    request: EarningsRequest,
) -> Result<EarningsRecord> {
    let record = request.into_record(user.clone())?;
    store.insert_record(record.clone())?;

    info!(
        "Recorded earnings for user {} on {}: net {:.2} over {} trip(s)",
        user,
        record.date(),
        record.net(),
        record.trips()
    );

    Ok(record)
}

use crate::schema::{EarningsRecord, Summary};

/// Reduces records into a single [`Summary`].
///
/// Net is derived once from the summed revenue and expenses, never by adding
/// up per-record nets. An empty slice yields the zero summary.
pub fn summarize(records: &[EarningsRecord]) -> Summary {
    let (revenue, expenses, trips) = records.iter().fold(
        (0.0_f64, 0.0_f64, 0_u32),
        |(revenue, expenses, trips), record| {
            (
                revenue + record.revenue(),
                expenses + record.expenses(),
                trips.saturating_add(record.trips()),
            )
        },
    );

    Summary::new(revenue, expenses, trips)
}

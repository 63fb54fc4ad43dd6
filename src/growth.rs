use crate::schema::{GrowthResult, Summary};

/// Percentage change in net earnings from `previous` to `current`.
///
/// A previous net that is zero or negative yields `0.0`. This also covers a
/// swing from a loss to a profit, which is deliberately not reported as
/// growth.
pub fn growth_percentage(current: &Summary, previous: &Summary) -> f64 {
    if previous.net() > 0.0 {
        (current.net() - previous.net()) / previous.net() * 100.0
    } else {
        0.0
    }
}

pub fn compare(current: Summary, previous: Summary) -> GrowthResult {
    GrowthResult {
        percentage: growth_percentage(&current, &previous),
        current,
        previous,
    }
}

//! Renders earnings figures as a prose block for an assistant system prompt.
//!
//! The layout is fixed so the consuming prompt always receives the same shape
//! of context: one line per period, then the growth line, then (optionally)
//! the guidance section.

use crate::config::EngineConfig;
use crate::schema::Summary;

pub const CONTEXT_HEADER: &str = "**EARNINGS DATA AVAILABLE:**";

pub const GUIDANCE_SECTION: &str = "**WHEN USER ASKS ABOUT EARNINGS:**
- Provide specific numbers from the data above
- Compare today vs last week, current week vs previous week
- Mention growth percentage if relevant
- Be encouraging and supportive about their progress";

/// Everything the context block reports on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarningsContext {
    pub today: Summary,
    pub last_week: Summary,
    pub current_week: Summary,
    pub previous_week: Summary,
    pub growth_percentage: f64,
    /// Records fetched across all windows. Zero means the user has no data.
    pub record_count: usize,
}

/// Returns `None` when the user has no earnings records at all, so callers
/// leave the section out of the prompt instead of sending zeros.
pub fn format_context(context: &EarningsContext, config: &EngineConfig) -> Option<String> {
    if context.record_count == 0 {
        return None;
    }

    let mut block = String::new();
    block.push_str(CONTEXT_HEADER);
    block.push('\n');

    let periods = [
        ("Today's Earnings", &context.today),
        ("Last Week's Earnings", &context.last_week),
        ("Current Week Total", &context.current_week),
        ("Previous Week Total", &context.previous_week),
    ];
    for (label, summary) in periods {
        block.push_str(&summary_line(label, summary, config));
        block.push('\n');
    }

    block.push_str(&format!(
        "Weekly Growth: {:.*}%",
        config.growth_precision, context.growth_percentage
    ));

    if config.include_guidance {
        block.push_str("\n\n");
        block.push_str(GUIDANCE_SECTION);
    }

    Some(block)
}

fn summary_line(label: &str, summary: &Summary, config: &EngineConfig) -> String {
    let symbol = &config.currency_symbol;
    let precision = config.amount_precision;
    format!(
        "{label}: Revenue: {symbol}{:.*}, Expenses: {symbol}{:.*}, Net Earnings: {symbol}{:.*}, Trips: {}",
        precision,
        summary.revenue(),
        precision,
        summary.expenses(),
        precision,
        summary.net(),
        summary.trips()
    )
}

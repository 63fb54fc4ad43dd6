use crate::error::{EarningsError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_PRECISION: usize = 6;

/// Rendering settings for the chat context block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    #[schemars(description = "Symbol printed in front of every amount (e.g. '₹', '$').")]
    pub currency_symbol: String,

    #[schemars(description = "Decimal places for revenue, expenses and net amounts (0-6).")]
    pub amount_precision: usize,

    #[schemars(description = "Decimal places for the weekly growth percentage (0-6).")]
    pub growth_precision: usize,

    #[schemars(
        description = "Append the instructions telling the assistant how to talk about earnings."
    )]
    pub include_guidance: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            amount_precision: 2,
            growth_precision: 1,
            include_guidance: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount_precision > MAX_PRECISION {
            return Err(EarningsError::InvalidConfig(format!(
                "amount_precision {} exceeds maximum of {}",
                self.amount_precision, MAX_PRECISION
            )));
        }
        if self.growth_precision > MAX_PRECISION {
            return Err(EarningsError::InvalidConfig(format!(
                "growth_precision {} exceeds maximum of {}",
                self.growth_precision, MAX_PRECISION
            )));
        }
        if self.currency_symbol.chars().any(char::is_control) {
            return Err(EarningsError::InvalidConfig(
                "currency_symbol must not contain control characters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(EngineConfig);
        serde_json::to_string_pretty(&schema)
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Result};
use crate::types::TaxBracketTable;

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// income tax table used when a scenario asks for tax-adjusted yields
    pub tax_table: TaxBracketTable,
    /// CDI is estimated as SELIC minus this many percentage points
    pub cdi_spread_percent: Decimal,
    /// number of monthly IPCA points compounded into the annual figure
    pub ipca_window_months: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            tax_table: TaxBracketTable::RegressiveWithholding,
            cdi_spread_percent: dec!(0.1),
            ipca_window_months: 12,
        }
    }
}

impl CalculatorConfig {
    /// configuration reproducing the older bracket table
    pub fn legacy() -> Self {
        Self {
            tax_table: TaxBracketTable::LegacyRetained,
            ..Self::default()
        }
    }

    pub fn with_cdi_spread(mut self, spread_percent: Decimal) -> Self {
        self.cdi_spread_percent = spread_percent;
        self
    }

    /// load from json, validating the result
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig =
            serde_json::from_str(json).map_err(|e| CalculatorError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cdi_spread_percent < Decimal::ZERO {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!("cdi spread cannot be negative: {}", self.cdi_spread_percent),
            });
        }

        if self.ipca_window_months == 0 {
            return Err(CalculatorError::InvalidConfiguration {
                message: "ipca window must cover at least one month".to_string(),
            });
        }

        Ok(())
    }
}

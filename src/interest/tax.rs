use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::decimal::Rate;
use crate::types::TaxBracketTable;

/// whether and how income tax is taken from yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxPolicy {
    pub apply_income_tax: bool,
    pub table: TaxBracketTable,
}

impl TaxPolicy {
    /// yields are not taxed
    pub fn exempt() -> Self {
        Self {
            apply_income_tax: false,
            table: TaxBracketTable::RegressiveWithholding,
        }
    }

    pub fn withholding(table: TaxBracketTable) -> Self {
        Self {
            apply_income_tax: true,
            table,
        }
    }

    /// policy for a yes/no answer, using the configured table
    pub fn from_config(apply_income_tax: bool, config: &CalculatorConfig) -> Self {
        Self {
            apply_income_tax,
            table: config.tax_table,
        }
    }

    /// fraction of the yield kept after tax for a holding of `months`
    pub fn retained_fraction(&self, months: u32) -> Decimal {
        if !self.apply_income_tax {
            return Decimal::ONE;
        }
        retained_fraction(self.table, months)
    }
}

/// fraction of the yield withheld by the regressive table
pub fn regressive_withholding(months: u32) -> Decimal {
    match months {
        0..=6 => dec!(0.225),
        7..=12 => dec!(0.20),
        13..=24 => dec!(0.175),
        _ => dec!(0.15),
    }
}

/// fraction of the yield kept for a holding of `months` under `table`
pub fn retained_fraction(table: TaxBracketTable, months: u32) -> Decimal {
    match table {
        TaxBracketTable::RegressiveWithholding => Decimal::ONE - regressive_withholding(months),
        // strict thresholds: a 6 month holding already falls in the second bracket
        TaxBracketTable::LegacyRetained => match months {
            0..=5 => dec!(0.775),
            6..=11 => dec!(0.80),
            12..=23 => dec!(0.825),
            _ => dec!(0.85),
        },
    }
}

/// apply the income tax haircut to a monthly yield rate
pub fn adjust_for_income_tax(rate: Rate, months: u32, policy: &TaxPolicy) -> Rate {
    rate.scale(policy.retained_fraction(months))
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{check_periods, CalculatorError, Result};

/// a purchase split into equal installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub total_principal: Money,
    pub installment_count: u32,
    pub installment_value: Money,
}

impl InstallmentPlan {
    /// split a total into `count` installments
    pub fn from_total(total: Money, count: u32) -> Result<Self> {
        check_periods(count)?;
        validate_amount("total_principal", total)?;

        Ok(Self {
            total_principal: total,
            installment_count: count,
            installment_value: total / Decimal::from(count),
        })
    }

    /// `count` installments of `value` each
    pub fn from_installments(count: u32, value: Money) -> Result<Self> {
        check_periods(count)?;
        validate_amount("installment_value", value)?;
        let total_principal = value
            .checked_mul(Decimal::from(count))
            .ok_or_else(|| CalculatorError::overflow("installment total"))?;

        Ok(Self {
            total_principal,
            installment_count: count,
            installment_value: value,
        })
    }

    /// all three figures given; the total must match count * value to the cent
    pub fn new(total: Money, count: u32, value: Money) -> Result<Self> {
        let plan = Self::from_installments(count, value)?;
        if !plan.total_principal.approx_eq(total) {
            return Err(CalculatorError::invalid_input("total_principal", total));
        }
        Ok(Self {
            total_principal: total,
            ..plan
        })
    }
}

fn validate_amount(field: &str, amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(CalculatorError::invalid_input(field, amount));
    }
    Ok(())
}

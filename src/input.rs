use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::comparison::{InstallmentInterest, YieldVsInstallments};
use crate::decimal::Money;
use crate::errors::{CalculatorError, Result};
use crate::rates::RateSpec;
use crate::types::{BaseIndex, InterestKind, RateKind, MAX_PERIODS};

/// parse a decimal that may use `,` as separator ("1.234,56" or "1234,56" or "1234.56")
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalculatorError::invalid_input(field, raw));
    }

    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized).map_err(|_| CalculatorError::invalid_input(field, raw))
}

/// like `parse_decimal`, but an empty field means zero
pub fn parse_optional_decimal(field: &str, raw: &str) -> Result<Decimal> {
    if raw.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(field, raw)
}

/// non-negative amount of money
pub fn parse_money(field: &str, raw: &str) -> Result<Money> {
    let value = parse_decimal(field, raw)?;
    if value < Decimal::ZERO {
        return Err(CalculatorError::invalid_input(field, raw));
    }
    Ok(Money::from_decimal(value))
}

/// number of installments or periods, between 1 and `MAX_PERIODS`
pub fn parse_count(field: &str, raw: &str) -> Result<u32> {
    let value = i64::from_str(raw.trim()).map_err(|_| CalculatorError::invalid_input(field, raw))?;
    if value <= 0 || value > i64::from(MAX_PERIODS) {
        return Err(CalculatorError::InvalidPeriodCount { periods: value });
    }
    u32::try_from(value).map_err(|_| CalculatorError::invalid_input(field, raw))
}

/// non-negative whole number, such as days late
pub fn parse_days(field: &str, raw: &str) -> Result<u32> {
    u32::from_str(raw.trim()).map_err(|_| CalculatorError::invalid_input(field, raw))
}

/// yes/no answer: "S"/"N" as the forms send it, plus the usual spellings
pub fn parse_flag(field: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "s" | "sim" | "y" | "yes" | "true" => Ok(true),
        "n" | "nao" | "não" | "no" | "false" | "" => Ok(false),
        _ => Err(CalculatorError::invalid_input(field, raw)),
    }
}

/// build a rate spec from the kind, value and base index fields
pub fn parse_rate_spec(kind: &str, value: &str, base_index: Option<&str>) -> Result<RateSpec> {
    let kind = RateKind::from_str(kind)?;

    let spec = match kind {
        RateKind::ReferenceSelic => RateSpec::selic(),
        RateKind::ReferenceIpca => RateSpec::ipca(),
        RateKind::ReferenceCdi => RateSpec::cdi(),
        RateKind::IndexPercentage => {
            let base = match base_index.map(str::trim) {
                Some(raw) if !raw.is_empty() => BaseIndex::from_str(raw)?,
                _ => {
                    return Err(CalculatorError::InvalidBaseIndex {
                        message: "index percentage requires a base index".to_string(),
                    })
                }
            };
            RateSpec::index_percentage(parse_decimal("rate_value", value)?, base)
        }
        // the form keeps a base index selected even when hidden; it is dropped here
        RateKind::AnnualCustom => RateSpec::annual(parse_decimal("rate_value", value)?),
        RateKind::MonthlyCustom => RateSpec::monthly(parse_decimal("rate_value", value)?),
        RateKind::FlatMonthly => RateSpec::flat_monthly(parse_decimal("rate_value", value)?),
    };

    Ok(spec)
}

/// raw string fields of the yield-vs-installments form, validated by `parse`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldForm {
    pub total: String,
    pub installments: String,
    pub cash_discount_percent: String,
    pub has_installment_interest: String,
    pub interest_kind: String,
    pub interest_percent: String,
    pub rate_kind: String,
    pub rate_value: String,
    pub base_index: String,
    pub apply_income_tax: String,
}

impl YieldForm {
    pub fn parse(&self) -> Result<YieldVsInstallments> {
        let installment_interest = if parse_flag("has_installment_interest", &self.has_installment_interest)? {
            Some(InstallmentInterest {
                kind: InterestKind::from_str(&self.interest_kind)?,
                monthly_percent: parse_decimal("interest_percent", &self.interest_percent)?,
            })
        } else {
            None
        };

        let base_index = Some(self.base_index.as_str()).filter(|b| !b.trim().is_empty());

        Ok(YieldVsInstallments {
            total: parse_money("total", &self.total)?,
            installments: parse_count("installments", &self.installments)?,
            cash_discount_percent: parse_optional_decimal(
                "cash_discount_percent",
                &self.cash_discount_percent,
            )?,
            installment_interest,
            yield_rate: parse_rate_spec(&self.rate_kind, &self.rate_value, base_index)?,
            apply_income_tax: parse_flag("apply_income_tax", &self.apply_income_tax)?,
        })
    }
}

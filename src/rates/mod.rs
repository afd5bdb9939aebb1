pub mod reference;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::decimal::Rate;
use crate::errors::{CalculatorError, Result};
use crate::types::{BaseIndex, RateKind};

pub use reference::{
    accumulate_monthly_percent, parse_sgs_series, ReferenceRateProvider, ReferenceRates,
    SgsObservation, StaticRates,
};

/// a rate as the user specified it, before conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSpec {
    pub kind: RateKind,
    /// percentage figure; ignored for the plain reference kinds
    #[serde(default)]
    pub value: Decimal,
    /// only meaningful for `IndexPercentage`
    #[serde(default)]
    pub base_index: Option<BaseIndex>,
}

impl RateSpec {
    pub fn annual(percent: Decimal) -> Self {
        Self::plain(RateKind::AnnualCustom, percent)
    }

    pub fn monthly(percent: Decimal) -> Self {
        Self::plain(RateKind::MonthlyCustom, percent)
    }

    pub fn flat_monthly(percent: Decimal) -> Self {
        Self::plain(RateKind::FlatMonthly, percent)
    }

    pub fn selic() -> Self {
        Self::plain(RateKind::ReferenceSelic, Decimal::ZERO)
    }

    pub fn ipca() -> Self {
        Self::plain(RateKind::ReferenceIpca, Decimal::ZERO)
    }

    pub fn cdi() -> Self {
        Self::plain(RateKind::ReferenceCdi, Decimal::ZERO)
    }

    /// e.g. 110% of CDI is `index_percentage(dec!(110), BaseIndex::Cdi)`
    pub fn index_percentage(percent: Decimal, base: BaseIndex) -> Self {
        Self {
            kind: RateKind::IndexPercentage,
            value: percent,
            base_index: Some(base),
        }
    }

    fn plain(kind: RateKind, value: Decimal) -> Self {
        Self {
            kind,
            value,
            base_index: None,
        }
    }

    /// a base index must be present exactly when the kind is `IndexPercentage`
    pub fn validate(&self) -> Result<()> {
        match (self.kind, self.base_index) {
            (RateKind::IndexPercentage, None) => Err(CalculatorError::InvalidBaseIndex {
                message: "index percentage requires a base index".to_string(),
            }),
            (RateKind::IndexPercentage, Some(_)) => Ok(()),
            (kind, Some(base)) => Err(CalculatorError::InvalidBaseIndex {
                message: format!("base index {} given for {:?}", base, kind),
            }),
            (_, None) => Ok(()),
        }
    }

    /// monthly decimal rate for this spec
    pub fn to_monthly(&self, reference: &ReferenceRates, config: &CalculatorConfig) -> Result<Rate> {
        monthly_rate(self, reference, config)
    }
}

/// convert an annual percentage to the equivalent monthly decimal rate.
///
/// a loss of 100% or more a year has no monthly equivalent.
pub fn monthly_from_annual(annual_percent: Decimal) -> Result<Rate> {
    if annual_percent <= dec!(-100) {
        return Err(CalculatorError::invalid_input("annual_rate", annual_percent));
    }
    Ok(Rate::from_percent(annual_percent).annual_to_monthly())
}

/// convert a monthly decimal rate back to its annual percentage
pub fn annual_from_monthly(monthly: Rate) -> Decimal {
    monthly.monthly_to_annual().as_percentage()
}

/// convert any rate spec into a single monthly decimal rate
pub fn monthly_rate(
    spec: &RateSpec,
    reference: &ReferenceRates,
    config: &CalculatorConfig,
) -> Result<Rate> {
    spec.validate()?;

    let monthly = match spec.kind {
        RateKind::AnnualCustom => monthly_from_annual(spec.value)?,
        RateKind::MonthlyCustom | RateKind::FlatMonthly => Rate::from_percent(spec.value),
        RateKind::ReferenceSelic => {
            monthly_from_annual(reference.annual_percent(BaseIndex::Selic, config)?)?
        }
        RateKind::ReferenceIpca => {
            monthly_from_annual(reference.annual_percent(BaseIndex::Ipca, config)?)?
        }
        RateKind::ReferenceCdi => {
            monthly_from_annual(reference.annual_percent(BaseIndex::Cdi, config)?)?
        }
        RateKind::IndexPercentage => {
            let base = spec.base_index.ok_or(CalculatorError::InvalidBaseIndex {
                message: "index percentage requires a base index".to_string(),
            })?;
            let base_annual = reference.annual_percent(base, config)?;
            let annual = (spec.value / dec!(100))
                .checked_mul(base_annual)
                .ok_or_else(|| CalculatorError::overflow("index percentage"))?;
            monthly_from_annual(annual)?
        }
    };

    debug!(kind = ?spec.kind, value = %spec.value, monthly = %monthly, "converted rate");
    Ok(monthly)
}

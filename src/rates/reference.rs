use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::config::CalculatorConfig;
use crate::errors::{CalculatorError, Result};
use crate::types::BaseIndex;

/// latest central-bank reference rates, as annual percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReferenceRates {
    pub selic_annual_percent: Option<Decimal>,
    pub ipca_annual_percent: Option<Decimal>,
}

impl ReferenceRates {
    pub fn new(selic_annual_percent: Option<Decimal>, ipca_annual_percent: Option<Decimal>) -> Self {
        Self {
            selic_annual_percent,
            ipca_annual_percent,
        }
    }

    /// no reference data loaded
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// build from monthly IPCA variations (percent per month, oldest first).
    ///
    /// only the trailing `ipca_window_months` points are compounded; with fewer
    /// points IPCA is left unavailable.
    pub fn with_ipca_monthly(
        selic_annual_percent: Option<Decimal>,
        ipca_monthly: &[Decimal],
        config: &CalculatorConfig,
    ) -> Self {
        let window = config.ipca_window_months;
        let ipca_annual_percent = if ipca_monthly.len() >= window {
            Some(accumulate_monthly_percent(&ipca_monthly[ipca_monthly.len() - window..]))
        } else {
            warn!(
                points = ipca_monthly.len(),
                required = window,
                "not enough ipca points for the trailing window"
            );
            None
        };

        Self {
            selic_annual_percent,
            ipca_annual_percent,
        }
    }

    /// CDI estimated as SELIC minus the spread
    pub fn cdi_annual_percent(&self, spread_percent: Decimal) -> Option<Decimal> {
        self.selic_annual_percent.map(|selic| selic - spread_percent)
    }

    /// annual percentage for an index, failing when it was not loaded
    pub fn annual_percent(&self, index: BaseIndex, config: &CalculatorConfig) -> Result<Decimal> {
        let value = match index {
            BaseIndex::Selic => self.selic_annual_percent,
            BaseIndex::Ipca => self.ipca_annual_percent,
            BaseIndex::Cdi => self.cdi_annual_percent(config.cdi_spread_percent),
        };
        value.ok_or(CalculatorError::MissingReferenceRate { index })
    }

    /// build from the raw SGS payloads of the SELIC and IPCA series
    pub fn from_sgs(selic_json: &str, ipca_json: &str, config: &CalculatorConfig) -> Result<Self> {
        let selic = parse_sgs_series(selic_json)?;
        let ipca = parse_sgs_series(ipca_json)?;

        let selic_annual_percent = selic.last().map(|obs| obs.value);
        if selic_annual_percent.is_none() {
            warn!("selic series is empty, selic-based rates will be unavailable");
        }

        let ipca_monthly: Vec<Decimal> = ipca.iter().map(|obs| obs.value).collect();
        Ok(Self::with_ipca_monthly(selic_annual_percent, &ipca_monthly, config))
    }
}

/// compound monthly percentage variations: (prod(1 + m/100) - 1) * 100
pub fn accumulate_monthly_percent(monthly_percent: &[Decimal]) -> Decimal {
    let factor = monthly_percent
        .iter()
        .fold(Decimal::ONE, |acc, m| acc * (Decimal::ONE + m / dec!(100)));
    (factor - Decimal::ONE) * dec!(100)
}

/// one point of a central-bank time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SgsObservation {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Deserialize)]
struct RawObservation {
    data: String,
    valor: String,
}

/// parse an SGS json payload: `[{"data": "dd/mm/yyyy", "valor": "10.50"}, ...]`
pub fn parse_sgs_series(json: &str) -> Result<Vec<SgsObservation>> {
    let raw: Vec<RawObservation> =
        serde_json::from_str(json).map_err(|e| CalculatorError::ReferenceDataError {
            message: e.to_string(),
        })?;

    raw.into_iter()
        .map(|obs| {
            let date = NaiveDate::parse_from_str(obs.data.trim(), "%d/%m/%Y").map_err(|e| {
                CalculatorError::ReferenceDataError {
                    message: format!("bad date {:?}: {}", obs.data, e),
                }
            })?;
            let value = Decimal::from_str(obs.valor.trim()).map_err(|e| {
                CalculatorError::ReferenceDataError {
                    message: format!("bad value {:?}: {}", obs.valor, e),
                }
            })?;
            Ok(SgsObservation { date, value })
        })
        .collect()
}

/// source of reference rates; fetching and caching are up to the implementor
pub trait ReferenceRateProvider {
    fn reference_rates(&self) -> ReferenceRates;
}

/// provider returning fixed values
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRates(pub ReferenceRates);

impl ReferenceRateProvider for StaticRates {
    fn reference_rates(&self) -> ReferenceRates {
        self.0
    }
}

impl ReferenceRateProvider for ReferenceRates {
    fn reference_rates(&self) -> ReferenceRates {
        *self
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CalculatorError;

/// longest plan accepted: 100 years of monthly periods
pub const MAX_PERIODS: u32 = 1_200;

/// how a yield or inflation rate was specified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateKind {
    /// user-supplied annual percentage
    AnnualCustom,
    /// user-supplied monthly percentage
    MonthlyCustom,
    /// current SELIC target
    ReferenceSelic,
    /// trailing 12-month IPCA
    ReferenceIpca,
    /// CDI estimated from SELIC
    ReferenceCdi,
    /// a percentage of SELIC, IPCA or CDI
    IndexPercentage,
    /// flat monthly percentage, used for inflation
    FlatMonthly,
}

impl FromStr for RateKind {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "custom-anual" | "annual-custom" | "annualcustom" => Ok(RateKind::AnnualCustom),
            "custom-mensal" | "monthly-custom" | "monthlycustom" => Ok(RateKind::MonthlyCustom),
            "selic" | "reference-selic" => Ok(RateKind::ReferenceSelic),
            "ipca" | "reference-ipca" => Ok(RateKind::ReferenceIpca),
            "cdi" | "reference-cdi" => Ok(RateKind::ReferenceCdi),
            "indice-percentual" | "index-percentage" | "indexpercentage" => {
                Ok(RateKind::IndexPercentage)
            }
            "inflacao" | "flat-monthly" | "flatmonthly" => Ok(RateKind::FlatMonthly),
            _ => Err(CalculatorError::UnknownRateType {
                kind: s.to_string(),
            }),
        }
    }
}

/// reference index a rate can be pegged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseIndex {
    Selic,
    Ipca,
    Cdi,
}

impl fmt::Display for BaseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BaseIndex::Selic => "SELIC",
            BaseIndex::Ipca => "IPCA",
            BaseIndex::Cdi => "CDI",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for BaseIndex {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selic" => Ok(BaseIndex::Selic),
            "ipca" => Ok(BaseIndex::Ipca),
            "cdi" => Ok(BaseIndex::Cdi),
            _ => Err(CalculatorError::InvalidBaseIndex {
                message: format!("unrecognized base index {:?}", s),
            }),
        }
    }
}

/// interest accrual on installment debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestKind {
    Simple,
    Compound,
}

impl FromStr for InterestKind {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simples" | "simple" => Ok(InterestKind::Simple),
            "composto" | "compound" => Ok(InterestKind::Compound),
            _ => Err(CalculatorError::invalid_input("interest_kind", s)),
        }
    }
}

/// income tax bracket table applied to yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaxBracketTable {
    /// fixed-income regressive withholding: 22.5/20/17.5/15% withheld
    #[default]
    RegressiveWithholding,
    /// older table read as the fraction kept, with strict thresholds.
    /// deprecated: only for reproducing results of the earlier calculators
    LegacyRetained,
}

/// recommendation for a single cash-vs-installments comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    PreferCash,
    PreferInstallments,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::PreferCash => write!(f, "pay in cash"),
            Decision::PreferInstallments => write!(f, "pay in installments"),
        }
    }
}

/// yield simulation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationMode {
    /// yield is taken out each period, balance only shrinks by the payment
    FlatBalance,
    /// yield is added to the balance before the payment leaves it
    Reinvested,
}

/// winner between two installment plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanChoice {
    First,
    Second,
}

pub mod plan;
pub mod scenarios;

use crate::decimal::Money;
use crate::types::Decision;

pub use plan::InstallmentPlan;
pub use scenarios::{
    AlternativeInvestment, CashVsInstallments, ComparePlans, DownPaymentVsCash,
    InflationPresentValue, InstallmentInterest, InvestmentOutcome, LatePayment, PlanComparison,
    PlanTerms, Scenario, ScenarioOutcome, YieldComparison, YieldVsInstallments,
};

/// cash wins only when strictly cheaper; a tie goes to installments
pub fn decide(cash_price: Money, effective_cost: Money) -> Decision {
    if cash_price < effective_cost {
        Decision::PreferCash
    } else {
        Decision::PreferInstallments
    }
}

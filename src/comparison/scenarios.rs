use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::comparison::{decide, InstallmentPlan};
use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::interest::{
    adjust_for_income_tax, present_value_of_installments, project_debt, LatePaymentCharge,
    LatePenalty, PresentValue, TaxPolicy,
};
use crate::rates::{monthly_rate, RateSpec, ReferenceRates};
use crate::simulation::schedule::{simulate_flat_balance, simulate_reinvested};
use crate::simulation::SimulationResult;
use crate::types::{Decision, InterestKind, PlanChoice};

/// monthly yield after conversion and, if asked, income tax for `months`
fn adjusted_yield(
    spec: &RateSpec,
    months: u32,
    apply_income_tax: bool,
    reference: &ReferenceRates,
    config: &CalculatorConfig,
) -> Result<Rate> {
    let monthly = monthly_rate(spec, reference, config)?;
    let policy = TaxPolicy::from_config(apply_income_tax, config);
    Ok(adjust_for_income_tax(monthly, months, &policy))
}

/// interest the seller charges for paying in installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentInterest {
    pub kind: InterestKind,
    pub monthly_percent: Decimal,
}

/// result of comparing a cash price with installments whose money is invested meanwhile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldComparison {
    pub cash_price: Money,
    pub installment_total: Money,
    pub installment_value: Money,
    pub monthly_yield: Rate,
    pub simulation: SimulationResult,
    /// installment total minus accrued yield
    pub effective_cost: Money,
    pub decision: Decision,
}

/// total price with an optional cash discount and optional installment interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldVsInstallments {
    pub total: Money,
    pub installments: u32,
    #[serde(default)]
    pub cash_discount_percent: Decimal,
    #[serde(default)]
    pub installment_interest: Option<InstallmentInterest>,
    pub yield_rate: RateSpec,
    #[serde(default)]
    pub apply_income_tax: bool,
}

impl YieldVsInstallments {
    pub fn evaluate(&self, reference: &ReferenceRates, config: &CalculatorConfig) -> Result<YieldComparison> {
        if self.cash_discount_percent < Decimal::ZERO {
            return Err(CalculatorError::invalid_input(
                "cash_discount_percent",
                self.cash_discount_percent,
            ));
        }

        let discount = self
            .total
            .checked_percentage(self.cash_discount_percent)
            .ok_or_else(|| CalculatorError::overflow("cash discount"))?;
        let cash_price = self.total - discount;
        let installment_total = match self.installment_interest {
            Some(interest) => project_debt(
                self.total,
                self.installments,
                Rate::from_percent(interest.monthly_percent),
                interest.kind,
            )?,
            None => self.total,
        };

        let plan = InstallmentPlan::from_total(installment_total, self.installments)?;
        let monthly_yield = adjusted_yield(
            &self.yield_rate,
            self.installments,
            self.apply_income_tax,
            reference,
            config,
        )?;

        let simulation = simulate_flat_balance(plan.installment_count, plan.installment_value, monthly_yield)?;
        let effective_cost = installment_total - simulation.accrued_yield;
        let decision = decide(cash_price, effective_cost);

        debug!(%cash_price, %effective_cost, ?decision, "yield vs installments evaluated");

        Ok(YieldComparison {
            cash_price,
            installment_total,
            installment_value: plan.installment_value,
            monthly_yield,
            simulation,
            effective_cost,
            decision,
        })
    }
}

/// separate cash price and installment value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashVsInstallments {
    pub cash_price: Money,
    pub installments: u32,
    pub installment_value: Money,
    pub yield_rate: RateSpec,
    #[serde(default)]
    pub apply_income_tax: bool,
}

impl CashVsInstallments {
    pub fn evaluate(&self, reference: &ReferenceRates, config: &CalculatorConfig) -> Result<YieldComparison> {
        let plan = InstallmentPlan::from_installments(self.installments, self.installment_value)?;
        let monthly_yield = adjusted_yield(
            &self.yield_rate,
            self.installments,
            self.apply_income_tax,
            reference,
            config,
        )?;

        let simulation = simulate_flat_balance(plan.installment_count, plan.installment_value, monthly_yield)?;
        let effective_cost = plan.total_principal - simulation.accrued_yield;
        let decision = decide(self.cash_price, effective_cost);

        debug!(cash_price = %self.cash_price, %effective_cost, ?decision, "cash vs installments evaluated");

        Ok(YieldComparison {
            cash_price: self.cash_price,
            installment_total: plan.total_principal,
            installment_value: plan.installment_value,
            monthly_yield,
            simulation,
            effective_cost,
            decision,
        })
    }
}

/// result of investing the cash price and paying the plan out of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentOutcome {
    pub cash_price: Money,
    /// down payment plus all installments, before any yield
    pub nominal_total: Money,
    pub monthly_yield: Rate,
    pub simulation: SimulationResult,
    /// cash price minus what is left invested at the end
    pub effective_cost: Money,
    pub final_balance: Money,
    pub decision: Decision,
}

/// down payment plus installments, against paying cash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownPaymentVsCash {
    pub down_payment: Money,
    pub installments: u32,
    pub installment_value: Money,
    pub cash_price: Money,
    pub yield_rate: RateSpec,
    #[serde(default)]
    pub apply_income_tax: bool,
}

impl DownPaymentVsCash {
    /// installments win when the invested cash price covers the whole plan
    pub fn evaluate(&self, reference: &ReferenceRates, config: &CalculatorConfig) -> Result<InvestmentOutcome> {
        if self.down_payment.is_negative() {
            return Err(CalculatorError::invalid_input("down_payment", self.down_payment));
        }
        let plan = InstallmentPlan::from_installments(self.installments, self.installment_value)?;
        let monthly_yield = adjusted_yield(
            &self.yield_rate,
            self.installments,
            self.apply_income_tax,
            reference,
            config,
        )?;

        let simulation = simulate_reinvested(
            plan.installment_count,
            self.cash_price,
            plan.installment_value,
            self.down_payment,
            monthly_yield,
        )?;
        let final_balance = simulation.final_balance;
        let decision = if final_balance.is_negative() {
            Decision::PreferCash
        } else {
            Decision::PreferInstallments
        };

        debug!(%final_balance, ?decision, "down payment vs cash evaluated");

        Ok(InvestmentOutcome {
            cash_price: self.cash_price,
            nominal_total: self.down_payment + plan.total_principal,
            monthly_yield,
            effective_cost: simulation.effective_cost,
            simulation,
            final_balance,
            decision,
        })
    }
}

/// invest the cash price elsewhere and pay the installments from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeInvestment {
    pub cash_price: Money,
    pub installments: u32,
    pub installment_value: Money,
    pub investment_rate: RateSpec,
    #[serde(default)]
    pub apply_income_tax: bool,
}

impl AlternativeInvestment {
    /// investing wins only when money is left over at the end
    pub fn evaluate(&self, reference: &ReferenceRates, config: &CalculatorConfig) -> Result<InvestmentOutcome> {
        let plan = InstallmentPlan::from_installments(self.installments, self.installment_value)?;
        let monthly_yield = adjusted_yield(
            &self.investment_rate,
            self.installments,
            self.apply_income_tax,
            reference,
            config,
        )?;

        let simulation = simulate_reinvested(
            plan.installment_count,
            self.cash_price,
            plan.installment_value,
            Money::ZERO,
            monthly_yield,
        )?;
        let final_balance = simulation.final_balance;
        let decision = if final_balance > Money::ZERO {
            Decision::PreferInstallments
        } else {
            Decision::PreferCash
        };

        debug!(%final_balance, ?decision, "alternative investment evaluated");

        Ok(InvestmentOutcome {
            cash_price: self.cash_price,
            nominal_total: plan.total_principal,
            monthly_yield,
            effective_cost: simulation.effective_cost,
            simulation,
            final_balance,
            decision,
        })
    }
}

/// installment count and value of one plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTerms {
    pub installments: u32,
    pub installment_value: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanComparison {
    pub first_total: Money,
    pub second_total: Money,
    pub choice: PlanChoice,
}

/// two installment plans compared by nominal total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparePlans {
    pub first: PlanTerms,
    pub second: PlanTerms,
}

impl ComparePlans {
    /// the first plan wins only when strictly cheaper
    pub fn evaluate(&self) -> Result<PlanComparison> {
        let first = InstallmentPlan::from_installments(self.first.installments, self.first.installment_value)?;
        let second =
            InstallmentPlan::from_installments(self.second.installments, self.second.installment_value)?;

        let choice = if first.total_principal < second.total_principal {
            PlanChoice::First
        } else {
            PlanChoice::Second
        };

        Ok(PlanComparison {
            first_total: first.total_principal,
            second_total: second.total_principal,
            choice,
        })
    }
}

/// cost of paying one installment late
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatePayment {
    pub installment_value: Money,
    pub days_late: u32,
    pub penalty: LatePenalty,
}

impl LatePayment {
    pub fn evaluate(&self) -> Result<LatePaymentCharge> {
        // re-validate, the penalty may come straight from deserialized input
        let penalty = LatePenalty::new(self.penalty.fine_percent, self.penalty.daily_interest_percent)?;
        if self.installment_value.is_negative() {
            return Err(CalculatorError::invalid_input("installment_value", self.installment_value));
        }
        penalty.apply(self.installment_value, self.days_late)
    }
}

/// installments discounted by inflation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflationPresentValue {
    pub installments: u32,
    pub installment_value: Money,
    pub inflation_rate: RateSpec,
}

impl InflationPresentValue {
    pub fn evaluate(&self, reference: &ReferenceRates, config: &CalculatorConfig) -> Result<PresentValue> {
        let monthly_inflation = monthly_rate(&self.inflation_rate, reference, config)?;
        present_value_of_installments(self.installment_value, self.installments, monthly_inflation)
    }
}

/// any of the supported comparisons, as received from a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum Scenario {
    YieldVsInstallments(YieldVsInstallments),
    CashVsInstallments(CashVsInstallments),
    DownPaymentVsCash(DownPaymentVsCash),
    ComparePlans(ComparePlans),
    LatePayment(LatePayment),
    InflationPresentValue(InflationPresentValue),
    AlternativeInvestment(AlternativeInvestment),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    YieldVsInstallments(YieldComparison),
    CashVsInstallments(YieldComparison),
    DownPaymentVsCash(InvestmentOutcome),
    ComparePlans(PlanComparison),
    LatePayment(LatePaymentCharge),
    InflationPresentValue(PresentValue),
    AlternativeInvestment(InvestmentOutcome),
}

impl Scenario {
    /// parse a request from json
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CalculatorError::InvalidConfiguration {
            message: format!("invalid scenario: {}", e),
        })
    }

    pub fn evaluate(&self, reference: &ReferenceRates, config: &CalculatorConfig) -> Result<ScenarioOutcome> {
        debug!(scenario = ?self, "evaluating scenario");

        let outcome = match self {
            Scenario::YieldVsInstallments(s) => {
                ScenarioOutcome::YieldVsInstallments(s.evaluate(reference, config)?)
            }
            Scenario::CashVsInstallments(s) => {
                ScenarioOutcome::CashVsInstallments(s.evaluate(reference, config)?)
            }
            Scenario::DownPaymentVsCash(s) => {
                ScenarioOutcome::DownPaymentVsCash(s.evaluate(reference, config)?)
            }
            Scenario::ComparePlans(s) => ScenarioOutcome::ComparePlans(s.evaluate()?),
            Scenario::LatePayment(s) => ScenarioOutcome::LatePayment(s.evaluate()?),
            Scenario::InflationPresentValue(s) => {
                ScenarioOutcome::InflationPresentValue(s.evaluate(reference, config)?)
            }
            Scenario::AlternativeInvestment(s) => {
                ScenarioOutcome::AlternativeInvestment(s.evaluate(reference, config)?)
            }
        };

        Ok(outcome)
    }
}

impl ScenarioOutcome {
    /// cash-vs-installments recommendation, for the scenarios that make one
    pub fn decision(&self) -> Option<Decision> {
        match self {
            ScenarioOutcome::YieldVsInstallments(r) | ScenarioOutcome::CashVsInstallments(r) => {
                Some(r.decision)
            }
            ScenarioOutcome::DownPaymentVsCash(r) | ScenarioOutcome::AlternativeInvestment(r) => {
                Some(r.decision)
            }
            _ => None,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BaseIndex;
    use rust_decimal_macros::dec;

    fn no_rates() -> ReferenceRates {
        ReferenceRates::unavailable()
    }

    fn yield_vs_installments() -> YieldVsInstallments {
        YieldVsInstallments {
            total: Money::from_major(1_200),
            installments: 12,
            cash_discount_percent: Decimal::ZERO,
            installment_interest: None,
            yield_rate: RateSpec::monthly(dec!(1)),
            apply_income_tax: false,
        }
    }

    #[test]
    fn test_yield_vs_installments_end_to_end() {
        let result = yield_vs_installments()
            .evaluate(&no_rates(), &CalculatorConfig::default())
            .unwrap();

        assert_eq!(result.installment_value, Money::from_major(100));
        assert_eq!(result.simulation.accrued_yield, Money::from_major(78));
        assert_eq!(result.effective_cost, Money::from_major(1_122));
        assert_eq!(result.cash_price, Money::from_major(1_200));
        assert_eq!(result.decision, Decision::PreferInstallments);
    }

    #[test]
    fn test_cash_discount_flips_decision() {
        let scenario = YieldVsInstallments {
            cash_discount_percent: dec!(10),
            ..yield_vs_installments()
        };
        let result = scenario.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();

        assert_eq!(result.cash_price, Money::from_major(1_080));
        assert_eq!(result.decision, Decision::PreferCash);
    }

    #[test]
    fn test_installment_interest_and_tax() {
        let scenario = YieldVsInstallments {
            installment_interest: Some(InstallmentInterest {
                kind: InterestKind::Simple,
                monthly_percent: dec!(1),
            }),
            apply_income_tax: true,
            ..yield_vs_installments()
        };
        let result = scenario.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();

        // 1200 * (1 + 0.01 * 12)
        assert_eq!(result.installment_total, Money::from_major(1_344));
        assert_eq!(result.installment_value, Money::from_major(112));
        // 12 months falls in the 20% bracket
        assert_eq!(result.monthly_yield, Rate::from_decimal(dec!(0.008)));
        // 112 * 0.008 * 78
        assert_eq!(result.simulation.accrued_yield, Money::from_str_exact("69.888").unwrap());
        assert_eq!(result.decision, Decision::PreferCash);
    }

    #[test]
    fn test_cash_vs_installments() {
        let scenario = CashVsInstallments {
            cash_price: Money::from_major(1_122),
            installments: 12,
            installment_value: Money::from_major(100),
            yield_rate: RateSpec::monthly(dec!(1)),
            apply_income_tax: false,
        };
        let result = scenario.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();

        assert_eq!(result.installment_total, Money::from_major(1_200));
        assert_eq!(result.effective_cost, Money::from_major(1_122));
        // exact tie goes to installments
        assert_eq!(result.decision, Decision::PreferInstallments);

        let cheaper = CashVsInstallments {
            cash_price: Money::from_cents(112_199),
            ..scenario
        };
        let result = cheaper.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();
        assert_eq!(result.decision, Decision::PreferCash);
    }

    #[test]
    fn test_down_payment_vs_cash() {
        let scenario = DownPaymentVsCash {
            down_payment: Money::from_major(200),
            installments: 2,
            installment_value: Money::from_major(300),
            cash_price: Money::from_major(1_000),
            yield_rate: RateSpec::monthly(dec!(1)),
            apply_income_tax: false,
        };
        let result = scenario.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();

        assert_eq!(result.nominal_total, Money::from_major(800));
        assert_eq!(result.final_balance, Money::from_cents(21_510));
        assert_eq!(result.effective_cost, Money::from_cents(78_490));
        assert_eq!(result.decision, Decision::PreferInstallments);

        let expensive = DownPaymentVsCash {
            down_payment: Money::from_major(600),
            ..scenario
        };
        let result = expensive.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();
        assert!(result.final_balance.is_negative());
        assert_eq!(result.decision, Decision::PreferCash);
    }

    #[test]
    fn test_down_payment_exactly_covered_prefers_installments() {
        // 1000 - (450 + 100) - 450 leaves nothing invested
        let scenario = DownPaymentVsCash {
            down_payment: Money::from_major(100),
            installments: 2,
            installment_value: Money::from_major(450),
            cash_price: Money::from_major(1_000),
            yield_rate: RateSpec::monthly(Decimal::ZERO),
            apply_income_tax: false,
        };
        let result = scenario.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();

        assert_eq!(result.final_balance, Money::ZERO);
        assert_eq!(result.decision, Decision::PreferInstallments);
    }

    #[test]
    fn test_alternative_investment_requires_leftover() {
        let scenario = AlternativeInvestment {
            cash_price: Money::from_major(300),
            installments: 3,
            installment_value: Money::from_major(100),
            investment_rate: RateSpec::monthly(Decimal::ZERO),
            apply_income_tax: false,
        };
        let result = scenario.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();
        assert_eq!(result.final_balance, Money::ZERO);
        assert_eq!(result.decision, Decision::PreferCash);

        let with_yield = AlternativeInvestment {
            investment_rate: RateSpec::monthly(dec!(1)),
            ..scenario
        };
        let result = with_yield.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();
        assert!(result.final_balance > Money::ZERO);
        assert_eq!(result.decision, Decision::PreferInstallments);
    }

    #[test]
    fn test_compare_plans() {
        let comparison = ComparePlans {
            first: PlanTerms { installments: 10, installment_value: Money::from_major(110) },
            second: PlanTerms { installments: 12, installment_value: Money::from_major(95) },
        }
        .evaluate()
        .unwrap();

        assert_eq!(comparison.first_total, Money::from_major(1_100));
        assert_eq!(comparison.second_total, Money::from_major(1_140));
        assert_eq!(comparison.choice, PlanChoice::First);

        let tie = ComparePlans {
            first: PlanTerms { installments: 2, installment_value: Money::from_major(50) },
            second: PlanTerms { installments: 1, installment_value: Money::from_major(100) },
        }
        .evaluate()
        .unwrap();
        assert_eq!(tie.choice, PlanChoice::Second);
    }

    #[test]
    fn test_reference_rate_required() {
        let scenario = YieldVsInstallments {
            yield_rate: RateSpec::index_percentage(dec!(100), BaseIndex::Cdi),
            ..yield_vs_installments()
        };
        assert_eq!(
            scenario.evaluate(&no_rates(), &CalculatorConfig::default()),
            Err(CalculatorError::MissingReferenceRate { index: BaseIndex::Cdi })
        );

        let rates = ReferenceRates::new(Some(dec!(10.5)), None);
        assert!(scenario.evaluate(&rates, &CalculatorConfig::default()).is_ok());
    }

    #[test]
    fn test_scenario_dispatch() {
        let scenario = Scenario::LatePayment(LatePayment {
            installment_value: Money::from_major(100),
            days_late: 10,
            penalty: LatePenalty::new(dec!(2), dec!(0.1)).unwrap(),
        });
        let outcome = scenario.evaluate(&no_rates(), &CalculatorConfig::default()).unwrap();

        match &outcome {
            ScenarioOutcome::LatePayment(charge) => {
                assert_eq!(charge.corrected_value, Money::from_major(103));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(outcome.decision(), None);
    }
}

use rust_decimal::Decimal;
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{check_periods, CalculatorError, Result};
use crate::simulation::{PeriodRow, SimulationResult};
use crate::types::SimulationMode;

/// period-by-period yield simulator
pub struct YieldSimulator {
    mode: SimulationMode,
}

impl YieldSimulator {
    pub fn new(mode: SimulationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    /// run the configured mode.
    ///
    /// `FlatBalance` ignores `opening_balance` and `upfront`: its balance always
    /// starts at `payment * periods`.
    pub fn run(
        &self,
        periods: u32,
        opening_balance: Money,
        payment: Money,
        upfront: Money,
        monthly_rate: Rate,
    ) -> Result<SimulationResult> {
        match self.mode {
            SimulationMode::FlatBalance => simulate_flat_balance(periods, payment, monthly_rate),
            SimulationMode::Reinvested => {
                simulate_reinvested(periods, opening_balance, payment, upfront, monthly_rate)
            }
        }
    }
}

/// yield on the money not yet paid, when it is not reinvested.
///
/// the balance starts at `payment * periods` and drops by one payment each
/// period; the period yield is `balance * rate` and stays out of the balance.
pub fn simulate_flat_balance(periods: u32, payment: Money, monthly_rate: Rate) -> Result<SimulationResult> {
    check_periods(periods)?;

    let nominal_total = payment
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| CalculatorError::overflow("installment total"))?;
    let mut balance = nominal_total;
    let mut accrued_yield = Money::ZERO;
    let mut rows = Vec::with_capacity(periods as usize);

    for period in 1..=periods {
        let period_yield = balance
            .checked_mul(monthly_rate.as_decimal())
            .ok_or_else(|| CalculatorError::overflow("period yield"))?;
        accrued_yield = accrued_yield
            .checked_add(period_yield)
            .ok_or_else(|| CalculatorError::overflow("accrued yield"))?;

        let closing_balance = balance - payment;
        rows.push(PeriodRow {
            period,
            opening_balance: balance,
            period_yield,
            payment,
            closing_balance,
        });

        balance = closing_balance;
    }

    debug!(periods, accrued = %accrued_yield, "flat balance simulation finished");

    let effective_cost = nominal_total
        .checked_sub(accrued_yield)
        .ok_or_else(|| CalculatorError::overflow("effective cost"))?;

    Ok(SimulationResult {
        mode: SimulationMode::FlatBalance,
        accrued_yield,
        rows,
        final_balance: balance,
        effective_cost,
    })
}

/// invest `opening_balance`, let it compound, and pay each installment from it.
///
/// period 1 also pays `upfront` (a down payment). the final balance can go
/// negative when the investment does not cover the plan.
pub fn simulate_reinvested(
    periods: u32,
    opening_balance: Money,
    payment: Money,
    upfront: Money,
    monthly_rate: Rate,
) -> Result<SimulationResult> {
    check_periods(periods)?;

    let mut balance = opening_balance;
    let mut accrued_yield = Money::ZERO;
    let mut rows = Vec::with_capacity(periods as usize);

    for period in 1..=periods {
        let period_yield = balance
            .checked_mul(monthly_rate.as_decimal())
            .ok_or_else(|| CalculatorError::overflow("period yield"))?;
        accrued_yield = accrued_yield
            .checked_add(period_yield)
            .ok_or_else(|| CalculatorError::overflow("accrued yield"))?;

        let paid = if period == 1 {
            payment
                .checked_add(upfront)
                .ok_or_else(|| CalculatorError::overflow("first payment"))?
        } else {
            payment
        };
        let closing_balance = balance
            .checked_add(period_yield)
            .and_then(|b| b.checked_sub(paid))
            .ok_or_else(|| CalculatorError::overflow("reinvested balance"))?;
        rows.push(PeriodRow {
            period,
            opening_balance: balance,
            period_yield,
            payment: paid,
            closing_balance,
        });

        balance = closing_balance;
    }

    debug!(periods, accrued = %accrued_yield, final_balance = %balance, "reinvested simulation finished");

    let effective_cost = opening_balance
        .checked_sub(balance)
        .ok_or_else(|| CalculatorError::overflow("effective cost"))?;

    Ok(SimulationResult {
        mode: SimulationMode::Reinvested,
        accrued_yield,
        rows,
        final_balance: balance,
        effective_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn one_percent() -> Rate {
        Rate::from_decimal(dec!(0.01))
    }

    #[test]
    fn test_single_period_boundary() {
        let result =
            simulate_flat_balance(1, Money::from_major(100), Rate::from_decimal(dec!(0.05))).unwrap();

        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.period, 1);
        assert_eq!(row.opening_balance, Money::from_major(100));
        assert_eq!(row.period_yield, Money::from_major(5));
        assert_eq!(result.accrued_yield, Money::from_major(5));
        assert_eq!(result.final_balance, Money::ZERO);
        assert_eq!(result.effective_cost, Money::from_major(95));
    }

    #[test]
    fn test_flat_balance_twelve_periods() {
        let result = simulate_flat_balance(12, Money::from_major(100), one_percent()).unwrap();

        // 100 * 0.01 * (12 + 11 + ... + 1)
        assert_eq!(result.accrued_yield, Money::from_major(78));
        assert_eq!(result.effective_cost, Money::from_major(1_122));
        assert_eq!(result.final_balance, Money::ZERO);
        assert_eq!(result.total_paid(), Money::from_major(1_200));

        // balance shrinks by the payment only, yield is never added back
        for pair in result.rows.windows(2) {
            assert_eq!(pair[0].opening_balance - pair[1].opening_balance, Money::from_major(100));
        }
        assert_eq!(result.row(12).map(|r| r.opening_balance), Some(Money::from_major(100)));
        assert!(result.row(0).is_none());
    }

    #[test]
    fn test_accrued_yield_matches_rows() {
        let rate = Rate::from_decimal(dec!(0.0087));
        for (periods, payment) in [(3, Money::from_cents(33_333)), (18, Money::from_cents(12_345)), (48, Money::from_major(250))] {
            let flat = simulate_flat_balance(periods, payment, rate).unwrap();
            let sum: Money = flat.rows.iter().map(|r| r.period_yield).sum();
            assert_eq!(flat.accrued_yield, sum);
            assert_eq!(flat.periods(), periods as usize);

            let reinvested =
                simulate_reinvested(periods, Money::from_major(5_000), payment, Money::ZERO, rate).unwrap();
            let sum: Money = reinvested.rows.iter().map(|r| r.period_yield).sum();
            assert_eq!(reinvested.accrued_yield, sum);
        }
    }

    #[test]
    fn test_reinvested_with_upfront() {
        let result = simulate_reinvested(
            2,
            Money::from_major(1_000),
            Money::from_major(300),
            Money::from_major(200),
            one_percent(),
        )
        .unwrap();

        // period 1: 1000 + 10 - (300 + 200) = 510
        let first = &result.rows[0];
        assert_eq!(first.period_yield, Money::from_major(10));
        assert_eq!(first.payment, Money::from_major(500));
        assert_eq!(first.closing_balance, Money::from_major(510));

        // period 2: 510 + 5.10 - 300 = 215.10
        let second = &result.rows[1];
        assert_eq!(second.opening_balance, Money::from_major(510));
        assert_eq!(second.payment, Money::from_major(300));
        assert_eq!(result.final_balance, Money::from_cents(21_510));
        assert_eq!(result.accrued_yield, Money::from_cents(1_510));
        assert_eq!(result.effective_cost, Money::from_cents(78_490));
    }

    #[test]
    fn test_reinvested_can_go_negative() {
        let result = simulate_reinvested(
            3,
            Money::from_major(100),
            Money::from_major(50),
            Money::ZERO,
            Rate::ZERO,
        )
        .unwrap();
        assert_eq!(result.final_balance, Money::from_major(-50));
        assert!(result.final_balance.is_negative());
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert_eq!(
            simulate_flat_balance(0, Money::from_major(100), one_percent()),
            Err(CalculatorError::InvalidPeriodCount { periods: 0 })
        );
        assert!(simulate_reinvested(0, Money::from_major(100), Money::ZERO, Money::ZERO, one_percent()).is_err());
    }

    #[test]
    fn test_period_count_is_capped() {
        assert!(simulate_flat_balance(1_200, Money::from_major(1), one_percent()).is_ok());
        assert_eq!(
            simulate_flat_balance(4_000_000_000, Money::from_major(100), one_percent()),
            Err(CalculatorError::InvalidPeriodCount { periods: 4_000_000_000 })
        );
        assert_eq!(
            simulate_reinvested(1_201, Money::from_major(100), Money::ZERO, Money::ZERO, one_percent()),
            Err(CalculatorError::InvalidPeriodCount { periods: 1_201 })
        );
    }

    #[test]
    fn test_runaway_growth_is_an_error() {
        // doubling every month for 1200 months leaves the decimal range
        let result = simulate_reinvested(
            1_200,
            Money::from_major(1_000),
            Money::ZERO,
            Money::ZERO,
            Rate::from_decimal(dec!(1)),
        );
        assert!(matches!(result, Err(CalculatorError::CalculationOverflow { .. })));
    }

    #[test]
    fn test_simulator_dispatch() {
        let flat = YieldSimulator::new(SimulationMode::FlatBalance);
        let result = flat
            .run(12, Money::from_major(9_999), Money::from_major(100), Money::from_major(9_999), one_percent())
            .unwrap();
        assert_eq!(result.mode, SimulationMode::FlatBalance);
        assert_eq!(result.accrued_yield, Money::from_major(78));

        let reinvested = YieldSimulator::new(SimulationMode::Reinvested);
        assert_eq!(reinvested.mode(), SimulationMode::Reinvested);
        let result = reinvested
            .run(1, Money::from_major(100), Money::from_major(100), Money::ZERO, Rate::ZERO)
            .unwrap();
        assert_eq!(result.final_balance, Money::ZERO);
    }
}

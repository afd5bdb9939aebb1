pub mod schedule;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::SimulationMode;

pub use schedule::YieldSimulator;

/// one period of a yield simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRow {
    pub period: u32,
    pub opening_balance: Money,
    pub period_yield: Money,
    pub payment: Money,
    pub closing_balance: Money,
}

/// outcome of investing money while installments are paid from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub mode: SimulationMode,
    pub accrued_yield: Money,
    pub rows: Vec<PeriodRow>,
    pub final_balance: Money,
    /// what the installments really cost once the yield is accounted for
    pub effective_cost: Money,
}

impl SimulationResult {
    pub fn periods(&self) -> usize {
        self.rows.len()
    }

    /// total paid out of the balance across all periods
    pub fn total_paid(&self) -> Money {
        self.rows.iter().map(|row| row.payment).sum()
    }

    pub fn row(&self, period: u32) -> Option<&PeriodRow> {
        period
            .checked_sub(1)
            .and_then(|index| self.rows.get(index as usize))
    }
}

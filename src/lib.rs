pub mod comparison;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod input;
pub mod interest;
pub mod rates;
pub mod simulation;
pub mod types;

// re-export key types
pub use comparison::{decide, InstallmentPlan, Scenario, ScenarioOutcome};
pub use config::CalculatorConfig;
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, Result};
pub use interest::{adjust_for_income_tax, project_debt, LatePenalty, TaxPolicy};
pub use rates::{monthly_rate, RateSpec, ReferenceRateProvider, ReferenceRates};
pub use simulation::{PeriodRow, SimulationResult, YieldSimulator};
pub use types::{
    BaseIndex, Decision, InterestKind, PlanChoice, RateKind, SimulationMode, TaxBracketTable,
};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;

/// quick start - is it worth paying in installments?
use installment_compare::comparison::YieldVsInstallments;
use installment_compare::{CalculatorConfig, Decimal, Money, RateSpec, ReferenceRates};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // R$1,200 in 12 installments, money invested at 1% a month meanwhile
    let scenario = YieldVsInstallments {
        total: Money::from_major(1_200),
        installments: 12,
        cash_discount_percent: Decimal::ZERO,
        installment_interest: None,
        yield_rate: RateSpec::monthly(dec!(1)),
        apply_income_tax: false,
    };

    let result = scenario.evaluate(&ReferenceRates::unavailable(), &CalculatorConfig::default())?;

    println!("cash price:      R$ {}", result.cash_price.round_cents());
    println!("accrued yield:   R$ {}", result.simulation.accrued_yield.round_cents());
    println!("effective cost:  R$ {}", result.effective_cost.round_cents());
    println!("recommendation:  {}", result.decision);

    Ok(())
}

/// every comparison, driven from json requests
use installment_compare::{CalculatorConfig, ReferenceRates, Scenario};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

const REQUESTS: &[&str] = &[
    r#"{"scenario":"yield_vs_installments","total":"1200","installments":12,"cash_discount_percent":"5",
        "yield_rate":{"kind":"IndexPercentage","value":"100","base_index":"Cdi"},"apply_income_tax":true}"#,
    r#"{"scenario":"cash_vs_installments","cash_price":"1100","installments":10,"installment_value":"115",
        "yield_rate":{"kind":"ReferenceSelic"}}"#,
    r#"{"scenario":"down_payment_vs_cash","down_payment":"300","installments":6,"installment_value":"120",
        "cash_price":"1000","yield_rate":{"kind":"AnnualCustom","value":"11"}}"#,
    r#"{"scenario":"compare_plans","first":{"installments":10,"installment_value":"110"},
        "second":{"installments":12,"installment_value":"95"}}"#,
    r#"{"scenario":"late_payment","installment_value":"250","days_late":15,
        "penalty":{"fine_percent":"2","daily_interest_percent":"0.033"}}"#,
    r#"{"scenario":"inflation_present_value","installments":12,"installment_value":"100",
        "inflation_rate":{"kind":"ReferenceIpca"}}"#,
    r#"{"scenario":"alternative_investment","cash_price":"1000","installments":10,"installment_value":"102",
        "investment_rate":{"kind":"ReferenceCdi"},"apply_income_tax":true}"#,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rates = ReferenceRates::new(Some(dec!(10.75)), Some(dec!(4.42)));
    let config = CalculatorConfig::default();

    for request in REQUESTS {
        let scenario = Scenario::from_json(request)?;
        let outcome = scenario.evaluate(&rates, &config)?;
        match outcome.decision() {
            Some(decision) => println!("=> {}", decision),
            None => println!("=> (no recommendation)"),
        }
        println!("{}", outcome.to_json_pretty()?);
    }

    Ok(())
}

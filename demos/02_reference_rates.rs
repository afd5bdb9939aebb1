/// building reference rates from central-bank payloads
use installment_compare::rates::monthly_from_annual;
use installment_compare::{BaseIndex, CalculatorConfig, RateSpec, ReferenceRates};
use rust_decimal_macros::dec;

// payloads in the shape returned by the SGS api (series 432 and 433)
const SELIC: &str = r#"[{"data":"16/10/2024","valor":"10.75"}]"#;
const IPCA: &str = r#"[
    {"data":"01/10/2023","valor":"0.24"},{"data":"01/11/2023","valor":"0.28"},
    {"data":"01/12/2023","valor":"0.56"},{"data":"01/01/2024","valor":"0.42"},
    {"data":"01/02/2024","valor":"0.83"},{"data":"01/03/2024","valor":"0.16"},
    {"data":"01/04/2024","valor":"0.38"},{"data":"01/05/2024","valor":"0.46"},
    {"data":"01/06/2024","valor":"0.21"},{"data":"01/07/2024","valor":"0.38"},
    {"data":"01/08/2024","valor":"-0.02"},{"data":"01/09/2024","valor":"0.44"}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CalculatorConfig::default();
    let rates = ReferenceRates::from_sgs(SELIC, IPCA, &config)?;

    println!("selic: {:?}", rates.selic_annual_percent);
    println!("ipca (12 months): {:?}", rates.ipca_annual_percent.map(|v| v.round_dp(2)));
    println!("cdi: {:?}", rates.cdi_annual_percent(config.cdi_spread_percent));

    let specs = [
        ("selic", RateSpec::selic()),
        ("ipca", RateSpec::ipca()),
        ("cdi", RateSpec::cdi()),
        ("110% cdi", RateSpec::index_percentage(dec!(110), BaseIndex::Cdi)),
    ];
    for (name, spec) in specs {
        let monthly = spec.to_monthly(&rates, &config)?;
        println!("{:>10}: {}% a month", name, monthly.as_percentage().round_dp(4));
    }

    println!("12% a year is {}% a month", monthly_from_annual(dec!(12))?.as_percentage().round_dp(4));

    Ok(())
}

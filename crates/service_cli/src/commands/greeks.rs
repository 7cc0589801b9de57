//! Greeks command implementation

use pricer_core::types::PricingError;
use pricer_models::analytical::{GreeksBundle, OptionGreeks};
use tracing::info;

use super::ContractArgs;
use crate::Result;

/// Run the greeks command
pub fn run(contract: &ContractArgs) -> Result<GreeksBundle> {
    let parameters = contract.to_parameters();
    parameters.validate().map_err(PricingError::from)?;

    let model = OptionGreeks::from_parameters(parameters);
    let greeks = *model.greeks();
    if !greeks.is_finite() {
        return Err(PricingError::NumericalInstability(format!("{:?}", greeks)).into());
    }

    info!(option_type = %parameters.option_type, "Greeks computed");
    println!("Option price: {:.6}", model.option_price());
    println!("Delta: {:.6}", greeks.delta);
    println!("Gamma: {:.6}", greeks.gamma);
    println!("Vega:  {:.6}", greeks.vega);
    println!("Theta: {:.6}", greeks.theta);
    println!("Rho:   {:.6}", greeks.rho);

    Ok(greeks)
}

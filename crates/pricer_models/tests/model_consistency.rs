//! Integration tests across the Black-Scholes, Greeks and Heston models.

use approx::assert_relative_eq;
use pricer_core::math::distributions::norm_cdf;
use pricer_core::traits::priceable::{GreeksBearing, Priceable, StochasticVolatility};
use pricer_core::types::{OptionType, PricingError};
use pricer_models::analytical::{BlackScholesCore, ContractParameters, OptionGreeks};
use pricer_models::models::heston::{HestonError, HestonModel, HestonParameters, IntegrationConfig};

/// Every capability of an unconfigured model reports "unavailable".
#[test]
fn test_unconfigured_models_fail_closed() {
    let core = BlackScholesCore::default();
    assert!(core.d1().is_nan());
    assert!(core.d2().is_nan());
    assert!(core.k().is_nan());
    assert!(core.option_price().is_nan());
    assert!(core.price().is_err());

    let greeks = OptionGreeks::default();
    assert!(!greeks.greeks_are_finite());

    let heston = HestonModel::default();
    assert!(matches!(heston.price(), Err(PricingError::InvalidInput(_))));
}

/// A model configured field by field matches one built in a single call.
#[test]
fn test_incremental_configuration_matches_constructor() {
    let mut heston = HestonModel::default();
    heston.set_contract(ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2));
    heston.set_v0(0.04);
    heston.set_kappa(2.0);
    heston.set_theta(0.04);
    heston.set_sigma(0.3);
    heston.set_rho(-0.7);

    let direct = HestonModel::new(
        ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2),
        HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
    );
    assert_eq!(heston, direct);
    assert_eq!(heston.correlation(), -0.7);
    assert_eq!(heston.price().unwrap(), direct.price().unwrap());
}

/// The cached derived quantities match the closed-form definitions.
#[test]
fn test_price_is_consistent_with_cached_d1_d2() {
    let core = BlackScholesCore::with_option_type(16.2, 13.3, 18.0, 6.2, 4.5, OptionType::Put);
    let manual = 13.3 * (-6.2_f64 * 18.0).exp() * norm_cdf(-core.d2())
        - 16.2 * norm_cdf(-core.d1());
    assert!((core.option_price() - manual).abs() < 1e-6);
}

/// Heston prices move the right way with the initial variance.
#[test]
fn test_heston_price_increases_with_initial_variance() {
    let config = IntegrationConfig::default();
    let price_at = |v0: f64| {
        HestonModel::new(
            ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2),
            HestonParameters::new(v0, 2.0, 0.04, 0.3, -0.7),
        )
        .price_analytic(&config)
        .unwrap()
    };
    assert!(price_at(0.01) < price_at(0.04));
    assert!(price_at(0.04) < price_at(0.09));
}

/// Put prices from the Heston pricer satisfy basic no-arbitrage bounds.
#[test]
fn test_heston_put_bounds() {
    let model = HestonModel::new(
        ContractParameters::new(100.0, 120.0, 0.5, 0.03, 0.2).with_option_type(OptionType::Put),
        HestonParameters::new(0.09, 1.5, 0.04, 0.5, -0.5),
    );
    let put = model.price_analytic(&IntegrationConfig::default()).unwrap();
    let lower = 120.0 * (-0.03_f64 * 0.5).exp() - 100.0;
    assert!(put >= lower - 1e-6);
    assert!(put <= 120.0);
}

/// A NaN Heston parameter is rejected before any integration.
#[test]
fn test_nan_heston_parameter_is_rejected() {
    let model = HestonModel::new(
        ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2),
        HestonParameters::new(0.04, f64::NAN, 0.04, 0.3, -0.7),
    );
    assert_eq!(
        model.validate(),
        Err(HestonError::NonFinite("kappa = NaN".to_string()))
    );
    assert_relative_eq!(model.delta(), 0.6368, epsilon = 1e-3);
}

/// Heston calls do not lose value as expiry lengthens, down to very short dates.
#[test]
fn test_heston_call_non_decreasing_in_expiry() {
    let config = IntegrationConfig::default();
    for strike in [100.0, 120.0] {
        let prices: Vec<f64> = [1e-4, 1e-3, 1e-2, 0.1, 0.5, 1.0]
            .iter()
            .map(|&expiry| {
                HestonModel::new(
                    ContractParameters::new(100.0, strike, expiry, 0.05, 0.2),
                    HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
                )
                .price_analytic(&config)
                .unwrap()
            })
            .collect();
        assert!(prices.iter().all(|&p| p >= 0.0), "K = {}: {:?}", strike, prices);
        assert!(
            prices.windows(2).all(|w| w[1] >= w[0] - 1e-9),
            "K = {}: {:?}",
            strike,
            prices
        );
    }
}

//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that math functions are accessible via absolute path.
#[test]
fn test_math_module_exports() {
    use pricer_core::math::distributions::{cdf_k_factor, norm_cdf, norm_pdf};
    use pricer_core::math::quadrature::trapezoid;
    use pricer_core::math::statistics::root_mean_square_error;

    let _ = cdf_k_factor(0.5_f64);
    let _ = norm_pdf(0.0_f64);
    assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-8);
    assert!((trapezoid(|x| x, 0.0, 1.0, 10) - 0.5).abs() < 1e-12);
    assert_eq!(root_mean_square_error(&[1.0], &[1.0]).unwrap(), 0.0);
}

/// Test that the flat re-exports in `math` resolve to the same functions.
#[test]
fn test_math_reexports() {
    use pricer_core::math::{norm_cdf, norm_pdf};

    assert_eq!(
        norm_cdf(1.0_f64),
        pricer_core::math::distributions::norm_cdf(1.0_f64)
    );
    assert_eq!(
        norm_pdf(1.0_f64),
        pricer_core::math::distributions::norm_pdf(1.0_f64)
    );
}

/// Test that trait module is accessible via absolute path.
#[test]
fn test_traits_module_exports() {
    use pricer_core::traits::priceable::{GreeksBearing, Priceable};
    use pricer_core::traits::Float;
    use pricer_core::types::error::PricingError;

    struct TestInstrument {
        value: f64,
    }

    impl Priceable for TestInstrument {
        fn price(&self) -> Result<f64, PricingError> {
            Ok(self.value)
        }
    }

    impl GreeksBearing for TestInstrument {
        fn delta(&self) -> f64 {
            1.0
        }
        fn gamma(&self) -> f64 {
            0.0
        }
        fn vega(&self) -> f64 {
            0.0
        }
        fn theta(&self) -> f64 {
            0.0
        }
        fn rho(&self) -> f64 {
            0.0
        }
    }

    let instrument = TestInstrument { value: 100.0 };
    assert_eq!(instrument.price().unwrap(), 100.0);
    assert!(instrument.greeks_are_finite());

    fn generic_sqrt<T: Float>(x: T) -> T {
        x.sqrt()
    }
    assert_eq!(generic_sqrt(4.0_f64), 2.0);
}

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::option_type::OptionType;
    use pricer_core::types::{OptionType as Reexported, PricingError};

    let put: OptionType = "put".parse().unwrap();
    assert_eq!(put, Reexported::Put);

    let err = "straddle".parse::<OptionType>().unwrap_err();
    assert!(matches!(err, PricingError::InvalidOptionType(_)));
}

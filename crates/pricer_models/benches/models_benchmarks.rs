//! Criterion benchmarks for pricer_models.
//!
//! Compares the closed-form Black-Scholes price and Greeks against the
//! Heston Fourier pricer at several quadrature resolutions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::OptionType;
use pricer_models::analytical::{black_scholes_price, ContractParameters, OptionGreeks};
use pricer_models::models::heston::{HestonModel, HestonParameters, IntegrationConfig};

fn reference_contract() -> ContractParameters {
    ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2)
}

/// Benchmark the Black-Scholes kernel and the full Greeks recomputation.
fn bench_black_scholes(c: &mut Criterion) {
    let mut group = c.benchmark_group("black_scholes");

    group.bench_function("price", |b| {
        b.iter(|| {
            black_scholes_price(
                black_box(100.0),
                black_box(100.0),
                black_box(1.0),
                black_box(0.05),
                black_box(0.2),
                OptionType::Call,
            )
        });
    });

    group.bench_function("greeks", |b| {
        b.iter(|| OptionGreeks::from_parameters(black_box(reference_contract())));
    });

    group.finish();
}

/// Benchmark the Heston semi-analytic pricer.
fn bench_heston_analytic(c: &mut Criterion) {
    let mut group = c.benchmark_group("heston_analytic");
    let model = HestonModel::new(
        reference_contract(),
        HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
    );

    for steps in [250_usize, 1000, 4000] {
        let config = IntegrationConfig {
            upper_limit: 100.0,
            steps,
        };
        group.bench_with_input(BenchmarkId::new("steps", steps), &config, |b, config| {
            b.iter(|| model.price_analytic(black_box(config)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_black_scholes, bench_heston_analytic);
criterion_main!(benches);

use criterion::{Criterion, criterion_group, criterion_main};
use options_risk::prelude::*;
use std::hint::black_box;

fn portfolio(n: usize) -> Vec<OptionLeg> {
    (0..n)
        .map(|i| {
            let strike = 40000.0 + (i % 40) as f64 * 1000.0;
            let days = 7.0 + (i % 12) as f64 * 15.0;
            let (option_type, suffix) = if i % 2 == 0 {
                (OptionType::Call, "C")
            } else {
                (OptionType::Put, "P")
            };
            let side = if i % 3 == 0 {
                TradeSide::Sell
            } else {
                TradeSide::Buy
            };
            OptionLeg::new(
                format!("BTC-BENCH-{strike}-{suffix}"),
                60000.0,
                strike,
                days / DAYS_PER_YEAR,
                0.5 + (i % 5) as f64 * 0.05,
                DEFAULT_RISK_FREE_RATE,
                option_type,
                side,
            )
            .with_size(1.0 + (i % 4) as f64)
        })
        .collect()
}

fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricing");
    let params = PricingParams::call(60000.0, 62000.0, 30.0 / DAYS_PER_YEAR, 0.01);

    group.bench_function("greeks", |b| {
        b.iter(|| BlackScholes::greeks(black_box(&params), black_box(0.6)))
    });
    group.bench_function("price", |b| {
        b.iter(|| BlackScholes::price(black_box(&params), black_box(0.6)))
    });

    let market_price = BlackScholes::price(&params, 0.6);
    let config = SolverConfig::default();
    group.bench_function("implied_volatility", |b| {
        b.iter(|| solve_iv(black_box(&params), black_box(market_price), &config))
    });

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for n in [10, 100, 1000] {
        let legs = portfolio(n);
        group.bench_function(format!("general_{n}"), |b| {
            b.iter(|| aggregate_greeks(black_box(&legs)))
        });
    }

    let pair = portfolio(2);
    group.bench_function("calendar_spread", |b| {
        b.iter(|| calendar_spread_greeks(black_box(&pair)))
    });

    let records = TradeRecord::list_from_json(
        r#"[{"instrument_name": "BTC-29MAR24-60000-C", "index_price": "60000", "dte": "30", "iv": "60", "direction": "buy", "amount": "2"}]"#,
    )
    .unwrap_or_default();
    let config = RiskConfig::default();
    group.bench_function("adapt_record", |b| {
        b.iter(|| legs_from_records(black_box(&records), &config))
    });

    group.finish();
}

criterion_group!(benches, bench_pricing, bench_aggregation);
criterion_main!(benches);

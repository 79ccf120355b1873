use options_risk::prelude::*;

const TOLERANCE: f64 = 1e-4;

#[test]
fn implied_volatility_inverts_price() {
    let spot = 60000.0;
    for strike in [54000.0, 57000.0, 60000.0, 63000.0, 66000.0] {
        for days in [30.0, 60.0, 90.0, 180.0] {
            let t = days / DAYS_PER_YEAR;
            for vol in [0.1, 0.3, 0.6, 0.9, 1.2, 1.8, 2.5] {
                for option_type in [OptionType::Call, OptionType::Put] {
                    let price = compute_price(spot, strike, t, 0.01, vol, option_type);
                    let iv = compute_implied_volatility(spot, strike, t, 0.01, price, option_type);
                    assert!(
                        (iv - vol).abs() < TOLERANCE,
                        "K={strike} days={days} vol={vol} {option_type:?}: got {iv}"
                    );
                }
            }
        }
    }
}

#[test]
fn solver_reports_convergence() {
    let params = PricingParams::put(3000.0, 3200.0, 14.0 / DAYS_PER_YEAR, 0.01);
    let market_price = BlackScholes::price(&params, 0.8);

    let solution = solve_iv(&params, market_price, &SolverConfig::default());
    assert!(solution.is_converged());
    assert!((solution.volatility_percent() - 80.0).abs() < 0.01);
    assert!(solution.iterations <= 10);
}

#[test]
fn non_positive_inputs_return_zero_without_iterating() {
    assert_eq!(
        compute_implied_volatility(60000.0, 60000.0, 0.0, 0.01, 1000.0, OptionType::Call),
        0.0
    );
    assert_eq!(
        compute_implied_volatility(60000.0, 60000.0, 0.1, 0.01, 0.0, OptionType::Call),
        0.0
    );

    let params = PricingParams::call(60000.0, 60000.0, -1.0, 0.01);
    let solution = solve_iv(&params, 1000.0, &SolverConfig::default());
    assert_eq!(solution.status, SolverStatus::InvalidInput);
    assert_eq!(solution.iterations, 0);
}

#[test]
fn solver_always_returns_a_number() {
    // Deep in the wings the seed sits where vega vanishes; the search stops
    // early but still yields a finite value.
    let iv = compute_implied_volatility(
        60000.0,
        200000.0,
        7.0 / DAYS_PER_YEAR,
        0.01,
        5.0,
        OptionType::Call,
    );
    assert!(iv.is_finite());
}

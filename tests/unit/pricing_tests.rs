use options_risk::prelude::*;

const SPOTS: [f64; 3] = [3000.0, 60000.0, 100.0];
const MONEYNESS: [f64; 5] = [0.7, 0.9, 1.0, 1.1, 1.4];
const TIMES: [f64; 4] = [1.0 / 365.25, 7.0 / 365.25, 30.0 / 365.25, 1.0];
const RATES: [f64; 3] = [0.0, 0.01, 0.05];
const VOLS: [f64; 4] = [0.05, 0.3, 0.6, 1.5];

fn assert_rel(actual: f64, expected: f64, what: &str) {
    let scale = expected.abs().max(1e-12);
    assert!(
        ((actual - expected) / scale).abs() < 1e-9,
        "{what}: got {actual}, expected {expected}"
    );
}

#[test]
fn atm_one_month_call_regression() {
    let greeks = compute_greeks(60000.0, 60000.0, 30.0 / 365.0, 0.01, 0.60, OptionType::Call);

    assert!(greeks.delta > 0.52 && greeks.delta < 0.55);
    assert!(greeks.gamma > 0.0);
    assert!(greeks.vega > 0.0);
    assert!(greeks.theta < 0.0);

    assert_rel(greeks.delta, 0.5361685510627705, "delta");
    assert_rel(greeks.gamma, 3.8494939408351795e-05, "gamma");
    assert_rel(greeks.theta, -69.06247254419867, "theta");
    assert_rel(greeks.vega, 6834.170064825195, "vega");

    let price = compute_price(60000.0, 60000.0, 30.0 / 365.0, 0.01, 0.60, OptionType::Call);
    assert_rel(price, 4135.3770481063875, "price");
}

#[test]
fn atm_one_month_put_regression() {
    let greeks = compute_greeks(60000.0, 60000.0, 30.0 / 365.0, 0.01, 0.60, OptionType::Put);

    assert_rel(greeks.delta, -0.4638314489372295, "delta");
    assert_rel(greeks.gamma, 3.8494939408351795e-05, "gamma");
    assert_rel(greeks.theta, -67.42111169019668, "theta");
    assert_rel(greeks.vega, 6834.170064825195, "vega");

    let price = compute_price(60000.0, 60000.0, 30.0 / 365.0, 0.01, 0.60, OptionType::Put);
    assert_rel(price, 4086.082240528427, "price");
}

#[test]
fn expired_option_is_exactly_zero() {
    let greeks = compute_greeks(100.0, 100.0, 0.0, 0.01, 0.5, OptionType::Call);
    assert_eq!(greeks, Greeks::zero());
    assert_eq!(greeks.delta, 0.0);
    assert_eq!(greeks.gamma, 0.0);
    assert_eq!(greeks.theta, 0.0);
    assert_eq!(greeks.vega, 0.0);

    assert_eq!(
        compute_price(100.0, 100.0, -0.1, 0.01, 0.5, OptionType::Put),
        0.0
    );
}

#[test]
fn zero_volatility_is_exactly_zero() {
    for option_type in [OptionType::Call, OptionType::Put] {
        assert_eq!(
            compute_greeks(100.0, 90.0, 0.5, 0.01, 0.0, option_type),
            Greeks::zero()
        );
        assert_eq!(compute_price(100.0, 90.0, 0.5, 0.01, 0.0, option_type), 0.0);
    }
}

#[test]
fn put_call_parity_holds_across_grid() {
    for spot in SPOTS {
        for m in MONEYNESS {
            let strike = spot * m;
            for t in TIMES {
                for r in RATES {
                    for vol in VOLS {
                        let call = compute_price(spot, strike, t, r, vol, OptionType::Call);
                        let put = compute_price(spot, strike, t, r, vol, OptionType::Put);
                        let parity = spot - strike * (-r * t).exp();
                        assert!(
                            (call - put - parity).abs() < 1e-4,
                            "parity broken at S={spot} K={strike} T={t} r={r} vol={vol}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn delta_bounds_across_grid() {
    for spot in SPOTS {
        for m in MONEYNESS {
            let strike = spot * m;
            for t in TIMES {
                for r in RATES {
                    for vol in VOLS {
                        let call = compute_greeks(spot, strike, t, r, vol, OptionType::Call);
                        let put = compute_greeks(spot, strike, t, r, vol, OptionType::Put);
                        assert!((0.0..=1.0).contains(&call.delta), "call delta {}", call.delta);
                        assert!((-1.0..=0.0).contains(&put.delta), "put delta {}", put.delta);
                        assert!(call.gamma >= 0.0);
                        assert!(call.vega >= 0.0);
                        assert!((call.gamma - put.gamma).abs() < 1e-12);
                    }
                }
            }
        }
    }
}

#[test]
fn theta_is_per_calendar_day() {
    let params = PricingParams::call(60000.0, 65000.0, 45.0 / 365.25, 0.01);
    let daily = BlackScholes::greeks(&params, 0.55).theta;
    let annual = BlackScholes::theta_annual(&params, 0.55);
    assert!((daily - annual / DAYS_PER_YEAR).abs() < 1e-9);
}

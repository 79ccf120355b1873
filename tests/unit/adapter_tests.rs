use options_risk::prelude::*;

const TRADES: &str = r#"[
    {"instrument_name": "BTC-29MAR24-60000-C", "index_price": "60000", "dte": 30, "iv": "60", "direction": "buy", "amount": "2"},
    {"instrument_name": "BTC-29MAR24-55000-P", "index_price": 60000, "dte": "30", "iv": 65, "direction": "sell"},
    {"instrument_name": "BTC-26APR24-70000-C", "index_price": 60000, "dte": 58, "iv": 58, "direction": "buy", "amount": "n/a"},
    {"instrument_name": "ETH-29MAR24-3000-P", "index_price": 3100, "dte": 30, "direction": "buy"}
]"#;

const MESSY_TRADES: &str = r#"[
    {"instrument_name": "BTC-29MAR24-60000-C", "index_price": 60000, "underlying_price": 60005, "dte": 30, "days_to_expiry": "30", "iv": 60, "implied_volatility": 61, "direction": "buy", "amount": 2, "contracts": 2},
    "not a trade",
    {"instrument": "BTC-29MAR24-55000-P", "instrument_name": "BTC-29MAR24-55000-P", "spot": "oops", "index_price": "60000", "dte": 30, "iv": "65", "side": "sell", "direction": "sell", "size": -4, "kind": "put", "option_type": "p"},
    {"instrument_name": 17, "iv": {"bad": true}, "side": [1]},
    null
]"#;

#[test]
fn records_adapt_into_legs() {
    let records = TradeRecord::list_from_json(TRADES).unwrap();
    let config = RiskConfig::default();
    let legs = legs_from_records(&records, &config);

    assert_eq!(legs.len(), 4);

    assert_eq!(legs[0].option_type, Some(OptionType::Call));
    assert_eq!(legs[0].side, Some(TradeSide::Buy));
    assert_eq!(legs[0].size, 2.0);
    assert_eq!(legs[0].volatility, 0.6);
    assert_eq!(legs[0].time_to_expiry, 30.0 / DAYS_PER_YEAR);
    assert_eq!(legs[0].risk_free_rate, DEFAULT_RISK_FREE_RATE);

    assert_eq!(legs[1].option_type, Some(OptionType::Put));
    assert_eq!(legs[1].side, Some(TradeSide::Sell));
    assert_eq!(legs[1].strike, 55000.0);

    // Unparseable size defaults to one contract.
    assert_eq!(legs[2].size, 1.0);

    // Missing iv means zero volatility, which prices to zero.
    assert_eq!(legs[3].volatility, 0.0);
    assert!(legs[3].unit_greeks().is_zero());
}

#[test]
fn adapted_legs_match_direct_pricing() {
    let records = TradeRecord::list_from_json(TRADES).unwrap();
    let legs = legs_from_records(&records, &RiskConfig::default());

    let direct = compute_greeks(
        60000.0,
        60000.0,
        30.0 / DAYS_PER_YEAR,
        DEFAULT_RISK_FREE_RATE,
        0.6,
        OptionType::Call,
    );
    assert_eq!(legs[0].unit_greeks(), direct);
    assert_eq!(legs[0].signed_greeks(), direct.scale(2.0));
}

#[test]
fn portfolio_from_records_end_to_end() {
    let records = TradeRecord::list_from_json(TRADES).unwrap();
    let legs = legs_from_records(&records, &RiskConfig::default());

    let total = aggregate_portfolio(&legs);
    let expected: Greeks = legs.iter().map(OptionLeg::signed_greeks).sum();
    assert_eq!(total, expected);
    assert!(total.delta > 0.0);
}

#[test]
fn engine_over_in_memory_source() {
    let source = InMemoryTradeSource::from_json(TRADES).unwrap();
    let engine = RiskEngine::new(source)
        .with_config(RiskConfig::default().with_days_per_year(365.0));

    let btc = TradeFilter::all().with_underlying("BTC");
    let legs = engine.legs(&btc).unwrap();
    assert_eq!(legs.len(), 3);
    assert_eq!(legs[0].time_to_expiry, 30.0 / 365.0);

    let report = engine.report(&btc).unwrap();
    assert_eq!(report.mode, AggregationMode::General);
    assert_eq!(report.greeks, aggregate_greeks(&legs));

    let json = report.to_json().unwrap();
    let restored = RiskReport::from_json(&json).unwrap();
    assert_eq!(restored.legs.len(), 3);

    let btc_calls = btc.with_option_type(OptionType::Call);
    let pair = engine.legs(&btc_calls).unwrap();
    assert_eq!(pair.len(), 2);
    assert_eq!(
        engine.portfolio_greeks(&btc_calls).unwrap(),
        calendar_spread_greeks(&pair)
    );
}

#[test]
fn messy_batch_keeps_every_row() {
    let records = TradeRecord::list_from_json(MESSY_TRADES).unwrap();
    assert_eq!(records.len(), 5);

    let legs = legs_from_records(&records, &RiskConfig::default());
    assert_eq!(legs.len(), 5);

    assert_eq!(legs[0].spot, 60000.0);
    assert_eq!(legs[0].size, 2.0);
    assert_eq!(legs[0].volatility, 0.6);
    assert_eq!(legs[0].side, Some(TradeSide::Buy));

    assert_eq!(legs[1], OptionLeg::from_record(&TradeRecord::default(), &RiskConfig::default()));

    assert_eq!(legs[2].spot, 60000.0);
    assert_eq!(legs[2].strike, 55000.0);
    assert_eq!(legs[2].size, 1.0);
    assert_eq!(legs[2].option_type, Some(OptionType::Put));
    assert_eq!(legs[2].side, Some(TradeSide::Sell));

    assert_eq!(legs[3].instrument_name, "17");
    assert!(legs[3].signed_greeks().is_zero());
    assert!(legs[4].signed_greeks().is_zero());

    let total = aggregate_portfolio(&legs);
    assert_eq!(total, legs[0].signed_greeks() + legs[2].signed_greeks());

    let source = InMemoryTradeSource::from_json(MESSY_TRADES).unwrap();
    assert_eq!(source.len(), 5);
}

#[test]
fn configured_day_count_drives_daily_theta() {
    let source = InMemoryTradeSource::from_json(TRADES).unwrap();
    let engine = RiskEngine::new(source)
        .with_config(RiskConfig::default().with_days_per_year(365.0));
    let legs = engine.legs(&TradeFilter::all().with_underlying("BTC")).unwrap();

    let params = PricingParams::call(60000.0, 60000.0, 30.0 / 365.0, DEFAULT_RISK_FREE_RATE);
    let annual = BlackScholes::theta_annual(&params, 0.6);
    let theta = legs[0].unit_greeks().theta;

    assert!((theta - annual / 365.0).abs() < 1e-9);
    assert!((theta - annual / DAYS_PER_YEAR).abs() > 1e-3);
}

#[test]
fn strict_parsers_reject_garbage() {
    assert!(matches!(
        "straddle".parse::<OptionType>(),
        Err(AnalyticsError::InvalidOptionType { .. })
    ));
    assert!(matches!(
        "hodl".parse::<TradeSide>(),
        Err(AnalyticsError::InvalidSide { .. })
    ));
}

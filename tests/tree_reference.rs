use approx::assert_relative_eq;
use openlattice::core::{OptionType, PricingError};
use openlattice::engines::monte_carlo::price_asian_mc;
use openlattice::engines::tree::{Lattice, NodeKey, value_option};
use openlattice::instruments::VanillaOption;

#[test]
fn lattice_levels_and_prices_follow_the_closed_form() {
    let (s0, u, d) = (100.0, 1.2, 0.8);
    for steps in [0_usize, 1, 2, 5, 10, 25] {
        let lattice = Lattice::build(s0, u, d, steps).unwrap();
        for (level, nodes) in lattice.levels().iter().enumerate() {
            assert_eq!(nodes.len(), level + 1);
            for node in nodes {
                // Price at (i, j) with j down moves is S0 * u^(i-j) * d^j.
                let i = node.level() as i32;
                let j = node.down_count as i32;
                assert_relative_eq!(
                    lattice.node_price(*node),
                    s0 * u.powi(i - j) * d.powi(j),
                    epsilon = 1e-12
                );
            }
        }
    }
}

#[test]
fn european_reference_scenario_prices_at_sixteen_and_a_half() {
    // S0=100, u=1.2, d=0.8, N=2, r=0, K=90: terminal payoffs {54, 6, 0},
    // p = 0.5, discount = 1, level-1 values {30, 3}, root 16.5.
    let lattice = Lattice::build(100.0, 1.2, 0.8, 2).unwrap();
    let valuation =
        value_option(&lattice, &VanillaOption::european_call(90.0, 2.0), 0.0).unwrap();

    let terminal: Vec<f64> = lattice
        .terminal()
        .iter()
        .map(|&node| valuation.value(node).unwrap())
        .collect();
    assert_relative_eq!(terminal[0], 54.0, epsilon = 1e-9);
    assert_relative_eq!(terminal[1], 6.0, epsilon = 1e-9);
    assert_relative_eq!(terminal[2], 0.0, epsilon = 1e-9);
    assert_relative_eq!(valuation.price(), 16.5, epsilon = 1e-9);
}

#[test]
fn european_put_call_parity_holds_to_one_e_minus_nine() {
    let (s0, k, r, t) = (100.0, 95.0, 0.03, 1.5);
    let lattice = Lattice::build(s0, 1.15, 0.85, 40).unwrap();

    let call = value_option(&lattice, &VanillaOption::european_call(k, t), r)
        .unwrap()
        .price();
    let put = value_option(&lattice, &VanillaOption::european_put(k, t), r)
        .unwrap()
        .price();

    assert_relative_eq!(call - put, s0 - k * (-r * t).exp(), epsilon = 1e-9);
}

#[test]
fn american_price_dominates_european_across_contracts() {
    let lattice = Lattice::build(100.0, 1.1, 0.9, 30).unwrap();
    for (strike, rate, expiry) in [(90.0, 0.0, 1.0), (100.0, 0.05, 2.0), (120.0, 0.02, 0.5)] {
        for side in [OptionType::Call, OptionType::Put] {
            let european = VanillaOption {
                option_type: side,
                strike,
                expiry,
                exercise: openlattice::core::ExerciseStyle::European,
            };
            let american = VanillaOption {
                exercise: openlattice::core::ExerciseStyle::American,
                ..european
            };

            let eu = value_option(&lattice, &european, rate).unwrap().price();
            let am = value_option(&lattice, &american, rate).unwrap().price();
            assert!(
                am >= eu - 1e-12,
                "american {am} must dominate european {eu} for strike {strike}"
            );
        }
    }
}

#[test]
fn zero_step_lattice_collapses_to_the_terminal_payoff_at_spot() {
    let lattice = Lattice::build(100.0, 1.2, 0.8, 0).unwrap();

    let call = value_option(&lattice, &VanillaOption::european_call(90.0, 0.0), 0.1).unwrap();
    assert_relative_eq!(call.price(), 10.0, epsilon = 1e-12);
    assert_eq!(call.values().len(), 1);
    assert!(call.deltas().is_empty());

    let put = value_option(&lattice, &VanillaOption::american_put(120.0, 0.0), 0.1).unwrap();
    assert_relative_eq!(put.price(), 20.0, epsilon = 1e-12);
}

#[test]
fn swapped_factors_fail_as_invalid_market_parameters_in_monte_carlo() {
    // u=0.8, d=1.2 with r=0.1 and dt=1: the growth factor cannot lie inside
    // the inverted band, so the operation must refuse to price.
    let result = price_asian_mc(OptionType::Call, 100.0, 90.0, 2.0, 0.1, 0.8, 1.2, 2, 1_000, 42);
    assert!(matches!(
        result,
        Err(PricingError::InvalidMarketParameters(_))
    ));
}

#[test]
fn excessive_rate_breaks_the_no_arbitrage_bound_on_the_lattice() {
    let lattice = Lattice::build(100.0, 1.05, 0.95, 2).unwrap();
    let result = value_option(&lattice, &VanillaOption::european_call(100.0, 2.0), 0.5);
    assert!(matches!(
        result,
        Err(PricingError::InvalidMarketParameters(_))
    ));
}

#[test]
fn value_and_delta_tables_cover_exactly_the_expected_levels() {
    let steps = 6;
    let lattice = Lattice::build(100.0, 1.2, 0.8, steps).unwrap();
    let valuation =
        value_option(&lattice, &VanillaOption::american_put(100.0, 1.0), 0.02).unwrap();

    let node_count = (steps + 1) * (steps + 2) / 2;
    assert_eq!(valuation.values().len(), node_count);
    assert_eq!(valuation.deltas().len(), node_count - (steps + 1));
    assert!(valuation.delta(NodeKey::root()).is_some());
    for &node in lattice.terminal() {
        assert!(valuation.delta(node).is_none());
    }
}

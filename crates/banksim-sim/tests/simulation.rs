//! End-to-end simulation runs: seeding, daily stepping, settlement,
//! and curve degradation.

use approx::assert_relative_eq;

use banksim_books::Side;
use banksim_core::daycounts::DayCountConvention;
use banksim_core::Date;
use banksim_sim::{BondRow, LoanRow, ScenarioData, SimError, Simulation, SimulationState, Tenor, YieldGrid};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn flat_grid(date: Date, rate: f64) -> YieldGrid {
    let mut grid = YieldGrid::new(vec![
        Tenor::from_months(1),
        Tenor::from_months(3),
        Tenor::from_years(1),
        Tenor::from_years(10),
    ]);
    grid.insert_row(date, vec![rate; 4]).unwrap();
    // Coverage through every date the tests step over
    grid.insert_row(date.add_days(3650), vec![rate; 4]).unwrap();
    grid
}

/// Runs the simulation day by day until `until`, returning the summed
/// banking and trading flows.
fn run_until(sim: &mut Simulation, until: Date) -> (f64, f64) {
    let mut banking = 0.0;
    let mut trading = 0.0;
    while sim.current_date() < until {
        let report = sim.advance().unwrap().expect("yield data exhausted");
        banking += report.banking_flows;
        trading += report.trading_flows;
    }
    (banking, trading)
}

#[test]
fn test_mortgage_flows_conserve_cash() {
    let start = d(2023, 3, 1);
    let mut scenario = ScenarioData::new(start, flat_grid(start, 0.04));
    scenario.banking_cash = 1_000_000.0;
    scenario.common_equity = 500_000.0;
    scenario.mortgages.push(LoanRow {
        principal: 100_000.0,
        rate: 0.06,
        term_months: 12,
    });

    let mut sim = Simulation::from_scenario(scenario).unwrap();
    sim.start();
    // Past the adjusted final payment date
    let (banking_flows, trading_flows) = run_until(&mut sim, d(2024, 3, 10));

    // Level annuity: twelve monthly payments return the principal plus
    // interest on the declining balance
    let i: f64 = 0.06 / 12.0;
    let payment = 100_000.0 * i / (1.0 - (1.0 + i).powi(-12));
    assert_relative_eq!(banking_flows, payment * 12.0, epsilon = 1e-4);
    assert_eq!(trading_flows, 0.0);

    // Every settled flow landed in the banking cash account
    assert_relative_eq!(
        sim.bank().banking_book().cash_amount(),
        1_000_000.0 + banking_flows,
        epsilon = 1e-6
    );

    // The loan has fully amortized off the balance sheet
    let report = {
        sim.stop();
        sim.start();
        sim.advance().unwrap().unwrap()
    };
    let mortgages = report.banking.assets.child("Mortgages").unwrap();
    assert!(mortgages.value.abs() < 1e-6);
}

#[test]
fn test_short_position_pays_away_from_banking_cash() {
    let start = d(2023, 3, 1);
    let maturity = d(2023, 9, 1);
    let mut scenario = ScenarioData::new(start, flat_grid(start, 0.04));
    scenario.banking_cash = 50_000.0;
    scenario.treasury_notes.push(BondRow {
        face_value: 10_000.0,
        coupon_rate: 0.04,
        maturity,
        side: Side::Short,
    });

    let mut sim = Simulation::from_scenario(scenario).unwrap();
    sim.start();
    let (banking_flows, trading_flows) = run_until(&mut sim, d(2023, 9, 10));

    // Single coupon period plus redemption, paid away by the short
    let coupon = 10_000.0 * 0.04 * DayCountConvention::ActActIsda.year_fraction(start, maturity);
    assert_relative_eq!(trading_flows, -(10_000.0 + coupon), epsilon = 1e-9);
    assert_eq!(banking_flows, 0.0);

    // The short's obligation comes out of the bank's one cash account
    assert_relative_eq!(
        sim.bank().banking_book().cash_amount(),
        50_000.0 + trading_flows,
        epsilon = 1e-9
    );
    assert_eq!(sim.bank().trading_book().cash_amount(), 0.0);
}

#[test]
fn test_unusable_yields_keep_previous_curve() {
    let start = d(2023, 3, 1);
    let mut grid = flat_grid(start, 0.04);
    // Tomorrow's row cannot bootstrap (rates below -100%)
    grid.insert_row(start.add_days(1), vec![-5.0; 4]).unwrap();

    let mut scenario = ScenarioData::new(start, grid);
    scenario.banking_cash = 100_000.0;

    let mut sim = Simulation::from_scenario(scenario).unwrap();
    sim.start();
    let report = sim.advance().unwrap().unwrap();

    // The step completes on the stale curve
    assert!(!report.curve_rebuilt);
    assert_eq!(report.date, d(2023, 3, 2));
    assert!(sim.curve().is_linked());
}

#[test]
fn test_stop_and_restart_continue_from_current_date() {
    let start = d(2023, 3, 1);
    let mut scenario = ScenarioData::new(start, flat_grid(start, 0.04));
    scenario.banking_cash = 100_000.0;

    let mut sim = Simulation::from_scenario(scenario).unwrap();
    sim.start();
    sim.advance().unwrap();
    sim.advance().unwrap();

    sim.stop();
    assert_eq!(sim.state(), SimulationState::Stopped);
    assert!(matches!(sim.advance(), Err(SimError::NotRunning { .. })));

    // A stopped simulation can still be nudged manually
    let report = sim.next().unwrap().unwrap();
    assert_eq!(report.date, d(2023, 3, 4));
    assert_eq!(sim.state(), SimulationState::Stopped);

    sim.start();
    let report = sim.advance().unwrap().unwrap();
    assert_eq!(report.date, d(2023, 3, 5));
}

#[test]
fn test_simulation_stops_at_end_of_yield_data() {
    let start = d(2023, 3, 1);
    let mut grid = YieldGrid::new(vec![
        Tenor::from_months(1),
        Tenor::from_months(3),
        Tenor::from_years(1),
        Tenor::from_years(10),
    ]);
    grid.insert_row(start, vec![0.04; 4]).unwrap();
    grid.insert_row(d(2023, 3, 4), vec![0.04; 4]).unwrap();

    let mut scenario = ScenarioData::new(start, grid);
    scenario.banking_cash = 100_000.0;
    let mut sim = Simulation::from_scenario(scenario).unwrap();

    sim.start();
    let mut steps = 0;
    while sim.advance().unwrap().is_some() {
        steps += 1;
    }
    assert_eq!(steps, 3);
    assert_eq!(sim.current_date(), d(2023, 3, 4));
    assert_eq!(sim.state(), SimulationState::Stopped);
}

#[test]
fn test_report_carries_both_balance_sheets() {
    let start = d(2023, 3, 1);
    let mut scenario = ScenarioData::new(start, flat_grid(start, 0.04));
    scenario.banking_cash = 1_000_000.0;
    scenario.demand_deposits = 600_000.0;
    scenario.common_equity = 850_000.0;
    scenario.treasury_notes.push(BondRow {
        face_value: 500_000.0,
        coupon_rate: 0.04,
        maturity: d(2028, 3, 1),
        side: Side::Long,
    });

    let mut sim = Simulation::from_scenario(scenario).unwrap();
    sim.start();
    let report = sim.advance().unwrap().unwrap();

    assert_eq!(report.common_equity, 850_000.0);
    assert_eq!(report.banking.assets.child("Cash").unwrap().value, 1_000_000.0);
    assert_relative_eq!(
        report.banking.liabilities.value,
        600_000.0,
        epsilon = 1e-9
    );

    // The trading note is marked on the freshly bootstrapped curve;
    // the trading book carries positions only, no cash line
    let notes = report.trading.assets.child("Treasury Notes").unwrap();
    assert!(notes.value > 400_000.0 && notes.value < 600_000.0);
    assert!(report.trading.assets.child("Cash").is_none());
    assert_relative_eq!(report.trading.assets.value, notes.value, epsilon = 1e-9);
}

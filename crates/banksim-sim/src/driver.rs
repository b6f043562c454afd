//! The simulation driver.

use std::fmt;
use std::sync::Arc;

use banksim_books::{Aggregator, Bank, BookAggregate, Side};
use banksim_core::Date;
use banksim_curves::{CurveBuilder, CurveHandle};
use banksim_instruments::InstrumentFactory;

use crate::clock::SimulationClock;
use crate::error::{SimError, SimResult};
use crate::scenario::{ScenarioData, YieldGrid};

/// Lifecycle state of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Not started, or stopped. Manual stepping still works.
    Stopped,
    /// Advancing on request.
    Running,
    /// Started but suspended; advance is rejected until resumed but
    /// manual stepping still works.
    Paused,
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationState::Stopped => write!(f, "Stopped"),
            SimulationState::Running => write!(f, "Running"),
            SimulationState::Paused => write!(f, "Paused"),
        }
    }
}

/// Everything one simulation step produced.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// The date the step advanced to.
    pub date: Date,
    /// Whether the discount curve was rebuilt this step. False means
    /// the previous curve is still linked and marks are stale.
    pub curve_rebuilt: bool,
    /// Net cash from banking book positions this step.
    pub banking_flows: f64,
    /// Net cash from trading book positions this step, negative when
    /// short positions paid away more than longs collected. Settles
    /// into banking cash alongside the banking flows.
    pub trading_flows: f64,
    /// Banking book balance sheet after settlement.
    pub banking: BookAggregate,
    /// Trading book balance sheet after settlement.
    pub trading: BookAggregate,
    /// Common equity (constant across steps).
    pub common_equity: f64,
}

/// A day-stepped balance-sheet simulation.
///
/// Seeded once from a [`ScenarioData`], then driven either by
/// [`advance`](Simulation::advance) while running or one step at a
/// time with [`next`](Simulation::next). Each step moves the clock one
/// day, rebuilds the discount curve from the yield grid, settles the
/// cash flows that fell due, and aggregates both books. Stepping past
/// the grid's last dated row stops the simulation.
pub struct Simulation {
    bank: Bank,
    clock: SimulationClock,
    curve: CurveHandle,
    yields: YieldGrid,
    aggregator: Aggregator,
    state: SimulationState,
}

impl Simulation {
    /// Builds a simulation from scenario data.
    ///
    /// Creates all instruments as of the start date, links the initial
    /// curve, and leaves the simulation Stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario is invalid, the initial curve
    /// cannot be bootstrapped, or any instrument row is unusable.
    pub fn from_scenario(scenario: ScenarioData) -> SimResult<Self> {
        scenario.validate()?;

        let start = scenario.start_date;
        let curve = CurveHandle::new();

        // Initial curve must build; later rebuild failures degrade to
        // stale marks instead.
        let quotes = scenario.yields.quotes_for(start)?;
        let initial = CurveBuilder::new(start).build(&quotes)?;
        curve.link(Arc::new(initial));

        let factory = InstrumentFactory::new(start, curve.clone());
        let mut bank = Bank::new(scenario.common_equity);

        let banking = bank.banking_book_mut();
        banking.set_cash(scenario.banking_cash);
        banking.add(
            factory.create_demand_deposit(scenario.demand_deposits),
            Side::Long,
        )?;
        for row in &scenario.mortgages {
            banking.add(
                factory.create_mortgage(row.principal, row.rate, row.term_months)?,
                Side::Long,
            )?;
        }
        for row in &scenario.ci_loans {
            banking.add(
                factory.create_ci_loan_with_term(row.principal, row.rate, row.term_months)?,
                Side::Long,
            )?;
        }

        let trading = bank.trading_book_mut();
        for row in &scenario.treasury_notes {
            trading.add(
                factory.create_treasury_note(row.face_value, row.coupon_rate, row.maturity)?,
                row.side,
            )?;
        }
        for row in &scenario.treasury_bonds {
            trading.add(
                factory.create_treasury_bond(row.face_value, row.coupon_rate, row.maturity)?,
                row.side,
            )?;
        }

        log::info!(
            "simulation seeded at {start}: {} banking positions, {} trading positions",
            bank.banking_book().positions().len(),
            bank.trading_book().positions().len()
        );

        Ok(Self {
            bank,
            clock: SimulationClock::new(start),
            curve,
            yields: scenario.yields,
            aggregator: Aggregator::new(),
            state: SimulationState::Stopped,
        })
    }

    /// The bank under simulation.
    #[must_use]
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// The shared curve handle.
    #[must_use]
    pub fn curve(&self) -> &CurveHandle {
        &self.curve
    }

    /// Current simulation date.
    #[must_use]
    pub fn current_date(&self) -> Date {
        self.clock.current()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Starts (or restarts) the simulation.
    pub fn start(&mut self) {
        self.state = SimulationState::Running;
    }

    /// Pauses a running simulation; advance is rejected until resumed.
    pub fn pause(&mut self) {
        if self.state == SimulationState::Running {
            self.state = SimulationState::Paused;
        }
    }

    /// Resumes a paused simulation.
    pub fn resume(&mut self) {
        if self.state == SimulationState::Paused {
            self.state = SimulationState::Running;
        }
    }

    /// Stops the simulation. The clock and books keep their positions;
    /// a later start continues from the current date.
    pub fn stop(&mut self) {
        self.state = SimulationState::Stopped;
    }

    /// Advances one step of a running simulation.
    ///
    /// Steps the clock, rebuilds and relinks the discount curve from
    /// the yield grid (keeping the stale curve on failure), settles all
    /// cash flows in the elapsed `(prev, current]` window into the
    /// banking book's cash account, and aggregates both books.
    ///
    /// Returns `Ok(None)` when the step would pass the yield grid's
    /// last dated row; the simulation transitions to Stopped and the
    /// clock stays on its current date.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NotRunning` unless the simulation is Running;
    /// aggregation errors propagate.
    pub fn advance(&mut self) -> SimResult<Option<StepReport>> {
        if self.state != SimulationState::Running {
            return Err(SimError::NotRunning {
                state: self.state.to_string(),
            });
        }
        self.step_once()
    }

    /// Takes a single manual step.
    ///
    /// Unlike [`advance`](Simulation::advance) this works from any
    /// state, so a stopped or paused simulation can be nudged forward
    /// one step at a time. Termination behaves as in `advance`.
    ///
    /// # Errors
    ///
    /// Aggregation errors propagate.
    pub fn next(&mut self) -> SimResult<Option<StepReport>> {
        self.step_once()
    }

    fn step_once(&mut self) -> SimResult<Option<StepReport>> {
        let prev = self.clock.current();
        let current = self.clock.next_date();

        if self.yields.last_date().is_some_and(|last| current > last) {
            log::info!("yield data ends before {current}; stopping at {prev}");
            self.state = SimulationState::Stopped;
            return Ok(None);
        }
        self.clock.advance();

        let curve_rebuilt = self.rebuild_curve(current);

        let (banking_flows, trading_flows) = self.bank.settle_window(prev, current);

        let banking = self.aggregator.aggregate(self.bank.banking_book(), current)?;
        let trading = self.aggregator.aggregate(self.bank.trading_book(), current)?;

        Ok(Some(StepReport {
            date: current,
            curve_rebuilt,
            banking_flows,
            trading_flows,
            banking,
            trading,
            common_equity: self.bank.common_equity(),
        }))
    }

    fn rebuild_curve(&self, date: Date) -> bool {
        let rebuilt = self
            .yields
            .quotes_for(date)
            .and_then(|quotes| CurveBuilder::new(date).build(&quotes).map_err(SimError::from));
        match rebuilt {
            Ok(curve) => {
                self.curve.link(Arc::new(curve));
                true
            }
            Err(e) => {
                log::warn!("curve rebuild failed on {date}: {e}; keeping previous curve");
                false
            }
        }
    }
}

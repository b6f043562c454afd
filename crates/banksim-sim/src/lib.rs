//! # Banksim Sim
//!
//! The day-stepped simulation driver. A [`Simulation`] is seeded from a
//! [`ScenarioData`] (opening balances, instrument rows, and a dated
//! grid of par treasury yields), then advanced one day at a time:
//!
//! 1. the clock steps forward,
//! 2. the discount curve is rebootstrapped from the yield grid and
//!    relinked, so every instrument reprices,
//! 3. cash flows falling due in the elapsed window settle into each
//!    book's cash account,
//! 4. both books are aggregated into a [`StepReport`].
//!
//! A curve rebuild failure is survivable: the previous curve stays
//! linked and the step completes with stale marks.
//!
//! [`StepReport`]: driver::StepReport

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod clock;
pub mod driver;
pub mod error;
pub mod scenario;

pub use clock::SimulationClock;
pub use driver::{Simulation, SimulationState, StepReport};
pub use error::{SimError, SimResult};
pub use scenario::{BondRow, LoanRow, ScenarioData, Tenor, YieldGrid};

//! # Banksim Books
//!
//! The balance-sheet layer of the banksim simulator: banking and
//! trading [`Book`]s holding instruments, a pull-based [`Aggregator`]
//! that rolls positions up into a category tree with step-over-step
//! deltas, and the [`Bank`] entity tying both books together with its
//! common equity.
//!
//! The banking book carries instruments at held-to-maturity values; the
//! trading book marks long and short positions to market on the linked
//! curve. Both settle their instruments' cash flows into a single cash
//! account per book.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod aggregate;
pub mod bank;
pub mod book;
pub mod error;

pub use aggregate::{AggregateNode, Aggregator, BookAggregate, Delta};
pub use bank::Bank;
pub use book::{Book, BookKind, Position, Side};
pub use error::{BookError, BookResult};

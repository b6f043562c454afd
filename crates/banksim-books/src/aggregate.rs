//! Pull-based balance-sheet aggregation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use banksim_core::Date;
use banksim_instruments::InstrumentKind;

use crate::book::{Book, BookKind, Side};
use crate::error::BookResult;

/// Change threshold below which a value counts as unchanged.
const DELTA_EPSILON: f64 = 1e-9;

/// Direction of change since the previous aggregation pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Delta {
    /// Value rose since the last pull.
    Increased,
    /// Value fell since the last pull.
    Decreased,
    /// First observation, or no material change.
    #[default]
    Unchanged,
}

/// A node in the balance-sheet tree.
///
/// Three levels deep: book side (Assets or Liabilities), instrument
/// category, and individual position. A node's value is the sum of its
/// children's values; leaves carry position values directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateNode {
    /// Display label.
    pub name: String,
    /// Aggregated value.
    pub value: f64,
    /// Change since the previous pull.
    pub delta: Delta,
    /// Child nodes, empty for leaves.
    pub children: Vec<AggregateNode>,
}

impl AggregateNode {
    fn leaf(name: String, value: f64) -> Self {
        Self {
            name,
            value,
            delta: Delta::Unchanged,
            children: Vec::new(),
        }
    }

    /// Finds a direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&AggregateNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// One book's aggregated balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAggregate {
    /// Asset-side tree: cash plus long non-liability categories.
    pub assets: AggregateNode,
    /// Liability-side tree: deposits and short positions.
    pub liabilities: AggregateNode,
}

/// Rolls books up into category trees and tracks deltas across pulls.
///
/// Aggregation is pull-based: nothing updates until [`aggregate`]
/// (Aggregator::aggregate) is called, at which point every value is
/// recomputed from the instruments and compared against the value from
/// the previous pull at the same tree path.
#[derive(Debug, Default)]
pub struct Aggregator {
    previous: HashMap<String, f64>,
}

impl Aggregator {
    /// Creates an aggregator with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears delta history, so the next pull reports all Unchanged.
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    /// Aggregates a book as of `date`.
    ///
    /// # Errors
    ///
    /// Propagates valuation errors from trading-book marks.
    pub fn aggregate(&mut self, book: &Book, date: Date) -> BookResult<BookAggregate> {
        // category -> (position name -> value), BTreeMap for stable order
        let mut asset_groups: BTreeMap<InstrumentKind, Vec<(String, f64)>> = BTreeMap::new();
        let mut liability_groups: BTreeMap<InstrumentKind, Vec<(String, f64)>> = BTreeMap::new();

        for position in book.positions() {
            let value = book.position_value(position, date)?;
            let kind = position.instrument().kind();
            let entry = (position.instrument().name().to_string(), value);
            if kind.is_liability() || position.side() == Side::Short {
                liability_groups.entry(kind).or_default().push(entry);
            } else {
                asset_groups.entry(kind).or_default().push(entry);
            }
        }

        let prefix = book.kind().to_string();

        let mut assets = self.build_side(&prefix, "Assets", &asset_groups);
        // Cash leads the banking book's assets; the trading book has no
        // cash line, its settlements route to banking cash
        if book.kind() == BookKind::Banking {
            let cash_path = format!("{prefix}/Assets/Cash");
            let mut cash_node = AggregateNode::leaf("Cash".to_string(), book.cash_amount());
            cash_node.delta = self.delta_for(&cash_path, cash_node.value);
            assets.value += cash_node.value;
            assets.children.insert(0, cash_node);
        }
        assets.delta = self.delta_for(&format!("{prefix}/Assets"), assets.value);

        let mut liabilities = self.build_side(&prefix, "Liabilities", &liability_groups);
        liabilities.delta = self.delta_for(&format!("{prefix}/Liabilities"), liabilities.value);

        Ok(BookAggregate {
            assets,
            liabilities,
        })
    }

    fn build_side(
        &mut self,
        prefix: &str,
        side: &str,
        groups: &BTreeMap<InstrumentKind, Vec<(String, f64)>>,
    ) -> AggregateNode {
        let mut root = AggregateNode::leaf(side.to_string(), 0.0);

        for (kind, entries) in groups {
            let label = kind.category_label();
            let mut category = AggregateNode::leaf(label.to_string(), 0.0);
            for (name, value) in entries {
                let path = format!("{prefix}/{side}/{label}/{name}");
                let mut leaf = AggregateNode::leaf(name.clone(), *value);
                leaf.delta = self.delta_for(&path, *value);
                category.value += leaf.value;
                category.children.push(leaf);
            }
            category.delta = self.delta_for(&format!("{prefix}/{side}/{label}"), category.value);
            root.value += category.value;
            root.children.push(category);
        }

        root
    }

    fn delta_for(&mut self, path: &str, value: f64) -> Delta {
        let delta = match self.previous.get(path) {
            Some(&prev) if value > prev + DELTA_EPSILON => Delta::Increased,
            Some(&prev) if value < prev - DELTA_EPSILON => Delta::Decreased,
            Some(_) => Delta::Unchanged,
            None => Delta::Unchanged,
        };
        self.previous.insert(path.to_string(), value);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banksim_curves::CurveHandle;
    use banksim_instruments::InstrumentFactory;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn sample_book() -> Book {
        let factory = InstrumentFactory::new(d(2023, 3, 1), CurveHandle::new());
        let mut book = Book::new(BookKind::Banking);
        book.add(factory.create_cash(500_000.0), Side::Long).unwrap();
        book.add(
            factory
                .create_treasury_note(1_000_000.0, 0.04, d(2028, 3, 1))
                .unwrap(),
            Side::Long,
        )
        .unwrap();
        book.add(
            factory
                .create_treasury_note(2_000_000.0, 0.045, d(2033, 3, 1))
                .unwrap(),
            Side::Long,
        )
        .unwrap();
        book.add(factory.create_demand_deposit(1_500_000.0), Side::Long)
            .unwrap();
        book
    }

    #[test]
    fn test_tree_structure_and_totals() {
        let book = sample_book();
        let mut aggregator = Aggregator::new();
        let sheet = aggregator.aggregate(&book, d(2023, 3, 1)).unwrap();

        assert_eq!(sheet.assets.value, 3_500_000.0);
        assert_eq!(sheet.liabilities.value, 1_500_000.0);

        let notes = sheet.assets.child("Treasury Notes").unwrap();
        assert_eq!(notes.value, 3_000_000.0);
        assert_eq!(notes.children.len(), 2);

        let cash = sheet.assets.child("Cash").unwrap();
        assert_eq!(cash.value, 500_000.0);
    }

    #[test]
    fn test_idempotent_pull_reports_unchanged() {
        let book = sample_book();
        let mut aggregator = Aggregator::new();
        let date = d(2023, 3, 1);

        aggregator.aggregate(&book, date).unwrap();
        let second = aggregator.aggregate(&book, date).unwrap();

        assert_eq!(second.assets.delta, Delta::Unchanged);
        for category in &second.assets.children {
            assert_eq!(category.delta, Delta::Unchanged, "{}", category.name);
        }
    }

    #[test]
    fn test_delta_tracks_cash_movement() {
        let mut book = sample_book();
        let mut aggregator = Aggregator::new();
        let date = d(2023, 3, 1);

        aggregator.aggregate(&book, date).unwrap();
        book.credit_cash(10_000.0);
        let sheet = aggregator.aggregate(&book, date).unwrap();

        assert_eq!(sheet.assets.child("Cash").unwrap().delta, Delta::Increased);
        assert_eq!(sheet.assets.delta, Delta::Increased);
        assert_eq!(sheet.liabilities.delta, Delta::Unchanged);
    }

    #[test]
    fn test_trading_book_has_no_cash_line() {
        use banksim_core::daycounts::DayCountConvention;
        use banksim_core::types::{Compounding, Frequency};
        use banksim_curves::{Curve, FlatForwardCurve};
        use std::sync::Arc;

        let handle = CurveHandle::new();
        let flat: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(
            d(2023, 3, 1),
            0.04,
            Compounding::Compounded,
            Frequency::SemiAnnual,
            DayCountConvention::ActActIsda,
        ));
        handle.link(flat);

        let factory = InstrumentFactory::new(d(2023, 3, 1), handle);
        let mut book = Book::new(BookKind::Trading);
        book.add(
            factory
                .create_treasury_note(1_000_000.0, 0.04, d(2028, 3, 1))
                .unwrap(),
            Side::Long,
        )
        .unwrap();

        let mut aggregator = Aggregator::new();
        let sheet = aggregator.aggregate(&book, d(2023, 3, 1)).unwrap();

        assert!(sheet.assets.child("Cash").is_none());
        let notes = sheet.assets.child("Treasury Notes").unwrap();
        assert_eq!(sheet.assets.value, notes.value);
    }

    #[test]
    fn test_first_pull_is_unchanged() {
        let book = sample_book();
        let mut aggregator = Aggregator::new();
        let sheet = aggregator.aggregate(&book, d(2023, 3, 1)).unwrap();
        assert_eq!(sheet.assets.delta, Delta::Unchanged);
    }
}

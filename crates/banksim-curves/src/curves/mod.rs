//! Curve implementations.

mod discount;
mod flat;

pub use discount::DiscountCurve;
pub use flat::FlatForwardCurve;

//! Ordered integer set with amortized-logarithmic insert, erase, membership
//! and inclusive-range sums, built on a splay tree whose nodes cache their
//! subtree key sums.
//!
//! [`driver::run`] adds the command-stream front end: `+ x`, `- x`, `? x`
//! and `s l r` commands whose arguments are offset by the previous sum
//! answer modulo [`driver::MODULO`].

pub mod driver;
mod set;

pub use driver::{run, DriverError, MODULO};
pub use set::RangeSumSet;

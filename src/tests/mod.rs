//! Internal test modules - whitebox tests with crate access
//!
//! Tests here exercise whole-engine behavior across module boundaries:
//! property-based invariants over the layout pipeline and acceptance
//! scenarios driving the assembled feed.

mod window_properties;

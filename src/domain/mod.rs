//! Domain layer: pure decision-analysis logic with no I/O.

pub mod decision;
pub mod foundation;

//! Adapters: implementations of the ports against external systems.

pub mod ai;
pub mod http;

//! Application layer: orchestration of domain logic and ports.

pub mod handlers;

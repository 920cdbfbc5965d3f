//! Regret Minimizer - AI-powered decision analysis
//!
//! This crate analyzes a decision through the regret minimization framework:
//! it renders a user's situation and candidate options into a prompt, submits
//! it to a chat-completion provider, and extracts a validated per-option
//! regret analysis from the model's response.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

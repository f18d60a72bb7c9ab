//! JanSahayak - Multilingual Citizen Services Assistant
//!
//! This crate implements the conversational core that routes citizen
//! messages to scheme discovery, RTI drafting, and financial guidance
//! workflows while accumulating a typed citizen profile across turns.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

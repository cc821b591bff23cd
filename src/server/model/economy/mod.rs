//! Economy domain models: guild configuration, member state and actions.

pub mod action;
pub mod config;
pub mod state;

//! Server-side API backend, Discord bot and economy engine.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Economy rules engine and orchestration
//! - **Data Layer** (`data/`) - Database operations and the `EconomyStore` seam
//! - **Model Layer** (`model/`) - Domain models and operation-specific types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Database connection and migrations
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Cron job for bank interest accrual
//! - **Bot** (`bot/`) - Discord event handlers and slash commands
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to a controller
//! 2. **Controller** checks the guild, converts DTOs to domain types, calls a service
//! 3. **Service** loads configuration and state, gates and resolves the action
//! 4. **Data** persists the new state in a single versioned write
//! 5. **Controller** converts the domain result to a DTO

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

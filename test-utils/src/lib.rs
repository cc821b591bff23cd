//! Astra Test Utils
//!
//! Provides shared testing utilities for the Astra economy server. This crate offers a
//! builder pattern for creating test contexts with in-memory SQLite databases and
//! customizable table schemas, plus factories for seeding records.
//!
//! # Overview
//!
//! The test utilities consist of these components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders that insert guilds, economy configs and member balances
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_balances() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_economy_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;

//! Database repository layer.
//!
//! Repositories wrap SeaORM entity queries and convert entity models into domain models
//! at the boundary. The economy engine reaches the database only through the
//! `EconomyStore` trait implemented in `economy::store`.

pub mod economy;
pub mod guild;

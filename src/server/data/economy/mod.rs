pub mod config;
pub mod state;
pub mod store;

pub use config::EconomyConfigRepository;
pub use state::UserEconomyRepository;
pub use store::{EconomyStore, SeaOrmEconomyStore};

#[cfg(test)]
mod test;

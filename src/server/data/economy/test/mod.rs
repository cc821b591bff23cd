use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::economy::{
        EconomyConfigRepository, EconomyStore, SeaOrmEconomyStore, UserEconomyRepository,
    },
    error::store::StoreError,
    model::economy::{config::EconomyConfig, state::UserEconomyState},
};

mod state;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        economy::{
            ActionRequestDto, ActionResultDto, BalanceDto, EconomyConfigDto, EconomyErrorDto,
            LeaderboardDto, UpdateEconomyConfigDto, ValidationErrorsDto,
        },
    },
    server::{
        data::economy::SeaOrmEconomyStore,
        error::AppError,
        model::economy::{action::EconomyAction, config::EconomyConfigPatch},
        service::economy::{config::EconomyConfigService, random::RngSource, EconomyService},
        state::AppState,
    },
};

/// Tag for grouping economy endpoints in OpenAPI documentation
pub static ECONOMY_TAG: &str = "economy";

#[derive(Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

/// Get the economy configuration of a guild.
///
/// Returns the stored settings merged over the defaults; a guild that never saved
/// any settings gets the defaults with the module disabled.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/economy/config",
    tag = ECONOMY_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Effective economy configuration", body = EconomyConfigDto),
        (status = 404, description = "Bot is not in this guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_economy_config(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let config = EconomyConfigService::new(&state.db).get(guild_id).await?;

    Ok((StatusCode::OK, Json(config.into_dto())))
}

/// Update the economy configuration of a guild.
///
/// Only the fields present in the body change. The merged configuration is validated
/// as a whole and every violation is reported; nothing is stored on failure.
#[utoipa::path(
    patch,
    path = "/api/guilds/{guild_id}/economy/config",
    tag = ECONOMY_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    request_body = UpdateEconomyConfigDto,
    responses(
        (status = 200, description = "Stored economy configuration", body = EconomyConfigDto),
        (status = 400, description = "Configuration violates an invariant", body = ValidationErrorsDto),
        (status = 404, description = "Bot is not in this guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_economy_config(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Json(payload): Json<UpdateEconomyConfigDto>,
) -> Result<impl IntoResponse, AppError> {
    let config = EconomyConfigService::new(&state.db)
        .update(guild_id, EconomyConfigPatch::from(payload))
        .await?;

    Ok((StatusCode::OK, Json(config.into_dto())))
}

/// Perform an economy action on behalf of a member.
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/economy/actions",
    tag = ECONOMY_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    request_body = ActionRequestDto,
    responses(
        (status = 200, description = "Action performed", body = ActionResultDto),
        (status = 400, description = "Invalid bet, amount or target", body = EconomyErrorDto),
        (status = 403, description = "Feature disabled or member jailed", body = EconomyErrorDto),
        (status = 404, description = "Bot is not in this guild", body = ErrorDto),
        (status = 409, description = "Member state changed concurrently", body = EconomyErrorDto),
        (status = 429, description = "Action on cooldown", body = EconomyErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn perform_action(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Json(payload): Json<ActionRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    EconomyConfigService::new(&state.db)
        .ensure_guild(guild_id)
        .await?;

    let action = EconomyAction::from_request(&payload)?;
    let store = SeaOrmEconomyStore::new(&state.db);

    let result = EconomyService::new(&store)
        .perform_action(
            guild_id,
            payload.user_id,
            action,
            &mut RngSource::from_entropy(),
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::OK, Json(result.into_dto())))
}

/// Get the balances of a member.
///
/// Members who never acted report the starting balance; nothing is stored.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/economy/users/{user_id}",
    tag = ECONOMY_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    responses(
        (status = 200, description = "Member balances", body = BalanceDto),
        (status = 404, description = "Bot is not in this guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path((guild_id, user_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    EconomyConfigService::new(&state.db)
        .ensure_guild(guild_id)
        .await?;

    let store = SeaOrmEconomyStore::new(&state.db);
    let balance = EconomyService::new(&store).balance(guild_id, user_id).await?;

    Ok((StatusCode::OK, Json(balance.into_balance_dto())))
}

/// Get the richest members of a guild.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/economy/leaderboard",
    tag = ECONOMY_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Entries per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Leaderboard page", body = LeaderboardDto),
        (status = 404, description = "Bot is not in this guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    EconomyConfigService::new(&state.db)
        .ensure_guild(guild_id)
        .await?;

    let store = SeaOrmEconomyStore::new(&state.db);
    let leaderboard = EconomyService::new(&store)
        .leaderboard(guild_id, pagination.page, pagination.entries)
        .await?;

    Ok((StatusCode::OK, Json(leaderboard.into_dto())))
}

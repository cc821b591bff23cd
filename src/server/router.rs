use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

// `routes!` also needs the `__path_*` items generated next to each handler
use crate::server::{controller::economy::*, state::AppState};

#[derive(OpenApi)]
#[openapi(
    info(title = "Astra", description = "Guild economy API"),
    tags(
        (name = "economy", description = "Economy configuration, member actions and leaderboards")
    )
)]
struct ApiDoc;

pub fn router() -> Router<AppState> {
    let (router, api) = api_router().split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", api))
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(get_economy_config, update_economy_config))
        .routes(routes!(perform_action))
        .routes(routes!(get_balance))
        .routes(routes!(get_leaderboard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_economy_path() {
        let (_, api) = api_router().split_for_parts();

        let paths: Vec<_> = api.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/api/guilds/{guild_id}/economy/config".to_string()));
        assert!(paths.contains(&"/api/guilds/{guild_id}/economy/actions".to_string()));
        assert!(paths.contains(&"/api/guilds/{guild_id}/economy/users/{user_id}".to_string()));
        assert!(paths.contains(&"/api/guilds/{guild_id}/economy/leaderboard".to_string()));
    }
}

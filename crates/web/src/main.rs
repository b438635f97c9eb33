use anyhow::Context;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use features::{awards, competitions, directory, engagement, scores};
use middleware::auth::ApiKeys;
use state::{AppState, EngineSettings};

#[derive(OpenApi)]
#[openapi(
    paths(
        competitions::handlers::list_competitions,
        competitions::handlers::get_competition,
        competitions::handlers::get_ranking,
        directory::handlers::get_judge,
        directory::handlers::get_team,
        directory::handlers::get_entrant,
        scores::handlers::get_scores,
        scores::handlers::submit_score,
        engagement::handlers::get_engagement,
        engagement::handlers::like,
        engagement::handlers::toggle_favorite,
        engagement::handlers::add_favorite,
        engagement::handlers::remove_favorite,
        engagement::handlers::record_view,
        awards::handlers::list_awards,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::competition::CompetitionResponse,
            storage::dto::competition::CompetitionDetailResponse,
            storage::dto::ranking::CompetitionRanking,
            storage::dto::ranking::RankingEntry,
            storage::dto::ranking::RankingMetric,
            storage::dto::score::SubmitScoreRequest,
            storage::dto::score::ScoreSummaryResponse,
            storage::dto::score::JudgeScoreResponse,
            storage::dto::engagement::LikeResponse,
            storage::dto::engagement::FavoriteResponse,
            storage::dto::engagement::ViewResponse,
            storage::dto::engagement::EngagementResponse,
            storage::dto::award::AwardResponse,
            storage::dto::award::AwardMonthGroup,
            storage::dto::award::AwardCatalogueResponse,
            storage::services::aggregation::CriterionBreakdown,
            storage::models::Competition,
            storage::models::CompetitionFormat,
            storage::models::CompetitionStatus,
            storage::models::Judge,
            storage::models::Team,
            storage::models::Entrant,
            storage::models::EntrantKind,
            storage::models::EntrantOwner,
            storage::models::EngagementCounters,
            storage::models::CriterionScores,
            storage::models::ScoreWeighting,
            storage::models::RankingMode,
            storage::models::AwardType,
            storage::models::AwardCategory,
            storage::models::AwardTargetKind,
        )
    ),
    tags(
        (name = "competitions", description = "Competition listing and details"),
        (name = "rankings", description = "Score and popularity rankings"),
        (name = "directory", description = "Judges, teams and entrants by id"),
        (name = "scores", description = "Judge scoring"),
        (name = "engagement", description = "Likes, favorites and views"),
        (name = "awards", description = "Award catalogue"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting contest ledger API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        weighting = %config.score_weighting,
        ledger_offset = %config.ledger_offset,
        "Configuration loaded successfully"
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::connect(&config.database_url, config.max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if !api_keys.is_enabled() {
        tracing::warn!("API_KEYS is empty, mutating routes are not gated");
    }

    let state = AppState {
        db,
        settings: EngineSettings::from_config(&config),
    };

    let app = features::router(state, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use chore_quest_backend::rest::{self, AppState};
use chore_quest_backend::Backend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let data_directory = std::env::var("CHORE_QUEST_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    info!("Using data directory {:?}", data_directory);

    let backend = Backend::new(&data_directory)?;
    let state = AppState::new(&backend);

    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/households", post(rest::create_household))
        .route("/households/join", post(rest::join_household))
        .route("/households/:id", get(rest::get_household))
        .route(
            "/households/:id/settings",
            put(rest::update_household_settings),
        )
        .route("/households/:id/profiles", get(rest::list_profiles))
        .route("/households/:id/tasks", get(rest::list_tasks))
        .route("/households/:id/rewards", get(rest::list_rewards))
        .route("/households/:id/leaderboard", get(rest::get_leaderboard))
        .route("/profiles", post(rest::create_profile))
        .route(
            "/profiles/active",
            get(rest::get_active_profile).post(rest::set_active_profile),
        )
        .route(
            "/profiles/:id",
            put(rest::update_profile).delete(rest::delete_profile),
        )
        .route("/profiles/:id/badges", get(rest::list_badges))
        .route("/profiles/:id/streak", get(rest::get_streak))
        .route("/tasks", post(rest::create_task))
        .route(
            "/tasks/:id",
            put(rest::update_task).delete(rest::delete_task),
        )
        .route("/tasks/:id/advance", post(rest::advance_task))
        .route("/rewards", post(rest::create_reward))
        .route(
            "/rewards/:id",
            get(rest::get_reward).put(rest::update_reward),
        )
        .route("/rewards/:id/claim", post(rest::claim_reward))
        .route("/rewards/:id/claims", get(rest::list_claims))
        .route("/claims/:id/approve", post(rest::approve_claim))
        .route("/claims/:id/reject", post(rest::reject_claim));

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

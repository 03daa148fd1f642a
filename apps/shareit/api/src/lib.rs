//! ShareIt API
//!
//! HTTP service for lending and borrowing things between users. The binary
//! in `main.rs` loads [`config::Config`], opens the database (unless
//! `STORAGE=memory`) and serves [`build_app`].

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use state::AppState;

/// Full application router: documented API under `/api`, plus `/health`
/// and `/ready`.
pub fn build_app(state: &AppState) -> std::io::Result<Router> {
    let router = create_router::<openapi::ApiDoc>(api::routes(state))?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone())))
}

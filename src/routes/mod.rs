use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use sitemail_shared::CONTACT_PATH;

mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub contact_command: sitemail_contact::Command,
}

pub fn router(app_state: AppState) -> Router {
    let body_limit = app_state.config.upload.max_body_bytes;

    Router::new()
        .route("/health", get(health::health))
        .route(
            CONTACT_PATH,
            post(contact::action).fallback(contact::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(app_state)
}

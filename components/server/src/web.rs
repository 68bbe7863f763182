use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use store::Store;
use tower_http::cors::CorsLayer;

mod error;
mod html;
mod submit;
mod view;

use error::Error;

#[derive(Clone)]
pub struct AppState {
    store: Store,
    password: Arc<str>,
}

impl AppState {
    pub fn new(store: Store, password: &str) -> Self {
        Self { store, password: Arc::from(password) }
    }

    // plain comparison, the gate keeps casual visitors out and nothing more
    fn check_password(&self, password: &str) -> Result<(), Error> {
        if password == &*self.password {
            Ok(())
        } else {
            log::warn!("Rejected password attempt");
            Err(Error::WrongPassword)
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(view::view))
        .route("/delete", post(view::remove))
        .route("/api/withdraw", post(submit::submit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

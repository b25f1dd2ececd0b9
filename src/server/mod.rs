mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::server::handlers::{bookings, pricing, rides};
use crate::{
    api::{DynAPI, API},
    auth::User,
    error::Error,
};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/rides", post(rides::create).get(rides::search))
        .route("/rides/:id", get(rides::find))
        .route("/rides/:id/cancel", patch(rides::cancel))
        .route("/rides/:id/complete", patch(rides::complete))
        .route("/rides/:id/quote", get(rides::quote))
        .route("/rides/:id/bookings", post(rides::book))
        .route("/rides/:id/allocation", post(rides::preview_allocation))
        .route("/drivers/:id/rides", get(rides::find_for_driver))
        .route(
            "/passengers/:id/bookings",
            get(bookings::find_for_passenger),
        )
        .route("/bookings/:id", get(bookings::find))
        .route("/bookings/:id/pay", patch(bookings::pay))
        .route("/bookings/:id/cancel", patch(bookings::cancel))
        .route("/pricing/earnings", get(pricing::earnings))
        .route("/pricing/ladder", get(pricing::ladder))
        .route("/pricing/advice", post(pricing::advice))
        .layer(Extension(api))
        .layer(Extension(User::new_system_user()))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;

    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            Error::unexpected_error()
        })
}

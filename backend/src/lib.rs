use axum::Router;
use std::sync::Arc;

pub mod booking;
pub mod config;
pub mod controller;
pub mod gallery;
pub mod hourmin;
pub mod intake;
pub mod mailer;

use gallery::Gallery;
use intake::IntakeState;

/// JSON API of the site: booking intake under `/api/book`, portfolio
/// listings under `/api/gallery`.
pub fn api_router(intake: IntakeState, gallery: Arc<Gallery>) -> Router {
    Router::new()
        .nest("/api/book", intake::booking_api(intake))
        .nest("/api/gallery", gallery::gallery_api(gallery))
}

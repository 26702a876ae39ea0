#![forbid(unsafe_code)]
use anyhow::Result;
use shoot_book::{
    api_router, config::Config, gallery::Gallery, intake::IntakeState, mailer::SmtpMailer,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, timeout::TimeoutLayer,
};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let config = Config::from_env()?;
    debug!(
        "Loaded configuration: port {}, frontend {}, SMTP relay {}",
        config.port,
        config.frontend_dir.display(),
        config.mail.smtp_host
    );

    info!("Starting server");

    let mailer = SmtpMailer::new(&config.mail)?;
    if let Err(e) = mailer.verify().await {
        warn!("Mail transport check failed, booking requests may not be delivered: {}", e);
    }

    let intake = IntakeState::new(Arc::new(mailer), &config.mail);
    let frontend = ServeDir::new(&config.frontend_dir);

    let middleware = tower::ServiceBuilder::new()
        .layer(CompressionLayer::new().quality(tower_http::CompressionLevel::Fastest))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CatchPanicLayer::new());

    // build our application with routes
    let app = api_router(intake, Arc::new(Gallery::portfolio()))
        .fallback_service(frontend)
        .layer(middleware);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

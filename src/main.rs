use tokio::net::TcpListener;
use eios_demo::{
    config::Config,
    api::routes::create_router,
    logging::init_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    tracing::info!(
        public_dir = %config.public_dir.display(),
        prediction_server = %config.prediction_server,
        "starting server on {}",
        server_addr
    );

    // Articles are read once here; the summary CSV is read per visit.
    let app_state = AppState::load(config).await?;

    let app = create_router(app_state);
    let listener = TcpListener::bind(server_addr).await?;

    tracing::info!("listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

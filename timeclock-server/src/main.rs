use timeclock_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    timeclock_server::utils::logger::init_logger(&config.log_level, config.log_dir.as_deref());

    print_banner();
    tracing::info!("Timeclock server starting...");

    if !config.baas_configured() {
        tracing::warn!("Backend not configured; the API will report 'not configured'");
    }

    // 2. State and HTTP server
    let state = ServerState::initialize(&config);
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

use dine_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. dotenv + logging
    setup_environment();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Dine server starting...");

    // 2. configuration
    let config = Config::from_env().inspect_err(|e| tracing::error!("{}", e))?;

    // 3. state (work dir, database, services)
    let state = ServerState::initialize(&config)
        .await
        .inspect_err(|e| tracing::error!("{}", e))?;

    // 4. serve until ctrl-c
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

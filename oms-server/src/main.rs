use oms_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();

    // 2. Configuration
    let config = Config::from_env()?;

    // 3. Logging
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "oms-server starting"
    );

    // 4. Serve until Ctrl-C
    if let Err(e) = Server::new(config).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

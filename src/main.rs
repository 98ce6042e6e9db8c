use barcode_lookup::utils::{logger, validation::Validate};
use barcode_lookup::{build_router, AppConfig, AppState, ServerArgs};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_server_logger(args.verbose);
    }

    tracing::info!("Starting barcode-lookup");

    // Refuse to start without a usable configuration.
    let config = match AppConfig::load(&args).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "❌ Configuration failed: {} (Category: {:?})",
                e,
                e.category()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if args.verbose {
        tracing::debug!("Search config: {:?}", config.search);
    }

    let state = AppState::from_settings(&config.search)?;
    let app = build_router(state);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        site_domain = %config.search.site_domain,
        "🚀 Server running on {}",
        bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

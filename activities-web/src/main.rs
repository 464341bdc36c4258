use activities_web::{app_router, AppState};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "activities-web")]
#[command(about = "Browse, filter and edit activities", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Base URL of the activities API
    #[arg(long, env = "ACTIVITIES_API_URL", default_value = "http://localhost:5000")]
    api_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("activities_web=debug,tower_http=info,info")),
        )
        .init();

    let args = Args::parse();
    let app = app_router(AppState::new(args.api_url.clone()));

    let bind_addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;

    info!(
        "Web server listening on {} (visit http://127.0.0.1:{})",
        bind_addr, args.port
    );
    info!("Activities API URL: {}", args.api_url);

    axum::serve(listener, app).await?;
    Ok(())
}

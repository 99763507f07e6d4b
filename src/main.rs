use site_server::app::SiteApp;
use site_server::{Bootstrap, EnvSnapshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // .env values must land before the snapshot is captured.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let snapshot = EnvSnapshot::from_os();
    if let Err(error) = Bootstrap::new(snapshot, SiteApp::new()).run().await {
        tracing::error!(%error, "startup failed");
        std::process::exit(1);
    }
}

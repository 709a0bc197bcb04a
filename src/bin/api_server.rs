use zonekit::api::{create_router, AppState};
use zonekit::cache::ZoneCache;
use zonekit::ZoneBuilder;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = std::env::var("ZONEKIT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let state = AppState::new(ZoneBuilder::default(), ZoneCache::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("zonekit API listening on http://{}", addr);
    log::info!("  GET  /api/zones?latitude=<lat>&longitude=<lon>&altitude=<alt>&width=<w>&height=<h>&orientation=<o>");
    log::info!("  GET  /api/zones.geojson?<same query>");
    log::info!("  POST /api/batch (multipart/form-data: csv file)");

    axum::serve(listener, app).await
}

//! Wiring & DI. Entry point: bootstrap adapters, inject into services, serve HTTP.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trip_planner::adapters::ai::GeminiAdapter;
use trip_planner::adapters::geo::{GoogleReverseGeocoder, LocationIqAdapter};
use trip_planner::adapters::http::ReqwestHttp;
use trip_planner::adapters::persistence::JsonLocationRepo;
use trip_planner::adapters::web::{self, AppState};
use trip_planner::ports::{HttpPort, LocationRepoPort, ReverseGeocoderPort};
use trip_planner::shared::config::AppConfig;
use trip_planner::usecases::{AddressResolver, ChatService, LocationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Outbound HTTP (shared by every upstream adapter) ---
    let http: Arc<dyn HttpPort> = Arc::new(ReqwestHttp::new());

    // --- Chat proxy ---
    let chat_config = cfg.chat_config();
    if cfg.is_chat_configured() {
        info!(
            model = %chat_config.model,
            search_grounding = chat_config.search_grounding,
            model_fallback = chat_config.model_fallback,
            "chat proxy enabled"
        );
    } else {
        warn!("GEMINI_API_KEY not set; chat requests will fail with a configuration error");
    }
    let chat = Arc::new(ChatService::new(Arc::new(GeminiAdapter::new(
        Arc::clone(&http),
        chat_config,
    ))));

    // --- Geocoding ---
    let geo = cfg.geocode_config();
    if geo.locationiq_key.is_none() {
        warn!("LOCATIONIQ_KEY not set; every address resolves to the default location");
    }
    if geo.google_maps_api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY not set; reverse geocoding returns Unknown");
    }
    let resolver = Arc::new(AddressResolver::new(Arc::new(LocationIqAdapter::new(
        Arc::clone(&http),
        geo.locationiq_key.clone(),
        geo.locationiq_url.clone(),
    ))));
    let reverse_geocoder: Arc<dyn ReverseGeocoderPort> = Arc::new(GoogleReverseGeocoder::new(
        Arc::clone(&http),
        geo.google_maps_api_key.clone(),
        geo.reverse_geocode_url.clone(),
    ));

    // --- Location store ---
    let data_path = PathBuf::from(cfg.data_dir_or_default());
    let store_path = data_path.join("locations.json");
    let json_repo = JsonLocationRepo::new(&store_path);
    json_repo
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    info!(path = %store_path.display(), "location store loaded");
    let repo: Arc<dyn LocationRepoPort> = Arc::new(json_repo);
    let locations = Arc::new(LocationService::new(resolver, repo));

    // --- Serve ---
    let app = web::router(AppState {
        chat,
        locations,
        reverse_geocoder,
    });
    let addr = cfg.bind_addr_or_default();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("bind {}: {}", addr, e))?;
    info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

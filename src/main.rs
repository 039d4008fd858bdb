use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod handler;
mod http;
mod logger;
mod search;
mod server;
mod skill;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config file path (without extension) may be given as the first argument
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Create Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let index = Arc::new(search::AlgoliaIndex::new(&cfg.search)?);
    let registry: skill::HandlerRegistry = skill::handlers::default_registry(
        index,
        cfg.search.hits_per_page,
        cfg.skill.quotes.clone(),
    );
    let voice_skill = skill::Skill::new(skill::SkillOptions::from(&cfg.skill), registry);

    let search_configured = !cfg.search.app_id.is_empty() && !cfg.search.api_key.is_empty();
    if !search_configured && voice_skill.registry().contains(&skill::IntentName::AskQuestion) {
        logger::log_warning(
            "search.app_id / search.api_key not set; AskQuestion will always fall back",
        );
    }
    logger::log_info(&format!("Registered intents: {:?}", voice_skill.registry()));
    let state = Arc::new(config::AppState::new(&cfg, voice_skill));

    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, shutdown))
        .await
}

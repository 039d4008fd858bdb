// Configuration module entry point
// Loads application configuration and holds shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, SearchConfig, SkillConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SKILL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "ask-skill/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("http.skill_path", "/")?
            .set_default("skill.welcome_text", "What would you like to ask Donald Trump?")?
            .set_default("skill.reprompt_text", "Sorry, I didn't catch that")?
            .set_default("search.app_id", "")?
            .set_default("search.api_key", "")?
            .set_default("search.index", "trump")?
            .set_default("search.hits_per_page", 1)?
            .set_default("search.timeout_secs", 5)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

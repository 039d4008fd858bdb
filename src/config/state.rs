// Application state module
// Immutable configuration plus the skill built from it

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::skill::Skill;

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    pub skill: Arc<Skill>,

    // Cached config values for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config, skill: Skill) -> Self {
        Self {
            config: config.clone(),
            skill: Arc::new(skill),
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }
}

// src/presentation/http/state.rs
use std::sync::Arc;

use crate::application::services::ApplicationServices;
use crate::infrastructure::security::AdminSessionManager;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub sessions: Arc<AdminSessionManager>,
}

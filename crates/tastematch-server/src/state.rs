//! Shared application state.

use std::sync::Arc;

use tastematch_session::SessionStore;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
}

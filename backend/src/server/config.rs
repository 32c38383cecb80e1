//! Bind address, session cookie settings and backend selection.

use std::net::SocketAddr;

use smartline::inbound::http::session_config::SessionSettings;
use smartline::outbound::supabase::SupabaseConfig;

/// Inputs for [`super::create_server`].
///
/// Without a [`SupabaseConfig`] the portal serves the in-memory fixtures.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) supabase: Option<SupabaseConfig>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            supabase: None,
        }
    }

    #[must_use]
    pub fn with_supabase(self, supabase: Option<SupabaseConfig>) -> Self {
        Self { supabase, ..self }
    }
}

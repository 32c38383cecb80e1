//! Adapters for a Supabase-compatible backend platform.
//!
//! One [`SupabaseClient`] is shared by the auth, table and storage adapters;
//! each adapter implements one driven port.

mod auth;
mod client;
mod dto;
mod rest;
mod storage;

pub use auth::SupabaseAuthGateway;
pub use client::{SupabaseClient, SupabaseClientError, SupabaseConfig};
pub use rest::{
    SupabaseDriverApplicationRepository, SupabaseProfileRepository, SupabaseRideRepository,
};
pub use storage::SupabaseDocumentStorage;

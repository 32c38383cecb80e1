//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Everything the portal persists lives on a Supabase-compatible platform:
//!
//! - **supabase**: password auth, table rows over REST and object storage.
//!
//! Adapters are thin translators that convert between domain types and
//! platform wire shapes. They contain no business logic.

pub mod supabase;

//! Per-user session bookkeeping
//!
//! - `profile`: the per-user record and the session-boundary rule
//! - `store`: in-memory map of profiles, created lazily on first lookup
//! - `persistence`: best-effort load/save of the map between runs

pub mod persistence;
pub mod profile;
pub mod store;

pub use persistence::ProfileFile;
pub use profile::{UserProfile, QUICK_REPLY_LIMIT};
pub use store::{ProfileMap, SessionStore};

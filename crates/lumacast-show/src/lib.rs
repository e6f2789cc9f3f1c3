//! Lumacast — the Show bounded context.
//!
//! Playlist sync, playback telemetry, the jukebox request queue, the voting
//! tally, and automatic PSA rotation, all mutating the per-tenant `Show`
//! aggregate. Each public operation is one load → mutate → save unit of
//! work against the [`store::ShowStore`].

pub mod application;
pub mod domain;
pub mod store;

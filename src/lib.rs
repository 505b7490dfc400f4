//! Weighted prefix autocompletion.
//!
//! Re-exports the engine crate and adds the optional tracing bootstrap
//! (`trace` feature) for hosts that want engine spans written to disk.
//!
//! The default `quiet` feature compiles engine spans out entirely. Builds
//! that want them, the `trace` sink or `actool --verbose`, need
//! `--no-default-features`.

mod trace_init;

pub use ac_core::*;
pub use trace_init::{init_tracing, trace_file, TRACE_FILE};

/// An engine configured from the global [`settings`].
pub fn engine_from_settings<V, U>() -> Engine<V, U>
where
    V: Clone + Eq + std::hash::Hash,
    U: Clone + PartialEq,
{
    Engine::from_settings(&settings::settings().engine)
}

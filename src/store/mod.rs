//! Local persistence: a key-value preference shim with pluggable
//! backends, and the shared [`DataStore`] that the rest of the crate
//! reads records through.

mod data;
pub mod mock;
mod preferences;

pub use data::DataStore;
pub use preferences::{
    FilePreferences, MemoryPreferences, PreferenceBackend, PreferenceKey, StoreError,
};

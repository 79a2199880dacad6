//! Hash collections used throughout the crate. Keys are small (window id
//! strings, workspace ids), so the non-cryptographic hasher is the default.

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

//! Interop with third-party JSON value types, gated behind cargo features.

#[cfg(feature = "serde_json")]
mod serde_json;

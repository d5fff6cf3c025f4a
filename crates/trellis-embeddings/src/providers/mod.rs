//! Embedding providers.

mod hashing;

pub use hashing::HashingProvider;

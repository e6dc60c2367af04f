//! Markov-chain word generation library.
//!
//! This crate provides a character-level word generator including:
//! - An order-k Markov chain built from a training vocabulary
//! - A substring index used to reject words copied from the vocabulary
//! - Bounded random walks with length constraints and a retry budget
//! - Dictionary loading helpers for hosts
//!
//! The chain is an explicitly owned value: hosts build it, then share it
//! read-only for generation.

/// Markov chain, duplicate index and generation logic.
pub mod model;

/// Error type shared by the chain and its generator.
pub mod error;

/// I/O utilities (dictionary loading, file listing).
pub mod io;

pub use error::ChainError;
pub use model::chain::Chain;
pub use model::generate_options::GenerateOptions;

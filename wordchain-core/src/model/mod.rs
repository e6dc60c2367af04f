//! Top-level module for the Markov word generator.
//!
//! This module provides:
//! - The chain aggregate and its builder (`Chain`)
//! - Graph nodes and edges (`ChainNode`, `Edge`)
//! - The substring index used for duplicate rejection (`DuplicateIndex`)
//! - Generation configuration (`GenerateOptions`)
//! - The constrained random walk (`generator`)

/// Chain aggregate: node arena, state table, start node and duplicate index.
///
/// Handles word ingestion, merging and parallel construction.
pub mod chain;

/// Internal representation of a single chain state.
///
/// Holds the emitted character and the outgoing edge multiset.
pub mod node;

/// Trie over every suffix of every training word.
pub mod duplicate_index;

/// Generation parameters (length bounds, duplicate policy, attempt budget).
pub mod generate_options;

/// Random walk and retry/failure policy.
pub mod generator;

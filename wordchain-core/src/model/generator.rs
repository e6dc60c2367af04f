use log::{debug, trace};
use rand::Rng;

use super::chain::Chain;
use super::generate_options::GenerateOptions;
use super::node::{pick_edge, Edge};
use crate::error::ChainError;

impl Chain {
	/// Generates a word using the thread-local PRNG.
	///
	/// See [`generate_with`](Self::generate_with) for the algorithm.
	pub fn generate(&self, options: &GenerateOptions) -> Result<String, ChainError> {
		self.generate_with_rng(options, &mut rand::rng())
	}

	/// Generates a word drawing from any `rand` generator.
	///
	/// Passing a seeded generator (ex. `StdRng::seed_from_u64`) makes the
	/// result reproducible.
	pub fn generate_with_rng<R: Rng>(
		&self,
		options: &GenerateOptions,
		rng: &mut R,
	) -> Result<String, ChainError> {
		self.generate_with(options, || rng.random::<f64>())
	}

	/// Generates a word drawing from `random`, a source of values in `[0, 1)`.
	///
	/// # Behavior
	/// - Walks from the start node, picking `edges[floor(r * len)]` at each
	///   step, until a terminal edge is drawn or the word exceeds
	///   `max_length`.
	/// - Rejects the walk if its length is outside the bounds, or if
	///   duplicates are disallowed and the word is a substring of a
	///   training word.
	/// - Retries after a rejection. Every rejection counts against the
	///   attempt budget, whatever its cause.
	///
	/// # Errors
	/// - `InvalidArgument` if `options` cannot be satisfied (checked before
	///   any walk).
	/// - `GenerationExhausted` once `max_attempts` walks were rejected.
	///
	/// # Notes
	/// - With `max_attempts == 0` and constraints no walk can meet, this
	///   never returns.
	/// - Lengths are counted in characters.
	pub fn generate_with<F>(&self, options: &GenerateOptions, mut random: F) -> Result<String, ChainError>
	where
		F: FnMut() -> f64,
	{
		options.validate()?;

		let max_length = options.max_length_limit();
		let attempt_limit = options.attempt_limit();
		let mut attempts = 0usize;

		loop {
			let (word, length) = self.walk(max_length, &mut random);

			let rejection = if max_length.is_some_and(|max| length > max) {
				Some("too long")
			} else if length < options.min_length {
				Some("too short")
			} else if !options.allow_duplicates && self.is_duplicate(&word) {
				Some("duplicate")
			} else {
				None
			};

			let Some(reason) = rejection else {
				return Ok(word);
			};

			if let Some(limit) = attempt_limit {
				attempts += 1;
				trace!("attempt {}/{} rejected ({}): {:?}", attempts, limit, reason, word);
				if attempts >= limit {
					debug!("generation exhausted after {} attempts", attempts);
					return Err(ChainError::GenerationExhausted { attempts });
				}
			} else {
				trace!("attempt rejected ({}): {:?}", reason, word);
			}
		}
	}

	/// Performs one bounded walk and returns the word with its length.
	///
	/// The walk stops on a terminal edge, or as soon as the word is one
	/// character longer than `max_length`.
	fn walk<F>(&self, max_length: Option<usize>, random: &mut F) -> (String, usize)
	where
		F: FnMut() -> f64,
	{
		let mut word = String::new();
		let mut length = 0usize;
		let mut current = pick_edge(self.start_edges(), random());

		while let Edge::Node(id) = current {
			if max_length.is_some_and(|max| length > max) {
				break;
			}
			let node = self.node_at(id);
			word.push(node.character());
			length += 1;
			current = node.pick(random());
		}

		(word, length)
	}
}

use serde::Deserialize;

use crate::error::ChainError;

/// Attempt budget used when none is given.
pub const DEFAULT_MAX_ATTEMPTS: usize = 25;

/// Input parameters for a single generation request.
///
/// `GenerateOptions` only holds **constraints**; the random source is passed
/// separately to the `generate*` methods of [`Chain`](crate::Chain).
///
/// # Responsibilities
/// - Bound the generated word length (`min_length`, `max_length`)
/// - Select the duplicate policy (`allow_duplicates`)
/// - Bound the number of rejected walks (`max_attempts`)
///
/// # Conventions
/// - `max_length == 0` means "no ceiling"
/// - `max_attempts == 0` means "retry forever". Combined with constraints no
///   walk can satisfy, generation never returns: this is an explicit opt-in.
///
/// Deserializes with every field optional: missing fields keep their
/// defaults, so hosts can read partial config files or requests onto it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
	/// Inclusive lower bound on the word length, in characters.
	pub min_length: usize,

	/// Inclusive upper bound on the word length, in characters. `0` = unlimited.
	pub max_length: usize,

	/// Whether words that are substrings of a training word are accepted.
	pub allow_duplicates: bool,

	/// Rejected walks tolerated before failing. `0` = unlimited.
	pub max_attempts: usize,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		Self {
			min_length: 0,
			max_length: 0,
			allow_duplicates: true,
			max_attempts: DEFAULT_MAX_ATTEMPTS,
		}
	}
}

impl GenerateOptions {
	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = min_length;
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	pub fn with_allow_duplicates(mut self, allow_duplicates: bool) -> Self {
		self.allow_duplicates = allow_duplicates;
		self
	}

	pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
		self.max_attempts = max_attempts;
		self
	}

	/// Returns the length ceiling, or `None` when unlimited.
	pub fn max_length_limit(&self) -> Option<usize> {
		(self.max_length > 0).then_some(self.max_length)
	}

	/// Returns the attempt budget, or `None` when unlimited.
	pub fn attempt_limit(&self) -> Option<usize> {
		(self.max_attempts > 0).then_some(self.max_attempts)
	}

	/// Checks that the constraints can be satisfied by some word.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `min_length > max_length` while
	/// `max_length` is limited.
	pub fn validate(&self) -> Result<(), ChainError> {
		if let Some(max_length) = self.max_length_limit() {
			if self.min_length > max_length {
				return Err(ChainError::invalid(format!(
					"min_length ({}) must not exceed max_length ({})",
					self.min_length, max_length
				)));
			}
		}
		Ok(())
	}
}

/// Maps a signed limit onto the unsigned convention: any value `<= 0`
/// becomes `0` (unlimited).
pub fn limit_from_signed(value: i64) -> usize {
	usize::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let options = GenerateOptions::default();
		assert_eq!(options.min_length, 0);
		assert_eq!(options.max_length_limit(), None);
		assert!(options.allow_duplicates);
		assert_eq!(options.attempt_limit(), Some(25));
	}

	#[test]
	fn zero_means_unlimited() {
		let options = GenerateOptions::default().with_max_attempts(0).with_max_length(0);
		assert_eq!(options.attempt_limit(), None);
		assert_eq!(options.max_length_limit(), None);
	}

	#[test]
	fn validate_rejects_inverted_bounds() {
		let options = GenerateOptions::default().with_min_length(6).with_max_length(5);
		assert!(matches!(options.validate(), Err(ChainError::InvalidArgument(_))));
	}

	#[test]
	fn validate_ignores_min_when_unlimited() {
		let options = GenerateOptions::default().with_min_length(1_000);
		assert_eq!(options.validate(), Ok(()));
		assert_eq!(options.with_max_length(1_000).validate(), Ok(()));
	}

	#[test]
	fn deserializes_with_missing_fields() {
		use serde::de::value::{Error as ValueError, MapDeserializer};

		let entries = vec![("max_length", 8usize), ("max_attempts", 3usize)];
		let options = GenerateOptions::deserialize(MapDeserializer::<_, ValueError>::new(entries.into_iter())).unwrap();
		assert_eq!(options, GenerateOptions::default().with_max_length(8).with_max_attempts(3));
	}

	#[test]
	fn signed_limits() {
		assert_eq!(limit_from_signed(-3), 0);
		assert_eq!(limit_from_signed(0), 0);
		assert_eq!(limit_from_signed(12), 12);
	}
}

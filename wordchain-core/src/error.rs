use thiserror::Error;

/// Errors raised by [`Chain`](crate::Chain) construction and generation.
///
/// Building a chain with `add_word` never fails; every error here comes from
/// a malformed request or from an exhausted attempt budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
	/// No walk satisfied the length bounds and duplicate policy within the
	/// attempt budget.
	#[error("unable to generate a word with the given parameters after {attempts} attempts")]
	GenerationExhausted { attempts: usize },

	/// Malformed configuration, detected before any walk is attempted.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}

impl ChainError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidArgument(message.into())
	}
}

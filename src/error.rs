use thiserror::Error;

/// Errors returned by the kernels and the input parser.
///
/// Empty or all-non-finite input is not an error: kernels return NaN for it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
	/// Caller passed sequences of incompatible shape.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// A token in a text input could not be read as a number.
	#[error("line {line}: cannot parse {token:?} as a number")]
	Parse { line: usize, token: String },
}

impl Error {
	pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
		Self::InvalidArgument(msg.into())
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Client-level error types shared across auth, transport, and parsing layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Internally every API call resolves to a `Result<T, Error>` before the facade
/// propagates it; none of the variants below is ever retried except the
/// auth-rejection case handled inside the request executor, which is bounded to
/// a single guest-token refresh.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Guest-token acquisition failed, or the API rejected credentials twice.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Transport failure (DNS, TCP, TLS); never retried.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Non-success HTTP status other than an auth rejection.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Success status with a body that does not match the expected shape.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// Guest-session failures raised while acquiring or re-acquiring credentials.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The token-activation endpoint failed or returned a non-success status.
	#[error("Guest token endpoint returned an unexpected response: {message}.")]
	TokenEndpoint {
		/// Transport- or server-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when the endpoint responded at all.
		status: Option<u16>,
	},
	/// The activation response parsed but carried no guest token value.
	#[error("Guest token response is missing the guest_token field.")]
	MissingGuestToken,
	/// The API rejected the attached credentials on the original call and again
	/// after one guest-token refresh.
	#[error("Credentials were rejected twice with status {status}.")]
	Rejected {
		/// Status of the second rejection (401/403 class).
		status: u16,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		Self::network(e)
	}
}

/// Non-success HTTP response surfaced verbatim to the caller.
#[derive(Debug, ThisError)]
#[error("API request failed with status {status}.")]
pub struct ApiError {
	/// HTTP status code returned by the endpoint.
	pub status: u16,
	/// Response body, when one could be read.
	pub body: Option<String>,
}

/// Payload-shape failures on otherwise successful responses.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Body was not valid JSON, or valid JSON of the wrong shape.
	#[error("Response body returned malformed or unexpected JSON.")]
	Json {
		/// Structured parsing failure with the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A required field was absent from an otherwise well-formed payload.
	#[error("Response payload is missing the {field} field.")]
	MissingField {
		/// Dotted name of the missing field.
		field: &'static str,
	},
}

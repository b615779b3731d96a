//! Guest-session auth contexts: credential selection, header attachment, and
//! lazy guest-token acquisition.
//!
//! A [`GuestAuth`] owns one [`Credentials`] value and a fixed application
//! bearer token. It decides, per outgoing request, which credential material to
//! attach, and knows how to request a fresh guest token from the activation
//! endpoint when none is held. Acquisition is intentionally not serialized:
//! concurrent callers on one context may race to activate and the last write to
//! the credential store wins, which the API tolerates.

pub mod credentials;

pub use credentials::{Credentials, GuestToken, Secret};

// crates.io
use reqwest::{RequestBuilder, header};
// self
use crate::{
	_prelude::*,
	endpoint::Endpoints,
	error::AuthError,
	obs::{self, CallKind, CallOutcome, RequestSpan},
};

#[derive(Debug, Deserialize)]
struct ActivateResponse {
	#[serde(default)]
	guest_token: Option<String>,
}

/// Authentication context pairing an application bearer token with mutable
/// guest-session credentials.
///
/// Two independent instances coexist inside the scraper facade (general and
/// trends); each holds or lacks a guest token on its own and neither ever
/// touches the other's credential store.
pub struct GuestAuth {
	bearer_token: String,
	endpoints: Endpoints,
	http: ReqwestClient,
	credentials: RwLock<Credentials>,
}
impl GuestAuth {
	/// Creates a context with empty credentials for the provided bearer token.
	pub fn new(bearer_token: impl Into<String>, endpoints: Endpoints, http: ReqwestClient) -> Self {
		Self {
			bearer_token: bearer_token.into(),
			endpoints,
			http,
			credentials: RwLock::new(Credentials::default()),
		}
	}

	/// Decorates an outgoing request with this context's credential material.
	///
	/// The application bearer token is always attached. When both a cookie and
	/// a CSRF token are set they are attached as `cookie` + `x-csrf-token`
	/// headers and supersede guest-token identity; otherwise a held guest token
	/// is attached as `x-guest-token` as long as no cookie is set.
	pub fn attach_auth_headers(&self, request: RequestBuilder) -> RequestBuilder {
		let credentials = self.credentials.read();
		let mut request = request.bearer_auth(&self.bearer_token);

		match (credentials.cookie(), credentials.csrf_token()) {
			(Some(cookie), Some(csrf)) => {
				request = request
					.header(header::COOKIE, cookie.expose())
					.header("x-csrf-token", csrf.expose());
			},
			// A cookie without its CSRF partner cannot authenticate a request,
			// but its presence still suppresses guest-token identity.
			(Some(_), None) => {},
			(None, _) =>
				if let Some(token) = credentials.guest_token() {
					request = request.header("x-guest-token", token.secret().expose());
				},
		}

		request
	}

	/// Returns the held guest token, acquiring one from the activation endpoint
	/// when none is present.
	///
	/// Cache hits perform no I/O. A cache miss performs exactly one POST using
	/// only the bearer token; this context never retries the activation call
	/// itself (the request executor owns the single refresh-and-retry).
	pub async fn ensure_guest_token(&self) -> Result<String> {
		let held =
			self.credentials.read().guest_token().map(|token| token.secret().expose().to_owned());

		if let Some(token) = held {
			return Ok(token);
		}

		self.acquire_guest_token().await
	}

	/// Clears the stored guest token; idempotent.
	pub fn invalidate_guest_token(&self) {
		self.credentials.write().clear_guest_token();
	}

	/// Reports whether this context is authenticated enough to attempt
	/// requests: a guest token is held or a cookie is set.
	pub fn has_token(&self) -> bool {
		let credentials = self.credentials.read();

		credentials.has_guest_token() || credentials.cookie().is_some()
	}

	/// Installs a caller-supplied session cookie.
	pub fn use_cookie(&self, cookie: impl Into<String>) {
		self.credentials.write().set_cookie(cookie);
	}

	/// Installs a caller-supplied CSRF token.
	pub fn use_csrf_token(&self, token: impl Into<String>) {
		self.credentials.write().set_csrf_token(token);
	}

	/// Returns a snapshot of the held guest token, if any.
	pub fn guest_token(&self) -> Option<GuestToken> {
		self.credentials.read().guest_token().cloned()
	}

	/// Returns a snapshot of the installed cookie, if any.
	pub fn cookie(&self) -> Option<Secret> {
		self.credentials.read().cookie().cloned()
	}

	/// Returns a snapshot of the installed CSRF token, if any.
	pub fn csrf_token(&self) -> Option<Secret> {
		self.credentials.read().csrf_token().cloned()
	}

	/// Returns the endpoint catalog this context targets.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	pub(crate) fn http(&self) -> &ReqwestClient {
		&self.http
	}

	async fn acquire_guest_token(&self) -> Result<String> {
		const KIND: CallKind = CallKind::GuestActivate;

		let span = RequestSpan::new(KIND, "guest_activate");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response = self
					.http
					.post(self.endpoints.guest_activate())
					.bearer_auth(&self.bearer_token)
					.send()
					.await
					.map_err(|source| AuthError::TokenEndpoint {
						message: source.to_string(),
						status: None,
					})?;
				let status = response.status();

				if !status.is_success() {
					return Err(AuthError::TokenEndpoint {
						message: "activation was not accepted".into(),
						status: Some(status.as_u16()),
					}
					.into());
				}

				let body = response.bytes().await.map_err(|source| AuthError::TokenEndpoint {
					message: source.to_string(),
					status: Some(status.as_u16()),
				})?;
				let payload: ActivateResponse =
					serde_json::from_slice(&body).map_err(|source| AuthError::TokenEndpoint {
						message: source.to_string(),
						status: Some(status.as_u16()),
					})?;
				let token = payload
					.guest_token
					.filter(|token| !token.is_empty())
					.ok_or(AuthError::MissingGuestToken)?;

				self.credentials.write().set_guest_token(token.clone(), OffsetDateTime::now_utc());

				Ok(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}
}
impl Debug for GuestAuth {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GuestAuth")
			.field("endpoints", &self.endpoints)
			.field("has_token", &self.has_token())
			.finish()
	}
}

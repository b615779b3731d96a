//! Request executor: one HTTP call per attempt, uniform result mapping, and
//! the single guest-token refresh-and-retry.
//!
//! The executor owns the only retry in the crate. Transport failures, API
//! errors, and parse failures surface immediately; a 401/403-class rejection
//! invalidates the context's guest token and replays the attempt exactly once.
//! Both attempts run steps 1-3 in full: ensure a guest token (failure
//! short-circuits with no network call), attach auth headers, send.

// crates.io
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::GuestAuth,
	error::{ApiError, AuthError, ParseError, TransportError},
	obs::{self, CallKind, CallOutcome, RequestSpan},
};

/// One attempt either produced a parsed value or was rejected by auth.
enum Attempt<T> {
	Parsed(T),
	Rejected(u16),
}

pub(crate) struct RequestSpec {
	pub label: &'static str,
	pub method: Method,
	pub url: Url,
}
impl RequestSpec {
	pub fn get(label: &'static str, url: Url) -> Self {
		Self { label, method: Method::GET, url }
	}
}

pub(crate) async fn execute<T>(auth: &GuestAuth, spec: RequestSpec) -> Result<T>
where
	T: DeserializeOwned,
{
	const KIND: CallKind = CallKind::Api;

	let span = RequestSpan::new(KIND, spec.label);

	obs::record_call_outcome(KIND, CallOutcome::Attempt);

	let result = span
		.instrument(async move {
			match attempt(auth, &spec).await? {
				Attempt::Parsed(value) => Ok(value),
				Attempt::Rejected(_) => {
					auth.invalidate_guest_token();

					match attempt(auth, &spec).await? {
						Attempt::Parsed(value) => Ok(value),
						Attempt::Rejected(status) => Err(AuthError::Rejected { status }.into()),
					}
				},
			}
		})
		.await;

	match &result {
		Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
		Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
	}

	result
}

async fn attempt<T>(auth: &GuestAuth, spec: &RequestSpec) -> Result<Attempt<T>>
where
	T: DeserializeOwned,
{
	auth.ensure_guest_token().await?;

	let request =
		auth.attach_auth_headers(auth.http().request(spec.method.clone(), spec.url.clone()));
	let response = request.send().await.map_err(TransportError::from)?;
	let status = response.status();

	if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
		return Ok(Attempt::Rejected(status.as_u16()));
	}
	if !status.is_success() {
		let body = response.text().await.ok().filter(|body| !body.is_empty());

		return Err(ApiError { status: status.as_u16(), body }.into());
	}

	let body = response.bytes().await.map_err(TransportError::from)?;
	let mut deserializer = serde_json::Deserializer::from_slice(&body);
	let value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ParseError::Json { source })?;

	Ok(Attempt::Parsed(value))
}

//! Pure credential state held by a guest-auth context: the ephemeral guest
//! token, plus the optional caller-supplied cookie and CSRF token.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping credential material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Server-issued guest token together with its issuance instant.
///
/// The token is reused verbatim across requests until a call explicitly
/// invalidates it; the issuance instant is recorded for inspection but never
/// drives a speculative refresh.
#[derive(Clone, Debug)]
pub struct GuestToken {
	secret: Secret,
	issued_at: OffsetDateTime,
}
impl GuestToken {
	/// Returns the token secret.
	pub fn secret(&self) -> &Secret {
		&self.secret
	}

	/// Returns the instant the token was issued at.
	pub fn issued_at(&self) -> OffsetDateTime {
		self.issued_at
	}
}

/// Credential state owned by exactly one [`GuestAuth`](crate::auth::GuestAuth).
///
/// Pure data holder; all I/O lives in the owning context. Setters ignore empty
/// strings, the only validation this layer performs.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
	guest_token: Option<GuestToken>,
	cookie: Option<Secret>,
	csrf_token: Option<Secret>,
}
impl Credentials {
	/// Stores a guest token and its issuance instant.
	pub fn set_guest_token(&mut self, token: impl Into<String>, issued_at: OffsetDateTime) {
		let token = token.into();

		if token.is_empty() {
			return;
		}

		self.guest_token = Some(GuestToken { secret: Secret::new(token), issued_at });
	}

	/// Stores a session cookie.
	pub fn set_cookie(&mut self, cookie: impl Into<String>) {
		let cookie = cookie.into();

		if cookie.is_empty() {
			return;
		}

		self.cookie = Some(Secret::new(cookie));
	}

	/// Stores a CSRF token.
	pub fn set_csrf_token(&mut self, token: impl Into<String>) {
		let token = token.into();

		if token.is_empty() {
			return;
		}

		self.csrf_token = Some(Secret::new(token));
	}

	/// Returns the held guest token, if any.
	pub fn guest_token(&self) -> Option<&GuestToken> {
		self.guest_token.as_ref()
	}

	/// Returns the session cookie, if set.
	pub fn cookie(&self) -> Option<&Secret> {
		self.cookie.as_ref()
	}

	/// Returns the CSRF token, if set.
	pub fn csrf_token(&self) -> Option<&Secret> {
		self.csrf_token.as_ref()
	}

	/// Reports whether a guest token is currently held.
	pub fn has_guest_token(&self) -> bool {
		self.guest_token.is_some()
	}

	/// Clears the held guest token; idempotent.
	pub fn clear_guest_token(&mut self) {
		self.guest_token = None;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = Secret::new("guest-123");

		assert_eq!(format!("{secret:?}"), "Secret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn guest_token_lifecycle() {
		let mut credentials = Credentials::default();
		let issued = OffsetDateTime::now_utc();

		assert!(!credentials.has_guest_token());

		credentials.set_guest_token("token-1", issued);

		assert!(credentials.has_guest_token());
		assert_eq!(
			credentials.guest_token().map(|token| token.secret().expose()),
			Some("token-1")
		);
		assert_eq!(credentials.guest_token().map(GuestToken::issued_at), Some(issued));

		credentials.clear_guest_token();
		credentials.clear_guest_token();

		assert!(!credentials.has_guest_token());
	}

	#[test]
	fn empty_values_are_ignored() {
		let mut credentials = Credentials::default();

		credentials.set_guest_token("", OffsetDateTime::now_utc());
		credentials.set_cookie("");
		credentials.set_csrf_token("");

		assert!(!credentials.has_guest_token());
		assert!(credentials.cookie().is_none());
		assert!(credentials.csrf_token().is_none());
	}

	#[test]
	fn cookie_and_csrf_do_not_touch_guest_token() {
		let mut credentials = Credentials::default();

		credentials.set_guest_token("token-1", OffsetDateTime::now_utc());
		credentials.set_cookie("auth_token=abc");
		credentials.set_csrf_token("csrf-1");

		assert!(credentials.has_guest_token());
		assert_eq!(credentials.cookie().map(Secret::expose), Some("auth_token=abc"));
		assert_eq!(credentials.csrf_token().map(Secret::expose), Some("csrf-1"));
	}
}

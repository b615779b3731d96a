//! Unofficial X/Twitter web-API client—guest-session auth, cookie overrides, and cursor-driven
//! lazy pagination behind one scraper facade.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod obs;
pub mod paginate;
pub mod profile;
pub mod scraper;
pub mod search;
pub mod tweets;

mod http;
mod timeline;
mod trends;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {tokio as _, wiremock as _};

//! Storecheck API Suite Library
//!
//! Building blocks for the end-to-end suites in `tests/`:
//!
//! - [`client`] — the request executor; swallows HTTP error statuses,
//!   propagates transport failures
//! - [`validator`] — header / latency / type / value / schema checks
//!   over one completed response
//! - [`auth`] — fresh bearer-token acquisition per call
//! - [`fixtures`] — scoped user/product resources with guaranteed
//!   teardown
//! - [`schema`] — expected-shape documents from `schemas/`
//! - [`context`] — configuration + client bundle handed to each suite

pub mod auth;
pub mod client;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod schema;
pub mod validator;

pub use client::{ApiClient, ApiRequest, ApiResponse};
pub use context::SuiteContext;
pub use error::{ApiError, ApiResult};
pub use fixtures::{TestProduct, TestUser};
pub use validator::{JsonKind, ResponseValidator};

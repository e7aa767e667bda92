//! HTTP plumbing shared by every slice router.

pub mod error;
pub mod extract;
mod health;
pub mod pagination;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorBody, HttpError};
pub use extract::{Json, Path, Query};
pub use pagination::{Page, Pagination};
pub use state::{ApiState, ApiStateBuilder, ApiStateError};

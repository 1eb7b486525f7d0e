//! Data models for the review client
//!
//! Wire types of the review backend plus the client-side file and request types.

mod document;
mod envelope;
mod review;
mod task;
mod upload;

pub use document::*;
pub use envelope::*;
pub use review::*;
pub use task::*;
pub use upload::*;

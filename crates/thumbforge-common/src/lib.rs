//! Thumbforge-Common: Shared types, IDs, and error handling.
//!
//! - **Typed IDs**: [`ImageId`], the database-assigned image identifier
//! - **Core Types**: [`TargetSize`] and the JPEG MIME constant
//! - **Error Handling**: common [`Error`] and [`Result`] alias
//!
//! # Examples
//!
//! ```
//! use thumbforge_common::{Error, ImageId, Result, TargetSize};
//!
//! let id: ImageId = "7".parse().unwrap();
//! assert_eq!(id.get(), 7);
//! assert_eq!(TargetSize::default().to_string(), "128x128");
//!
//! fn lookup() -> Result<()> {
//!     Err(Error::not_found("7"))
//! }
//! assert!(lookup().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;

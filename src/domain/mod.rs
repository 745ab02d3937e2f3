//! Domain types for loganon.
//!
//! The domain layer provides the error hierarchy ([`LoganonError`],
//! [`FileError`]) and the [`Result`] alias used by every fallible
//! operation in the crate.
//!
//! ```rust
//! use loganon::domain::{LoganonError, Result};
//!
//! fn example() -> Result<()> {
//!     let _config = loganon::config::load_config("loganon.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::{FileError, LoganonError};
pub use result::Result;

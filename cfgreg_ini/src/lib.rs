//! cfgreg INI Provider
//!
//! File-backed [`ConfigProvider`](cfgreg_common::provider::ConfigProvider)
//! storing values in a flat INI-style text file.
//!
//! # Module Structure
//!
//! - [`document`] - In-memory section → option → value map and its writer
//! - [`parser`] - Line-oriented reader (comments, continuations, headers)
//! - [`provider`] - `IniConfigProvider`, the file-synchronised provider
//! - [`error`] - Read and file errors
//!
//! # File Format
//!
//! ```ini
//! [network]
//! port=8080
//! bind=0.0.0.0 ; inline comment
//! motd=first line
//! second line
//! ```

pub mod document;
pub mod error;
pub mod parser;
pub mod provider;

pub use document::IniDocument;
pub use error::IniError;
pub use parser::{parse, parse_str};
pub use provider::IniConfigProvider;

#![deny(missing_docs)]

//! An interactive editor for flat key-value JSON documents.
//!
//! The library holds the document operations: loading and saving a
//! string-valued JSON object, case-insensitive search over its values and
//! grouping of keys that share a value. [`Shell`] wraps them in the
//! menu-driven session used by the `jsonkv` binary.

mod document;
mod duplicates;
mod error;
mod search;
mod shell;
mod store;

pub use document::Document;
pub use duplicates::{find_duplicate_values, DuplicateGroups};
pub use error::{ErrorKind, KvError, Result};
pub use search::{search_in_values, SearchResult};
pub use shell::{Action, Shell};
pub use store::{load_document, save_document, validate_json_path, Store};

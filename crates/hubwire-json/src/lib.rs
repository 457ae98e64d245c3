//! # hubwire-json
//!
//! JSON adapter for the GitHub REST API, layered over serde and serde_json.
//!
//! - Struct members are written under their `snake_case` wire names
//!   ([`naming::to_wire_name`]), and `None` members are written as `null`.
//! - Unit enum variants are written lowercase and read back
//!   case-insensitively, ignoring `-`.
//! - URI fields typed as [`Locator`] never fail to decode.
//! - Variants carrying data are written as `{"Variant": payload}`, with the
//!   variant name verbatim and the payload mapped like any other value.
//!
//! Two serde shapes bypass the member mapping and are not supported:
//!
//! - `#[serde(flatten)]` members. Serializing a type that has one fails with
//!   [`Error::Message`].
//! - Internally tagged enums (`#[serde(tag = "...")]`). They serialize with
//!   wire names, but serde buffers the payload before decoding it, so reading
//!   them back fails with a missing field error.
//!
//! ```
//! use hubwire_json::JsonSerializer;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Thread {
//!     id: String,
//!     last_read_at: Option<String>,
//! }
//!
//! let json = JsonSerializer::new();
//! let text = json
//!     .serialize(&Thread { id: "5".into(), last_read_at: None })
//!     .unwrap();
//! assert_eq!(text, r#"{"id":"5","last_read_at":null}"#);
//! ```

mod cache;
mod de;
mod error;
mod locator;
pub mod naming;
mod ser;
mod serializer;
mod strategy;

pub use cache::{Member, MemberCache, Members, TypeKey};
pub use error::{Error, Result};
pub use locator::Locator;
pub use serializer::JsonSerializer;
pub use strategy::{GitHubStrategy, PocoStrategy, Strategy};
// Re-export the tree types returned by `to_value` and `try_serialize_object`
pub use serde_json::{Map, Value};

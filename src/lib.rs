// model = "claude-opus-4-5"
// created = "2026-02-01"
// modified = "2026-02-02"
// driver = "Isaac Clayton"

//! Strand - a persistent rope for immutable text.
//!
//! A rope stores text as a balanced tree of bounded string leaves. Every
//! edit returns a *new* rope that shares all unchanged subtrees with the
//! old one, so old versions stay alive for free and readers never see a
//! value change underneath them.
//!
//! # Quick Start
//!
//! ```
//! use strand::Rope;
//!
//! let before = Rope::from("Hello, World!");
//! let after = before.insert(5, " there").unwrap();
//!
//! assert_eq!(after.to_string(), "Hello there, World!");
//! // The original value is untouched.
//! assert_eq!(before.to_string(), "Hello, World!");
//!
//! let word = after.sub_rope(13, 18).unwrap();
//! assert_eq!(word.to_string(), "World");
//! ```

pub mod error;
pub mod leaf;
pub mod node;
pub mod rope;

mod descent;
mod history;

pub use error::RopeError;
pub use rope::{Chars, Rope};

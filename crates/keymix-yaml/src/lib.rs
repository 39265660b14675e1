//! Keymix YAML - the narrow YAML subset used by engine `.anim` assets
//!
//! This is deliberately not a general YAML implementation. Field order and
//! token rendering are part of the asset format, so documents are built as an
//! explicit [`Node`] tree and written by [`to_string`] exactly as constructed.
//! [`from_str`] reads the same subset back (block and flow collections, plain
//! and quoted scalars).

mod node;
mod parser;
mod writer;

pub use node::{Mapping, Node, Scalar, Style};
pub use parser::from_str;
pub use writer::to_string;

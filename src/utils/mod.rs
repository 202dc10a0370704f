//! Small shared helpers: timestamps, MIME types, filesystem paths.

pub mod date;
pub mod mime;
pub mod path;
mod plural;

pub use plural::{plural_count, plural_s};

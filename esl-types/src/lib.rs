//! Type definitions shared across the esl crates

pub mod bitmap;
pub mod error;
pub mod tag_id;

pub use bitmap::Bitmap;
pub use error::{Error, Result};
pub use tag_id::DisplayTagId;

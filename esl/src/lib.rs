//! # esl
//!
//! Encoder and decoder for 433 MHz electronic shelf label packets.
//!
//! ## Features
//!
//! - Text, barcode, line, rectangle, image and LED entities
//! - Run length compressed black and spot-colour image planes
//! - Tag acknowledgement parsing
//! - Human readable packet dumps through `Display`
//!
//! ## Quick Start
//!
//! ```
//! use esl::{Entity, FontStyle, TextEntity};
//!
//! fn main() -> esl::Result<()> {
//!     let price = TextEntity::new(10, 20, FontStyle::Px24, "4,95")?;
//!     let entity = Entity::from(price);
//!
//!     let packet = entity.encode()?;
//!     println!("{}", packet);
//!     println!("{}", entity);
//!
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

// Re-exports
pub use entity::{Entity, EntityKind};
pub use error::{Error, Result};

// Re-export codec types
pub use esl_core::entity::{
    BarcodeEntity, EntityCodec, ImageEntity, ImagePlane, LedColor, LedEntity, LineEntity,
    RectangleEntity, TextEntity,
};
pub use esl_core::{AcknowledgementPacket, DrawStyle, FontStyle, TagStatus};
pub use esl_types::{Bitmap, DisplayTagId};

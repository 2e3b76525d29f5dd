//! # esl-core
//!
//! Codec for 433 MHz electronic shelf label tags.
//!
//! This crate provides the protocol primitives:
//! - Fixed-width hex number encoding
//! - Code 128 and EAN-13 check characters
//! - Run length compression of pixel planes
//! - Display entity packets and tag acknowledgements

pub mod ack;
pub mod checksum;
pub mod constants;
pub mod entity;
pub mod error;
pub mod layout;
pub mod rle;
pub mod style;
pub mod value;

pub use ack::AcknowledgementPacket;
pub use entity::EntityCodec;
pub use error::{Error, Result};
pub use style::{DrawStyle, FontStyle, TagStatus};
pub use value::Endian;

//! Any display entity behind one type

use std::fmt;

use bytes::Bytes;
use tracing::trace;

use esl_core::entity::{
    BarcodeEntity, EntityCodec, ImageEntity, LedEntity, LineEntity, RectangleEntity, TextEntity,
};

use crate::error::Result;

/// Entity kind, needed to pick a decoder for a received packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Text,
    Barcode,
    Rectangle,
    Line,
    Image,
    Led,
}

impl EntityKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => TextEntity::KIND,
            Self::Barcode => BarcodeEntity::KIND,
            Self::Rectangle => RectangleEntity::KIND,
            Self::Line => LineEntity::KIND,
            Self::Image => ImageEntity::KIND,
            Self::Led => LedEntity::KIND,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One drawing instruction of any kind
///
/// # Examples
///
/// ```
/// use esl::{Entity, EntityKind, LineEntity};
///
/// let line = Entity::from(LineEntity::horizontal_line(1, 1, 1).unwrap());
/// let frame = line.to_bytes().unwrap();
/// assert_eq!(&frame[..], &[0x07, 0x01, 0x00, 0x01, 0x00, 0x62, 0x00, 0x01]);
///
/// let decoded = Entity::from_bytes(EntityKind::Line, &frame).unwrap();
/// assert_eq!(decoded, line);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Text(TextEntity),
    Barcode(BarcodeEntity),
    Rectangle(RectangleEntity),
    Line(LineEntity),
    Image(ImageEntity),
    Led(LedEntity),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Text(_) => EntityKind::Text,
            Self::Barcode(_) => EntityKind::Barcode,
            Self::Rectangle(_) => EntityKind::Rectangle,
            Self::Line(_) => EntityKind::Line,
            Self::Image(_) => EntityKind::Image,
            Self::Led(_) => EntityKind::Led,
        }
    }

    /// Parse a hex packet of the given kind
    pub fn decode(kind: EntityKind, raw: &str) -> Result<Self> {
        trace!(%kind, len = raw.len(), "Decoding entity");
        let entity = match kind {
            EntityKind::Text => Self::Text(TextEntity::decode(raw)?),
            EntityKind::Barcode => Self::Barcode(BarcodeEntity::decode(raw)?),
            EntityKind::Rectangle => Self::Rectangle(RectangleEntity::decode(raw)?),
            EntityKind::Line => Self::Line(LineEntity::decode(raw)?),
            EntityKind::Image => Self::Image(ImageEntity::decode(raw)?),
            EntityKind::Led => Self::Led(LedEntity::decode(raw)?),
        };
        Ok(entity)
    }

    /// Build the hex packet
    pub fn encode(&self) -> Result<String> {
        let raw = match self {
            Self::Text(e) => e.encode()?,
            Self::Barcode(e) => e.encode()?,
            Self::Rectangle(e) => e.encode()?,
            Self::Line(e) => e.encode()?,
            Self::Image(e) => e.encode()?,
            Self::Led(e) => e.encode()?,
        };
        Ok(raw)
    }

    /// Binary frame, one byte per pair of hex characters
    pub fn to_bytes(&self) -> Result<Bytes> {
        let raw = self.encode()?;
        Ok(Bytes::from(hex::decode(raw)?))
    }

    /// Parse a binary frame of the given kind
    pub fn from_bytes(kind: EntityKind, frame: &[u8]) -> Result<Self> {
        Self::decode(kind, &hex::encode_upper(frame))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(e) => fmt::Display::fmt(e, f),
            Self::Barcode(e) => fmt::Display::fmt(e, f),
            Self::Rectangle(e) => fmt::Display::fmt(e, f),
            Self::Line(e) => fmt::Display::fmt(e, f),
            Self::Image(e) => fmt::Display::fmt(e, f),
            Self::Led(e) => fmt::Display::fmt(e, f),
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Entity {
                fn from(entity: $ty) -> Self {
                    Self::$variant(entity)
                }
            }
        )+
    };
}

impl_from! {
    Text(TextEntity),
    Barcode(BarcodeEntity),
    Rectangle(RectangleEntity),
    Line(LineEntity),
    Image(ImageEntity),
    Led(LedEntity),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use esl_core::entity::LedColor;
    use esl_core::style::FontStyle;
    use esl_types::Bitmap;
    use pretty_assertions::assert_eq;

    fn samples() -> Vec<Entity> {
        let mut black = vec![false; 16 * 8];
        black[..16].fill(true);
        let bitmap = Bitmap::new(16, 8, black).unwrap();

        vec![
            TextEntity::new(1, 1, FontStyle::Px12, "Aa").unwrap().into(),
            BarcodeEntity::new(1, 1, FontStyle::Barcode128, "9").unwrap().into(),
            RectangleEntity::new(1, 1, 0x32, 0x32).unwrap().with_reserved(1).into(),
            LineEntity::vertical_line(16, 16, 2).unwrap().into(),
            ImageEntity::new(FontStyle::ImageCompress, 0, 0, &bitmap).unwrap().into(),
            LedEntity::new(LedColor::GREEN, 20003, 4).unwrap().into(),
        ]
    }

    #[test]
    fn test_encode_dispatch() {
        let raw: Vec<String> = samples().iter().map(|e| e.encode().unwrap()).collect();
        assert_eq!(raw[0], "09010001000200410061");
        assert_eq!(raw[1], "0D010001004200880039003A008A");
        assert_eq!(raw[2], "0B0100016400003200320001");
        assert_eq!(raw[5], "07024E2300ED0004");
    }

    #[test]
    fn test_decode_each_kind() {
        for entity in samples() {
            let raw = entity.encode().unwrap();
            assert_eq!(Entity::decode(entity.kind(), &raw).unwrap(), entity);
        }
    }

    #[test]
    fn test_binary_frames() {
        for entity in samples() {
            let frame = entity.to_bytes().unwrap();
            assert_eq!(frame.len() * 2, entity.encode().unwrap().len());
            assert_eq!(Entity::from_bytes(entity.kind(), &frame).unwrap(), entity);
        }
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let led = Entity::from(LedEntity::new(LedColor::RED, 1, 1).unwrap());
        let raw = led.encode().unwrap();
        assert!(matches!(
            Entity::decode(EntityKind::Rectangle, &raw),
            Err(Error::Core(_))
        ));
    }

    #[test]
    fn test_display_delegates() {
        let entity = samples().remove(0);
        assert!(entity.to_string().starts_with("Entity Text package"));
        assert_eq!(entity.kind().to_string(), "text");
    }
}

//! Image entity
//!
//! An image is one or two compressed pixel planes. Each plane carries its own
//! header:
//!
//! ```text
//! ┌───────────┬──────┬──────┬──────┬──────┬──────────┬────────────┬──────────┐
//! │ FontStyle │  Y   │  X   │ YEnd │ XEnd │ Reserved │ DataLength │ RLE data │
//! │ 2         │ 4    │ 4    │ 4    │ 4    │ 4        │ 4 (bytes)  │ N        │
//! └───────────┴──────┴──────┴──────┴──────┴──────────┴────────────┴──────────┘
//! ```
//!
//! `YEnd = Y + height - 1` and `XEnd = X + width - 1`. The spot-colour plane
//! sets the top bit of both row fields and directly follows the black plane.

use std::fmt;

use bytes::Bytes;
use esl_types::Bitmap;
use tracing::debug;

use super::{Dump, EntityCodec};
use crate::constants::image::{MAX_COORDINATE, SPOT_PLANE_FLAG};
use crate::error::{Error, Result};
use crate::layout::{fields, Field, Reader, Writer};
use crate::rle;
use crate::style::FontStyle;

const ROW: Field = Field::big("Y", 4);
const COLUMN: Field = Field::big("X", 4);
const ROW_END: Field = Field::big("YEnd", 4);
const COLUMN_END: Field = Field::big("XEnd", 4);
const RESERVED: Field = Field::big("Reserved", 4);
const DATA_LENGTH: Field = Field::big("DataLength", 4);

/// One run length encoded plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePlane {
    reserved: u16,
    data: Bytes,
}

impl ImagePlane {
    /// Compress a row-major plane
    pub fn compress(pixels: &[bool]) -> Self {
        Self::from_compressed(rle::compress(pixels))
    }

    /// Wrap data that is already run length encoded
    pub fn from_compressed(data: impl Into<Bytes>) -> Self {
        Self {
            reserved: 0,
            data: data.into(),
        }
    }

    /// Replace the undocumented header word, zero by default
    pub fn with_reserved(mut self, reserved: u16) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn reserved(&self) -> u16 {
        self.reserved
    }

    /// Compressed bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Expand to `pixel_count` pixels
    pub fn pixels(&self, pixel_count: usize) -> Result<Vec<bool>> {
        rle::decompress(&self.data, pixel_count)
    }
}

/// Plane header as read from the wire
#[derive(Debug, PartialEq, Eq)]
struct PlaneHeader {
    font_style: FontStyle,
    spot: bool,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

/// A raster image
///
/// # Examples
///
/// ```
/// use esl_core::entity::{EntityCodec, ImageEntity};
/// use esl_core::style::FontStyle;
/// use esl_types::Bitmap;
///
/// let mut black = vec![false; 400 * 300];
/// black[0] = true;
/// let bitmap = Bitmap::new(400, 300, black).unwrap();
///
/// let image = ImageEntity::new(FontStyle::ImageCompress, 0, 0, &bitmap).unwrap();
/// assert_eq!(image.encode().unwrap(), "FC00000000012B018F00000007C000FFFF00BAD4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntity {
    font_style: FontStyle,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    black: ImagePlane,
    spot: Option<ImagePlane>,
}

impl ImageEntity {
    /// Compress `bitmap` into an image placed at column `x`, row `y`
    pub fn new(font_style: FontStyle, x: u16, y: u16, bitmap: &Bitmap) -> Result<Self> {
        Self::from_planes(
            font_style,
            x,
            y,
            bitmap.width(),
            bitmap.height(),
            ImagePlane::compress(bitmap.black()),
            bitmap.spot().map(ImagePlane::compress),
        )
    }

    /// Assemble an image from planes that are already compressed
    ///
    /// # Errors
    ///
    /// - `UnsupportedFontStyle` unless the style is one of the image styles
    /// - `InvalidInput` for an empty image
    /// - `EncodingOverflow` if the image reaches past the coordinate range
    ///   or a plane is longer than 65535 bytes
    /// - `MalformedRle` if a plane does not expand to exactly
    ///   `width * height` pixels
    pub fn from_planes(
        font_style: FontStyle,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        black: ImagePlane,
        spot: Option<ImagePlane>,
    ) -> Result<Self> {
        let entity = Self {
            font_style: font_style.normalize(),
            x,
            y,
            width,
            height,
            black,
            spot,
        };
        entity.validate()?;
        Ok(entity)
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn black(&self) -> &ImagePlane {
        &self.black
    }

    pub fn spot(&self) -> Option<&ImagePlane> {
        self.spot.as_ref()
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Expand both planes back into a bitmap
    pub fn to_bitmap(&self) -> Result<Bitmap> {
        let black = self.black.pixels(self.pixel_count())?;
        let bitmap = match &self.spot {
            Some(spot) => {
                let spot = spot.pixels(self.pixel_count())?;
                Bitmap::with_spot(self.width, self.height, black, spot)?
            }
            None => Bitmap::new(self.width, self.height, black)?,
        };
        Ok(bitmap)
    }

    fn validate(&self) -> Result<()> {
        if !self.font_style.is_image() {
            return Err(Error::UnsupportedFontStyle {
                entity: Self::KIND,
                style: self.font_style,
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidInput(format!(
                "image must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        let row_end = u32::from(self.y) + u32::from(self.height) - 1;
        let column_end = u32::from(self.x) + u32::from(self.width) - 1;
        if row_end > u32::from(MAX_COORDINATE) {
            return Err(Error::EncodingOverflow {
                value: u64::from(row_end),
                digits: ROW_END.digits,
            });
        }
        if column_end > u32::from(u16::MAX) {
            return Err(Error::EncodingOverflow {
                value: u64::from(column_end),
                digits: COLUMN_END.digits,
            });
        }

        for plane in std::iter::once(&self.black).chain(self.spot.as_ref()) {
            if plane.data.len() > usize::from(u16::MAX) {
                return Err(Error::EncodingOverflow {
                    value: plane.data.len() as u64,
                    digits: DATA_LENGTH.digits,
                });
            }
            plane.pixels(self.pixel_count())?;
        }
        Ok(())
    }

    fn plane_flag(spot: bool) -> u16 {
        if spot { SPOT_PLANE_FLAG } else { 0 }
    }

    fn write_plane(&self, writer: &mut Writer, plane: &ImagePlane, spot: bool) -> Result<()> {
        let flag = Self::plane_flag(spot);
        writer
            .put(fields::FONT_STYLE, self.font_style)?
            .put(ROW, self.y | flag)?
            .put(COLUMN, self.x)?
            .put(ROW_END, (self.y + (self.height - 1)) | flag)?
            .put(COLUMN_END, self.x + (self.width - 1))?
            .put(RESERVED, plane.reserved)?
            .put(DATA_LENGTH, plane.data.len() as u32)?
            .put_hex(&hex::encode_upper(&plane.data));
        Ok(())
    }

    fn read_plane(reader: &mut Reader<'_>) -> Result<(PlaneHeader, ImagePlane)> {
        let font_style = FontStyle::from(reader.read_u8(fields::FONT_STYLE)?);
        let row = reader.read_u16(ROW)?;
        let x = reader.read_u16(COLUMN)?;
        let row_end = reader.read_u16(ROW_END)?;
        let column_end = reader.read_u16(COLUMN_END)?;
        let reserved = reader.read_u16(RESERVED)?;
        let data_len = reader.read_u16(DATA_LENGTH)? as usize;

        let spot = row & SPOT_PLANE_FLAG != 0;
        if spot != (row_end & SPOT_PLANE_FLAG != 0) {
            return Err(Error::InvalidInput(
                "plane flag differs between Y and YEnd".to_string(),
            ));
        }
        let y = row & !SPOT_PLANE_FLAG;
        let y_end = row_end & !SPOT_PLANE_FLAG;
        if y_end < y || column_end < x {
            return Err(Error::InvalidInput(format!(
                "image corners ({}, {}) and ({}, {}) are out of order",
                x, y, column_end, y_end
            )));
        }

        if reader.remaining() < data_len * 2 {
            return Err(Error::LengthMismatch {
                declared: data_len * 2,
                actual: reader.remaining(),
            });
        }
        let data_hex = reader.take(data_len * 2)?;
        let data = hex::decode(data_hex).map_err(|_| Error::MalformedHex {
            input: data_hex.to_string(),
            reason: "invalid RLE data",
        })?;

        let header = PlaneHeader {
            font_style,
            spot,
            x,
            y,
            width: column_end - x + 1,
            height: y_end - y + 1,
        };
        let plane = ImagePlane::from_compressed(data).with_reserved(reserved);
        Ok((header, plane))
    }
}

impl EntityCodec for ImageEntity {
    const KIND: &'static str = "image";

    fn decode(raw: &str) -> Result<Self> {
        let mut reader = Reader::new(raw)?;

        let (header, black) = Self::read_plane(&mut reader)?;
        if header.spot {
            return Err(Error::InvalidInput(
                "image must start with the black plane".to_string(),
            ));
        }

        let spot = if reader.remaining() > 0 {
            let (spot_header, spot) = Self::read_plane(&mut reader)?;
            let expected = PlaneHeader {
                spot: true,
                ..header
            };
            if spot_header != expected {
                return Err(Error::InvalidInput(
                    "spot plane header does not match the black plane".to_string(),
                ));
            }
            Some(spot)
        } else {
            None
        };
        reader.finish()?;

        let entity = Self::from_planes(
            header.font_style,
            header.x,
            header.y,
            header.width,
            header.height,
            black,
            spot,
        )?;

        debug!(
            x = entity.x,
            y = entity.y,
            width = entity.width,
            height = entity.height,
            spot = entity.spot.is_some(),
            "Decoded image entity"
        );

        Ok(entity)
    }

    fn encode(&self) -> Result<String> {
        let mut writer = Writer::new();
        self.write_plane(&mut writer, &self.black, false)?;
        if let Some(spot) = &self.spot {
            self.write_plane(&mut writer, spot, true)?;
        }
        Ok(writer.finish())
    }
}

impl fmt::Display for ImageEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dump = Dump::start(f, "Entity Image package")?;
        let planes = std::iter::once((&self.black, false)).chain(self.spot.as_ref().map(|p| (p, true)));
        for (plane, spot) in planes {
            let flag = Self::plane_flag(spot);
            dump.field(fields::FONT_STYLE, self.font_style, self.font_style.name())?;
            dump.field(ROW, self.y | flag, if spot { "spot plane" } else { "black plane" })?;
            dump.field(COLUMN, self.x, self.x)?;
            dump.field(ROW_END, (self.y + (self.height - 1)) | flag, self.y + (self.height - 1))?;
            dump.field(COLUMN_END, self.x + (self.width - 1), self.x + (self.width - 1))?;
            dump.field(RESERVED, plane.reserved, "meaning unknown")?;
            dump.field(DATA_LENGTH, plane.data.len() as u32, format!("{} bytes", plane.data.len()))?;
            dump.part("Data", &hex::encode_upper(&plane.data), "run length encoded")?;
        }
        Ok(())
    }
}

//! LED flash entity
//!
//! Tells the tag how to blink its LED once an update has been applied.

use std::fmt;

use bitflags::bitflags;

use super::{Dump, EntityCodec};
use crate::constants::led::RESERVED as DEFAULT_RESERVED;
use crate::error::{Error, Result};
use crate::layout::{fields, Field, Reader, Writer};

const FLASH_COLOR: Field = Field::big("FlashColor", 2);
const SERVICE_CODE: Field = Field::big("ServiceCode", 4);
const RESERVED: Field = Field::big("Reserved", 4);
const FLASH_TIMES: Field = Field::big("FlashTimes", 4);

bitflags! {
    /// LED colours to flash, any combination
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LedColor: u8 {
        const RED = 0x01;
        const GREEN = 0x02;
        const BLUE = 0x04;
    }
}

/// LED flash command
///
/// # Packet Structure
///
/// ```text
/// DataLength  FlashColor  ServiceCode  Reserved  FlashTimes
/// 07          04          4E2E         00ED      0003
/// ```
///
/// The reserved word is always `00ED` on the wire; its meaning is unknown
/// and decoded values are kept as received.
///
/// # Examples
///
/// ```
/// use esl_core::entity::{EntityCodec, LedColor, LedEntity};
///
/// let led = LedEntity::new(LedColor::BLUE, 20014, 3).unwrap();
/// assert_eq!(led.encode().unwrap(), "07044E2E00ED0003");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedEntity {
    color: LedColor,
    service_code: u16,
    reserved: u16,
    flash_times: u16,
}

impl LedEntity {
    /// Characters after the data length field
    const BODY_LEN: usize = 14;

    /// Create a flash command
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `flash_times` is zero.
    pub fn new(color: LedColor, service_code: u16, flash_times: u16) -> Result<Self> {
        if flash_times == 0 {
            return Err(Error::InvalidInput(
                "LED must flash at least once".to_string(),
            ));
        }
        Ok(Self {
            color,
            service_code,
            reserved: DEFAULT_RESERVED,
            flash_times,
        })
    }

    pub fn with_reserved(mut self, reserved: u16) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn color(&self) -> LedColor {
        self.color
    }

    /// Service code echoed by the tag's acknowledgement
    pub fn service_code(&self) -> u16 {
        self.service_code
    }

    pub fn reserved(&self) -> u16 {
        self.reserved
    }

    pub fn flash_times(&self) -> u16 {
        self.flash_times
    }
}

impl EntityCodec for LedEntity {
    const KIND: &'static str = "LED";

    fn decode(raw: &str) -> Result<Self> {
        let mut reader = Reader::framed(raw)?;
        if reader.remaining() != Self::BODY_LEN {
            return Err(Error::LengthMismatch {
                declared: Self::BODY_LEN,
                actual: reader.remaining(),
            });
        }

        let color = LedColor::from_bits_retain(reader.read_u8(FLASH_COLOR)?);
        let service_code = reader.read_u16(SERVICE_CODE)?;
        let reserved = reader.read_u16(RESERVED)?;
        let flash_times = reader.read_u16(FLASH_TIMES)?;
        reader.finish()?;

        Ok(Self::new(color, service_code, flash_times)?.with_reserved(reserved))
    }

    fn encode(&self) -> Result<String> {
        let mut writer = Writer::new();
        writer
            .put(FLASH_COLOR, self.color.bits())?
            .put(SERVICE_CODE, self.service_code)?
            .put(RESERVED, self.reserved)?
            .put(FLASH_TIMES, self.flash_times)?;
        writer.finish_framed()
    }
}

impl fmt::Display for LedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let colors: Vec<&str> = self.color.iter_names().map(|(name, _)| name).collect();

        let mut dump = Dump::start(f, "LED Data package")?;
        dump.data_length(fields::DATA_LENGTH.digits + Self::BODY_LEN)?;
        dump.field(FLASH_COLOR, self.color.bits(), colors.join(" | "))?;
        dump.field(SERVICE_CODE, self.service_code, self.service_code)?;
        dump.field(RESERVED, self.reserved, "fixed value")?;
        dump.field(FLASH_TIMES, self.flash_times, self.flash_times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_led_encode() {
        let led = LedEntity::new(LedColor::GREEN, 20003, 4).unwrap();
        assert_eq!(led.encode().unwrap(), "07024E2300ED0004");
    }

    #[test]
    fn test_led_decode() {
        let led = LedEntity::decode("07044E2E00ED0003").unwrap();
        assert_eq!(led.color(), LedColor::BLUE);
        assert_eq!(led.service_code(), 20014);
        assert_eq!(led.reserved(), 0x00ED);
        assert_eq!(led.flash_times(), 3);
    }

    #[test]
    fn test_led_raw_round_trip() {
        for raw in ["07044E2E00ED0003", "07024E2300ED0004", "0707FFFF1234FFFF", "07F00001000000FF"] {
            assert_eq!(LedEntity::decode(raw).unwrap().encode().unwrap(), raw);
        }
    }

    #[test]
    fn test_led_all_colors() {
        let led = LedEntity::new(LedColor::all(), 1, 1).unwrap();
        assert_eq!(led.encode().unwrap(), "0707000100ED0001");
        assert!(led.to_string().contains("07 (RED | GREEN | BLUE)"));
    }

    #[test]
    fn test_led_zero_flashes() {
        assert!(matches!(
            LedEntity::new(LedColor::RED, 1, 0),
            Err(Error::InvalidInput(_))
        ));
        assert!(LedEntity::decode("07014E2E00ED0000").is_err());
    }

    #[test]
    fn test_led_length_mismatch() {
        assert!(matches!(
            LedEntity::decode("08044E2E00ED0003"),
            Err(Error::LengthMismatch { .. })
        ));
    }
}

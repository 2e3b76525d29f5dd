//! Acknowledgement packets sent back by the tags
//!
//! # Packet Structure
//!
//! ```text
//! Start  Length  ServiceCode  DisplayTagId  RSSI  TagStatus  Volt  Temperature
//! @      0012    4E23         061C95        AD    54         1F    11
//! ```
//!
//! Unlike the entities the length field counts hex characters, not bytes.

use std::fmt;

use esl_types::DisplayTagId;
use tracing::{debug, warn};

use crate::constants::ack::{BODY_LEN, MARKER, PACKET_LEN, RSSI_OFFSET};
use crate::entity::Dump;
use crate::error::{Error, Result};
use crate::layout::{Field, Reader, Writer};
use crate::style::TagStatus;

const LENGTH: Field = Field::big("Length", 4);
const SERVICE_CODE: Field = Field::big("ServiceCode", 4);
const RSSI: Field = Field::big("RSSI", 2);
const TAG_STATUS: Field = Field::big("TagStatus", 2);
const VOLT: Field = Field::big("Volt", 2);
const TEMPERATURE: Field = Field::big("Temperature", 2);

/// Highest raw RSSI and temperature byte a tag reports
const MAX_READING: u8 = 254;

/// Reply from a tag to an earlier command
///
/// # Examples
///
/// ```
/// use esl_core::AcknowledgementPacket;
/// use esl_core::style::TagStatus;
///
/// let ack = AcknowledgementPacket::decode("@00124E23061C95AD541F11").unwrap();
/// assert_eq!(ack.service_code(), 20003);
/// assert_eq!(ack.rssi(), -81);
/// assert_eq!(ack.tag_status(), TagStatus::Success);
/// assert_eq!(ack.encode().unwrap(), "@00124E23061C95AD541F11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcknowledgementPacket {
    service_code: u16,
    display_tag_id: DisplayTagId,
    rssi: i16,
    tag_status: TagStatus,
    volt_tenths: u8,
    temperature: u8,
}

impl AcknowledgementPacket {
    /// Build an acknowledgement
    ///
    /// `rssi` is the signal strength in dBm, between -254 and 0. `volt_tenths`
    /// is the battery voltage in tenths of a volt.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `rssi` or `temperature` is outside the range a tag
    /// can report.
    pub fn new(
        service_code: u16,
        display_tag_id: DisplayTagId,
        rssi: i16,
        tag_status: TagStatus,
        volt_tenths: u8,
        temperature: u8,
    ) -> Result<Self> {
        if !(-RSSI_OFFSET..=0).contains(&rssi) {
            return Err(Error::InvalidInput(format!(
                "RSSI must be between -{} and 0 dBm, got {}",
                RSSI_OFFSET, rssi
            )));
        }
        if temperature > MAX_READING {
            return Err(Error::InvalidInput(format!(
                "temperature must be at most {} degrees, got {}",
                MAX_READING, temperature
            )));
        }
        Ok(Self {
            service_code,
            display_tag_id,
            rssi,
            tag_status: tag_status.normalize(),
            volt_tenths,
            temperature,
        })
    }

    /// Parse a 23 character acknowledgement
    pub fn decode(raw: &str) -> Result<Self> {
        if raw.len() != PACKET_LEN {
            return Err(Error::LengthMismatch {
                declared: PACKET_LEN,
                actual: raw.len(),
            });
        }
        let body = raw.strip_prefix(MARKER).ok_or_else(|| {
            Error::InvalidInput(format!(
                "acknowledgement must start with {:?}, got {:?}",
                MARKER,
                raw.chars().next().unwrap_or_default()
            ))
        })?;

        let mut reader = Reader::new(body)?;
        let declared = reader.read(LENGTH)? as usize;
        if declared != BODY_LEN {
            return Err(Error::LengthMismatch {
                declared,
                actual: reader.remaining(),
            });
        }

        let service_code = reader.read_u16(SERVICE_CODE)?;
        let display_tag_id = DisplayTagId::new(reader.take(DisplayTagId::LEN)?)?;
        let raw_rssi = reader.read_u8(RSSI)?;
        let tag_status = TagStatus::from(reader.read_u8(TAG_STATUS)?);
        let volt_tenths = reader.read_u8(VOLT)?;
        let temperature = reader.read_u8(TEMPERATURE)?;
        reader.finish()?;

        if raw_rssi > MAX_READING {
            return Err(Error::InvalidInput(format!(
                "raw RSSI must be at most {}, got {}",
                MAX_READING, raw_rssi
            )));
        }

        let ack = Self::new(
            service_code,
            display_tag_id,
            i16::from(raw_rssi) - RSSI_OFFSET,
            tag_status,
            volt_tenths,
            temperature,
        )?;

        if ack.tag_status.is_success() {
            debug!(
                service_code,
                tag = %ack.display_tag_id,
                rssi = ack.rssi,
                "Tag acknowledged"
            );
        } else {
            warn!(
                service_code,
                tag = %ack.display_tag_id,
                status = %ack.tag_status,
                "Tag reported failure"
            );
        }

        Ok(ack)
    }

    /// Build the 23 character acknowledgement
    pub fn encode(&self) -> Result<String> {
        let mut writer = Writer::new();
        writer
            .put(SERVICE_CODE, self.service_code)?
            .put_hex(self.display_tag_id.as_str())
            .put(RSSI, self.raw_rssi())?
            .put(TAG_STATUS, self.tag_status)?
            .put(VOLT, self.volt_tenths)?
            .put(TEMPERATURE, self.temperature)?;

        let length = LENGTH.render(writer.len() as u32)?;
        Ok(format!("{}{}{}", MARKER, length, writer.finish()))
    }

    /// Service code of the command being acknowledged
    pub fn service_code(&self) -> u16 {
        self.service_code
    }

    pub fn display_tag_id(&self) -> &DisplayTagId {
        &self.display_tag_id
    }

    /// Signal strength in dBm
    pub fn rssi(&self) -> i16 {
        self.rssi
    }

    pub fn tag_status(&self) -> TagStatus {
        self.tag_status
    }

    /// Battery voltage in tenths of a volt
    pub fn volt_tenths(&self) -> u8 {
        self.volt_tenths
    }

    /// Battery voltage in volts
    pub fn volts(&self) -> f32 {
        f32::from(self.volt_tenths) / 10.0
    }

    /// Temperature in degrees Celsius
    pub fn temperature(&self) -> u8 {
        self.temperature
    }

    fn raw_rssi(&self) -> u8 {
        // Range checked in `new`
        (self.rssi + RSSI_OFFSET) as u8
    }
}

impl fmt::Display for AcknowledgementPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dump = Dump::start(f, "Answer package")?;
        dump.part("Start", &MARKER.to_string(), "marker")?;
        dump.field(LENGTH, BODY_LEN as u32, format!("{} characters", BODY_LEN))?;
        dump.field(SERVICE_CODE, self.service_code, self.service_code)?;
        dump.part("DisplayTagId", self.display_tag_id.as_str(), "tag")?;
        dump.field(
            RSSI,
            self.raw_rssi(),
            format!("{}-{}={}", self.raw_rssi(), RSSI_OFFSET, self.rssi),
        )?;
        dump.field(TAG_STATUS, self.tag_status, self.tag_status.name())?;
        dump.field(VOLT, self.volt_tenths, format!("{:.1}V", self.volts()))?;
        dump.field(TEMPERATURE, self.temperature, format!("{}°C", self.temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag() -> DisplayTagId {
        DisplayTagId::new("061C95").unwrap()
    }

    #[test]
    fn test_ack_encode() {
        let ack = AcknowledgementPacket::new(20003, tag(), -81, TagStatus::Success, 31, 17).unwrap();
        assert_eq!(ack.encode().unwrap(), "@00124E23061C95AD541F11");

        let ack = AcknowledgementPacket::new(39377, tag(), -35, TagStatus::Success, 31, 25).unwrap();
        assert_eq!(ack.encode().unwrap(), "@001299D1061C95DB541F19");
    }

    #[test]
    fn test_ack_decode() {
        let ack = AcknowledgementPacket::decode("@00124E23061C95AD541F11").unwrap();
        assert_eq!(ack.service_code(), 20003);
        assert_eq!(ack.display_tag_id().as_str(), "061C95");
        assert_eq!(ack.rssi(), -81);
        assert_eq!(ack.tag_status(), TagStatus::Success);
        assert_eq!(ack.volt_tenths(), 31);
        assert!((ack.volts() - 3.1).abs() < f32::EPSILON);
        assert_eq!(ack.temperature(), 17);
    }

    #[test]
    fn test_ack_raw_round_trip() {
        for raw in [
            "@00124E23061C95AD541F11",
            "@001299D1061C95DB541F19",
            "@00120001ABCDEF00E6FF00",
            "@0012FFFF061C95FE7720FE",
        ] {
            assert_eq!(AcknowledgementPacket::decode(raw).unwrap().encode().unwrap(), raw);
        }
    }

    #[test]
    fn test_ack_failure_statuses() {
        let ack = AcknowledgementPacket::decode("@00124E23061C95AD4E1F11").unwrap();
        assert_eq!(ack.tag_status(), TagStatus::Failed);

        let ack = AcknowledgementPacket::decode("@00124E23061C95ADE31F11").unwrap();
        assert!(ack.tag_status().is_error());

        let ack = AcknowledgementPacket::decode("@00124E23061C95AD771F11").unwrap();
        assert_eq!(ack.tag_status(), TagStatus::Unknown(0x77));
    }

    #[test]
    fn test_ack_unknown_wrapping_known_status() {
        let ack = AcknowledgementPacket::new(20003, tag(), -81, TagStatus::Unknown(0x54), 31, 17).unwrap();
        assert_eq!(ack.tag_status(), TagStatus::Success);
        assert_eq!(AcknowledgementPacket::decode(&ack.encode().unwrap()).unwrap(), ack);
    }

    #[test]
    fn test_ack_wrong_length() {
        assert!(matches!(
            AcknowledgementPacket::decode("@00124E23061C95AD541F1"),
            Err(Error::LengthMismatch { declared: 23, actual: 22 })
        ));
        assert!(matches!(
            AcknowledgementPacket::decode("@00134E23061C95AD541F11"),
            Err(Error::LengthMismatch { declared: 19, .. })
        ));
    }

    #[test]
    fn test_ack_missing_marker() {
        assert!(matches!(
            AcknowledgementPacket::decode("#00124E23061C95AD541F11"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ack_out_of_range_readings() {
        assert!(AcknowledgementPacket::decode("@00124E23061C95FF541F11").is_err());
        assert!(AcknowledgementPacket::decode("@00124E23061C95AD541FFF").is_err());
        assert!(AcknowledgementPacket::new(1, tag(), 1, TagStatus::Success, 31, 17).is_err());
        assert!(AcknowledgementPacket::new(1, tag(), -255, TagStatus::Success, 31, 17).is_err());
    }

    #[test]
    fn test_ack_bad_tag_id() {
        assert!(matches!(
            AcknowledgementPacket::decode("@00124E23061CZZAD541F11"),
            Err(Error::Types(_))
        ));
    }

    #[test]
    fn test_ack_display() {
        let ack = AcknowledgementPacket::decode("@00124E23061C95AD541F11").unwrap();
        let dump = ack.to_string();
        assert!(dump.starts_with("Answer package\n"));
        assert!(dump.contains("AD (173-254=-81)"));
        assert!(dump.contains("54 (Success)"));
        assert!(dump.contains("1F (3.1V)"));
    }
}

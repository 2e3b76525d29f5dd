//! Protocol constants

/// Barcode decorations, as UTF-16 code units
pub mod barcode {
    /// Start Code B (UTF-16 HTS), also used by EAN-13
    pub const START_CODE: u16 = 0x0088;

    /// Stop code (UTF-16 VTS)
    pub const STOP_CODE: u16 = 0x008A;

    /// Extra guard between the EAN-13 check digit and the stop code
    pub const EAN13_GUARD: u16 = 0x003D;

    /// Digits supplied for an EAN-13 code, the 13th is computed
    pub const EAN13_DATA_DIGITS: usize = 12;

    /// Value of Start Code B in the Code 128 checksum
    pub const CODE128_START_B_VALUE: u32 = 104;

    /// Code 128 checksum modulus
    pub const CODE128_MODULUS: u32 = 103;
}

/// LED flash command
pub mod led {
    /// Fixed word sent between service code and flash count
    pub const RESERVED: u16 = 0x00ED;
}

/// Acknowledgement packets
pub mod ack {
    /// First character of every acknowledgement
    pub const MARKER: char = '@';

    /// Hex characters following the length field
    pub const BODY_LEN: usize = 18;

    /// Total acknowledgement length in characters
    pub const PACKET_LEN: usize = 23;

    /// Offset subtracted from the raw RSSI byte
    pub const RSSI_OFFSET: i16 = 254;
}

/// Run length encoding tiers
pub mod rle {
    /// Pixels packed into one pattern byte
    pub const PATTERN_PIXELS: usize = 7;

    /// Longest run stored in a single byte
    pub const SHORT_RUN_MAX: usize = 31;

    /// Longest run stored with a one byte length
    pub const MEDIUM_RUN_MAX: usize = 255;

    /// Longest run stored with a two byte length
    pub const LONG_RUN_MAX: usize = 65535;
}

/// Image planes
pub mod image {
    /// Set in both row fields of the spot-colour plane
    pub const SPOT_PLANE_FLAG: u16 = 0x8000;

    /// Largest row or column coordinate
    pub const MAX_COORDINATE: u16 = 0x7FFF;
}

//! Draw styles, font styles and tag status codes
//!
//! Each table is a closed enum plus an `Unknown` variant that keeps the raw
//! wire byte, so values the tables don't know still encode back unchanged.

use std::fmt;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value missing from the table, kept verbatim
            Unknown(u8),
        }

        impl $name {
            /// Human readable name, "Unknown" for values outside the table
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Unknown(_) => "Unknown",
                }
            }

            /// Check if the value is one of the documented ones
            pub fn is_known(self) -> bool {
                !matches!(self, Self::Unknown(_))
            }

            /// Map `Unknown` holding a table value to its named variant
            pub fn normalize(self) -> Self {
                Self::from(u8::from(self))
            }
        }

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                match value {
                    $( $value => Self::$variant, )+
                    other => Self::Unknown(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(style: $name) -> u8 {
                match style {
                    $( $name::$variant => $value, )+
                    $name::Unknown(value) => value,
                }
            }
        }

        impl From<$name> for u32 {
            fn from(style: $name) -> u32 {
                u32::from(u8::from(style))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{:02X})", self.name(), u8::from(*self))
            }
        }
    };
}

wire_enum! {
    /// How an entity is painted
    pub enum DrawStyle {
        Normal = 0x00 => "Normal",
        Red = 0x55 => "Red",
        /// Red with foreground and background swapped
        RedInverted = 0xAA => "Red and Inversed FG BG",
        Inverted = 0xFF => "Inverse FG BG",
    }
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self::Normal
    }
}

wire_enum! {
    /// Glyph size, barcode kind, line kind or image kind of an entity
    pub enum FontStyle {
        Px7 = 0x01 => "7px",
        Px12 = 0x02 => "12px",
        Px16 = 0x03 => "16px",
        Px24 = 0x04 => "24px",
        Px32 = 0x05 => "32px",
        Px48 = 0x06 => "48px",
        Px64 = 0x07 => "64px",

        // Stretched fonts
        Px24x12 = 0x20 => "24x12px",
        Px28x14 = 0x21 => "28x14px",
        Px32x16 = 0x22 => "32x16px",
        Px36x18 = 0x23 => "36x18px",
        Px40x20 = 0x24 => "40x20px",
        Px48x24 = 0x25 => "48x24px",
        Px56x28 = 0x26 => "56x28px",
        Px64x32 = 0x27 => "64x32px",
        Px24x9 = 0x28 => "24x9px",
        Px32x12 = 0x29 => "32x12px",
        Px40x15 = 0x2A => "40x15px",
        Px48x18 = 0x2B => "48x18px",
        Px56x21 = 0x2C => "56x21px",
        Px64x24 = 0x2D => "64x24px",
        Px80x30 = 0x2E => "80x30px",
        Px96x36 = 0x2F => "96x36px",
        Px112x42 = 0x30 => "112x42px",
        Px128x48 = 0x31 => "128x48px",
        Px144x48 = 0x32 => "144x48px",
        Px160x48 = 0x33 => "160x48px",
        Px192x48 = 0x34 => "192x48px",

        // Barcodes
        BarcodeEan8 = 0x40 => "Barcode EAN8",
        BarcodeEan13 = 0x41 => "Barcode EAN13",
        Barcode128 = 0x42 => "Barcode 128",
        BarcodeCode39 = 0x43 => "Barcode Code39",
        BarcodeEan8Double = 0x48 => "Barcode EAN8 Double Size",
        BarcodeEan13Double = 0x49 => "Barcode EAN13 Double Size",
        Barcode128Double = 0x4A => "Barcode 128 Double Size",
        BarcodeCode39Double = 0x4B => "Barcode Code39 Double Size",
        BarcodeEan8Ext = 0x50 => "Barcode EAN8 Ext",
        BarcodeEan13Ext = 0x51 => "Barcode EAN13 Ext",
        Barcode128Ext = 0x52 => "Barcode 128 Ext",
        BarcodeCode39Ext = 0x53 => "Barcode Code39 Ext",

        // Shapes
        HorizontalLine = 0x62 => "Horizontal Line",
        VerticalLine = 0x63 => "Vertical Line",
        Rectangle = 0x64 => "Rectangle",

        // Images
        ImageCompress = 0xFC => "ImageCompress",
        ImageX2 = 0xFD => "ImageX2",
        Image = 0xFE => "Image",
    }
}

impl FontStyle {
    /// Code 128 styles the tags render from a Set B payload
    pub fn is_code128(self) -> bool {
        matches!(self, Self::Barcode128 | Self::Barcode128Double)
    }

    /// EAN-13 styles the tags render from twelve digits plus check digit
    pub fn is_ean13(self) -> bool {
        matches!(self, Self::BarcodeEan13 | Self::BarcodeEan13Double)
    }

    pub fn is_line(self) -> bool {
        matches!(self, Self::HorizontalLine | Self::VerticalLine)
    }

    pub fn is_image(self) -> bool {
        matches!(self, Self::Image | Self::ImageX2 | Self::ImageCompress)
    }
}

wire_enum! {
    /// Outcome reported by a tag in its acknowledgement
    pub enum TagStatus {
        Failed = 0x4E => "Failed",
        Success = 0x54 => "Success",
        ErrE1 = 0xE1 => "ERRE1",
        ErrE2 = 0xE2 => "ERRE2",
        ErrE3 = 0xE3 => "ERRE3",
        ErrE4 = 0xE4 => "ERRE4",
        ErrE5 = 0xE5 => "ERRE5",
        ErrE6 = 0xE6 => "ERRE6",
    }
}

impl TagStatus {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Check if the tag reported one of the ERRE codes
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Self::ErrE1 | Self::ErrE2 | Self::ErrE3 | Self::ErrE4 | Self::ErrE5 | Self::ErrE6
        )
    }
}

//! Two-plane bitmap handed over by the image classifier

use std::fmt;

use crate::error::{Error, Result};

/// A raster split into boolean pixel planes
///
/// Both planes are row-major and hold exactly `width * height` pixels.
/// `true` means the pixel is inked: black in the black plane, spot colour
/// (red on most tags) in the spot plane. How RGB pixels are classified into
/// these planes is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u16,
    height: u16,
    black: Vec<bool>,
    spot: Option<Vec<bool>>,
}

impl Bitmap {
    /// Create a black-only bitmap
    pub fn new(width: u16, height: u16, black: Vec<bool>) -> Result<Self> {
        Self::check_plane("black", width, height, &black)?;
        Ok(Self {
            width,
            height,
            black,
            spot: None,
        })
    }

    /// Create a bitmap with both a black and a spot-colour plane
    pub fn with_spot(width: u16, height: u16, black: Vec<bool>, spot: Vec<bool>) -> Result<Self> {
        Self::check_plane("black", width, height, &black)?;
        Self::check_plane("spot", width, height, &spot)?;
        Ok(Self {
            width,
            height,
            black,
            spot: Some(spot),
        })
    }

    /// Blank (all white) black-only bitmap
    pub fn blank(width: u16, height: u16) -> Result<Self> {
        Self::new(width, height, vec![false; width as usize * height as usize])
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of pixels in each plane
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn black(&self) -> &[bool] {
        &self.black
    }

    pub fn spot(&self) -> Option<&[bool]> {
        self.spot.as_deref()
    }

    fn check_plane(name: &str, width: u16, height: u16, plane: &[bool]) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::Validation(format!(
                "bitmap must be at least 1x1, got {}x{}",
                width, height
            )));
        }

        let expected = width as usize * height as usize;
        if plane.len() != expected {
            return Err(Error::Validation(format!(
                "{} plane holds {} pixels, {}x{} needs {}",
                name,
                plane.len(),
                width,
                height,
                expected
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bitmap[{}x{}, {}]",
            self.width,
            self.height,
            if self.spot.is_some() { "black+spot" } else { "black" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bitmap_new() {
        let bitmap = Bitmap::new(3, 2, vec![true, false, false, false, false, true]).unwrap();
        assert_eq!(bitmap.pixel_count(), 6);
        assert_eq!(bitmap.black()[5], true);
        assert!(bitmap.spot().is_none());
    }

    #[test]
    fn test_bitmap_plane_size_mismatch() {
        let result = Bitmap::new(3, 2, vec![true; 5]);
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = Bitmap::with_spot(2, 2, vec![false; 4], vec![false; 3]);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_bitmap_zero_size() {
        assert!(Bitmap::blank(0, 10).is_err());
    }

    #[test]
    fn test_bitmap_display() {
        let bitmap = Bitmap::with_spot(2, 1, vec![false; 2], vec![true; 2]).unwrap();
        assert_eq!(bitmap.to_string(), "Bitmap[2x1, black+spot]");
    }
}

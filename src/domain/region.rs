// SPDX-License-Identifier: MPL-2.0
//! Crop rectangle value object.

use crate::error::{Error, Result};

/// Default crop rectangle, calibrated for a phone held in portrait about a
/// forearm's length from the instrument cluster.
pub mod default_region {
    pub const LEFT: u32 = 750;
    pub const TOP: u32 = 1000;
    pub const RIGHT: u32 = 1500;
    pub const BOTTOM: u32 = 2000;
}

/// A pixel rectangle given by its edges, right and bottom exclusive.
///
/// Always non-empty: `right > left` and `bottom > top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl CropRegion {
    /// Creates a region from its edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the rectangle would be empty.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Result<Self> {
        if right <= left || bottom <= top {
            return Err(Error::Config(format!(
                "crop region ({left}, {top}, {right}, {bottom}) is empty"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    #[must_use]
    pub fn left(&self) -> u32 {
        self.left
    }

    #[must_use]
    pub fn top(&self) -> u32 {
        self.top
    }

    #[must_use]
    pub fn right(&self) -> u32 {
        self.right
    }

    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.bottom
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Intersects the region with an image of the given size.
    ///
    /// Returns `(x, y, width, height)`, or `None` when the region lies
    /// entirely outside the image.
    #[must_use]
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Option<(u32, u32, u32, u32)> {
        if self.left >= image_width || self.top >= image_height {
            return None;
        }
        let right = self.right.min(image_width);
        let bottom = self.bottom.min(image_height);
        Some((self.left, self.top, right - self.left, bottom - self.top))
    }
}

impl Default for CropRegion {
    fn default() -> Self {
        Self {
            left: default_region::LEFT,
            top: default_region::TOP,
            right: default_region::RIGHT,
            bottom: default_region::BOTTOM,
        }
    }
}

const _: () = {
    assert!(default_region::RIGHT > default_region::LEFT);
    assert!(default_region::BOTTOM > default_region::TOP);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_matches_camera_framing() {
        let region = CropRegion::default();
        assert_eq!(
            (region.left(), region.top(), region.right(), region.bottom()),
            (750, 1000, 1500, 2000)
        );
        assert_eq!(region.width(), 750);
        assert_eq!(region.height(), 1000);
    }

    #[test]
    fn empty_region_is_rejected() {
        assert!(matches!(CropRegion::new(10, 10, 10, 20), Err(Error::Config(_))));
        assert!(matches!(CropRegion::new(10, 30, 20, 20), Err(Error::Config(_))));
    }

    #[test]
    fn clamp_within_bounds() {
        let region = CropRegion::new(2, 2, 6, 5).unwrap();
        assert_eq!(region.clamp_to(10, 8), Some((2, 2, 4, 3)));
    }

    #[test]
    fn clamp_trims_to_image_edges() {
        let region = CropRegion::new(8, 6, 18, 16).unwrap();
        assert_eq!(region.clamp_to(10, 8), Some((8, 6, 2, 2)));
    }

    #[test]
    fn clamp_outside_image_is_none() {
        let region = CropRegion::default();
        assert_eq!(region.clamp_to(640, 480), None);
    }
}

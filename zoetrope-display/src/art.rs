//! Art region rendering
//!
//! Catalog frames are 1-bit raw bitmaps, authored at the art region size
//! with the leftmost pixel in the most significant bit of each byte. Rows
//! are padded to whole bytes, so a frame is exactly [`FRAME_DATA_LEN`]
//! bytes and the type system holds every caller to that.

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::layout;

/// Bytes per frame row: 140 px at one bit per pixel, padded to a byte.
pub const FRAME_ROW_BYTES: usize = (layout::ART_WIDTH as usize + 7) / 8;

/// Total bytes in one raw frame asset.
pub const FRAME_DATA_LEN: usize = FRAME_ROW_BYTES * layout::ART_HEIGHT as usize;

/// Blit one catalog frame into the art region.
///
/// The region is cleared first so the previous frame cannot show through
/// the dark parts of the new one.
pub fn draw_frame<D>(target: &mut D, data: &[u8; FRAME_DATA_LEN]) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.fill_solid(&layout::art_region(), BinaryColor::Off)?;
    let raw = ImageRaw::<BinaryColor>::new(data, layout::ART_WIDTH);
    Image::new(&raw, Point::zero()).draw(target)
}

#[cfg(test)]
mod tests {
    use crate::layout::{art_region, sidebar_region};
    use crate::test_target::TestScreen;

    use super::*;

    #[test]
    fn test_row_geometry_matches_the_art_region() {
        assert_eq!(FRAME_ROW_BYTES, 18);
        assert_eq!(FRAME_DATA_LEN, 1224);
    }

    #[test]
    fn test_frame_pixels_map_msb_first() {
        let mut data = [0u8; FRAME_DATA_LEN];
        data[0] = 0b1010_0000;
        data[17] = 0b0001_0000; // pixel 139, last column of the region
        data[FRAME_DATA_LEN - FRAME_ROW_BYTES] = 0b1000_0000;

        let mut screen = TestScreen::new();
        draw_frame(&mut screen, &data).unwrap();

        assert!(screen.pixel(0, 0));
        assert!(!screen.pixel(1, 0));
        assert!(screen.pixel(2, 0));
        assert!(screen.pixel(139, 0));
        assert!(screen.pixel(0, 67));
    }

    #[test]
    fn test_draw_clears_the_previous_frame() {
        let mut screen = TestScreen::lit();
        draw_frame(&mut screen, &[0u8; FRAME_DATA_LEN]).unwrap();

        assert_eq!(screen.lit_in(&art_region()), 0);
        let sidebar = sidebar_region();
        assert_eq!(
            screen.lit_in(&sidebar),
            (sidebar.size.width * sidebar.size.height) as usize
        );
    }
}

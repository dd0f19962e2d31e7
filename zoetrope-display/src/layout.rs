//! Panel geometry
//!
//! All coordinates in this crate are absolute panel coordinates unless a
//! function documents otherwise. The art region and the sidebar never
//! overlap, so the two halves of the screen can be redrawn independently.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Panel width in pixels.
pub const SCREEN_WIDTH: u32 = 160;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 68;

/// Width of the art region. Catalog frames are authored at exactly this size.
pub const ART_WIDTH: u32 = 140;

/// Height of the art region. Frames span the full panel height.
pub const ART_HEIGHT: u32 = SCREEN_HEIGHT;

/// Width of the status sidebar on the right edge.
pub const SIDEBAR_WIDTH: u32 = SCREEN_WIDTH - ART_WIDTH;

/// The art region: everything left of the sidebar.
pub const fn art_region() -> Rectangle {
    Rectangle::new(Point::zero(), Size::new(ART_WIDTH, ART_HEIGHT))
}

/// The status sidebar: the right edge column.
pub const fn sidebar_region() -> Rectangle {
    Rectangle::new(
        Point::new(ART_WIDTH as i32, 0),
        Size::new(SIDEBAR_WIDTH, SCREEN_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_tile_the_panel_without_overlap() {
        let art = art_region();
        let bar = sidebar_region();

        assert_eq!(art.size.width + bar.size.width, SCREEN_WIDTH);
        assert_eq!(art.intersection(&bar).size, Size::zero());
        assert_eq!(
            art.bottom_right(),
            Some(Point::new(ART_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1))
        );
        assert_eq!(
            bar.bottom_right(),
            Some(Point::new(SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1))
        );
    }
}

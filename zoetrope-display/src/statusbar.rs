//! Status sidebar rendering
//!
//! The sidebar shows a battery gauge at the top and a link glyph below it.
//! [`draw_battery`] and [`draw_link`] draw in their own local coordinate
//! space so they can be tested pixel by pixel; [`draw_status`] places them
//! inside [`layout::sidebar_region`] and is what the firmware calls.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use zoetrope_core::status::{BatteryStatus, LinkState, StatusState};

use crate::layout;

/// Top-left of the battery glyph cell, panel coordinates.
const BATTERY_ORIGIN: Point = Point::new(140, 2);

/// Top-left of the link glyph cell, panel coordinates.
const LINK_ORIGIN: Point = Point::new(145, 28);

/// Battery fill area, local to the glyph cell. Sits inside the body outline
/// with a one pixel gap on every side.
const FILL_TOP_LEFT: Point = Point::new(3, 4);
const FILL_WIDTH: u32 = 12;
const FILL_HEIGHT: u32 = 6;

/// Lightning bolt overlay, offsets into the fill area. Drawn in the
/// background colour on top of a full gauge while charging.
const BOLT: &[(i32, i32)] = &[
    (6, 0),
    (5, 1),
    (4, 2),
    (5, 2),
    (6, 2),
    (5, 3),
    (4, 4),
    (3, 5),
];

/// Redraw the whole sidebar from `status`.
///
/// Clears the sidebar region first, so callers only need to flush the
/// panel afterwards.
pub fn draw_status<D>(target: &mut D, status: &StatusState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.fill_solid(&layout::sidebar_region(), BinaryColor::Off)?;
    draw_battery(&mut target.translated(BATTERY_ORIGIN), &status.battery)?;
    draw_link(&mut target.translated(LINK_ORIGIN), status.link)
}

/// Draw the battery gauge at the local origin of a 20x14 cell.
///
/// While discharging the fill bar tracks the charge percentage. While
/// charging the gauge is shown full with a bolt cut out of it, which reads
/// better at this size than a creeping fill.
pub fn draw_battery<D>(target: &mut D, battery: &BatteryStatus) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let outline = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let solid = PrimitiveStyle::with_fill(BinaryColor::On);

    // Body and terminal nub.
    Rectangle::new(Point::new(1, 2), Size::new(16, 10))
        .into_styled(outline)
        .draw(target)?;
    Rectangle::new(Point::new(17, 5), Size::new(2, 4))
        .into_styled(solid)
        .draw(target)?;

    let width = if battery.charging {
        FILL_WIDTH
    } else {
        fill_width(battery.percent)
    };
    Rectangle::new(FILL_TOP_LEFT, Size::new(width, FILL_HEIGHT))
        .into_styled(solid)
        .draw(target)?;

    if battery.charging {
        for &(dx, dy) in BOLT {
            Pixel(FILL_TOP_LEFT + Point::new(dx, dy), BinaryColor::Off).draw(target)?;
        }
    }
    Ok(())
}

/// Draw the link glyph at the local origin of a 9x9 cell: an antenna while
/// connected, a cross while not.
pub fn draw_link<D>(target: &mut D, link: LinkState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    match link {
        LinkState::Connected => {
            Line::new(Point::new(4, 2), Point::new(4, 8))
                .into_styled(stroke)
                .draw(target)?;
            Line::new(Point::new(0, 2), Point::new(4, 6))
                .into_styled(stroke)
                .draw(target)?;
            Line::new(Point::new(8, 2), Point::new(4, 6))
                .into_styled(stroke)
                .draw(target)
        }
        LinkState::Disconnected => {
            Line::new(Point::new(0, 0), Point::new(8, 8))
                .into_styled(stroke)
                .draw(target)?;
            Line::new(Point::new(8, 0), Point::new(0, 8))
                .into_styled(stroke)
                .draw(target)
        }
    }
}

/// Gauge pixels for a charge percentage, rounding down.
fn fill_width(percent: u8) -> u32 {
    u32::from(percent.min(100)) * FILL_WIDTH / 100
}

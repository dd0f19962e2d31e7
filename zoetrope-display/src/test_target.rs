//! Full-panel draw target for tests.
//!
//! `MockDisplay` is capped at 64x64, which is fine for single glyphs but
//! cannot hold the whole 160x68 panel. Composition tests use this plain
//! boolean grid instead.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub struct TestScreen {
    pixels: [[bool; SCREEN_WIDTH as usize]; SCREEN_HEIGHT as usize],
}

impl TestScreen {
    /// All pixels off.
    pub fn new() -> Self {
        Self {
            pixels: [[false; SCREEN_WIDTH as usize]; SCREEN_HEIGHT as usize],
        }
    }

    /// All pixels on. Useful for checking that a draw call clears what it
    /// should and leaves the rest alone.
    pub fn lit() -> Self {
        Self {
            pixels: [[true; SCREEN_WIDTH as usize]; SCREEN_HEIGHT as usize],
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.pixels[y as usize][x as usize]
    }

    /// Number of lit pixels inside a region.
    pub fn lit_in(&self, region: &embedded_graphics::primitives::Rectangle) -> usize {
        region
            .points()
            .filter(|p| self.pixel(p.x, p.y))
            .count()
    }
}

impl DrawTarget for TestScreen {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let inside = (0..SCREEN_WIDTH as i32).contains(&point.x)
                && (0..SCREEN_HEIGHT as i32).contains(&point.y);
            if inside {
                self.pixels[point.y as usize][point.x as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestScreen {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

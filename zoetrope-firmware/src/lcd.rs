//! Sharp memory LCD driver (LS011B7DH03, 160x68)
//!
//! Line-addressed SPI panel with an active-high chip select. The panel
//! keeps its own pixel memory, so the driver tracks dirty lines and only
//! sends what changed. Wire format quirks: line addresses go out LSB
//! first (the SPIM only shifts MSB first, so they are bit-reversed here)
//! and a set bit is reflective white.

use core::convert::Infallible;

use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::{self, Spim};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use zoetrope_display::layout;

const WIDTH: usize = layout::SCREEN_WIDTH as usize;
const HEIGHT: usize = layout::SCREEN_HEIGHT as usize;
const LINE_BYTES: usize = WIDTH / 8;

/// Mode bits, MSB-first wire order: M0 = write, M1 = VCOM, M2 = clear.
mod cmd {
    pub const WRITE: u8 = 0x80;
    pub const VCOM: u8 = 0x40;
    pub const CLEAR: u8 = 0x20;
}

/// Sharp memory LCD behind an nRF SPIM instance.
pub struct SharpLcd<'d> {
    spim: Spim<'d, SPI3>,
    cs: Output<'d>,
    frame: [[u8; LINE_BYTES]; HEIGHT],
    dirty: [bool; HEIGHT],
    vcom: bool,
}

impl<'d> SharpLcd<'d> {
    /// Take ownership of the bus. The panel is not touched until
    /// [`init`](Self::init).
    pub fn new(spim: Spim<'d, SPI3>, cs: Output<'d>) -> Self {
        Self {
            spim,
            cs,
            frame: [[0; LINE_BYTES]; HEIGHT],
            dirty: [true; HEIGHT],
            vcom: false,
        }
    }

    /// Clear the panel memory, then push the (all dark) framebuffer.
    pub async fn init(&mut self) -> Result<(), spim::Error> {
        self.cs.set_high();
        Timer::after_micros(6).await;
        let clear = cmd::CLEAR | self.vcom_bit();
        let result = self.spim.write(&[clear, 0x00]).await;
        Timer::after_micros(2).await;
        self.cs.set_low();
        Timer::after_micros(6).await;
        result?;

        self.dirty = [true; HEIGHT];
        self.flush().await
    }

    /// Send every dirty line to the panel.
    ///
    /// On failure the dirty flags are left set, so the next flush resends
    /// the same lines.
    pub async fn flush(&mut self) -> Result<(), spim::Error> {
        if !self.dirty.iter().any(|&line| line) {
            return Ok(());
        }

        self.cs.set_high();
        Timer::after_micros(6).await;
        let result = self.push_lines().await;
        Timer::after_micros(2).await;
        self.cs.set_low();
        Timer::after_micros(6).await;

        if result.is_ok() {
            self.dirty = [false; HEIGHT];
        }
        result
    }

    /// Toggle the VCOM phase without updating any lines.
    ///
    /// The panel wants this at least once a second to keep the liquid
    /// crystal DC-balanced.
    pub async fn maintain(&mut self) -> Result<(), spim::Error> {
        self.cs.set_high();
        Timer::after_micros(6).await;
        let vcom = self.vcom_bit();
        let result = self.spim.write(&[vcom, 0x00]).await;
        Timer::after_micros(2).await;
        self.cs.set_low();
        Timer::after_micros(6).await;
        result
    }

    async fn push_lines(&mut self) -> Result<(), spim::Error> {
        let mode = cmd::WRITE | self.vcom_bit();
        self.spim.write(&[mode]).await?;

        for row in 0..HEIGHT {
            if !self.dirty[row] {
                continue;
            }
            // Gate addresses are 1-based and sent LSB first.
            let mut line = [0u8; LINE_BYTES + 2];
            line[0] = (row as u8 + 1).reverse_bits();
            line[1..=LINE_BYTES].copy_from_slice(&self.frame[row]);
            self.spim.write(&line).await?;
        }

        // With the last line's trailer byte this makes the sixteen
        // closing clocks the panel wants.
        self.spim.write(&[0x00]).await
    }

    fn vcom_bit(&mut self) -> u8 {
        self.vcom = !self.vcom;
        if self.vcom {
            cmd::VCOM
        } else {
            0
        }
    }
}

impl DrawTarget for SharpLcd<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let inside = (0..WIDTH as i32).contains(&point.x)
                && (0..HEIGHT as i32).contains(&point.y);
            if !inside {
                continue;
            }

            let (x, y) = (point.x as usize, point.y as usize);
            let mask: u8 = 0x80 >> (x % 8);
            let byte = &mut self.frame[y][x / 8];
            let before = *byte;
            if color.is_on() {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
            if *byte != before {
                self.dirty[y] = true;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for SharpLcd<'_> {
    fn size(&self) -> Size {
        Size::new(layout::SCREEN_WIDTH, layout::SCREEN_HEIGHT)
    }
}

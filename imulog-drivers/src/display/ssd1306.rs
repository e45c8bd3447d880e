//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. Text is rendered
//! into a local frame buffer with embedded-graphics and pushed page by page
//! on `flush`.

use embedded_graphics::mono_font::ascii::FONT_6X9;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use imulog_core::traits::{DisplayError, TextDisplay};
use imulog_hal::I2cBus;

use super::framebuffer::{FrameBuffer, HEIGHT, PAGES, WIDTH};

/// SSD1306 I2C address (typically 0x3C or 0x3D)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Vertical advance per text line
const LINE_HEIGHT: i32 = 9;

/// Columns per line when wrapping; matches the 15-character menu items
pub const DEFAULT_COLUMNS: usize = 15;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte: following bytes are commands
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: following bytes are GDDRAM data
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    columns: usize,
    buffer: FrameBuffer,
    initialized: bool,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2cBus,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_ADDRESS,
            columns: DEFAULT_COLUMNS,
            buffer: FrameBuffer::new(),
            initialized: false,
        }
    }

    /// Wrap text after `columns` characters instead of the default
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Initialize the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            (HEIGHT - 1) as u8,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,
            cmd::SET_MEMORY_MODE,
            0x00, // Horizontal addressing
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }
        self.initialized = true;
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .map_err(|_| DisplayError::Communication)
    }

    /// Frame buffer contents, for inspection
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }
}

impl<I2C> TextDisplay for Ssd1306<I2C>
where
    I2C: I2cBus,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer.clear();
        Ok(())
    }

    fn draw_text(&mut self, x: u8, y: u8, text: &str) -> Result<(), DisplayError> {
        if x as usize >= WIDTH || y as usize >= HEIGHT {
            return Err(DisplayError::InvalidCoordinates);
        }
        let style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);
        let mut top = y as i32;
        let mut rest = text;

        while !rest.is_empty() && top < HEIGHT as i32 {
            let split = rest
                .char_indices()
                .nth(self.columns)
                .map_or(rest.len(), |(i, _)| i);
            let (line, tail) = rest.split_at(split);
            let origin = Point::new(x as i32, top);
            // Drawing into RAM cannot fail
            let _ = Text::with_baseline(line, origin, style, Baseline::Top).draw(&mut self.buffer);
            rest = tail;
            top += LINE_HEIGHT;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        for c in [
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ] {
            self.command(c)?;
        }

        for page in 0..PAGES {
            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(self.buffer.page(page));
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }
}

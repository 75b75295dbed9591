//! ILI9341 TFT display driver
//!
//! Driver for the 240x320 ILI9341 controller over 4-wire SPI (separate
//! data/command line). Every transport call is its own chip-select scope:
//!
//! ```text
//! settle ─ CS low ─ settle ─ [D/C low, cmd, D/C high] or [data] ─ settle ─ CS high ─ settle
//! ```
//!
//! The panel is configured for 16-bit RGB565 in portrait orientation
//! with BGR subpixel order, matching the canvas palette.

use boxel_core::traits::DisplayTransport;
use boxel_hal::{DelayNs, OutputPin, SpiBus};

#[cfg(feature = "defmt")]
use defmt::info;

/// ILI9341 command set (subset used by this driver)
pub mod cmd {
    pub use boxel_core::traits::transport::cmd::{CASET, PASET, RAMWR};

    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Read display identification
    pub const RDDID: u8 = 0x04;
    /// Sleep out
    pub const SLPOUT: u8 = 0x11;
    /// Display inversion off
    pub const INVOFF: u8 = 0x20;
    /// Display inversion on
    pub const INVON: u8 = 0x21;
    /// Gamma curve select
    pub const GAMMASET: u8 = 0x26;
    /// Display off
    pub const DISPOFF: u8 = 0x28;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Memory access control (orientation, colour order)
    pub const MADCTL: u8 = 0x36;
    /// Pixel format
    pub const PIXFMT: u8 = 0x3A;
    /// Frame rate control (normal mode)
    pub const FRMCTR1: u8 = 0xB1;
    /// Positive gamma correction
    pub const GMCTRP1: u8 = 0xE0;
    /// Negative gamma correction
    pub const GMCTRN1: u8 = 0xE1;
}

/// Settling time around chip-select edges
const CS_SETTLE_NS: u32 = 25;

/// Reset pulse width and recovery (ms)
const RESET_PULSE_MS: u32 = 10;

/// Wait after software reset before the next command (ms)
const SWRESET_DELAY_MS: u32 = 100;

/// Column address order mirrored, BGR colour filter
const MADCTL_PORTRAIT_BGR: u8 = 0x48;

/// 16 bits per pixel on both interfaces
const PIXFMT_RGB565: u8 = 0x55;

/// Power-up configuration after software reset
const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (cmd::GAMMASET, &[0x01]),
    (
        cmd::GMCTRP1,
        &[
            0x0f, 0x31, 0x2b, 0x0c, 0x0e, 0x08, 0x4e, 0xf1, 0x37, 0x07, 0x10, 0x03, 0x0e, 0x09,
            0x00,
        ],
    ),
    (
        cmd::GMCTRN1,
        &[
            0x00, 0x0e, 0x14, 0x03, 0x11, 0x07, 0x31, 0xc1, 0x48, 0x08, 0x0f, 0x0c, 0x31, 0x36,
            0x0f,
        ],
    ),
    (cmd::MADCTL, &[MADCTL_PORTRAIT_BGR]),
    (cmd::PIXFMT, &[PIXFMT_RGB565]),
    (cmd::FRMCTR1, &[0x00, 0x1B]), // fosc, 70 Hz
    (cmd::SLPOUT, &[]),
    (cmd::DISPON, &[]),
];

/// ILI9341 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ili9341Error<E> {
    /// SPI transfer failed
    Spi(E),
}

/// ILI9341 display on an SPI bus
pub struct Ili9341<SPI, CS, DC, D> {
    spi: SPI,
    /// Chip select, active low
    cs: CS,
    /// Data/command select, low = command
    dc: DC,
    delay: D,
}

impl<SPI, CS, DC, D> Ili9341<SPI, CS, DC, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    /// Create a driver with the bus idle (CS high, D/C data)
    pub fn new(spi: SPI, cs: CS, dc: DC, delay: D) -> Self {
        let mut display = Self { spi, cs, dc, delay };
        display.cs.set_high();
        display.dc.set_high();
        display
    }

    /// Hardware reset, software reset and power-up configuration
    pub fn init<RST: OutputPin>(
        &mut self,
        reset: &mut RST,
    ) -> Result<(), Ili9341Error<SPI::Error>> {
        reset.set_high();
        self.delay.delay_ms(RESET_PULSE_MS);
        reset.set_low();
        self.delay.delay_ms(RESET_PULSE_MS);
        reset.set_high();

        self.write_command(cmd::SWRESET)?;
        self.delay.delay_ms(SWRESET_DELAY_MS);

        for &(command, params) in INIT_SEQUENCE {
            self.write_command(command)?;
            if !params.is_empty() {
                self.write_block(params)?;
            }
        }

        #[cfg(feature = "defmt")]
        info!("ILI9341 initialised");

        Ok(())
    }

    /// Turn the panel output on or off (frame memory is kept)
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Ili9341Error<SPI::Error>> {
        self.write_command(if on { cmd::DISPON } else { cmd::DISPOFF })
    }

    /// Invert all displayed colours
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Ili9341Error<SPI::Error>> {
        self.write_command(if inverted { cmd::INVON } else { cmd::INVOFF })
    }

    /// Read the three identification bytes (manufacturer, version, module)
    ///
    /// The controller clocks out one dummy byte first, which is dropped.
    pub fn read_id(&mut self) -> Result<[u8; 3], Ili9341Error<SPI::Error>> {
        let mut buf = [0u8; 4];

        self.select();
        self.dc.set_low();
        let result = self.spi.write(&[cmd::RDDID]);
        self.dc.set_high();
        let result = result.and_then(|()| self.spi.read(&mut buf));
        self.deselect();

        result.map_err(Ili9341Error::Spi)?;
        Ok([buf[1], buf[2], buf[3]])
    }

    /// Give back the bus, pins and delay
    pub fn release(self) -> (SPI, CS, DC, D) {
        (self.spi, self.cs, self.dc, self.delay)
    }

    fn select(&mut self) {
        self.delay.delay_ns(CS_SETTLE_NS);
        self.cs.set_low();
        self.delay.delay_ns(CS_SETTLE_NS);
    }

    fn deselect(&mut self) {
        self.delay.delay_ns(CS_SETTLE_NS);
        self.cs.set_high();
        self.delay.delay_ns(CS_SETTLE_NS);
    }

    /// Write `data` with D/C high inside one chip-select scope
    fn write_data(&mut self, data: &[u8]) -> Result<(), Ili9341Error<SPI::Error>> {
        self.select();
        let result = self.spi.write(data).and_then(|()| self.spi.flush());
        self.deselect();
        result.map_err(Ili9341Error::Spi)
    }
}

impl<SPI, CS, DC, D> DisplayTransport for Ili9341<SPI, CS, DC, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    type Error = Ili9341Error<SPI::Error>;

    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.select();
        self.dc.set_low();
        let result = self.spi.write(&[cmd]).and_then(|()| self.spi.flush());
        self.dc.set_high();
        self.deselect();
        result.map_err(Ili9341Error::Spi)
    }

    fn write_param(&mut self, param: u8) -> Result<(), Self::Error> {
        self.write_data(&[param])
    }

    fn write_block(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.write_data(data)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.select();
        let result = self.spi.read(buf);
        self.deselect();
        result.map_err(Ili9341Error::Spi)
    }
}

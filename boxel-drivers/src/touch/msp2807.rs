//! MSP2807 resistive touch controller
//!
//! XPT2046-compatible controller on the MSP2807 module. Each axis is one
//! control byte followed by a one-byte conversion read, all inside a single
//! chip-select scope. Only the high 8 bits of each conversion are used.
//!
//! The press-detect (PENIRQ) line is open-drain and pulled up, so it reads
//! low while the panel is touched.

use boxel_core::traits::{RawPoint, TouchInput};
use boxel_hal::{DelayNs, InputPin, OutputPin, SpiBus};

/// Controller command bytes (start bit, channel select, 8-bit mode)
pub mod cmd {
    /// Convert X position
    pub const READ_X: u8 = 0xD8;
    /// Convert Y position
    pub const READ_Y: u8 = 0x98;
    /// Convert Z1 (pressure)
    pub const READ_Z1: u8 = 0xB0;
    /// Convert Z2 (pressure)
    pub const READ_Z2: u8 = 0xC0;
}

/// Settling time around chip-select edges
const CS_SETTLE_NS: u32 = 25;

/// MSP2807 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Msp2807Error<E> {
    /// SPI transfer failed
    Spi(E),
}

/// Touch controller on its own SPI bus
pub struct Msp2807<SPI, CS, IRQ, D> {
    spi: SPI,
    /// Chip select, active low
    cs: CS,
    /// Press detect, active low
    irq: IRQ,
    delay: D,
}

impl<SPI, CS, IRQ, D> Msp2807<SPI, CS, IRQ, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
    D: DelayNs,
{
    /// Create a driver with chip select released
    pub fn new(spi: SPI, cs: CS, irq: IRQ, delay: D) -> Self {
        let mut touch = Self { spi, cs, irq, delay };
        touch.cs.set_high();
        touch
    }

    /// Read the two pressure channels (Z1, Z2)
    pub fn read_pressure(&mut self) -> Result<(u8, u8), Msp2807Error<SPI::Error>> {
        let [z1, z2] = self.convert([cmd::READ_Z1, cmd::READ_Z2])?;
        Ok((z1, z2))
    }

    /// Give back the bus, pins and delay
    pub fn release(self) -> (SPI, CS, IRQ, D) {
        (self.spi, self.cs, self.irq, self.delay)
    }

    /// Run one conversion per command under a single chip-select scope
    fn convert<const N: usize>(
        &mut self,
        commands: [u8; N],
    ) -> Result<[u8; N], Msp2807Error<SPI::Error>> {
        let mut results = [0u8; N];

        self.delay.delay_ns(CS_SETTLE_NS);
        self.cs.set_low();
        self.delay.delay_ns(CS_SETTLE_NS);

        let mut result = Ok(());
        for (command, out) in commands.iter().zip(results.iter_mut()) {
            result = self
                .spi
                .write(&[*command])
                .and_then(|()| self.spi.read(core::slice::from_mut(out)));
            if result.is_err() {
                break;
            }
        }

        self.delay.delay_ns(CS_SETTLE_NS);
        self.cs.set_high();
        self.delay.delay_ns(CS_SETTLE_NS);

        result.map_err(Msp2807Error::Spi)?;
        Ok(results)
    }
}

impl<SPI, CS, IRQ, D> TouchInput for Msp2807<SPI, CS, IRQ, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
    D: DelayNs,
{
    type Error = Msp2807Error<SPI::Error>;

    fn is_pressed(&mut self) -> bool {
        self.irq.is_low()
    }

    fn read_raw(&mut self) -> Result<RawPoint, Self::Error> {
        let [x, y] = self.convert([cmd::READ_X, cmd::READ_Y])?;
        Ok(RawPoint::new(u16::from(x), u16::from(y)))
    }
}

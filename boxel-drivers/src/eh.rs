//! `embedded-hal` 1.0 adapters
//!
//! Wrap any `embedded-hal` peripheral so it can be handed to the drivers
//! in this crate. GPIO wrappers require an infallible pin, which covers
//! the on-chip GPIO of every common MCU HAL.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs as EhDelayNs;
use embedded_hal::digital::{InputPin as EhInputPin, OutputPin as EhOutputPin};
use embedded_hal::spi::SpiBus as EhSpiBus;

/// SPI bus adapter
#[derive(Debug)]
pub struct Spi<S>(pub S);

impl<S: EhSpiBus<u8>> boxel_hal::SpiBus for Spi<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}

/// Output pin adapter
#[derive(Debug)]
pub struct Output<P>(pub P);

impl<P: EhOutputPin<Error = Infallible>> boxel_hal::OutputPin for Output<P> {
    fn set_high(&mut self) {
        self.0.set_high().unwrap_or_else(|never| match never {});
    }

    fn set_low(&mut self) {
        self.0.set_low().unwrap_or_else(|never| match never {});
    }
}

/// Input pin adapter
#[derive(Debug)]
pub struct Input<P>(pub P);

impl<P: EhInputPin<Error = Infallible>> boxel_hal::InputPin for Input<P> {
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or_else(|never| match never {})
    }
}

/// Delay adapter
#[derive(Debug)]
pub struct Delay<D>(pub D);

impl<D: EhDelayNs> boxel_hal::DelayNs for Delay<D> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

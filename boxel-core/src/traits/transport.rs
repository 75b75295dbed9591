//! Display transport trait
//!
//! A byte-oriented, blocking channel to the display controller with a
//! command/data distinction. Every call is expected to acquire and release
//! chip select itself, so no call can leave the bus selected.

/// Window addressing commands shared by MIPI-DCS style controllers
pub mod cmd {
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Page (row) address set
    pub const PASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
}

/// Blocking display transport
///
/// Implementations must scope chip select to each call: assert before the
/// transfer, deassert after it, with whatever settling time the bus needs.
pub trait DisplayTransport {
    /// Error type for transport operations
    type Error;

    /// Send a command byte (D/C low)
    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    /// Send a single parameter byte following a command (D/C high)
    fn write_param(&mut self, param: u8) -> Result<(), Self::Error>;

    /// Stream a block of data bytes (D/C high)
    fn write_block(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes from the controller
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Open a rectangular write window, both bounds inclusive
    ///
    /// After this call the controller expects exactly
    /// `(x1 - x0 + 1) * (y1 - y0 + 1)` big-endian RGB565 pixels, row-major.
    fn set_window(&mut self, x0: u16, x1: u16, y0: u16, y1: u16) -> Result<(), Self::Error> {
        self.write_command(cmd::CASET)?;
        for byte in x0.to_be_bytes().into_iter().chain(x1.to_be_bytes()) {
            self.write_param(byte)?;
        }

        self.write_command(cmd::PASET)?;
        for byte in y0.to_be_bytes().into_iter().chain(y1.to_be_bytes()) {
            self.write_param(byte)?;
        }

        self.write_command(cmd::RAMWR)
    }
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    type Error = T::Error;

    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        T::write_command(self, cmd)
    }

    fn write_param(&mut self, param: u8) -> Result<(), Self::Error> {
        T::write_param(self, param)
    }

    fn write_block(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_block(self, data)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read_bytes(self, buf)
    }

    fn set_window(&mut self, x0: u16, x1: u16, y0: u16, y1: u16) -> Result<(), Self::Error> {
        T::set_window(self, x0, x1, y0, y1)
    }
}

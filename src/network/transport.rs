//! Transport abstraction
//!
//! The byte-level seam between the command facade and the socket.

use crate::error::Result;

/// Blocking, exclusive byte stream to a device
///
/// Implementations must never return a short read: `read_exactly(n)` yields
/// exactly `n` bytes or an error.
pub trait Transport {
    /// Write the whole buffer
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Block until exactly `n` bytes have been read
    fn read_exactly(&mut self, n: usize) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read_exactly(&mut self, n: usize) -> Result<Vec<u8>> {
        (**self).read_exactly(n)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read_exactly(&mut self, n: usize) -> Result<Vec<u8>> {
        (**self).read_exactly(n)
    }
}

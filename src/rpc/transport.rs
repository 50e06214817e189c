//! Transport abstraction — any blocking byte-oriented channel to the
//! transceiver controller.
//!
//! Concrete implementations:
//! - TCP socket to the controller ([`TcpTransport`](crate::adapters::tcp::TcpTransport))
//! - In-process simulated controller ([`SimTransceiver`](crate::adapters::sim::SimTransceiver))
//!
//! The RPC client is generic over `Transport`, so adding a new
//! transport requires zero changes to the call logic.

use core::fmt;

/// Blocking byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`, blocking until at least one
    /// byte arrives. Returns 0 when the peer closed the link.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Transport used when no controller is attached.
/// Every write fails, every read reports a closed link.
pub struct NullTransport;

/// Error returned by [`NullTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotConnected;

impl Transport for NullTransport {
    type Error = NotConnected;

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, NotConnected> {
        Ok(0)
    }

    fn write(&mut self, _data: &[u8]) -> Result<usize, NotConnected> {
        Err(NotConnected)
    }

    fn flush(&mut self) -> Result<(), NotConnected> {
        Err(NotConnected)
    }
}

impl<X: Transport + ?Sized> Transport for Box<X> {
    type Error = X::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        (**self).write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

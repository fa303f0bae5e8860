//!# Register access channel
//! The controller never talks to hardware directly. Every register access is a positioned
//! read or write of a few bytes through a [RegisterChannel], typically an XDMA character
//! device or a `/dev/mem` style handle opened by the caller.
//!
//! With the `std` feature, [SeekChannel] and [SplitChannel] adapt any [std::io::Seek] handle.
//!
//! ```
//!# use axi_can::channel::{RegisterChannel, SeekChannel};
//!# use std::io::Cursor;
//! let mut channel = SeekChannel::new(Cursor::new(vec![0u8; 0x100]));
//!
//! channel.write(0x08, &[0x1F]).unwrap();
//!
//! let mut prescaler = [0u8; 1];
//! channel.read(0x08, &mut prescaler).unwrap();
//! assert_eq!([0x1F], prescaler);
//! ```
use core::fmt::Debug;

/// Positioned byte access to the register space of one or more controllers
pub trait RegisterChannel {
    type Error: Debug;

    /// Fills `buffer` with the bytes starting at absolute `address`
    fn read(&mut self, address: u64, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes all of `data` starting at absolute `address`
    fn write(&mut self, address: u64, data: &[u8]) -> Result<(), Self::Error>;
}

impl<C: RegisterChannel + ?Sized> RegisterChannel for &mut C {
    type Error = C::Error;

    fn read(&mut self, address: u64, buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buffer)
    }

    fn write(&mut self, address: u64, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }
}

/// Register access failed on the underlying channel
#[derive(Debug, PartialEq)]
pub enum AccessError<E> {
    ChannelError(E),
}

#[cfg(feature = "std")]
pub use self::seek::{ChannelError, SeekChannel, SplitChannel};

#[cfg(feature = "std")]
mod seek {
    use super::RegisterChannel;
    use log::debug;
    use std::io::{Read, Seek, SeekFrom, Write};

    /// Errors of the seek based channels
    #[derive(Debug)]
    pub enum ChannelError {
        /// Seek, read or write call failed
        Io(std::io::Error),
        /// Handle ended up at a different position than requested
        Position { requested: u64, actual: u64 },
        /// Fewer bytes transferred than requested
        ShortTransfer { expected: usize, actual: usize },
    }

    impl From<std::io::Error> for ChannelError {
        fn from(error: std::io::Error) -> Self {
            ChannelError::Io(error)
        }
    }

    /// Channel using one handle for both directions
    #[derive(Debug)]
    pub struct SeekChannel<T> {
        handle: T,
    }

    impl<T> SeekChannel<T> {
        pub fn new(handle: T) -> Self {
            Self { handle }
        }

        /// Returns the wrapped handle
        pub fn into_inner(self) -> T {
            self.handle
        }
    }

    impl<T: Read + Write + Seek> RegisterChannel for SeekChannel<T> {
        type Error = ChannelError;

        fn read(&mut self, address: u64, buffer: &mut [u8]) -> Result<(), ChannelError> {
            read_at(&mut self.handle, address, buffer)
        }

        fn write(&mut self, address: u64, data: &[u8]) -> Result<(), ChannelError> {
            write_at(&mut self.handle, address, data)
        }
    }

    /// Channel with separate read and write handles, e.g. the XDMA `c2h` and `h2c` devices
    #[derive(Debug)]
    pub struct SplitChannel<R, W> {
        reader: R,
        writer: W,
    }

    impl<R, W> SplitChannel<R, W> {
        pub fn new(reader: R, writer: W) -> Self {
            Self { reader, writer }
        }

        /// Returns the wrapped read and write handles
        pub fn into_inner(self) -> (R, W) {
            (self.reader, self.writer)
        }
    }

    impl<R: Read + Seek, W: Write + Seek> RegisterChannel for SplitChannel<R, W> {
        type Error = ChannelError;

        fn read(&mut self, address: u64, buffer: &mut [u8]) -> Result<(), ChannelError> {
            read_at(&mut self.reader, address, buffer)
        }

        fn write(&mut self, address: u64, data: &[u8]) -> Result<(), ChannelError> {
            write_at(&mut self.writer, address, data)
        }
    }

    fn position<S: Seek>(handle: &mut S, address: u64) -> Result<(), ChannelError> {
        let actual = handle.seek(SeekFrom::Start(address))?;

        if actual != address {
            debug!("Seek to {address:#x} landed at {actual:#x}");
            return Err(ChannelError::Position {
                requested: address,
                actual,
            });
        }

        Ok(())
    }

    fn read_at<H: Read + Seek>(handle: &mut H, address: u64, buffer: &mut [u8]) -> Result<(), ChannelError> {
        position(handle, address)?;

        let actual = handle.read(buffer)?;
        if actual != buffer.len() {
            debug!("Short read at {address:#x}: {actual} of {} bytes", buffer.len());
            return Err(ChannelError::ShortTransfer {
                expected: buffer.len(),
                actual,
            });
        }

        Ok(())
    }

    fn write_at<H: Write + Seek>(handle: &mut H, address: u64, data: &[u8]) -> Result<(), ChannelError> {
        position(handle, address)?;

        let actual = handle.write(data)?;
        if actual != data.len() {
            debug!("Short write at {address:#x}: {actual} of {} bytes", data.len());
            return Err(ChannelError::ShortTransfer {
                expected: data.len(),
                actual,
            });
        }

        Ok(())
    }
}

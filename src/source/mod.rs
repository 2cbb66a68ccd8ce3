//! Random-access byte sources.
//!
//! A [`SeekableSource`] is anything that can report its total length, jump to an absolute
//! offset and hand out bytes from there. The trait deliberately mirrors the shape of a
//! low-level positioned read: `read` may return fewer bytes than requested and `Ok(0)`
//! for a non-empty buffer means the end of data was reached.
//!
//! The crate ships with the following sources:
//!
//! - [`FileSource`] for local files,
//! - [`MemorySource`] for data that is already resident in memory,
//! - [`ReadSeekSource`] for any [`std::io::Read`] + [`std::io::Seek`] stream,
//! - `HttpSource` for remote resources served with HTTP range requests (requires the
//!   `http` feature).
//!
//! None of them buffer. Wrap them in a [`BufferedReader`](crate::BufferedReader) to serve
//! small scattered reads from a cached window.

use std::io;

mod file;
#[cfg(feature = "http")]
mod http;
mod memory;
mod read_seek;

pub use self::file::FileSource;
#[cfg(feature = "http")]
pub use self::http::HttpSource;
pub use self::memory::MemorySource;
pub use self::read_seek::ReadSeekSource;

/// A byte source supporting absolute seeks and partial reads.
pub trait SeekableSource {
    /// Total number of bytes in the source.
    ///
    /// Implementations may re-derive this on every call (for example from file metadata).
    fn length(&self) -> io::Result<u64>;

    /// Offset the next `read` will start at.
    fn position(&self) -> io::Result<u64>;

    /// Moves the cursor to an absolute offset. Seeking past the end is allowed, a following
    /// `read` reports end of data.
    fn seek(&mut self, pos: u64) -> io::Result<()>;

    /// Reads up to `buf.len()` bytes at the cursor and advances it by the amount read.
    ///
    /// Returns `Ok(0)` for a non-empty `buf` once the end of data is reached.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Reads a single byte, `None` at the end of data.
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Whether the cursor is at or past the end of data.
    fn eof(&mut self) -> io::Result<bool> {
        Ok(self.position()? >= self.length()?)
    }

    /// Releases whatever the source holds. Dropping a source has the same effect, this only
    /// exists so that errors on close can be observed.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Identifying string of the source (a path, URL or label), for diagnostics.
    fn source(&self) -> &str;
}

impl<S: SeekableSource + ?Sized> SeekableSource for Box<S> {
    #[inline]
    fn length(&self) -> io::Result<u64> {
        (**self).length()
    }

    #[inline]
    fn position(&self) -> io::Result<u64> {
        (**self).position()
    }

    #[inline]
    fn seek(&mut self, pos: u64) -> io::Result<()> {
        (**self).seek(pos)
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    #[inline]
    fn eof(&mut self) -> io::Result<bool> {
        (**self).eof()
    }

    #[inline]
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    #[inline]
    fn source(&self) -> &str {
        (**self).source()
    }
}

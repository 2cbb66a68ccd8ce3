use std::io::{self, Read, Seek, SeekFrom};

use super::SeekableSource;

/// Adapts any `Read + Seek` stream into a [`SeekableSource`].
///
/// The length is probed once on construction by seeking to the end. The stream's own
/// position is restored afterwards and becomes the initial position of the source.
pub struct ReadSeekSource<T: Read + Seek> {
    inner: T,
    byte_len: u64,
    position: u64,
    name: String,
}

impl<T: Read + Seek> ReadSeekSource<T> {
    /// Instantiates a new `ReadSeekSource<T>` by taking ownership and wrapping the provided
    /// `Read + Seek`er.
    pub fn new(mut inner: T, name: impl Into<String>) -> io::Result<Self> {
        let position = inner.stream_position()?;
        let byte_len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;
        Ok(ReadSeekSource {
            inner,
            byte_len,
            position,
            name: name.into(),
        })
    }

    /// Wraps a stream whose length is already known, skipping the probe.
    pub fn with_byte_len(
        mut inner: T,
        byte_len: u64,
        name: impl Into<String>,
    ) -> io::Result<Self> {
        let position = inner.stream_position()?;
        Ok(ReadSeekSource {
            inner,
            byte_len,
            position,
            name: name.into(),
        })
    }

    /// Gets a reference to the wrapped stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Unwraps this `ReadSeekSource<T>`, returning the underlying stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Seek> SeekableSource for ReadSeekSource<T> {
    #[inline]
    fn length(&self) -> io::Result<u64> {
        Ok(self.byte_len)
    }

    #[inline]
    fn position(&self) -> io::Result<u64> {
        Ok(self.position)
    }

    fn seek(&mut self, pos: u64) -> io::Result<()> {
        self.position = self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    #[inline]
    fn source(&self) -> &str {
        &self.name
    }
}

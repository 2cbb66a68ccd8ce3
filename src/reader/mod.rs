//! Windowed buffering in front of a [`SeekableSource`].
//!
//! A [`BufferedReader`] owns one fixed-capacity buffer holding a contiguous window of the
//! source. Reads that fall completely inside the window are served from memory, any other
//! read refills the window starting at the current position. Seeking only moves the cursor,
//! staleness of the window is detected lazily on the next read.
//!
//! # Example
//!
//! ```
//! use seekbuf::{BufferedReader, MemorySource};
//!
//! # fn main() -> seekbuf::Result<()> {
//! let data: Vec<u8> = (0..=255).collect();
//! let mut reader = BufferedReader::builder(MemorySource::new(data))
//!     .with_capacity(64)
//!     .build()?;
//!
//! reader.seek(200);
//! assert_eq!(reader.read_byte()?, 200);
//!
//! let mut buf = [0u8; 16];
//! assert_eq!(reader.read(&mut buf)?, Some(16));
//! assert_eq!(buf[0], 201);
//!
//! reader.seek(256);
//! assert_eq!(reader.read(&mut buf)?, None);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io;
use std::num::NonZeroUsize;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::source::SeekableSource;

mod builder;
mod io_impl;

pub use self::builder::{ReaderBuilder, Settings};

/// Buffer capacity used by [`BufferedReader::new`], in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 512_000;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_BUFFER_SIZE) {
    Some(capacity) => capacity,
    None => panic!("default buffer size must not be zero"),
};

/// What happens to the cached window on a cache miss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RefillPolicy {
    /// Throw the old window away and fetch the new one in full.
    #[default]
    Discard,
    /// Keep the part of the old window that overlaps the new one and only fetch the gaps.
    ///
    /// Produces exactly the same bytes as [`RefillPolicy::Discard`] but requests less data
    /// from the source when consecutive windows overlap.
    Slide,
}

/// Serves reads of a [`SeekableSource`] from a cached window.
///
/// The reader is not internally synchronized: every operation that moves the cursor or
/// touches the window takes `&mut self`. Share it between threads behind a `Mutex`.
pub struct BufferedReader<S> {
    source: S,
    buffer: Box<[u8]>,
    /// Source offset of `buffer[0]`, `None` until the first fill.
    window_start: Option<u64>,
    /// Number of valid bytes at the start of `buffer`.
    window_len: usize,
    position: u64,
    /// Source length, captured once on construction.
    length: u64,
    mark: Option<u64>,
    policy: RefillPolicy,
}

impl<S: SeekableSource> BufferedReader<S> {
    /// Wraps `source` with a buffer of [`DEFAULT_BUFFER_SIZE`] bytes.
    ///
    /// Fails if the source cannot report its length.
    pub fn new(source: S) -> Result<Self> {
        Self::from_parts(source, DEFAULT_CAPACITY, RefillPolicy::default())
    }

    /// Wraps `source` with a buffer of `capacity` bytes.
    pub fn with_capacity(source: S, capacity: NonZeroUsize) -> Result<Self> {
        Self::from_parts(source, capacity, RefillPolicy::default())
    }

    /// Starts configuring a reader around `source`.
    pub fn builder(source: S) -> ReaderBuilder<S> {
        ReaderBuilder::new(source)
    }

    fn from_parts(source: S, capacity: NonZeroUsize, policy: RefillPolicy) -> Result<Self> {
        let length = source.length()?;
        Ok(BufferedReader {
            source,
            buffer: vec![0u8; capacity.get()].into_boxed_slice(),
            window_start: None,
            window_len: 0,
            position: 0,
            length,
            mark: None,
            policy,
        })
    }

    /// Length of the source as reported when the reader was created. Does no I/O.
    #[inline]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Current read position. Does no I/O.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Moves the cursor to `pos`. The window is left untouched.
    #[inline]
    pub fn seek(&mut self, pos: u64) {
        self.position = pos;
    }

    /// Reads the byte at the cursor and advances by one.
    ///
    /// Reading at or past the end of the source fails with
    /// [`io::ErrorKind::UnexpectedEof`].
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.needs_refill(1) {
            self.refill()?;
        }
        let offset = self
            .window_offset()
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
        let byte = self.buffer[offset];
        self.position += 1;
        Ok(byte)
    }

    /// Reads up to `buf.len()` bytes at the cursor and advances by the amount read.
    ///
    /// Returns `Ok(None)` when the cursor is at or past the end of the source. The count
    /// may be smaller than `buf.len()` even before the end: only what the window holds is
    /// copied. Requests larger than the buffer capacity bypass the window and are handed
    /// to the source in a single read. Use [`read_fully`](Self::read_fully) to fill `buf`
    /// completely.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        if self.position >= self.length {
            return Ok(None);
        }

        if buf.len() > self.buffer.len() {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                source = self.source.source(),
                position = self.position,
                len = buf.len(),
                "direct read"
            );
            self.source.seek(self.position)?;
            let n = self.source.read(buf)?;
            self.position += n as u64;
            return Ok(Some(n));
        }

        if self.needs_refill(buf.len()) {
            self.refill()?;
        }
        let Some(offset) = self.window_offset() else {
            // the source delivered less than its length promised
            return Ok(Some(0));
        };
        let n = buf.len().min(self.window_len - offset);
        buf[..n].copy_from_slice(&self.buffer[offset..offset + n]);
        self.position += n as u64;
        Ok(Some(n))
    }

    /// Reads exactly `buf.len()` bytes, looping over [`read`](Self::read).
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] if the source ends first, in which case
    /// the cursor is left after the bytes that were read.
    pub fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..])? {
                Some(n) if n > 0 => filled += n,
                _ => {
                    return Err(Error::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!(
                            "{} ended after {filled} of {} bytes",
                            self.source.source(),
                            buf.len()
                        ),
                    )))
                }
            }
        }
        Ok(())
    }

    /// Advances the cursor by up to `n` bytes without reading, returning the actual
    /// advance.
    ///
    /// The cursor never moves beyond `length - 1`, so skipping stops one byte short of
    /// the end of the source.
    pub fn skip(&mut self, n: u64) -> u64 {
        let actual = self
            .length
            .saturating_sub(self.position)
            .saturating_sub(1)
            .min(n);
        self.position += actual;
        actual
    }

    /// Remembers the current position for a later [`reset`](Self::reset).
    ///
    /// `_read_limit` is accepted for interface compatibility, the mark never expires.
    pub fn mark(&mut self, _read_limit: usize) {
        self.mark = Some(self.position);
    }

    /// Moves the cursor back to the last mark.
    pub fn reset(&mut self) -> Result<()> {
        let mark = self.mark.ok_or(Error::InvalidMark)?;
        self.position = mark;
        Ok(())
    }

    /// Always `true`.
    #[inline]
    pub fn mark_supported(&self) -> bool {
        true
    }

    /// Whether the cursor is at or past the end, using the length the source reports now
    /// rather than the one captured on construction.
    pub fn eof(&self) -> Result<bool> {
        Ok(self.position >= self.source.length()?)
    }

    /// Closes the underlying source.
    pub fn close(mut self) -> Result<()> {
        self.source.close()?;
        Ok(())
    }

    /// Identifying string of the underlying source.
    #[inline]
    pub fn source(&self) -> &str {
        self.source.source()
    }

    /// Capacity of the window in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// The configured refill policy.
    #[inline]
    pub fn refill_policy(&self) -> RefillPolicy {
        self.policy
    }

    /// Source range currently held in the buffer, if any.
    pub fn window(&self) -> Option<Range<u64>> {
        match self.window_start {
            Some(start) if self.window_len > 0 => Some(start..start + self.window_len as u64),
            _ => None,
        }
    }

    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Gets a mutable reference to the underlying source.
    ///
    /// Reads through this reference bypass the window. The window itself stays valid as
    /// long as the source's contents are not changed.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwraps the reader, returning the underlying source. Buffered data is lost.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Whether the window fails to cover `len` bytes at the cursor.
    fn needs_refill(&self, len: usize) -> bool {
        match self.window() {
            Some(window) => {
                self.position < window.start
                    || self.position.saturating_add(len as u64) > window.end
            }
            None => true,
        }
    }

    /// Offset of the cursor inside the buffer, if the window holds the byte at the cursor.
    fn window_offset(&self) -> Option<usize> {
        let window = self.window()?;
        window
            .contains(&self.position)
            .then(|| (self.position - window.start) as usize)
    }

    /// Replaces the window with one starting at the cursor.
    fn refill(&mut self) -> io::Result<()> {
        let want = self
            .length
            .saturating_sub(self.position)
            .min(self.buffer.len() as u64) as usize;
        let previous = self.window();
        self.window_start = None;
        self.window_len = 0;
        if want == 0 {
            return Ok(());
        }

        let start = self.position;
        let len = match (self.policy, previous) {
            (RefillPolicy::Slide, Some(previous)) => self.slide(previous, want)?,
            _ => self.fetch(start, 0..want)?,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            source = self.source.source(),
            start,
            len,
            want,
            policy = ?self.policy,
            "refilled window"
        );

        self.window_start = Some(start);
        self.window_len = len;
        Ok(())
    }

    /// Builds the window `[position, position + want)` reusing what `previous` already
    /// holds. Returns the number of valid bytes.
    fn slide(&mut self, previous: Range<u64>, want: usize) -> io::Result<usize> {
        let start = self.position;
        let end = start + want as u64;
        let keep = previous.start.max(start)..previous.end.min(end);
        if keep.is_empty() {
            return self.fetch(start, 0..want);
        }

        let from = (keep.start - previous.start) as usize..(keep.end - previous.start) as usize;
        let to = (keep.start - start) as usize;
        let kept_end = to + from.len();
        self.buffer.copy_within(from, to);

        if to > 0 {
            let n = self.fetch(start, 0..to)?;
            if n < to {
                return Ok(n);
            }
        }
        if kept_end < want {
            let n = self.fetch(keep.end, kept_end..want)?;
            return Ok(kept_end + n);
        }
        Ok(kept_end)
    }

    /// Fills `self.buffer[range]` from the source at offset `at`, looping over partial
    /// reads. Returns the number of bytes stored, short only at the end of the source.
    fn fetch(&mut self, at: u64, range: Range<usize>) -> io::Result<usize> {
        self.source.seek(at)?;
        let dest = &mut self.buffer[range];
        let mut filled = 0;
        while filled < dest.len() {
            match self.source.read(&mut dest[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<S: fmt::Debug> fmt::Debug for BufferedReader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedReader")
            .field("source", &self.source)
            .field("capacity", &self.buffer.len())
            .field("window_start", &self.window_start)
            .field("window_len", &self.window_len)
            .field("position", &self.position)
            .field("length", &self.length)
            .field("mark", &self.mark)
            .field("policy", &self.policy)
            .finish()
    }
}

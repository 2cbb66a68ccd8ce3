//! Builder pattern for configuring and constructing buffered readers.
//!
//! # Examples
//!
//! ```no_run
//! use seekbuf::{BufferedReader, FileSource, RefillPolicy};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FileSource::open("alignments.bam.bai")?;
//!
//!     let reader = BufferedReader::builder(source)
//!         .with_capacity(64 * 1024)                 // one BGZF block
//!         .with_refill_policy(RefillPolicy::Slide)  // reuse overlapping bytes
//!         .build()?;
//!
//!     // Use the reader...
//!     Ok(())
//! }
//! ```
//!
//! # Settings
//!
//! - `capacity` - Size of the cached window in bytes
//! - `refill_policy` - Whether a cache miss discards or slides the window

use std::num::NonZeroUsize;

use super::{BufferedReader, RefillPolicy, DEFAULT_BUFFER_SIZE};
use crate::error::{Error, Result};
use crate::source::SeekableSource;

/// Buffered reader configuration settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Capacity of the window in bytes. Reads larger than this bypass the window.
    pub(crate) capacity: usize,

    /// What to do with the old window on a cache miss.
    pub(crate) refill_policy: RefillPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUFFER_SIZE,
            refill_policy: RefillPolicy::Discard,
        }
    }
}

/// Builder for configuring and creating a [`BufferedReader`].
#[derive(Clone, Debug)]
pub struct ReaderBuilder<S> {
    /// The source to buffer.
    source: S,
    /// Configuration settings for the reader.
    settings: Settings,
}

impl<S: SeekableSource> ReaderBuilder<S> {
    /// Creates a new builder around `source` with default settings.
    pub fn new(source: S) -> Self {
        Self {
            source,
            settings: Settings::default(),
        }
    }

    /// Sets the window capacity in bytes.
    ///
    /// Larger windows mean fewer, bigger source requests. Reads of more than `capacity`
    /// bytes at once are passed straight to the source.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.settings.capacity = capacity;
        self
    }

    /// Sets the refill policy.
    pub fn with_refill_policy(mut self, policy: RefillPolicy) -> Self {
        self.settings.refill_policy = policy;
        self
    }

    /// Replaces all settings at once.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// The settings the reader will be built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Creates the reader.
    ///
    /// Fails with [`Error::ZeroCapacity`] for a zero-byte window and with [`Error::Io`] if
    /// the source cannot report its length.
    pub fn build(self) -> Result<BufferedReader<S>> {
        let capacity = NonZeroUsize::new(self.settings.capacity).ok_or(Error::ZeroCapacity)?;
        BufferedReader::from_parts(self.source, capacity, self.settings.refill_policy)
    }
}

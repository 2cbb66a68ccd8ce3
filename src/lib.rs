//! Windowed read buffering for random-access byte sources.
//!
//! Index-driven access to genomic formats (BAM/BAI, tabix, bigWig) turns into many small
//! reads at scattered offsets, and issuing them one by one against a remote resource is
//! prohibitively slow. This crate puts a [`BufferedReader`] in front of any
//! [`SeekableSource`]: it caches one contiguous window of the source and serves every read
//! that falls inside the window from memory.
//!
//! # Sources
//!
//! - [`FileSource`] reads a local file.
//! - [`MemorySource`] serves bytes that are already in memory.
//! - [`ReadSeekSource`] adapts any [`std::io::Read`] + [`std::io::Seek`] stream.
//! - `HttpSource` issues HTTP range requests (requires the `http` feature).
//!
//! Implement [`SeekableSource`] to plug in anything else.
//!
//! # Reading
//!
//! ```
//! use seekbuf::{BufferedReader, MemorySource};
//!
//! # fn main() -> seekbuf::Result<()> {
//! let source = MemorySource::with_name(b"ACGTNNNNACGT".to_vec(), "reads.fa");
//! let mut reader = BufferedReader::builder(source).with_capacity(4).build()?;
//!
//! reader.seek(8);
//! let mut codon = [0u8; 3];
//! reader.read_fully(&mut codon)?;
//! assert_eq!(&codon, b"ACG");
//!
//! // `read` is a partial read: it stops at the end of the cached window
//! reader.seek(2);
//! let mut buf = [0u8; 4];
//! assert_eq!(reader.read(&mut buf)?, Some(4));
//!
//! // and reports the end of data as `None`
//! reader.seek(reader.length());
//! assert_eq!(reader.read(&mut buf)?, None);
//! # Ok(())
//! # }
//! ```
//!
//! The reader also implements [`std::io::Read`], [`std::io::Seek`] and
//! [`std::io::BufRead`], so it can be handed to any parser built on the standard I/O
//! traits.
//!
//! # Optional Features
//!
//! - `http`: enables `HttpSource`, backed by a blocking `reqwest` client.
//! - `tracing`: emits `tracing` events for window refills, direct reads and HTTP
//!   requests.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

mod error;
pub mod reader;
pub mod source;

pub use crate::error::{Error, Result};
pub use crate::reader::{BufferedReader, ReaderBuilder, RefillPolicy, DEFAULT_BUFFER_SIZE};
#[cfg(feature = "http")]
pub use crate::source::HttpSource;
pub use crate::source::{FileSource, MemorySource, ReadSeekSource, SeekableSource};

use std::io::{self, BufRead, ErrorKind, Read, Seek, SeekFrom};

use super::BufferedReader;
use crate::source::SeekableSource;

/// End of data is reported as `Ok(0)`, following the `Read` convention.
impl<S: SeekableSource> Read for BufferedReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(BufferedReader::read(self, buf)?.unwrap_or(0))
    }
}

/// Offsets are resolved against the length captured on construction. Seeking never touches
/// the source.
impl<S: SeekableSource> Seek for BufferedReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (base, offset) = match pos {
            SeekFrom::Start(position) => (position, 0),
            SeekFrom::Current(offset) => (self.position, offset),
            SeekFrom::End(offset) => (self.length, offset),
        };
        let position = base.checked_add_signed(offset).ok_or_else(|| {
            io::Error::new(
                ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        self.position = position;
        Ok(position)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}

impl<S: SeekableSource> BufRead for BufferedReader<S> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.position >= self.length {
            return Ok(&[]);
        }
        if self.needs_refill(1) {
            self.refill()?;
        }
        match self.window_offset() {
            Some(offset) => Ok(&self.buffer[offset..self.window_len]),
            None => Ok(&[]),
        }
    }

    fn consume(&mut self, amt: usize) {
        self.position += amt as u64;
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Read, Seek, SeekFrom};

    use crate::{BufferedReader, MemorySource};

    fn reader(data: &[u8], capacity: usize) -> BufferedReader<MemorySource> {
        BufferedReader::builder(MemorySource::new(data))
            .with_capacity(capacity)
            .build()
            .unwrap()
    }

    #[test]
    fn read_to_end_collects_everything() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
        let mut reader = reader(&data, 64);
        let mut out = Vec::new();
        Read::read_to_end(&mut reader, &mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn read_exact_across_windows() {
        let data: Vec<u8> = (0..100).collect();
        let mut reader = reader(&data, 16);
        Seek::seek(&mut reader, SeekFrom::Start(10)).unwrap();
        let mut buf = [0u8; 40];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(&buf[..], &data[10..50]);
    }

    #[test]
    fn seek_from_end_and_current() {
        let data: Vec<u8> = (0..100).collect();
        let mut reader = reader(&data, 16);
        assert_eq!(Seek::seek(&mut reader, SeekFrom::End(-10)).unwrap(), 90);
        assert_eq!(Seek::seek(&mut reader, SeekFrom::Current(-5)).unwrap(), 85);
        assert_eq!(reader.stream_position().unwrap(), 85);
        assert_eq!(reader.read_byte().unwrap(), 85);
    }

    #[test]
    fn seek_before_start_is_rejected() {
        let mut reader = reader(&[0; 10], 4);
        let err = Seek::seek(&mut reader, SeekFrom::Current(-1)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn lines_through_buf_read() {
        let text = b"chr1\t100\t200\nchr1\t300\t400\nchr2\t50\t75\n";
        let reader = reader(text, 8);
        let lines: Vec<String> = reader.lines().map(Result::unwrap).collect();
        assert_eq!(lines, ["chr1\t100\t200", "chr1\t300\t400", "chr2\t50\t75"]);
    }

    #[test]
    fn fill_buf_is_empty_at_end() {
        let mut reader = reader(&[1, 2, 3], 4);
        assert_eq!(reader.fill_buf().unwrap(), &[1, 2, 3]);
        reader.consume(3);
        assert!(reader.fill_buf().unwrap().is_empty());
    }
}

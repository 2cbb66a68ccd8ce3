use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::SeekableSource;

/// A local file.
///
/// The length is read from the file metadata on every call, so a file that grows while it
/// is open reports its live size. The handle is closed when the source is dropped.
#[derive(Debug)]
pub struct FileSource {
    file: File,
    path: String,
    position: u64,
}

impl FileSource {
    /// Opens the file at `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_file(file, path)
    }

    /// Wraps an already opened file, starting at the file's current cursor. `path` is only
    /// used for diagnostics.
    pub fn from_file(mut file: File, path: impl Into<PathBuf>) -> io::Result<Self> {
        let position = file.stream_position()?;
        Ok(FileSource {
            file,
            path: path.into().to_string_lossy().into_owned(),
            position,
        })
    }
}

impl SeekableSource for FileSource {
    fn length(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    #[inline]
    fn position(&self) -> io::Result<u64> {
        Ok(self.position)
    }

    fn seek(&mut self, pos: u64) -> io::Result<()> {
        self.position = self.file.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.file.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    #[inline]
    fn source(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_file_contents_at_offsets() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"ACGTACGTNNNN").unwrap();
        tmp.flush().unwrap();

        let mut source = FileSource::open(tmp.path()).unwrap();
        assert_eq!(source.length().unwrap(), 12);
        assert_eq!(source.source(), tmp.path().to_string_lossy());

        source.seek(8).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(source.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], b"NNNN");
        assert!(source.eof().unwrap());
    }

    #[test]
    fn length_follows_the_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[0u8; 10]).unwrap();
        tmp.flush().unwrap();

        let source = FileSource::open(tmp.path()).unwrap();
        assert_eq!(source.length().unwrap(), 10);

        tmp.write_all(&[0u8; 5]).unwrap();
        tmp.flush().unwrap();
        assert_eq!(source.length().unwrap(), 15);
    }

    #[test]
    fn from_file_starts_at_the_file_cursor() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"ACGTACGTNNNN").unwrap();
        tmp.flush().unwrap();

        let mut file = File::open(tmp.path()).unwrap();
        file.seek(SeekFrom::Start(8)).unwrap();
        let mut source = FileSource::from_file(file, tmp.path()).unwrap();

        assert_eq!(source.position().unwrap(), 8);
        assert_eq!(source.read_byte().unwrap(), Some(b'N'));
        assert_eq!(source.position().unwrap(), 9);

        source.seek(12).unwrap();
        assert!(source.eof().unwrap());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FileSource::open("/definitely/not/here.bam").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

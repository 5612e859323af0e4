//! `std::io` adapters
//!
//! Cursor-based access for callers that expect a file: `Read` and `Write`
//! go through the shared position, `Seek` maps onto `Whence`.
//!
//! The inherent `read`/`write`/`seek` methods shadow these trait methods on
//! `&StreamStore` receivers, so call them through the trait path
//! (`Read::read(&mut handle, buf)`) or the provided helpers (`read_to_end`,
//! `write_all`, `rewind`).

use std::io::{self, Read, Seek, SeekFrom, Write};

use super::{StreamStore, Whence};

impl Read for &StreamStore {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bytes = self.read_next(buf.len());
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

impl Write for &StreamStore {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_next(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for &StreamStore {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(n) => {
                let n = i64::try_from(n).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "seek offset too large")
                })?;
                (n, Whence::FromStart)
            }
            SeekFrom::Current(n) => (n, Whence::FromCurrent),
            SeekFrom::End(n) => (n, Whence::FromEnd),
        };
        Ok(StreamStore::seek(*self, offset, whence)?)
    }
}

impl Read for StreamStore {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(&mut &*self, buf)
    }
}

impl Write for StreamStore {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for StreamStore {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(&mut &*self, pos)
    }
}

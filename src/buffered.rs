//! Single-block read-ahead over a raw byte source.

use std::cmp::min;
use std::io::{self, BufRead, Read};

use log::{debug, trace};

use crate::source::{ByteSource, ReadOutcome};

/// The block size used by [`BufferedByteSource::new`].
pub const DEFAULT_CAPACITY: usize = 8192;

/// Serves single-byte reads from a fixed-size block that is refilled from a
/// raw [`Read`] source whenever it runs dry.
///
/// The block is logically divided into two contiguous sections, in the same
/// manner as a read-only array buffer:
///
/// - The *read* section, `block[..cursor]`, already served to the caller.
/// - The *unread* section, `block[cursor..filled]`, which future reads will
///   produce from.
///
/// Each refill overwrites the block in place with a single `read` call on the
/// raw source. A source that fills each block costs `ceil(N / CAPACITY) + 1`
/// raw reads for a stream of `N` bytes. A refill that returns zero bytes is
/// treated as the end of the stream. From then on every read reports
/// end-of-data without touching the raw source again.
pub struct BufferedByteSource<R, const CAPACITY: usize = DEFAULT_CAPACITY>
where
    R: Read,
{
    block: [u8; CAPACITY],
    cursor: usize,
    /// `None` until the first refill; `Some(0)` once the stream has ended.
    filled: Option<usize>,
    refills: u64,
    source: Option<R>,
}

impl<R> BufferedByteSource<R>
where
    R: Read,
{
    /// Wraps `source` with a block of [`DEFAULT_CAPACITY`] bytes.
    pub fn new(source: R) -> Self {
        Self::with_capacity(source)
    }
}

impl<R, const CAPACITY: usize> BufferedByteSource<R, CAPACITY>
where
    R: Read,
{
    /// Wraps `source` with a block of `CAPACITY` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero.
    pub fn with_capacity(source: R) -> Self {
        assert!(CAPACITY > 0, "BufferedByteSource needs a non-empty block");
        Self {
            block: [0u8; CAPACITY],
            cursor: 0,
            filled: None,
            refills: 0,
            source: Some(source),
        }
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Returns how many times the raw source has been read, including the
    /// final read that reported the end of the stream.
    pub fn refills(&self) -> u64 {
        self.refills
    }

    /// Returns whether the stream has ended, either because the raw source
    /// ran out or because this source was closed.
    pub fn is_terminal(&self) -> bool {
        self.filled == Some(0)
    }

    /// Unwraps the raw source, discarding any unread bytes in the block.
    ///
    /// Returns `None` if the source has already been closed.
    pub fn into_inner(self) -> Option<R> {
        self.source
    }

    /// Returns the unread portion of the block as a slice.
    fn unread(&self) -> &[u8] {
        match self.filled {
            Some(filled) => &self.block[self.cursor..filled],
            None => &[],
        }
    }

    /// Overwrites the block with the next read from the raw source, returning
    /// whether any bytes arrived.
    fn refill(&mut self) -> io::Result<bool> {
        if self.is_terminal() {
            return Ok(false);
        }
        let source = match self.source.as_mut() {
            Some(source) => source,
            None => {
                self.filled = Some(0);
                return Ok(false);
            }
        };

        let filled = source.read(&mut self.block)?;
        debug_assert!(
            filled <= CAPACITY,
            "raw source reported {} bytes read into a block of {}",
            filled,
            CAPACITY,
        );
        self.refills += 1;
        self.cursor = 0;
        self.filled = Some(filled);
        trace!("refilled {} of {} bytes", filled, CAPACITY);

        if filled == 0 {
            debug!("end of data after {} raw reads", self.refills);
            return Ok(false);
        }
        Ok(true)
    }
}

impl<R, const CAPACITY: usize> ByteSource for BufferedByteSource<R, CAPACITY>
where
    R: Read,
{
    fn read_next_byte(&mut self) -> io::Result<ReadOutcome> {
        if self.unread().is_empty() && !self.refill()? {
            return Ok(ReadOutcome::EndOfData);
        }
        let b = self.block[self.cursor];
        self.cursor += 1;
        Ok(ReadOutcome::Byte(b))
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(source) = self.source.take() {
            drop(source);
            self.cursor = 0;
            self.filled = Some(0);
            debug!("closed raw source after {} raw reads", self.refills);
        }
        Ok(())
    }
}

impl<R, const CAPACITY: usize> Read for BufferedByteSource<R, CAPACITY>
where
    R: Read,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let unread = self.fill_buf()?;
        let n = min(unread.len(), buf.len());
        buf[..n].copy_from_slice(&unread[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<R, const CAPACITY: usize> BufRead for BufferedByteSource<R, CAPACITY>
where
    R: Read,
{
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.unread().is_empty() {
            self.refill()?;
        }
        Ok(self.unread())
    }

    fn consume(&mut self, amt: usize) {
        self.cursor = min(self.cursor + amt, self.filled.unwrap_or(0));
    }
}

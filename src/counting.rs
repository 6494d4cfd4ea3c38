use std::io::{self, Read};

use crate::source::{ByteSource, ReadOutcome};

/// Counts the bytes handed out by any [`ByteSource`].
///
/// The count only grows when a byte is actually returned. End-of-data and
/// errors leave it unchanged, and the wrapped source sees exactly the calls
/// it would have seen without the counter.
pub struct CountingReader<S>
where
    S: ByteSource,
{
    inner: S,
    count: u64,
}

impl<S> CountingReader<S>
where
    S: ByteSource,
{
    pub fn new(inner: S) -> Self {
        Self { inner, count: 0 }
    }

    /// Returns the number of bytes returned so far.
    pub fn read_count(&self) -> u64 {
        self.count
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> ByteSource for CountingReader<S>
where
    S: ByteSource,
{
    fn read_next_byte(&mut self) -> io::Result<ReadOutcome> {
        let outcome = self.inner.read_next_byte()?;
        if let ReadOutcome::Byte(_) = outcome {
            self.count += 1;
        }
        Ok(outcome)
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.close()
    }
}

impl<S> Read for CountingReader<S>
where
    S: ByteSource + Read,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

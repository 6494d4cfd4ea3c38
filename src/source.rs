//! The single-byte read contract shared by every layer of a decorator chain.

use std::io;

/// The result of a successful single-byte read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The next byte of the stream.
    Byte(u8),
    /// The stream has no more bytes. Once a source reports this, every later
    /// read reports it too.
    EndOfData,
}

impl ReadOutcome {
    /// Returns the byte, or `None` at end-of-data.
    pub fn byte(self) -> Option<u8> {
        match self {
            ReadOutcome::Byte(b) => Some(b),
            ReadOutcome::EndOfData => None,
        }
    }

    pub fn is_end_of_data(self) -> bool {
        self == ReadOutcome::EndOfData
    }
}

/// A sequential source that serves one byte per call.
///
/// Implementors own whatever raw source sits beneath them, so a decorator
/// that holds a `ByteSource` can be wrapped by another decorator in turn.
/// Calls are blocking and assume a single reader.
pub trait ByteSource {
    /// Reads the next byte, or reports end-of-data.
    ///
    /// Errors from the underlying raw source are returned as-is. After an
    /// error the source should be discarded; its state is not meaningful.
    fn read_next_byte(&mut self) -> io::Result<ReadOutcome>;

    /// Releases the underlying raw source.
    ///
    /// Only the first call does anything; later calls return `Ok(())`.
    /// Reads after closing report end-of-data.
    fn close(&mut self) -> io::Result<()>;

    /// Adapts this source into an iterator of bytes that ends at the first
    /// end-of-data.
    fn into_bytes(self) -> Bytes<Self>
    where
        Self: Sized,
    {
        Bytes {
            source: self,
            done: false,
        }
    }
}

impl<S> ByteSource for &mut S
where
    S: ByteSource + ?Sized,
{
    fn read_next_byte(&mut self) -> io::Result<ReadOutcome> {
        (**self).read_next_byte()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S> ByteSource for Box<S>
where
    S: ByteSource + ?Sized,
{
    fn read_next_byte(&mut self) -> io::Result<ReadOutcome> {
        (**self).read_next_byte()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// An iterator over the bytes of a [`ByteSource`], produced by
/// [`ByteSource::into_bytes`].
pub struct Bytes<S>
where
    S: ByteSource,
{
    source: S,
    done: bool,
}

impl<S> Bytes<S>
where
    S: ByteSource,
{
    /// Returns the wrapped source, for example to read its counters.
    pub fn into_inner(self) -> S {
        self.source
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }
}

impl<S> Iterator for Bytes<S>
where
    S: ByteSource,
{
    type Item = io::Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.read_next_byte() {
            Ok(ReadOutcome::Byte(b)) => Some(Ok(b)),
            Ok(ReadOutcome::EndOfData) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    struct Script(Vec<io::Result<ReadOutcome>>);

    impl ByteSource for Script {
        fn read_next_byte(&mut self) -> io::Result<ReadOutcome> {
            match self.0.is_empty() {
                true => Ok(ReadOutcome::EndOfData),
                false => self.0.remove(0),
            }
        }

        fn close(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bytes_stops_at_end_of_data() {
        let script = Script(vec![
            Ok(ReadOutcome::Byte(1)),
            Ok(ReadOutcome::Byte(2)),
            Ok(ReadOutcome::EndOfData),
            Ok(ReadOutcome::Byte(3)),
        ]);
        let got: Vec<u8> = script.into_bytes().collect::<io::Result<_>>().unwrap();
        assert_eq!(got, [1, 2]);
    }

    #[test]
    fn bytes_yields_error_once() {
        let script = Script(vec![
            Ok(ReadOutcome::Byte(7)),
            Err(io::ErrorKind::BrokenPipe.into()),
            Ok(ReadOutcome::Byte(8)),
        ]);
        let mut bytes = script.into_bytes();
        assert_eq!(bytes.next().unwrap().unwrap(), 7);
        assert_eq!(
            bytes.next().unwrap().unwrap_err().kind(),
            io::ErrorKind::BrokenPipe
        );
        assert!(bytes.next().is_none());
    }

    #[test]
    fn byte_255_is_not_end_of_data() {
        assert_eq!(ReadOutcome::Byte(0xFF).byte(), Some(0xFF));
        assert!(!ReadOutcome::Byte(0xFF).is_end_of_data());
        assert_eq!(ReadOutcome::EndOfData.byte(), None);
    }
}

//! Single-byte stream decorators over raw [`std::io::Read`] sources.
//!
//! A [`BufferedByteSource`] serves bytes one at a time from a fixed-size
//! read-ahead block, and a [`CountingReader`] tallies the bytes handed out by
//! anything implementing [`ByteSource`]. Decorators own what they wrap, so they
//! stack freely.

pub mod buffered;
pub mod counting;
pub mod error;
pub mod source;

pub use buffered::{BufferedByteSource, DEFAULT_CAPACITY};
pub use counting::CountingReader;
pub use source::{ByteSource, Bytes, ReadOutcome};

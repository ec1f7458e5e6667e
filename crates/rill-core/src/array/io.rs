//! Chunked handle I/O over byte arrays.
//!
//! One blocking call per unit: each chunk pulled from [`read_chunks`] is
//! exactly one `read` against the handle, and [`write_to`] is one logical
//! write of an array's valid range. No framing is imposed on the bytes.

#![allow(unsafe_code)]

use super::Array;
use std::io::{Read, Write};
use tracing::trace;

/// Iterator of byte chunks read from a handle. See [`read_chunks`].
pub struct ReadChunks<R> {
    reader: R,
    max_size: usize,
    done: bool,
}

/// Reads a handle as a sequence of [`Array<u8>`] chunks.
///
/// Each pulled chunk issues exactly one `read` requesting up to `max_size`
/// bytes: the call blocks while nothing is available and returns fewer
/// bytes than requested when that is all that is ready — no forced fill.
/// A chunk shorter than `max_size` signals end-of-data and terminates the
/// sequence after being yielded; a zero-byte read terminates it without
/// yielding. Read errors are yielded once and also terminate the sequence.
///
/// Concatenating every yielded chunk reconstructs the handle's byte
/// content exactly.
///
/// # Panics
///
/// Panics if `max_size` is zero.
pub fn read_chunks<R: Read>(max_size: usize, reader: R) -> ReadChunks<R> {
    assert!(max_size > 0, "chunk size must be positive");
    ReadChunks {
        reader,
        max_size,
        done: false,
    }
}

impl<R: Read> Iterator for ReadChunks<R> {
    type Item = std::io::Result<Array<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut chunk = Array::with_capacity_zeroed(self.max_size);
        // SAFETY: with_capacity_zeroed initialized the whole region, so
        // handing max_size bytes to the reader is sound.
        let buf =
            unsafe { std::slice::from_raw_parts_mut(chunk.as_mut_ptr(), self.max_size) };
        match self.reader.read(buf) {
            Ok(n) => {
                if n < self.max_size {
                    self.done = true;
                }
                trace!(bytes = n, "read chunk");
                if n == 0 {
                    return None;
                }
                // SAFETY: the whole region is initialized and
                // n <= max_size == capacity.
                unsafe { chunk.set_len(n) };
                Some(Ok(chunk))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Writes an array's valid byte range to a handle.
///
/// A no-op for an empty array.
///
/// # Errors
///
/// Propagates the handle's write error.
pub fn write_to<W: Write>(writer: &mut W, array: &Array<u8>) -> std::io::Result<()> {
    if array.is_empty() {
        return Ok(());
    }
    writer.write_all(array.as_slice())?;
    trace!(bytes = array.len(), "wrote chunk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_chunks_reconstructs_content() {
        let data: Vec<u8> = (0..=255).collect();
        let chunks: Vec<Array<u8>> = read_chunks(64, Cursor::new(data.clone()))
            .map(|chunk| chunk.unwrap())
            .collect();
        // 256 bytes in 64-byte chunks: four full chunks, then a zero-byte
        // read that ends the sequence without yielding.
        assert_eq!(chunks.len(), 4);
        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
        assert_eq!(joined, data);
    }

    #[test]
    fn test_read_chunks_short_final_chunk() {
        let data = vec![1u8; 100];
        let chunks: Vec<Array<u8>> = read_chunks(64, Cursor::new(data.clone()))
            .map(|chunk| chunk.unwrap())
            .collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 64);
        assert_eq!(chunks[1].len(), 36);
        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
        assert_eq!(joined, data);
    }

    #[test]
    fn test_read_chunks_empty_handle() {
        let chunks: Vec<_> = read_chunks(8, Cursor::new(Vec::<u8>::new())).collect();
        assert!(chunks.is_empty());
    }

    #[test]
    #[should_panic(expected = "chunk size must be positive")]
    fn test_read_chunks_zero_size_panics() {
        let _ = read_chunks(0, Cursor::new(vec![1u8]));
    }

    #[test]
    fn test_write_to_roundtrip() {
        let array = Array::from_slice(b"hello, rill");
        let mut out = Vec::new();
        write_to(&mut out, &array).unwrap();
        assert_eq!(out, b"hello, rill");
    }

    #[test]
    fn test_write_to_empty_is_noop() {
        let mut out = Vec::new();
        write_to(&mut out, &Array::nil()).unwrap();
        assert!(out.is_empty());
    }
}

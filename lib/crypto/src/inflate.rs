/*++

Licensed under the Apache-2.0 license.

File Name:

    inflate.rs

Abstract:

    File contains the stateful zlib inflater used by the CCP decompression
    engine.

--*/

use crate::CryptoError;
use flate2::{Decompress, FlushDecompress, Status};

/// Stateful zlib inflater (zlib header, default window size). State persists
/// across calls so a stream can span multiple requests.
pub struct Inflate {
    stream: Decompress,
}

impl Inflate {
    pub fn new() -> Self {
        Self {
            stream: Decompress::new(true),
        }
    }

    /// Inflate as much of `input` into `out` as fits.
    ///
    /// # Returns
    ///
    /// * `(consumed, produced, stream_end)` - Bytes consumed from `input`,
    ///   bytes produced into `out` and whether the stream is complete.
    pub fn inflate(
        &mut self,
        input: &[u8],
        out: &mut [u8],
    ) -> Result<(usize, usize, bool), CryptoError> {
        let in_before = self.stream.total_in();
        let out_before = self.stream.total_out();
        let status = self.stream.decompress(input, out, FlushDecompress::None)?;
        Ok((
            (self.stream.total_in() - in_before) as usize,
            (self.stream.total_out() - out_before) as usize,
            matches!(status, Status::StreamEnd),
        ))
    }
}

impl Default for Inflate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_inflate_whole_stream() {
        let plain: Vec<u8> = (0..2048u32).map(|i| (i % 251) as u8).collect();
        let packed = deflate(&plain);

        let mut inflate = Inflate::new();
        let mut out = vec![0u8; plain.len() + 16];
        let (consumed, produced, end) = inflate.inflate(&packed, &mut out).unwrap();
        assert_eq!(consumed, packed.len());
        assert_eq!(produced, plain.len());
        assert!(end);
        assert_eq!(&out[..produced], &plain[..]);
    }

    #[test]
    fn test_inflate_chunked_output() {
        let plain: Vec<u8> = (0..1024u32).map(|i| (i % 13) as u8).collect();
        let packed = deflate(&plain);

        let mut inflate = Inflate::new();
        let mut result = Vec::new();
        let mut offset = 0;
        loop {
            let mut out = [0u8; 128];
            let (consumed, produced, end) = inflate.inflate(&packed[offset..], &mut out).unwrap();
            offset += consumed;
            result.extend_from_slice(&out[..produced]);
            if end {
                break;
            }
            assert!(consumed > 0 || produced > 0, "no progress");
        }
        assert_eq!(result, plain);
    }

    #[test]
    fn test_inflate_garbage_fails() {
        let mut inflate = Inflate::new();
        let mut out = [0u8; 64];
        assert!(inflate.inflate(&[0xDE, 0xAD, 0xBE, 0xEF], &mut out).is_err());
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    sha.rs

Abstract:

    File contains the incremental SHA digest used by the CCP SHA engine.

--*/

use sha2::{Digest, Sha256, Sha384};

/// SHA Mode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaMode {
    Sha256,
    Sha384,
}

impl ShaMode {
    /// Size of the final digest in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            ShaMode::Sha256 => 32,
            ShaMode::Sha384 => 48,
        }
    }
}

enum ShaState {
    Sha256(Sha256),
    Sha384(Sha384),
}

/// Incremental SHA digest over a multi-part message.
pub struct Sha {
    state: ShaState,
    mode: ShaMode,
}

impl Sha {
    /// Create a new digest in the initial state for the given mode
    pub fn new(mode: ShaMode) -> Self {
        let state = match mode {
            ShaMode::Sha256 => ShaState::Sha256(Sha256::new()),
            ShaMode::Sha384 => ShaState::Sha384(Sha384::new()),
        };
        Self { state, mode }
    }

    pub fn mode(&self) -> ShaMode {
        self.mode
    }

    pub fn digest_len(&self) -> usize {
        self.mode.digest_len()
    }

    /// Absorb the next part of the message
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            ShaState::Sha256(h) => h.update(data),
            ShaState::Sha384(h) => h.update(data),
        }
    }

    /// Finish the message and copy the digest into `digest` (truncated to
    /// the buffer length if it is shorter than the digest)
    pub fn finalize(self, digest: &mut [u8]) {
        match self.state {
            ShaState::Sha256(h) => copy_digest(&h.finalize(), digest),
            ShaState::Sha384(h) => copy_digest(&h.finalize(), digest),
        }
    }
}

fn copy_digest(src: &[u8], dst: &mut [u8]) {
    let len = src.len().min(dst.len());
    dst[..len].copy_from_slice(&src[..len]);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA_256_ABC: [u8; 32] = [
        0xBA, 0x78, 0x16, 0xBF, 0x8F, 0x01, 0xCF, 0xEA, 0x41, 0x41, 0x40, 0xDE, 0x5D, 0xAE, 0x22,
        0x23, 0xB0, 0x03, 0x61, 0xA3, 0x96, 0x17, 0x7A, 0x9C, 0xB4, 0x10, 0xFF, 0x61, 0xF2, 0x00,
        0x15, 0xAD,
    ];

    const SHA_384_ABC: [u8; 48] = [
        0xCB, 0x00, 0x75, 0x3F, 0x45, 0xA3, 0x5E, 0x8B, 0xB5, 0xA0, 0x3D, 0x69, 0x9A, 0xC6, 0x50,
        0x07, 0x27, 0x2C, 0x32, 0xAB, 0x0E, 0xDE, 0xD1, 0x63, 0x1A, 0x8B, 0x60, 0x5A, 0x43, 0xFF,
        0x5B, 0xED, 0x80, 0x86, 0x07, 0x2B, 0xA1, 0xE7, 0xCC, 0x23, 0x58, 0xBA, 0xEC, 0xA1, 0x34,
        0xC8, 0x25, 0xA7,
    ];

    #[test]
    fn test_sha256() {
        let mut sha = Sha::new(ShaMode::Sha256);
        sha.update(b"abc");
        let mut digest = [0u8; 32];
        sha.finalize(&mut digest);
        assert_eq!(digest, SHA_256_ABC);
    }

    #[test]
    fn test_sha384() {
        let mut sha = Sha::new(ShaMode::Sha384);
        sha.update(b"abc");
        let mut digest = [0u8; 48];
        sha.finalize(&mut digest);
        assert_eq!(digest, SHA_384_ABC);
    }

    #[test]
    fn test_sha256_multi_part() {
        let mut sha = Sha::new(ShaMode::Sha256);
        sha.update(b"a");
        sha.update(b"b");
        sha.update(b"c");
        let mut digest = [0u8; 32];
        sha.finalize(&mut digest);
        assert_eq!(digest, SHA_256_ABC);
    }
}

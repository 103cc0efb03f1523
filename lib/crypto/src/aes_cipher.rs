/*++

Licensed under the Apache-2.0 license.

File Name:

    aes_cipher.rs

Abstract:

    File contains the stateful AES ECB/CBC session used by the CCP AES
    engine.

--*/

use crate::CryptoError;
use aes::{Aes128, Aes256};
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-128 key size in bytes
pub const AES_128_KEY_SIZE: usize = 16;

/// AES-256 key size in bytes
pub const AES_256_KEY_SIZE: usize = 32;

/// AES block mode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AesMode {
    Ecb,
    Cbc,
}

enum Cryptor {
    Ecb128Enc(ecb::Encryptor<Aes128>),
    Ecb128Dec(ecb::Decryptor<Aes128>),
    Ecb256Enc(ecb::Encryptor<Aes256>),
    Ecb256Dec(ecb::Decryptor<Aes256>),
    Cbc128Enc(cbc::Encryptor<Aes128>),
    Cbc128Dec(cbc::Decryptor<Aes128>),
    Cbc256Enc(cbc::Encryptor<Aes256>),
    Cbc256Dec(cbc::Decryptor<Aes256>),
}

/// A live AES cipher session. Padding is disabled; only whole blocks pass
/// through. CBC chaining state persists across `update` calls.
pub struct AesCipher {
    cryptor: Cryptor,
}

impl AesCipher {
    /// Create a new session
    ///
    /// # Arguments
    ///
    /// * `mode` - Block mode
    /// * `encrypt` - Direction
    /// * `key` - 16 or 32 byte key
    /// * `iv` - Initialization vector, required for CBC
    pub fn new(
        mode: AesMode,
        encrypt: bool,
        key: &[u8],
        iv: Option<&[u8; AES_BLOCK_SIZE]>,
    ) -> Result<Self, CryptoError> {
        let bad_key = || CryptoError::InvalidInput("unsupported AES key length");
        let cryptor = match mode {
            AesMode::Ecb => match (key.len(), encrypt) {
                (AES_128_KEY_SIZE, true) => {
                    Cryptor::Ecb128Enc(ecb::Encryptor::new_from_slice(key).map_err(|_| bad_key())?)
                }
                (AES_128_KEY_SIZE, false) => {
                    Cryptor::Ecb128Dec(ecb::Decryptor::new_from_slice(key).map_err(|_| bad_key())?)
                }
                (AES_256_KEY_SIZE, true) => {
                    Cryptor::Ecb256Enc(ecb::Encryptor::new_from_slice(key).map_err(|_| bad_key())?)
                }
                (AES_256_KEY_SIZE, false) => {
                    Cryptor::Ecb256Dec(ecb::Decryptor::new_from_slice(key).map_err(|_| bad_key())?)
                }
                _ => return Err(bad_key()),
            },
            AesMode::Cbc => {
                let iv = iv.ok_or(CryptoError::InvalidInput("CBC requires an IV"))?;
                match (key.len(), encrypt) {
                    (AES_128_KEY_SIZE, true) => Cryptor::Cbc128Enc(
                        cbc::Encryptor::new_from_slices(key, iv).map_err(|_| bad_key())?,
                    ),
                    (AES_128_KEY_SIZE, false) => Cryptor::Cbc128Dec(
                        cbc::Decryptor::new_from_slices(key, iv).map_err(|_| bad_key())?,
                    ),
                    (AES_256_KEY_SIZE, true) => Cryptor::Cbc256Enc(
                        cbc::Encryptor::new_from_slices(key, iv).map_err(|_| bad_key())?,
                    ),
                    (AES_256_KEY_SIZE, false) => Cryptor::Cbc256Dec(
                        cbc::Decryptor::new_from_slices(key, iv).map_err(|_| bad_key())?,
                    ),
                    _ => return Err(bad_key()),
                }
            }
        };
        Ok(Self { cryptor })
    }

    /// Process the next chunk of the message and return the cipher output.
    /// The chunk must be a whole number of blocks.
    pub fn update(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if data.len() % AES_BLOCK_SIZE != 0 {
            return Err(CryptoError::InvalidInput(
                "input is not a multiple of the AES block size",
            ));
        }

        let mut out = Vec::with_capacity(data.len());
        for chunk in data.chunks_exact(AES_BLOCK_SIZE) {
            let mut block = [0u8; AES_BLOCK_SIZE];
            block.copy_from_slice(chunk);
            match &mut self.cryptor {
                Cryptor::Ecb128Enc(c) => c.encrypt_block_mut((&mut block).into()),
                Cryptor::Ecb128Dec(c) => c.decrypt_block_mut((&mut block).into()),
                Cryptor::Ecb256Enc(c) => c.encrypt_block_mut((&mut block).into()),
                Cryptor::Ecb256Dec(c) => c.decrypt_block_mut((&mut block).into()),
                Cryptor::Cbc128Enc(c) => c.encrypt_block_mut((&mut block).into()),
                Cryptor::Cbc128Dec(c) => c.decrypt_block_mut((&mut block).into()),
                Cryptor::Cbc256Enc(c) => c.encrypt_block_mut((&mut block).into()),
                Cryptor::Cbc256Dec(c) => c.decrypt_block_mut((&mut block).into()),
            }
            out.extend_from_slice(&block);
        }
        Ok(out)
    }

    /// Finish the session. With padding disabled nothing is buffered, so
    /// there is never residual output.
    pub fn finalize(self) -> Vec<u8> {
        Vec::new()
    }
}

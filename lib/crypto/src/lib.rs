/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the PSP Emulator Crypto library.

--*/

mod aes_cipher;
mod bn;
pub mod ecc384;
mod inflate;
pub mod rsa;
mod sha;

pub use aes_cipher::{AesCipher, AesMode, AES_128_KEY_SIZE, AES_256_KEY_SIZE, AES_BLOCK_SIZE};
pub use inflate::Inflate;
pub use sha::{Sha, ShaMode};

use thiserror::Error;

/// Errors surfaced by the crypto back-ends.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("bignum/curve operation failed: {0}")]
    Openssl(#[from] openssl::error::ErrorStack),

    #[error("inflate failed: {0}")]
    Inflate(#[from] flate2::DecompressError),

    #[error("{0}")]
    InvalidInput(&'static str),
}

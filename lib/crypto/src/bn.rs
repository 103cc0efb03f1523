/*++

Licensed under the Apache-2.0 license.

File Name:

    bn.rs

Abstract:

    File contains little endian conversion helpers for openssl bignums. The
    CCP carries all large numbers little endian on the wire.

--*/

use crate::CryptoError;
use openssl::bn::{BigNum, BigNumRef};
use openssl::error::ErrorStack;

/// Build a bignum from a little endian byte buffer
pub(crate) fn bn_from_le(bytes: &[u8]) -> Result<BigNum, ErrorStack> {
    let mut be = bytes.to_vec();
    be.reverse();
    BigNum::from_slice(&be)
}

/// Serialize a bignum little endian into `out`, zero padded to the buffer
/// length
pub(crate) fn bn_to_le(bn: &BigNumRef, out: &mut [u8]) -> Result<(), CryptoError> {
    let be = bn.to_vec();
    if be.len() > out.len() {
        return Err(CryptoError::InvalidInput(
            "number too large for the output buffer",
        ));
    }
    out.fill(0);
    for (dst, src) in out.iter_mut().zip(be.iter().rev()) {
        *dst = *src;
    }
    Ok(())
}

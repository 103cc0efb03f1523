/*++

Licensed under the Apache-2.0 license.

File Name:

    rsa.rs

Abstract:

    File contains the raw modular exponentiation used by the CCP RSA engine.

--*/

use crate::bn::{bn_from_le, bn_to_le};
use crate::CryptoError;
use openssl::bn::{BigNum, BigNumContext};

/// Compute `base ^ exponent mod modulus` over little endian buffers and
/// serialize the result little endian into `out` (RSA_NO_PADDING
/// semantics; the base must already be reduced by the modulus).
pub fn mod_exp_le(
    modulus: &[u8],
    base: &[u8],
    exponent: &[u8],
    out: &mut [u8],
) -> Result<(), CryptoError> {
    let n = bn_from_le(modulus)?;
    let m = bn_from_le(base)?;
    let e = bn_from_le(exponent)?;

    if m >= n {
        return Err(CryptoError::InvalidInput(
            "message not reduced by the modulus",
        ));
    }

    let mut ctx = BigNumContext::new()?;
    let mut r = BigNum::new()?;
    r.mod_exp(&m, &e, &n, &mut ctx)?;
    bn_to_le(&r, out)
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    ecc384.rs

Abstract:

    File contains the prime field and NIST P-384 curve operations used by
    the CCP ECC engine. All numbers cross this boundary little endian.

--*/

use crate::bn::{bn_from_le, bn_to_le};
use crate::CryptoError;
use openssl::bn::{BigNum, BigNumContext};
use openssl::ec::{EcGroup, EcPoint};
use openssl::error::ErrorStack;
use openssl::nid::Nid;

/// Size of a CCP ECC number in bytes (576 bits)
pub const ECC_NUM_SIZE: usize = 72;

/// A CCP ECC number, little endian
pub type EccNum = [u8; ECC_NUM_SIZE];

/// NIST P-384 prime, little endian: 2^384 - 2^128 - 2^96 + 2^32 - 1
#[cfg_attr(rustfmt, rustfmt_skip)]
pub const P384_PRIME: [u8; 48] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
    0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

/// Check whether a little endian prime equals the NIST P-384 prime
pub fn is_p384_prime(prime: &[u8]) -> bool {
    prime.len() >= P384_PRIME.len()
        && prime[..P384_PRIME.len()] == P384_PRIME
        && prime[P384_PRIME.len()..].iter().all(|b| *b == 0)
}

/// Compute `a * b mod prime`
pub fn field_mul(prime: &[u8], a: &[u8], b: &[u8], out: &mut [u8]) -> Result<(), CryptoError> {
    let p = bn_from_le(prime)?;
    let a = bn_from_le(a)?;
    let b = bn_from_le(b)?;
    let mut ctx = BigNumContext::new()?;
    let mut r = BigNum::new()?;
    r.mod_mul(&a, &b, &p, &mut ctx)?;
    bn_to_le(&r, out)
}

/// Compute `a + b mod prime`
pub fn field_add(prime: &[u8], a: &[u8], b: &[u8], out: &mut [u8]) -> Result<(), CryptoError> {
    let p = bn_from_le(prime)?;
    let a = bn_from_le(a)?;
    let b = bn_from_le(b)?;
    let mut ctx = BigNumContext::new()?;
    let mut r = BigNum::new()?;
    r.mod_add(&a, &b, &p, &mut ctx)?;
    bn_to_le(&r, out)
}

/// Compute the modular inverse of `a` mod `prime`
pub fn field_inv(prime: &[u8], a: &[u8], out: &mut [u8]) -> Result<(), CryptoError> {
    let p = bn_from_le(prime)?;
    let a = bn_from_le(a)?;
    let mut ctx = BigNumContext::new()?;
    let mut r = BigNum::new()?;
    r.mod_inverse(&a, &p, &mut ctx)?;
    bn_to_le(&r, out)
}

/// Compute `factor * P` on P-384 and store the affine result coordinates
/// little endian. A result at infinity yields the all zero encoding.
pub fn curve_mul(
    factor: &[u8],
    point_x: &[u8],
    point_y: &[u8],
    out_x: &mut [u8],
    out_y: &mut [u8],
) -> Result<(), CryptoError> {
    let group = p384_group()?;
    let mut ctx = BigNumContext::new()?;
    let k = bn_from_le(factor)?;
    let pt = point_from_le(&group, point_x, point_y, &mut ctx)?;
    let mut r = EcPoint::new(&group)?;
    r.mul(&group, &pt, &k, &ctx)?;
    point_to_le(&group, &r, out_x, out_y, &mut ctx)
}

/// Compute `factor1 * P1 + factor2 * P2` on P-384 and store the affine
/// result coordinates little endian. A result at infinity yields the all
/// zero encoding.
#[allow(clippy::too_many_arguments)]
pub fn curve_mul_add(
    factor1: &[u8],
    point1_x: &[u8],
    point1_y: &[u8],
    factor2: &[u8],
    point2_x: &[u8],
    point2_y: &[u8],
    out_x: &mut [u8],
    out_y: &mut [u8],
) -> Result<(), CryptoError> {
    let group = p384_group()?;
    let mut ctx = BigNumContext::new()?;
    let k1 = bn_from_le(factor1)?;
    let k2 = bn_from_le(factor2)?;
    let p1 = point_from_le(&group, point1_x, point1_y, &mut ctx)?;
    let p2 = point_from_le(&group, point2_x, point2_y, &mut ctx)?;

    let mut r1 = EcPoint::new(&group)?;
    r1.mul(&group, &p1, &k1, &ctx)?;
    let mut r2 = EcPoint::new(&group)?;
    r2.mul(&group, &p2, &k2, &ctx)?;

    let mut sum = EcPoint::new(&group)?;
    sum.add(&group, &r1, &r2, &mut ctx)?;
    point_to_le(&group, &sum, out_x, out_y, &mut ctx)
}

fn p384_group() -> Result<EcGroup, ErrorStack> {
    EcGroup::from_curve_name(Nid::SECP384R1)
}

fn point_from_le(
    group: &EcGroup,
    x: &[u8],
    y: &[u8],
    ctx: &mut BigNumContext,
) -> Result<EcPoint, CryptoError> {
    let x = bn_from_le(x)?;
    let y = bn_from_le(y)?;
    let mut pt = EcPoint::new(group)?;
    pt.set_affine_coordinates_gfp(group, &x, &y, ctx)?;
    Ok(pt)
}

fn point_to_le(
    group: &EcGroup,
    pt: &EcPoint,
    out_x: &mut [u8],
    out_y: &mut [u8],
    ctx: &mut BigNumContext,
) -> Result<(), CryptoError> {
    if pt.is_infinity(group) {
        out_x.fill(0);
        out_y.fill(0);
        return Ok(());
    }

    let mut x = BigNum::new()?;
    let mut y = BigNum::new()?;
    pt.affine_coordinates(group, &mut x, &mut y, ctx)?;
    bn_to_le(&x, out_x)?;
    bn_to_le(&y, out_y)
}

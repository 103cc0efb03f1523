/*++

Licensed under the Apache-2.0 license.

File Name:

    ecc.rs

Abstract:

    File contains the CCP ECC engine: prime field arithmetic and P-384
    curve operations over 576 bit little endian numbers.

--*/

use super::req::{
    CcpReq, EccFunction, CCP_V5_ECC_OP_ADD_CURVE, CCP_V5_ECC_OP_ADD_FIELD,
    CCP_V5_ECC_OP_INV_FIELD, CCP_V5_ECC_OP_MUL_ADD_CURVE, CCP_V5_ECC_OP_MUL_CURVE,
    CCP_V5_ECC_OP_MUL_FIELD,
};
use super::xfer::XferCtx;
use super::{CcpError, CcpV5};
use log::{debug, error};
use psp_emu_crypto::ecc384::{self, ECC_NUM_SIZE};

/// The request block holds eight numbers: the prime plus up to seven
/// operation specific operands (the largest layout is the curve
/// multiply-add: two factors, two points and the coefficient).
const ECC_REQ_NUMS: usize = 8;
const ECC_REQ_SIZE: usize = ECC_REQ_NUMS * ECC_NUM_SIZE;

const ECC_MAX_BITS: u32 = (ECC_NUM_SIZE * 8) as u32;

pub(crate) fn process(dev: &mut CcpV5, req: &CcpReq) -> Result<(), CcpError> {
    let func = EccFunction(req.dw0.function());
    let op = func.op();
    let bits = func.bit_count();

    if bits > ECC_MAX_BITS {
        error!("CCP: ECC bit count {bits} is too large");
        return Err(CcpError::NotImplemented);
    }

    // Field operations return one number, curve operations an (X, Y) pair.
    let out_size = if op <= CCP_V5_ECC_OP_ADD_CURVE {
        ECC_NUM_SIZE
    } else {
        2 * ECC_NUM_SIZE
    };
    let mut ctx = XferCtx::init(&mut dev.mem, req, false, out_size as u64, false)?;

    let mut block = [0u8; ECC_REQ_SIZE];
    ctx.read(&mut dev.mem, &mut block)?;
    let num = |idx: usize| &block[idx * ECC_NUM_SIZE..(idx + 1) * ECC_NUM_SIZE];
    let prime = num(0);

    debug!("CCP: ECC op={op} bits={bits}");

    match op {
        CCP_V5_ECC_OP_MUL_FIELD => {
            let mut out = [0u8; ECC_NUM_SIZE];
            ecc384::field_mul(prime, num(1), num(2), &mut out)?;
            ctx.write(&mut dev.mem, &out)
        }
        CCP_V5_ECC_OP_ADD_FIELD => {
            let mut out = [0u8; ECC_NUM_SIZE];
            ecc384::field_add(prime, num(1), num(2), &mut out)?;
            ctx.write(&mut dev.mem, &out)
        }
        CCP_V5_ECC_OP_INV_FIELD => {
            let mut out = [0u8; ECC_NUM_SIZE];
            ecc384::field_inv(prime, num(1), &mut out)?;
            ctx.write(&mut dev.mem, &out)
        }
        CCP_V5_ECC_OP_MUL_CURVE => {
            check_curve_prime(prime)?;
            // Block layout: factor, point X, point Y, coefficient (unused).
            let mut x = [0u8; ECC_NUM_SIZE];
            let mut y = [0u8; ECC_NUM_SIZE];
            ecc384::curve_mul(num(1), num(2), num(3), &mut x, &mut y)?;
            ctx.write(&mut dev.mem, &x)?;
            ctx.write(&mut dev.mem, &y)
        }
        CCP_V5_ECC_OP_MUL_ADD_CURVE => {
            check_curve_prime(prime)?;
            // Block layout: factor1, point1 X/Y, factor2, point2 X/Y,
            // coefficient (unused).
            let mut x = [0u8; ECC_NUM_SIZE];
            let mut y = [0u8; ECC_NUM_SIZE];
            ecc384::curve_mul_add(num(1), num(2), num(3), num(4), num(5), num(6), &mut x, &mut y)?;
            ctx.write(&mut dev.mem, &x)?;
            ctx.write(&mut dev.mem, &y)
        }
        _ => {
            error!("CCP: ECC operation {op} not implemented");
            Err(CcpError::NotImplemented)
        }
    }
}

/// The curve coefficient in the request block is ignored; instead the prime
/// must name P-384 and that curve is used unconditionally.
fn check_curve_prime(prime: &[u8]) -> Result<(), CcpError> {
    if ecc384::is_p384_prime(prime) {
        Ok(())
    } else {
        error!("CCP: ECC request for a curve other than P-384");
        Err(CcpError::NotImplemented)
    }
}

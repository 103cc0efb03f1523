/*++

Licensed under the Apache-2.0 license.

File Name:

    passthru.rs

Abstract:

    File contains the CCP passthrough engine: plain copies between address
    spaces, plus the 256 bit byteswap firmware uses to flip hash state
    endianness.

--*/

use super::req::{
    CcpReq, PassthruFunction, CCP_V5_PT_BITWISE_NOOP, CCP_V5_PT_BYTESWAP_256BIT,
    CCP_V5_PT_BYTESWAP_NOOP,
};
use super::xfer::XferCtx;
use super::{CcpError, CcpV5};
use log::error;

const CHUNK_SIZE: usize = 4096;

pub(crate) fn process(dev: &mut CcpV5, req: &CcpReq) -> Result<(), CcpError> {
    let func = PassthruFunction(req.dw0.function());

    // A 256 bit byteswap of one 32 byte quantity is a reverse copy; nothing
    // else beyond the plain copy is emulated.
    let swap256 = func.byteswap() == CCP_V5_PT_BYTESWAP_256BIT && req.cb_src == 32;
    let supported = func.bitwise() == CCP_V5_PT_BITWISE_NOOP
        && func.reflect() == 0
        && (func.byteswap() == CCP_V5_PT_BYTESWAP_NOOP || swap256);
    if !supported {
        error!(
            "CCP: PASSTHRU bitwise={} byteswap={} reflect={} not implemented",
            func.bitwise(),
            func.byteswap(),
            func.reflect()
        );
        return Err(CcpError::NotImplemented);
    }

    let mut left = req.cb_src as usize;
    let mut ctx = XferCtx::init(&mut dev.mem, req, false, left as u64, swap256)?;

    let mut data = [0u8; CHUNK_SIZE];
    while left > 0 {
        let chunk = left.min(CHUNK_SIZE);
        ctx.read(&mut dev.mem, &mut data[..chunk])?;
        ctx.write(&mut dev.mem, &data[..chunk])?;
        left -= chunk;
    }
    Ok(())
}

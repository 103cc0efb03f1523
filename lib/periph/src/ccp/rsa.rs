/*++

Licensed under the Apache-2.0 license.

File Name:

    rsa.rs

Abstract:

    File contains the CCP RSA engine: raw modular exponentiation at 2048 and
    4096 bit key sizes.

--*/

use super::req::{CcpReq, RsaFunction};
use super::xfer::{key_copy_from_req, XferCtx};
use super::{CcpError, CcpV5};
use log::error;
use psp_emu_crypto::rsa;

pub(crate) fn process(dev: &mut CcpV5, req: &CcpReq) -> Result<(), CcpError> {
    let func = RsaFunction(req.dw0.function());
    let size = func.size() as usize;
    let cb_src = req.cb_src as usize;

    let supported = func.mode() == 0
        && ((size == 256 && cb_src == 512) || (size == 512 && cb_src == 1024));
    if !supported {
        error!(
            "CCP: RSA mode={} size={} cb_src={} not implemented",
            func.mode(),
            func.size(),
            req.cb_src
        );
        return Err(CcpError::NotImplemented);
    }

    // The key region holds the public exponent, little endian.
    let mut exp = [0u8; 512];
    key_copy_from_req(&mut dev.mem, req, &mut exp[..size])?;

    let mut ctx = XferCtx::init(&mut dev.mem, req, false, size as u64, false)?;

    // The source holds the modulus followed by the message, both little
    // endian (why the modulus is not part of the key buffer is a mystery of
    // the hardware interface).
    let mut data = [0u8; 1024];
    ctx.read(&mut dev.mem, &mut data[..cb_src])?;
    let (modulus, msg) = data[..cb_src].split_at(size);

    // mod_exp_le already yields the little endian form firmware expects in
    // the destination.
    let mut result = [0u8; 512];
    rsa::mod_exp_le(modulus, msg, &exp[..size], &mut result[..size])?;
    ctx.write(&mut dev.mem, &result[..size])
}

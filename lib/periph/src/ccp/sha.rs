/*++

Licensed under the Apache-2.0 license.

File Name:

    sha.rs

Abstract:

    File contains the CCP SHA engine: multi-part SHA-256/384 digests whose
    state lives in an LSB slot.

--*/

use super::req::{CcpReq, ShaFunction, CCP_V5_SHA_TYPE_256, CCP_V5_SHA_TYPE_384};
use super::xfer::XferCtx;
use super::{CcpError, CcpV5};
use log::error;
use psp_emu_crypto::{Sha, ShaMode};

const CHUNK_SIZE: usize = 256;

pub(crate) fn process(dev: &mut CcpV5, req: &CcpReq) -> Result<(), CcpError> {
    let func = ShaFunction(req.dw0.function());
    let mode = match func.sha_type() {
        CCP_V5_SHA_TYPE_256 => ShaMode::Sha256,
        CCP_V5_SHA_TYPE_384 => ShaMode::Sha384,
        other => {
            error!(
                "CCP: SHA type={} init={} eom={} sha_bits={} not implemented",
                other,
                req.dw0.init() as u8,
                req.dw0.eom() as u8,
                req.sha_bits
            );
            return Err(CcpError::NotImplemented);
        }
    };

    // The final state in the LSB is big endian; firmware always copies it
    // out with a 256 bit byteswap passthrough. Writing the digest in reverse
    // order here keeps the passthrough engine free of special cases.
    let mut ctx = XferCtx::init(&mut dev.mem, req, true, mode.digest_len() as u64, true)?;

    // The initial hash state firmware placed in the LSB is ignored; the
    // init flag is advisory and a context starts whenever none is active.
    let hash = dev.sha.get_or_insert_with(|| Sha::new(mode));

    let mut left = req.cb_src as usize;
    let mut data = [0u8; CHUNK_SIZE];
    while left > 0 {
        let chunk = left.min(CHUNK_SIZE);
        ctx.read(&mut dev.mem, &mut data[..chunk])?;
        hash.update(&data[..chunk]);
        left -= chunk;
    }

    if req.dw0.eom() {
        let len = mode.digest_len();
        let mut digest = [0u8; 48];
        if let Some(hash) = dev.sha.take() {
            hash.finalize(&mut digest[..len]);
        }
        ctx.write(&mut dev.mem, &digest[..len])?;
    }
    Ok(())
}

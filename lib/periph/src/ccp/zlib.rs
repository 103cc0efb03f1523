/*++

Licensed under the Apache-2.0 license.

File Name:

    zlib.rs

Abstract:

    File contains the CCP zlib decompression engine. Firmware learns the
    decompressed size through the written-bytes register of the secondary
    MMIO window.

--*/

use super::req::CcpReq;
use super::xfer::XferCtx;
use super::{CcpError, CcpV5};
use psp_emu_crypto::Inflate;

const CHUNK_SIZE: usize = 4096;

pub(crate) fn process(dev: &mut CcpV5, req: &CcpReq) -> Result<(), CcpError> {
    // The decompressed size is unknown up front; the write budget is
    // unbounded.
    let mut ctx = XferCtx::init(&mut dev.mem, req, false, u64::MAX, false)?;

    if req.dw0.init() || dev.zlib.is_none() {
        dev.zlib = Some(Inflate::new());
    }
    let Some(inflater) = dev.zlib.as_mut() else {
        return Err(CcpError::EngineError);
    };

    let mut read_left = req.cb_src as usize;
    let mut data = [0u8; CHUNK_SIZE];
    let mut decomp = [0u8; CHUNK_SIZE];
    let mut off = 0usize;

    while read_left > 0 {
        let chunk = read_left.min(CHUNK_SIZE);
        ctx.read(&mut dev.mem, &mut data[..chunk])?;

        let mut consumed_total = 0usize;
        while consumed_total < chunk {
            let (consumed, produced, end) =
                inflater.inflate(&data[consumed_total..chunk], &mut decomp[off..])?;
            consumed_total += consumed;
            off += produced;

            // Flush the staging buffer as soon as it fills.
            if off == decomp.len() {
                ctx.write(&mut dev.mem, &decomp)?;
                off = 0;
            }
            if end {
                break;
            }
            if consumed == 0 && produced == 0 {
                break;
            }
        }

        read_left -= chunk;
    }

    // Flush whatever is left.
    if off > 0 {
        ctx.write(&mut dev.mem, &decomp[..off])?;
    }

    if req.dw0.eom() {
        dev.zlib = None;
    }
    Ok(())
}

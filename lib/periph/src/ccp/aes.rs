/*++

Licensed under the Apache-2.0 license.

File Name:

    aes.rs

Abstract:

    File contains the CCP AES engine: ECB/CBC sessions with keys and IVs
    loaded big endian from LSB or local memory, plus the forwarding path for
    keys only present on real hardware.

--*/

use super::lsb::CCP_V5_LSB_SLOT_SIZE;
use super::req::{
    AesFunction, CcpReq, CCP_V5_AES_MODE_CBC, CCP_V5_AES_MODE_ECB, CCP_V5_AES_TYPE_128,
    CCP_V5_AES_TYPE_256, CCP_V5_MEM_TYPE_SB,
};
use super::xfer::{key_copy_from_req, XferCtx};
use super::{CcpError, CcpV5, CCP_V5_STATUS_MASK, CCP_V5_STATUS_SUCCESS};
use log::error;
use psp_emu_crypto::{AesCipher, AesMode, AES_128_KEY_SIZE, AES_256_KEY_SIZE, AES_BLOCK_SIZE};
use psp_emu_types::CcpAddr;

/// LSB addresses below this bound hold protected keys that never leave real
/// hardware.
const PROTECTED_LSB_END: CcpAddr = 0xA0;

const CHUNK_SIZE: usize = 512;

/// Staging limit of the proxy path; it exists to unwrap the 128 bit IKEK,
/// not for bulk data.
const PROXY_MAX_SIZE: usize = 4096;

pub(crate) fn process(dev: &mut CcpV5, req: &CcpReq) -> Result<(), CcpError> {
    let func = AesFunction(req.dw0.function());
    let use_iv = func.mode() == CCP_V5_AES_MODE_CBC;

    // Keys in the protected LSB range are only available to real hardware.
    if req.key_mem.mem_type() == CCP_V5_MEM_TYPE_SB && req.key_addr < PROTECTED_LSB_END {
        if dev.proxy.is_some() {
            return proxy_process(dev, req, use_iv);
        }
        // Without a forwarder the request still runs, but no key material
        // exists locally and the output is cryptographically meaningless.
        error!(
            "CCP: fatal: request uses protected LSB key at {:#x} with no proxy configured, \
             output will be garbage",
            req.key_addr
        );
    }

    let key_len = match func.aes_type() {
        CCP_V5_AES_TYPE_128 => AES_128_KEY_SIZE,
        CCP_V5_AES_TYPE_256 => AES_256_KEY_SIZE,
        _ => 0,
    };
    let mode_ok = func.mode() == CCP_V5_AES_MODE_ECB || func.mode() == CCP_V5_AES_MODE_CBC;
    if func.size() != 0 || !mode_ok || key_len == 0 {
        error!(
            "CCP: AES type={} mode={} encrypt={} size={} not implemented",
            func.aes_type(),
            func.mode(),
            func.encrypt() as u8,
            func.size()
        );
        return Err(CcpError::NotImplemented);
    }

    let mut ctx = XferCtx::init(&mut dev.mem, req, false, req.cb_src as u64, false)?;

    if dev.aes.is_none() {
        let mut key = [0u8; AES_256_KEY_SIZE];
        key_copy_from_req(&mut dev.mem, req, &mut key[..key_len])?;
        // The key is stored big endian (reversed) in its buffer.
        key[..key_len].reverse();

        let iv = if use_iv {
            // The IV always sits in the LSB slot named by the source
            // selector, big endian as well.
            let iv_addr = req.src_mem.lsb_ctx_id() as CcpAddr * CCP_V5_LSB_SLOT_SIZE as CcpAddr;
            let mut iv = [0u8; AES_BLOCK_SIZE];
            dev.mem.lsb.read(iv_addr, &mut iv)?;
            iv.reverse();
            Some(iv)
        } else {
            None
        };

        let mode = if use_iv { AesMode::Cbc } else { AesMode::Ecb };
        dev.aes = Some(AesCipher::new(
            mode,
            func.encrypt(),
            &key[..key_len],
            iv.as_ref(),
        )?);
    }
    let Some(cipher) = dev.aes.as_mut() else {
        return Err(CcpError::EngineError);
    };

    let mut left = req.cb_src as usize;
    let mut data = [0u8; CHUNK_SIZE];
    while left > 0 {
        let chunk = left.min(CHUNK_SIZE);
        ctx.read(&mut dev.mem, &mut data[..chunk])?;
        let out = cipher.update(&data[..chunk])?;
        if !out.is_empty() {
            ctx.write(&mut dev.mem, &out)?;
        }
        left -= chunk;
    }

    if req.dw0.eom() {
        if let Some(cipher) = dev.aes.take() {
            let residue = cipher.finalize();
            if !residue.is_empty() {
                ctx.write(&mut dev.mem, &residue)?;
            }
        }
    }
    Ok(())
}

/// Forward the whole operation to the real CCP, IV passed through raw.
fn proxy_process(dev: &mut CcpV5, req: &CcpReq, use_iv: bool) -> Result<(), CcpError> {
    let cb = req.cb_src as usize;
    if cb > PROXY_MAX_SIZE {
        error!("CCP: fatal: AES proxy request with too much data ({cb} bytes)");
        return Err(CcpError::NotImplemented);
    }

    let mut ctx = XferCtx::init(&mut dev.mem, req, false, cb as u64, false)?;

    let mut iv = [0u8; AES_BLOCK_SIZE];
    if use_iv {
        let iv_addr = req.src_mem.lsb_ctx_id() as CcpAddr * CCP_V5_LSB_SLOT_SIZE as CcpAddr;
        dev.mem.lsb.read(iv_addr, &mut iv)?;
    }

    let mut src = vec![0u8; cb];
    ctx.read(&mut dev.mem, &mut src)?;
    let mut dst = vec![0u8; cb];

    let Some(proxy) = dev.proxy.as_mut() else {
        return Err(CcpError::ProxyError);
    };
    let sts = match proxy.aes_do(
        req.dw0.0,
        &src,
        &mut dst,
        req.key_addr as u32,
        use_iv.then_some(&iv[..]),
    ) {
        Ok(sts) => sts,
        Err(err) => {
            error!("CCP: fatal: AES proxy operation failed: {err}");
            return Err(CcpError::ProxyError);
        }
    };
    if sts & CCP_V5_STATUS_MASK != CCP_V5_STATUS_SUCCESS {
        error!("CCP: proxy CCP returned status {:#x}", sts & CCP_V5_STATUS_MASK);
        return Err(CcpError::ProxyError);
    }

    ctx.write(&mut dev.mem, &dst)
}

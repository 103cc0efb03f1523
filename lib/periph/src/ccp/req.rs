/*++

Licensed under the Apache-2.0 license.

File Name:

    req.rs

Abstract:

    File contains the CCPv5 request descriptor ABI: the 32 byte little
    endian record firmware queues in PSP memory, and the packed sub-fields
    of its first dword.

--*/

use bitfield::bitfield;
use psp_emu_types::{ccp_addr_from_hi_lo, CcpAddr};
use std::fmt;

/// Size of a request descriptor in bytes
pub const CCP_V5_REQ_SIZE: usize = 32;

/// Engine selector of a request descriptor
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum CcpEngine {
    Aes = 0,
    XtsAes128 = 1,
    Des3 = 2,
    Sha = 3,
    Rsa = 4,
    Passthru = 5,
    ZlibDecomp = 6,
    Ecc = 7,
    /// Engine code outside the hardware set; faults the queue
    Invalid,
}

impl From<u32> for CcpEngine {
    fn from(val: u32) -> CcpEngine {
        match val {
            0 => CcpEngine::Aes,
            1 => CcpEngine::XtsAes128,
            2 => CcpEngine::Des3,
            3 => CcpEngine::Sha,
            4 => CcpEngine::Rsa,
            5 => CcpEngine::Passthru,
            6 => CcpEngine::ZlibDecomp,
            7 => CcpEngine::Ecc,
            _ => CcpEngine::Invalid,
        }
    }
}

impl fmt::Display for CcpEngine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CcpEngine::Aes => "AES",
            CcpEngine::XtsAes128 => "XTS_AES_128",
            CcpEngine::Des3 => "DES3",
            CcpEngine::Sha => "SHA",
            CcpEngine::Rsa => "RSA",
            CcpEngine::Passthru => "PASSTHROUGH",
            CcpEngine::ZlibDecomp => "ZLIB_DECOMPRESS",
            CcpEngine::Ecc => "ECC",
            CcpEngine::Invalid => "<INVALID>",
        };
        write!(f, "{name}")
    }
}

/// Memory type: host physical memory (not modeled)
pub const CCP_V5_MEM_TYPE_SYSTEM: u16 = 0;
/// Memory type: local storage buffer
pub const CCP_V5_MEM_TYPE_SB: u16 = 1;
/// Memory type: PSP visible address space
pub const CCP_V5_MEM_TYPE_LOCAL: u16 = 2;

/// AES engine modes (ECB and CBC are emulated, the rest decode for
/// diagnostics only)
pub const CCP_V5_AES_MODE_ECB: u32 = 0;
pub const CCP_V5_AES_MODE_CBC: u32 = 1;

/// AES engine key types
pub const CCP_V5_AES_TYPE_128: u32 = 0;
pub const CCP_V5_AES_TYPE_192: u32 = 1;
pub const CCP_V5_AES_TYPE_256: u32 = 2;

/// SHA engine digest types
pub const CCP_V5_SHA_TYPE_1: u32 = 1;
pub const CCP_V5_SHA_TYPE_224: u32 = 2;
pub const CCP_V5_SHA_TYPE_256: u32 = 3;
pub const CCP_V5_SHA_TYPE_384: u32 = 4;
pub const CCP_V5_SHA_TYPE_512: u32 = 5;

/// Passthrough byteswap operations
pub const CCP_V5_PT_BYTESWAP_NOOP: u32 = 0;
pub const CCP_V5_PT_BYTESWAP_32BIT: u32 = 1;
pub const CCP_V5_PT_BYTESWAP_256BIT: u32 = 2;

/// Passthrough bitwise operations
pub const CCP_V5_PT_BITWISE_NOOP: u32 = 0;
pub const CCP_V5_PT_BITWISE_AND: u32 = 1;
pub const CCP_V5_PT_BITWISE_OR: u32 = 2;
pub const CCP_V5_PT_BITWISE_XOR: u32 = 3;
pub const CCP_V5_PT_BITWISE_MASK: u32 = 4;

/// ECC engine operations
pub const CCP_V5_ECC_OP_ADD_FIELD: u32 = 1;
pub const CCP_V5_ECC_OP_MUL_FIELD: u32 = 2;
pub const CCP_V5_ECC_OP_INV_FIELD: u32 = 3;
pub const CCP_V5_ECC_OP_ADD_CURVE: u32 = 4;
pub const CCP_V5_ECC_OP_MUL_CURVE: u32 = 5;
pub const CCP_V5_ECC_OP_MUL_ADD_CURVE: u32 = 6;

bitfield! {
    /// First dword of a request descriptor
    #[derive(Clone, Copy)]
    pub struct CcpDw0(u32);
    pub init, _: 3;
    pub eom, _: 4;
    pub u32, function, _: 19, 5;
    pub u32, engine_code, _: 23, 20;
    pub prot, _: 24;
}

bitfield! {
    /// Memory selector half word (source, destination and key each carry one)
    #[derive(Clone, Copy)]
    pub struct MemSel(u16);
    pub u16, mem_type, _: 1, 0;
    pub u8, lsb_ctx_id, _: 8, 2;
    pub fixed, _: 9;
}

bitfield! {
    /// AES engine function field
    #[derive(Clone, Copy)]
    pub struct AesFunction(u32);
    pub u32, size, _: 6, 0;
    pub encrypt, _: 7;
    pub u32, mode, _: 12, 8;
    pub u32, aes_type, _: 14, 13;
}

bitfield! {
    /// SHA engine function field
    #[derive(Clone, Copy)]
    pub struct ShaFunction(u32);
    pub u32, sha_type, _: 13, 10;
}

bitfield! {
    /// RSA engine function field
    #[derive(Clone, Copy)]
    pub struct RsaFunction(u32);
    pub u32, size, _: 11, 0;
    pub u32, mode, _: 14, 12;
}

bitfield! {
    /// Passthrough engine function field
    #[derive(Clone, Copy)]
    pub struct PassthruFunction(u32);
    pub u32, byteswap, _: 1, 0;
    pub u32, bitwise, _: 4, 2;
    pub u32, reflect, _: 6, 5;
}

bitfield! {
    /// ECC engine function field
    #[derive(Clone, Copy)]
    pub struct EccFunction(u32);
    pub u32, bit_count, _: 11, 0;
    pub u32, op, _: 14, 12;
}

/// A decoded request descriptor. The destination and SHA views of the
/// descriptor union are both populated; which one is meaningful depends on
/// the engine.
#[derive(Clone, Copy)]
pub struct CcpReq {
    pub dw0: CcpDw0,
    pub cb_src: u32,
    pub src_addr: CcpAddr,
    pub src_mem: MemSel,
    pub dst_addr: CcpAddr,
    pub dst_mem: MemSel,
    pub sha_bits: u64,
    pub key_addr: CcpAddr,
    pub key_mem: MemSel,
}

impl CcpReq {
    /// Decode a descriptor from its wire format
    pub fn parse(raw: &[u8; CCP_V5_REQ_SIZE]) -> Self {
        let dw0 = CcpDw0(u32::from_le_bytes(*array_ref![raw, 0, 4]));
        let cb_src = u32::from_le_bytes(*array_ref![raw, 4, 4]);
        let src_lo = u32::from_le_bytes(*array_ref![raw, 8, 4]);
        let src_hi = u16::from_le_bytes(*array_ref![raw, 12, 2]);
        let src_mem = MemSel(u16::from_le_bytes(*array_ref![raw, 14, 2]));
        let dst_lo = u32::from_le_bytes(*array_ref![raw, 16, 4]);
        let dst_hi = u16::from_le_bytes(*array_ref![raw, 20, 2]);
        let dst_mem = MemSel(u16::from_le_bytes(*array_ref![raw, 22, 2]));
        let sha_bits_hi = u32::from_le_bytes(*array_ref![raw, 20, 4]);
        let key_lo = u32::from_le_bytes(*array_ref![raw, 24, 4]);
        let key_hi = u16::from_le_bytes(*array_ref![raw, 28, 2]);
        let key_mem = MemSel(u16::from_le_bytes(*array_ref![raw, 30, 2]));

        Self {
            dw0,
            cb_src,
            src_addr: ccp_addr_from_hi_lo(src_hi, src_lo),
            src_mem,
            dst_addr: ccp_addr_from_hi_lo(dst_hi, dst_lo),
            dst_mem,
            sha_bits: ((sha_bits_hi as u64) << 32) | dst_lo as u64,
            key_addr: ccp_addr_from_hi_lo(key_hi, key_lo),
            key_mem,
        }
    }

    pub fn engine(&self) -> CcpEngine {
        CcpEngine::from(self.dw0.engine_code())
    }
}

fn aes_mode_str(mode: u32) -> &'static str {
    match mode {
        0 => "ECB",
        1 => "CBC",
        2 => "OFB",
        3 => "CFB",
        4 => "CTR",
        5 => "CMAC",
        6 => "GHASH",
        7 => "GCTR",
        8 => "GCM",
        9 => "GMAC",
        _ => "<INVALID>",
    }
}

fn aes_type_str(aes_type: u32) -> &'static str {
    match aes_type {
        CCP_V5_AES_TYPE_128 => "AES128",
        CCP_V5_AES_TYPE_192 => "AES192",
        CCP_V5_AES_TYPE_256 => "AES256",
        _ => "<INVALID>",
    }
}

fn byteswap_str(byteswap: u32) -> &'static str {
    match byteswap {
        CCP_V5_PT_BYTESWAP_NOOP => "NOOP",
        CCP_V5_PT_BYTESWAP_32BIT => "32BIT",
        CCP_V5_PT_BYTESWAP_256BIT => "256BIT",
        _ => "<INVALID>",
    }
}

fn bitwise_str(bitwise: u32) -> &'static str {
    match bitwise {
        CCP_V5_PT_BITWISE_NOOP => "NOOP",
        CCP_V5_PT_BITWISE_AND => "AND",
        CCP_V5_PT_BITWISE_OR => "OR",
        CCP_V5_PT_BITWISE_XOR => "XOR",
        CCP_V5_PT_BITWISE_MASK => "MASK",
        _ => "<INVALID>",
    }
}

impl fmt::Display for CcpReq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let engine = self.engine();
        let func = self.dw0.function();
        write!(f, "{} dw0={:#010x}", engine, self.dw0.0)?;
        match engine {
            CcpEngine::Aes => {
                let aes = AesFunction(func);
                write!(
                    f,
                    " (type={} mode={} encrypt={} size={})",
                    aes_type_str(aes.aes_type()),
                    aes_mode_str(aes.mode()),
                    aes.encrypt() as u8,
                    aes.size()
                )?;
            }
            CcpEngine::Sha => {
                let sha = ShaFunction(func);
                write!(
                    f,
                    " (sha_type={} init={} eom={})",
                    sha.sha_type(),
                    self.dw0.init() as u8,
                    self.dw0.eom() as u8
                )?;
            }
            CcpEngine::Rsa => {
                let rsa = RsaFunction(func);
                write!(f, " (mode={} size={})", rsa.mode(), rsa.size())?;
            }
            CcpEngine::Passthru => {
                let pt = PassthruFunction(func);
                write!(
                    f,
                    " (byteswap={} bitwise={} reflect={})",
                    byteswap_str(pt.byteswap()),
                    bitwise_str(pt.bitwise()),
                    pt.reflect()
                )?;
            }
            CcpEngine::Ecc => {
                let ecc = EccFunction(func);
                write!(f, " (op={} bits={})", ecc.op(), ecc.bit_count())?;
            }
            _ => {}
        }
        write!(
            f,
            " cb_src={} src={:#x} src_mem=(type={} ctx={} fixed={})",
            self.cb_src,
            self.src_addr,
            self.src_mem.mem_type(),
            self.src_mem.lsb_ctx_id(),
            self.src_mem.fixed() as u8
        )?;
        if engine == CcpEngine::Sha {
            write!(f, " sha_bits={}", self.sha_bits)?;
        } else {
            write!(
                f,
                " dst={:#x} dst_mem=(type={} fixed={})",
                self.dst_addr,
                self.dst_mem.mem_type(),
                self.dst_mem.fixed() as u8
            )?;
        }
        write!(
            f,
            " key={:#x} key_mem=(type={})",
            self.key_addr,
            self.key_mem.mem_type()
        )
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    xfer.rs

Abstract:

    File contains the data transfer machinery of the CCP: the address space
    gateway selecting between system memory, the local storage buffer and
    the PSP visible address space, and the stateful transfer context engines
    drive their reads and writes through.

--*/

use super::lsb::{CcpLsb, CCP_V5_LSB_SLOT_SIZE};
use super::req::{
    CcpReq, CCP_V5_MEM_TYPE_LOCAL, CCP_V5_MEM_TYPE_SB, CCP_V5_MEM_TYPE_SYSTEM,
};
use super::CcpError;
use psp_emu_bus::IoMgr;
use psp_emu_types::{CcpAddr, PspAddr};
use std::cell::RefCell;
use std::rc::Rc;

/// Memory shared by all transfer paths: the LSB, the external I/O manager
/// and the written-bytes counter surfaced through the secondary MMIO
/// window.
pub(crate) struct CcpMem {
    pub lsb: CcpLsb,
    pub iomgr: Rc<RefCell<dyn IoMgr>>,
    pub cb_written_last: u32,
}

/// Address space selector of one transfer endpoint
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum MemGateway {
    /// Host physical memory. Not modeled; accesses fail.
    System,
    /// Local storage buffer
    Sb,
    /// PSP visible address space, routed through the I/O manager
    Local,
}

impl MemGateway {
    pub fn from_code(code: u16) -> Result<Self, CcpError> {
        match code {
            CCP_V5_MEM_TYPE_SYSTEM => Ok(Self::System),
            CCP_V5_MEM_TYPE_SB => Ok(Self::Sb),
            CCP_V5_MEM_TYPE_LOCAL => Ok(Self::Local),
            _ => Err(CcpError::DecodeError),
        }
    }

    pub fn read(&self, mem: &mut CcpMem, addr: CcpAddr, buf: &mut [u8]) -> Result<(), CcpError> {
        match self {
            Self::System => Err(CcpError::Unsupported),
            Self::Sb => mem.lsb.read(addr, buf),
            Self::Local => mem
                .iomgr
                .borrow_mut()
                .psp_read(addr as PspAddr, buf)
                .map_err(|_| CcpError::EngineError),
        }
    }

    pub fn write(&self, mem: &mut CcpMem, addr: CcpAddr, buf: &[u8]) -> Result<(), CcpError> {
        match self {
            Self::System => Err(CcpError::Unsupported),
            Self::Sb => mem.lsb.write(addr, buf),
            Self::Local => {
                mem.iomgr
                    .borrow_mut()
                    .psp_write(addr as PspAddr, buf)
                    .map_err(|_| CcpError::EngineError)?;
                mem.cb_written_last = mem.cb_written_last.wrapping_add(buf.len() as u32);
                Ok(())
            }
        }
    }
}

/// A transfer context: the source and destination cursors of one request.
pub(crate) struct XferCtx {
    src: MemGateway,
    src_addr: CcpAddr,
    read_left: u64,
    dst: MemGateway,
    dst_addr: CcpAddr,
    write_left: u64,
    write_rev: bool,
}

impl XferCtx {
    /// Initialize a transfer context from a request.
    ///
    /// # Arguments
    ///
    /// * `mem` - Transfer memory (resets the written-bytes counter)
    /// * `req` - The request to take addresses and memory types from
    /// * `sha` - Whether this context is for the SHA engine, which always
    ///   writes to the LSB slot named by the source selector
    /// * `cb_write` - Total amount of bytes the engine will write
    /// * `write_rev` - Whether writes proceed downward; the destination is
    ///   pre-biased by `cb_write`
    pub fn init(
        mem: &mut CcpMem,
        req: &CcpReq,
        sha: bool,
        cb_write: u64,
        write_rev: bool,
    ) -> Result<Self, CcpError> {
        mem.cb_written_last = 0;

        let src = MemGateway::from_code(req.src_mem.mem_type())?;
        let (dst, dst_addr) = if sha {
            let slot = req.src_mem.lsb_ctx_id() as CcpAddr;
            (MemGateway::Sb, slot * CCP_V5_LSB_SLOT_SIZE as CcpAddr)
        } else {
            (MemGateway::from_code(req.dst_mem.mem_type())?, req.dst_addr)
        };

        let mut ctx = Self {
            src,
            src_addr: req.src_addr,
            read_left: req.cb_src as u64,
            dst,
            dst_addr,
            write_left: cb_write,
            write_rev,
        };
        if ctx.write_rev {
            ctx.dst_addr += ctx.write_left;
        }
        Ok(ctx)
    }

    /// Read exactly `buf.len()` bytes from the source. Fails without
    /// progress if fewer remain.
    pub fn read(&mut self, mem: &mut CcpMem, buf: &mut [u8]) -> Result<(), CcpError> {
        if (buf.len() as u64) > self.read_left {
            return Err(CcpError::OutOfRange);
        }
        self.read_upto(mem, buf).map(|_| ())
    }

    /// Read up to `buf.len()` bytes from the source, returning how many were
    /// actually read. Fails if the source is exhausted.
    pub fn read_upto(&mut self, mem: &mut CcpMem, buf: &mut [u8]) -> Result<usize, CcpError> {
        let cb_this = (buf.len() as u64).min(self.read_left) as usize;
        if cb_this == 0 {
            return Err(CcpError::OutOfRange);
        }
        self.do_read(mem, &mut buf[..cb_this])?;
        Ok(cb_this)
    }

    /// Write all of `buf` to the destination. Fails without progress if the
    /// remaining budget is smaller.
    pub fn write(&mut self, mem: &mut CcpMem, buf: &[u8]) -> Result<(), CcpError> {
        if (buf.len() as u64) > self.write_left {
            return Err(CcpError::OutOfRange);
        }
        self.write_upto(mem, buf).map(|_| ())
    }

    /// Write up to `buf.len()` bytes to the destination, returning how many
    /// were actually written. Fails if the destination is exhausted.
    pub fn write_upto(&mut self, mem: &mut CcpMem, buf: &[u8]) -> Result<usize, CcpError> {
        let cb_this = (buf.len() as u64).min(self.write_left) as usize;
        if cb_this == 0 {
            return Err(CcpError::OutOfRange);
        }
        self.do_write(mem, &buf[..cb_this])?;
        Ok(cb_this)
    }

    fn do_read(&mut self, mem: &mut CcpMem, buf: &mut [u8]) -> Result<(), CcpError> {
        self.src.read(mem, self.src_addr, buf)?;
        self.read_left -= buf.len() as u64;
        self.src_addr += buf.len() as CcpAddr;
        Ok(())
    }

    fn do_write(&mut self, mem: &mut CcpMem, buf: &[u8]) -> Result<(), CcpError> {
        if self.write_rev {
            // Single byte writes going downward from the pre-biased top.
            for b in buf {
                self.dst_addr -= 1;
                self.dst.write(mem, self.dst_addr, core::slice::from_ref(b))?;
            }
        } else {
            self.dst.write(mem, self.dst_addr, buf)?;
            self.dst_addr += buf.len() as CcpAddr;
        }
        self.write_left -= buf.len() as u64;
        Ok(())
    }
}

/// Copy the key material a request points at into `key`. Keys come from
/// LOCAL or SB memory; any other source leaves the buffer untouched.
pub(crate) fn key_copy_from_req(
    mem: &mut CcpMem,
    req: &CcpReq,
    key: &mut [u8],
) -> Result<(), CcpError> {
    match req.key_mem.mem_type() {
        CCP_V5_MEM_TYPE_LOCAL => MemGateway::Local.read(mem, req.key_addr, key),
        CCP_V5_MEM_TYPE_SB => mem.lsb.read(req.key_addr, key),
        _ => Ok(()),
    }
}

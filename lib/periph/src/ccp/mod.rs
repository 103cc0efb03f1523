/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains the CCPv5 device: the per-queue run/halt state machine,
    the two MMIO windows firmware drives it through and the dispatch into
    the engine back-ends.

--*/

mod aes;
mod ecc;
pub mod lsb;
mod passthru;
mod proxy;
pub mod req;
mod rsa;
mod sha;
mod xfer;
mod zlib;

pub use lsb::CcpLsb;
pub use proxy::CcpProxy;

use crate::ccp::req::{CcpEngine, CcpReq, CCP_V5_REQ_SIZE};
use crate::ccp::xfer::CcpMem;
use log::{debug, error, warn};
use psp_emu_bus::{BusError, IoMgr, IrqController, ReadWriteRegister};
use psp_emu_crypto::{AesCipher, CryptoError, Inflate, Sha};
use psp_emu_types::{PspAddr, PspData, PspSize};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::register_bitfields;

/// Base address of the primary MMIO region (global + queue registers)
pub const CCP_V5_MMIO_ADDR: PspAddr = 0x0300_0000;

/// Offset of the first queue register window inside the primary region
pub const CCP_V5_Q_OFFSET: PspAddr = 0x1000;

/// Stride of one queue register window
pub const CCP_V5_Q_SIZE: PspAddr = 0x1000;

/// Number of request queues
pub const CCP_V5_NUM_QUEUES: usize = 2;

/// Size of the primary MMIO region
pub const CCP_V5_MMIO_SIZE: PspAddr =
    CCP_V5_Q_OFFSET + CCP_V5_NUM_QUEUES as PspAddr * CCP_V5_Q_SIZE;

/// Base address of the secondary MMIO region
pub const CCP_V5_MMIO2_ADDR: PspAddr = 0x0300_6000;

/// Size of the secondary MMIO region
pub const CCP_V5_MMIO2_SIZE: PspAddr = 0x40;

/// Per-queue register offsets
pub const CCP_V5_Q_REG_CTRL: PspAddr = 0x00;
pub const CCP_V5_Q_REG_TAIL: PspAddr = 0x04;
pub const CCP_V5_Q_REG_HEAD: PspAddr = 0x08;
pub const CCP_V5_Q_REG_IEN: PspAddr = 0x0C;
pub const CCP_V5_Q_REG_ISTS: PspAddr = 0x10;
pub const CCP_V5_Q_REG_STATUS: PspAddr = 0x100;

/// Queue status outcome codes (low 6 bits of the status register)
pub const CCP_V5_STATUS_SUCCESS: u32 = 0;
pub const CCP_V5_STATUS_ERROR: u32 = 1;
pub const CCP_V5_STATUS_MASK: u32 = 0x3F;

/// Secondary region: size of the last transfer into local PSP memory
const CCP_V5_MMIO2_REG_XFER_SIZE: PspAddr = 0x28;
/// Secondary region: ready bit polled by the on chip bootloader
const CCP_V5_MMIO2_REG_READY: PspAddr = 0x38;

const CCP_V5_IRQ_PRIO: u32 = 0;
const CCP_V5_IRQ_DEV_ID: u32 = 0x15;

register_bitfields! [
    u32,

    /// Queue Control Register Fields
    QCtrl [
        RUN OFFSET(0) NUMBITS(1) [],
        HALT OFFSET(1) NUMBITS(1) [],
        QSIZE OFFSET(3) NUMBITS(5) [],
    ],

    /// Queue Interrupt Register Fields (enable and status share the layout)
    QInt [
        COMPLETION OFFSET(0) NUMBITS(1) [],
        ERROR OFFSET(1) NUMBITS(1) [],
        Q_STOP OFFSET(2) NUMBITS(1) [],
        Q_EMPTY OFFSET(3) NUMBITS(1) [],
    ],
];

/// Errors produced by request processing, collapsed into the queue status.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CcpError {
    /// LSB or transfer bounds violated
    #[error("address out of range")]
    OutOfRange,

    /// A parameter combination this core does not emulate
    #[error("not implemented")]
    NotImplemented,

    /// Memory type SYSTEM referenced (host memory is not modeled)
    #[error("unsupported memory type")]
    Unsupported,

    /// An underlying crypto/zlib/bignum back-end or PSP memory access failed
    #[error("engine back-end failed")]
    EngineError,

    /// The proxy call failed or the remote device reported an error
    #[error("proxy request failed")]
    ProxyError,

    /// Unknown engine, function or memory type code
    #[error("malformed request descriptor")]
    DecodeError,
}

impl From<CryptoError> for CcpError {
    fn from(_: CryptoError) -> Self {
        CcpError::EngineError
    }
}

struct CcpQueue {
    ctrl: ReadWriteRegister<u32, QCtrl::Register>,
    tail: PspData,
    head: PspData,
    status: PspData,
    ien: ReadWriteRegister<u32, QInt::Register>,
    ists: ReadWriteRegister<u32, QInt::Register>,
    /// Tracks the last observed state of the run bit, which itself never
    /// reads back as set.
    enabled: bool,
}

impl CcpQueue {
    fn new() -> Self {
        Self {
            ctrl: ReadWriteRegister::new(QCtrl::HALT::SET.value),
            tail: 0,
            head: 0,
            status: CCP_V5_STATUS_SUCCESS,
            ien: ReadWriteRegister::new(0),
            ists: ReadWriteRegister::new(0),
            enabled: false,
        }
    }
}

/// CCPv5 device instance
pub struct CcpV5 {
    pub(crate) mem: CcpMem,
    queues: [CcpQueue; CCP_V5_NUM_QUEUES],
    irq: Rc<RefCell<dyn IrqController>>,
    pub(crate) sha: Option<Sha>,
    pub(crate) aes: Option<AesCipher>,
    pub(crate) zlib: Option<Inflate>,
    pub(crate) proxy: Option<Box<dyn CcpProxy>>,
}

impl CcpV5 {
    /// Create a new CCP instance
    ///
    /// # Arguments
    ///
    /// * `iomgr` - I/O manager owning the PSP visible address space
    /// * `irq` - Interrupt controller the device signals completions on
    pub fn new(iomgr: Rc<RefCell<dyn IoMgr>>, irq: Rc<RefCell<dyn IrqController>>) -> Self {
        Self {
            mem: CcpMem {
                lsb: CcpLsb::new(),
                iomgr,
                cb_written_last: 0,
            },
            queues: [CcpQueue::new(), CcpQueue::new()],
            irq,
            sha: None,
            aes: None,
            zlib: None,
            proxy: None,
        }
    }

    /// Configure the forwarder used for protected key AES requests
    pub fn set_proxy(&mut self, proxy: Box<dyn CcpProxy>) {
        self.proxy = Some(proxy);
    }

    /// Local storage buffer
    pub fn lsb(&self) -> &CcpLsb {
        &self.mem.lsb
    }

    pub fn lsb_mut(&mut self) -> &mut CcpLsb {
        &mut self.mem.lsb
    }

    /// Number of bytes the last transfer wrote into local PSP memory
    pub fn last_write_size(&self) -> u32 {
        self.mem.cb_written_last
    }

    /// Read handler of the primary MMIO region. The returned value is the
    /// register content before any deferred queue work runs.
    pub fn mmio_read(&mut self, size: PspSize, off: PspAddr) -> Result<PspData, BusError> {
        if size != PspSize::Word {
            warn!("CCP: unsupported MMIO read width {} at {:#x}", size, off);
            return Err(BusError::LoadAccessFault);
        }

        if off < CCP_V5_Q_OFFSET {
            // Global registers are not modeled.
            return Ok(0);
        }

        let off = off - CCP_V5_Q_OFFSET;
        let queue = (off / CCP_V5_Q_SIZE) as usize;
        let reg = off % CCP_V5_Q_SIZE;
        if queue >= self.queues.len() {
            warn!("CCP: MMIO read from invalid queue {queue}");
            return Ok(0);
        }

        let val = self.queue_reg_read(queue, reg);

        // Deferred execution: requests run when firmware polls a queue
        // register, not when the run bit lands. Executing on the run write
        // lets DMA clobber stack frames the caller still depends on; the
        // real device is asynchronous and the store returns first.
        self.queue_run_maybe(queue);
        Ok(val)
    }

    /// Write handler of the primary MMIO region
    pub fn mmio_write(&mut self, size: PspSize, off: PspAddr, val: PspData) -> Result<(), BusError> {
        if size != PspSize::Word {
            warn!("CCP: unsupported MMIO write width {} at {:#x}", size, off);
            return Err(BusError::StoreAccessFault);
        }

        if off < CCP_V5_Q_OFFSET {
            // Global registers are not modeled.
            return Ok(());
        }

        let off = off - CCP_V5_Q_OFFSET;
        let queue = (off / CCP_V5_Q_SIZE) as usize;
        let reg = off % CCP_V5_Q_SIZE;
        if queue >= self.queues.len() {
            warn!("CCP: MMIO write to invalid queue {queue}");
            return Ok(());
        }

        self.queue_reg_write(queue, reg, val);

        // Only run the queue when at least one interrupt is enabled; see
        // mmio_read() for why the run write itself must not execute
        // requests.
        if self.queues[queue].ien.reg.get() != 0 {
            self.queue_run_maybe(queue);
        }
        Ok(())
    }

    /// Read handler of the secondary MMIO region
    pub fn mmio2_read(&mut self, size: PspSize, off: PspAddr) -> Result<PspData, BusError> {
        if size != PspSize::Word {
            warn!("CCP: unsupported MMIO read width {} at {:#x}", size, off);
            return Err(BusError::LoadAccessFault);
        }

        match off {
            // Transfer size of the last operation; Zen2 firmware reads the
            // decompressed size here after a zlib request.
            CCP_V5_MMIO2_REG_XFER_SIZE => Ok(self.mem.cb_written_last),
            // The Zen1 on chip bootloader waits for bit 0 to become 1.
            CCP_V5_MMIO2_REG_READY => Ok(0x1),
            _ => Ok(0),
        }
    }

    fn queue_reg_read(&self, queue: usize, reg: PspAddr) -> PspData {
        let q = &self.queues[queue];
        match reg {
            CCP_V5_Q_REG_CTRL => q.ctrl.reg.get(),
            CCP_V5_Q_REG_TAIL => q.tail,
            CCP_V5_Q_REG_HEAD => q.head,
            CCP_V5_Q_REG_STATUS => q.status,
            CCP_V5_Q_REG_IEN => q.ien.reg.get(),
            CCP_V5_Q_REG_ISTS => q.ists.reg.get(),
            _ => 0,
        }
    }

    fn queue_reg_write(&mut self, queue: usize, reg: PspAddr, val: PspData) {
        match reg {
            CCP_V5_Q_REG_CTRL => {
                let q = &mut self.queues[queue];
                q.enabled = val & QCtrl::RUN::SET.value != 0;
                // The run bit never reads back as set.
                q.ctrl.reg.set(val & !QCtrl::RUN::SET.value);
            }
            CCP_V5_Q_REG_TAIL => self.queues[queue].tail = val,
            CCP_V5_Q_REG_HEAD => self.queues[queue].head = val,
            CCP_V5_Q_REG_STATUS => self.queues[queue].status = val,
            CCP_V5_Q_REG_IEN => self.queues[queue].ien.reg.set(val),
            CCP_V5_Q_REG_ISTS => {
                // Set bits clear the corresponding interrupt.
                let q = &mut self.queues[queue];
                q.ists.reg.set(q.ists.reg.get() & !val);

                // Drop the line once nothing enabled is pending anymore.
                if q.ien.reg.get() & q.ists.reg.get() == 0 {
                    self.irq
                        .borrow_mut()
                        .irq_set(CCP_V5_IRQ_PRIO, CCP_V5_IRQ_DEV_ID, false);
                }
            }
            _ => {}
        }
    }

    /// Drain the queue while it is enabled: process descriptors from head
    /// to tail, stop on the first failure, then halt and signal.
    fn queue_run_maybe(&mut self, queue: usize) {
        if !self.queues[queue].enabled {
            return;
        }

        self.queues[queue].ctrl.reg.modify(QCtrl::HALT::CLEAR);

        let tail = self.queues[queue].tail;
        let mut head = self.queues[queue].head;

        while head != tail {
            // The hardware wraps the head at the ring size bound; modeling
            // that has broken every bootloader stage tried so far, so
            // descriptors are consumed linearly.
            let mut raw = [0u8; CCP_V5_REQ_SIZE];
            let read = self.mem.iomgr.borrow_mut().psp_read(head, &mut raw);
            if read.is_err() {
                error!("CCP: failed to read request descriptor at {head:#010x}");
                self.queue_fault(queue);
                break;
            }

            let req = CcpReq::parse(&raw);
            debug!("CCP request {head:#010x}: {req}");

            match self.req_process(&req) {
                Ok(()) => {
                    let q = &mut self.queues[queue];
                    q.status = CCP_V5_STATUS_SUCCESS;
                    q.ists.reg.modify(QInt::COMPLETION::SET);
                    head += CCP_V5_REQ_SIZE as PspData;
                }
                Err(err) => {
                    error!("CCP: {} request failed: {err}", req.engine());
                    // Error paths leave no half-open session behind.
                    self.reset_sessions();
                    self.queue_fault(queue);
                    break;
                }
            }
        }

        let pending = {
            let q = &mut self.queues[queue];
            q.head = head;
            q.ctrl.reg.modify(QCtrl::HALT::SET);
            q.ists.reg.modify(QInt::Q_STOP::SET);
            if head == tail {
                q.ists.reg.modify(QInt::Q_EMPTY::SET);
            }
            q.ien.reg.get() & q.ists.reg.get() != 0
        };

        if pending {
            self.irq
                .borrow_mut()
                .irq_set(CCP_V5_IRQ_PRIO, CCP_V5_IRQ_DEV_ID, true);
        }
    }

    fn queue_fault(&mut self, queue: usize) {
        let q = &mut self.queues[queue];
        q.status = CCP_V5_STATUS_ERROR;
        q.ists.reg.modify(QInt::ERROR::SET);
    }

    fn reset_sessions(&mut self) {
        self.sha = None;
        self.aes = None;
        self.zlib = None;
    }

    fn req_process(&mut self, req: &CcpReq) -> Result<(), CcpError> {
        match req.engine() {
            CcpEngine::Passthru => passthru::process(self, req),
            CcpEngine::Sha => sha::process(self, req),
            CcpEngine::Aes => aes::process(self, req),
            CcpEngine::ZlibDecomp => zlib::process(self, req),
            CcpEngine::Rsa => rsa::process(self, req),
            CcpEngine::Ecc => ecc::process(self, req),
            CcpEngine::XtsAes128 | CcpEngine::Des3 => {
                error!("CCP: engine {} not implemented", req.engine());
                Err(CcpError::NotImplemented)
            }
            CcpEngine::Invalid => Err(CcpError::DecodeError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::req::{CcpEngine, CCP_V5_MEM_TYPE_LOCAL};
    use super::*;
    use psp_emu_bus::{IrqLatch, Ram};

    const CTRL_RUN: u32 = 1 << 0;
    const CTRL_HALT: u32 = 1 << 1;
    const ISTS_COMPLETION: u32 = 1 << 0;
    const ISTS_Q_STOP: u32 = 1 << 2;
    const ISTS_Q_EMPTY: u32 = 1 << 3;

    const Q0: PspAddr = CCP_V5_Q_OFFSET;
    const RING: u32 = 0x800;

    fn new_dev() -> (CcpV5, Rc<RefCell<Ram>>, Rc<RefCell<IrqLatch>>) {
        let ram = Rc::new(RefCell::new(Ram::new(0x10000)));
        let irq = Rc::new(RefCell::new(IrqLatch::new()));
        let dev = CcpV5::new(ram.clone(), irq.clone());
        (dev, ram, irq)
    }

    fn passthru_desc(src: u32, dst: u32, len: u32) -> [u8; CCP_V5_REQ_SIZE] {
        let mut raw = [0u8; CCP_V5_REQ_SIZE];
        let dw0 = (CcpEngine::Passthru as u32) << 20;
        raw[0..4].copy_from_slice(&dw0.to_le_bytes());
        raw[4..8].copy_from_slice(&len.to_le_bytes());
        raw[8..12].copy_from_slice(&src.to_le_bytes());
        raw[14..16].copy_from_slice(&CCP_V5_MEM_TYPE_LOCAL.to_le_bytes());
        raw[16..20].copy_from_slice(&dst.to_le_bytes());
        raw[22..24].copy_from_slice(&CCP_V5_MEM_TYPE_LOCAL.to_le_bytes());
        raw
    }

    fn queue_descs(dev: &mut CcpV5, ram: &Rc<RefCell<Ram>>, descs: &[[u8; CCP_V5_REQ_SIZE]]) {
        for (i, desc) in descs.iter().enumerate() {
            let at = RING as usize + i * CCP_V5_REQ_SIZE;
            ram.borrow_mut().data_mut()[at..at + CCP_V5_REQ_SIZE].copy_from_slice(desc);
        }
        dev.mmio_write(PspSize::Word, Q0 + CCP_V5_Q_REG_HEAD, RING)
            .unwrap();
        dev.mmio_write(
            PspSize::Word,
            Q0 + CCP_V5_Q_REG_TAIL,
            RING + (descs.len() * CCP_V5_REQ_SIZE) as u32,
        )
        .unwrap();
        // run bit + ring size field (32 entries)
        dev.mmio_write(PspSize::Word, Q0 + CCP_V5_Q_REG_CTRL, CTRL_RUN | 4 << 3)
            .unwrap();
    }

    #[test]
    fn test_reset_state() {
        let (mut dev, _ram, _irq) = new_dev();
        assert_eq!(
            dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_CTRL).unwrap(),
            CTRL_HALT
        );
        assert_eq!(
            dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_STATUS)
                .unwrap(),
            CCP_V5_STATUS_SUCCESS
        );
        assert_eq!(dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_ISTS).unwrap(), 0);
    }

    #[test]
    fn test_access_width_rejected() {
        let (mut dev, _ram, _irq) = new_dev();
        assert_eq!(
            dev.mmio_read(PspSize::HalfWord, Q0 + CCP_V5_Q_REG_CTRL).err(),
            Some(BusError::LoadAccessFault)
        );
        assert_eq!(
            dev.mmio_write(PspSize::Byte, Q0 + CCP_V5_Q_REG_CTRL, 1).err(),
            Some(BusError::StoreAccessFault)
        );
        assert_eq!(
            dev.mmio2_read(PspSize::HalfWord, 0x28).err(),
            Some(BusError::LoadAccessFault)
        );
    }

    #[test]
    fn test_invalid_queue_reads_zero() {
        let (mut dev, _ram, _irq) = new_dev();
        let off = CCP_V5_Q_OFFSET + 2 * CCP_V5_Q_SIZE;
        assert_eq!(dev.mmio_read(PspSize::Word, off).unwrap(), 0);
        assert!(dev.mmio_write(PspSize::Word, off, 1).is_ok());
    }

    #[test]
    fn test_global_regs_read_zero() {
        let (mut dev, _ram, _irq) = new_dev();
        assert_eq!(dev.mmio_read(PspSize::Word, 0x0).unwrap(), 0);
        assert!(dev.mmio_write(PspSize::Word, 0x0, 0x1234).is_ok());
    }

    #[test]
    fn test_run_bit_never_reads_back() {
        let (mut dev, _ram, _irq) = new_dev();
        dev.mmio_write(PspSize::Word, Q0 + CCP_V5_Q_REG_CTRL, CTRL_RUN)
            .unwrap();
        let ctrl = dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_CTRL).unwrap();
        assert_eq!(ctrl & CTRL_RUN, 0);
    }

    #[test]
    fn test_deferred_execution() {
        let (mut dev, ram, _irq) = new_dev();
        ram.borrow_mut().data_mut()[0x2000..0x2004].copy_from_slice(&[1, 2, 3, 4]);
        queue_descs(&mut dev, &ram, &[passthru_desc(0x2000, 0x3000, 4)]);

        // No interrupt enabled: the run write must not have executed
        // anything yet.
        assert_eq!(&ram.borrow().data()[0x3000..0x3004], &[0, 0, 0, 0]);

        // Any queue register read kicks the deferred work off.
        dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_CTRL).unwrap();
        assert_eq!(&ram.borrow().data()[0x3000..0x3004], &[1, 2, 3, 4]);

        // Head caught up with tail, halt bit set again.
        let ctrl = dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_CTRL).unwrap();
        assert_eq!(ctrl & CTRL_HALT, CTRL_HALT);
        let head = dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_HEAD).unwrap();
        assert_eq!(head, RING + CCP_V5_REQ_SIZE as u32);
    }

    #[test]
    fn test_enabled_interrupt_triggers_execution_on_write() {
        let (mut dev, ram, irq) = new_dev();
        ram.borrow_mut().data_mut()[0x2000..0x2004].copy_from_slice(&[5, 6, 7, 8]);
        queue_descs(&mut dev, &ram, &[passthru_desc(0x2000, 0x3000, 4)]);

        // Enabling an interrupt is the other trigger.
        dev.mmio_write(PspSize::Word, Q0 + CCP_V5_Q_REG_IEN, ISTS_COMPLETION)
            .unwrap();
        assert_eq!(&ram.borrow().data()[0x3000..0x3004], &[5, 6, 7, 8]);
        assert!(irq.borrow().is_asserted());

        let ists = dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_ISTS).unwrap();
        assert_eq!(
            ists & (ISTS_COMPLETION | ISTS_Q_STOP | ISTS_Q_EMPTY),
            ISTS_COMPLETION | ISTS_Q_STOP | ISTS_Q_EMPTY
        );

        // Writing ones clears the bits and drops the line.
        dev.mmio_write(PspSize::Word, Q0 + CCP_V5_Q_REG_ISTS, ists)
            .unwrap();
        assert_eq!(dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_ISTS).unwrap(), 0);
        assert!(!irq.borrow().is_asserted());
    }

    #[test]
    fn test_error_stops_draining() {
        let (mut dev, ram, _irq) = new_dev();
        ram.borrow_mut().data_mut()[0x2000..0x2004].copy_from_slice(&[1, 2, 3, 4]);

        // Second descriptor decodes to an invalid engine; third must never
        // run.
        let mut bad = passthru_desc(0x2000, 0x3100, 4);
        bad[0..4].copy_from_slice(&(0xFu32 << 20).to_le_bytes());
        let descs = [
            passthru_desc(0x2000, 0x3000, 4),
            bad,
            passthru_desc(0x2000, 0x3200, 4),
        ];
        queue_descs(&mut dev, &ram, &descs);
        dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_CTRL).unwrap();

        assert_eq!(&ram.borrow().data()[0x3000..0x3004], &[1, 2, 3, 4]);
        assert_eq!(&ram.borrow().data()[0x3200..0x3204], &[0, 0, 0, 0]);

        // Head points at the faulting descriptor, status signals the error.
        let head = dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_HEAD).unwrap();
        assert_eq!(head, RING + CCP_V5_REQ_SIZE as u32);
        let status = dev
            .mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_STATUS)
            .unwrap();
        assert_eq!(status & CCP_V5_STATUS_MASK, CCP_V5_STATUS_ERROR);
    }

    #[test]
    fn test_mmio2() {
        let (mut dev, ram, _irq) = new_dev();
        ram.borrow_mut().data_mut()[0x2000..0x2010].fill(0xAB);
        queue_descs(&mut dev, &ram, &[passthru_desc(0x2000, 0x3000, 16)]);
        dev.mmio_read(PspSize::Word, Q0 + CCP_V5_Q_REG_CTRL).unwrap();

        assert_eq!(dev.mmio2_read(PspSize::Word, 0x28).unwrap(), 16);
        assert_eq!(dev.mmio2_read(PspSize::Word, 0x38).unwrap(), 1);
        assert_eq!(dev.mmio2_read(PspSize::Word, 0x00).unwrap(), 0);
    }
}

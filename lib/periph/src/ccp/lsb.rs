/*++

Licensed under the Apache-2.0 license.

File Name:

    lsb.rs

Abstract:

    File contains the CCP local storage buffer: 4 KiB of on-chip scratch
    memory addressable bytewise and as 128 slots of 32 bytes.

--*/

use super::CcpError;
use log::warn;
use psp_emu_types::CcpAddr;

/// Size of a single LSB slot in bytes
pub const CCP_V5_LSB_SLOT_SIZE: usize = 32;

/// Number of LSB slots
pub const CCP_V5_LSB_SLOT_COUNT: usize = 128;

/// Total LSB size in bytes
pub const CCP_V5_LSB_SIZE: usize = CCP_V5_LSB_SLOT_SIZE * CCP_V5_LSB_SLOT_COUNT;

/// CCP Local Storage Buffer
pub struct CcpLsb {
    data: [u8; CCP_V5_LSB_SIZE],
}

impl CcpLsb {
    pub fn new() -> Self {
        Self {
            data: [0; CCP_V5_LSB_SIZE],
        }
    }

    /// Read bytes from the LSB. The span must lie fully inside the buffer.
    pub fn read(&self, addr: CcpAddr, buf: &mut [u8]) -> Result<(), CcpError> {
        let range = self.span(addr, buf.len()).ok_or_else(|| {
            warn!("CCP: invalid LSB read offset={:#x} len={}", addr, buf.len());
            CcpError::OutOfRange
        })?;
        buf.copy_from_slice(&self.data[range]);
        Ok(())
    }

    /// Write bytes to the LSB. The span must lie fully inside the buffer.
    pub fn write(&mut self, addr: CcpAddr, buf: &[u8]) -> Result<(), CcpError> {
        let range = self.span(addr, buf.len()).ok_or_else(|| {
            warn!("CCP: invalid LSB write offset={:#x} len={}", addr, buf.len());
            CcpError::OutOfRange
        })?;
        self.data[range].copy_from_slice(buf);
        Ok(())
    }

    /// View of a single 32 byte slot
    pub fn slot(&self, idx: usize) -> &[u8] {
        &self.data[idx * CCP_V5_LSB_SLOT_SIZE..(idx + 1) * CCP_V5_LSB_SLOT_SIZE]
    }

    /// Mutable view of a single 32 byte slot
    pub fn slot_mut(&mut self, idx: usize) -> &mut [u8] {
        &mut self.data[idx * CCP_V5_LSB_SLOT_SIZE..(idx + 1) * CCP_V5_LSB_SLOT_SIZE]
    }

    /// Contiguous view of the whole buffer
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn span(&self, addr: CcpAddr, len: usize) -> Option<core::ops::Range<usize>> {
        if addr >= CCP_V5_LSB_SIZE as CcpAddr {
            return None;
        }
        let start = addr as usize;
        let end = start.checked_add(len)?;
        if end <= CCP_V5_LSB_SIZE {
            Some(start..end)
        } else {
            None
        }
    }
}

impl Default for CcpLsb {
    fn default() -> Self {
        Self::new()
    }
}

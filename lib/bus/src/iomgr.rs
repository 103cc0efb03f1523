/*++

Licensed under the Apache-2.0 license.

File Name:

    iomgr.rs

Abstract:

    File contains the interface to the external I/O manager owning the
    PSP visible address space (SRAM and MMIO routing).

--*/

use crate::BusError;
use psp_emu_types::PspAddr;

/// I/O manager interface for PSP address space accesses. Implemented by the
/// emulator component that owns SRAM/MMIO routing; devices only consume it.
pub trait IoMgr {
    /// Read a byte span from the PSP visible address space
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to read from
    /// * `buf` - Where to store the read data
    ///
    /// # Error
    ///
    /// * `BusError` - Exception with cause `BusError::LoadAccessFault`
    fn psp_read(&mut self, addr: PspAddr, buf: &mut [u8]) -> Result<(), BusError>;

    /// Write a byte span to the PSP visible address space
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to write to
    /// * `buf` - Data to write
    ///
    /// # Error
    ///
    /// * `BusError` - Exception with cause `BusError::StoreAccessFault`
    fn psp_write(&mut self, addr: PspAddr, buf: &[u8]) -> Result<(), BusError>;
}

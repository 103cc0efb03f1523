/*++

Licensed under the Apache-2.0 license.

File Name:

    ram.rs

Abstract:

    File contains a RAM backed I/O manager implementation.

--*/

use crate::{BusError, IoMgr};
use psp_emu_types::PspAddr;

/// RAM backed I/O manager. Models a flat PSP address space starting at
/// address zero; intended for tests and simple embedders.
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    /// Create new RAM filled with zeroes
    ///
    /// # Arguments
    ///
    /// * `size` - Size of the RAM in bytes
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Create new RAM holding the given data
    pub fn with_data(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn mmap_size(&self) -> PspAddr {
        self.data.len() as PspAddr
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn span(&self, addr: PspAddr, len: usize) -> Option<core::ops::Range<usize>> {
        let start = addr as usize;
        let end = start.checked_add(len)?;
        if end <= self.data.len() {
            Some(start..end)
        } else {
            None
        }
    }
}

impl IoMgr for Ram {
    /// Read a byte span from the RAM
    ///
    /// # Error
    ///
    /// * `BusError` - Exception with cause `BusError::LoadAccessFault`
    fn psp_read(&mut self, addr: PspAddr, buf: &mut [u8]) -> Result<(), BusError> {
        let range = self
            .span(addr, buf.len())
            .ok_or(BusError::LoadAccessFault)?;
        buf.copy_from_slice(&self.data[range]);
        Ok(())
    }

    /// Write a byte span to the RAM
    ///
    /// # Error
    ///
    /// * `BusError` - Exception with cause `BusError::StoreAccessFault`
    fn psp_write(&mut self, addr: PspAddr, buf: &[u8]) -> Result<(), BusError> {
        let range = self
            .span(addr, buf.len())
            .ok_or(BusError::StoreAccessFault)?;
        self.data[range].copy_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read() {
        let mut ram = Ram::with_data(vec![1, 2, 3, 4]);
        let mut buf = [0u8; 4];
        assert_eq!(ram.psp_read(0, &mut buf).ok(), Some(()));
        assert_eq!(buf, [1, 2, 3, 4]);

        let mut buf = [0u8; 2];
        assert_eq!(ram.psp_read(1, &mut buf).ok(), Some(()));
        assert_eq!(buf, [2, 3]);
    }

    #[test]
    fn test_read_error() {
        let mut ram = Ram::with_data(vec![1, 2, 3, 4]);
        let mut buf = [0u8; 2];
        assert_eq!(
            ram.psp_read(3, &mut buf).err(),
            Some(BusError::LoadAccessFault)
        );
        assert_eq!(
            ram.psp_read(u32::MAX, &mut buf).err(),
            Some(BusError::LoadAccessFault)
        );
    }

    #[test]
    fn test_write() {
        let mut ram = Ram::new(4);
        assert_eq!(ram.psp_write(1, &[0xAA, 0xBB]).ok(), Some(()));
        assert_eq!(ram.data(), &[0, 0xAA, 0xBB, 0]);
    }

    #[test]
    fn test_write_error() {
        let mut ram = Ram::new(4);
        assert_eq!(
            ram.psp_write(4, &[0xAA]).err(),
            Some(BusError::StoreAccessFault)
        );
    }
}

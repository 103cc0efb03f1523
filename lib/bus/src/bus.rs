/*++

Licensed under the Apache-2.0 license.

File Name:

    bus.rs

Abstract:

    File contains the bus error definitions shared by MMIO handlers and the
    I/O manager interface.

--*/

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BusError {
    /// Load address misaligned exception
    LoadAddrMisaligned,

    /// Load access fault exception
    LoadAccessFault,

    /// Store address misaligned exception
    StoreAddrMisaligned,

    /// Store access fault exception
    StoreAccessFault,
}

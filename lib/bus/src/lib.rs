/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the PSP Emulator Bus library.

--*/

mod bus;
mod iomgr;
mod irq;
mod ram;
mod register;

pub use crate::bus::BusError;
pub use crate::iomgr::IoMgr;
pub use crate::irq::{IrqController, IrqLatch};
pub use crate::ram::Ram;
pub use crate::register::ReadWriteRegister;

/*++

Licensed under the Apache-2.0 license.

File Name:

    register.rs

Abstract:

    File contains register wrapper types used by peripherals.

--*/

use tock_registers::registers::InMemoryRegister;
use tock_registers::{RegisterLongName, UIntLike};

/// Read Write Register
pub struct ReadWriteRegister<T: UIntLike, R: RegisterLongName = ()> {
    pub reg: InMemoryRegister<T, R>,
}

impl<T: UIntLike, R: RegisterLongName> ReadWriteRegister<T, R> {
    /// Create a new instance with the given reset value
    pub fn new(val: T) -> Self {
        Self {
            reg: InMemoryRegister::new(val),
        }
    }
}

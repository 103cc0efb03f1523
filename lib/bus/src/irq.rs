/*++

Licensed under the Apache-2.0 license.

File Name:

    irq.rs

Abstract:

    File contains the interrupt line interface devices use to signal the
    interrupt controller.

--*/

/// Interrupt controller interface. The CCP asserts its line with priority 0
/// and device id 0x15.
pub trait IrqController {
    /// Assert or de-assert the interrupt line of the given device
    ///
    /// # Arguments
    ///
    /// * `prio` - Interrupt priority group
    /// * `dev_id` - Device id within the priority group
    /// * `assert` - Whether the line is asserted or de-asserted
    fn irq_set(&mut self, prio: u32, dev_id: u32, assert: bool);
}

/// Interrupt sink recording the last observed line state. Useful for tests
/// and embedders without a full interrupt controller model.
#[derive(Default)]
pub struct IrqLatch {
    asserted: bool,
}

impl IrqLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the interrupt line
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }
}

impl IrqController for IrqLatch {
    fn irq_set(&mut self, _prio: u32, _dev_id: u32, assert: bool) {
        self.asserted = assert;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch() {
        let mut latch = IrqLatch::new();
        assert!(!latch.is_asserted());
        latch.irq_set(0, 0x15, true);
        assert!(latch.is_asserted());
        latch.irq_set(0, 0x15, false);
        assert!(!latch.is_asserted());
    }
}

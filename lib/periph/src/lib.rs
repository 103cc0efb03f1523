/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the PSP Emulator Peripheral library.

--*/

#[macro_use]
extern crate arrayref;

pub mod ccp;

pub use ccp::{CcpError, CcpProxy, CcpV5};

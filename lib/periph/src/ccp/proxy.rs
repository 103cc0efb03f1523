/*++

Licensed under the Apache-2.0 license.

File Name:

    proxy.rs

Abstract:

    File contains the interface to an optional real-hardware forwarder for
    AES requests whose key lives in the protected LSB range.

--*/

use super::CcpError;

/// Forwarder executing AES requests on a real CCP. Configured by the
/// embedder when a hardware link is available.
pub trait CcpProxy {
    /// Execute the AES operation described by `dw0` on the remote CCP.
    ///
    /// # Arguments
    ///
    /// * `dw0` - Raw first dword of the request descriptor
    /// * `src` - Input data
    /// * `dst` - Output buffer, same length as `src`
    /// * `key_addr` - LSB address of the key on the remote device
    /// * `iv` - Raw IV bytes for CBC requests, passed through unmodified
    ///
    /// # Returns
    ///
    /// * `u32` - The status word reported by the remote device
    fn aes_do(
        &mut self,
        dw0: u32,
        src: &[u8],
        dst: &mut [u8],
        key_addr: u32,
        iv: Option<&[u8]>,
    ) -> Result<u32, CcpError>;
}

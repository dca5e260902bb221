/*++

Licensed under the Apache-2.0 license.

File Name:

    fuse.rs

Abstract:

    File contains the fuse bank driver: raw access to the fused identity
    fields and the security lockout registers.

--*/

use bridgerom_drivers::{regs, LinkAdapter};

/// Size in bytes of the fused Secret (IMS): 280 bits.
pub const IMS_SIZE: usize = 35;

/// Raw access to the fuse array.
///
/// Fuse values are read once at trust-pipeline init and treated as
/// immutable afterward; the bank performs no caching of its own.
pub struct FuseBank<A> {
    adapter: A,
}

impl<A: LinkAdapter> FuseBank<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// True if the fuse array's ECC scan flagged an uncorrectable error.
    pub fn ecc_error(&mut self) -> bool {
        self.adapter.get_reg32(regs::FUSE_ECC_STATUS) & regs::FUSE_ECC_ERROR != 0
    }

    pub fn vid(&mut self) -> u32 {
        self.adapter.get_reg32(regs::FUSE_VID)
    }

    pub fn pid(&mut self) -> u32 {
        self.adapter.get_reg32(regs::FUSE_PID)
    }

    pub fn serial_number(&mut self) -> u64 {
        let low = self.adapter.get_reg32(regs::FUSE_SERIAL_L);
        let high = self.adapter.get_reg32(regs::FUSE_SERIAL_H);
        u64::from(low) | (u64::from(high) << 32)
    }

    /// Read the fused Secret, little-endian word by word.
    pub fn ims(&mut self) -> [u8; IMS_SIZE] {
        let mut ims = [0u8; IMS_SIZE];
        for (idx, chunk) in ims.chunks_mut(4).enumerate() {
            let word = self
                .adapter
                .get_reg32(regs::FUSE_IMS_BASE + ((idx as u32) << 2));
            chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
        }
        ims
    }

    /// Lock the secret material away before handing control to an
    /// untrusted image: disable IMS and CMS reads and the JTAG port.
    pub fn lock_secrets(&mut self) {
        self.adapter
            .put_reg32(regs::DISABLE_IMS_ACCESS, regs::DISABLE_ACCESS_VALUE);
        self.adapter
            .put_reg32(regs::DISABLE_CMS_ACCESS, regs::DISABLE_ACCESS_VALUE);
        self.adapter
            .put_reg32(regs::JTAG_DISABLE, regs::DISABLE_ACCESS_VALUE);
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    adapter.rs

Abstract:

    File contains the register/attribute adapter trait consumed by every
    driver. The platform implements it; this crate never touches hardware
    directly.

--*/

use bridgerom_error::{BridgeError, BridgeResult};

/// Scope of an attribute access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrScope {
    /// The attribute on this end of the link.
    Local,
    /// The attribute on the supervisory controller's end.
    Peer,
}

/// Completion status pair of a register/attribute access.
///
/// `local` is the status detected on this side: zero on success, a negative
/// errno-style code on failure. `peer` is the completion code the peer
/// reported for a peer-scoped access: zero on success, a positive protocol
/// code on failure (always zero for purely local accesses).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AccessStatus {
    pub local: i32,
    pub peer: u32,
}

impl AccessStatus {
    /// Both status sources report success.
    pub const OK: AccessStatus = AccessStatus { local: 0, peer: 0 };

    /// Fold the two status sources into one result: first nonzero wins,
    /// local priority. The folded code keeps its sign, so callers can
    /// still tell a local failure (negative) from a peer-reported one
    /// (positive).
    pub fn into_result(self) -> BridgeResult<()> {
        if self.local != 0 {
            return Err(BridgeError::Transport(self.local));
        }
        if self.peer != 0 {
            return Err(BridgeError::Transport(self.peer as i32));
        }
        Ok(())
    }
}

/// Platform access to the memory-mapped register space and the link's
/// attribute space.
///
/// Implementations perform the raw accesses only; they must not retry,
/// time out or reinterpret failures. All drivers in this crate serialize
/// their accesses by program order, so an adapter needs no interior
/// locking.
pub trait LinkAdapter {
    /// Read a 32-bit memory-mapped register.
    fn get_reg32(&mut self, addr: u32) -> u32;

    /// Write a 32-bit memory-mapped register.
    fn put_reg32(&mut self, addr: u32, val: u32);

    /// Read an attribute, returning the access status pair and the value.
    ///
    /// The value is meaningful only when the status folds to success.
    fn attr_read(&mut self, attr: u16, selector: u16, scope: AttrScope) -> (AccessStatus, u32);

    /// Write an attribute, returning the access status pair.
    fn attr_write(&mut self, attr: u16, val: u32, selector: u16, scope: AttrScope) -> AccessStatus;

    /// Read an attribute and fold the status pair into one result.
    fn read_attr(&mut self, attr: u16, selector: u16, scope: AttrScope) -> BridgeResult<u32> {
        let (status, value) = self.attr_read(attr, selector, scope);
        status.into_result()?;
        Ok(value)
    }

    /// Write an attribute and fold the status pair into one result.
    fn write_attr(
        &mut self,
        attr: u16,
        val: u32,
        selector: u16,
        scope: AttrScope,
    ) -> BridgeResult<()> {
        self.attr_write(attr, val, selector, scope).into_result()
    }
}

impl<T: LinkAdapter + ?Sized> LinkAdapter for &mut T {
    fn get_reg32(&mut self, addr: u32) -> u32 {
        (**self).get_reg32(addr)
    }

    fn put_reg32(&mut self, addr: u32, val: u32) {
        (**self).put_reg32(addr, val)
    }

    fn attr_read(&mut self, attr: u16, selector: u16, scope: AttrScope) -> (AccessStatus, u32) {
        (**self).attr_read(attr, selector, scope)
    }

    fn attr_write(&mut self, attr: u16, val: u32, selector: u16, scope: AttrScope) -> AccessStatus {
        (**self).attr_write(attr, val, selector, scope)
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    identity.rs

Abstract:

    File contains the fuse identity pipeline: Hamming-weight validation of
    the fused identity fields, endpoint-id derivation from the Secret, and
    publication of the validated identity attributes.

--*/

use bridgerom_drivers::{regs, AttrScope, LinkAdapter};
use bridgerom_error::{BridgeError, BridgeResult, FuseField};

use crate::fuse::{FuseBank, IMS_SIZE};

/// Count the set bits in a buffer.
pub fn popcount(buf: &[u8]) -> u32 {
    buf.iter().map(|byte| byte.count_ones()).sum()
}

/// Check a fuse field's Hamming weight.
///
/// Fused fields have two valid encodings: unset (no bits programmed) or
/// set with equal numbers of ones and zeros.
pub fn valid_hamming_weight(buf: &[u8]) -> bool {
    let count = popcount(buf);
    count == 0 || count == buf.len() as u32 * 4
}

/// Why no endpoint id was derived. Both causes are the same valid,
/// non-fatal "absent" outcome; the cause only tells observers which path
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentReason {
    /// The Secret is unprogrammed (all zero).
    Unprovisioned,
    /// The Secret failed its Hamming-weight check.
    InvalidWeight,
}

/// Device-unique endpoint identifier derived from the fused Secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointId {
    Present(u64),
    Absent(AbsentReason),
}

impl EndpointId {
    pub fn is_present(&self) -> bool {
        matches!(self, EndpointId::Present(_))
    }
}

/// Derive the endpoint id from the Secret.
///
/// The accumulator is seeded with the first 8 bytes of the Secret taken
/// little-endian, then every following 8-byte chunk is XOR-folded in, the
/// final partial chunk zero-padded.
///
/// TODO: replace the XOR fold with the production key-derivation function.
/// This is a placeholder kept bit-exact for compatibility; it is not
/// cryptographically sound and nothing may build a security claim on it.
pub fn derive_endpoint_id(ims: &[u8; IMS_SIZE]) -> EndpointId {
    if ims.iter().all(|byte| *byte == 0) {
        return EndpointId::Absent(AbsentReason::Unprovisioned);
    }

    if !valid_hamming_weight(ims) {
        log::warn!("invalid IMS");
        return EndpointId::Absent(AbsentReason::InvalidWeight);
    }

    let mut chunk = [0u8; 8];
    chunk.copy_from_slice(&ims[..8]);
    let mut id = u64::from_le_bytes(chunk);

    let mut offset = 8;
    while offset < IMS_SIZE {
        let len = core::cmp::min(8, IMS_SIZE - offset);
        let mut chunk = [0u8; 8];
        chunk[..len].copy_from_slice(&ims[offset..offset + len]);
        id ^= u64::from_le_bytes(chunk);
        offset += 8;
    }

    EndpointId::Present(id)
}

/// Validated fuse identity, as published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuseIdentity {
    pub vid: u32,
    pub pid: u32,
    pub serial_number: u64,
    pub endpoint_id: EndpointId,
}

/// Fuse identity validation and publication.
pub struct IdentityPipeline<A> {
    adapter: A,
}

impl<A: LinkAdapter> IdentityPipeline<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// Validate the fused identity fields and publish them as identity
    /// attributes.
    ///
    /// Any VID/PID/Serial integrity failure aborts the whole step before
    /// anything is published. An absent endpoint id is not an error: the
    /// identity is published without its two endpoint-id attributes.
    pub fn validate_and_publish(&mut self) -> BridgeResult<FuseIdentity> {
        let mut fuses = FuseBank::new(&mut self.adapter);

        if fuses.ecc_error() {
            log::warn!("fuse ECC error");
            return Err(BridgeError::Validation(FuseField::Ecc));
        }

        let vid = fuses.vid();
        if !valid_hamming_weight(&vid.to_le_bytes()) {
            log::warn!("invalid VID {:#010x}", vid);
            return Err(BridgeError::Validation(FuseField::Vid));
        }

        let pid = fuses.pid();
        if !valid_hamming_weight(&pid.to_le_bytes()) {
            log::warn!("invalid PID {:#010x}", pid);
            return Err(BridgeError::Validation(FuseField::Pid));
        }

        let serial_number = fuses.serial_number();
        if !valid_hamming_weight(&serial_number.to_le_bytes()) {
            log::warn!("invalid serial number {:#018x}", serial_number);
            return Err(BridgeError::Validation(FuseField::SerialNumber));
        }

        let endpoint_id = derive_endpoint_id(&fuses.ims());

        let identity = FuseIdentity {
            vid,
            pid,
            serial_number,
            endpoint_id,
        };
        self.publish(&identity)?;
        Ok(identity)
    }

    fn publish(&mut self, identity: &FuseIdentity) -> BridgeResult<()> {
        self.publish_attr(regs::DME_VID, identity.vid)?;
        self.publish_attr(regs::DME_PID, identity.pid)?;
        self.publish_attr(regs::DME_SERIAL_L, identity.serial_number as u32)?;
        self.publish_attr(regs::DME_SERIAL_H, (identity.serial_number >> 32) as u32)?;

        if let EndpointId::Present(endpoint_id) = identity.endpoint_id {
            self.publish_attr(regs::DME_ENDPOINT_ID_L, endpoint_id as u32)?;
            self.publish_attr(regs::DME_ENDPOINT_ID_H, (endpoint_id >> 32) as u32)?;
        }

        log::debug!("fuse identity published");
        Ok(())
    }

    fn publish_attr(&mut self, attr: u16, val: u32) -> BridgeResult<()> {
        self.adapter.write_attr(attr, val, 0, AttrScope::Local)
    }
}

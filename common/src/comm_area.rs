/*++

Licensed under the Apache-2.0 license.

File Name:

    comm_area.rs

Abstract:

    File contains the communication area: the byte-exact record handed from
    the earliest boot stage to the next within one power-on session.

--*/

use zerocopy::{AsBytes, FromBytes, FromZeroes};

use crate::{Digest, DIGEST_SIZE, KEY_NAME_SIZE};

/// Cross-stage communication area.
///
/// Written exactly once, by the earliest boot stage after a successful
/// signature verification; the next stage reads the verified digest and
/// validating key name as already-trusted facts instead of re-verifying.
/// Lives only for the current power-on session.
#[repr(C)]
#[derive(AsBytes, FromBytes, FromZeroes, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommunicationArea {
    firmware_digest: [u8; DIGEST_SIZE],
    validation_key_name: [u8; KEY_NAME_SIZE],
}

impl Default for CommunicationArea {
    fn default() -> Self {
        Self::new_zeroed()
    }
}

impl CommunicationArea {
    /// Record the verified digest and the name of the key that verified it.
    pub fn record(&mut self, digest: &Digest, key_name: &[u8; KEY_NAME_SIZE]) {
        self.firmware_digest = *digest;
        self.validation_key_name = *key_name;
    }

    /// Digest of the verified next-stage image.
    pub fn firmware_digest(&self) -> &Digest {
        &self.firmware_digest
    }

    /// Full-width, null-padded name of the key that verified the image.
    pub fn validation_key_name(&self) -> &[u8; KEY_NAME_SIZE] {
        &self.validation_key_name
    }
}

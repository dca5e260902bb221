/*++

Licensed under the Apache-2.0 license.

File Name:

    verify.rs

Abstract:

    File contains signature verification against the public key ring: the
    boot-stage verifier (revocation-aware, records its result for the next
    stage) and the next-stage verifier (trusts a pre-filtered ring).

--*/

use bridgerom_common::{CommunicationArea, Digest, KEY_NAME_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
use bridgerom_error::{BridgeError, BridgeResult, IntegrityCause};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

use crate::crypto::CryptoProvider;

/// One entry of the public key ring. The ring is static and read-only at
/// verification time.
#[derive(Clone, Copy)]
pub struct PublicKey {
    /// Algorithm tag; must match the signature record's.
    pub key_type: u8,
    /// Full-width, null-padded key name.
    pub name: [u8; KEY_NAME_SIZE],
    /// RSA-2048 modulus bytes.
    pub key: [u8; PUBLIC_KEY_SIZE],
    /// Revoked keys are skipped by the boot-stage verifier even when they
    /// would otherwise match.
    pub revoked: bool,
}

/// Signature record as carried by an image header, byte-exact.
#[repr(C)]
#[derive(AsBytes, FromBytes, FromZeroes, Clone, Copy)]
pub struct SignatureRecord {
    /// Algorithm tag.
    pub sig_type: u8,
    /// Full-width, null-padded name of the signing key.
    pub key_name: [u8; KEY_NAME_SIZE],
    /// Raw signature bytes, sized for the algorithm.
    pub signature: [u8; SIGNATURE_SIZE],
}

/// Null-pad a short name to the fixed key-name width. Names longer than
/// the width are truncated.
pub fn key_name(name: &[u8]) -> [u8; KEY_NAME_SIZE] {
    let mut padded = [0u8; KEY_NAME_SIZE];
    let len = core::cmp::min(name.len(), KEY_NAME_SIZE);
    padded[..len].copy_from_slice(&name[..len]);
    padded
}

/// Scan the ring for a key matching the signature record.
///
/// The name comparison is over the full padded width, so names differing
/// only in their padding never match.
fn find_key<'a>(
    keys: &'a [PublicKey],
    signature: &SignatureRecord,
    check_revocation: bool,
) -> Option<&'a PublicKey> {
    for (idx, key) in keys.iter().enumerate() {
        if check_revocation && key.revoked {
            log::debug!("key {} revoked", idx);
            continue;
        }

        if key.key_type != signature.sig_type {
            continue;
        }

        if key.name == signature.key_name {
            log::debug!("found pub. key {}", idx);
            return Some(key);
        }
    }

    log::debug!("failed to find pub. key");
    None
}

/// Earliest-stage signature verifier.
///
/// Skips revoked ring entries (a revoked key must never reach the
/// verification primitive) and, on success, persists the verified digest
/// and key name into the communication area for the next stage to trust
/// without re-verifying.
pub struct BootVerifier<'a, P> {
    provider: P,
    keys: &'a [PublicKey],
}

impl<'a, P: CryptoProvider> BootVerifier<'a, P> {
    pub fn new(provider: P, keys: &'a [PublicKey]) -> Self {
        Self { provider, keys }
    }

    /// Verify `signature` over `digest`, failing closed.
    pub fn verify(
        &mut self,
        digest: &Digest,
        signature: &SignatureRecord,
        comm_area: &mut CommunicationArea,
    ) -> BridgeResult<()> {
        let key = find_key(self.keys, signature, true)
            .ok_or(BridgeError::Integrity(IntegrityCause::KeyNotFound))?;

        if !self.provider.verify(digest, &signature.signature, &key.key) {
            log::warn!("signature failed");
            return Err(BridgeError::Integrity(IntegrityCause::BadSignature));
        }

        comm_area.record(digest, &signature.key_name);
        log::info!("signature verified");
        Ok(())
    }
}

/// Later-stage signature verifier.
///
/// The ring it is composed with was assembled by an earlier, already
/// verified stage, so it is trusted as pre-filtered: no revocation check,
/// and nothing is recorded.
pub struct NextStageVerifier<'a, P> {
    provider: P,
    keys: &'a [PublicKey],
}

impl<'a, P: CryptoProvider> NextStageVerifier<'a, P> {
    pub fn new(provider: P, keys: &'a [PublicKey]) -> Self {
        Self { provider, keys }
    }

    /// Verify `signature` over `digest`, failing closed.
    pub fn verify(&mut self, digest: &Digest, signature: &SignatureRecord) -> BridgeResult<()> {
        let key = find_key(self.keys, signature, false)
            .ok_or(BridgeError::Integrity(IntegrityCause::KeyNotFound))?;

        if !self.provider.verify(digest, &signature.signature, &key.key) {
            log::warn!("signature failed");
            return Err(BridgeError::Integrity(IntegrityCause::BadSignature));
        }

        log::info!("signature verified");
        Ok(())
    }
}

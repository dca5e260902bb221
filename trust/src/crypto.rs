/*++

Licensed under the Apache-2.0 license.

File Name:

    crypto.rs

Abstract:

    File contains the crypto provider interface: the four primitive
    capability slots the trust pipeline is built on.

--*/

use bridgerom_common::{Digest, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

/// Provider of the four cryptographic capability slots.
///
/// The earliest boot stage composes one provider at startup and threads it
/// through every verification call; later stages resolve the same slots
/// from their environment. The provider is resolved exactly once and is
/// never swapped or re-registered after composition.
///
/// The hash slots form one streaming SHA-256 context: `hash_init` opens
/// it, `hash_process` feeds it a byte, `hash_finalize` closes it and
/// yields the digest.
pub trait CryptoProvider {
    /// Initialize the streaming hash context.
    fn hash_init(&mut self);

    /// Add one byte to the hash.
    fn hash_process(&mut self, byte: u8);

    /// Finalize the hash and return the digest, discarding the context.
    fn hash_finalize(&mut self) -> Digest;

    /// Verify `signature` over `digest` with the given public key.
    fn verify(
        &mut self,
        digest: &Digest,
        signature: &[u8; SIGNATURE_SIZE],
        key: &[u8; PUBLIC_KEY_SIZE],
    ) -> bool;

    /// Add a run of bytes to the hash, one byte at a time.
    fn hash_update(&mut self, data: &[u8]) {
        for byte in data {
            self.hash_process(*byte);
        }
    }
}

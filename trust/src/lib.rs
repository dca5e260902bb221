/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the bridgerom trust pipeline: fuse-derived
    identity validation, streaming hash and signature verification gating
    what the link layer may advertise as ready.

--*/

#![cfg_attr(not(test), no_std)]

mod crypto;
mod fuse;
mod identity;
mod verify;

cfg_if::cfg_if! {
    if #[cfg(feature = "no-crypto")] {
        mod no_crypto;

        pub use no_crypto::{NoCryptoVerifier, NO_CRYPTO_KEY_NAME};
    }
}

pub use bridgerom_common::{Digest, DIGEST_SIZE, KEY_NAME_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
pub use crypto::CryptoProvider;
pub use fuse::{FuseBank, IMS_SIZE};
pub use identity::{
    derive_endpoint_id, popcount, valid_hamming_weight, AbsentReason, EndpointId, FuseIdentity,
    IdentityPipeline,
};
pub use verify::{key_name, BootVerifier, NextStageVerifier, PublicKey, SignatureRecord};

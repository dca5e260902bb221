/*++

Licensed under the Apache-2.0 license.

File Name:

    no_crypto.rs

Abstract:

    File contains the no-crypto verifier: a build-time test configuration
    replacing signature verification with a fixed sentinel key-name
    comparison. Selected only by the `no-crypto` cargo feature; it must
    never ship enabled.

--*/

use bridgerom_common::Digest;
use bridgerom_error::{BridgeError, BridgeResult, IntegrityCause};

use crate::verify::{key_name, SignatureRecord};

/// The only key name the no-crypto verifier accepts.
pub const NO_CRYPTO_KEY_NAME: &[u8] = b"no-crypto-test-key";

/// Stand-in verifier for builds without the math library: a signature
/// record verifies exactly when its key name equals the sentinel, leaving
/// both the success and the failure paths exercisable.
pub struct NoCryptoVerifier;

impl NoCryptoVerifier {
    pub fn verify(&mut self, _digest: &Digest, signature: &SignatureRecord) -> BridgeResult<()> {
        if signature.key_name != key_name(NO_CRYPTO_KEY_NAME) {
            return Err(BridgeError::Integrity(IntegrityCause::BadSignature));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgerom_common::{DIGEST_SIZE, SIGNATURE_SIZE};

    #[test]
    fn test_only_the_sentinel_name_verifies() {
        let mut verifier = NoCryptoVerifier;
        let digest = [0; DIGEST_SIZE];

        let sentinel = SignatureRecord {
            sig_type: 1,
            key_name: key_name(NO_CRYPTO_KEY_NAME),
            signature: [0; SIGNATURE_SIZE],
        };
        assert_eq!(verifier.verify(&digest, &sentinel), Ok(()));

        let other = SignatureRecord {
            sig_type: 1,
            key_name: key_name(b"k1"),
            signature: [0; SIGNATURE_SIZE],
        };
        assert_eq!(
            verifier.verify(&digest, &other),
            Err(BridgeError::Integrity(IntegrityCause::BadSignature))
        );
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the error taxonomy shared by all bridgerom crates.

--*/

#![cfg_attr(not(test), no_std)]

/// Result type used throughout the bridgerom crates.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Fuse field that failed an integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuseField {
    /// The fuse array's ECC scan reported an uncorrectable error.
    Ecc,
    Vid,
    Pid,
    SerialNumber,
}

/// Mailbox protocol conventions the peer (or the local side) violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// The raw mailbox value exceeded the 16-bit protocol width.
    SizeViolation,
    /// A static-assignment handshake carried a value other than id + 1.
    UnexpectedAssignment,
}

/// Why signature verification failed closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityCause {
    /// No non-revoked key in the ring matched the signature record.
    KeyNotFound,
    /// The verification primitive rejected the signature.
    BadSignature,
}

/// Per-channel transport attribute that could not be cleared during reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CportAttr {
    ConnectionState,
    LocalBufferSpace,
    PeerBufferSpace,
    CreditsToSend,
}

/// Error type shared by all bridgerom crates.
///
/// `Transport` codes fold the two status sources of a register/attribute
/// access ("first nonzero wins, local priority"): negative codes were
/// detected locally, positive codes were reported by the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// A fuse field failed its integrity check; aborts the identity step.
    Validation(FuseField),
    /// A handshake saw a value outside the mailbox protocol conventions.
    Protocol(ProtocolViolation),
    /// A register/attribute access failed. The code is never zero.
    Transport(i32),
    /// Signature verification failed closed.
    Integrity(IntegrityCause),
    /// Caller passed an out-of-range or malformed argument.
    InvalidArgument,
    /// A transport attribute clear failed while resetting `cport`.
    Io { cport: u32, attr: CportAttr },
}

impl BridgeError {
    /// True for transport failures detected on the local side.
    pub fn is_transport_local(&self) -> bool {
        matches!(self, BridgeError::Transport(code) if *code < 0)
    }

    /// True for transport failures reported by the peer.
    pub fn is_transport_peer(&self) -> bool {
        matches!(self, BridgeError::Transport(code) if *code > 0)
    }
}

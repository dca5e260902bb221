/*++

Licensed under the Apache-2.0 license.

File Name:

    mailbox.rs

Abstract:

    File contains the single-slot synchronous mailbox used for the bring-up
    handshake with the supervisory controller.

--*/

use bridgerom_error::{BridgeError, BridgeResult, ProtocolViolation};

use crate::regs::{self, InterruptStatus};
use crate::{wait, AttrScope, LinkAdapter};

/// Idle/reset sentinel; never a valid assignment.
pub const MAIL_RESET: u16 = 0;

/// Distinguished "module ready" sentinel, outside the channel-assignment
/// range.
pub const MAIL_READY: u16 = 0xFFFE;

/// Single-slot synchronous mailbox.
///
/// The slot holds at most one outstanding, unacknowledged value. Reading
/// and writing are barrier operations: the code arrives here and waits,
/// without timeout, for the supervisory controller to act on the slot.
/// Callers must not issue a second [`Mailbox::write`] before the prior one
/// has returned.
pub struct Mailbox<A> {
    adapter: A,
}

impl<A: LinkAdapter> Mailbox<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// Synchronously read the local mailbox.
    ///
    /// Polls the local interrupt status until the mailbox-pending bit is
    /// set, then reads the slot. The loop has no timeout: it is a barrier
    /// waiting for notification from the supervisory controller.
    ///
    /// # Returns
    ///
    /// * The received value, always below the 16-bit protocol limit.
    pub fn read(&mut self) -> BridgeResult<u32> {
        wait::poll_until(
            || {
                self.adapter
                    .read_attr(regs::INTERRUPT_STATUS, 0, AttrScope::Local)
            },
            |irq| InterruptStatus::from_bits_truncate(*irq).contains(InterruptStatus::MAILBOX_PENDING),
        )?;

        let mail = self.adapter.read_attr(regs::MAILBOX, 0, AttrScope::Local)?;

        // Conventions on this link never use wider values.
        if mail >= u32::from(u16::MAX) {
            log::debug!("mailbox protocol only supports 16-bit values");
            return Err(BridgeError::Protocol(ProtocolViolation::SizeViolation));
        }

        Ok(mail)
    }

    /// Acknowledge the value read from the local mailbox, clearing the
    /// slot. Local-only; the adapter's status is propagated verbatim.
    pub fn ack(&mut self, val: u16) -> BridgeResult<()> {
        self.adapter
            .write_attr(regs::MAILBOX_ACK, u32::from(val), 0, AttrScope::Local)
    }

    /// Synchronously write the peer's mailbox, then poll the peer's
    /// interrupt status until the pending bit clears, confirming pickup.
    /// No timeout, like [`Mailbox::read`].
    pub fn write(&mut self, val: u32) -> BridgeResult<()> {
        self.adapter
            .write_attr(regs::MAILBOX, val, 0, AttrScope::Peer)?;

        wait::poll_until(
            || {
                self.adapter
                    .read_attr(regs::INTERRUPT_STATUS, 0, AttrScope::Peer)
            },
            |irq| {
                !InterruptStatus::from_bits_truncate(*irq).contains(InterruptStatus::MAILBOX_PENDING)
            },
        )?;

        Ok(())
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    cport.rs

Abstract:

    File contains the CPort manager: per-channel reset and the static and
    dynamic channel-assignment handshakes. The channels themselves are
    owned by the platform; the manager only drives their transitions.

--*/

use bridgerom_error::{BridgeError, BridgeResult, CportAttr, ProtocolViolation};

use crate::regs;
use crate::{wait, AttrScope, LinkAdapter, Mailbox};

/// Number of channels on the reference chip revision.
pub const CPORT_MAX: u32 = 4;

/// A bidirectional buffered transport channel.
#[derive(Debug, Clone, Copy)]
pub struct Cport {
    id: u32,
    rx_buf: u32,
}

impl Cport {
    /// Receive buffers are statically carved out of buffer RAM, one
    /// [`regs::CPORT_RX_BUF_SIZE`] slab per channel.
    const fn new(id: u32) -> Self {
        Self {
            id,
            rx_buf: regs::CPORT_RX_BUF_BASE + id * regs::CPORT_RX_BUF_SIZE,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Receive-buffer base address.
    pub fn rx_buf(&self) -> u32 {
        self.rx_buf
    }
}

/// Per-channel reset and initialization driver.
pub struct CportManager<A> {
    adapter: A,
    table: [Cport; CPORT_MAX as usize],
}

impl<A: LinkAdapter> CportManager<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            table: [Cport::new(0), Cport::new(1), Cport::new(2), Cport::new(3)],
        }
    }

    /// Channel table entry, if `cportid` is in range.
    pub fn cport(&self, cportid: u32) -> Option<&Cport> {
        self.table.get(cportid as usize)
    }

    /// Reset one channel.
    ///
    /// Waits for the channel's transmit queue to drain (a channel with
    /// data in flight must not be reset), pulses the transmit-path reset,
    /// clears the four transport attributes, then pulses and releases the
    /// receive path. Idempotent.
    pub fn reset(&mut self, cportid: u32) -> BridgeResult<()> {
        if cportid >= CPORT_MAX {
            return Err(BridgeError::InvalidArgument);
        }

        let queue_empty_reg = regs::CPB_TX_QUEUE_EMPTY_0 + ((cportid >> 5) << 2);
        let queue_empty_bit = 1 << (cportid & 31);
        wait::until(|| self.adapter.get_reg32(queue_empty_reg) & queue_empty_bit != 0);

        let tx_reset = regs::TX_SW_RESET_00 + (cportid << 2);
        let rx_reset = regs::RX_SW_RESET_00 + (cportid << 2);

        self.adapter.put_reg32(tx_reset, regs::CPORT_SW_RESET_BITS);

        self.clear_transport_attr(cportid, regs::T_CONNECTION_STATE, CportAttr::ConnectionState)?;
        self.clear_transport_attr(
            cportid,
            regs::T_LOCAL_BUFFER_SPACE,
            CportAttr::LocalBufferSpace,
        )?;
        self.clear_transport_attr(cportid, regs::T_PEER_BUFFER_SPACE, CportAttr::PeerBufferSpace)?;
        self.clear_transport_attr(cportid, regs::T_CREDITS_TO_SEND, CportAttr::CreditsToSend)?;

        self.adapter.put_reg32(rx_reset, regs::CPORT_SW_RESET_BITS);
        self.adapter.put_reg32(tx_reset, 0);
        self.adapter.put_reg32(rx_reset, 0);
        Ok(())
    }

    /// Reset every channel in increasing order, stopping at the first
    /// failure.
    pub fn reset_all(&mut self) -> BridgeResult<()> {
        for cportid in 0..CPORT_MAX {
            self.reset(cportid)?;
        }
        log::debug!("reset all cports");
        Ok(())
    }

    /// Complete the static assignment handshake for `cportid`.
    ///
    /// The supervisory controller posts the 1-based channel number (1-based
    /// to disambiguate from the idle sentinel); anything else is a protocol
    /// violation. On success the receive buffer is re-armed and the value
    /// acknowledged.
    pub fn init(&mut self, cportid: u32) -> BridgeResult<()> {
        if cportid >= CPORT_MAX {
            return Err(BridgeError::InvalidArgument);
        }

        let mail = Mailbox::new(&mut self.adapter).read()?;
        if mail != cportid + 1 {
            return Err(BridgeError::Protocol(ProtocolViolation::UnexpectedAssignment));
        }

        self.rearm_rx(cportid);

        Mailbox::new(&mut self.adapter).ack(mail as u16)
    }

    /// Receive a dynamically assigned channel id.
    ///
    /// The mailbox carries the 1-based channel number; the returned id is
    /// 0-based. An id only escapes on success.
    pub fn recv(&mut self) -> BridgeResult<u32> {
        let mail = Mailbox::new(&mut self.adapter).read()?;

        let cportid = mail.wrapping_sub(1);
        if cportid >= CPORT_MAX {
            return Err(BridgeError::InvalidArgument);
        }

        self.rearm_rx(cportid);

        Mailbox::new(&mut self.adapter).ack(mail as u16)?;
        Ok(cportid)
    }

    /// Re-arm a channel's receive buffer: reprogram the base address and
    /// restart reception at the configured buffer size. Callers validate
    /// `cportid`.
    fn rearm_rx(&mut self, cportid: u32) {
        let cport = self.table[cportid as usize];
        self.adapter
            .put_reg32(regs::RX_BUFFER_ADDRESS_00 + (cportid << 2), cport.rx_buf());
        self.adapter.put_reg32(
            regs::RX_PAUSE_SIZE_00 + (cportid << 2),
            regs::RX_PAUSE_RESTART | regs::CPORT_RX_BUF_SIZE,
        );
    }

    fn clear_transport_attr(
        &mut self,
        cportid: u32,
        attr: u16,
        which: CportAttr,
    ) -> BridgeResult<()> {
        self.adapter
            .write_attr(attr, 0, cportid as u16, AttrScope::Local)
            .map_err(|_| {
                log::warn!("can't reset transport attribute {:?} on cport {}", which, cportid);
                BridgeError::Io {
                    cport: cportid,
                    attr: which,
                }
            })
    }
}

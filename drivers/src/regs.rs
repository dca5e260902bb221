/*++

Licensed under the Apache-2.0 license.

File Name:

    regs.rs

Abstract:

    File contains the fixed platform register and attribute map consumed by
    the drivers. The addresses and attribute ids are the platform contract
    for the reference chip revision; the platform owns them, the drivers
    only use them.

--*/

// ---------------------------------------------------------------------------
// Link attribute space
// ---------------------------------------------------------------------------

/// Interrupt-status attribute; see [`InterruptStatus`] for the layout.
pub const INTERRUPT_STATUS: u16 = 0xD081;

/// Link power-state attribute.
pub const POWER_STATE: u16 = 0xD083;

/// [`POWER_STATE`] value once the link has trained up.
pub const POWER_STATE_LINK_UP: u32 = 2;

/// Single-slot mailbox attribute (local slot or the peer's, by scope).
pub const MAILBOX: u16 = 0xA000;

/// Mailbox acknowledge attribute; writing the received value clears the
/// local slot.
pub const MAILBOX_ACK: u16 = 0xA001;

bitflags::bitflags! {
    /// Layout of the [`INTERRUPT_STATUS`] attribute.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InterruptStatus: u32 {
        /// A mailbox value is pending and has not been acknowledged.
        const MAILBOX_PENDING = 1 << 15;
    }
}

// ---------------------------------------------------------------------------
// Per-channel transport attributes (selector = channel id)
// ---------------------------------------------------------------------------

pub const T_CONNECTION_STATE: u16 = 0x4020;
pub const T_LOCAL_BUFFER_SPACE: u16 = 0x4021;
pub const T_PEER_BUFFER_SPACE: u16 = 0x4022;
pub const T_CREDITS_TO_SEND: u16 = 0x4023;

// ---------------------------------------------------------------------------
// Hibernate attributes
// ---------------------------------------------------------------------------

pub const HIBERNATE_ENTER_IND: u16 = 0xD091;
pub const HIBERNATE_EXIT_IND: u16 = 0xD092;
pub const HIBERNATE_ENTER_REQ: u16 = 0xD093;
pub const HIBERNATE_EXIT_REQ: u16 = 0xD094;

// ---------------------------------------------------------------------------
// Identity publication attributes
// ---------------------------------------------------------------------------

pub const DME_VID: u16 = 0x6000;
pub const DME_PID: u16 = 0x6001;
pub const DME_SERIAL_L: u16 = 0x6002;
pub const DME_SERIAL_H: u16 = 0x6003;
pub const DME_ENDPOINT_ID_L: u16 = 0x6004;
pub const DME_ENDPOINT_ID_H: u16 = 0x6005;

// ---------------------------------------------------------------------------
// Link block registers
// ---------------------------------------------------------------------------

/// Base of the link controller's register block.
pub const LINK_BASE: u32 = 0x4002_0000;

/// Per-channel transmit software-reset registers, one word per channel.
pub const TX_SW_RESET_00: u32 = LINK_BASE + 0x1000;

/// Per-channel receive software-reset registers, one word per channel.
pub const RX_SW_RESET_00: u32 = LINK_BASE + 0x1200;

/// Value asserting a channel path reset; write zero to release.
pub const CPORT_SW_RESET_BITS: u32 = 3;

/// Transmit-queue-empty register file: one bit per channel, 32 channels
/// per word.
pub const CPB_TX_QUEUE_EMPTY_0: u32 = LINK_BASE + 0x1100;

/// Per-channel receive-buffer base-address registers.
pub const RX_BUFFER_ADDRESS_00: u32 = LINK_BASE + 0x1300;

/// Per-channel receive pause/size registers.
pub const RX_PAUSE_SIZE_00: u32 = LINK_BASE + 0x1400;

/// [`RX_PAUSE_SIZE_00`] bit restarting reception after reprogramming.
pub const RX_PAUSE_RESTART: u32 = 1 << 31;

/// End-to-end flow-control enable registers.
pub const RX_E2EFC_EN_0: u32 = LINK_BASE + 0x1500;
pub const RX_E2EFC_EN_1: u32 = LINK_BASE + 0x1504;

/// Base of the statically carved per-channel receive buffers.
pub const CPORT_RX_BUF_BASE: u32 = 0x2000_0000;

/// Size in bytes of one channel's receive buffer.
pub const CPORT_RX_BUF_SIZE: u32 = 0x2000;

// ---------------------------------------------------------------------------
// System control registers
// ---------------------------------------------------------------------------

/// Reads nonzero while the link subsystem clock is running.
pub const LINK_CLOCK_STATE: u32 = 0x4000_0E10;

/// Clock-enable register; write [`LINK_CLOCK_BIT`] to ungate.
pub const CLOCK_ENABLE: u32 = 0x4000_0300;

/// Clock-gate register; write [`LINK_CLOCK_BIT`] to gate off.
pub const CLOCK_GATE: u32 = 0x4000_0304;

/// Link subsystem clock bit in the clock control registers.
pub const LINK_CLOCK_BIT: u32 = 1 << 2;

// ---------------------------------------------------------------------------
// Fuse and security block registers
// ---------------------------------------------------------------------------

/// Base of the fuse/security block.
pub const SEC_BASE: u32 = 0x4008_4000;

/// Fuse array ECC scan status.
pub const FUSE_ECC_STATUS: u32 = SEC_BASE + 0x0100;

/// [`FUSE_ECC_STATUS`] bit flagging an uncorrectable error.
pub const FUSE_ECC_ERROR: u32 = 1 << 0;

pub const FUSE_VID: u32 = SEC_BASE + 0x0200;
pub const FUSE_PID: u32 = SEC_BASE + 0x0204;
pub const FUSE_SERIAL_L: u32 = SEC_BASE + 0x0208;
pub const FUSE_SERIAL_H: u32 = SEC_BASE + 0x020C;

/// First word of the fused Secret (IMS); subsequent words follow at
/// 4-byte strides.
pub const FUSE_IMS_BASE: u32 = SEC_BASE + 0x0300;

/// Write [`DISABLE_ACCESS_VALUE`] to lock out further IMS reads.
pub const DISABLE_IMS_ACCESS: u32 = SEC_BASE + 0x0400;

/// Write [`DISABLE_ACCESS_VALUE`] to lock out further CMS reads.
pub const DISABLE_CMS_ACCESS: u32 = SEC_BASE + 0x0404;

/// Write [`DISABLE_ACCESS_VALUE`] to disable the JTAG port.
pub const JTAG_DISABLE: u32 = SEC_BASE + 0x040C;

pub const DISABLE_ACCESS_VALUE: u32 = 1;

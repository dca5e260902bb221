/*++

Licensed under the Apache-2.0 license.

File Name:

    link.rs

Abstract:

    File contains the link bring-up helpers: waiting for the link to train
    up and advertising boot readiness to the supervisory controller.

--*/

use bridgerom_error::BridgeResult;

use crate::regs;
use crate::{wait, AttrScope, LinkAdapter, Mailbox, MAIL_READY};

/// Block until the link power state reports link-up.
///
/// The first peer access of a boot is only legal once the link has
/// trained; this is the barrier in front of it.
pub fn wait_for_link_up<A: LinkAdapter>(adapter: &mut A) -> BridgeResult<()> {
    wait::poll_until(
        || adapter.read_attr(regs::POWER_STATE, 0, AttrScope::Local),
        |state| *state == regs::POWER_STATE_LINK_UP,
    )?;
    Ok(())
}

/// Disable end-to-end flow control on all channels.
pub fn disable_flow_control<A: LinkAdapter>(adapter: &mut A) {
    adapter.put_reg32(regs::RX_E2EFC_EN_0, 0);
    adapter.put_reg32(regs::RX_E2EFC_EN_1, 0);
}

/// Advertise readiness to boot firmware to the supervisory controller.
///
/// Waits for link-up, quiesces flow control, then posts the ready
/// sentinel to the peer's mailbox (including the pickup barrier).
pub fn advertise_ready<A: LinkAdapter>(adapter: &mut A) -> BridgeResult<()> {
    wait_for_link_up(adapter)?;

    disable_flow_control(adapter);

    Mailbox::new(&mut *adapter).write(u32::from(MAIL_READY))?;

    log::info!("module ready advertised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Event, SimAdapter};

    const PENDING: u32 = 1 << 15;

    #[test]
    fn test_wait_for_link_up_polls_until_trained() {
        let mut sim = SimAdapter::new();
        sim.script_attr(
            regs::POWER_STATE,
            0,
            AttrScope::Local,
            &[0, 1, regs::POWER_STATE_LINK_UP],
        );

        wait_for_link_up(&mut sim).unwrap();
        assert_eq!(sim.attr_read_count(regs::POWER_STATE, 0, AttrScope::Local), 3);
    }

    #[test]
    fn test_advertise_ready_posts_sentinel_after_link_up() {
        let mut sim = SimAdapter::new();
        sim.script_attr(regs::POWER_STATE, 0, AttrScope::Local, &[regs::POWER_STATE_LINK_UP]);
        sim.script_attr(regs::INTERRUPT_STATUS, 0, AttrScope::Peer, &[PENDING, 0]);

        advertise_ready(&mut sim).unwrap();

        assert_eq!(sim.reg_writes(regs::RX_E2EFC_EN_0), [0]);
        assert_eq!(sim.reg_writes(regs::RX_E2EFC_EN_1), [0]);
        assert_eq!(
            sim.attr_writes(regs::MAILBOX, 0, AttrScope::Peer),
            [u32::from(MAIL_READY)]
        );
        // Flow control was quiesced before the mailbox write.
        let quiesced = sim
            .events
            .iter()
            .position(|e| matches!(e, Event::RegWrite { addr, .. } if *addr == regs::RX_E2EFC_EN_0))
            .unwrap();
        let posted = sim
            .events
            .iter()
            .position(|e| matches!(e, Event::AttrWrite { attr, .. } if *attr == regs::MAILBOX))
            .unwrap();
        assert!(quiesced < posted);
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    hibernate.rs

Abstract:

    File contains the low-power hibernate controller. The link is suspended
    and resumed by two asymmetric roles: the server drives both edges of
    the transition, the client only reacts to each. The Active/Hibernating
    state machine lives entirely in hardware-polled attribute bits; no
    software state survives a restart, so whatever the hardware holds after
    an interrupted transition is final.

--*/

use bridgerom_error::BridgeResult;

use crate::regs;
use crate::{wait, AttrScope, LinkAdapter, CPORT_MAX};

/// Hibernate entry/exit driver for one role of the link.
pub struct Hibernate<A> {
    adapter: A,
}

impl<A: LinkAdapter> Hibernate<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// Enter hibernate as the client.
    ///
    /// Waits for the peer-driven enter indication, resets every channel's
    /// transmit and receive paths, waits for the subsystem clock to
    /// actually stop, then gates it off. Returns once the link is down;
    /// the matching [`Hibernate::exit_client`] waits for the exit edge.
    pub fn enter_client(&mut self) -> BridgeResult<()> {
        log::debug!("wait for hibernate");
        wait::poll_until(
            || {
                self.adapter
                    .read_attr(regs::HIBERNATE_ENTER_IND, 0, AttrScope::Local)
            },
            |ind| *ind != 0,
        )?;

        self.reset_cport_paths();
        log::debug!("hibernate entered");

        wait::until(|| self.adapter.get_reg32(regs::LINK_CLOCK_STATE) == 0);
        self.adapter
            .put_reg32(regs::CLOCK_GATE, regs::LINK_CLOCK_BIT);
        Ok(())
    }

    /// Exit hibernate as the client.
    ///
    /// The clock gate is released first: attribute access needs a live
    /// clock. Then the exit request is raised and the exit indication
    /// awaited.
    pub fn exit_client(&mut self) -> BridgeResult<()> {
        self.adapter
            .put_reg32(regs::CLOCK_ENABLE, regs::LINK_CLOCK_BIT);

        log::debug!("try to exit hibernate");
        self.adapter
            .write_attr(regs::HIBERNATE_EXIT_REQ, 1, 0, AttrScope::Local)?;

        wait::poll_until(
            || {
                self.adapter
                    .read_attr(regs::HIBERNATE_EXIT_IND, 0, AttrScope::Local)
            },
            |ind| *ind != 0,
        )?;
        log::debug!("hibernate exit");
        Ok(())
    }

    /// Enter hibernate as the server, spanning the full enter + exit round
    /// trip: reset every channel's paths, raise the enter request, wait
    /// for the peer to enter, then wait for the exit indication. The
    /// server drives both edges; the call returns only after both were
    /// independently observed.
    pub fn enter_server(&mut self) -> BridgeResult<()> {
        log::debug!("entering hibernate");
        self.reset_cport_paths();

        self.adapter
            .write_attr(regs::HIBERNATE_ENTER_REQ, 1, 0, AttrScope::Local)?;

        log::debug!("wait for hibernate");
        wait::poll_until(
            || {
                self.adapter
                    .read_attr(regs::HIBERNATE_ENTER_IND, 0, AttrScope::Local)
            },
            |ind| *ind != 0,
        )?;
        log::debug!("hibernate entered");

        log::debug!("wait for hibernate exit");
        wait::poll_until(
            || {
                self.adapter
                    .read_attr(regs::HIBERNATE_EXIT_IND, 0, AttrScope::Local)
            },
            |ind| *ind != 0,
        )?;
        log::debug!("hibernate exit");
        Ok(())
    }

    /// Assert the transmit and receive path resets of every channel.
    ///
    /// Unlike `CportManager::reset`, this does not wait for the transmit
    /// queues to drain: hibernate entry abandons in-flight data. Keep it
    /// separate from the manager's reset.
    fn reset_cport_paths(&mut self) {
        for cportid in 0..CPORT_MAX {
            self.adapter.put_reg32(
                regs::TX_SW_RESET_00 + (cportid << 2),
                regs::CPORT_SW_RESET_BITS,
            );
            self.adapter.put_reg32(
                regs::RX_SW_RESET_00 + (cportid << 2),
                regs::CPORT_SW_RESET_BITS,
            );
        }
    }
}

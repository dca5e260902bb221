/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the bridgerom link-layer driver library.

--*/

#![cfg_attr(not(test), no_std)]

mod adapter;
mod cport;
mod hibernate;
mod link;
mod mailbox;
pub mod regs;
pub mod wait;

#[cfg(test)]
mod testutil;

pub use adapter::{AccessStatus, AttrScope, LinkAdapter};
pub use cport::{Cport, CportManager, CPORT_MAX};
pub use hibernate::Hibernate;
pub use link::{advertise_ready, disable_flow_control, wait_for_link_up};
pub use mailbox::{Mailbox, MAIL_READY, MAIL_RESET};

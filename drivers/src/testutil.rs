/*++

Licensed under the Apache-2.0 license.

File Name:

    testutil.rs

Abstract:

    File contains a scripted adapter that plays the hardware and the peer
    deterministically for driver unit tests. Reads consume per-location
    value scripts (the last value sticks), and every access is journaled so
    tests can assert ordering.

--*/

use std::collections::{BTreeMap, VecDeque};

use crate::{AccessStatus, AttrScope, LinkAdapter};

/// One observed adapter access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    RegRead { addr: u32, val: u32 },
    RegWrite { addr: u32, val: u32 },
    AttrRead { attr: u16, selector: u16, scope: AttrScope, val: u32 },
    AttrWrite { attr: u16, selector: u16, scope: AttrScope, val: u32 },
}

type AttrKey = (u16, u16, bool);

fn attr_key(attr: u16, selector: u16, scope: AttrScope) -> AttrKey {
    (attr, selector, scope == AttrScope::Peer)
}

fn next_scripted(queue: &mut VecDeque<u32>) -> u32 {
    match queue.len() {
        0 => 0,
        1 => queue[0],
        _ => queue.pop_front().unwrap(),
    }
}

fn current(queue: &VecDeque<u32>) -> u32 {
    queue.front().copied().unwrap_or(0)
}

#[derive(Default)]
pub struct SimAdapter {
    regs: BTreeMap<u32, VecDeque<u32>>,
    attrs: BTreeMap<AttrKey, VecDeque<u32>>,
    read_failures: BTreeMap<AttrKey, AccessStatus>,
    write_failures: BTreeMap<AttrKey, AccessStatus>,
    pub events: Vec<Event>,
}

impl SimAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script successive read values for a register; the last one sticks.
    pub fn script_reg(&mut self, addr: u32, values: &[u32]) {
        self.regs.insert(addr, values.iter().copied().collect());
    }

    /// Script successive read values for an attribute; the last one sticks.
    pub fn script_attr(&mut self, attr: u16, selector: u16, scope: AttrScope, values: &[u32]) {
        self.attrs
            .insert(attr_key(attr, selector, scope), values.iter().copied().collect());
    }

    /// Make every read of an attribute fail with `status`.
    pub fn fail_attr_read(&mut self, attr: u16, selector: u16, scope: AttrScope, status: AccessStatus) {
        self.read_failures
            .insert(attr_key(attr, selector, scope), status);
    }

    /// Make every write of an attribute fail with `status`.
    pub fn fail_attr_write(&mut self, attr: u16, selector: u16, scope: AttrScope, status: AccessStatus) {
        self.write_failures
            .insert(attr_key(attr, selector, scope), status);
    }

    /// Value the next read of the attribute would observe.
    pub fn attr_value(&self, attr: u16, selector: u16, scope: AttrScope) -> u32 {
        self.attrs
            .get(&attr_key(attr, selector, scope))
            .map(current)
            .unwrap_or(0)
    }

    /// Values written to `addr`, in order.
    pub fn reg_writes(&self, addr: u32) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::RegWrite { addr: a, val } if *a == addr => Some(*val),
                _ => None,
            })
            .collect()
    }

    /// Values written to the attribute, in order (attempts included).
    pub fn attr_writes(&self, attr: u16, selector: u16, scope: AttrScope) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::AttrWrite {
                    attr: a,
                    selector: s,
                    scope: sc,
                    val,
                } if *a == attr && *s == selector && *sc == scope => Some(*val),
                _ => None,
            })
            .collect()
    }

    /// Number of reads observed on the attribute.
    pub fn attr_read_count(&self, attr: u16, selector: u16, scope: AttrScope) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(e, Event::AttrRead { attr: a, selector: s, scope: sc, .. }
                    if *a == attr && *s == selector && *sc == scope)
            })
            .count()
    }

    /// Journal index of the first read of the attribute observing `val`.
    pub fn first_attr_read_of(
        &self,
        attr: u16,
        selector: u16,
        scope: AttrScope,
        val: u32,
    ) -> Option<usize> {
        self.events.iter().position(|e| {
            matches!(e, Event::AttrRead { attr: a, selector: s, scope: sc, val: v }
                if *a == attr && *s == selector && *sc == scope && *v == val)
        })
    }

    /// Snapshot of the final register and attribute values, for comparing
    /// observable hardware state across runs.
    pub fn hw_state(&self) -> (BTreeMap<u32, u32>, BTreeMap<AttrKey, u32>) {
        let regs = self.regs.iter().map(|(k, q)| (*k, current(q))).collect();
        let attrs = self.attrs.iter().map(|(k, q)| (*k, current(q))).collect();
        (regs, attrs)
    }
}

impl LinkAdapter for SimAdapter {
    fn get_reg32(&mut self, addr: u32) -> u32 {
        let val = next_scripted(self.regs.entry(addr).or_default());
        self.events.push(Event::RegRead { addr, val });
        val
    }

    fn put_reg32(&mut self, addr: u32, val: u32) {
        self.regs.insert(addr, VecDeque::from([val]));
        self.events.push(Event::RegWrite { addr, val });
    }

    fn attr_read(&mut self, attr: u16, selector: u16, scope: AttrScope) -> (AccessStatus, u32) {
        let key = attr_key(attr, selector, scope);
        if let Some(status) = self.read_failures.get(&key) {
            return (*status, 0);
        }
        let val = next_scripted(self.attrs.entry(key).or_default());
        self.events.push(Event::AttrRead {
            attr,
            selector,
            scope,
            val,
        });
        (AccessStatus::OK, val)
    }

    fn attr_write(&mut self, attr: u16, val: u32, selector: u16, scope: AttrScope) -> AccessStatus {
        self.events.push(Event::AttrWrite {
            attr,
            selector,
            scope,
            val,
        });
        let key = attr_key(attr, selector, scope);
        if let Some(status) = self.write_failures.get(&key) {
            return *status;
        }
        self.attrs.insert(key, VecDeque::from([val]));
        AccessStatus::OK
    }
}

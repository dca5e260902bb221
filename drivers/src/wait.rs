/*++

Licensed under the Apache-2.0 license.

File Name:

    wait.rs

Abstract:

    File contains the blocking-wait helpers used to implement hardware
    barrier synchronization. Every wait here is an unbounded busy-poll:
    the bring-up protocols assume the peer eventually responds, and a
    non-responding peer hangs the firmware.

--*/

/// Spin until `predicate` returns true.
pub fn until<F>(mut predicate: F)
where
    F: FnMut() -> bool,
{
    while !predicate() {}
}

/// Poll a fallible source until it yields a value satisfying `done`.
///
/// Returns the first error `poll` produces, or the first polled value for
/// which `done` holds. Unbounded, like [`until`].
pub fn poll_until<T, E, F, P>(mut poll: F, mut done: P) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    P: FnMut(&T) -> bool,
{
    loop {
        let value = poll()?;
        if done(&value) {
            return Ok(value);
        }
    }
}

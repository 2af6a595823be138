//! Busy-wait strategies for device registers.

/// How a driver waits for a device condition to become true.
/// Drivers never spin on registers themselves; they hand the condition to a `Poll`.
pub trait Poll {
    /// Returns once `ready` has returned true.
    fn wait_until(&mut self, ready: &mut dyn FnMut() -> bool);
}

/// Spins on the condition with a CPU relax hint between checks.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinPoll;

impl Poll for SpinPoll {
    fn wait_until(&mut self, ready: &mut dyn FnMut() -> bool) {
        while !ready() {
            core::hint::spin_loop();
        }
    }
}

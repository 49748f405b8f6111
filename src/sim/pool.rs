//! Generic object pool for high-churn entities
//!
//! Projectiles, particles and power-ups are spawned and discarded dozens of
//! times per second; the pool recycles instances instead of allocating,
//! bounding churn to a single warm-up phase. Items are never dropped, only
//! moved between the active and free lists.

/// Pooled item capability: every item knows whether it is live
pub trait Slot {
    fn is_active(&self) -> bool;
}

/// Reusable-instance container
///
/// `acquire` applies the reset function (clearing per-use state and marking
/// the item active) and returns the slot for in-place initialization by the
/// caller. `sweep` reclaims every item whose `active` flag has been cleared.
pub struct Pool<T> {
    active: Vec<T>,
    free: Vec<T>,
    create: fn() -> T,
    reset: fn(&mut T),
}

impl<T: Slot> Pool<T> {
    pub fn new(create: fn() -> T, reset: fn(&mut T)) -> Self {
        Self {
            active: Vec::new(),
            free: Vec::new(),
            create,
            reset,
        }
    }

    /// Pop a free slot (or construct one), reset it, and hand it out live.
    /// Growth is unbounded; at this workload's scale that is fine.
    pub fn acquire(&mut self) -> &mut T {
        let mut item = self.free.pop().unwrap_or_else(self.create);
        (self.reset)(&mut item);
        let idx = self.active.len();
        self.active.push(item);
        &mut self.active[idx]
    }

    /// Move every deactivated item back to the free list. Callers must have
    /// already cleared the item's `active` flag.
    pub fn sweep(&mut self) {
        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].is_active() {
                i += 1;
            } else {
                let item = self.active.swap_remove(i);
                self.free.push(item);
            }
        }
    }

    /// Recycle everything, live or not (session restart)
    pub fn clear(&mut self) {
        self.free.append(&mut self.active);
    }

    /// The live working set. Callers that deactivate items while iterating
    /// must follow up with [`Pool::sweep`]; membership never changes under
    /// a borrow.
    pub fn active(&self) -> &[T] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [T] {
        &mut self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[cfg(test)]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

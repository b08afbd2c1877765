// SPDX-License-Identifier: MPL-2.0
//! Process-wide exclusivity registry.
//!
//! The registry only holds [`Weak`] references. An instance that is dropped
//! without unregistering simply disappears on the next operation, and the
//! registry never keeps an instance alive.

use crate::domain::error::EngineError;
use crate::domain::preview::InstanceId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Something the registry can pause on behalf of another instance.
pub trait PlaybackTarget {
    /// Stable identity used as the registry key.
    fn instance_id(&self) -> InstanceId;

    /// Returns true while this target is playing.
    fn is_playing(&self) -> bool;

    /// Pauses playback because another instance took over.
    ///
    /// Must not set the user's explicit-pause intent.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the target can no longer be paused.
    fn pause_for_exclusivity(&self) -> Result<(), EngineError>;
}

/// Tracks live previews and enforces "at most one plays".
///
/// Shared by every instance of a process through an `Rc`; all calls happen on
/// the coordination context.
#[derive(Default)]
pub struct InstanceRegistry {
    entries: RefCell<HashMap<InstanceId, Weak<dyn PlaybackTarget>>>,
}

impl std::fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<InstanceId> = self.entries.borrow().keys().copied().collect();
        ids.sort();
        f.debug_struct("InstanceRegistry").field("entries", &ids).finish()
    }
}

impl InstanceRegistry {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Inserts or replaces the entry for `target`. Idempotent.
    pub fn register<T: PlaybackTarget + 'static>(&self, target: &Rc<T>) {
        let id = target.instance_id();
        let weak = Rc::downgrade(target);
        let weak: Weak<dyn PlaybackTarget> = weak;
        self.entries.borrow_mut().insert(id, weak);
        self.prune();
    }

    /// Removes the entry for `id`, then prunes dead entries. No-op if absent.
    pub fn unregister(&self, id: InstanceId) {
        self.entries.borrow_mut().remove(&id);
        self.prune();
    }

    /// Pauses every other registered target that reports playing.
    ///
    /// Best-effort: failures are logged and never reported to the caller.
    /// Returns how many targets were asked to pause.
    pub fn pause_all_except(&self, active: InstanceId) -> usize {
        self.prune();

        // Upgrade first so no borrow is held while calling out.
        let others: Vec<Rc<dyn PlaybackTarget>> = self
            .entries
            .borrow()
            .iter()
            .filter(|(id, _)| **id != active)
            .filter_map(|(_, weak)| weak.upgrade())
            .collect();

        let mut paused = 0;
        for target in others {
            if !target.is_playing() {
                continue;
            }
            paused += 1;
            match target.pause_for_exclusivity() {
                Ok(()) => log::debug!("{} paused for {}", target.instance_id(), active),
                Err(err) => log::debug!(
                    "{} could not be paused for {}: {}",
                    target.instance_id(),
                    active,
                    err
                ),
            }
        }
        paused
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prune();
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` is registered and still alive.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.entries
            .borrow()
            .get(&id)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    fn prune(&self) {
        self.entries
            .borrow_mut()
            .retain(|_, weak| weak.strong_count() > 0);
    }
}

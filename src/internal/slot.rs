//! Per-descriptor instance slots and the teardown log.
//!
//! Each (key, descriptor index) pair gets one `InstanceSlot` enforcing
//! exactly-once construction. The slot table as a whole is the mutable state
//! behind a root provider or a scope; the registry itself is read-only and
//! needs no locking.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::error::DiResult;
use crate::key::Key;
use crate::registration::AnyArc;

/// Cache cell for one (key, descriptor index) pair.
///
/// The cell moves Empty -> Initializing -> Ready: exactly one caller claims
/// construction, every other concurrent caller blocks until the built
/// instance is published, and Ready is terminal. A `create` that fails leaves
/// the cell Empty, so every racer observes the error and later callers retry
/// (with a frozen registry they fail identically).
#[derive(Default)]
pub(crate) struct InstanceSlot {
    cell: OnceCell<AnyArc>,
}

/// Slot storage plus construction-order log for one provider or scope.
///
/// Two separate locks: `slots` guards only the structural change
/// of allocating a key's slot list on first contact, and is released before
/// any factory runs; `teardown` orders log appends and is taken only by the
/// thread that won a slot's construction race, after its factory returned.
/// Unrelated keys therefore never serialize each other's construction.
pub(crate) struct SlotTable {
    slots: Mutex<HashMap<Key, std::sync::Arc<[InstanceSlot]>>>,
    teardown: Mutex<Vec<AnyArc>>,
}

impl SlotTable {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            teardown: Mutex::new(Vec::new()),
        }
    }

    /// Resolves the slot at `index` for `key`, building the instance with
    /// `create` if no thread has built it yet.
    ///
    /// `len` is the number of registrations for the key and fixes the slot
    /// list size on first allocation. The committed instance is appended to
    /// the teardown log exactly once, in true first-construction order.
    pub(crate) fn get_or_create<F>(
        &self,
        key: &Key,
        index: usize,
        len: usize,
        create: F,
    ) -> DiResult<AnyArc>
    where
        F: FnOnce() -> DiResult<AnyArc>,
    {
        let list = {
            let mut map = self.slots.lock();
            map.entry(key.clone())
                .or_insert_with(|| (0..len).map(|_| InstanceSlot::default()).collect())
                .clone()
        };

        let value = list[index].cell.get_or_try_init(|| {
            let built = create()?;
            self.teardown.lock().push(built.clone());
            Ok::<_, crate::error::DiError>(built)
        })?;
        Ok(value.clone())
    }

    /// Drops every committed instance in reverse construction order.
    ///
    /// The slot map is cleared first so the log holds the last reference to
    /// each instance (callers aside), then the log is popped from the end.
    pub(crate) fn unwind(&self) {
        self.slots.lock().clear();
        let mut log = self.teardown.lock();
        while log.pop().is_some() {}
    }
}

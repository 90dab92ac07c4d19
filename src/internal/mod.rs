//! Internal implementation details.

pub(crate) mod slot;

pub(crate) use slot::SlotTable;

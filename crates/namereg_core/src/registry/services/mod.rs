//! Registry services: the entity state machine and slug derivation.

pub mod registry;
pub mod slug;

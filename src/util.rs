//! Shared utility modules used across spellindex components.

pub mod prime;

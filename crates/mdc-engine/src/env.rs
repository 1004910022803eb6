//! Per-pass scratch storage for rule plugins.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Typed scratch map that lives for exactly one parse pass.
///
/// Plugins keep their cross-rule state here (one value per type), so the
/// engine needs no knowledge of what they store.
#[derive(Default)]
pub struct Env {
    slots: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl Env {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the value of type `T`, if one was stored.
    #[must_use]
    pub fn get<T: Any + Send>(&self) -> Option<&T> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_ref())
    }

    /// Mutably borrow the value of type `T`, if one was stored.
    pub fn get_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_mut())
    }

    /// Mutably borrow the value of type `T`, inserting `T::default()` first if absent.
    pub fn get_or_default<T: Any + Send + Default>(&mut self) -> &mut T {
        self.slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut()
            .unwrap_or_else(|| unreachable!("slot is keyed by its own TypeId"))
    }

    /// Store a value, returning the previous one of the same type.
    pub fn insert<T: Any + Send>(&mut self, value: T) -> Option<T> {
        self.slots
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast().ok())
            .map(|old| *old)
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("slots", &self.slots.len())
            .finish()
    }
}

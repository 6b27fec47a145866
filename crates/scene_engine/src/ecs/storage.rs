//! Per-entity component storage
//!
//! A small ordered table keyed by [`ComponentKind`]. Slots keep insertion
//! order so hooks run in a deterministic order. While a hook runs, its
//! component is checked out of the slot; the empty slot marks it busy.

use std::fmt;

use super::component::{downcast_box, downcast_mut, downcast_ref, Component, ComponentKind};

struct ComponentSlot {
    kind: ComponentKind,
    /// `None` while the component is checked out for a hook
    component: Option<Box<dyn Component>>,
}

/// Component table owned by one entity: at most one instance per kind
#[derive(Default)]
pub struct ComponentTable {
    slots: Vec<ComponentSlot>,
}

impl ComponentTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of kinds present (including busy ones)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table holds no components
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a component of `kind` is attached
    pub fn contains_kind(&self, kind: ComponentKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Whether a component of type `C` is attached
    pub fn contains<C: Component>(&self) -> bool {
        self.contains_kind(ComponentKind::of::<C>())
    }

    /// Whether the component of `kind` is checked out for a running hook
    pub fn is_busy(&self, kind: ComponentKind) -> bool {
        self.slot(kind).is_some_and(|slot| slot.component.is_none())
    }

    /// Attached kinds in insertion order
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.slots.iter().map(|slot| slot.kind)
    }

    /// Attached components in insertion order, skipping busy ones
    pub fn iter(&self) -> impl Iterator<Item = (ComponentKind, &dyn Component)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.component.as_deref().map(|component| (slot.kind, component)))
    }

    /// Borrow the component of type `C`
    ///
    /// Returns `None` if absent or busy.
    pub fn get<C: Component>(&self) -> Option<&C> {
        self.slot(ComponentKind::of::<C>())
            .and_then(|slot| slot.component.as_deref())
            .and_then(downcast_ref::<C>)
    }

    /// Mutably borrow the component of type `C`
    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.slot_mut(ComponentKind::of::<C>())
            .and_then(|slot| slot.component.as_deref_mut())
            .and_then(downcast_mut::<C>)
    }

    /// Insert a component, returning the instance it replaced
    pub fn insert<C: Component>(&mut self, component: C) -> Option<Box<C>> {
        self.insert_boxed(ComponentKind::of::<C>(), Box::new(component))
            .and_then(downcast_box::<C>)
    }

    /// Insert a type-erased component under `kind`
    ///
    /// If the slot is busy the new instance takes it over; the checked-out
    /// instance is discarded when its hook returns.
    pub(crate) fn insert_boxed(
        &mut self,
        kind: ComponentKind,
        component: Box<dyn Component>,
    ) -> Option<Box<dyn Component>> {
        if let Some(slot) = self.slot_mut(kind) {
            slot.component.replace(component)
        } else {
            self.slots.push(ComponentSlot {
                kind,
                component: Some(component),
            });
            None
        }
    }

    /// Remove the component of type `C`
    pub fn remove<C: Component>(&mut self) -> Option<Box<C>> {
        self.remove_kind(ComponentKind::of::<C>()).and_then(downcast_box::<C>)
    }

    /// Remove the slot for `kind`, preserving the order of the others
    ///
    /// Returns `None` when absent, or when the instance is checked out.
    pub(crate) fn remove_kind(&mut self, kind: ComponentKind) -> Option<Box<dyn Component>> {
        let index = self.slots.iter().position(|slot| slot.kind == kind)?;
        self.slots.remove(index).component
    }

    /// Take the component out of its slot for the duration of a hook
    pub(crate) fn checkout(&mut self, kind: ComponentKind) -> Option<Box<dyn Component>> {
        self.slot_mut(kind).and_then(|slot| slot.component.take())
    }

    /// Put a checked-out component back
    ///
    /// Hands the instance back if its slot was removed or re-filled while
    /// it was out.
    pub(crate) fn checkin(
        &mut self,
        kind: ComponentKind,
        component: Box<dyn Component>,
    ) -> Option<Box<dyn Component>> {
        match self.slot_mut(kind) {
            Some(slot) if slot.component.is_none() => {
                slot.component = Some(component);
                None
            }
            _ => Some(component),
        }
    }

    fn slot(&self, kind: ComponentKind) -> Option<&ComponentSlot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    fn slot_mut(&mut self, kind: ComponentKind) -> Option<&mut ComponentSlot> {
        self.slots.iter_mut().find(|slot| slot.kind == kind)
    }
}

impl fmt::Debug for ComponentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|slot| slot.kind.name()))
            .finish()
    }
}

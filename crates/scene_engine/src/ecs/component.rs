//! Component trait and kind identifiers

use std::any::{Any, TypeId};
use std::fmt;

use crate::scene::{FrameContext, SceneError};

/// Upcast helper so boxed components can be downcast to their concrete type
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert a box into `Box<dyn Any>`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Behaviour/data unit attached to exactly one entity
///
/// The concrete type is the component kind: an entity holds at most one
/// instance per kind. Hooks receive a [`FrameContext`] bound to the owning
/// entity and may mutate the scene freely; structural changes to the live
/// set are deferred by the coordinator.
pub trait Component: AsAny {
    /// Called once, when the owning entity is flushed into the live set
    /// (or immediately, when attached to an entity that is already live)
    fn initialize(&mut self, _ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        Ok(())
    }

    /// Called once per frame while the owning entity is live
    fn update(&mut self, _ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        Ok(())
    }

    /// Called once, when the owning entity is flushed through the destroy queue
    ///
    /// Not called for components that are merely detached.
    fn destroy(&mut self, _ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        Ok(())
    }
}

/// Key of a component table slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentKind {
    id: TypeId,
    name: &'static str,
}

impl ComponentKind {
    /// Kind of component type `C`
    pub fn of<C: Component>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Underlying type id
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Full type name
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Drop the module path but keep generic arguments readable
        let base = self.name.split('<').next().unwrap_or(self.name);
        let short_start = base.rfind("::").map_or(0, |i| i + 2);
        f.write_str(&self.name[short_start..])
    }
}

pub(crate) fn downcast_ref<C: Component>(component: &dyn Component) -> Option<&C> {
    component.as_any().downcast_ref::<C>()
}

pub(crate) fn downcast_mut<C: Component>(component: &mut dyn Component) -> Option<&mut C> {
    component.as_any_mut().downcast_mut::<C>()
}

pub(crate) fn downcast_box<C: Component>(component: Box<dyn Component>) -> Option<Box<C>> {
    component.into_any().downcast::<C>().ok()
}

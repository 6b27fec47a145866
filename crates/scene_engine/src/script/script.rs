//! Script base: lifecycle hooks plus coroutine hosting

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::coroutine::{from_fn, Coroutine, CoroutineState};
use super::scheduler::{CoroutineScheduler, Cursor};
use crate::ecs::{Component, EntityId};
use crate::scene::{FrameContext, Scene, SceneError};

/// Behaviour bound to one entity
///
/// Attach with [`Scene::attach_script`] or
/// [`EntityBlueprint::with_script`](crate::scene::EntityBlueprint::with_script).
/// Initialization and the first update body never happen in the same frame:
/// the first update call after `initialize` runs neither the body nor any
/// coroutine.
pub trait Script: Sized + 'static {
    /// Called exactly once, before any other hook
    fn initialize(&mut self, _ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        Ok(())
    }

    /// Called once per frame from the second update on, before coroutines advance
    fn update(&mut self, _ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        Ok(())
    }

    /// Called once when the owning entity is destroyed
    ///
    /// Coroutines are dropped right after; put their cleanup here.
    fn destroy(&mut self, _ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        Ok(())
    }
}

/// Context handed to script hooks and coroutines
///
/// Dereferences to the [`FrameContext`] of the owning entity and adds
/// coroutine registration.
pub struct ScriptContext<'a, 'f, S> {
    frame: &'a mut FrameContext<'f>,
    started: &'a mut Vec<Cursor<S>>,
}

impl<'a, 'f, S: 'static> ScriptContext<'a, 'f, S> {
    pub(crate) fn new(frame: &'a mut FrameContext<'f>, started: &'a mut Vec<Cursor<S>>) -> Self {
        Self { frame, started }
    }

    /// Register a coroutine; it first runs on the next frame
    pub fn start_coroutine<C: Coroutine<S>>(&mut self, coroutine: C) {
        let frame = self.frame.frame();
        self.started.push(Cursor::new(Box::new(coroutine), frame));
    }

    /// Register a closure coroutine; see [`from_fn`]
    pub fn start_coroutine_fn<F>(&mut self, body: F)
    where
        F: FnMut(&mut S, &mut ScriptContext<'_, '_, S>) -> Result<CoroutineState, SceneError> + 'static,
    {
        self.start_coroutine(from_fn(body));
    }
}

impl<'f, S> Deref for ScriptContext<'_, 'f, S> {
    type Target = FrameContext<'f>;

    fn deref(&self) -> &Self::Target {
        self.frame
    }
}

impl<S> DerefMut for ScriptContext<'_, '_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.frame
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptPhase {
    /// No hook has run yet
    Fresh,
    /// Initialized by a flush; the next update is skipped
    Primed,
    Running,
    Destroyed,
}

/// Component wrapper that runs a [`Script`] and its coroutines
pub struct ScriptHost<S: Script> {
    script: S,
    scheduler: CoroutineScheduler<S>,
    phase: ScriptPhase,
}

impl<S: Script> ScriptHost<S> {
    /// Wrap a script
    pub fn new(script: S) -> Self {
        Self {
            script,
            scheduler: CoroutineScheduler::new(),
            phase: ScriptPhase::Fresh,
        }
    }

    /// The script
    pub fn script(&self) -> &S {
        &self.script
    }

    /// The script, mutably
    pub fn script_mut(&mut self) -> &mut S {
        &mut self.script
    }

    /// Unwrap the script, dropping its coroutines
    pub fn into_inner(self) -> S {
        self.script
    }

    /// Whether `initialize` has run
    pub fn is_initialized(&self) -> bool {
        self.phase != ScriptPhase::Fresh
    }

    /// Number of unfinished coroutines
    pub fn coroutine_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Register a coroutine from outside the script
    pub fn start_coroutine<C: Coroutine<S>>(&mut self, coroutine: C, frame: u64) {
        self.scheduler.start(Box::new(coroutine), frame);
    }

    fn run_initialize(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        let mut script_ctx = ScriptContext::new(ctx, &mut self.scheduler.started);
        self.script.initialize(&mut script_ctx)
    }
}

impl<S: Script> Component for ScriptHost<S> {
    fn initialize(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        if self.phase != ScriptPhase::Fresh {
            return Ok(());
        }
        self.phase = ScriptPhase::Primed;
        self.run_initialize(ctx)
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        match self.phase {
            ScriptPhase::Fresh => {
                self.phase = ScriptPhase::Running;
                self.run_initialize(ctx)
            }
            ScriptPhase::Primed => {
                self.phase = ScriptPhase::Running;
                Ok(())
            }
            ScriptPhase::Running => {
                {
                    let mut script_ctx = ScriptContext::new(ctx, &mut self.scheduler.started);
                    self.script.update(&mut script_ctx)?;
                }
                self.scheduler.advance(&mut self.script, ctx)
            }
            ScriptPhase::Destroyed => Ok(()),
        }
    }

    fn destroy(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        if self.phase == ScriptPhase::Destroyed {
            return Ok(());
        }
        if self.phase == ScriptPhase::Fresh {
            self.phase = ScriptPhase::Primed;
            self.run_initialize(ctx)?;
        }
        self.phase = ScriptPhase::Destroyed;
        let result = {
            let mut script_ctx = ScriptContext::new(ctx, &mut self.scheduler.started);
            self.script.destroy(&mut script_ctx)
        };
        self.scheduler.clear();
        result
    }
}

impl<S: Script + fmt::Debug> fmt::Debug for ScriptHost<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptHost")
            .field("script", &self.script)
            .field("phase", &self.phase)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl Scene {
    /// Attach a script, returning the one it replaced
    pub fn attach_script<S: Script>(&mut self, entity: EntityId, script: S) -> Result<Option<S>, SceneError> {
        let replaced = self.attach_component(entity, ScriptHost::new(script))?;
        Ok(replaced.map(|host| host.into_inner()))
    }

    /// Borrow the script of type `S`
    pub fn get_script<S: Script>(&self, entity: EntityId) -> Result<&S, SceneError> {
        self.get_component::<ScriptHost<S>>(entity).map(ScriptHost::script)
    }

    /// Mutably borrow the script of type `S`
    pub fn get_script_mut<S: Script>(&mut self, entity: EntityId) -> Result<&mut S, SceneError> {
        self.get_component_mut::<ScriptHost<S>>(entity).map(ScriptHost::script_mut)
    }

    /// Borrow the script of type `S` if present and not running
    pub fn try_get_script<S: Script>(&self, entity: EntityId) -> Option<&S> {
        self.try_get_component::<ScriptHost<S>>(entity).map(ScriptHost::script)
    }

    /// Start a coroutine on another entity's script
    ///
    /// Fails with `ComponentBusy` when called from that script's own hooks;
    /// use [`ScriptContext::start_coroutine`] there.
    pub fn start_coroutine<S: Script, C: Coroutine<S>>(
        &mut self,
        entity: EntityId,
        coroutine: C,
    ) -> Result<(), SceneError> {
        let frame = self.time().frame();
        self.get_component_mut::<ScriptHost<S>>(entity)?
            .start_coroutine(coroutine, frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Awaiter;

    #[derive(Debug, Default)]
    struct Counter {
        initialized: u32,
        updates: u32,
        ticks: u32,
        destroyed: u32,
    }

    impl Script for Counter {
        fn initialize(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
            self.initialized += 1;
            ctx.start_coroutine_fn(|counter: &mut Counter, _ctx| {
                counter.ticks += 1;
                Ok(CoroutineState::Yield(Awaiter::next_frame()))
            });
            Ok(())
        }

        fn update(&mut self, _ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
            self.updates += 1;
            Ok(())
        }

        fn destroy(&mut self, _ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
            self.destroyed += 1;
            Ok(())
        }
    }

    #[test]
    fn test_first_update_only_initializes() {
        let mut scene = Scene::new();
        let entity = scene.spawn();
        let mut host = ScriptHost::new(Counter::default());

        {
            let mut ctx = FrameContext::new(&mut scene, entity);
            host.update(&mut ctx).unwrap();
        }
        assert_eq!(host.script().initialized, 1);
        assert_eq!(host.script().updates, 0);
        assert_eq!(host.script().ticks, 0);

        scene.run_frame(0.25).unwrap();
        {
            let mut ctx = FrameContext::new(&mut scene, entity);
            host.update(&mut ctx).unwrap();
        }
        assert_eq!(host.script().initialized, 1);
        assert_eq!(host.script().updates, 1);
        assert_eq!(host.script().ticks, 1);
    }

    #[test]
    fn test_flush_initialized_script_skips_first_update() {
        let mut scene = Scene::new();
        let entity = scene.spawn();
        scene.attach_script(entity, Counter::default()).unwrap();
        scene.add_entity(entity).unwrap();

        scene.run_frame(0.25).unwrap();
        let counter = scene.get_script::<Counter>(entity).unwrap();
        assert_eq!((counter.initialized, counter.updates, counter.ticks), (1, 0, 0));

        scene.run_frame(0.25).unwrap();
        let counter = scene.get_script::<Counter>(entity).unwrap();
        assert_eq!((counter.initialized, counter.updates, counter.ticks), (1, 1, 1));

        scene.run_frame(0.25).unwrap();
        let counter = scene.get_script::<Counter>(entity).unwrap();
        assert_eq!((counter.updates, counter.ticks), (2, 2));
    }

    #[test]
    fn test_destroy_runs_once_and_drops_coroutines() {
        let mut scene = Scene::new();
        let entity = scene.spawn();
        let mut host = ScriptHost::new(Counter::default());

        let mut ctx = FrameContext::new(&mut scene, entity);
        host.initialize(&mut ctx).unwrap();
        assert_eq!(host.coroutine_count(), 1);

        host.destroy(&mut ctx).unwrap();
        host.destroy(&mut ctx).unwrap();
        host.update(&mut ctx).unwrap();
        assert_eq!(host.script().destroyed, 1);
        assert_eq!(host.script().updates, 0);
        assert_eq!(host.coroutine_count(), 0);
    }

    #[test]
    fn test_attach_script_replaces() {
        let mut scene = Scene::new();
        let entity = scene.spawn();
        assert!(scene.attach_script(entity, Counter::default()).unwrap().is_none());

        scene.get_script_mut::<Counter>(entity).unwrap().updates = 9;
        let old = scene.attach_script(entity, Counter::default()).unwrap();
        assert_eq!(old.map(|c| c.updates), Some(9));
        assert_eq!(scene.try_get_script::<Counter>(entity).map(|c| c.updates), Some(0));
    }
}

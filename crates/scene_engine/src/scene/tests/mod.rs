//! Scene-level lifecycle tests
//!
//! Components record their hooks into an [`EventLog`] resource so tests can
//! assert on the exact order of initialize/update/destroy calls.

mod coroutines;

use crate::ecs::Component;
use crate::scene::{FrameContext, Scene, SceneError};

/// Hook calls in the order they happened
#[derive(Debug, Default)]
pub(super) struct EventLog(pub Vec<String>);

pub(super) fn record(ctx: &mut FrameContext<'_>, event: String) {
    if let Some(log) = ctx.resource_mut::<EventLog>() {
        log.0.push(event);
    }
}

/// Scene with an empty event log installed
pub(super) fn logged_scene() -> Scene {
    let mut scene = Scene::new();
    scene.insert_resource(EventLog::default());
    scene
}

/// Recorded events that start with `prefix`
pub(super) fn events(scene: &Scene, prefix: &str) -> Vec<String> {
    scene
        .resource::<EventLog>()
        .map(|log| log.0.iter().filter(|e| e.starts_with(prefix)).cloned().collect())
        .unwrap_or_default()
}

/// Every recorded event, then clear the log
pub(super) fn drain(scene: &mut Scene) -> Vec<String> {
    scene
        .resource_mut::<EventLog>()
        .map(|log| std::mem::take(&mut log.0))
        .unwrap_or_default()
}

/// Records every hook under a label
pub(super) struct Probe(pub &'static str);

impl Component for Probe {
    fn initialize(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        record(ctx, format!("init {}", self.0));
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        record(ctx, format!("update {}", self.0));
        Ok(())
    }

    fn destroy(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        record(ctx, format!("destroy {}", self.0));
        Ok(())
    }
}

/// Second probe kind, for entities that need two components
pub(super) struct Marker(pub &'static str);

impl Component for Marker {
    fn initialize(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        record(ctx, format!("init {}", self.0));
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        record(ctx, format!("update {}", self.0));
        Ok(())
    }

    fn destroy(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        record(ctx, format!("destroy {}", self.0));
        Ok(())
    }
}

/// Spawn a probed entity and add it to the scene
pub(super) fn add_probe(scene: &mut Scene, label: &'static str) -> crate::ecs::EntityId {
    let id = scene.spawn_named(label);
    scene.attach_component(id, Probe(label)).unwrap();
    scene.add_entity(id).unwrap();
    id
}

/// Spawn a probed entity under `parent`
pub(super) fn add_probe_child(
    scene: &mut Scene,
    parent: crate::ecs::EntityId,
    label: &'static str,
) -> crate::ecs::EntityId {
    let id = scene.spawn_named(label);
    scene.attach_component(id, Probe(label)).unwrap();
    scene.add_child(parent, id).unwrap();
    id
}

//! Scene seeding
//!
//! A [`SceneFactory`] describes the initial content of a level as a tree of
//! [`EntityBlueprint`]s plus [`LayoutHints`] for the renderer. The scene
//! turns a seed into pending entities that are initialized on the first
//! frame.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Scene, SceneError};
use crate::ecs::{Component, ComponentKind, EntityId};
use crate::foundation::math::{Transform2D, Vec2};
use crate::script::{Script, ScriptHost};

/// Camera and world settings consumed by the external renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutHints {
    /// Camera center in world units
    pub camera_position: Vec2,

    /// Camera zoom factor (1.0 = unscaled)
    pub camera_zoom: f32,

    /// Playfield extent, if the level is bounded
    pub world_size: Option<Vec2>,
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self {
            camera_position: Vec2::zeros(),
            camera_zoom: 1.0,
            world_size: None,
        }
    }
}

/// Description of one entity and its subtree
#[derive(Default)]
pub struct EntityBlueprint {
    name: Option<String>,
    transform: Transform2D,
    components: Vec<(ComponentKind, Box<dyn Component>)>,
    children: Vec<EntityBlueprint>,
}

impl EntityBlueprint {
    /// Empty blueprint at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty blueprint with a debug name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the local transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }

    /// Set the local position
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    /// Add a component; a later component of the same kind replaces it
    #[must_use]
    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        let kind = ComponentKind::of::<C>();
        self.components.retain(|(existing, _)| *existing != kind);
        self.components.push((kind, Box::new(component)));
        self
    }

    /// Add a script
    #[must_use]
    pub fn with_script<S: Script>(self, script: S) -> Self {
        self.with_component(ScriptHost::new(script))
    }

    /// Add a child blueprint
    #[must_use]
    pub fn with_child(mut self, child: EntityBlueprint) -> Self {
        self.children.push(child);
        self
    }

    /// Number of entities this blueprint expands to
    pub fn entity_count(&self) -> usize {
        1 + self.children.iter().map(Self::entity_count).sum::<usize>()
    }
}

impl fmt::Debug for EntityBlueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.components.iter().map(|(kind, _)| kind.to_string()).collect();
        f.debug_struct("EntityBlueprint")
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("components", &kinds)
            .field("children", &self.children)
            .finish()
    }
}

/// Initial content of a scene
#[derive(Debug, Default)]
pub struct SceneSeed {
    /// Top-level entities, added as scene roots
    pub entities: Vec<EntityBlueprint>,

    /// Renderer hints
    pub layout: LayoutHints,
}

impl SceneSeed {
    /// Seed with the given layout and no entities
    pub fn new(layout: LayoutHints) -> Self {
        Self {
            entities: Vec::new(),
            layout,
        }
    }

    /// Add a top-level entity
    #[must_use]
    pub fn with_entity(mut self, entity: EntityBlueprint) -> Self {
        self.entities.push(entity);
        self
    }
}

/// Source of a scene's initial content, consulted once per level load
pub trait SceneFactory {
    /// Build the seed for a fresh scene
    fn create_scene(&mut self) -> Result<SceneSeed, SceneError>;
}

impl Scene {
    /// Create the entities of a blueprint as a detached subtree
    pub fn instantiate(&mut self, blueprint: EntityBlueprint) -> Result<EntityId, SceneError> {
        let EntityBlueprint {
            name,
            transform,
            components,
            children,
        } = blueprint;

        let id = match name {
            Some(name) => self.spawn_named(name),
            None => self.spawn(),
        };
        self.transform_mut(id)?.set(transform);
        for (kind, component) in components {
            self.attach_boxed(id, kind, component)?;
        }
        for child in children {
            let child_id = self.instantiate(child)?;
            self.add_child(id, child_id)?;
        }
        Ok(id)
    }

    /// Queue the seed's entities for the next frame and adopt its layout
    ///
    /// Returns the root entity of each top-level blueprint.
    pub fn load(&mut self, seed: SceneSeed) -> Result<Vec<EntityId>, SceneError> {
        let SceneSeed { entities, layout } = seed;
        self.set_layout(layout);

        let mut roots = Vec::with_capacity(entities.len());
        for blueprint in entities {
            let id = self.instantiate(blueprint)?;
            self.add_entity(id)?;
            roots.push(id);
        }
        log::debug!("Loaded scene seed with {} root entities", roots.len());
        Ok(roots)
    }

    /// Ask `factory` for a seed and load it
    pub fn load_from(&mut self, factory: &mut dyn SceneFactory) -> Result<Vec<EntityId>, SceneError> {
        let seed = factory.create_scene()?;
        self.load(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityState;

    #[derive(Debug, PartialEq)]
    struct Tag(&'static str);
    impl Component for Tag {}

    struct Level;

    impl SceneFactory for Level {
        fn create_scene(&mut self) -> Result<SceneSeed, SceneError> {
            let layout = LayoutHints {
                camera_zoom: 2.0,
                world_size: Some(Vec2::new(800.0, 600.0)),
                ..LayoutHints::default()
            };
            Ok(SceneSeed::new(layout)
                .with_entity(
                    EntityBlueprint::named("station")
                        .at(Vec2::new(5.0, 5.0))
                        .with_component(Tag("hub"))
                        .with_child(EntityBlueprint::named("dock").at(Vec2::new(1.0, 0.0))),
                )
                .with_entity(EntityBlueprint::named("beacon")))
        }
    }

    #[test]
    fn test_load_from_factory_queues_entities() {
        let mut scene = Scene::new();
        let roots = scene.load_from(&mut Level).unwrap();

        assert_eq!(roots.len(), 2);
        assert_eq!(scene.layout().camera_zoom, 2.0);
        assert_eq!(scene.entity_count(), 3);
        assert_eq!(scene.pending_count(), 3);

        let dock = scene.find_by_name("dock").unwrap();
        assert_eq!(scene.parent(dock).unwrap(), Some(roots[0]));
        assert_eq!(scene.global_position(dock).unwrap(), Vec2::new(6.0, 5.0));
        assert_eq!(scene.get_component::<Tag>(roots[0]), Ok(&Tag("hub")));

        scene.run_frame(0.0).unwrap();
        assert_eq!(scene.state(dock).unwrap(), EntityState::Live);
        assert_eq!(scene.live_count(), 3);
    }

    #[test]
    fn test_blueprint_keeps_one_component_per_kind() {
        let blueprint = EntityBlueprint::new()
            .with_component(Tag("first"))
            .with_component(Tag("second"))
            .with_child(EntityBlueprint::new());
        assert_eq!(blueprint.entity_count(), 2);

        let mut scene = Scene::new();
        let id = scene.instantiate(blueprint).unwrap();
        assert_eq!(scene.get_component::<Tag>(id), Ok(&Tag("second")));
        assert_eq!(scene.state(id).unwrap(), EntityState::Detached);
    }

    #[test]
    fn test_layout_hints_from_ron() {
        let hints: LayoutHints = ron::from_str("(camera_zoom: 0.5)").unwrap();
        assert_eq!(hints.camera_zoom, 0.5);
        assert_eq!(hints.world_size, None);
    }
}

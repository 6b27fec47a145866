//! Entity behaviour: the turret ship, bullets, asteroids and the wave spawner

use nalgebra::Rotation2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use scene_engine::prelude::*;

use crate::components::{Asteroid, AsteroidSize, Bullet, Playfield, Score, Velocity, WrapAround};

/// Bullet collision radius
const BULLET_RADIUS: f32 = 1.0;

/// Spread between the two halves of a split asteroid, in radians
const SPLIT_ANGLE: f32 = 0.5;

fn playfield(scene: &Scene) -> Result<Playfield, SceneError> {
    scene
        .resource::<Playfield>()
        .copied()
        .ok_or_else(|| SceneError::script("playfield resource missing"))
}

/// Build an asteroid with a crater child and queue it for the next flush
pub fn spawn_asteroid(
    scene: &mut Scene,
    position: Vec2,
    velocity: Vec2,
    size: AsteroidSize,
) -> Result<EntityId, SceneError> {
    let field = playfield(scene)?;
    let scale = size.scale_factor();
    let asteroid = scene.spawn_at(Transform2D::from_position(position).with_scale(Vec2::new(scale, scale)));
    scene.attach_component(asteroid, Asteroid::new(size, field.asteroid_radius))?;
    scene.attach_component(
        asteroid,
        Velocity {
            linear: velocity,
            angular: 0.5,
        },
    )?;
    scene.attach_component(asteroid, WrapAround { bounds: field.bounds })?;
    scene.attach_script(asteroid, AsteroidScript::default())?;

    let crater = scene.spawn_at(Transform2D::from_position(Vec2::new(0.4, 0.2)));
    scene.add_child(asteroid, crater)?;
    scene.add_entity(asteroid)?;
    Ok(asteroid)
}

/// Build a bullet and queue it for the next flush
pub fn spawn_bullet(
    scene: &mut Scene,
    position: Vec2,
    velocity: Vec2,
    lifetime: f32,
) -> Result<EntityId, SceneError> {
    let field = playfield(scene)?;
    let bullet = scene.spawn_at(Transform2D::from_position(position));
    scene.attach_script(bullet, BulletScript { lifetime })?;
    scene.attach_component(bullet, Bullet { radius: BULLET_RADIUS })?;
    scene.attach_component(bullet, Velocity::linear(velocity))?;
    scene.attach_component(bullet, WrapAround { bounds: field.bounds })?;
    scene.add_entity(bullet)?;
    Ok(bullet)
}

/// Rotating turret that fires from its first child on a fixed cadence
#[derive(Debug, Clone)]
pub struct ShipScript {
    /// Radians per second
    pub rotation_speed: f32,
    /// Seconds between shots
    pub fire_interval: f32,
    /// Bullet speed in units per second
    pub bullet_speed: f32,
    /// Bullet lifetime in seconds
    pub bullet_lifetime: f32,
}

impl ShipScript {
    fn fire(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        let ship = ctx.entity();
        let scene = ctx.scene_mut();
        let muzzle = scene.children(ship)?.first().copied().unwrap_or(ship);
        let origin = scene.global_position(muzzle)?;
        let heading = scene.global_rotation(ship)?;
        let direction = Vec2::new(heading.cos(), heading.sin());

        spawn_bullet(scene, origin, direction * self.bullet_speed, self.bullet_lifetime)?;
        if let Some(score) = scene.resource_mut::<Score>() {
            score.shots_fired += 1;
        }
        Ok(())
    }
}

impl Script for ShipScript {
    fn initialize(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        log::debug!("Ship {:?} online", ctx.entity());
        ctx.start_coroutine(
            Sequence::new()
                .then(|ship: &mut ShipScript, ctx| ship.fire(ctx))
                .wait(Awaiter::seconds(self.fire_interval))
                .looping(),
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        let angle = self.rotation_speed * ctx.delta_time();
        ctx.transform_mut()?.rotate(angle);
        Ok(())
    }
}

/// Expires after its lifetime and shatters the first asteroid it touches
#[derive(Debug, Clone)]
pub struct BulletScript {
    /// Seconds before the bullet removes itself
    pub lifetime: f32,
}

impl Script for BulletScript {
    fn initialize(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        ctx.start_coroutine(
            Sequence::new()
                .wait(Awaiter::seconds(self.lifetime))
                .then(|_: &mut BulletScript, ctx| ctx.destroy_self()),
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        let position = ctx.global_position()?;
        let radius = ctx.get_component::<Bullet>()?.radius;

        let scene = ctx.scene();
        let hit = scene
            .components_of_kind::<Asteroid>()
            .filter(|(id, _)| scene.is_live(*id))
            .find_map(|(id, asteroid)| {
                let center = scene.global_position(id).ok()?;
                let reach = asteroid.radius + radius;
                ((center - position).norm_squared() <= reach * reach).then_some((id, asteroid.size))
            });

        if let Some((asteroid, size)) = hit {
            let scene = ctx.scene_mut();
            scene.get_script_mut::<AsteroidScript>(asteroid)?.shattered = true;
            scene.destroy(asteroid)?;
            if let Some(score) = scene.resource_mut::<Score>() {
                score.record_hit(size);
            }
            log::debug!("Bullet {:?} hit {:?} asteroid {:?}", ctx.entity(), size, asteroid);
            ctx.destroy_self()?;
        }
        Ok(())
    }
}

/// Splits into two smaller asteroids when shot
#[derive(Debug, Clone, Default)]
pub struct AsteroidScript {
    /// Set by the bullet that hit this asteroid
    pub shattered: bool,
}

impl Script for AsteroidScript {
    fn destroy(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        if !self.shattered {
            return Ok(());
        }
        let Some(smaller) = ctx.get_component::<Asteroid>()?.size.split_into() else {
            return Ok(());
        };
        let position = ctx.global_position()?;
        let velocity = ctx.get_component::<Velocity>()?.linear * 1.25;

        let scene = ctx.scene_mut();
        for angle in [SPLIT_ANGLE, -SPLIT_ANGLE] {
            spawn_asteroid(scene, position, Rotation2::new(angle) * velocity, smaller)?;
        }
        Ok(())
    }
}

/// Launches a fixed number of large asteroids from the field edge
#[derive(Debug)]
pub struct SpawnerScript {
    rng: StdRng,
    remaining: u32,
    interval: f32,
    speed: f32,
}

impl SpawnerScript {
    /// Spawner with a seeded random stream
    pub fn new(seed: u64, count: u32, interval: f32, speed: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            remaining: count,
            interval,
            speed,
        }
    }

    fn launch(&mut self, scene: &mut Scene) -> Result<EntityId, SceneError> {
        let bounds = playfield(scene)?.bounds;
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let position = Vec2::new(angle.cos() * bounds.max_x, angle.sin() * bounds.max_y);
        let jitter: f32 = self.rng.gen_range(-0.4..0.4);
        let inward = Vec2::new(-angle.cos(), -angle.sin());
        spawn_asteroid(scene, position, Rotation2::new(jitter) * inward * self.speed, AsteroidSize::Large)
    }
}

impl Script for SpawnerScript {
    fn initialize(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        ctx.start_coroutine_fn(|spawner: &mut SpawnerScript, ctx| {
            if spawner.remaining == 0 {
                return Ok(CoroutineState::Done);
            }
            let asteroid = spawner.launch(ctx.scene_mut())?;
            spawner.remaining -= 1;
            log::info!("Launched asteroid {:?}, {} left", asteroid, spawner.remaining);

            if spawner.remaining == 0 {
                Ok(CoroutineState::Done)
            } else {
                Ok(CoroutineState::Yield(Awaiter::seconds(spawner.interval)))
            }
        });
        Ok(())
    }
}

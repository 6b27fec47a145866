//! Scripts and coroutines driven through full frames

use super::*;
use crate::script::{Awaiter, CoroutineState, Script, ScriptContext, ScriptHost, Sequence};

#[derive(Default)]
struct Pulse {
    resumed_on: Vec<u64>,
}

impl Script for Pulse {
    fn initialize(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        ctx.start_coroutine_fn(|pulse: &mut Pulse, ctx| {
            pulse.resumed_on.push(ctx.frame());
            Ok(CoroutineState::Yield(Awaiter::next_frame()))
        });
        Ok(())
    }
}

#[test]
fn test_next_frame_resumes_on_following_frame() {
    let mut scene = Scene::new();
    let entity = scene.spawn();
    scene.attach_script(entity, Pulse::default()).unwrap();
    scene.add_entity(entity).unwrap();

    for _ in 0..4 {
        scene.run_frame(0.25).unwrap();
    }
    // Frame 1 initializes; the coroutine first runs on frame 2
    assert_eq!(scene.get_script::<Pulse>(entity).unwrap().resumed_on, vec![2, 3, 4]);
}

#[derive(Default)]
struct Timed {
    marks: Vec<u64>,
    scaled: bool,
}

impl Script for Timed {
    fn initialize(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        let wait = if self.scaled {
            Awaiter::seconds(1.0)
        } else {
            Awaiter::seconds_unscaled(1.0)
        };
        ctx.start_coroutine(
            Sequence::new()
                .then(|timed: &mut Timed, ctx| {
                    timed.marks.push(ctx.frame());
                    Ok(())
                })
                .wait(wait)
                .then(|timed: &mut Timed, ctx| {
                    timed.marks.push(ctx.frame());
                    Ok(())
                }),
        );
        Ok(())
    }
}

#[test]
fn test_wait_for_seconds_respects_time_scale() {
    let mut scene = Scene::new();
    scene.set_time_scale(2.0);
    let scaled = scene.spawn();
    scene.attach_script(scaled, Timed { scaled: true, ..Timed::default() }).unwrap();
    scene.add_entity(scaled).unwrap();
    let real = scene.spawn();
    scene.attach_script(real, Timed { scaled: false, ..Timed::default() }).unwrap();
    scene.add_entity(real).unwrap();

    for _ in 0..8 {
        scene.run_frame(0.25).unwrap();
    }

    // Scaled: 0.5s per frame, done two frames after the start on frame 2
    assert_eq!(scene.get_script::<Timed>(scaled).unwrap().marks, vec![2, 4]);
    // Real time: 0.25s per frame
    assert_eq!(scene.get_script::<Timed>(real).unwrap().marks, vec![2, 6]);

    let host = scene.get_component::<ScriptHost<Timed>>(scaled).unwrap();
    assert_eq!(host.coroutine_count(), 0);
}

#[derive(Default)]
struct Nested {
    log: Vec<(&'static str, u64)>,
}

impl Script for Nested {
    fn update(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        if self.log.is_empty() {
            self.log.push(("update", ctx.frame()));
            ctx.start_coroutine_fn(|nested: &mut Nested, ctx| {
                nested.log.push(("outer", ctx.frame()));
                ctx.start_coroutine_fn(|nested: &mut Nested, ctx| {
                    nested.log.push(("inner", ctx.frame()));
                    Ok(CoroutineState::Done)
                });
                Ok(CoroutineState::Done)
            });
        }
        Ok(())
    }
}

#[test]
fn test_coroutines_started_mid_frame_run_next_frame() {
    let mut scene = Scene::new();
    let entity = scene.spawn();
    scene.attach_script(entity, Nested::default()).unwrap();
    scene.add_entity(entity).unwrap();

    for _ in 0..5 {
        scene.run_frame(0.25).unwrap();
    }
    assert_eq!(
        scene.get_script::<Nested>(entity).unwrap().log,
        vec![("update", 2), ("outer", 3), ("inner", 4)]
    );
}

struct Ticker;

impl Script for Ticker {
    fn initialize(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        ctx.start_coroutine_fn(|_: &mut Ticker, ctx| {
            record(ctx, "tick".to_string());
            Ok(CoroutineState::Yield(Awaiter::next_frame()))
        });
        Ok(())
    }

    fn destroy(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        record(ctx, "destroy ticker".to_string());
        Ok(())
    }
}

#[test]
fn test_destroying_entity_abandons_coroutines() {
    let mut scene = logged_scene();
    let entity = scene.spawn();
    scene.attach_script(entity, Ticker).unwrap();
    scene.add_entity(entity).unwrap();

    for _ in 0..3 {
        scene.run_frame(0.25).unwrap();
    }
    assert_eq!(drain(&mut scene), vec!["tick", "tick"]);

    scene.destroy(entity).unwrap();
    for _ in 0..3 {
        scene.run_frame(0.25).unwrap();
    }
    assert_eq!(drain(&mut scene), vec!["destroy ticker"]);
}

#[test]
fn test_script_added_and_destroyed_same_frame_sees_one_initialize() {
    let mut scene = logged_scene();
    let entity = scene.spawn();
    scene.attach_script(entity, Ticker).unwrap();
    scene.add_entity(entity).unwrap();
    scene.destroy(entity).unwrap();

    scene.run_frame(0.25).unwrap();
    scene.run_frame(0.25).unwrap();
    assert_eq!(drain(&mut scene), vec!["destroy ticker"]);
    assert!(!scene.contains(entity));
}

#[derive(Default)]
struct Blinker {
    toggles: u32,
}

impl Script for Blinker {
    fn initialize(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
        ctx.start_coroutine(
            Sequence::new()
                .then(|blinker: &mut Blinker, _ctx| {
                    blinker.toggles += 1;
                    Ok(())
                })
                .wait(Awaiter::frames(2))
                .looping(),
        );
        Ok(())
    }
}

#[test]
fn test_looping_sequence_repeats() {
    let mut scene = Scene::new();
    let entity = scene.spawn();
    scene.attach_script(entity, Blinker::default()).unwrap();
    scene.add_entity(entity).unwrap();

    // Starts on frame 2, then every second frame: 2, 4, 6
    for _ in 0..7 {
        scene.run_frame(0.25).unwrap();
    }
    assert_eq!(scene.get_script::<Blinker>(entity).unwrap().toggles, 3);

    let host = scene.get_component::<ScriptHost<Blinker>>(entity).unwrap();
    assert_eq!(host.coroutine_count(), 1);
}

#[test]
fn test_start_coroutine_from_outside() {
    let mut scene = Scene::new();
    let entity = scene.spawn();
    scene.attach_script(entity, Blinker::default()).unwrap();
    scene.add_entity(entity).unwrap();
    scene.run_frame(0.25).unwrap();

    scene
        .start_coroutine::<Blinker, _>(
            entity,
            crate::script::from_fn(|blinker: &mut Blinker, _ctx| {
                blinker.toggles += 100;
                Ok(CoroutineState::Done)
            }),
        )
        .unwrap();
    scene.run_frame(0.25).unwrap();
    assert_eq!(scene.get_script::<Blinker>(entity).unwrap().toggles, 101);
}

//! Resumable routines owned by a script
//!
//! A coroutine is an explicit state machine: each call to
//! [`Coroutine::resume`] runs it up to its next yield point and reports
//! either the [`Awaiter`] to suspend on or that it is done.

use std::fmt;

use super::{Awaiter, ScriptContext};
use crate::scene::SceneError;

/// Result of resuming a coroutine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoroutineState {
    /// Suspend until the awaiter completes
    Yield(Awaiter),
    /// No further steps
    Done,
}

/// A resumable routine bound to scripts of type `S`
pub trait Coroutine<S>: 'static {
    /// Run until the next yield point
    fn resume(
        &mut self,
        script: &mut S,
        ctx: &mut ScriptContext<'_, '_, S>,
    ) -> Result<CoroutineState, SceneError>;
}

/// Coroutine driven by a closure that keeps its own resume point
pub struct FnCoroutine<F> {
    body: F,
}

impl<S, F> Coroutine<S> for FnCoroutine<F>
where
    F: FnMut(&mut S, &mut ScriptContext<'_, '_, S>) -> Result<CoroutineState, SceneError> + 'static,
{
    fn resume(
        &mut self,
        script: &mut S,
        ctx: &mut ScriptContext<'_, '_, S>,
    ) -> Result<CoroutineState, SceneError> {
        (self.body)(script, ctx)
    }
}

/// Build a coroutine from a closure
///
/// The closure is called once per resume; state it captures by move
/// survives between calls.
pub fn from_fn<S, F>(body: F) -> FnCoroutine<F>
where
    F: FnMut(&mut S, &mut ScriptContext<'_, '_, S>) -> Result<CoroutineState, SceneError> + 'static,
{
    FnCoroutine { body }
}

type Action<S> = Box<dyn FnMut(&mut S, &mut ScriptContext<'_, '_, S>) -> Result<(), SceneError>>;

enum Step<S> {
    Run(Action<S>),
    Wait(Awaiter),
}

/// Linear list of actions and waits
///
/// ```ignore
/// let blink = Sequence::new()
///     .then(|lamp: &mut Lamp, _ctx| { lamp.on = !lamp.on; Ok(()) })
///     .wait(Awaiter::seconds(0.5))
///     .looping();
/// ```
pub struct Sequence<S> {
    steps: Vec<Step<S>>,
    cursor: usize,
    looping: bool,
}

impl<S> Default for Sequence<S> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            looping: false,
        }
    }
}

impl<S: 'static> Sequence<S> {
    /// Empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action
    #[must_use]
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut S, &mut ScriptContext<'_, '_, S>) -> Result<(), SceneError> + 'static,
    {
        self.steps.push(Step::Run(Box::new(action)));
        self
    }

    /// Append a suspension
    #[must_use]
    pub fn wait(mut self, awaiter: Awaiter) -> Self {
        self.steps.push(Step::Wait(awaiter));
        self
    }

    /// Restart from the first step after the last one
    ///
    /// Ignored for sequences without a wait, which would never yield.
    #[must_use]
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    fn has_wait(&self) -> bool {
        self.steps.iter().any(|step| matches!(step, Step::Wait(_)))
    }
}

impl<S: 'static> Coroutine<S> for Sequence<S> {
    fn resume(
        &mut self,
        script: &mut S,
        ctx: &mut ScriptContext<'_, '_, S>,
    ) -> Result<CoroutineState, SceneError> {
        loop {
            let Some(step) = self.steps.get_mut(self.cursor) else {
                if self.looping && self.has_wait() {
                    self.cursor = 0;
                    continue;
                }
                return Ok(CoroutineState::Done);
            };
            self.cursor += 1;
            match step {
                Step::Run(action) => action(script, ctx)?,
                Step::Wait(awaiter) => return Ok(CoroutineState::Yield(*awaiter)),
            }
        }
    }
}

impl<S> fmt::Debug for Sequence<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("steps", &self.steps.len())
            .field("cursor", &self.cursor)
            .field("looping", &self.looping)
            .finish()
    }
}

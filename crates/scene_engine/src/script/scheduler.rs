//! Per-script coroutine scheduler

use std::fmt;

use super::{Awaiter, Coroutine, CoroutineState, ScriptContext};
use crate::scene::{FrameContext, SceneError};

/// A registered coroutine and its current suspension
pub struct Cursor<S> {
    coroutine: Box<dyn Coroutine<S>>,
    awaiter: Option<Awaiter>,
    started_frame: u64,
    finished: bool,
}

impl<S> Cursor<S> {
    pub(crate) fn new(coroutine: Box<dyn Coroutine<S>>, started_frame: u64) -> Self {
        Self {
            coroutine,
            awaiter: None,
            started_frame,
            finished: false,
        }
    }

    /// Awaiter the coroutine is suspended on (None before its first resume)
    pub fn awaiter(&self) -> Option<&Awaiter> {
        self.awaiter.as_ref()
    }
}

/// Ordered list of live coroutines for one script
///
/// Coroutines registered during a frame first run on the following
/// frame's [`advance`](Self::advance). Finished ones are filtered out at the
/// end of each advance; the rest keep their relative order.
pub struct CoroutineScheduler<S> {
    cursors: Vec<Cursor<S>>,
    /// Registered since the last advance
    pub(crate) started: Vec<Cursor<S>>,
}

impl<S> Default for CoroutineScheduler<S> {
    fn default() -> Self {
        Self {
            cursors: Vec::new(),
            started: Vec::new(),
        }
    }
}

impl<S: 'static> CoroutineScheduler<S> {
    /// Empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a coroutine started during frame `frame`
    pub fn start(&mut self, coroutine: Box<dyn Coroutine<S>>, frame: u64) {
        self.started.push(Cursor::new(coroutine, frame));
    }

    /// Number of coroutines that have not finished
    pub fn len(&self) -> usize {
        self.cursors.len() + self.started.len()
    }

    /// Whether no coroutine is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live cursors in resume order (excludes ones registered this frame)
    pub fn cursors(&self) -> &[Cursor<S>] {
        &self.cursors
    }

    /// Drop every coroutine
    pub fn clear(&mut self) {
        self.cursors.clear();
        self.started.clear();
    }

    /// Advance every coroutine by one frame
    ///
    /// A cursor with no awaiter is resumed directly. Otherwise its awaiter
    /// consumes this frame and the coroutine resumes once it completes.
    /// An error from a coroutine stops the pass and is returned; that
    /// coroutine stays registered.
    pub fn advance(&mut self, script: &mut S, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        self.cursors.append(&mut self.started);
        let now = ctx.frame();
        let time = *ctx.time();
        let mut incoming = Vec::new();
        let mut outcome = Ok(());

        for cursor in &mut self.cursors {
            if cursor.finished || cursor.started_frame == now {
                continue;
            }
            let ready = match cursor.awaiter.as_mut() {
                None => true,
                Some(awaiter) => {
                    if !awaiter.is_completed() {
                        awaiter.advance(&time);
                    }
                    awaiter.is_completed()
                }
            };
            if !ready {
                continue;
            }

            let mut script_ctx = ScriptContext::new(ctx, &mut incoming);
            match cursor.coroutine.resume(script, &mut script_ctx) {
                Ok(CoroutineState::Yield(awaiter)) => cursor.awaiter = Some(awaiter),
                Ok(CoroutineState::Done) => cursor.finished = true,
                Err(error) => {
                    outcome = Err(error);
                    break;
                }
            }
        }

        self.cursors.retain(|cursor| !cursor.finished);
        self.cursors.append(&mut incoming);
        outcome
    }
}

impl<S> fmt::Debug for CoroutineScheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoroutineScheduler")
            .field("live", &self.cursors.len())
            .field("started", &self.started.len())
            .finish()
    }
}

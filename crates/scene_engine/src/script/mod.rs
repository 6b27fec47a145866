//! Scripts and cooperative coroutines
//!
//! A [`Script`] is wrapped in a [`ScriptHost`] component. Each host owns a
//! [`CoroutineScheduler`] holding the script's suspended routines, advanced
//! once per frame after the script's update body. Suspension is plain
//! bookkeeping: a coroutine is parked on an [`Awaiter`] until it completes.

pub mod awaiter;
pub mod coroutine;
pub mod scheduler;
#[allow(clippy::module_inception)]
pub mod script;

pub use awaiter::{Awaiter, AwaiterKind};
pub use coroutine::{from_fn, Coroutine, CoroutineState, FnCoroutine, Sequence};
pub use scheduler::{CoroutineScheduler, Cursor};
pub use script::{Script, ScriptContext, ScriptHost};

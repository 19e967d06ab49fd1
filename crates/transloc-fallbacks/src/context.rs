//! Dynamically scoped fallback overrides.
//!
//! An override replaces the per-call fallback option for every read made
//! inside its scope. Overrides nest; the innermost wins and the previous
//! one is restored when the scope ends, whether the body returns or
//! unwinds. Restoring on panic needs the default `panic = "unwind"`
//! strategy; under `abort` there is nothing left to restore.
//!
//! Synchronous scopes live on a thread-local stack. Async scopes started
//! with [`with_override_async`] live on a task-local stack, so tasks that
//! share a worker thread never see each other's overrides.

use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;

use tracing::{trace, warn};

use crate::FallbackOption;

thread_local! {
    static THREAD_OVERRIDES: RefCell<Vec<FallbackOption>> = const { RefCell::new(Vec::new()) };
}

tokio::task_local! {
    static TASK_OVERRIDES: RefCell<Vec<FallbackOption>>;
}

/// Which stack an override was pushed onto.
#[derive(Debug, Clone, Copy)]
enum Stack {
    Thread,
    Task,
}

/// Pops the override it pushed when dropped.
struct OverrideGuard {
    stack: Stack,
    // Must be dropped on the thread that pushed.
    _not_send: PhantomData<*const ()>,
}

impl OverrideGuard {
    /// Push onto the task stack when inside an async scope, otherwise the
    /// thread stack.
    fn push(value: FallbackOption) -> Option<Self> {
        let stack = if TASK_OVERRIDES.try_with(|_| ()).is_ok() {
            Stack::Task
        } else {
            Stack::Thread
        };
        Self::push_onto(stack, value)
    }

    /// `None` when the stack is unavailable; nothing was pushed, so there
    /// is nothing to pop.
    fn push_onto(stack: Stack, value: FallbackOption) -> Option<Self> {
        trace!(?value, ?stack, "entering fallback override");
        let pushed = match stack {
            Stack::Task => TASK_OVERRIDES.try_with(|s| s.borrow_mut().push(value)).is_ok(),
            Stack::Thread => THREAD_OVERRIDES.try_with(|s| s.borrow_mut().push(value)).is_ok(),
        };

        if !pushed {
            warn!(?stack, "fallback override stack unavailable, override not applied");
            return None;
        }

        Some(Self {
            stack,
            _not_send: PhantomData,
        })
    }
}

impl Drop for OverrideGuard {
    fn drop(&mut self) {
        let popped = match self.stack {
            Stack::Task => TASK_OVERRIDES.try_with(|s| s.borrow_mut().pop()).ok().flatten(),
            Stack::Thread => THREAD_OVERRIDES.try_with(|s| s.borrow_mut().pop()).ok().flatten(),
        };
        trace!(value = ?popped, stack = ?self.stack, "leaving fallback override");
    }
}

/// Run `body` with `value` as the active fallback override.
///
/// ```
/// use transloc_fallbacks::{current_override, with_override, FallbackOption};
///
/// assert_eq!(current_override(), None);
/// with_override(FallbackOption::Disabled, || {
///     assert_eq!(current_override(), Some(FallbackOption::Disabled));
/// });
/// assert_eq!(current_override(), None);
/// ```
pub fn with_override<T>(value: impl Into<FallbackOption>, body: impl FnOnce() -> T) -> T {
    let _guard = OverrideGuard::push(value.into());
    body()
}

/// Run `future` with `value` as the active fallback override for the
/// current task.
///
/// The override stack in effect when this is called is inherited, so an
/// outer override is restored once the future completes.
pub async fn with_override_async<F>(value: impl Into<FallbackOption>, future: F) -> F::Output
where
    F: Future,
{
    let mut stack = TASK_OVERRIDES
        .try_with(|s| s.borrow().clone())
        .unwrap_or_else(|_| thread_stack_snapshot());
    stack.push(value.into());

    TASK_OVERRIDES.scope(RefCell::new(stack), future).await
}

/// The innermost active override, if any.
pub fn current_override() -> Option<FallbackOption> {
    match TASK_OVERRIDES.try_with(|s| s.borrow().last().cloned()) {
        Ok(value) => value,
        Err(_) => THREAD_OVERRIDES
            .try_with(|s| s.borrow().last().cloned())
            .ok()
            .flatten(),
    }
}

/// Number of overrides active in the current execution context.
pub fn override_depth() -> usize {
    match TASK_OVERRIDES.try_with(|s| s.borrow().len()) {
        Ok(depth) => depth,
        Err(_) => THREAD_OVERRIDES.try_with(|s| s.borrow().len()).unwrap_or(0),
    }
}

fn thread_stack_snapshot() -> Vec<FallbackOption> {
    THREAD_OVERRIDES
        .try_with(|s| s.borrow().clone())
        .unwrap_or_default()
}

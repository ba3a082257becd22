//! # Typeset output — debounced rendering onto a surface
//!
//! [`TypesetOutput`] owns the math source shown by a TeX block and keeps a
//! [`RenderSurface`] in sync with it. Renders never run inline: every change
//! defers a render through a [`Scheduler`] so the surface can mount first, and
//! a change that arrives while a render is still pending cancels it, so only
//! the latest content is ever typeset. [`TypesetOutput::teardown`] cancels the
//! pending render for good once the surface is detached.
//!
//! The scheduler is a trait so the same logic runs on a UI framework's task
//! spawner and on [`TickScheduler`], a deterministic queue that tests drain by
//! hand.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::math;

/// Deferred execution with cancellation.
pub trait Scheduler {
    type Handle;

    /// Run `task` after `delay` (zero means the next tick).
    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Drop a deferred task that has not run yet. Cancelling a finished task is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Where rendered markup ends up.
pub trait RenderSurface {
    fn replace_contents(&self, markup: &str);
}

impl RenderSurface for RefCell<String> {
    fn replace_contents(&self, markup: &str) {
        *self.borrow_mut() = markup.to_string();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickHandle(u64);

#[derive(Default)]
struct TickQueue {
    next_id: u64,
    tasks: VecDeque<(u64, Box<dyn FnOnce()>)>,
}

/// Single-threaded next-tick queue.
///
/// Delays are ignored; [`TickScheduler::run_pending`] is "the next tick".
#[derive(Clone, Default)]
pub struct TickScheduler {
    queue: Rc<RefCell<TickQueue>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Run every task queued before this call. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let tasks = std::mem::take(&mut self.queue.borrow_mut().tasks);
        let count = tasks.len();
        // Queue is released before running so tasks may schedule more work.
        for (_, task) in tasks {
            task();
        }
        count
    }
}

impl Scheduler for TickScheduler {
    type Handle = TickHandle;

    fn defer(&self, _delay: Duration, task: Box<dyn FnOnce()>) -> TickHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let id = queue.next_id;
        queue.tasks.push_back((id, task));
        TickHandle(id)
    }

    fn cancel(&self, handle: TickHandle) {
        self.queue
            .borrow_mut()
            .tasks
            .retain(|(id, _)| *id != handle.0);
    }
}

/// Keeps a surface showing the typeset form of the current content.
pub struct TypesetOutput<S: Scheduler, R: RenderSurface + 'static> {
    scheduler: S,
    surface: Rc<R>,
    content: String,
    display_mode: bool,
    delay: Duration,
    pending: Option<Pending<S::Handle>>,
    torn_down: bool,
}

struct Pending<H> {
    handle: H,
    done: Rc<Cell<bool>>,
}

impl<S: Scheduler, R: RenderSurface + 'static> TypesetOutput<S, R> {
    pub fn new(scheduler: S, surface: Rc<R>) -> Self {
        Self {
            scheduler,
            surface,
            content: String::new(),
            display_mode: true,
            delay: Duration::ZERO,
            pending: None,
            torn_down: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_display_mode(mut self, display_mode: bool) -> Self {
        self.display_mode = display_mode;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.done.get())
    }

    /// First render once the surface exists.
    pub fn mount(&mut self, content: &str) {
        self.content = content.to_string();
        self.schedule();
    }

    /// Re-render when `content` differs from what is shown.
    pub fn set_content(&mut self, content: &str) {
        if self.torn_down || self.content == content {
            return;
        }
        self.content = content.to_string();
        self.schedule();
    }

    /// Cancel any pending render; the surface is going away.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            if !pending.done.get() {
                self.scheduler.cancel(pending.handle);
            }
        }
    }

    fn schedule(&mut self) {
        if self.torn_down {
            return;
        }
        self.cancel_pending();
        tracing::trace!(len = self.content.len(), "scheduling typeset render");

        let surface = Rc::clone(&self.surface);
        let content = self.content.clone();
        let display_mode = self.display_mode;
        let done = Rc::new(Cell::new(false));
        let finished = Rc::clone(&done);
        let handle = self.scheduler.defer(
            self.delay,
            Box::new(move || {
                let result = math::render_math(&content, display_mode);
                surface.replace_contents(result.markup());
                finished.set(true);
            }),
        );
        self.pending = Some(Pending { handle, done });
    }
}

impl<S: Scheduler, R: RenderSurface + 'static> Drop for TypesetOutput<S, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> (TickScheduler, Rc<RefCell<String>>, TypesetOutput<TickScheduler, RefCell<String>>) {
        let scheduler = TickScheduler::new();
        let surface = Rc::new(RefCell::new(String::new()));
        let output = TypesetOutput::new(scheduler.clone(), Rc::clone(&surface));
        (scheduler, surface, output)
    }

    #[test]
    fn test_mount_renders_on_next_tick() {
        let (scheduler, surface, mut output) = output();
        output.mount("x^2");

        assert!(surface.borrow().is_empty());
        assert_eq!(scheduler.pending(), 1);
        assert!(output.is_pending());

        assert_eq!(scheduler.run_pending(), 1);
        assert!(surface.borrow().contains("<math"));
        assert!(!output.is_pending());
    }

    #[test]
    fn test_rapid_changes_coalesce_into_latest() {
        let (scheduler, surface, mut output) = output();
        output.mount("a");
        output.set_content("a+");
        output.set_content(r"\frac{a}{b}");

        assert_eq!(scheduler.pending(), 1);
        scheduler.run_pending();
        assert!(surface.borrow().contains("<mfrac"));
        assert_eq!(output.content(), r"\frac{a}{b}");
    }

    #[test]
    fn test_unchanged_content_does_not_reschedule() {
        let (scheduler, _surface, mut output) = output();
        output.mount("x");
        scheduler.run_pending();
        assert!(!output.is_pending());

        output.set_content("x");
        assert_eq!(scheduler.pending(), 0);
        assert!(!output.is_pending());
    }

    #[test]
    fn test_teardown_cancels_pending_render() {
        let (scheduler, surface, mut output) = output();
        output.mount("x");
        output.teardown();

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.run_pending(), 0);
        assert!(surface.borrow().is_empty());

        output.set_content("y");
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_drop_cancels_pending_render() {
        let (scheduler, surface, mut output) = output();
        output.set_content("z");
        drop(output);
        scheduler.run_pending();
        assert!(surface.borrow().is_empty());
    }

    #[test]
    fn test_malformed_input_renders_fallback() {
        let (scheduler, surface, mut output) = output();
        output.mount("x^{");
        scheduler.run_pending();
        assert!(surface.borrow().contains("math-error"));
    }

    #[test]
    fn test_inline_mode_is_configurable() {
        let scheduler = TickScheduler::new();
        let surface = Rc::new(RefCell::new(String::new()));
        let mut output = TypesetOutput::new(scheduler.clone(), Rc::clone(&surface))
            .with_display_mode(false)
            .with_delay(Duration::from_millis(20));
        output.mount("x");
        scheduler.run_pending();
        assert!(surface.borrow().contains("<mi>x</mi>"));
    }
}

//! Dioxus implementations of the typeset output's scheduler and surface.
//!
//! Deferred renders become spawned tasks owned by the current component, so a
//! cancelled handle is just [`Task::cancel`]. The surface is a signal holding
//! the rendered markup; writing it re-renders the component that shows it.

use std::time::Duration;

use dioxus::prelude::*;
use tex::{RenderSurface, Scheduler};

#[derive(Clone, Copy, Debug, Default)]
pub struct DioxusScheduler;

impl Scheduler for DioxusScheduler {
    type Handle = Task;

    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Task {
        spawn(async move {
            sleep(delay).await;
            task();
        })
    }

    fn cancel(&self, handle: Task) {
        handle.cancel();
    }
}

#[derive(Clone, Copy)]
pub struct SignalSurface(pub Signal<String>);

impl RenderSurface for SignalSurface {
    fn replace_contents(&self, markup: &str) {
        let mut html = self.0;
        html.set(markup.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(delay: Duration) {
    gloo_timers::future::TimeoutFuture::new(delay.as_millis() as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_replaces_signal_contents() {
        let mut dom = VirtualDom::new(|| rsx! {});
        dom.rebuild_in_place();
        dom.in_runtime(|| {
            ScopeId::ROOT.in_runtime(|| {
                let html = Signal::new("<math>old</math>".to_string());
                let surface = SignalSurface(html);
                surface.replace_contents("<math><mi>x</mi></math>");
                assert_eq!(*html.read(), "<math><mi>x</mi></math>");
                surface.replace_contents("");
                assert!(html.read().is_empty());
            })
        });
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use tex::TypesetOutput;

use crate::config::use_editor_config;
use crate::scheduler::{DioxusScheduler, SignalSurface};

/// Typeset math output.
///
/// Renders `content` as MathML on the next tick after it mounts or changes.
/// A change arriving before the pending render ran replaces it.
#[component]
pub fn TexOutput(
    content: ReadOnlySignal<String>,
    #[props(default)] on_click: EventHandler<MouseEvent>,
) -> Element {
    let config = use_editor_config();
    let html = use_signal(String::new);

    let output = use_hook(move || {
        let output_config = config.peek().output.clone();
        Rc::new(RefCell::new(
            TypesetOutput::new(DioxusScheduler, Rc::new(SignalSurface(html)))
                .with_delay(output_config.debounce())
                .with_display_mode(output_config.display_mode),
        ))
    });

    {
        let output = output.clone();
        use_effect(move || {
            let text = content();
            output.borrow_mut().set_content(&text);
        });
    }

    {
        let output = output.clone();
        use_drop(move || {
            output.borrow_mut().teardown();
        });
    }

    rsx! {
        div {
            class: "tex-render",
            onmounted: move |_| {
                output.borrow_mut().mount(&content.peek());
            },
            onclick: move |evt| on_click.call(evt),
            dangerous_inner_html: "{html}",
        }
    }
}

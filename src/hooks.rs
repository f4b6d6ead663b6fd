use attendance_dash::session::refresh_session;
use attendance_dash::view::{ButtonView, ProgressView, TextView};
use attendance_dash::{
    animate_counter, ActionBindings, ActionController, ActionProfile, BrowserHost, CounterSpec,
    FetchTransport,
};
use futures::future::abortable;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Text view writing into a state handle.
pub struct StateText(pub UseStateHandle<String>);

impl TextView for StateText {
    fn set_text(&self, text: &str) {
        self.0.set(text.to_string());
    }
}

/// Progress view writing into a state handle.
pub struct StateProgress(pub UseStateHandle<u8>);

impl ProgressView for StateProgress {
    fn set_percent(&self, percent: u8) {
        self.0.set(percent);
    }
}

/// Button view backed by label/busy state handles.
pub struct StateButton {
    label: UseStateHandle<String>,
    busy: UseStateHandle<bool>,
    identifier: Option<String>,
}

impl ButtonView for StateButton {
    fn identifier(&self) -> Option<String> {
        self.identifier.clone()
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    fn label(&self) -> String {
        (*self.label).clone()
    }

    fn set_label(&self, label: &str) {
        self.label.set(label.to_string());
    }
}

/// Animated counter text. Restarts when `target` or `duration_ms` change and
/// stops when the component unmounts.
#[hook]
pub fn use_counter(target: u64, duration_ms: u32) -> String {
    let text = use_state_eq(|| "0".to_string());
    {
        let text = text.clone();
        use_effect_with((target, duration_ms), move |&(target, duration_ms)| {
            let view: Rc<dyn TextView> = Rc::new(StateText(text));
            let spec = CounterSpec::new(target).with_duration(duration_ms);
            let (task, handle) = abortable(animate_counter(Rc::new(BrowserHost), Some(view), spec));
            spawn_local(async move {
                let _ = task.await;
            });
            move || handle.abort()
        });
    }
    (*text).clone()
}

/// Render state of one action button.
#[derive(Clone, PartialEq)]
pub struct ActionButtonState {
    pub label: String,
    pub busy: bool,
    pub status: String,
    pub progress: u8,
    pub onclick: Callback<MouseEvent>,
}

/// One controller per component instance, rebuilt only when the
/// identifier changes.
#[hook]
pub fn use_action_button(profile: ActionProfile, identifier: Option<String>) -> ActionButtonState {
    let label = use_state_eq(|| profile.idle_label.to_string());
    let busy = use_state_eq(|| false);
    let status = use_state_eq(String::new);
    let progress = use_state_eq(|| 0u8);

    let controller = {
        let label = label.clone();
        let busy = busy.clone();
        let status = status.clone();
        let progress = progress.clone();
        use_memo(identifier, move |identifier| {
            let progress_view = profile
                .progress
                .map(|_| Rc::new(StateProgress(progress)) as Rc<dyn ProgressView>);
            ActionController::new(
                profile,
                ActionBindings {
                    button: Rc::new(StateButton {
                        label,
                        busy,
                        identifier: identifier.clone(),
                    }),
                    status: Rc::new(StateText(status)),
                    progress: progress_view,
                },
                Rc::new(BrowserHost),
                Rc::new(FetchTransport::new()),
            )
        })
    };

    let onclick = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.handle_click())
    };

    ActionButtonState {
        label: (*label).clone(),
        busy: *busy,
        status: (*status).clone(),
        progress: *progress,
        onclick,
    }
}

/// Current session label, fetched once on mount.
#[hook]
pub fn use_session_label() -> String {
    let text = use_state_eq(String::new);
    {
        let text = text.clone();
        use_effect_with((), move |_| {
            let view: Rc<dyn TextView> = Rc::new(StateText(text));
            spawn_local(async move {
                refresh_session(Rc::new(FetchTransport::new()), view).await;
            });
            || ()
        });
    }
    (*text).clone()
}

//! Binding controllers to a server-rendered page.
//!
//! [`bind_page`] is the only place that looks elements up. It takes the
//! document explicitly and hands back everything it bound; elements that are
//! not on the page are skipped.

use crate::config::{
    ACCURACY_COUNTER, ATTENDANCE_BUTTON_ID, ATTENDANCE_STATUS_ID, BUSY_KEY, COUNTER_ATTR,
    COUNTER_TARGET_KEY, DEFAULT_ACCURACY_TARGET, ENROLL_BUTTON_ID, ENROLL_PROGRESS_ID,
    ENROLL_STATUS_ID, LOADING_CLASS, SESSION_STATUS_ID, STUDENT_ID_KEY,
};
use crate::controller::{ActionBindings, ActionController, ActionProfile};
use crate::counter::{animate_counter, CounterSpec};
use crate::host::Host;
use crate::session::refresh_session;
use crate::transport::ActionTransport;
use crate::utils::{parse_counter_target, percent_width};
use crate::view::{ButtonView, ProgressView, TextView};
use log::{debug, info, warn};
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlElement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The page already has live bindings.
    AlreadyBound,
    /// A DOM call failed while wiring the page.
    Js(String),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::AlreadyBound => write!(f, "Dashboard is already bound"),
            BindError::Js(detail) => write!(f, "DOM error while binding dashboard: {}", detail),
        }
    }
}

impl std::error::Error for BindError {}

impl From<JsValue> for BindError {
    fn from(value: JsValue) -> Self {
        BindError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub struct DomText(pub HtmlElement);

impl TextView for DomText {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

pub struct DomProgress(pub HtmlElement);

impl ProgressView for DomProgress {
    fn set_percent(&self, percent: u8) {
        if let Err(e) = self.0.style().set_property("width", &percent_width(percent)) {
            warn!("could not set progress width: {:?}", e);
        }
    }
}

/// A page button. Its markup at wrap time (icons included) is kept and put
/// back whenever the controller restores the idle label.
pub struct DomButton {
    el: HtmlElement,
    idle_text: String,
    idle_markup: String,
}

impl DomButton {
    pub fn new(el: HtmlElement) -> Self {
        Self {
            idle_text: el.text_content().unwrap_or_default().trim().to_string(),
            idle_markup: el.inner_html(),
            el,
        }
    }
}

impl ButtonView for DomButton {
    fn identifier(&self) -> Option<String> {
        self.el.dataset().get(STUDENT_ID_KEY)
    }

    fn set_busy(&self, busy: bool) {
        let el = &self.el;
        let marked = if busy {
            el.dataset()
                .set(BUSY_KEY, "1")
                .and_then(|_| el.class_list().add_1(LOADING_CLASS))
                .and_then(|_| el.set_attribute("disabled", ""))
        } else {
            el.dataset()
                .set(BUSY_KEY, "0")
                .and_then(|_| el.class_list().remove_1(LOADING_CLASS))
                .and_then(|_| el.remove_attribute("disabled"))
        };
        if let Err(e) = marked {
            warn!("could not update busy marking: {:?}", e);
        }
    }

    fn label(&self) -> String {
        self.el.text_content().unwrap_or_default().trim().to_string()
    }

    fn set_label(&self, label: &str) {
        if !self.idle_text.is_empty() && label == self.idle_text {
            self.el.set_inner_html(&self.idle_markup);
        } else {
            self.el.set_text_content(Some(label));
        }
    }
}

/// Default target for a counter whose target attribute is missing.
pub fn counter_default(counter: Option<&str>) -> u64 {
    match counter {
        Some(ACCURACY_COUNTER) => DEFAULT_ACCURACY_TARGET,
        _ => 0,
    }
}

/// A click subscription. Dropping it removes the listener from its target
/// before the closure is freed.
struct ClickListener {
    target: HtmlElement,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        let callback = self.closure.as_ref().unchecked_ref();
        if let Err(e) = self.target.remove_event_listener_with_callback("click", callback) {
            warn!("could not detach click listener: {:?}", e);
        }
    }
}

/// Everything bound on one page. Dropping it detaches the click listeners,
/// so keep it alive for as long as the page (see [`crate::registry`]).
#[derive(Default)]
pub struct PageBindings {
    pub enroll: Option<Rc<ActionController>>,
    pub attendance: Option<Rc<ActionController>>,
    pub counters: usize,
    pub session: bool,
    listeners: Vec<ClickListener>,
}

impl PageBindings {
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

fn element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn listen_clicks(
    target: &HtmlElement,
    controller: &Rc<ActionController>,
) -> Result<ClickListener, BindError> {
    let controller = Rc::clone(controller);
    let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        controller.handle_click();
    });
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    Ok(ClickListener {
        target: target.clone(),
        closure,
    })
}

fn bind_counters(document: &Document, host: &Rc<dyn Host>) -> Result<usize, BindError> {
    let nodes = document.query_selector_all(&format!("[{}]", COUNTER_ATTR))?;
    let mut bound = 0;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let key = el.get_attribute(COUNTER_ATTR);
        let raw = el.dataset().get(COUNTER_TARGET_KEY);
        let target = parse_counter_target(raw.as_deref(), counter_default(key.as_deref()));
        debug!("counter {:?} -> {}", key, target);

        let view: Rc<dyn TextView> = Rc::new(DomText(el));
        let task_host = Rc::clone(host);
        host.spawn(Box::pin(async move {
            animate_counter(task_host, Some(view), CounterSpec::new(target)).await;
        }));
        bound += 1;
    }
    Ok(bound)
}

/// Resolve the dashboard elements in `document`, start the counters and
/// wire the action buttons.
///
/// On error the partially built bindings are dropped, which detaches every
/// listener attached so far.
pub fn bind_page(
    document: &Document,
    host: Rc<dyn Host>,
    transport: Rc<dyn ActionTransport>,
) -> Result<PageBindings, BindError> {
    let mut page = PageBindings {
        counters: bind_counters(document, &host)?,
        ..PageBindings::default()
    };

    if let (Some(button), Some(bar), Some(status)) = (
        element_by_id(document, ENROLL_BUTTON_ID),
        element_by_id(document, ENROLL_PROGRESS_ID),
        element_by_id(document, ENROLL_STATUS_ID),
    ) {
        let controller = ActionController::new(
            ActionProfile::enrollment(),
            ActionBindings {
                button: Rc::new(DomButton::new(button.clone())),
                status: Rc::new(DomText(status)),
                progress: Some(Rc::new(DomProgress(bar))),
            },
            Rc::clone(&host),
            Rc::clone(&transport),
        );
        page.listeners.push(listen_clicks(&button, &controller)?);
        page.enroll = Some(controller);
    }

    if let (Some(button), Some(status)) = (
        element_by_id(document, ATTENDANCE_BUTTON_ID),
        element_by_id(document, ATTENDANCE_STATUS_ID),
    ) {
        let controller = ActionController::new(
            ActionProfile::attendance(),
            ActionBindings {
                button: Rc::new(DomButton::new(button.clone())),
                status: Rc::new(DomText(status)),
                progress: None,
            },
            Rc::clone(&host),
            Rc::clone(&transport),
        );
        page.listeners.push(listen_clicks(&button, &controller)?);
        page.attendance = Some(controller);
    }

    if let Some(el) = element_by_id(document, SESSION_STATUS_ID) {
        let view: Rc<dyn TextView> = Rc::new(DomText(el));
        let transport = Rc::clone(&transport);
        host.spawn(Box::pin(async move {
            refresh_session(transport, view).await;
        }));
        page.session = true;
    }

    info!(
        "dashboard bound: {} counters, enroll={}, attendance={}, session={}",
        page.counters,
        page.enroll.is_some(),
        page.attendance.is_some(),
        page.session
    );
    Ok(page)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::controller::ButtonState;
    use crate::testing::{Harness, Reply, ScriptedTransport};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page(html: &str) -> Document {
        let document = gloo_utils::document();
        gloo_utils::body().set_inner_html(html);
        document
    }

    fn html_by_id(document: &Document, id: &str) -> HtmlElement {
        element_by_id(document, id).unwrap()
    }

    fn text_of(document: &Document, id: &str) -> String {
        html_by_id(document, id).text_content().unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn counters_animate_to_their_targets() {
        let document = page(
            r#"<span id="total" data-counter="total-students" data-target="120"></span>
               <span id="acc" data-counter="accuracy"></span>
               <span id="today" data-counter="today-attendance" data-target="oops"></span>"#,
        );
        let mut h = Harness::new();
        let transport = Rc::new(ScriptedTransport::new(&h.host, vec![]));

        let bound = bind_page(&document, h.host(), transport).unwrap();
        assert_eq!(bound.counters, 3);
        assert!(bound.enroll.is_none());
        assert!(bound.attendance.is_none());
        assert!(!bound.session);

        h.advance(1300);
        assert_eq!(text_of(&document, "total"), "120");
        assert_eq!(text_of(&document, "acc"), "98");
        assert_eq!(text_of(&document, "today"), "0");
    }

    #[wasm_bindgen_test]
    fn busy_marking_is_set_and_cleared() {
        let document = page(r#"<button id="b" data-student-id="17">Go</button>"#);
        let el = html_by_id(&document, "b");
        let button = DomButton::new(el.clone());
        assert_eq!(button.identifier().as_deref(), Some("17"));
        assert_eq!(button.label(), "Go");

        button.set_busy(true);
        assert_eq!(el.dataset().get(BUSY_KEY).as_deref(), Some("1"));
        assert!(el.class_list().contains(LOADING_CLASS));
        assert!(el.has_attribute("disabled"));

        button.set_busy(false);
        assert_eq!(el.dataset().get(BUSY_KEY).as_deref(), Some("0"));
        assert!(!el.class_list().contains(LOADING_CLASS));
        assert!(!el.has_attribute("disabled"));
    }

    #[wasm_bindgen_test]
    fn incomplete_groups_are_skipped() {
        // enrollment is missing its progress bar
        let document = page(
            r#"<button id="enrollStartBtn" data-student-id="3">Start</button>
               <div id="enrollStatus"></div>
               <button id="takeAttendanceBtn">Mark</button>
               <div id="takeAttendanceStatus"></div>"#,
        );
        let h = Harness::new();
        let transport = Rc::new(ScriptedTransport::new(&h.host, vec![]));

        let bound = bind_page(&document, h.host(), transport).unwrap();
        assert_eq!(bound.counters, 0);
        assert!(bound.enroll.is_none());
        assert!(bound.attendance.is_some());
        assert_eq!(bound.listener_count(), 1);
        assert_eq!(text_of(&document, "enrollStartBtn"), "Start");
    }

    #[wasm_bindgen_test]
    fn click_cycle_keeps_button_markup() {
        let markup = r#"<i class="icon-camera"></i> Take Attendance"#;
        let document = page(&format!(
            r#"<button id="takeAttendanceBtn">{}</button>
               <div id="takeAttendanceStatus"></div>"#,
            markup
        ));
        let mut h = Harness::new();
        let transport = Rc::new(ScriptedTransport::new(
            &h.host,
            vec![Reply::json(40, r#"{"success": true, "msg": "Marked"}"#)],
        ));

        let bound = bind_page(&document, h.host(), transport.clone()).unwrap();
        let button = html_by_id(&document, "takeAttendanceBtn");
        assert_eq!(button.inner_html(), markup);

        button.click();
        assert_eq!(button.text_content().as_deref(), Some("Recognizing..."));
        assert!(button.has_attribute("disabled"));

        h.advance(40);
        assert_eq!(text_of(&document, "takeAttendanceStatus"), "✅ Marked");
        assert_eq!(button.inner_html(), markup);
        assert!(!button.has_attribute("disabled"));
        assert_eq!(*transport.posts.borrow(), vec!["/take-attendance".to_string()]);
        drop(bound);
    }

    #[wasm_bindgen_test]
    fn dropped_bindings_stop_listening() {
        let document = page(
            r#"<button id="takeAttendanceBtn">Mark</button>
               <div id="takeAttendanceStatus"></div>"#,
        );
        let mut h = Harness::new();
        let transport = Rc::new(ScriptedTransport::new(&h.host, vec![]));

        let bound = bind_page(&document, h.host(), transport.clone()).unwrap();
        let controller = bound.attendance.clone().unwrap();
        drop(bound);

        html_by_id(&document, "takeAttendanceBtn").click();
        h.advance(100);
        assert_eq!(controller.state(), ButtonState::Idle);
        assert_eq!(controller.dispatch_count(), 0);
        assert!(transport.posts.borrow().is_empty());
    }
}

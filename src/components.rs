//! Yew view components for the dashboard.
//!
//! Components only render state; all behavior sits in the hooks, which in
//! turn drive the library controllers.

use crate::hooks::{use_action_button, use_counter, use_session_label};
use attendance_dash::config::{
    ATTENDANCE_BUTTON_ID, ATTENDANCE_STATUS_ID, DEFAULT_COUNTER_DURATION_MS, ENROLL_BUTTON_ID,
    ENROLL_PROGRESS_ID, ENROLL_STATUS_ID, LOADING_CLASS, SESSION_STATUS_ID,
};
use attendance_dash::utils::percent_width;
use attendance_dash::ActionProfile;
use yew::prelude::*;

/// One animated statistic.
#[derive(Properties, PartialEq)]
pub struct CounterTileProps {
    pub label: AttrValue,
    /// Counter role, e.g. `total-students`.
    pub counter: AttrValue,
    pub target: u64,
    #[prop_or(DEFAULT_COUNTER_DURATION_MS)]
    pub duration_ms: u32,
}

#[function_component(CounterTile)]
pub fn counter_tile(props: &CounterTileProps) -> Html {
    let value = use_counter(props.target, props.duration_ms);
    html! {
        <div class="stat-card">
            <div class="stat-value" data-counter={props.counter.clone()}>{ value }</div>
            <div class="stat-label">{ props.label.clone() }</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EnrollPanelProps {
    #[prop_or_default]
    pub student_id: Option<AttrValue>,
}

/// Face enrollment: button, simulated progress bar and status line.
#[function_component(EnrollPanel)]
pub fn enroll_panel(props: &EnrollPanelProps) -> Html {
    let state = use_action_button(
        ActionProfile::enrollment(),
        props.student_id.as_ref().map(|id| id.to_string()),
    );

    html! {
        <div class="enroll-panel">
            <button
                id={ENROLL_BUTTON_ID}
                class={classes!("btn-primary", state.busy.then_some(LOADING_CLASS))}
                disabled={state.busy}
                onclick={state.onclick.clone()}
            >
                { state.label.clone() }
            </button>
            <div class="progress">
                <div
                    id={ENROLL_PROGRESS_ID}
                    class="progress-bar"
                    style={format!("width: {}", percent_width(state.progress))}
                />
            </div>
            <p id={ENROLL_STATUS_ID} class="status-text">{ state.status.clone() }</p>
        </div>
    }
}

/// Attendance marking: button and status line, no progress bar.
#[function_component(AttendancePanel)]
pub fn attendance_panel() -> Html {
    let state = use_action_button(ActionProfile::attendance(), None);

    html! {
        <div class="attendance-panel">
            <button
                id={ATTENDANCE_BUTTON_ID}
                class={classes!("btn-primary", state.busy.then_some(LOADING_CLASS))}
                disabled={state.busy}
                onclick={state.onclick.clone()}
            >
                { state.label.clone() }
            </button>
            <p id={ATTENDANCE_STATUS_ID} class="status-text">{ state.status.clone() }</p>
        </div>
    }
}

#[function_component(SessionBadge)]
pub fn session_badge() -> Html {
    let label = use_session_label();
    if label.is_empty() {
        return html! {};
    }
    html! {
        <span id={SESSION_STATUS_ID} class="session-badge">{ label }</span>
    }
}

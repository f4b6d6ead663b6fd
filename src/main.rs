//! Client-rendered attendance dashboard using Yew.
//! Mounts onto `#dashboard-root` and reads its initial figures from the
//! root element's data attributes.

use attendance_dash::config::{DASHBOARD_ROOT_ID, DEFAULT_ACCURACY_TARGET, STUDENT_ID_KEY};
use attendance_dash::logging;
use attendance_dash::utils::parse_counter_target;
use log::{error, LevelFilter};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

mod components;
mod hooks;

use components::{AttendancePanel, CounterTile, EnrollPanel, SessionBadge};

/// Figures rendered by the dashboard, taken from the mount element.
#[derive(Properties, PartialEq, Default)]
pub struct DashboardProps {
    pub total_students: u64,
    pub today_attendance: u64,
    pub accuracy: u64,
    pub student_id: Option<AttrValue>,
}

impl DashboardProps {
    /// `data-total-students`, `data-today-attendance`, `data-accuracy` and
    /// `data-student-id` on the root element.
    fn from_root(root: &HtmlElement) -> Self {
        let data = root.dataset();
        Self {
            total_students: parse_counter_target(data.get("totalStudents").as_deref(), 0),
            today_attendance: parse_counter_target(data.get("todayAttendance").as_deref(), 0),
            accuracy: parse_counter_target(
                data.get("accuracy").as_deref(),
                DEFAULT_ACCURACY_TARGET,
            ),
            student_id: data
                .get(STUDENT_ID_KEY)
                .filter(|id| !id.trim().is_empty())
                .map(AttrValue::from),
        }
    }
}

/// Primary application component.
#[function_component(App)]
fn app(props: &DashboardProps) -> Html {
    html! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h2>{ "Dashboard" }</h2>
                <SessionBadge />
            </header>

            <div class="stats-row">
                <CounterTile
                    label="Total Students"
                    counter="total-students"
                    target={props.total_students}
                />
                <CounterTile
                    label="Today's Attendance"
                    counter="today-attendance"
                    target={props.today_attendance}
                />
                <CounterTile
                    label="Recognition Accuracy"
                    counter="accuracy"
                    target={props.accuracy}
                />
            </div>

            <div class="actions-row">
                <EnrollPanel student_id={props.student_id.clone()} />
                <AttendancePanel />
            </div>
        </div>
    }
}

/// Entry point: mounts the dashboard onto its root element.
fn main() {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);

    let Some(root) = gloo_utils::document().get_element_by_id(DASHBOARD_ROOT_ID) else {
        error!("#{} not found, nothing to render", DASHBOARD_ROOT_ID);
        return;
    };
    let props = root
        .dyn_ref::<HtmlElement>()
        .map(DashboardProps::from_root)
        .unwrap_or_default();
    yew::Renderer::<App>::with_root_and_props(root, props).render();
}

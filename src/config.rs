//! Application-level configuration constants.

// Counter animation
pub const DEFAULT_COUNTER_DURATION_MS: u32 = 1200;
pub const DEFAULT_ACCURACY_TARGET: u64 = 98;

// Progress simulation
pub const PROGRESS_TICK_MS: u32 = 70;
pub const PROGRESS_STEP: u8 = 4;
pub const PROGRESS_MAX: u8 = 100;

// Settle delays before a button returns to idle
pub const ENROLL_SETTLE_MS: u32 = 800;
pub const ATTENDANCE_SETTLE_MS: u32 = 0;

// Endpoints
pub const ENROLL_ENDPOINT: &str = "/enroll/capture/{id}";
pub const ATTENDANCE_ENDPOINT: &str = "/take-attendance";
pub const SESSION_ENDPOINT: &str = "/api/current-session";
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

// Button labels
pub const ENROLL_IDLE_LABEL: &str = "▶ Start Enrollment";
pub const ENROLL_BUSY_LABEL: &str = "Capturing...";
pub const ATTENDANCE_IDLE_LABEL: &str = "Mark Attendance";
pub const ATTENDANCE_BUSY_LABEL: &str = "Recognizing...";

// Status messages
pub const ENROLL_PENDING_MSG: &str = "Opening camera...";
pub const ATTENDANCE_PENDING_MSG: &str = "Opening camera and recognizing...";
pub const MISSING_ID_MSG: &str = "❌ Missing student id.";
pub const TRANSPORT_FALLBACK_MSG: &str = "Error while contacting server.";
pub const CONTRACT_FALLBACK_MSG: &str = "Server returned invalid response.";
pub const SESSION_UNAVAILABLE_MSG: &str = "Session info unavailable.";
pub const SUCCESS_GLYPH: &str = "✅ ";
pub const FAILURE_GLYPH: &str = "❌ ";

// DOM bindings
pub const COUNTER_ATTR: &str = "data-counter";
pub const COUNTER_TARGET_KEY: &str = "target";
pub const ACCURACY_COUNTER: &str = "accuracy";
pub const ENROLL_BUTTON_ID: &str = "enrollStartBtn";
pub const ENROLL_PROGRESS_ID: &str = "enrollProgressBar";
pub const ENROLL_STATUS_ID: &str = "enrollStatus";
pub const ATTENDANCE_BUTTON_ID: &str = "takeAttendanceBtn";
pub const ATTENDANCE_STATUS_ID: &str = "takeAttendanceStatus";
pub const SESSION_STATUS_ID: &str = "sessionStatus";
pub const STUDENT_ID_KEY: &str = "studentId";
pub const BUSY_KEY: &str = "busy";
pub const LOADING_CLASS: &str = "loading";
pub const DASHBOARD_ROOT_ID: &str = "dashboard-root";

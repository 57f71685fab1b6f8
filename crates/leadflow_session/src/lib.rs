//! Active-workspace resolution for Leadflow sessions.
//!
//! One [`WorkspaceSession`] exists per signed-in session. It tracks which
//! workspace is active, keeps that choice persisted write-through in two
//! redundant sinks (a durable context file and a cookie), and notifies
//! workspace-scoped views when the selection changes. It never filters
//! data itself - collaborators scope their queries by the active id.

pub mod cookie;
pub mod session;
pub mod store;

pub use cookie::{
    clear_cookie_header, set_cookie_header, CookieJar, CookieSink, ACTIVE_WORKSPACE_COOKIE,
    COOKIE_MAX_AGE_SECS, COOKIE_PATH,
};
pub use session::{SessionError, SessionStatus, WorkspaceSession};
pub use store::{FileSelectionStore, MemorySelectionStore, SelectionStore};

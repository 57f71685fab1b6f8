//! Cookie mirror of the active-workspace selection.
//!
//! Server-rendered request paths cannot read the local context file, so
//! every selection change is also written to a cookie. The session only
//! renders the `Set-Cookie` attribute string; delivering it on a response
//! is the caller's concern.

use leadflow_core::DataAccessError;
use std::sync::Mutex;

/// Cookie name carrying the active workspace id.
pub const ACTIVE_WORKSPACE_COOKIE: &str = "active_workspace_id";

/// Cookie is visible on every application path.
pub const COOKIE_PATH: &str = "/";

/// One year, in seconds.
pub const COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// Render the `Set-Cookie` value that persists a selection.
pub fn set_cookie_header(workspace_id: &str) -> String {
    format!(
        "{}={}; Path={}; Max-Age={}; SameSite=Lax",
        ACTIVE_WORKSPACE_COOKIE, workspace_id, COOKIE_PATH, COOKIE_MAX_AGE_SECS
    )
}

/// Render the `Set-Cookie` value that expires the selection cookie.
pub fn clear_cookie_header() -> String {
    format!(
        "{}=; Path={}; Max-Age=0; SameSite=Lax",
        ACTIVE_WORKSPACE_COOKIE, COOKIE_PATH
    )
}

/// Write side of the cookie mirror.
pub trait CookieSink: Send + Sync {
    fn set(&self, workspace_id: &str) -> Result<(), DataAccessError>;
    fn get(&self) -> Option<String>;
    fn clear(&self) -> Result<(), DataAccessError>;
}

/// In-process jar holding the selection cookie and the header a response
/// would have to carry to mirror it client-side.
#[derive(Default)]
pub struct CookieJar {
    value: Mutex<Option<String>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jar pre-loaded from an incoming request's cookie header value.
    pub fn with_value(workspace_id: &str) -> Self {
        Self {
            value: Mutex::new(Some(workspace_id.to_string())),
        }
    }

    /// The `Set-Cookie` header reflecting the jar's current state.
    pub fn pending_header(&self) -> String {
        match self.value.lock().expect("cookie jar poisoned").as_deref() {
            Some(id) => set_cookie_header(id),
            None => clear_cookie_header(),
        }
    }
}

impl CookieSink for CookieJar {
    fn set(&self, workspace_id: &str) -> Result<(), DataAccessError> {
        *self.value.lock().expect("cookie jar poisoned") = Some(workspace_id.to_string());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        self.value.lock().expect("cookie jar poisoned").clone()
    }

    fn clear(&self) -> Result<(), DataAccessError> {
        *self.value.lock().expect("cookie jar poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_header_carries_path_age_and_samesite() {
        assert_eq!(
            set_cookie_header("ws-42"),
            "active_workspace_id=ws-42; Path=/; Max-Age=31536000; SameSite=Lax"
        );
    }

    #[test]
    fn clear_header_expires_the_cookie() {
        assert_eq!(
            clear_cookie_header(),
            "active_workspace_id=; Path=/; Max-Age=0; SameSite=Lax"
        );
    }

    #[test]
    fn jar_mirrors_the_last_write() {
        let jar = CookieJar::new();
        assert_eq!(jar.get(), None);

        jar.set("ws-1").unwrap();
        assert_eq!(jar.get(), Some("ws-1".to_string()));
        assert!(jar.pending_header().starts_with("active_workspace_id=ws-1;"));

        jar.clear().unwrap();
        assert_eq!(jar.get(), None);
        assert!(jar.pending_header().contains("Max-Age=0"));
    }
}

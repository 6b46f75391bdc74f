//! Navigation shell
//!
//! The host side of every screen: a route stack screens can `replace` or
//! `push` onto, and a place to raise alerts.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Screens the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    Profile,
    Feed,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::SignIn => "/auth/SignIn",
            Self::SignUp => "/auth/SignUp",
            Self::Profile => "/home/Profile",
            Self::Feed => "/home/Home",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Tab bar shown on the signed-in screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeTab {
    /// The status feed
    Home,
    Profile,
}

impl HomeTab {
    /// Bar order
    pub const ALL: [Self; 2] = [Self::Home, Self::Profile];

    pub fn route(self) -> Route {
        match self {
            Self::Home => Route::Feed,
            Self::Profile => Route::Profile,
        }
    }

    /// Press this tab while `current` is showing. Pressing the showing tab
    /// does nothing; any other tab replaces the route.
    pub fn press(self, current: HomeTab, shell: &dyn Shell) -> bool {
        if self == current {
            return false;
        }
        shell.replace(self.route());
        true
    }
}

/// Modal alert with a title and a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Host capabilities a screen can use
pub trait Shell: Send + Sync {
    /// Swap the current route for `route`
    fn replace(&self, route: Route);

    /// Open `route` on top of the current one
    fn push(&self, route: Route);

    fn alert(&self, alert: Alert);
}

/// A navigation request as issued by a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Replace(Route),
    Push(Route),
}

#[derive(Debug)]
struct ShellLog {
    stack: Vec<Route>,
    navigations: Vec<Navigation>,
    alerts: Vec<Alert>,
}

/// Shell that records every request; the route stack starts at Landing
#[derive(Debug, Clone)]
pub struct RecordingShell {
    log: Arc<Mutex<ShellLog>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::starting_at(Route::Landing)
    }

    pub fn starting_at(route: Route) -> Self {
        Self {
            log: Arc::new(Mutex::new(ShellLog {
                stack: vec![route],
                navigations: Vec::new(),
                alerts: Vec::new(),
            })),
        }
    }

    /// Route on top of the stack
    pub fn current_route(&self) -> Route {
        self.log
            .lock()
            .stack
            .last()
            .copied()
            .unwrap_or(Route::Landing)
    }

    pub fn stack(&self) -> Vec<Route> {
        self.log.lock().stack.clone()
    }

    pub fn navigations(&self) -> Vec<Navigation> {
        self.log.lock().navigations.clone()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.log.lock().alerts.clone()
    }

    pub fn last_alert(&self) -> Option<Alert> {
        self.log.lock().alerts.last().cloned()
    }
}

impl Default for RecordingShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for RecordingShell {
    fn replace(&self, route: Route) {
        let mut log = self.log.lock();
        log.stack.pop();
        log.stack.push(route);
        log.navigations.push(Navigation::Replace(route));
        debug!(route = %route, "Route replaced");
    }

    fn push(&self, route: Route) {
        let mut log = self.log.lock();
        log.stack.push(route);
        log.navigations.push(Navigation::Push(route));
        debug!(route = %route, "Route pushed");
    }

    fn alert(&self, alert: Alert) {
        debug!(title = %alert.title, message = %alert.message, "Alert raised");
        self.log.lock().alerts.push(alert);
    }
}

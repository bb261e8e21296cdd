//! Route guard
//!
//! Pure gating of navigation against the current [`SessionState`]. The
//! embedding UI re-evaluates [`resolve`] on every navigation or state
//! change; the guard itself performs no I/O and holds no state.

use crate::store::SessionState;

/// Views the application can navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    StudentPortal,
}

impl Route {
    /// Whether the view requires an authenticated session.
    pub fn is_protected(self) -> bool {
        match self {
            Self::Login | Self::Register => false,
            Self::Dashboard | Self::StudentPortal => true,
        }
    }
}

/// Outcome of a guarded navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested view.
    Render(Route),
    /// Navigate elsewhere instead.
    Redirect(Route),
}

/// Gate a navigation request against the current session state.
pub fn resolve(requested: Route, state: &SessionState) -> RouteDecision {
    if requested.is_protected() && !state.is_authenticated() {
        RouteDecision::Redirect(Route::Login)
    } else {
        RouteDecision::Render(requested)
    }
}

/// Where the root path lands, depending on session state.
pub fn landing(state: &SessionState) -> Route {
    if state.is_authenticated() {
        Route::Dashboard
    } else {
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated_state() -> SessionState {
        let identity = serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.edu",
            "first_name": "Alice",
            "last_name": "Kumar",
            "role": "student",
            "college": 1
        }))
        .unwrap();
        SessionState::with_identity(identity)
    }

    #[test]
    fn protected_routes_redirect_when_unauthenticated() {
        let state = SessionState::default();
        assert_eq!(
            resolve(Route::Dashboard, &state),
            RouteDecision::Redirect(Route::Login)
        );
        assert_eq!(
            resolve(Route::StudentPortal, &state),
            RouteDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn public_routes_always_render() {
        let state = SessionState::default();
        assert_eq!(
            resolve(Route::Login, &state),
            RouteDecision::Render(Route::Login)
        );
        assert_eq!(
            resolve(Route::Register, &state),
            RouteDecision::Render(Route::Register)
        );
    }

    #[test]
    fn protected_routes_render_when_authenticated() {
        let state = authenticated_state();
        assert_eq!(
            resolve(Route::Dashboard, &state),
            RouteDecision::Render(Route::Dashboard)
        );
    }

    #[test]
    fn root_lands_on_dashboard_or_login() {
        assert_eq!(landing(&SessionState::default()), Route::Login);
        assert_eq!(landing(&authenticated_state()), Route::Dashboard);
    }
}

//! Access decisions for protected views.
//!
//! Given the current session state and an optional required role, decide
//! whether a view may render. Wrong-role users are sent to the neutral
//! landing view, not an error page. The attempted destination is not
//! remembered across the login redirect.

use crate::auth::SessionState;
use crate::models::Role;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Session still initializing: show a placeholder, decide nothing yet.
    Pending,
    /// Render the requested view.
    Granted,
    /// Not signed in: go to the login entry point.
    RedirectToLogin,
    /// Signed in with the wrong role: go to the default landing view.
    RedirectToHome,
}

pub fn evaluate(state: &SessionState, required_role: Option<Role>) -> RouteAccess {
    match state {
        SessionState::Initializing => RouteAccess::Pending,
        SessionState::Anonymous => RouteAccess::RedirectToLogin,
        SessionState::Authenticated(user) => match required_role {
            Some(role) if user.role != role => RouteAccess::RedirectToHome,
            _ => RouteAccess::Granted,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;

    fn student() -> SessionState {
        SessionState::Authenticated(UserProfile {
            id: 7,
            email: "tom@example.edu".into(),
            first_name: "Tom".into(),
            last_name: "Sawyer".into(),
            role: Role::Student,
        })
    }

    #[test]
    fn test_initializing_defers_without_redirect() {
        assert_eq!(
            evaluate(&SessionState::Initializing, Some(Role::Professor)),
            RouteAccess::Pending
        );
        assert_eq!(evaluate(&SessionState::Initializing, None), RouteAccess::Pending);
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        assert_eq!(
            evaluate(&SessionState::Anonymous, None),
            RouteAccess::RedirectToLogin
        );
        assert_eq!(
            evaluate(&SessionState::Anonymous, Some(Role::Student)),
            RouteAccess::RedirectToLogin
        );
    }

    #[test]
    fn test_wrong_role_redirects_home() {
        assert_eq!(
            evaluate(&student(), Some(Role::Professor)),
            RouteAccess::RedirectToHome
        );
    }

    #[test]
    fn test_matching_or_unrestricted_role_grants() {
        assert_eq!(evaluate(&student(), Some(Role::Student)), RouteAccess::Granted);
        assert_eq!(evaluate(&student(), None), RouteAccess::Granted);
    }
}

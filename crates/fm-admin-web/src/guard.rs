//! Navigable routes and the session guard in front of protected screens

use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use fm_admin_client::Session;
use std::sync::Arc;
use tracing::debug;

/// Every screen the console can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public landing page
    Landing,
    /// Public login screen
    Login,
    /// Aggregated overview
    Dashboard,
    /// Gallery management
    Gallery,
    /// Booking inquiries
    Bookings,
    /// Local preferences
    Settings,
    /// Anything unmatched
    NotFound,
}

impl Route {
    /// Protected screens, in sidebar order
    pub const PROTECTED: [Self; 4] = [Self::Dashboard, Self::Gallery, Self::Bookings, Self::Settings];

    /// Screen owning `path`; nested paths such as `/gallery/upload` map to
    /// their top-level screen
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let first = path
            .trim_start_matches('/')
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();

        match first {
            "" => Self::Landing,
            "login" => Self::Login,
            "dashboard" => Self::Dashboard,
            "gallery" => Self::Gallery,
            "bookings" => Self::Bookings,
            "settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    /// Canonical path of the screen
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Gallery => "/gallery",
            Self::Bookings => "/bookings",
            Self::Settings => "/settings",
            Self::NotFound => "/404",
        }
    }

    /// Sidebar and page title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Landing => "Welcome",
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Gallery => "Gallery",
            Self::Bookings => "Bookings",
            Self::Settings => "Settings",
            Self::NotFound => "Not Found",
        }
    }

    /// Whether rendering requires a session
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Gallery | Self::Bookings | Self::Settings
        )
    }
}

/// Guard verdict for one navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the requested screen
    Render,
    /// Send the operator elsewhere instead
    Redirect(Route),
}

/// Decides whether a screen may render
///
/// Presence of a token is the only criterion. The token is never validated
/// against the server, and the session is re-read on every check.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGuard;

impl SessionGuard {
    /// Verdict for navigating to `route` with `session`
    #[must_use]
    pub fn check(session: &Session, route: Route) -> Access {
        if route.is_protected() {
            Self::require(session)
        } else {
            Access::Render
        }
    }

    /// Verdict for a resource that always needs a session
    #[must_use]
    pub fn require(session: &Session) -> Access {
        if session.is_authenticated() {
            Access::Render
        } else {
            Access::Redirect(Route::Login)
        }
    }
}

/// Middleware applying [`SessionGuard::check`] to the screen owning the path
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let route = Route::from_path(request.uri().path());
    let access = SessionGuard::check(&state.session, route);
    enforce(access, request, next).await
}

/// Middleware applying [`SessionGuard::require`], for resources that are not
/// screens
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let access = SessionGuard::require(&state.session);
    enforce(access, request, next).await
}

async fn enforce(access: Access, request: Request, next: Next) -> Response {
    match access {
        Access::Render => next.run(request).await,
        Access::Redirect(target) => {
            debug!(
                "No session for {}, redirecting to {}",
                request.uri().path(),
                target.path()
            );
            Redirect::to(target.path()).into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        middleware,
        routing::get,
    };
    use fm_admin_client::MemoryTokenStore;
    use fm_admin_core::Config;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    #[test]
    fn test_from_path_maps_nested_paths() {
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path(""), Route::Landing);
        assert_eq!(Route::from_path("/login"), Route::Login);
        assert_eq!(Route::from_path("/dashboard"), Route::Dashboard);
        assert_eq!(Route::from_path("/gallery/upload"), Route::Gallery);
        assert_eq!(Route::from_path("/gallery/abc/delete"), Route::Gallery);
        assert_eq!(Route::from_path("/bookings/refresh"), Route::Bookings);
        assert_eq!(Route::from_path("/settings?tab=1"), Route::Settings);
        assert_eq!(Route::from_path("/galleryx"), Route::NotFound);
        assert_eq!(Route::from_path("/nope/deeper"), Route::NotFound);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [Route::Landing, Route::Login]
            .into_iter()
            .chain(Route::PROTECTED)
        {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_protected_set() {
        assert!(Route::PROTECTED.iter().all(|route| route.is_protected()));
        assert!(!Route::Landing.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::NotFound.is_protected());
    }

    #[test]
    fn test_anonymous_session_is_sent_to_login() {
        let session = Session::in_memory();
        for route in Route::PROTECTED {
            assert_eq!(
                SessionGuard::check(&session, route),
                Access::Redirect(Route::Login)
            );
        }
        assert_eq!(SessionGuard::check(&session, Route::Login), Access::Render);
        assert_eq!(SessionGuard::check(&session, Route::Landing), Access::Render);
    }

    #[test]
    fn test_any_token_renders_protected_screens() {
        let session = Session::restore(MemoryTokenStore::with_token("not-even-a-jwt"));
        for route in Route::PROTECTED {
            assert_eq!(SessionGuard::check(&session, route), Access::Render);
        }
    }

    #[test]
    fn test_require_ignores_route() {
        assert_eq!(
            SessionGuard::require(&Session::in_memory()),
            Access::Redirect(Route::Login)
        );
        let session = Session::restore(MemoryTokenStore::with_token("t"));
        assert_eq!(SessionGuard::require(&session), Access::Render);
    }

    async fn rendered() -> &'static str {
        "rendered"
    }

    fn guarded(session: Session) -> axum::Router {
        let state = Arc::new(AppState::new(Config::default(), session).unwrap());
        let screens = axum::Router::new()
            .route("/login", get(rendered))
            .route("/gallery/items", get(rendered))
            .route_layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                require_session,
            ));
        let sockets = axum::Router::new()
            .route("/ws/unseen", get(rendered))
            .route_layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                require_token,
            ));
        screens.merge(sockets).with_state(state)
    }

    async fn visit(app: &axum::Router, uri: &str) -> Response {
        app.clone()
            .oneshot(HttpRequest::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_middleware_verdict_depends_on_route() {
        let app = guarded(Session::in_memory());

        // Same layer, but the login screen is public
        assert_eq!(visit(&app, "/login").await.status(), StatusCode::OK);

        let response = visit(&app, "/gallery/items").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");

        let response = visit(&app, "/ws/unseen").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_middleware_admits_any_token() {
        let app = guarded(Session::restore(MemoryTokenStore::with_token("t")));

        assert_eq!(visit(&app, "/gallery/items").await.status(), StatusCode::OK);
        assert_eq!(visit(&app, "/ws/unseen").await.status(), StatusCode::OK);
    }

    #[test]
    fn test_guard_rereads_session() {
        let session = Session::restore(MemoryTokenStore::with_token("t"));
        assert_eq!(SessionGuard::check(&session, Route::Gallery), Access::Render);

        session.logout().ok();
        assert_eq!(
            SessionGuard::check(&session, Route::Gallery),
            Access::Redirect(Route::Login)
        );
    }
}

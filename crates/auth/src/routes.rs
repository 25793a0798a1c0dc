//! Role-based route gating.
//!
//! A UX convenience only: the backend enforces authorization on every call,
//! so nothing here carries a trust obligation. The guard exists to keep
//! role checks out of page code and to make denial behavior uniform.

use std::borrow::Cow;

use crate::Role;

/// Route the unauthenticated flow lands on.
pub const LOGIN_ROUTE: &str = "/login";

/// A navigable route and the roles allowed to reach it.
///
/// An empty required set means the route is public (guests included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: Cow<'static, str>,
    pub required_roles: Vec<Role>,
}

impl Route {
    pub fn public(path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: path.into(),
            required_roles: Vec::new(),
        }
    }

    pub fn restricted(path: impl Into<Cow<'static, str>>, roles: impl Into<Vec<Role>>) -> Self {
        Self {
            path: path.into(),
            required_roles: roles.into(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.required_roles.is_empty()
    }
}

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Guests attempting a protected route go to the login page.
    RedirectLogin,
    /// A logged-in user on the wrong route goes to their own home.
    RedirectHome(Role),
}

impl Role {
    /// Home route for a role; where wrong-role navigation is redirected.
    pub fn home_route(&self) -> &'static str {
        match self {
            Role::Guest => LOGIN_ROUTE,
            Role::User => "/dashboard",
            Role::Admin => "/admin",
        }
    }
}

/// Whether `role` may reach `route`. Pure policy check: no IO, no panics.
pub fn can_access(role: Role, route: &Route) -> bool {
    route.is_public() || route.required_roles.contains(&role)
}

/// Decide access and, on denial, where to send the caller.
pub fn decide(role: Role, route: &Route) -> Access {
    if can_access(role, route) {
        Access::Granted
    } else if role == Role::Guest {
        Access::RedirectLogin
    } else {
        Access::RedirectHome(role)
    }
}

/// The application's route table.
///
/// Looks up routes by path; paths nobody declared are treated as restricted
/// to no one (fail-closed), so a typo in a link can never widen access.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    routes: Vec<Route>,
}

impl RouteGuard {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The default table for this application.
    pub fn standard() -> Self {
        Self::new(vec![
            Route::public(LOGIN_ROUTE),
            Route::restricted("/dashboard", [Role::User, Role::Admin]),
            Route::restricted("/products", [Role::User, Role::Admin]),
            Route::restricted("/admin", [Role::Admin]),
        ])
    }

    pub fn route(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn decide(&self, role: Role, path: &str) -> Access {
        match self.route(path) {
            Some(route) => decide(role, route),
            None if role == Role::Guest => Access::RedirectLogin,
            None => Access::RedirectHome(role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guests_reach_only_public_routes() {
        let guard = RouteGuard::standard();

        assert_eq!(guard.decide(Role::Guest, LOGIN_ROUTE), Access::Granted);
        assert_eq!(guard.decide(Role::Guest, "/products"), Access::RedirectLogin);
        assert_eq!(guard.decide(Role::Guest, "/admin"), Access::RedirectLogin);
    }

    #[test]
    fn wrong_role_is_sent_home() {
        let guard = RouteGuard::standard();

        assert_eq!(guard.decide(Role::User, "/admin"), Access::RedirectHome(Role::User));
        assert_eq!(Role::User.home_route(), "/dashboard");
    }

    #[test]
    fn roles_reach_routes_that_include_them() {
        let guard = RouteGuard::standard();

        assert_eq!(guard.decide(Role::User, "/products"), Access::Granted);
        assert_eq!(guard.decide(Role::Admin, "/products"), Access::Granted);
        assert_eq!(guard.decide(Role::Admin, "/admin"), Access::Granted);
    }

    #[test]
    fn undeclared_paths_fail_closed() {
        let guard = RouteGuard::standard();

        assert_eq!(guard.decide(Role::Guest, "/reports"), Access::RedirectLogin);
        assert_eq!(guard.decide(Role::Admin, "/reports"), Access::RedirectHome(Role::Admin));
    }

    #[test]
    fn public_routes_are_open_to_everyone() {
        let route = Route::public("/about");
        for role in [Role::Guest, Role::User, Role::Admin] {
            assert!(can_access(role, &route));
        }
    }
}

use serde::Serialize;

use crate::session::{Role, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectLogin,
    RedirectStudentHome,
}

impl Decision {
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectLogin => Some(Route::Login.path()),
            Decision::RedirectStudentHome => Some(Route::StudentDashboard.path()),
        }
    }
}

/// Decides whether a protected page may render. Call it on every page
/// entry; the stored session can change between requests.
pub fn decide(session: Option<&Session>, requires_admin: bool) -> Decision {
    match session {
        None => Decision::RedirectLogin,
        Some(s) if requires_admin && s.role != Role::Admin => Decision::RedirectStudentHome,
        Some(_) => Decision::Allow,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Signup,
    ForgotPassword,
    StudentDashboard,
    Predict,
    AdminDashboard,
    AdminStudents,
    AdminFeedback,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::ForgotPassword => "/forgot-password",
            Route::StudentDashboard => "/dashboard",
            Route::Predict => "/predict",
            Route::AdminDashboard => "/admin/dashboard",
            Route::AdminStudents => "/admin/students",
            Route::AdminFeedback => "/admin/feedback",
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Route::AdminDashboard | Route::AdminStudents | Route::AdminFeedback
        )
    }
}

pub fn home_route(role: Role) -> Route {
    match role {
        Role::Student => Route::StudentDashboard,
        Role::Admin => Route::AdminDashboard,
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
}

const fn link(title: &'static str, href: &'static str) -> NavLink {
    NavLink { title, href }
}

const STUDENT_LINKS: [NavLink; 6] = [
    link("Dashboard", "/dashboard"),
    link("Performance", "/performance"),
    link("Predictions", "/predict"),
    link("Resources", "/resources"),
    link("Settings", "/settings"),
    link("Help", "/help"),
];

const ADMIN_LINKS: [NavLink; 6] = [
    link("Dashboard", "/admin/dashboard"),
    link("Students", "/admin/students"),
    link("Analytics", "/admin/analytics"),
    link("Predictions", "/admin/predictions"),
    link("Feedback", "/admin/feedback"),
    link("Settings", "/admin/settings"),
];

/// Sidebar links for a role.
pub fn nav_links(role: Role) -> &'static [NavLink] {
    match role {
        Role::Student => &STUDENT_LINKS,
        Role::Admin => &ADMIN_LINKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_redirects_to_login() {
        assert_eq!(decide(None, false), Decision::RedirectLogin);
        assert_eq!(decide(None, true), Decision::RedirectLogin);
    }

    #[test]
    fn student_on_admin_page_goes_home() {
        let student = Session::new("x", Role::Student);
        assert_eq!(decide(Some(&student), true), Decision::RedirectStudentHome);
        assert_eq!(decide(Some(&student), false), Decision::Allow);
    }

    #[test]
    fn admin_is_allowed_everywhere() {
        let admin = Session::new("x", Role::Admin);
        assert_eq!(decide(Some(&admin), true), Decision::Allow);
        assert_eq!(decide(Some(&admin), false), Decision::Allow);
    }

    #[test]
    fn redirect_paths_match_routes() {
        assert_eq!(Decision::Allow.redirect_path(), None);
        assert_eq!(Decision::RedirectLogin.redirect_path(), Some("/login"));
        assert_eq!(Decision::RedirectStudentHome.redirect_path(), Some("/dashboard"));
    }

    #[test]
    fn only_admin_routes_require_admin() {
        assert!(Route::AdminStudents.requires_admin());
        assert!(Route::AdminFeedback.requires_admin());
        assert!(!Route::Predict.requires_admin());
        assert!(!Route::Login.requires_admin());
    }

    #[test]
    fn roles_get_their_own_home_and_links() {
        assert_eq!(home_route(Role::Admin).path(), "/admin/dashboard");
        assert_eq!(home_route(Role::Student).path(), "/dashboard");
        assert_eq!(nav_links(Role::Admin)[1].title, "Students");
        let student_links = nav_links(Role::Student);
        assert!(student_links.iter().all(|l| !l.href.starts_with("/admin")));
    }
}

//! Simulated sign-in. No credentials are checked: any non-empty username
//! and password log in, and the username `admin` gets the admin role.

use serde::Deserialize;

use crate::error::{DashboardError, Result};
use crate::session::{Role, Session, SessionStore};

const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Deserialize, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResetForm {
    pub email: String,
}

fn required_fields_missing() -> DashboardError {
    DashboardError::validation("Please fill all required fields")
}

pub fn role_for(username: &str) -> Role {
    if username == ADMIN_USERNAME {
        Role::Admin
    } else {
        Role::Student
    }
}

pub fn login(store: &SessionStore, form: &LoginForm) -> Result<Session> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(required_fields_missing());
    }

    let session = Session::new(form.username.clone(), role_for(&form.username));
    store.set_session(&session)?;
    log::info!("{} logged in as {:?}", session.id, session.role);
    Ok(session)
}

/// Registers a student account and signs it in.
pub fn signup(store: &SessionStore, form: &SignupForm) -> Result<Session> {
    if form.username.is_empty()
        || form.email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(required_fields_missing());
    }
    if form.password != form.confirm_password {
        return Err(DashboardError::validation("Passwords don't match"));
    }

    let session = Session::new(form.username.clone(), Role::Student);
    store.set_session(&session)?;
    log::info!("account created for {}", session.id);
    Ok(session)
}

pub fn request_password_reset(form: &ResetForm) -> Result<()> {
    if form.email.trim().is_empty() {
        return Err(DashboardError::validation("Please enter your email"));
    }
    log::info!("password reset requested for {}", form.email.trim());
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    if let Some(session) = store.get_session() {
        log::info!("{} logged out", session.id);
    }
    store.clear_session()
}

use actix_web::{http::header, web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::auth::{self, LoginForm, ResetForm, SignupForm};
use crate::dashboard::{self, NotificationPanel};
use crate::error::Result;
use crate::feedback::{self, FeedbackForm};
use crate::guard::{decide, home_route, nav_links, Decision, NavLink, Route};
use crate::mock::MockData;
use crate::prediction::{PredictionForm, Predictor};
use crate::session::{Session, SessionStore};
use crate::students::{self, QueryState, ResultFilter, StudentRecord};

const SCORE_HISTORY_LEN: usize = 6;

pub struct AppState {
    pub sessions: SessionStore,
    pub roster: Vec<StudentRecord>,
    pub page_size: usize,
    pub seed: u64,
    predictor: Mutex<Predictor>,
    notifications: Mutex<NotificationPanel>,
}

impl AppState {
    pub fn new(
        sessions: SessionStore,
        roster: Vec<StudentRecord>,
        page_size: usize,
        seed: u64,
    ) -> Self {
        Self {
            sessions,
            roster,
            page_size,
            seed,
            predictor: Mutex::new(Predictor::new(seed)),
            notifications: Mutex::new(NotificationPanel::new()),
        }
    }

    // Each student gets a stable history for a given server seed.
    fn history_seed(&self, student_id: &str) -> u64 {
        student_id
            .bytes()
            .fold(self.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64))
    }
}

fn redirect(to: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, to))
        .finish()
}

/// Runs the access guard for `route` against the stored session.
/// On refusal the caller gets the redirect response to send.
fn guard(state: &AppState, route: Route) -> std::result::Result<Session, HttpResponse> {
    let session = state.sessions.get_session();
    match decide(session.as_ref(), route.requires_admin()) {
        Decision::Allow => session.ok_or_else(|| redirect(Route::Login.path())),
        decision => {
            let to = decision.redirect_path().unwrap_or(Route::Login.path());
            log::info!("{} refused, redirecting to {}", route.path(), to);
            Err(redirect(to))
        }
    }
}

macro_rules! guarded {
    ($state:expr, $route:expr) => {
        match guard($state, $route) {
            Ok(session) => session,
            Err(response) => return Ok(response),
        }
    };
}

#[derive(Serialize)]
struct SignedIn {
    session: Session,
    redirect: &'static str,
}

#[derive(Serialize)]
struct Message {
    message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct SessionView {
    session: Option<Session>,
    nav: &'static [NavLink],
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Student Dashboard API is running!")
}

async fn serve_homepage() -> HttpResponse {
    let html_content = r#"<!DOCTYPE html>
<html>
<head>
    <title>Student Performance Dashboard</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
        .container { background: #f5f5f5; padding: 25px; border-radius: 10px; }
        a.button { display: inline-block; background: #007bff; color: white; padding: 12px 24px; border-radius: 4px; text-decoration: none; margin: 5px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Student Performance Dashboard</h1>
        <p>Track assessment scores, see how your results are trending and get a predicted outcome for your module.</p>
        <p>Staff can browse the student list, review result breakdowns and send feedback.</p>
        <a class="button" href="/login">Sign In</a>
        <a class="button" href="/signup">Create Account</a>
    </div>
</body>
</html>"#;

    HttpResponse::Ok().content_type("text/html").body(html_content)
}

fn auth_page(route: Route) -> HttpResponse {
    let (title, endpoint, fields) = match route {
        Route::Signup => (
            "Create Account",
            "/auth/signup",
            &["username", "email", "phone", "password", "confirm_password"][..],
        ),
        Route::ForgotPassword => ("Reset Password", "/auth/forgot-password", &["email"][..]),
        _ => ("Sign In", "/auth/login", &["username", "password"][..]),
    };

    let inputs: String = fields
        .iter()
        .map(|name| {
            let kind = match name.contains("password") {
                true => "password",
                false => "text",
            };
            format!(r#"<label>{name}<input type="{kind}" name="{name}"></label>"#)
        })
        .collect();

    let html_content = format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title} - Student Performance Dashboard</title></head>
<body>
    <h1>{title}</h1>
    <form id="auth">{inputs}<button type="submit">{title}</button></form>
    <p id="status"></p>
    <script>
        document.getElementById('auth').addEventListener('submit', async (e) => {{
            e.preventDefault();
            const body = Object.fromEntries(new FormData(e.target));
            const response = await fetch('{endpoint}', {{
                method: 'POST',
                headers: {{'Content-Type': 'application/json'}},
                body: JSON.stringify(body)
            }});
            const data = await response.json();
            if (data.redirect) {{ window.location = data.redirect; }}
            document.getElementById('status').textContent = data.error || data.message || '';
        }});
    </script>
</body>
</html>"#
    );

    HttpResponse::Ok().content_type("text/html").body(html_content)
}

async fn login_page() -> HttpResponse {
    auth_page(Route::Login)
}

async fn signup_page() -> HttpResponse {
    auth_page(Route::Signup)
}

async fn forgot_password_page() -> HttpResponse {
    auth_page(Route::ForgotPassword)
}

async fn login(state: web::Data<AppState>, form: web::Json<LoginForm>) -> Result<HttpResponse> {
    let session = auth::login(&state.sessions, &form)?;
    let redirect = home_route(session.role).path();
    Ok(HttpResponse::Ok().json(SignedIn { session, redirect }))
}

async fn signup(state: web::Data<AppState>, form: web::Json<SignupForm>) -> Result<HttpResponse> {
    let session = auth::signup(&state.sessions, &form)?;
    let redirect = home_route(session.role).path();
    Ok(HttpResponse::Ok().json(SignedIn { session, redirect }))
}

async fn forgot_password(form: web::Json<ResetForm>) -> Result<HttpResponse> {
    auth::request_password_reset(&form)?;
    Ok(HttpResponse::Ok().json(Message::new(
        "Check your inbox for instructions to reset your password.",
    )))
}

async fn logout(state: web::Data<AppState>) -> Result<HttpResponse> {
    auth::logout(&state.sessions)?;
    Ok(redirect(Route::Landing.path()))
}

async fn current_session(state: web::Data<AppState>) -> HttpResponse {
    let session = state.sessions.get_session();
    let nav = session.as_ref().map(|s| nav_links(s.role)).unwrap_or(&[]);
    HttpResponse::Ok().json(SessionView { session, nav })
}

async fn student_dashboard(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = guarded!(&state, Route::StudentDashboard);
    let scores = MockData::new(state.history_seed(&session.id)).score_history(SCORE_HISTORY_LEN);
    let dashboard = dashboard::student_dashboard(&session, &state.roster, scores);
    Ok(HttpResponse::Ok().json(dashboard))
}

async fn predict(
    state: web::Data<AppState>,
    form: web::Json<PredictionForm>,
) -> Result<HttpResponse> {
    let session = guarded!(&state, Route::Predict);
    let prediction = state
        .predictor
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .predict(&form);
    log::info!("prediction for {}: {}", session.id, prediction.result);
    Ok(HttpResponse::Ok().json(prediction))
}

async fn notifications(state: web::Data<AppState>) -> Result<HttpResponse> {
    guarded!(&state, Route::StudentDashboard);
    let panel = state
        .notifications
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Ok(HttpResponse::Ok().json(NotificationList {
        notifications: panel.list(),
        unread: panel.unread_count(),
    }))
}

#[derive(Serialize)]
struct NotificationList<'a> {
    notifications: &'a [dashboard::Notification],
    unread: usize,
}

#[derive(Serialize)]
struct MarkedRead {
    link: Option<&'static str>,
    unread: usize,
}

async fn mark_notification_read(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    guarded!(&state, Route::StudentDashboard);
    let mut panel = state
        .notifications
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Ok(match panel.mark_read(&path) {
        Some(link) => HttpResponse::Ok().json(MarkedRead {
            link,
            unread: panel.unread_count(),
        }),
        None => HttpResponse::NotFound().json(Message::new("no such notification")),
    })
}

async fn admin_dashboard(state: web::Data<AppState>) -> Result<HttpResponse> {
    guarded!(&state, Route::AdminDashboard);
    Ok(HttpResponse::Ok().json(dashboard::admin_dashboard(&state.roster)))
}

#[derive(Debug, Deserialize)]
pub struct StudentsQuery {
    pub search: Option<String>,
    pub result: Option<String>,
    pub page: Option<usize>,
}

async fn list_students(
    state: web::Data<AppState>,
    params: web::Query<StudentsQuery>,
) -> Result<HttpResponse> {
    guarded!(&state, Route::AdminStudents);

    let mut query = QueryState::new(state.page_size);
    if let Some(term) = &params.search {
        query.set_search_term(term.as_str());
    }
    if let Some(result) = &params.result {
        query.set_result_filter(result.parse::<ResultFilter>()?);
    }
    query.page = params.page.unwrap_or(1);

    Ok(HttpResponse::Ok().json(students::query(&state.roster, &query)))
}

async fn send_feedback(
    state: web::Data<AppState>,
    form: web::Json<FeedbackForm>,
) -> Result<HttpResponse> {
    guarded!(&state, Route::AdminFeedback);
    let receipt = feedback::send_feedback(form.into_inner())?;
    Ok(HttpResponse::Ok().json(receipt))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route(Route::Landing.path(), web::get().to(serve_homepage))
        .route("/health", web::get().to(health_check))
        .route(Route::Login.path(), web::get().to(login_page))
        .route(Route::Signup.path(), web::get().to(signup_page))
        .route(Route::ForgotPassword.path(), web::get().to(forgot_password_page))
        .route("/auth/login", web::post().to(login))
        .route("/auth/signup", web::post().to(signup))
        .route("/auth/forgot-password", web::post().to(forgot_password))
        .route("/auth/logout", web::post().to(logout))
        .route("/session", web::get().to(current_session))
        .route(Route::StudentDashboard.path(), web::get().to(student_dashboard))
        .route(Route::Predict.path(), web::post().to(predict))
        .route("/notifications", web::get().to(notifications))
        .route("/notifications/{id}/read", web::post().to(mark_notification_read))
        .route(Route::AdminDashboard.path(), web::get().to(admin_dashboard))
        .route(Route::AdminStudents.path(), web::get().to(list_students))
        .route(Route::AdminFeedback.path(), web::post().to(send_feedback));
}

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;

use student_dashboard::api::{self, AppState};
use student_dashboard::config::Config;
use student_dashboard::mock::MockData;
use student_dashboard::session::{FileSlot, SessionStore};
use student_dashboard::students::{self, StudentRecord};

fn load_roster(config: &Config, seed: u64) -> anyhow::Result<Vec<StudentRecord>> {
    match &config.students_csv {
        Some(path) => students::load_students_csv(path)
            .with_context(|| format!("failed to load students from {}", path.display())),
        None => Ok(MockData::new(seed).roster(config.roster_size)),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate().context("invalid configuration")?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("using data seed {}", seed);

    let roster = load_roster(&config, seed)?;
    log::info!("loaded {} student records", roster.len());

    let sessions = SessionStore::new(FileSlot::new(config.session_file.clone()));
    let state = web::Data::new(AppState::new(sessions, roster, config.page_size, seed));

    log::info!(
        "starting student dashboard on http://{}:{}",
        config.host,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("server stopped unexpectedly")?;

    Ok(())
}

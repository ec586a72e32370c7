//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `projtrack_core` linkage and
//!   store bootstrap outside the web runtime.
//! - Keep output deterministic for quick local sanity checks.

use projtrack_core::db::open_db;
use projtrack_core::{
    default_log_level, init_logging, AppConfig, ProjectService, SqliteProjectRepository,
};

fn main() {
    println!("projtrack_core version={}", projtrack_core::core_version());

    let data_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./data".to_string());
    let config = AppConfig::new(data_dir);

    match smoke_check(&config) {
        Ok(count) => println!("store_bootstrap=ok projects={count}"),
        Err(message) => {
            eprintln!("store_bootstrap=failed error={message}");
            std::process::exit(1);
        }
    }
}

fn smoke_check(config: &AppConfig) -> Result<usize, String> {
    std::fs::create_dir_all(&config.data_dir)
        .map_err(|err| format!("failed to create data dir: {err}"))?;
    init_logging(default_log_level(), &config.log_dir())?;

    let conn = open_db(config.db_path()).map_err(|err| err.to_string())?;
    let repo = SqliteProjectRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = ProjectService::new(repo);

    let projects = service.list_projects().map_err(|err| err.to_string())?;
    Ok(projects.len())
}

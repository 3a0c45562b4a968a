//! Tests for the application bootstrap: store selection and readiness.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web;
use pagination::PageRequest;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::server::{ServerConfig, StartupError, build_user_repository, create_server};
use user_directory::domain::ports::UserRepository;
use user_directory::inbound::http::health::HealthState;
use user_directory::outbound::memory::InMemoryUserRepository;
use user_directory::settings::AppSettings;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

fn settings_with_users_file(path: PathBuf) -> AppSettings {
    AppSettings {
        host: None,
        port: 0,
        database_url: None,
        database_pool_size: None,
        users_file: Some(path),
    }
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>) {
    assert!(!health_state.is_ready(), "state should start unready");

    let config = ServerConfig::new("127.0.0.1", 0, Arc::new(InMemoryUserRepository::new()));
    let _server = create_server(health_state.clone(), config).expect("server should bind");

    assert!(health_state.is_ready(), "server creation should mark readiness");
}

#[actix_rt::test]
async fn seeded_store_serves_file_contents() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[{{"id": 4, "email": "eve.holt@reqres.in", "first_name": "Eve", "last_name": "Holt", "avatar": "https://reqres.in/img/faces/4-image.jpg"}}]"#
    )
    .expect("write seed");

    let repository = build_user_repository(&settings_with_users_file(file.path().to_path_buf()))
        .await
        .expect("store builds");
    let page = repository
        .list_page(PageRequest::default())
        .await
        .expect("page");
    assert_eq!(page.total, 1);
    assert!(repository.probe().await.expect("probe"));
}

#[actix_rt::test]
async fn missing_seed_file_starts_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repository = build_user_repository(&settings_with_users_file(dir.path().join("none.json")))
        .await
        .expect("store builds");
    assert!(!repository.probe().await.expect("probe"));
}

#[actix_rt::test]
async fn corrupt_seed_file_aborts_startup() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "not json").expect("write seed");

    let err = build_user_repository(&settings_with_users_file(file.path().to_path_buf()))
        .await
        .err()
        .expect("startup fails");
    assert!(matches!(err, StartupError::Seed(_)));
}

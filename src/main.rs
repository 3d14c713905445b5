//! 포켓 링크 인증 서비스 진입점
//!
//! 환경 설정을 읽고, 저장소에 연결하고, 서비스 그래프를 조립한 뒤 HTTP 서버를 띄웁니다.
//! 필수 설정이나 저장소 연결이 실패하면 서버를 열지 않고 종료합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use pocket_link_auth::caching::redis::RedisClient;
use pocket_link_auth::config::{
    profile_env_file, Environment, JwtConfig, ServerConfig, SessionConfig, StorageConfig,
    UserStoreKind,
};
use pocket_link_auth::core::AppContext;
use pocket_link_auth::db::Database;
use pocket_link_auth::repositories::users::{InMemoryUserRepository, MongoUserRepository, UserStore};
use pocket_link_auth::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_logging();
    load_env_file();

    let env = Environment::current();
    info!("🚀 포켓 링크 인증 서비스 시작중... (환경: {:?})", env);

    let jwt = JwtConfig::from_env(&env).map_err(startup_error)?;
    let session_config = SessionConfig::from_env(&env);
    info!(
        "세션 설정 - 액세스 TTL: {:?}, 리프레시 TTL: {:?}, 로그아웃 범위: {:?}",
        jwt.access_ttl, jwt.refresh_ttl, session_config.logout_scope
    );

    let user_store = initialize_user_store().await?;

    info!("📡 Redis 연결 중...");
    let redis = RedisClient::connect(&StorageConfig::redis_url())
        .await
        .map_err(startup_error)?;

    let ctx = AppContext::assemble(&env, &jwt, session_config, user_store, Arc::new(redis))
        .map_err(startup_error)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(web::Data::new(ctx)).await
}

async fn start_http_server(ctx: web::Data<AppContext>) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(ctx.clone())
            .configure(|cfg| configure_all_routes(cfg, &ctx))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 로거가 먼저 초기화되어 있어야 로드 결과가 기록됩니다.
/// 따라서 `RUST_LOG`는 `.env` 파일이 아닌 프로세스 환경에서 지정합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile_env_file(&profile) {
        Some(file) => match dotenv::from_filename(file) {
            Ok(_) => info!("{} 파일 로드 됨", file),
            Err(e) => error!("{} 파일 로드 실패: {}", file, e),
        },
        None => {
            dotenv().ok();
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

async fn initialize_user_store() -> io::Result<Arc<dyn UserStore>> {
    match StorageConfig::user_store() {
        UserStoreKind::Memory => {
            info!("사용자 저장소: 인메모리 (재시작 시 초기화됨)");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        UserStoreKind::Mongo => {
            info!("📡 MongoDB 연결 중...");
            let database = Database::connect(
                &StorageConfig::mongodb_uri(),
                &StorageConfig::database_name(),
            )
            .await
            .map_err(startup_error)?;

            let repo = MongoUserRepository::new(Arc::new(database));
            repo.create_indexes().await.map_err(startup_error)?;
            Ok(Arc::new(repo))
        }
    }
}

fn startup_error<E: std::fmt::Display>(e: E) -> io::Error {
    error!("❌ 시작 실패: {}", e);
    io::Error::other(e.to_string())
}

fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

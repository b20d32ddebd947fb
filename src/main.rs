use actix_web::{App, HttpServer, middleware::Logger, web};
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use chrono::Local;  // timestamp in log lines

use dorm_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{NicknameMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建服务
    let listing = config.listing;
    let user_service = UserService::new(pool.clone());
    let announcement_service = AnnouncementService::new(pool.clone(), listing);
    let url_category_service = UrlCategoryService::new(pool.clone());
    let url_service = UrlService::new(pool.clone());
    let history_service = LotteryHistoryService::new(pool.clone(), listing);
    let wheel_service = WheelConfigService::new(pool.clone(), history_service.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(NicknameMiddleware)
            .app_data(handlers::json_config())
            .app_data(handlers::query_config())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(announcement_service.clone()))
            .app_data(web::Data::new(url_category_service.clone()))
            .app_data(web::Data::new(url_service.clone()))
            .app_data(web::Data::new(wheel_service.clone()))
            .app_data(web::Data::new(history_service.clone()))
            .configure(swagger_config)
            .configure(handlers::health_config)
            .service(web::scope("/api/v1").configure(handlers::api_config))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}

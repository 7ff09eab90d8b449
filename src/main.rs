use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizdeck_server::{app_state::AppState, auth::AuthMiddleware, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    let state = AppState::new(config.clone())
        .await
        .expect("failed to initialize application state");

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.cors_allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(state.jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::health_check)
            .service(handlers::health_check_live)
            .service(handlers::health_check_ready)
            .service(
                web::scope("/api/auth")
                    .service(handlers::register)
                    .service(handlers::login),
            )
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .service(handlers::list_quizzes)
                    .service(handlers::get_quiz_answers)
                    .service(handlers::get_quiz)
                    .service(handlers::create_quiz)
                    .service(handlers::update_quiz)
                    .service(handlers::delete_quiz)
                    .service(handlers::submit_result)
                    // my-results must be registered before the {id} route
                    .service(handlers::list_my_results)
                    .service(handlers::list_all_results)
                    .service(handlers::get_result)
                    .service(handlers::list_users),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoResultRepository, MongoUserRepository},
    services::{QuizService, ResultService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub result_service: Arc<ResultService>,
    pub jwt_service: JwtService,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let result_repository = Arc::new(MongoResultRepository::new(&db));
        result_repository.ensure_indexes().await?;

        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            jwt_service.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(quiz_repository.clone()));
        let result_service = Arc::new(ResultService::new(
            result_repository,
            quiz_repository,
            user_repository,
        ));

        Ok(Self {
            user_service,
            quiz_service,
            result_service,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}

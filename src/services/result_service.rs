use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{require_owner_or_admin, Claims},
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizResult, User},
    models::dto::request::SubmitResultRequest,
    models::dto::response::ResultDto,
    repositories::{QuizRepository, ResultRepository, UserRepository},
    services::grading_service::GradingService,
};

pub struct ResultService {
    results: Arc<dyn ResultRepository>,
    quizzes: Arc<dyn QuizRepository>,
    users: Arc<dyn UserRepository>,
}

impl ResultService {
    pub fn new(
        results: Arc<dyn ResultRepository>,
        quizzes: Arc<dyn QuizRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            results,
            quizzes,
            users,
        }
    }

    /// Grade a submitted attempt and persist its result. Exactly one result
    /// is stored per call; any validation or storage failure stores nothing.
    pub async fn submit_result(
        &self,
        claims: &Claims,
        request: SubmitResultRequest,
    ) -> AppResult<ResultDto> {
        request.validate()?;

        let quiz = self
            .quizzes
            .find_by_id(&request.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with id '{}' not found", request.quiz_id))
            })?;

        // The client clock is not trusted beyond the quiz's own limit.
        if request.time_taken_secs > quiz.time_limit_secs() {
            return Err(AppError::ValidationError(format!(
                "Time taken ({}s) exceeds the quiz time limit ({}s)",
                request.time_taken_secs,
                quiz.time_limit_secs()
            )));
        }

        let graded = GradingService::grade(&quiz.questions, &request.answers)?;

        let result = QuizResult::new(
            &claims.sub,
            &quiz.id,
            graded.score,
            graded.total_questions,
            graded.correct_answers,
            request.time_taken_secs,
            graded.outcomes,
        );

        let stored = self.results.create(result).await?;

        log::info!(
            "User {} scored {}/{} on quiz {}",
            claims.username,
            stored.correct_answers,
            stored.total_questions,
            quiz.id
        );

        let mut dto = ResultDto::from_result(stored, Some(&quiz), None);
        dto.username = Some(claims.username.clone());
        Ok(dto)
    }

    /// Fetch one result. Only the owner or an admin may see it; everyone else
    /// gets an explicit denial rather than a not-found.
    pub async fn get_result(&self, claims: &Claims, id: &str) -> AppResult<ResultDto> {
        let result = self
            .results
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Result with id '{}' not found", id)))?;

        require_owner_or_admin(claims, &result.user_id)?;

        let quiz = self.quizzes.find_by_id(&result.quiz_id).await?;
        let user = self.users.find_by_id(&result.user_id).await?;

        Ok(ResultDto::from_result(result, quiz.as_ref(), user.as_ref()))
    }

    /// The caller's results, newest first.
    pub async fn list_my_results(&self, claims: &Claims) -> AppResult<Vec<ResultDto>> {
        let results = self.results.find_by_user(&claims.sub).await?;
        let quiz_cache = self.load_quizzes(&results).await?;

        Ok(results
            .into_iter()
            .map(|result| {
                let quiz = quiz_cache.get(&result.quiz_id);
                let mut dto = ResultDto::from_result(result, quiz, None);
                dto.username = Some(claims.username.clone());
                dto
            })
            .collect())
    }

    /// Every result, newest first, denormalized for the admin dashboard.
    /// Callers must be admin-gated.
    pub async fn list_all_results(&self) -> AppResult<Vec<ResultDto>> {
        let results = self.results.find_all().await?;
        let quiz_cache = self.load_quizzes(&results).await?;

        let mut user_cache: HashMap<String, Option<User>> = HashMap::new();
        for result in &results {
            if !user_cache.contains_key(&result.user_id) {
                let user = self.users.find_by_id(&result.user_id).await?;
                user_cache.insert(result.user_id.clone(), user);
            }
        }

        Ok(results
            .into_iter()
            .map(|result| {
                let quiz = quiz_cache.get(&result.quiz_id);
                let user = user_cache.get(&result.user_id).and_then(|u| u.as_ref());
                ResultDto::from_result(result, quiz, user)
            })
            .collect())
    }

    /// Read-side join: fetch each referenced quiz once. Deleted quizzes are
    /// simply absent from the map.
    async fn load_quizzes(&self, results: &[QuizResult]) -> AppResult<HashMap<String, Quiz>> {
        let mut cache = HashMap::new();
        for result in results {
            if cache.contains_key(&result.quiz_id) {
                continue;
            }
            if let Some(quiz) = self.quizzes.find_by_id(&result.quiz_id).await? {
                cache.insert(result.quiz_id.clone(), quiz);
            }
        }
        Ok(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::user::UserRole;
    use crate::repositories::{MockQuizRepository, MockResultRepository, MockUserRepository};
    use crate::test_utils::fixtures::{submission_for, two_question_quiz};

    fn service_with(
        results: MockResultRepository,
        quizzes: MockQuizRepository,
        users: MockUserRepository,
    ) -> ResultService {
        ResultService::new(Arc::new(results), Arc::new(quizzes), Arc::new(users))
    }

    fn user_claims(user_id: &str) -> Claims {
        Claims::test_claims(user_id, "taker", UserRole::User)
    }

    #[tokio::test]
    async fn test_submit_grades_and_persists_once() {
        let quiz = two_question_quiz();
        let found = quiz.clone();

        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));

        let mut results = MockResultRepository::new();
        results.expect_create().times(1).returning(Ok);

        let service = service_with(results, quizzes, MockUserRepository::new());
        let request = submission_for(&quiz, &[Some(1), Some(1)], 90);

        let dto = service
            .submit_result(&user_claims("user-1"), request)
            .await
            .unwrap();

        assert_eq!(dto.score, 1);
        assert_eq!(dto.correct_answers, 1);
        assert_eq!(dto.total_questions, 2);
        assert_eq!(dto.quiz_title.as_deref(), Some("Canonical"));
        assert_eq!(dto.username.as_deref(), Some("taker"));
        assert!(dto.answers[0].is_correct);
        assert!(!dto.answers[1].is_correct);
    }

    #[tokio::test]
    async fn test_submit_all_correct() {
        let quiz = two_question_quiz();
        let found = quiz.clone();

        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));

        let mut results = MockResultRepository::new();
        results.expect_create().times(1).returning(Ok);

        let service = service_with(results, quizzes, MockUserRepository::new());
        let request = submission_for(&quiz, &[Some(1), Some(0)], 30);

        let dto = service
            .submit_result(&user_claims("user-1"), request)
            .await
            .unwrap();

        assert_eq!(dto.score, 3);
        assert_eq!(dto.correct_answers, 2);
    }

    #[tokio::test]
    async fn test_submit_unknown_quiz_is_not_found_and_stores_nothing() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| Ok(None));

        // No expectation on create: a call would panic the test.
        let results = MockResultRepository::new();

        let service = service_with(results, quizzes, MockUserRepository::new());
        let request = SubmitResultRequest {
            quiz_id: "missing".to_string(),
            answers: vec![],
            time_taken_secs: 0,
        };

        let outcome = service.submit_result(&user_claims("user-1"), request).await;
        assert!(matches!(outcome, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_time_beyond_limit() {
        let quiz = two_question_quiz();
        let found = quiz.clone();

        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));

        let results = MockResultRepository::new();
        let service = service_with(results, quizzes, MockUserRepository::new());

        let request = submission_for(&quiz, &[Some(1), Some(0)], quiz.time_limit_secs() + 1);
        let outcome = service.submit_result(&user_claims("user-1"), request).await;

        assert!(matches!(outcome, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_short_answer_set() {
        let quiz = two_question_quiz();
        let found = quiz.clone();

        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));

        let results = MockResultRepository::new();
        let service = service_with(results, quizzes, MockUserRepository::new());

        let mut request = submission_for(&quiz, &[Some(1), Some(0)], 10);
        request.answers.truncate(1);

        let outcome = service.submit_result(&user_claims("user-1"), request).await;
        assert!(matches!(outcome, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_get_result_owner_can_view() {
        let stored = QuizResult::new("user-1", "quiz-1", 2, 1, 1, 30, vec![]);
        let result_id = stored.id.clone();

        let mut results = MockResultRepository::new();
        results
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| Ok(None));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = service_with(results, quizzes, users);
        let dto = service
            .get_result(&user_claims("user-1"), &result_id)
            .await
            .unwrap();

        assert_eq!(dto.user_id, "user-1");
    }

    #[tokio::test]
    async fn test_get_result_foreign_user_is_forbidden() {
        let stored = QuizResult::new("user-1", "quiz-1", 2, 1, 1, 30, vec![]);
        let result_id = stored.id.clone();

        let mut results = MockResultRepository::new();
        results
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        // Join lookups must not run for a denied caller: no data may leak.
        let service = service_with(results, MockQuizRepository::new(), MockUserRepository::new());

        let outcome = service
            .get_result(&user_claims("someone-else"), &result_id)
            .await;

        assert!(matches!(outcome, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_get_result_admin_can_view_any() {
        let stored = QuizResult::new("user-1", "quiz-1", 2, 1, 1, 30, vec![]);
        let result_id = stored.id.clone();

        let mut results = MockResultRepository::new();
        results
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| Ok(None));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = service_with(results, quizzes, users);
        let admin = Claims::test_claims("admin-1", "root", UserRole::Admin);

        let dto = service.get_result(&admin, &result_id).await.unwrap();
        assert_eq!(dto.user_id, "user-1");
    }

    #[tokio::test]
    async fn test_get_result_missing_is_not_found() {
        let mut results = MockResultRepository::new();
        results.expect_find_by_id().returning(|_| Ok(None));

        let service = service_with(results, MockQuizRepository::new(), MockUserRepository::new());
        let outcome = service.get_result(&user_claims("user-1"), "missing").await;

        assert!(matches!(outcome, Err(AppError::NotFound(_))));
    }
}

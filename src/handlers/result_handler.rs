use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::SubmitResultRequest,
};

#[post("/results")]
pub async fn submit_result(
    state: web::Data<AppState>,
    request: web::Json<SubmitResultRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .result_service
        .submit_result(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

// Registered before `get_result` so the literal segment wins over `{id}`.
#[get("/results/my-results")]
pub async fn list_my_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state.result_service.list_my_results(&auth.0).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/results")]
pub async fn list_all_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let results = state.result_service.list_all_results().await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/results/{id}")]
pub async fn get_result(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state.result_service.get_result(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(result))
}

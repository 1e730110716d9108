use axum::{Json, Router, routing::post};

use crate::data::{OptimizationRequest, OptimizationResult};
use crate::solver;

async fn fractional_handler(
    Json(request): Json<OptimizationRequest>,
) -> Result<Json<OptimizationResult>, (axum::http::StatusCode, String)> {
    if request.timetable.is_empty() {
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            "Timetable is empty; nothing to optimize.".to_string(),
        ));
    }
    match solver::optimize_fractional(
        &request.timetable,
        &request.student_profile,
        &request.priorities,
        request.target_percent,
    ) {
        Some(result) => Ok(Json(result)),
        None => Err((
            axum::http::StatusCode::BAD_REQUEST,
            "No feasible attendance selection for the given timetable.".to_string(),
        )),
    }
}

async fn integer_handler(
    Json(request): Json<OptimizationRequest>,
) -> Result<Json<OptimizationResult>, (axum::http::StatusCode, String)> {
    if request.timetable.is_empty() {
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            "Timetable is empty; nothing to optimize.".to_string(),
        ));
    }
    match solver::optimize_integer(
        &request.timetable,
        &request.student_profile,
        &request.priorities,
        request.target_percent,
    ) {
        Some(result) => Ok(Json(result)),
        None => Err((
            axum::http::StatusCode::BAD_REQUEST,
            "No integer attendance selection satisfies the given constraints.".to_string(),
        )),
    }
}

pub async fn run_server() {
    let app = Router::new()
        .route(
            "/v1/attendance/optimize/fractional",
            post(fractional_handler),
        )
        .route("/v1/attendance/optimize/integer", post(integer_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

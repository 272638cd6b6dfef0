// src/routes.rs
use std::convert::Infallible;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::compare::{get_comparison, CompareQuery};
use crate::handlers::error::ApiError;
use crate::handlers::overview::get_country_summary;

// Recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = warp::http::StatusCode::BAD_GATEWAY;
        message = api_error.message.clone();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query parameters".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes() -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let summary_route = warp::path!("api" / "v1" / "emissions" / String / "summary")
        .and(warp::get())
        .and_then(get_country_summary);

    let compare_route = warp::path!("api" / "v1" / "emissions" / "compare")
        .and(warp::get())
        .and(warp::query::<CompareQuery>())
        .and_then(get_comparison);

    info!("All routes configured successfully.");

    compare_route.or(summary_route).recover(handle_rejection)
}

use actix_web::{
    error::InternalError, get, http::StatusCode, post, web, HttpResponse, ResponseError,
};
use kcal_model::{
    api::{ActivityLevelInfo, ErrorKind, ErrorResponse},
    biometrics::{ActivityLevel, BiometricInput, CalculationRequest, ValidationError},
    estimate::{self, CalorieEstimate},
};
use log::{info, warn};
use strum::IntoEnumIterator;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
struct ApiError(#[from] ValidationError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(&self.0))
    }
}

/// Bodies that fail to parse get the same error shape as bodies that fail
/// validation.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected malformed request: {}", err);
        let body = ErrorResponse {
            error: ErrorKind::InvalidInput,
            message: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

#[post("/api/calculate")]
async fn calculate(
    request: web::Json<CalculationRequest>,
) -> Result<web::Json<CalorieEstimate>, ApiError> {
    let (input, estimate) = BiometricInput::try_from(request.into_inner())
        .and_then(|input| estimate::estimate(&input).map(|estimate| (input, estimate)))
        .map_err(|e| {
            warn!("Rejected calculation request: {}", e);
            e
        })?;
    info!(
        "Estimated {} kcal/day ({}, {}, activity {})",
        estimate.total_calories,
        input.unit_system(),
        input.sex(),
        input.activity()
    );
    Ok(web::Json(estimate))
}

#[get("/api/activity-levels")]
async fn activity_levels() -> web::Json<Vec<ActivityLevelInfo>> {
    web::Json(ActivityLevel::iter().map(ActivityLevelInfo::from).collect())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(calculate)
        .service(activity_levels);
}

#[cfg(test)]
mod tests {
    use actix_web::{http::header::ContentType, test, App};
    use serde_json::{json, Value};

    use super::*;

    #[actix_web::test]
    async fn calculates_metric_male() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/calculate")
            .set_json(json!({
                "age": 30,
                "weight": 80,
                "height": 180,
                "sex": "male",
                "activityFactor": 1.55,
                "unitSystem": "metric"
            }))
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["totalCalories"], json!(2759.0));
        assert_eq!(body["bmr"], json!(1780.0));
    }

    #[actix_web::test]
    async fn calculates_metric_female() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/calculate")
            .set_json(json!({
                "age": 25,
                "weight": 60,
                "height": 165,
                "sex": "female",
                "activityFactor": 1.2,
                "unitSystem": "metric"
            }))
            .to_request();

        let body: CalorieEstimate = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.total_calories, 1614.3);
    }

    #[actix_web::test]
    async fn unknown_activity_factor_is_rejected() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/calculate")
            .set_json(json!({
                "age": 30,
                "weight": 80,
                "height": 180,
                "sex": "male",
                "activityFactor": 1.3,
                "unitSystem": "metric"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, ErrorKind::InvalidActivityLevel);
    }

    #[actix_web::test]
    async fn non_positive_values_are_rejected() {
        let app = test::init_service(App::new().configure(configure)).await;

        for (age, weight, height) in [(0, 80, 180), (30, -80, 180), (30, 80, 0)] {
            let req = test::TestRequest::post()
                .uri("/api/calculate")
                .set_json(json!({
                    "age": age,
                    "weight": weight,
                    "height": height,
                    "sex": "male",
                    "activityFactor": 1.2,
                    "unitSystem": "metric"
                }))
                .to_request();

            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body.error, ErrorKind::InvalidInput);
        }
    }

    #[actix_web::test]
    async fn unrepresentable_results_are_rejected() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/calculate")
            .set_json(json!({
                "age": 30,
                "weight": 1e308,
                "height": 180,
                "sex": "male",
                "activityFactor": 1.9,
                "unitSystem": "imperial"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, ErrorKind::InvalidInput);
    }

    #[actix_web::test]
    async fn non_numeric_values_are_invalid_input() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/calculate")
            .insert_header(ContentType::json())
            .set_payload(
                r#"{"age":"thirty","weight":80,"height":180,"sex":"male","activityFactor":1.2,"unitSystem":"metric"}"#,
            )
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, ErrorKind::InvalidInput);
    }

    #[actix_web::test]
    async fn missing_fields_are_invalid_input() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/calculate")
            .set_json(json!({ "age": 30, "sex": "male" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, ErrorKind::InvalidInput);
    }

    #[actix_web::test]
    async fn lists_activity_levels_in_order() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/activity-levels")
            .to_request();

        let body: Vec<ActivityLevelInfo> = test::call_and_read_body_json(&app, req).await;

        let factors: Vec<f64> = body.iter().map(|level| level.activity_factor).collect();
        assert_eq!(factors, vec![1.2, 1.375, 1.55, 1.725, 1.9]);
        assert_eq!(body[0].label, "Sedentary (little or no exercise)");
    }
}

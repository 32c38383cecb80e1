//! Admin review of driver applications.
//!
//! ```text
//! GET  /api/v1/admin/driver-applications
//! POST /api/v1/admin/driver-applications/{id}/status {"status":"approved"}
//! GET  /api/v1/admin/stats
//! ```
//!
//! Every route needs a signed-in caller; the review service checks the admin
//! role before touching the platform.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DashboardStats, DriverApplication, Error, FormKind, ReviewDecision};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_choice, parse_uuid};

/// Request body for a review decision.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReviewPayload {
    /// `approved` or `rejected`.
    #[schema(example = "approved")]
    pub status: String,
}

fn parse_decision(raw: &str) -> ApiResult<ReviewDecision> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "approved" => Ok(ReviewDecision::Approved),
        "rejected" => Ok(ReviewDecision::Rejected),
        _ => Err(invalid_choice("status", raw, "approved|rejected")),
    }
}

/// List every driver application, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/driver-applications",
    responses(
        (status = 200, description = "Applications", body = [DriverApplication]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 503, description = "Platform unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listDriverApplications"
)]
#[get("/admin/driver-applications")]
pub async fn list_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DriverApplication>>> {
    let caller = session.require_caller()?;
    let applications = state.review.list_applications(&caller).await?;
    Ok(web::Json(applications))
}

/// Approve or reject a pending application.
#[utoipa::path(
    post,
    path = "/api/v1/admin/driver-applications/{id}/status",
    params(("id" = String, Path, description = "Application id")),
    request_body = ReviewPayload,
    responses(
        (status = 200, description = "Updated application", body = DriverApplication),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Unknown application", body = Error),
        (status = 409, description = "Already reviewed or review in flight", body = Error)
    ),
    tags = ["admin"],
    operation_id = "reviewDriverApplication"
)]
#[post("/admin/driver-applications/{id}/status")]
pub async fn review_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewPayload>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let application_id = parse_uuid(&path.into_inner(), "id")?;
    let decision = parse_decision(&payload.status)?;
    let _permit = state.begin_submission(&session, FormKind::ReviewApplication)?;
    let updated = state
        .review
        .review(&caller, application_id, decision)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Fleet summary for the dashboard cards.
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getAdminStats"
)]
#[get("/admin/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardStats>> {
    let caller = session.require_caller()?;
    Ok(web::Json(state.review.stats(&caller).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::App;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::ports::{
        FIXTURE_ADMIN_EMAIL, FIXTURE_APPROVED_APPLICATION_ID, FIXTURE_PASSENGER_EMAIL,
        FIXTURE_PASSWORD, FIXTURE_PENDING_APPLICATION_ID,
    };
    use crate::inbound::http::auth::sign_in;
    use crate::inbound::http::test_utils::{
        fixture_http_state, session_cookie, test_session_middleware,
    };

    macro_rules! admin_app {
        () => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(fixture_http_state()))
                    .wrap(test_session_middleware())
                    .service(
                        web::scope("/api/v1")
                            .service(sign_in)
                            .service(list_applications)
                            .service(review_application)
                            .service(stats),
                    ),
            )
            .await
        };
    }

    macro_rules! cookie_for {
        ($app:expr, $email:expr) => {{
            let res = actix_test::call_service(
                $app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/auth/sign-in")
                    .set_json(json!({ "email": $email, "password": FIXTURE_PASSWORD }))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK);
            session_cookie(&res)
        }};
    }

    #[rstest]
    #[case("approved", ReviewDecision::Approved)]
    #[case(" Rejected ", ReviewDecision::Rejected)]
    fn parses_known_decisions(#[case] raw: &str, #[case] expected: ReviewDecision) {
        assert_eq!(parse_decision(raw).expect("decision"), expected);
    }

    #[rstest]
    fn rejects_unknown_decision() {
        let err = parse_decision("pending").expect_err("pending is not a decision");
        assert_eq!(
            err.details().and_then(|d| d.get("code")).and_then(Value::as_str),
            Some("invalid_choice")
        );
    }

    #[actix_web::test]
    async fn anonymous_callers_are_unauthorised() {
        let app = admin_app!();
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/admin/stats").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn passengers_are_forbidden() {
        let app = admin_app!();
        let cookie = cookie_for!(&app, FIXTURE_PASSENGER_EMAIL);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/driver-applications")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn admin_lists_applications_and_reads_stats() {
        let app = admin_app!();
        let cookie = cookie_for!(&app, FIXTURE_ADMIN_EMAIL);

        let list = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/driver-applications")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(list.status(), StatusCode::OK);
        let list: Value = actix_test::read_body_json(list).await;
        assert_eq!(list.as_array().map(Vec::len), Some(2));

        let summary = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(summary.status(), StatusCode::OK);
        let summary: Value = actix_test::read_body_json(summary).await;
        assert_eq!(summary["totalDrivers"], 1);
        assert_eq!(summary["pendingApplications"], 1);
    }

    #[actix_web::test]
    async fn admin_approves_pending_application() {
        let app = admin_app!();
        let cookie = cookie_for!(&app, FIXTURE_ADMIN_EMAIL);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!(
                    "/api/v1/admin/driver-applications/{FIXTURE_PENDING_APPLICATION_ID}/status"
                ))
                .cookie(cookie)
                .set_json(json!({ "status": "approved" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "approved");
    }

    #[rstest]
    #[case::already_reviewed(FIXTURE_APPROVED_APPLICATION_ID.to_string(), "rejected", StatusCode::CONFLICT)]
    #[case::malformed_id("not-a-uuid".to_owned(), "approved", StatusCode::BAD_REQUEST)]
    #[case::unknown_decision(FIXTURE_PENDING_APPLICATION_ID.to_string(), "maybe", StatusCode::BAD_REQUEST)]
    #[case::unknown_application(uuid::Uuid::nil().to_string(), "approved", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn review_failures(
        #[case] id: String,
        #[case] status: &str,
        #[case] expected: StatusCode,
    ) {
        let app = admin_app!();
        let cookie = cookie_for!(&app, FIXTURE_ADMIN_EMAIL);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/admin/driver-applications/{id}/status"))
                .cookie(cookie)
                .set_json(json!({ "status": status }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }
}

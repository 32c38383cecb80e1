//! Passenger dashboard: profile, ride history and booking.
//!
//! ```text
//! GET /api/v1/me
//! GET /api/v1/me/rides
//! POST /api/v1/rides {"pickupAddress":"Mall","destinationAddress":"Airport"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookingRequest, Error, FormKind, Ride, UserProfile, VehicleType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, invalid_choice};

/// Request body for `POST /api/v1/rides`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRidePayload {
    #[schema(example = "Downtown Mall")]
    pub pickup_address: String,
    #[schema(example = "Airport Terminal 2")]
    pub destination_address: String,
    /// `economy` (default), `comfort` or `premium`.
    #[serde(default)]
    #[schema(example = "economy")]
    pub vehicle_type: Option<String>,
}

fn parse_vehicle_type(raw: Option<&str>) -> Result<Option<VehicleType>, Error> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    serde_json::from_value(serde_json::Value::String(raw.to_ascii_lowercase()))
        .map(Some)
        .map_err(|_| invalid_choice("vehicleType", raw, "economy|comfort|premium"))
}

/// Profile of the signed-in passenger.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No profile row yet", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "currentProfile"
)]
#[get("/me")]
pub async fn current_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserProfile>> {
    let caller = session.require_caller()?;
    Ok(web::Json(state.dashboard.profile(&caller).await?))
}

/// The five most recent rides, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/me/rides",
    responses(
        (status = 200, description = "Recent rides", body = [Ride]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "recentRides"
)]
#[get("/me/rides")]
pub async fn recent_rides(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Ride>>> {
    let caller = session.require_caller()?;
    Ok(web::Json(state.dashboard.recent_rides(&caller).await?))
}

/// Request a ride.
#[utoipa::path(
    post,
    path = "/api/v1/rides",
    request_body = BookRidePayload,
    responses(
        (status = 201, description = "Ride requested", body = Ride),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Submission already in flight", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "bookRide"
)]
#[post("/rides")]
pub async fn book_ride(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BookRidePayload>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let vehicle_type = parse_vehicle_type(payload.vehicle_type.as_deref())?;
    let booking = BookingRequest::try_new(
        &payload.pickup_address,
        &payload.destination_address,
        vehicle_type,
    )
    .map_err(|err| field_error(&err))?;
    let _permit = state.begin_submission(&session, FormKind::BookRide)?;
    let ride = state.dashboard.book_ride(&caller, booking).await?;
    Ok(HttpResponse::Created().json(ride))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::ports::{FIXTURE_PASSENGER_EMAIL, FIXTURE_PASSENGER_ID, FIXTURE_PASSWORD};
    use crate::domain::{MAX_ESTIMATED_FARE, MIN_ESTIMATED_FARE};
    use crate::inbound::http::auth::sign_in;
    use crate::inbound::http::test_utils::{
        fixture_http_state, session_cookie, test_session_middleware,
    };

    macro_rules! dashboard_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(fixture_http_state()))
                    .wrap(test_session_middleware())
                    .service(
                        web::scope("/api/v1")
                            .service(sign_in)
                            .service(current_profile)
                            .service(recent_rides)
                            .service(book_ride),
                    ),
            )
            .await
        };
    }

    macro_rules! signed_in_cookie {
        ($app:expr) => {{
            let res = test::call_service(
                $app,
                test::TestRequest::post()
                    .uri("/api/v1/auth/sign-in")
                    .set_json(json!({ "email": FIXTURE_PASSENGER_EMAIL, "password": FIXTURE_PASSWORD }))
                    .to_request(),
            )
            .await;
            session_cookie(&res)
        }};
    }

    #[rstest]
    #[case("/api/v1/me")]
    #[case("/api/v1/me/rides")]
    #[actix_web::test]
    async fn anonymous_callers_are_unauthorised(#[case] uri: &str) {
        let app = dashboard_app!();
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn profile_and_rides_for_signed_in_passenger() {
        let app = dashboard_app!();
        let cookie = signed_in_cookie!(&app);

        let profile = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/me")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(profile.status(), StatusCode::OK);
        let profile: Value = test::read_body_json(profile).await;
        assert_eq!(profile["role"], "passenger");

        let rides = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/me/rides")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let rides: Value = test::read_body_json(rides).await;
        assert!(rides.as_array().is_some_and(|r| r.len() <= 5));
    }

    #[actix_web::test]
    async fn booking_returns_requested_ride() {
        let app = dashboard_app!();
        let cookie = signed_in_cookie!(&app);
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/rides")
                .cookie(cookie)
                .set_json(json!({
                    "pickupAddress": "Downtown Mall",
                    "destinationAddress": "Airport",
                    "vehicleType": "premium"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let ride: Value = test::read_body_json(res).await;
        assert_eq!(ride["status"], "requested");
        assert_eq!(ride["vehicleType"], "premium");
        let fare = ride["estimatedFare"].as_f64().expect("fare");
        assert!((f64::from(MIN_ESTIMATED_FARE)..=f64::from(MAX_ESTIMATED_FARE)).contains(&fare));
    }

    #[actix_web::test]
    async fn booking_while_one_is_pending_conflicts() {
        let state = web::Data::new(fixture_http_state());
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").service(sign_in).service(book_ride)),
        )
        .await;
        let cookie = signed_in_cookie!(&app);
        let book = || {
            test::TestRequest::post()
                .uri("/api/v1/rides")
                .cookie(cookie.clone())
                .set_json(json!({ "pickupAddress": "Mall", "destinationAddress": "Airport" }))
                .to_request()
        };

        let passenger = uuid::Uuid::parse_str(FIXTURE_PASSENGER_ID).expect("passenger id");
        let pending = state
            .submissions
            .try_acquire(passenger, FormKind::BookRide)
            .expect("first booking in flight");
        let res = test::call_service(&app, book()).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "submission_in_flight");
        assert_eq!(body["details"]["form"], "book_ride");

        drop(pending);
        let res = test::call_service(&app, book()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[case(json!({ "pickupAddress": "", "destinationAddress": "Airport" }), "pickupAddress")]
    #[case(json!({ "pickupAddress": "Mall", "destinationAddress": " " }), "destinationAddress")]
    #[case(
        json!({ "pickupAddress": "Mall", "destinationAddress": "Airport", "vehicleType": "limo" }),
        "vehicleType"
    )]
    #[actix_web::test]
    async fn booking_rejects_bad_forms(#[case] body: Value, #[case] field: &str) {
        let app = dashboard_app!();
        let cookie = signed_in_cookie!(&app);
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/rides")
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: Value = test::read_body_json(res).await;
        assert_eq!(payload["details"]["field"], field);
    }
}

//! Home page feedback widget.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, Feedback, FormKind, Language};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;

/// Request body for `POST /api/v1/feedback`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FeedbackPayload {
    /// Stars from one to five; zero means none selected.
    #[serde(default)]
    #[schema(example = 5)]
    pub rating: u8,
    #[serde(default)]
    #[schema(example = "Quick pickup and a friendly driver.")]
    pub message: String,
}

/// Acknowledgement shown in place of the form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAcknowledgement {
    #[schema(example = 5)]
    pub rating: u8,
    /// Word shown under the stars, in the session language.
    #[schema(example = "Excellent")]
    pub rating_label: String,
    #[schema(example = "Thank You!")]
    pub title: String,
    pub message: String,
    pub language: Language,
}

/// Accept a rating and comment from a visitor.
///
/// Feedback is recorded in the service log only; no account is required.
#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    request_body = FeedbackPayload,
    responses(
        (status = 200, description = "Feedback received", body = FeedbackAcknowledgement),
        (status = 400, description = "Missing rating or message", body = Error),
        (status = 409, description = "Submission in flight", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "submitFeedback",
    security([])
)]
#[post("/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FeedbackPayload>,
) -> ApiResult<HttpResponse> {
    let feedback = Feedback::try_new(payload.rating, &payload.message)
        .map_err(|err| field_error(&err))?;
    let _permit = state.begin_submission(&session, FormKind::Feedback)?;
    let language = session.language()?;
    info!(
        rating = feedback.rating().stars(),
        message = feedback.message(),
        "visitor feedback received"
    );
    let catalogue = &state.catalogue;
    Ok(HttpResponse::Ok().json(FeedbackAcknowledgement {
        rating: feedback.rating().stars(),
        rating_label: catalogue
            .translate(language, feedback.rating().label_key())
            .to_owned(),
        title: catalogue.translate(language, "feedback.thank.you").to_owned(),
        message: catalogue
            .translate(language, "feedback.thanks.message")
            .to_owned(),
        language,
    }))
}

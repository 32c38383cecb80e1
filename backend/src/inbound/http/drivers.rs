//! Driver application submission.
//!
//! Documents travel inside the JSON body, base64 encoded, keyed by the form
//! field of their slot:
//!
//! ```text
//! POST /api/v1/drivers/applications
//! {
//!   "firstName": "Omar", "lastName": "Hassan", "email": "omar@example.com",
//!   "phone": "+966500000000", "identityType": "national_id",
//!   "identityNumber": "1098765432", "password": "...", "passwordConfirmation": "...",
//!   "documents": {
//!     "driverPhoto": [{"fileName": "me.jpg", "contentType": "image/jpeg", "data": "..."}],
//!     "drivingLicense": [...]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, post, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{FailedUpload, RegistrationReceipt, UploadedDocument};
use crate::domain::{DocumentKind, DriverApplicationDraft, Error, FormKind, UploadedFile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, invalid_choice};

/// One file of a document slot.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilePayload {
    #[schema(example = "license_front.jpg")]
    pub file_name: String,
    #[schema(example = "image/jpeg")]
    pub content_type: String,
    /// File content, standard base64.
    pub data: String,
}

/// Request body for `POST /api/v1/drivers/applications`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverApplicationPayload {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// `national_id`, `passport` or `driver_license`.
    #[serde(default)]
    pub identity_type: String,
    #[serde(default)]
    pub identity_number: String,
    #[serde(default)]
    #[schema(value_type = String)]
    pub password: Zeroizing<String>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub password_confirmation: Zeroizing<String>,
    /// Files keyed by slot: driverPhoto, drivingLicense, leadershipLicense,
    /// driverCard, carFrontPhoto, carBackPhoto, criminalRecord.
    #[serde(default)]
    pub documents: BTreeMap<String, Vec<DocumentFilePayload>>,
}

/// Outcome of a submitted application.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverApplicationResponse {
    pub application_id: Uuid,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    pub uploaded: Vec<UploadedDocument>,
    /// Files whose upload failed; the application was recorded without them.
    pub failed: Vec<FailedUpload>,
}

impl From<RegistrationReceipt> for DriverApplicationResponse {
    fn from(receipt: RegistrationReceipt) -> Self {
        Self {
            application_id: receipt.application_id,
            user_id: receipt.session.user_id.to_string(),
            uploaded: receipt.uploaded,
            failed: receipt.failed,
        }
    }
}

fn slot_for(field: &str) -> Result<DocumentKind, Error> {
    DocumentKind::ALL
        .into_iter()
        .find(|kind| kind.field_name() == field)
        .ok_or_else(|| {
            invalid_choice(
                "documents",
                field,
                "driverPhoto|drivingLicense|leadershipLicense|driverCard|carFrontPhoto|carBackPhoto|criminalRecord",
            )
        })
}

fn decode_file(kind: DocumentKind, file: DocumentFilePayload) -> Result<UploadedFile, Error> {
    let bytes = STANDARD.decode(file.data.trim()).map_err(|err| {
        Error::invalid_request(format!("{} is not valid base64: {err}", kind.field_name()))
            .with_details(json!({
                "field": kind.field_name(),
                "code": "invalid_base64",
            }))
    })?;
    Ok(UploadedFile {
        file_name: file.file_name,
        content_type: file.content_type,
        bytes,
    })
}

impl TryFrom<DriverApplicationPayload> for DriverApplicationDraft {
    type Error = Error;

    fn try_from(payload: DriverApplicationPayload) -> Result<Self, Self::Error> {
        let mut documents = BTreeMap::new();
        for (field, files) in payload.documents {
            let kind = slot_for(&field)?;
            let decoded = files
                .into_iter()
                .map(|file| decode_file(kind, file))
                .collect::<Result<Vec<_>, _>>()?;
            documents.insert(kind, decoded);
        }
        Ok(Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            identity_type: payload.identity_type,
            identity_number: payload.identity_number,
            password: payload.password,
            password_confirmation: payload.password_confirmation,
            documents,
        })
    }
}

/// Create the applicant's account, upload their documents one by one and
/// record a pending application.
///
/// Nothing is uploaded unless the whole form is valid. A failed upload does
/// not stop the remaining ones; it is listed under `failed`.
#[utoipa::path(
    post,
    path = "/api/v1/drivers/applications",
    request_body = DriverApplicationPayload,
    responses(
        (status = 201, description = "Application recorded", body = DriverApplicationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Account exists or submission in flight", body = Error),
        (status = 503, description = "Platform unavailable", body = Error)
    ),
    tags = ["drivers"],
    operation_id = "submitDriverApplication",
    security([])
)]
#[post("/drivers/applications")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DriverApplicationPayload>,
) -> ApiResult<HttpResponse> {
    let draft = DriverApplicationDraft::try_from(payload.into_inner())?;
    let form = draft.validate().map_err(|err| field_error(&err))?;
    let _permit = state.begin_submission(&session, FormKind::DriverApplication)?;
    let receipt = state.registration.register(form).await?;
    session.persist_auth(&receipt.session)?;
    info!(
        application_id = %receipt.application_id,
        failed = receipt.failed.len(),
        "driver application accepted"
    );
    Ok(HttpResponse::Created().json(DriverApplicationResponse::from(receipt)))
}

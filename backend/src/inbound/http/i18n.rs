//! Language choice and translation catalogues.
//!
//! ```text
//! GET /api/v1/i18n/{lang}
//! GET /api/v1/language
//! PUT /api/v1/language {"language":"ar"}
//! POST /api/v1/language/toggle
//! ```

use std::collections::BTreeMap;

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, Language, TextDirection, UnsupportedLanguage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Every message of one language.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueResponse {
    pub language: Language,
    pub direction: TextDirection,
    pub messages: BTreeMap<String, String>,
}

/// The session's interface language and its layout direction.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResponse {
    pub language: Language,
    pub direction: TextDirection,
}

impl From<Language> for LanguageResponse {
    fn from(language: Language) -> Self {
        Self {
            language,
            direction: language.direction(),
        }
    }
}

/// Request body for `PUT /api/v1/language`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRequest {
    #[schema(example = "ar")]
    pub language: String,
}

pub(crate) fn parse_language(raw: &str, field: &'static str) -> Result<Language, Error> {
    raw.parse().map_err(|err: UnsupportedLanguage| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field,
            "value": raw,
            "code": "unsupported_language",
        }))
    })
}

/// Full catalogue for `lang`.
#[utoipa::path(
    get,
    path = "/api/v1/i18n/{lang}",
    params(("lang" = String, Path, description = "Language code: en or ar")),
    responses(
        (status = 200, description = "Catalogue", body = CatalogueResponse),
        (status = 400, description = "Unsupported language", body = Error)
    ),
    tags = ["i18n"],
    operation_id = "getCatalogue",
    security([])
)]
#[get("/i18n/{lang}")]
pub async fn get_catalogue(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CatalogueResponse>> {
    let language = parse_language(&path.into_inner(), "lang")?;
    Ok(web::Json(CatalogueResponse {
        language,
        direction: language.direction(),
        messages: state.catalogue.messages(language).clone(),
    }))
}

/// Current interface language.
#[utoipa::path(
    get,
    path = "/api/v1/language",
    responses((status = 200, description = "Session language", body = LanguageResponse)),
    tags = ["i18n"],
    operation_id = "getLanguage",
    security([])
)]
#[get("/language")]
pub async fn get_language(session: SessionContext) -> ApiResult<web::Json<LanguageResponse>> {
    Ok(web::Json(session.language()?.into()))
}

/// Store the interface language in the session.
#[utoipa::path(
    put,
    path = "/api/v1/language",
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "Language stored", body = LanguageResponse),
        (status = 400, description = "Unsupported language", body = Error)
    ),
    tags = ["i18n"],
    operation_id = "setLanguage",
    security([])
)]
#[put("/language")]
pub async fn set_language(
    session: SessionContext,
    payload: web::Json<LanguageRequest>,
) -> ApiResult<web::Json<LanguageResponse>> {
    let language = parse_language(&payload.language, "language")?;
    session.set_language(language)?;
    Ok(web::Json(language.into()))
}

/// Flip between English and Arabic, as the header toggle does.
#[utoipa::path(
    post,
    path = "/api/v1/language/toggle",
    responses((status = 200, description = "Language flipped", body = LanguageResponse)),
    tags = ["i18n"],
    operation_id = "toggleLanguage",
    security([])
)]
#[post("/language/toggle")]
pub async fn toggle_language(session: SessionContext) -> ApiResult<web::Json<LanguageResponse>> {
    let language = session.language()?.toggled();
    session.set_language(language)?;
    Ok(web::Json(language.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::inbound::http::test_utils::{
        fixture_http_state, session_cookie, test_session_middleware,
    };

    macro_rules! i18n_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(fixture_http_state()))
                    .wrap(test_session_middleware())
                    .service(
                        web::scope("/api/v1")
                            .service(get_catalogue)
                            .service(get_language)
                            .service(set_language)
                            .service(toggle_language),
                    ),
            )
            .await
        };
    }

    #[rstest]
    #[case("en", "ltr", "Home")]
    #[case("AR", "rtl", "الرئيسية")]
    #[actix_web::test]
    async fn catalogue_carries_direction(
        #[case] lang: &str,
        #[case] direction: &str,
        #[case] home: &str,
    ) {
        let app = i18n_app!();
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/i18n/{lang}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["direction"], direction);
        assert_eq!(body["messages"]["nav.home"], home);
    }

    #[actix_web::test]
    async fn unknown_language_is_rejected() {
        let app = i18n_app!();
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/i18n/fr").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "unsupported_language");
    }

    #[actix_web::test]
    async fn chosen_language_persists_in_session() {
        let app = i18n_app!();
        let set = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/language")
                .set_json(LanguageRequest {
                    language: "ar".to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(set.status(), StatusCode::OK);
        let cookie = session_cookie(&set);

        let get = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/language")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(get).await;
        assert_eq!(body, json!({ "language": "ar", "direction": "rtl" }));

        let toggled = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/language/toggle")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(toggled).await;
        assert_eq!(body, json!({ "language": "en", "direction": "ltr" }));
    }
}

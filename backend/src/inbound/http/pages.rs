//! Localised page models for the browser shell.
//!
//! ```text
//! GET /api/v1/pages/home?lang=ar
//! GET /api/v1/pages/auth?mode=login
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{AuthMode, AuthPage, Error, HomePage, Language, auth_page, home_page};
use crate::inbound::http::ApiResult;
use crate::inbound::http::i18n::parse_language;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query for `GET /api/v1/pages/home`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct HomePageQuery {
    /// Overrides the session language for this response.
    pub lang: Option<String>,
}

/// Query for `GET /api/v1/pages/auth`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AuthPageQuery {
    /// `login` or `signup`; anything else shows sign-up.
    pub mode: Option<String>,
    /// Overrides the session language for this response.
    pub lang: Option<String>,
}

fn effective_language(session: &SessionContext, lang: Option<&str>) -> Result<Language, Error> {
    match lang {
        Some(raw) => parse_language(raw, "lang"),
        None => session.language(),
    }
}

/// Home page sections in display order.
#[utoipa::path(
    get,
    path = "/api/v1/pages/home",
    params(HomePageQuery),
    responses(
        (status = 200, description = "Home page model", body = HomePage),
        (status = 400, description = "Unsupported language", body = Error)
    ),
    tags = ["pages"],
    operation_id = "getHomePage",
    security([])
)]
#[get("/pages/home")]
pub async fn get_home_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<HomePageQuery>,
) -> ApiResult<web::Json<HomePage>> {
    let language = effective_language(&session, query.lang.as_deref())?;
    Ok(web::Json(home_page(&state.catalogue, language)))
}

/// Sign-in or sign-up form model.
#[utoipa::path(
    get,
    path = "/api/v1/pages/auth",
    params(AuthPageQuery),
    responses(
        (status = 200, description = "Auth page model", body = AuthPage),
        (status = 400, description = "Unsupported language", body = Error)
    ),
    tags = ["pages"],
    operation_id = "getAuthPage",
    security([])
)]
#[get("/pages/auth")]
pub async fn get_auth_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AuthPageQuery>,
) -> ApiResult<web::Json<AuthPage>> {
    let language = effective_language(&session, query.lang.as_deref())?;
    let mode = query
        .mode
        .as_deref()
        .map_or_else(AuthMode::default, |raw| raw.parse().unwrap_or_default());
    Ok(web::Json(auth_page(&state.catalogue, language, mode)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::inbound::http::test_utils::{fixture_http_state, test_session_middleware};

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_http_state()))
                .wrap(test_session_middleware())
                .service(
                    web::scope("/api/v1")
                        .service(get_home_page)
                        .service(get_auth_page),
                ),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn home_sections_follow_display_order() {
        let (status, body) = get_json("/api/v1/pages/home").await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body["sections"]
            .as_array()
            .expect("sections")
            .iter()
            .filter_map(|section| section["id"].as_str())
            .collect();
        assert_eq!(
            ids,
            [
                "header",
                "hero",
                "about",
                "download",
                "promotions",
                "referral",
                "testimonials",
                "contact",
                "feedback",
                "footer"
            ]
        );
        assert_eq!(body["direction"], "ltr");
    }

    #[actix_web::test]
    async fn lang_query_overrides_session() {
        let (_, body) = get_json("/api/v1/pages/home?lang=ar").await;
        assert_eq!(body["language"], "ar");
        assert_eq!(body["direction"], "rtl");
    }

    #[rstest]
    #[case("/api/v1/pages/auth", "signup")]
    #[case("/api/v1/pages/auth?mode=login", "login")]
    #[case("/api/v1/pages/auth?mode=bogus", "signup")]
    #[actix_web::test]
    async fn auth_mode_defaults_to_signup(#[case] uri: &str, #[case] mode: &str) {
        let (status, body) = get_json(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], mode);
    }
}

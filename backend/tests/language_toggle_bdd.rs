//! Behaviour tests for the session language toggle.

#[path = "support/portal.rs"]
mod portal;

use actix_web::http::Method;
use portal::PortalWorld;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[fixture]
fn world() -> PortalWorld {
    PortalWorld::start()
}

#[given("a visitor without a session")]
fn a_visitor_without_a_session(world: &PortalWorld) {
    let _ = world;
}

#[when("the visitor opens the home page")]
fn the_visitor_opens_the_home_page(world: &PortalWorld) {
    world.request(Method::GET, "/api/v1/pages/home", None);
}

#[when("the visitor toggles the language")]
fn the_visitor_toggles_the_language(world: &PortalWorld) {
    world.request(Method::POST, "/api/v1/language/toggle", None);
}

#[then("the page language is {language}")]
fn the_page_language_is(world: &PortalWorld, language: String) {
    world.with_last(|last| {
        assert_eq!(last.status, 200);
        assert_eq!(last.body["language"], language.as_str());
    });
}

#[then("the page direction is {direction}")]
fn the_page_direction_is(world: &PortalWorld, direction: String) {
    world.with_last(|last| assert_eq!(last.body["direction"], direction.as_str()));
}

#[then("the session language is {language}")]
fn the_session_language_is(world: &PortalWorld, language: String) {
    world.request(Method::GET, "/api/v1/language", None);
    world.with_last(|last| assert_eq!(last.body["language"], language.as_str()));
}

#[scenario(
    path = "tests/features/language_toggle.feature",
    name = "A new visitor reads the home page in English"
)]
fn new_visitor_reads_english(world: PortalWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/language_toggle.feature",
    name = "Toggling switches the home page to Arabic"
)]
fn toggling_switches_to_arabic(world: PortalWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/language_toggle.feature",
    name = "Toggling twice returns to English"
)]
fn toggling_twice_returns_to_english(world: PortalWorld) {
    drop(world);
}

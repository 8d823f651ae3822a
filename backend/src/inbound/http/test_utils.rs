//! Shared helpers for HTTP handler tests.

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test as actix_test, web, App};

use crate::domain::ports::{
    FixtureLoginService, MockFavoriteCommand, MockRecipeCommand, MockRecipeQuery,
    MockReferenceDataRepository, MockShoppingCartCommand, MockSubscriptionCommand,
    MockUserDirectory,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::LoginRequest;

/// Cookie session middleware with an ephemeral key for tests.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build()
}

/// State where login works (fixture) and everything else panics on use,
/// so each test overrides exactly the ports it exercises.
pub(crate) fn test_state() -> HttpState {
    HttpState {
        login: Arc::new(FixtureLoginService),
        accounts: Arc::new(MockUserDirectory::new()),
        recipe_commands: Arc::new(MockRecipeCommand::new()),
        recipe_queries: Arc::new(MockRecipeQuery::new()),
        favorites: Arc::new(MockFavoriteCommand::new()),
        shopping_cart: Arc::new(MockShoppingCartCommand::new()),
        subscriptions: Arc::new(MockSubscriptionCommand::new()),
        reference: Arc::new(MockReferenceDataRepository::new()),
    }
}

/// Full `/api/v1` app over the given state with test session middleware.
pub(crate) fn test_app_with_state(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(crate::inbound::http::configure_api),
    )
}

/// Log in with the fixture credentials and return the session cookie.
pub(crate) async fn login_session<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(LoginRequest {
                email: "ada@example.org".to_owned(),
                password: "password".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "fixture login should succeed");

    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

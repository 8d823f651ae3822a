//! End-to-end coverage of the toggle endpoints and the aggregated
//! shopping list over in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::Value;

use support::{recipe_payload, register_and_login, TestBackend};

async fn create_recipe<S, B>(
    app: &S,
    cookie: &actix_web::cookie::Cookie<'static>,
    name: &str,
    ingredients: &[(i64, i32)],
) -> i64
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(cookie.clone())
            .set_json(recipe_payload(name, &[1], ingredients))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value =
        serde_json::from_slice(&actix_test::read_body(res).await).expect("json body");
    created["id"].as_i64().expect("recipe id")
}

#[actix_web::test]
async fn shopping_list_sums_shared_ingredients_across_recipes() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(backend.app()).await;
    let cookie = register_and_login(&app, "ada@example.org", "ada").await;

    // Both recipes use ingredient 1 (amounts 2 and 3); the download must
    // hold a single flour row with the additive total.
    let first = create_recipe(&app, &cookie, "Porridge", &[(1, 2), (2, 200)]).await;
    let second = create_recipe(&app, &cookie, "Pancakes", &[(1, 3)]).await;

    for id in [first, second] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/recipes/{id}/shopping_cart"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes/download_shopping_cart")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = String::from_utf8(actix_test::read_body(res).await.to_vec()).expect("utf-8 body");

    assert!(body.contains("flour (g): 5"));
    assert!(body.contains("milk (ml): 200"));
    assert_eq!(body.matches("flour").count(), 1, "one row per ingredient");
}

#[actix_web::test]
async fn empty_cart_downloads_an_empty_list() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(backend.app()).await;
    let cookie = register_and_login(&app, "ada@example.org", "ada").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/recipes/download_shopping_cart")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = String::from_utf8(actix_test::read_body(res).await.to_vec()).expect("utf-8 body");
    assert!(!body.contains(':'), "no ingredient rows expected");
}

#[actix_web::test]
async fn favorite_toggle_enforces_pair_uniqueness() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(backend.app()).await;
    let cookie = register_and_login(&app, "ada@example.org", "ada").await;
    let id = create_recipe(&app, &cookie, "Porridge", &[(1, 2)]).await;

    let uri = format!("/api/v1/recipes/{id}/favorite");
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Second removal: the pair is gone.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn removing_a_never_added_favorite_is_not_found() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(backend.app()).await;
    let cookie = register_and_login(&app, "ada@example.org", "ada").await;
    let id = create_recipe(&app, &cookie, "Porridge", &[(1, 2)]).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/recipes/{id}/favorite"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn favorited_recipes_flag_in_reads() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(backend.app()).await;
    let cookie = register_and_login(&app, "ada@example.org", "ada").await;
    let id = create_recipe(&app, &cookie, "Porridge", &[(1, 2)]).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/recipes/{id}/favorite"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/recipes/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let read: Value = serde_json::from_slice(&actix_test::read_body(res).await).expect("json body");
    assert_eq!(read["is_favorited"], true);
    assert_eq!(read["is_in_shopping_cart"], false);
}

#[actix_web::test]
async fn subscriptions_enforce_self_and_duplicate_rules() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(backend.app()).await;
    let ada = register_and_login(&app, "ada@example.org", "ada").await;
    let _grace = register_and_login(&app, "grace@example.org", "grace").await;

    // ada is user 1, grace is user 2.
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/1/subscribe")
            .cookie(ada.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value =
        serde_json::from_slice(&actix_test::read_body(res).await).expect("error payload");
    assert_eq!(body["details"]["code"], "self_subscription");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/2/subscribe")
            .cookie(ada.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/2/subscribe")
            .cookie(ada.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/subscriptions")
            .cookie(ada)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Value =
        serde_json::from_slice(&actix_test::read_body(res).await).expect("json body");
    let rows = listed.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["username"], "grace");
    assert_eq!(rows[0]["is_subscribed"], true);
}

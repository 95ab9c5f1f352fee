use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use league::db::require_db;
use league::domain::validation::msg;

use crate::common::{assert_problem, assert_see_other, assert_validation, form_body, read_json};
use crate::support::{build_test_state, create_test_app, factory};

fn post_form(uri: &str, pairs: &[(&str, &str)]) -> actix_http::Request {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(form_body(pairs))
        .to_request()
}

#[actix_web::test]
async fn add_team_redirects_to_its_page() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let football = factory::sport(db, "Football").await?;
    let rugby = factory::sport(db, "Rugby").await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let football_id = football.id.to_string();
    let rugby_id = rugby.id.to_string();
    let req = post_form(
        "/teams/add/",
        &[
            ("name", "Leeds Lions"),
            ("city", "Leeds"),
            ("founded", "1901"),
            ("logo", "logos/lions.png"),
            ("sport", &football_id),
            ("sports", &football_id),
            ("sports", &rugby_id),
        ],
    );
    let resp = test::call_service(&app, req).await;
    let location = assert_see_other(&resp);
    assert!(location.starts_with("/teams/") && location.ends_with('/'));

    let req = test::TestRequest::get().uri(&location).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let page = read_json(resp).await;
    assert_eq!(page["name"], "Leeds Lions");
    assert_eq!(page["slug"], "leeds-lions");
    assert_eq!(page["founded"], 1901);
    assert_eq!(page["logo_url"], "/media/logos/lions.png");
    assert_eq!(page["sport"]["slug"], "football");
    assert_eq!(page["sports"].as_array().map(Vec::len), Some(2));
    assert_eq!(page["players"], serde_json::json!([]));
    Ok(())
}

#[actix_web::test]
async fn invalid_team_form_returns_field_errors() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = post_form(
        "/teams/add/",
        &[("name", "  "), ("founded", "eighteen"), ("sports", "77")],
    );
    let resp = test::call_service(&app, req).await;
    let errors = assert_validation(resp).await;
    assert_eq!(errors["name"][0], msg::REQUIRED);
    assert_eq!(errors["founded"][0], msg::WHOLE_NUMBER);

    // Nothing was written.
    let req = test::TestRequest::get().uri("/teams/").to_request();
    let resp = test::call_service(&app, req).await;
    let list = read_json(resp).await;
    assert_eq!(list["teams"]["total"], 0);
    Ok(())
}

#[actix_web::test]
async fn unknown_sport_in_form_is_invalid_choice() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = post_form("/teams/add/", &[("name", "Ghosts"), ("sports", "77")]);
    let resp = test::call_service(&app, req).await;
    let errors = assert_validation(resp).await;
    assert_eq!(errors["sports"][0], msg::invalid_choice_value("77"));
    Ok(())
}

#[actix_web::test]
async fn add_form_preselects_sport() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let cricket = factory::sport(db, "Cricket").await?;
    factory::sport(db, "Rugby").await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    for (query, expected) in [
        (format!("?sport={}", cricket.id), serde_json::json!(cricket.id)),
        ("?sport=Cricket".to_string(), serde_json::json!(cricket.id)),
        ("?sport=curling".to_string(), serde_json::Value::Null),
        ("?sport=9999".to_string(), serde_json::Value::Null),
        (String::new(), serde_json::Value::Null),
    ] {
        let req = test::TestRequest::get()
            .uri(&format!("/teams/add/{query}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "query {query}");
        let ctx = read_json(resp).await;
        assert_eq!(ctx["initial"]["sport"], expected, "query {query}");
        assert_eq!(ctx["sports"].as_array().map(Vec::len), Some(2));
    }
    Ok(())
}

#[actix_web::test]
async fn team_list_paginates() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    for i in 0..13 {
        factory::team(db, &format!("Club {i:02}"), &[]).await?;
    }
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/teams/?page=2").to_request();
    let resp = test::call_service(&app, req).await;
    let list = read_json(resp).await;
    assert_eq!(list["teams"]["number"], 2);
    assert_eq!(list["teams"]["has_previous"], true);
    assert_eq!(list["teams"]["has_next"], false);
    assert_eq!(list["teams"]["items"][0]["name"], "Club 12");

    let req = test::TestRequest::get().uri("/teams/?page=banana").to_request();
    let resp = test::call_service(&app, req).await;
    let list = read_json(resp).await;
    assert_eq!(list["teams"]["number"], 1);
    assert_eq!(list["teams"]["items"].as_array().map(Vec::len), Some(12));
    Ok(())
}

#[actix_web::test]
async fn team_page_lists_roster() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let lions = factory::team(db, "Lions", &[]).await?;
    factory::player(db, "Ann", Some(lions.team.id), Some(10)).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/teams/{}/", lions.team.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let page = read_json(resp).await;
    assert_eq!(page["players"][0]["display_name"], "Ann Tester");
    assert_eq!(page["players"][0]["number"], 10);
    assert!(page["logo_url"].is_null());

    let req = test::TestRequest::get().uri("/teams/99/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "TEAM_NOT_FOUND").await;
    Ok(())
}

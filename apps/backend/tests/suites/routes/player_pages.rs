use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use league::db::require_db;
use league::domain::validation::msg;
use league::services::sports::{SportInput, SportService};

use crate::common::{assert_see_other, assert_validation, form_body, read_json};
use crate::support::{build_test_state, create_test_app, factory};

fn post_form(pairs: &[(&str, &str)]) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/players/add/")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(form_body(pairs))
        .to_request()
}

#[actix_web::test]
async fn add_form_exposes_positions_and_team_sports() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let cricket = factory::sport(db, "Cricket").await?;
    factory::team(db, "Tigers", &[&cricket]).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/players/add/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let ctx = read_json(resp).await;

    assert_eq!(ctx["initial"]["position"], "MF");
    assert_eq!(ctx["teams"][0]["name"], "Tigers");
    assert_eq!(ctx["teams"][0]["sports"], serde_json::json!(["cricket"]));
    let cricket_codes: Vec<&str> = ctx["sport_positions"]["cricket"]
        .as_array()
        .map(|a| a.iter().filter_map(|p| p["code"].as_str()).collect())
        .unwrap_or_default();
    assert!(cricket_codes.contains(&"WK"));
    let union: Vec<&str> = ctx["positions"]
        .as_array()
        .map(|a| a.iter().filter_map(|p| p["code"].as_str()).collect())
        .unwrap_or_default();
    assert!(union.contains(&"GK") && union.contains(&"WK") && union.contains(&"SS"));
    Ok(())
}

#[actix_web::test]
async fn team_sports_are_keyed_by_slug() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let t20 = SportService::new()
        .create(
            db,
            SportInput {
                name: "Twenty20".to_string(),
                slug: Some("cricket".to_string()),
            },
        )
        .await?;
    factory::team(db, "Strikers", &[&t20]).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/players/add/").to_request();
    let ctx = read_json(test::call_service(&app, req).await).await;

    assert_eq!(ctx["teams"][0]["sports"], serde_json::json!(["cricket"]));
    assert!(ctx["sport_positions"]["cricket"].is_array());
    Ok(())
}

#[actix_web::test]
async fn add_player_redirects_to_list() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let lions = factory::team(db, "Lions", &[]).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let team_id = lions.team.id.to_string();
    let req = post_form(&[
        ("first_name", "Ada"),
        ("last_name", "Lovelace"),
        ("team", &team_id),
        ("position", "FW"),
        ("number", "9"),
        ("date_of_birth", "1990-07-14"),
        ("nationality", "English"),
    ]);
    let resp = test::call_service(&app, req).await;
    assert_eq!(assert_see_other(&resp), "/players/");

    let req = test::TestRequest::get().uri("/players/").to_request();
    let resp = test::call_service(&app, req).await;
    let list = read_json(resp).await;
    let row = &list["players"]["items"][0];
    assert_eq!(row["display_name"], "Ada Lovelace");
    assert_eq!(row["position_label"], "Forward");
    assert_eq!(row["team"]["name"], "Lions");
    assert_eq!(row["date_of_birth"], "1990-07-14");

    let id = row["id"].as_i64().unwrap_or_default();
    let req = test::TestRequest::get()
        .uri(&format!("/players/{id}/"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let detail = read_json(resp).await;
    assert_eq!(detail["number"], 9);
    Ok(())
}

#[actix_web::test]
async fn taken_jersey_number_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let lions = factory::team(db, "Lions", &[]).await?;
    factory::player(db, "Ann", Some(lions.team.id), Some(9)).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let team_id = lions.team.id.to_string();
    let req = post_form(&[
        ("first_name", "Bea"),
        ("team", &team_id),
        ("position", "GK"),
        ("number", "9"),
    ]);
    let resp = test::call_service(&app, req).await;
    let errors = assert_validation(resp).await;
    assert_eq!(
        errors["number"][0],
        msg::already_exists("Player", "Team and Number")
    );
    Ok(())
}

#[actix_web::test]
async fn bad_player_fields_are_reported() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = post_form(&[
        ("first_name", "Cy"),
        ("position", "QB"),
        ("number", "nine"),
        ("date_of_birth", "14/07/1990"),
    ]);
    let resp = test::call_service(&app, req).await;
    let errors = assert_validation(resp).await;
    assert_eq!(errors["number"][0], msg::WHOLE_NUMBER);
    assert_eq!(errors["date_of_birth"][0], msg::INVALID_DATE);
    Ok(())
}

use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use league::db::require_db;
use league::domain::matches::{HOME_NOT_IN_SPORT_MSG, SAME_TEAM_MSG};
use league::domain::validation::msg;
use time::{Duration, OffsetDateTime};

use crate::common::{assert_see_other, assert_validation, form_body, read_json};
use crate::support::{build_test_state, create_test_app, factory};

fn post_form(pairs: &[(&str, &str)]) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/matches/add/")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(form_body(pairs))
        .to_request()
}

fn in_days(days: i64) -> OffsetDateTime {
    OffsetDateTime::now_utc() + Duration::days(days)
}

#[actix_web::test]
async fn add_match_redirects_to_listing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let football = factory::sport(db, "Football").await?;
    let lions = factory::team(db, "Lions", &[&football]).await?;
    let tigers = factory::team(db, "Tigers", &[&football]).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let (sport, home, away) = (
        football.id.to_string(),
        lions.team.id.to_string(),
        tigers.team.id.to_string(),
    );
    let req = post_form(&[
        ("sport", &sport),
        ("home_team", &home),
        ("away_team", &away),
        ("date_time", "2040-05-01T15:00"),
        ("location", "Elland Road"),
    ]);
    let resp = test::call_service(&app, req).await;
    assert_eq!(assert_see_other(&resp), "/matches/");

    let req = test::TestRequest::get().uri("/matches/").to_request();
    let resp = test::call_service(&app, req).await;
    let list = read_json(resp).await;
    let item = &list["page"]["items"][0];
    assert_eq!(item["status"], "SCHEDULED");
    assert_eq!(item["date_time"], "2040-05-01T15:00:00Z");
    assert_eq!(item["label"], "Lions vs Tigers — 2040-05-01");
    assert_eq!(item["home_team"]["name"], "Lions");
    assert_eq!(item["sport"]["slug"], "football");
    assert_eq!(item["is_past"], false);
    assert!(item["winner"].is_null());
    assert_eq!(list["filter"], "upcoming");
    assert_eq!(
        list["filters"],
        serde_json::json!(["upcoming", "past", "all"])
    );
    Ok(())
}

#[actix_web::test]
async fn same_team_on_both_sides_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let lions = factory::team(db, "Lions", &[]).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let id = lions.team.id.to_string();
    let req = post_form(&[
        ("home_team", &id),
        ("away_team", &id),
        ("date_time", "2040-05-01 15:00"),
    ]);
    let resp = test::call_service(&app, req).await;
    let errors = assert_validation(resp).await;
    assert_eq!(errors["away_team"][0], SAME_TEAM_MSG);
    Ok(())
}

#[actix_web::test]
async fn team_must_play_the_sport() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let football = factory::sport(db, "Football").await?;
    let rugby = factory::sport(db, "Rugby").await?;
    let cricket = factory::sport(db, "Cricket").await?;
    let lions = factory::team(db, "Lions", &[&football, &rugby]).await?;
    let tigers = factory::team(db, "Tigers", &[&cricket]).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let (sport, home, away) = (
        cricket.id.to_string(),
        lions.team.id.to_string(),
        tigers.team.id.to_string(),
    );
    let req = post_form(&[
        ("sport", &sport),
        ("home_team", &home),
        ("away_team", &away),
        ("date_time", "2040-05-01T15:00"),
    ]);
    let resp = test::call_service(&app, req).await;
    let errors = assert_validation(resp).await;
    assert_eq!(errors["home_team"][0], HOME_NOT_IN_SPORT_MSG);
    assert!(errors.get("away_team").is_none());
    Ok(())
}

#[actix_web::test]
async fn malformed_match_form_lists_every_field() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = post_form(&[
        ("away_team", "abc"),
        ("date_time", "next tuesday"),
        ("status", "FINISHED"),
        ("home_score", "1.5"),
    ]);
    let resp = test::call_service(&app, req).await;
    let errors = assert_validation(resp).await;
    assert_eq!(errors["home_team"][0], msg::REQUIRED);
    assert_eq!(errors["away_team"][0], msg::INVALID_CHOICE);
    assert_eq!(errors["date_time"][0], msg::INVALID_DATETIME);
    assert_eq!(errors["status"][0], msg::invalid_choice_value("FINISHED"));
    assert_eq!(errors["home_score"][0], msg::WHOLE_NUMBER);
    Ok(())
}

#[actix_web::test]
async fn listing_filters_by_sport_and_time() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let football = factory::sport(db, "Football").await?;
    let rugby = factory::sport(db, "Rugby").await?;
    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;
    let upcoming = factory::fixture(db, Some(football.id), a.team.id, b.team.id, in_days(2)).await?;
    let played = factory::fixture(db, Some(football.id), b.team.id, a.team.id, in_days(-2)).await?;
    factory::fixture(db, Some(rugby.id), a.team.id, b.team.id, in_days(5)).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let ids = |body: &serde_json::Value| -> Vec<i64> {
        body["page"]["items"]
            .as_array()
            .map(|a| a.iter().filter_map(|m| m["id"].as_i64()).collect())
            .unwrap_or_default()
    };

    let req = test::TestRequest::get()
        .uri("/matches/?sport=football")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(ids(&body), vec![upcoming.id]);
    assert_eq!(body["selected_sport"]["name"], "Football");
    assert_eq!(body["sports"].as_array().map(Vec::len), Some(2));

    let req = test::TestRequest::get()
        .uri(&format!("/matches/?sport={}&filter=past", football.id))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(ids(&body), vec![played.id]);
    assert_eq!(body["filter"], "past");
    assert_eq!(body["page"]["items"][0]["is_past"], true);

    let req = test::TestRequest::get()
        .uri("/matches/?filter=all")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["page"]["total"], 3);

    let req = test::TestRequest::get()
        .uri("/matches/?sport=curling&filter=all")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["page"]["total"], 0);
    assert!(body["selected_sport"].is_null());

    let req = test::TestRequest::get()
        .uri("/matches/?filter=sometime")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["filter"], "upcoming");
    assert_eq!(body["page"]["total"], 2);
    Ok(())
}

#[actix_web::test]
async fn add_form_lists_choices() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    factory::sport(db, "Football").await?;
    factory::team(db, "Alpha", &[]).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/matches/add/").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["sports"][0]["name"], "Football");
    assert_eq!(body["teams"][0]["name"], "Alpha");
    assert_eq!(body["statuses"][0]["value"], "SCHEDULED");
    assert_eq!(body["statuses"].as_array().map(Vec::len), Some(4));
    Ok(())
}

#[actix_web::test]
async fn match_detail_shows_winner() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;
    let mut input = factory::match_input(None, a.team.id, b.team.id, in_days(-1));
    input.home_score = Some(2);
    input.away_score = Some(0);
    let record = league::services::matches::MatchService::new()
        .create(db, input)
        .await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/matches/{}/", record.id))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["winner"], "home");
    assert_eq!(body["is_past"], true);
    assert_eq!(body["away_team"]["name"], "Beta");
    Ok(())
}

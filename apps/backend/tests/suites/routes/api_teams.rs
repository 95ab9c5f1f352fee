use actix_web::test;
use league::db::require_db;
use league::domain::validation::msg;
use serde_json::{json, Value};

use crate::common::{assert_problem, assert_validation, read_json};
use crate::support::{build_test_state, create_test_app, factory};

fn sport_ids(team: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = team["sports"]
        .as_array()
        .map(|a| a.iter().filter_map(|s| s["id"].as_i64()).collect())
        .unwrap_or_default();
    ids.sort_unstable();
    ids
}

#[actix_web::test]
async fn create_applies_sport_set() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let football = factory::sport(db, "Football").await?;
    let rugby = factory::sport(db, "Rugby").await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/teams/")
        .set_json(json!({
            "name": "Lions",
            "city": "Leeds",
            "sport_id": football.id,
            "sports_ids": [football.id, rugby.id],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let team = read_json(resp).await;
    assert_eq!(team["slug"], "lions");
    assert_eq!(team["sport"]["id"], football.id);
    assert_eq!(sport_ids(&team), vec![football.id, rugby.id]);
    assert_eq!(team["players"], json!([]));
    Ok(())
}

#[actix_web::test]
async fn validation_keys_match_payload_names() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/teams/")
        .set_json(json!({ "name": "Ghosts", "sport_id": 70, "sports_ids": [71] }))
        .to_request();
    let errors = assert_validation(test::call_service(&app, req).await).await;
    assert_eq!(errors["sport_id"][0], msg::INVALID_CHOICE);
    assert_eq!(errors["sports_ids"][0], msg::invalid_choice_value("71"));
    assert!(errors.get("sport").is_none());
    Ok(())
}

#[actix_web::test]
async fn patch_and_put_semantics() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let football = factory::sport(db, "Football").await?;
    let lions = factory::team(db, "Lions", &[&football]).await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let uri = format!("/api/teams/{}/", lions.team.id);

    // PATCH touches only the sent keys; null clears.
    let req = test::TestRequest::patch()
        .uri(&uri)
        .set_json(json!({ "founded": 1888, "sport_id": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let team = read_json(resp).await;
    assert_eq!(team["name"], "Lions");
    assert_eq!(team["city"], "Springfield");
    assert_eq!(team["founded"], 1888);
    assert!(team["sport"].is_null());
    assert_eq!(sport_ids(&team), vec![football.id]);

    // PUT resets omitted fields but keeps the sport set and slug.
    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "name": "Lions" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let team = read_json(resp).await;
    assert_eq!(team["city"], "");
    assert!(team["founded"].is_null());
    assert_eq!(team["slug"], "lions");
    assert_eq!(sport_ids(&team), vec![football.id]);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .set_json(json!({ "sports_ids": [] }))
        .to_request();
    let team = read_json(test::call_service(&app, req).await).await;
    assert_eq!(sport_ids(&team), Vec::<i64>::new());
    Ok(())
}

#[actix_web::test]
async fn retrieve_includes_players_and_delete() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let lions = factory::team(db, "Lions", &[]).await?;
    let ann = factory::player(db, "Ann", Some(lions.team.id), Some(3)).await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let uri = format!("/api/teams/{}/", lions.team.id);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let team = read_json(test::call_service(&app, req).await).await;
    assert_eq!(team["players"][0]["id"], ann.id);
    assert_eq!(team["players"][0]["team"], lions.team.id);

    let req = test::TestRequest::get().uri("/api/teams/").to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 204);

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_problem(test::call_service(&app, req).await, 404, "TEAM_NOT_FOUND").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/players/{}/", ann.id))
        .to_request();
    let player = read_json(test::call_service(&app, req).await).await;
    assert!(player["team"].is_null());
    Ok(())
}

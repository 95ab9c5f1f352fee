use actix_web::test;
use league::domain::validation::msg;
use serde_json::json;

use crate::common::{assert_problem, assert_validation, read_json};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn sport_crud() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/sports/")
        .set_json(json!({ "name": "Cricket II" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created = read_json(resp).await;
    assert_eq!(created["slug"], "cricket-ii");
    let id = created["id"].as_i64().unwrap_or_default();

    let req = test::TestRequest::get()
        .uri(&format!("/api/sports/{id}/"))
        .to_request();
    let fetched = read_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::get().uri("/api/sports/").to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/sports/{id}/"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/sports/{id}/"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "SPORT_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn duplicate_and_missing_names() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/sports/")
            .set_json(json!({ "name": "Cricket" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        if resp.status().as_u16() == 201 {
            continue;
        }
        let errors = assert_validation(resp).await;
        assert_eq!(errors["name"][0], msg::already_exists("Sport", "Name"));
    }

    let req = test::TestRequest::post()
        .uri("/api/sports/")
        .set_json(json!({}))
        .to_request();
    let errors = assert_validation(test::call_service(&app, req).await).await;
    assert_eq!(errors["name"][0], msg::REQUIRED);
    Ok(())
}

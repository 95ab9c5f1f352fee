use league::db::require_db;
use league::domain::pagination::PageRequest;
use league::domain::validation::msg;
use league::services::players::{PlayerInput, PlayerService, NUMBER_MAX};
use league::DomainError;
use time::macros::date;

use crate::support::build_test_state;
use crate::support::factory;

fn validation(err: DomainError) -> league::domain::validation::FieldErrors {
    match err {
        DomainError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn defaults_and_optional_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let player = PlayerService::new()
        .create(
            db,
            PlayerInput {
                first_name: "  Pelé ".to_string(),
                date_of_birth: Some(date!(1940 - 10 - 23)),
                ..PlayerInput::default()
            },
        )
        .await?;

    assert_eq!(player.first_name, "Pelé");
    assert_eq!(player.position, "MF");
    assert_eq!(player.team_id, None);
    assert_eq!(player.number, None);
    assert_eq!(player.display_name(), "Pelé");
    assert_eq!(player.date_of_birth, Some(date!(1940 - 10 - 23)));
    Ok(())
}

#[tokio::test]
async fn jersey_number_is_unique_within_team() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let lions = factory::team(db, "Lions", &[]).await?;
    let tigers = factory::team(db, "Tigers", &[]).await?;
    factory::player(db, "Ann", Some(lions.team.id), Some(7)).await?;

    let err = factory::player(db, "Bea", Some(lions.team.id), Some(7))
        .await
        .unwrap_err();
    assert_eq!(
        validation(err).get("number"),
        Some(&[msg::already_exists("Player", "Team and Number")][..])
    );

    // Same number elsewhere, or without a team, is fine.
    factory::player(db, "Cy", Some(tigers.team.id), Some(7)).await?;
    factory::player(db, "Di", None, Some(7)).await?;
    factory::player(db, "Ed", None, Some(7)).await?;
    Ok(())
}

#[tokio::test]
async fn update_does_not_collide_with_itself() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = PlayerService::new();

    let lions = factory::team(db, "Lions", &[]).await?;
    let ann = factory::player(db, "Ann", Some(lions.team.id), Some(7)).await?;

    let mut input = PlayerInput::from(ann.clone());
    input.position = "GK".to_string();
    let updated = service.update(db, ann.id, input).await?;
    assert_eq!(updated.position, "GK");
    assert_eq!(updated.number, Some(7));
    Ok(())
}

#[tokio::test]
async fn position_must_be_known() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = PlayerService::new();

    let err = service
        .create(
            db,
            PlayerInput {
                first_name: "Zed".to_string(),
                position: "QB".to_string(),
                ..PlayerInput::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        validation(err).get("position"),
        Some(&[msg::invalid_choice_value("QB")][..])
    );

    // Any sport's vocabulary is accepted regardless of the team.
    let cricketer = service
        .create(
            db,
            PlayerInput {
                first_name: "Viv".to_string(),
                position: "WK".to_string(),
                ..PlayerInput::default()
            },
        )
        .await?;
    assert_eq!(cricketer.position, "WK");
    Ok(())
}

#[tokio::test]
async fn field_errors_are_collected_together() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let err = PlayerService::new()
        .create(
            db,
            PlayerInput {
                first_name: String::new(),
                team_id: Some(31337),
                number: Some(NUMBER_MAX + 1),
                position: String::new(),
                ..PlayerInput::default()
            },
        )
        .await
        .unwrap_err();
    let errors = validation(err);
    assert_eq!(errors.get("first_name"), Some(&[msg::REQUIRED.to_string()][..]));
    assert_eq!(errors.get("position"), Some(&[msg::REQUIRED.to_string()][..]));
    assert_eq!(errors.get("team"), Some(&[msg::INVALID_CHOICE.to_string()][..]));
    assert_eq!(errors.get("number"), Some(&[msg::max_value(NUMBER_MAX)][..]));
    Ok(())
}

#[tokio::test]
async fn list_orders_by_team_then_number() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let zebras = factory::team(db, "Zebras", &[]).await?;
    let ants = factory::team(db, "Ants", &[]).await?;
    factory::player(db, "Z10", Some(zebras.team.id), Some(10)).await?;
    factory::player(db, "A5", Some(ants.team.id), Some(5)).await?;
    factory::player(db, "A1", Some(ants.team.id), Some(1)).await?;

    let page = PlayerService::new().list(db, PageRequest::first()).await?;
    let with_team: Vec<&str> = page
        .items
        .iter()
        .filter(|row| row.team.is_some())
        .map(|row| row.player.first_name.as_str())
        .collect();
    assert_eq!(with_team, vec!["A1", "A5", "Z10"]);
    assert_eq!(
        page.items
            .iter()
            .find(|row| row.player.first_name == "A1")
            .and_then(|row| row.team.as_ref())
            .map(|t| t.name.as_str()),
        Some("Ants")
    );
    Ok(())
}

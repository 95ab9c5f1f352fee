//! Store constraints that hold even when the services are bypassed.

use league::adapters::players_sea::{self as players_adapter, PlayerWrite};
use league::db::require_db;
use league::db::txn::with_txn;
use league::entities::matches::MatchStatus;
use league::repos::matches::{self, MatchWrite};
use league::repos::teams::{self, TeamWrite};
use league::services::matches::MatchService;
use league::services::players::PlayerService;
use league::services::teams::TeamService;
use league::{AppError, DomainError, ErrorCode};
use time::macros::datetime;

use crate::support::build_test_state;
use crate::support::factory;

#[tokio::test]
async fn same_team_match_is_rejected_by_the_store() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let lions = factory::team(db, "Lions", &[]).await?;

    let write = MatchWrite {
        sport_id: None,
        home_team_id: lions.team.id,
        away_team_id: lions.team.id,
        date_time: datetime!(2031-03-01 15:00 UTC),
        location: String::new(),
        status: MatchStatus::Scheduled,
        home_score: None,
        away_score: None,
        notes: None,
    };
    let err = matches::create_match(db, write, datetime!(2030-01-01 0:00 UTC))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Constraint(_)), "got {err:?}");
    assert_eq!(AppError::from(err).code(), ErrorCode::CheckViolation);
    assert!(MatchService::new().list_all(db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn duplicate_jersey_is_rejected_by_the_store() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let lions = factory::team(db, "Lions", &[]).await?;
    factory::player(db, "Ada", Some(lions.team.id), Some(7)).await?;

    let write = PlayerWrite {
        first_name: "Grace".to_string(),
        last_name: "Tester".to_string(),
        team_id: Some(lions.team.id),
        position: "MF".to_string(),
        number: Some(7),
        date_of_birth: None,
        nationality: String::new(),
    };
    let err = players_adapter::create_player(db, write).await.unwrap_err();

    let app_err = AppError::from(err);
    assert_eq!(app_err.code(), ErrorCode::JerseyNumberTaken);
    assert_eq!(PlayerService::new().list_all(db).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_sport_link_leaves_no_team_behind() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let result = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let team = teams::create_team(
                txn,
                TeamWrite {
                    name: "Orphans".to_string(),
                    city: String::new(),
                    founded: None,
                    logo: None,
                    slug: "orphans".to_string(),
                    sport_id: None,
                },
            )
            .await?;
            // No sport 9999 exists; the join row breaks the foreign key.
            teams::replace_sports(txn, team.id, &[9999]).await?;
            Ok(team)
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::FkViolation);

    let db = require_db(&state)?;
    assert!(TeamService::new().list_details(db).await?.is_empty());
    Ok(())
}

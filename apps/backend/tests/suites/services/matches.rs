use league::db::require_db;
use league::domain::listing::{SportSelector, TemporalFilter};
use league::domain::matches::{
    Winner, AWAY_NOT_IN_SPORT_MSG, HOME_NOT_IN_SPORT_MSG, SAME_TEAM_MSG,
};
use league::domain::pagination::PageRequest;
use league::domain::validation::{msg, FieldErrors};
use league::entities::matches::MatchStatus;
use league::services::matches::MatchService;
use league::DomainError;
use time::macros::datetime;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::support::build_test_state;
use crate::support::factory;

fn validation(err: DomainError) -> FieldErrors {
    match err {
        DomainError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn in_days(days: i64) -> OffsetDateTime {
    OffsetDateTime::now_utc() + Duration::days(days)
}

#[tokio::test]
async fn home_team_outside_sport_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let football = factory::sport(db, "Football").await?;
    let rugby = factory::sport(db, "Rugby").await?;
    let cricket = factory::sport(db, "Cricket").await?;
    let lions = factory::team(db, "Lions", &[&football, &rugby]).await?;
    let tigers = factory::team(db, "Tigers", &[&cricket]).await?;

    let err = factory::fixture(
        db,
        Some(cricket.id),
        lions.team.id,
        tigers.team.id,
        in_days(3),
    )
    .await
    .unwrap_err();
    let errors = validation(err);
    assert_eq!(
        errors.get("home_team"),
        Some(&[HOME_NOT_IN_SPORT_MSG.to_string()][..])
    );
    assert!(!errors.has("away_team"));

    let err = factory::fixture(db, Some(rugby.id), lions.team.id, tigers.team.id, in_days(3))
        .await
        .unwrap_err();
    assert_eq!(
        validation(err).get("away_team"),
        Some(&[AWAY_NOT_IN_SPORT_MSG.to_string()][..])
    );
    Ok(())
}

#[tokio::test]
async fn teams_without_sports_play_anything() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let cricket = factory::sport(db, "Cricket").await?;
    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;

    let fixture = factory::fixture(db, Some(cricket.id), a.team.id, b.team.id, in_days(1)).await?;
    assert_eq!(fixture.sport_id, Some(cricket.id));
    assert_eq!(fixture.status, MatchStatus::Scheduled);
    Ok(())
}

#[tokio::test]
async fn same_team_twice_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let cricket = factory::sport(db, "Cricket").await?;
    let football = factory::sport(db, "Football").await?;
    let lions = factory::team(db, "Lions", &[&football]).await?;

    let err = factory::fixture(db, Some(cricket.id), lions.team.id, lions.team.id, in_days(1))
        .await
        .unwrap_err();
    let errors = validation(err);
    assert_eq!(errors.get("away_team"), Some(&[SAME_TEAM_MSG.to_string()][..]));
    assert!(!errors.has("home_team"));
    Ok(())
}

#[tokio::test]
async fn missing_references_are_invalid_choices() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let a = factory::team(db, "Alpha", &[]).await?;
    let err = factory::fixture(db, Some(77), a.team.id, 9001, in_days(1))
        .await
        .unwrap_err();
    let errors = validation(err);
    assert_eq!(errors.get("sport"), Some(&[msg::INVALID_CHOICE.to_string()][..]));
    assert_eq!(errors.get("away_team"), Some(&[msg::INVALID_CHOICE.to_string()][..]));
    assert!(!errors.has("home_team"));
    Ok(())
}

#[tokio::test]
async fn scores_decide_the_winner() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = MatchService::new();

    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;

    let mut input = factory::match_input(None, a.team.id, b.team.id, in_days(-2));
    input.status = MatchStatus::Completed;
    input.home_score = Some(1);
    input.away_score = Some(3);
    let played = service.create(db, input.clone()).await?;

    let view = service.detail(db, played.id).await?;
    assert_eq!(view.winner, Some(Winner::Away));
    assert!(view.is_past);
    assert_eq!(view.home_team.as_ref().map(|t| t.name.as_str()), Some("Alpha"));

    input.away_score = Some(1);
    let drawn = service.update(db, played.id, input.clone()).await?;
    assert_eq!(drawn.winner(), Some(Winner::Draw));

    input.away_score = None;
    let pending = service.update(db, played.id, input).await?;
    assert_eq!(pending.winner(), None);
    Ok(())
}

#[tokio::test]
async fn negative_scores_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;
    let mut input = factory::match_input(None, a.team.id, b.team.id, in_days(1));
    input.home_score = Some(-1);

    let err = MatchService::new().create(db, input).await.unwrap_err();
    assert_eq!(validation(err).get("home_score"), Some(&[msg::min_value(0)][..]));
    Ok(())
}

#[tokio::test]
async fn kickoff_is_stored_in_utc_seconds() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;
    let at = datetime!(2031-07-04 18:45:30.250 +02:00);
    let fixture = factory::fixture(db, None, a.team.id, b.team.id, at).await?;

    assert_eq!(fixture.date_time, datetime!(2031-07-04 16:45:30 UTC));
    assert_eq!(fixture.date_time.offset(), UtcOffset::UTC);

    let view = MatchService::new().detail(db, fixture.id).await?;
    assert_eq!(view.label, "Alpha vs Beta — 2031-07-04");
    assert!(!view.is_past);
    Ok(())
}

#[tokio::test]
async fn upcoming_and_past_windows() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = MatchService::new();

    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;
    let soon = factory::fixture(db, None, a.team.id, b.team.id, in_days(1)).await?;
    let later = factory::fixture(db, None, b.team.id, a.team.id, in_days(10)).await?;
    let recent = factory::fixture(db, None, a.team.id, b.team.id, in_days(-1)).await?;
    let long_ago = factory::fixture(db, None, b.team.id, a.team.id, in_days(-30)).await?;

    let ids = |listing: &league::services::matches::MatchListing| -> Vec<i64> {
        listing.page.items.iter().map(|v| v.record.id).collect()
    };

    let upcoming = service
        .list(db, None, TemporalFilter::Upcoming, PageRequest::first())
        .await?;
    assert_eq!(ids(&upcoming), vec![soon.id, later.id]);

    let past = service
        .list(db, None, TemporalFilter::Past, PageRequest::first())
        .await?;
    assert_eq!(ids(&past), vec![recent.id, long_ago.id]);
    assert!(past.page.items.iter().all(|v| v.is_past));

    let all = service
        .list(db, None, TemporalFilter::All, PageRequest::first())
        .await?;
    assert_eq!(ids(&all), vec![later.id, soon.id, recent.id, long_ago.id]);
    Ok(())
}

#[tokio::test]
async fn sport_selector_filters_and_unknown_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = MatchService::new();

    let football = factory::sport(db, "Football").await?;
    let rugby = factory::sport(db, "Rugby").await?;
    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;
    let kick = factory::fixture(db, Some(football.id), a.team.id, b.team.id, in_days(2)).await?;
    factory::fixture(db, Some(rugby.id), a.team.id, b.team.id, in_days(3)).await?;

    let by_slug = service
        .list(
            db,
            Some(&SportSelector::Slug("FOOTBALL".to_string())),
            TemporalFilter::All,
            PageRequest::first(),
        )
        .await?;
    assert_eq!(by_slug.selected_sport.as_ref(), Some(&football));
    assert_eq!(
        by_slug.page.items.iter().map(|v| v.record.id).collect::<Vec<_>>(),
        vec![kick.id]
    );
    assert_eq!(by_slug.sports.len(), 2);

    let by_id = service
        .list(
            db,
            Some(&SportSelector::Id(rugby.id)),
            TemporalFilter::All,
            PageRequest::first(),
        )
        .await?;
    assert_eq!(by_id.page.total, 1);

    let unknown = service
        .list(
            db,
            Some(&SportSelector::Slug("curling".to_string())),
            TemporalFilter::All,
            PageRequest::first(),
        )
        .await?;
    assert!(unknown.page.items.is_empty());
    assert_eq!(unknown.page.total, 0);
    assert!(unknown.selected_sport.is_none());
    assert_eq!(unknown.sports.len(), 2);
    Ok(())
}

#[tokio::test]
async fn deleting_sport_keeps_its_matches() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let football = factory::sport(db, "Football").await?;
    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;
    let fixture = factory::fixture(db, Some(football.id), a.team.id, b.team.id, in_days(2)).await?;

    league::services::sports::SportService::new()
        .delete(db, football.id)
        .await?;

    let kept = MatchService::new().get(db, fixture.id).await?;
    assert_eq!(kept.sport_id, None);
    Ok(())
}

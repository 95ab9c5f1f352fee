use league::db::require_db;
use league::domain::listing::TemporalFilter;
use league::domain::pagination::{PageRequest, MATCHES_PAGE_SIZE};
use league::services::matches::MatchService;
use time::{Duration, OffsetDateTime};

use crate::support::build_test_state;
use crate::support::factory;

#[tokio::test]
async fn out_of_range_pages_clamp() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = MatchService::new();

    let a = factory::team(db, "Alpha", &[]).await?;
    let b = factory::team(db, "Beta", &[]).await?;
    let base = OffsetDateTime::now_utc() + Duration::days(1);
    for i in 0..(MATCHES_PAGE_SIZE as i64 + 3) {
        factory::fixture(db, None, a.team.id, b.team.id, base + Duration::hours(i)).await?;
    }

    for (raw, expected_page, expected_len) in [
        (None, 1, MATCHES_PAGE_SIZE as usize),
        (Some("0"), 1, MATCHES_PAGE_SIZE as usize),
        (Some("-3"), 1, MATCHES_PAGE_SIZE as usize),
        (Some("two"), 1, MATCHES_PAGE_SIZE as usize),
        (Some("2"), 2, 3),
        (Some("50"), 2, 3),
        (Some("123456789012345678901234567890"), 2, 3),
    ] {
        let listing = service
            .list(db, None, TemporalFilter::Upcoming, PageRequest::parse(raw))
            .await?;
        assert_eq!(listing.page.number, expected_page, "page={raw:?}");
        assert_eq!(listing.page.items.len(), expected_len, "page={raw:?}");
        assert_eq!(listing.page.num_pages, 2);
    }
    Ok(())
}

#[tokio::test]
async fn empty_listing_is_one_empty_page() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let listing = MatchService::new()
        .list(db, None, TemporalFilter::Past, PageRequest::parse(Some("4")))
        .await?;
    assert_eq!(listing.page.number, 1);
    assert_eq!(listing.page.num_pages, 1);
    assert!(!listing.page.has_next);
    assert!(!listing.page.has_previous);
    assert!(listing.page.items.is_empty());
    Ok(())
}

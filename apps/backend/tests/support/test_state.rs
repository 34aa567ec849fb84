//! Fresh in-memory state per test, driven by a manual clock.

use std::sync::Arc;

use storefront::config::db::MEMORY_DB_URL;
use storefront::{build_state, AppError, AppState, ManualClock, SecurityConfig};

/// 2023-11-14T22:13:20Z, an arbitrary fixed starting point.
pub const START_UNIX: i64 = 1_700_000_000;

pub struct TestState {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

/// Migrated, unseeded SQLite memory database with test security settings.
pub async fn build_test_state() -> Result<TestState, AppError> {
    build_state_with(false).await
}

/// Same as [`build_test_state`] plus the catalog and test user seed.
pub async fn build_seeded_state() -> Result<TestState, AppError> {
    build_state_with(true).await
}

async fn build_state_with(seed: bool) -> Result<TestState, AppError> {
    let clock = Arc::new(ManualClock::at_unix(START_UNIX));
    let state = build_state()
        .with_db_url(MEMORY_DB_URL)
        .with_security(SecurityConfig::for_tests())
        .with_seed_data(seed)
        .with_clock(clock.clone())
        .build()
        .await?;
    Ok(TestState { state, clock })
}

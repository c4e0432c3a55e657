// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use michango::application::LedgerService;
use michango::domain::{FixedClock, Member};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database.
/// The clock is frozen at March 2024.
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    test_service_at(2024, 3).await
}

/// Helper to create a test service whose clock is frozen at `year`/`month`
pub async fn test_service_at(year: i32, month: u8) -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap())
        .await?
        .with_clock(FixedClock::new(year, month).unwrap());
    Ok((service, temp_dir))
}

/// Reopen the database in `temp_dir` with a clock frozen at `year`/`month`
pub async fn reopen_at(temp_dir: &TempDir, year: i32, month: u8) -> Result<LedgerService> {
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::connect(db_path.to_str().unwrap())
        .await?
        .with_clock(FixedClock::new(year, month).unwrap());
    Ok(service)
}

/// Record a full set of five amounts for a member
pub async fn contribute(
    service: &LedgerService,
    member: &Member,
    amounts: [&str; 5],
) -> Result<()> {
    let [attendance, society, uwaka, wawata, construction] = amounts;
    service
        .record_contribution(
            Some(member.id),
            [
                ("attendance", attendance),
                ("society", society),
                ("uwaka", uwaka),
                ("wawata", wawata),
                ("construction", construction),
            ],
        )
        .await?;
    Ok(())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

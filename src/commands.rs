//! Command plumbing shared by the binary and the integration tests
//!
//! Everything here takes its clock, timezone and module source as
//! arguments so the commands can be exercised without a backend.

use crate::cli::ScheduleArgs;
use chrono::{DateTime, NaiveDate, Utc};
use std::path::Path;
use tezz_api::{ApiConfig, ModuleSource, StoredSession};
use tezz_core::calendar::{Granularity, navigate_by};
use tezz_core::error::{Result, TezzError};
use tezz_core::schedule::ScheduleView;
use tezz_core::stats::DiaryReport;
use tezz_core::timezone::TimezoneConfig;
use tezz_core::types::Module;
use tracing::{debug, info};

/// Date the schedule is centred on: `--date` (or today) moved by `--shift` views
pub fn resolve_reference(
    date: Option<NaiveDate>,
    granularity: Granularity,
    shift: i32,
    today: NaiveDate,
) -> Result<NaiveDate> {
    navigate_by(date.unwrap_or(today), granularity, shift)
}

/// Connection settings for an authenticated command
///
/// An explicit `--base-url` wins over the API root the session was created
/// against, which wins over the default.
pub fn api_config(
    base_url: Option<&str>,
    session: Option<&StoredSession>,
    timeout: Option<u64>,
) -> Result<ApiConfig> {
    let base_url = base_url.or(session.map(|s| s.base_url.as_str()));
    ApiConfig::from_cli(base_url, timeout)
}

/// Build the schedule screen from a module snapshot
pub async fn load_schedule<S>(
    source: &S,
    args: &ScheduleArgs,
    tz: &TimezoneConfig,
    now: DateTime<Utc>,
) -> Result<ScheduleView>
where
    S: ModuleSource + ?Sized,
{
    let reference = resolve_reference(args.date, args.view, args.shift, tz.today(&now))?;
    let modules = source.fetch_modules().await?;

    info!(
        "Building {} view around {} from {} modules",
        args.view,
        reference,
        modules.len()
    );
    ScheduleView::build(&modules, reference, args.view, &tz.tz, now)
}

/// Diary statistics together with the modules they were computed from
pub async fn load_diary<S>(source: &S) -> Result<(DiaryReport, Vec<Module>)>
where
    S: ModuleSource + ?Sized,
{
    let modules = source.fetch_modules().await?;
    let report = DiaryReport::build(&modules);
    debug!(
        "Diary over {} lessons, {} marked",
        report.overall.total_count, report.overall.completed_count
    );
    Ok((report, modules))
}

/// Name the uploaded answer is sent under
pub fn upload_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            TezzError::InvalidArgument(format!("'{}' is not a file path", path.display()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tezz_core::account::TokenPair;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(base_url: &str) -> StoredSession {
        StoredSession {
            username: "aibek".to_string(),
            base_url: base_url.to_string(),
            tokens: TokenPair {
                access: "tok".to_string(),
                refresh: None,
            },
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn test_resolve_reference_defaults_to_today() {
        let today = date(2024, 3, 13);
        assert_eq!(
            resolve_reference(None, Granularity::Week, 0, today).unwrap(),
            today
        );
        assert_eq!(
            resolve_reference(None, Granularity::Week, 1, today).unwrap(),
            date(2024, 3, 20)
        );
        assert_eq!(
            resolve_reference(Some(date(2024, 1, 31)), Granularity::Month, 1, today).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            resolve_reference(Some(date(2024, 3, 1)), Granularity::Day, -1, today).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[tokio::test]
    async fn test_week_at_calendar_end_is_an_error() {
        let args = ScheduleArgs {
            view: Granularity::Week,
            date: Some(NaiveDate::MAX),
            shift: 0,
        };
        let tz = TimezoneConfig::new(chrono_tz::UTC);

        let result = load_schedule(&Vec::<Module>::new(), &args, &tz, Utc::now()).await;
        assert!(matches!(result, Err(TezzError::InvalidDate(_))));

        let day = ScheduleArgs {
            view: Granularity::Day,
            ..args
        };
        let view = load_schedule(&Vec::<Module>::new(), &day, &tz, Utc::now())
            .await
            .unwrap();
        assert_eq!(view.reference, NaiveDate::MAX);
    }

    #[test]
    fn test_api_config_precedence() {
        let stored = session("http://staging.tezz.kg/api/");

        let config = api_config(None, None, None).unwrap();
        assert_eq!(config.base_url.as_str(), "https://tezz.kg/api/");

        let config = api_config(None, Some(&stored), None).unwrap();
        assert_eq!(config.base_url.as_str(), "http://staging.tezz.kg/api/");

        let config = api_config(Some("http://localhost:8000/api"), Some(&stored), Some(5)).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/api/");
        assert_eq!(config.timeout.as_secs(), 5);
    }

    #[test]
    fn test_upload_file_name() {
        assert_eq!(
            upload_file_name(Path::new("/tmp/answers/hw1.pdf")).unwrap(),
            "hw1.pdf"
        );
        assert!(upload_file_name(Path::new("/")).is_err());
        assert!(upload_file_name(Path::new("..")).is_err());
    }
}

pub mod report;
pub mod watch;

use crate::di::UseCases;
use picketline_application::use_cases::{DestinationVerdict, RefreshOutcome};
use picketline_domain::Coordinates;
use std::process::ExitCode;
use tracing::warn;

/// Exit status of `check` when the destination is on the blocklist.
const BLOCKED_EXIT_CODE: u8 = 2;

pub async fn check(use_cases: &UseCases, destination: &str, proceed: bool) -> ExitCode {
    if use_cases.cache.current().is_none() {
        warn!("No snapshot cached; run `picketline refresh` first");
    }

    if proceed {
        if let Some(record) = use_cases.guard_destination.allow(destination).await {
            println!(
                "{}: proceeding despite {} at {}",
                destination,
                record.action_type.display_name(),
                record.employer_name
            );
            return ExitCode::SUCCESS;
        }
    }

    match use_cases.guard_destination.execute(destination).await {
        DestinationVerdict::Blocked(record) => {
            println!(
                "{} is affected: {} at {} ({})",
                destination,
                record.action_type.display_name(),
                record.employer_name,
                record.host
            );
            ExitCode::from(BLOCKED_EXIT_CODE)
        }
        DestinationVerdict::AllowedForSession(record) => {
            println!(
                "{}: allowed this session ({} at {})",
                destination,
                record.action_type.display_name(),
                record.employer_name
            );
            ExitCode::SUCCESS
        }
        DestinationVerdict::Clear => {
            println!("{}: no active labor action", destination);
            ExitCode::SUCCESS
        }
    }
}

pub async fn refresh(
    use_cases: &UseCases,
    lat: f64,
    lng: f64,
    force: bool,
) -> anyhow::Result<ExitCode> {
    let location = Coordinates::new(lat, lng)?;

    match use_cases.refresh.execute(Some(location), force).await {
        RefreshOutcome::Updated(snapshot) => {
            println!(
                "Snapshot updated: {} blocked hosts, {} geofences (hash {})",
                snapshot.index().host_count(),
                snapshot.geofences().len(),
                snapshot.content_hash()
            );
            Ok(ExitCode::SUCCESS)
        }
        RefreshOutcome::Unchanged => {
            println!("Snapshot unchanged");
            Ok(ExitCode::SUCCESS)
        }
        RefreshOutcome::Failed(e) => {
            eprintln!("Refresh failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn status(use_cases: &UseCases) -> anyhow::Result<ExitCode> {
    let status = use_cases.get_status.execute().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(ExitCode::SUCCESS)
}

pub async fn actions(use_cases: &UseCases) -> anyhow::Result<ExitCode> {
    let actions = use_cases.list_actions.execute().await?;
    if actions.is_empty() {
        println!("No active actions");
    }
    for action in &actions {
        let mut line = format!(
            "[{}] {} at {}",
            action.id,
            action.action_type.display_name(),
            action.employer_name
        );
        if let Some(location) = &action.location {
            line.push_str(&format!(" - {}", location));
        }
        if let Some(start) = &action.start_date {
            line.push_str(&format!(" (since {})", start));
        }
        println!("{}", line);
    }
    Ok(ExitCode::SUCCESS)
}

use crate::di::UseCases;
use clap::Args;
use picketline_domain::{
    ActionSubmission, ActionType, Coordinates, EmployerSubmission, FieldReport, LocationReport,
    ReportReceipt, StrikeReport,
};
use std::process::ExitCode;

#[derive(Args)]
pub struct StrikeArgs {
    /// Employer name
    #[arg(long)]
    employer: String,
    #[arg(long)]
    industry: Option<String>,
    #[arg(long)]
    website: Option<String>,
    /// Union or group organizing the action
    #[arg(long)]
    organization: String,
    /// strike, lockout, picket, boycott, work_stoppage or other
    #[arg(long, default_value = "strike")]
    action_type: String,
    #[arg(long)]
    location: String,
    /// ISO-8601 date, e.g. 2025-03-01
    #[arg(long)]
    start_date: String,
    #[arg(long, default_value_t = 1)]
    duration_days: u32,
    #[arg(long)]
    description: String,
    #[arg(long)]
    demands: Option<String>,
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    learn_more_url: Option<String>,
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
}

#[derive(Args)]
pub struct LocationArgs {
    /// Id of the action being reported
    #[arg(long)]
    action_id: String,
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

pub async fn strike(use_cases: &UseCases, args: StrikeArgs) -> anyhow::Result<ExitCode> {
    let coordinates = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)?),
        _ => None,
    };

    let report = FieldReport::Strike(StrikeReport {
        employer: EmployerSubmission {
            name: args.employer,
            industry: args.industry,
            website: args.website,
        },
        action: ActionSubmission {
            organization: args.organization,
            action_type: ActionType::parse_lenient(&args.action_type),
            location: args.location,
            start_date: args.start_date,
            duration_days: args.duration_days,
            description: args.description,
            demands: args.demands,
            contact_info: args.contact,
            learn_more_url: args.learn_more_url,
            coordinates,
        },
    });

    submit(use_cases, report).await
}

pub async fn location(use_cases: &UseCases, args: LocationArgs) -> anyhow::Result<ExitCode> {
    let report = FieldReport::Location(LocationReport {
        action_id: args.action_id,
        coordinates: Coordinates::new(args.lat, args.lng)?,
        address: args.address,
        notes: args.notes,
    });

    submit(use_cases, report).await
}

async fn submit(use_cases: &UseCases, report: FieldReport) -> anyhow::Result<ExitCode> {
    let ReportReceipt { id, message } = use_cases.submit_report.execute(report).await?;
    if message.is_empty() {
        println!("Report submitted (id {})", id);
    } else {
        println!("{} (id {})", message, id);
    }
    Ok(ExitCode::SUCCESS)
}

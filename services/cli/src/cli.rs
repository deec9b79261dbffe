use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use claimsight::config::{parse_speed, AppConfig};
use claimsight::error::AppError;
use claimsight::telemetry;
use claimsight::workflows::claims::{AssessmentConfig, ClaimSubmission, IncidentType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::commands;
use crate::demo::{run_demo, DemoArgs};
use crate::infra::{open_records, parse_date, parse_incident_type, ConsoleObserver};
use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "claimsight",
    about = "Submit insurance claims and preview their approval likelihood",
    version
)]
struct Cli {
    /// Record file to use instead of APP_STORE_PATH
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a new claim; it becomes the current claim
    Submit(SubmitArgs),
    /// Run the simulated assessment for the current claim
    Assess(AssessArgs),
    /// Show the assessment results and record them in the history
    Results(OutputArgs),
    /// Show aggregate views over the claim history
    Dashboard(OutputArgs),
    /// Export the claim history as CSV
    Export(ExportArgs),
    /// Open a page by path, e.g. /results
    Open(OpenArgs),
    /// Walk a sample claim through every page using an in-memory store
    Demo(DemoArgs),
    /// Forget the current claim, its score, and the history
    Reset,
}

/// Intake form fields. Every field is optional here so missing values are
/// reported by claim validation alongside the rest.
#[derive(Args, Debug, Default)]
struct SubmitArgs {
    #[arg(long)]
    policy_number: Option<String>,
    #[arg(long)]
    vehicle_make: Option<String>,
    #[arg(long)]
    vehicle_model: Option<String>,
    #[arg(long)]
    vehicle_year: Option<String>,
    /// collision, theft, vandalism, weather, fire, or other
    #[arg(long, value_parser = parse_incident_type)]
    incident_type: Option<IncidentType>,
    /// Incident date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    incident_date: Option<DateTime<Utc>>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    damage_description: Option<String>,
    /// Estimated claim amount in dollars
    #[arg(long)]
    claim_amount: Option<String>,
    #[arg(long)]
    driver_age: Option<String>,
    #[arg(long)]
    driver_experience: Option<String>,
    #[arg(long)]
    previous_claims: Option<String>,
}

impl From<SubmitArgs> for ClaimSubmission {
    fn from(args: SubmitArgs) -> Self {
        Self {
            policy_number: args.policy_number.unwrap_or_default(),
            vehicle_make: args.vehicle_make.unwrap_or_default(),
            vehicle_model: args.vehicle_model.unwrap_or_default(),
            vehicle_year: args.vehicle_year.unwrap_or_default(),
            incident_type: args.incident_type,
            damage_description: args.damage_description.unwrap_or_default(),
            claim_amount: args.claim_amount.unwrap_or_default(),
            driver_age: args.driver_age.unwrap_or_default(),
            driver_experience: args.driver_experience.unwrap_or_default(),
            previous_claims: args.previous_claims.unwrap_or_default(),
            location: args.location.unwrap_or_default(),
            incident_date: args.incident_date,
        }
    }
}

#[derive(Args, Debug, Default)]
struct AssessArgs {
    /// Override APP_ASSESSMENT_SPEED for this run
    #[arg(long, value_parser = parse_speed)]
    speed: Option<f64>,
}

#[derive(Args, Debug, Default)]
struct OutputArgs {
    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Destination CSV file
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct OpenArgs {
    /// Page path: /, /submit-claim, /assessment, /results, or /dashboard
    path: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.store {
        config.storage.path = path;
    }
    telemetry::init(&config.telemetry)?;
    info!(
        environment = config.environment.as_str(),
        store = %config.storage.path.display(),
        speed = config.simulation.speed,
        "configuration loaded"
    );

    let now = Utc::now();
    let mut rng = StdRng::from_entropy();
    let mut out = io::stdout();
    let records = open_records(&config.storage);
    let assessment = AssessmentConfig::with_speed(config.simulation.speed);

    let Some(command) = cli.command else {
        render::home(&mut out)?;
        return Ok(());
    };

    match command {
        Command::Submit(args) => {
            commands::submit(&records, args.into(), now, &mut rng, &mut out)?;
        }
        Command::Assess(args) => {
            let config = match args.speed {
                Some(speed) => AssessmentConfig::with_speed(speed),
                None => assessment,
            };
            let mut observer = ConsoleObserver::new(io::stdout());
            commands::assess(&records, config, &mut rng, &mut observer, &mut out).await?;
        }
        Command::Results(args) => commands::results(&records, now, args.json, &mut out)?,
        Command::Dashboard(args) => {
            commands::dashboard(&records, now, &mut rng, args.json, &mut out)?
        }
        Command::Export(args) => {
            commands::export(&records, &args.out, &mut out)?;
        }
        Command::Open(args) => {
            let mut observer = ConsoleObserver::new(io::stdout());
            commands::open(
                &records,
                &args.path,
                assessment,
                now,
                &mut rng,
                &mut observer,
                &mut out,
            )
            .await?;
        }
        Command::Demo(args) => run_demo(args, now).await?,
        Command::Reset => commands::reset(&records, &mut out)?,
    }
    Ok(())
}

//! `onboard` command line
//!
//! Thin front end over the library: every network command goes through the
//! same services and session the form uses.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use shared::models::value_to_text;
use shared::{
    DraftField, EmployeeDraft, EmployeeRecord, FormStep, ManagerCandidate, MasterDataSet, MasterList,
    SERVER_MANAGED_FIELDS, StalePolicy, find_item, validate_step, validate_submission,
};

use crate::{ClientConfig, EmployeeService, MasterDataGateway, NetworkHttpClient, OnboardingSession};

#[derive(Debug, Parser)]
#[command(name = "onboard", version, about = "Employee onboarding client")]
pub struct Cli {
    /// API root, e.g. http://localhost:3000/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// keep | clear-if-absent
    #[arg(long, global = true)]
    pub stale_policy: Option<StalePolicy>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employees
    List,
    /// Show one employee
    Show { id: String },
    /// Delete an employee
    Delete { id: String },
    /// Print every master data list
    Masters,
    /// Check a draft file without contacting the backend
    Validate {
        file: PathBuf,
        /// Only this step (0 = personal & job, 1 = address & bank)
        #[arg(long)]
        step: Option<usize>,
    },
    /// Create an employee from a draft file
    Create { file: PathBuf },
    /// Apply a draft file on top of an existing employee
    Update { id: String, file: PathBuf },
}

impl Cli {
    /// Layer command-line flags over `config`
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_url {
            config.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(policy) = self.stale_policy {
            config.stale_policy = policy;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}

/// Execute a parsed command
pub async fn run(cli: Cli, config: ClientConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::List => {
            let records = EmployeeService::new(connect(&config)?).list().await?;
            print!("{}", format_employee_list(&records));
        }
        Command::Show { id } => {
            let client = connect(&config)?;
            let employees = EmployeeService::new(Arc::clone(&client));
            let gateway = MasterDataGateway::new(client);
            let (record, masters) = futures::try_join!(employees.get(&id), gateway.fetch_all())?;
            print!("{}", format_record(&record, &masters));
        }
        Command::Delete { id } => {
            EmployeeService::new(connect(&config)?).delete(&id).await?;
            println!("Deleted employee {}", id.trim());
        }
        Command::Masters => {
            let masters = MasterDataGateway::new(connect(&config)?).fetch_all().await?;
            print!("{}", format_masters(&masters));
        }
        Command::Validate { file, step } => {
            let draft = draft_from_fields(read_fields(&file)?);
            validate_draft(&draft, step)?;
            println!("{} is valid", file.display());
        }
        Command::Create { file } => {
            let fields = read_fields(&file)?;
            let mut session = OnboardingSession::create(connect(&config)?, config.stale_policy).await?;
            fill(&mut session, fields).await?;
            let record = session.submit().await?;
            match record.id() {
                Some(id) => println!("Created employee {id}"),
                None => println!("Created employee"),
            }
        }
        Command::Update { id, file } => {
            let fields = read_fields(&file)?;
            let mut session = OnboardingSession::edit(connect(&config)?, &id, config.stale_policy).await?;
            fill(&mut session, fields).await?;
            session.submit().await?;
            println!("Updated employee {}", id.trim());
        }
    }
    Ok(())
}

fn connect(config: &ClientConfig) -> anyhow::Result<Arc<NetworkHttpClient>> {
    let client = config.build_http_client()?;
    tracing::debug!(base_url = %client.base_url(), "Using backend");
    Ok(Arc::new(client))
}

async fn fill(
    session: &mut OnboardingSession<NetworkHttpClient>,
    fields: Vec<(DraftField, String)>,
) -> anyhow::Result<()> {
    for (field, value) in fields {
        session
            .update(field, value)
            .await
            .with_context(|| format!("loading options for {}", field.label()))?;
    }
    Ok(())
}

/// Read a draft file: a JSON object of field name to value
///
/// Fields come back in form order, so a department is always set before
/// its designation and a country before its state. Server-managed keys are
/// ignored; any other unknown key is an error.
pub fn read_fields(path: &Path) -> anyhow::Result<Vec<(DraftField, String)>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let map: Map<String, Value> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    parse_fields(&map)
}

fn parse_fields(map: &Map<String, Value>) -> anyhow::Result<Vec<(DraftField, String)>> {
    let mut fields = Vec::with_capacity(map.len());
    for (key, value) in map {
        if SERVER_MANAGED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let field: DraftField = key.parse()?;
        fields.push((field, value_to_text(value)));
    }
    fields.sort_by_key(|(field, _)| *field);
    Ok(fields)
}

fn draft_from_fields(fields: Vec<(DraftField, String)>) -> EmployeeDraft {
    fields
        .into_iter()
        .fold(EmployeeDraft::empty(), |draft, (field, value)| draft.with(field, value))
}

/// One step, or every step followed by the submission check
fn validate_draft(draft: &EmployeeDraft, step: Option<usize>) -> anyhow::Result<()> {
    match step {
        Some(index) => {
            let step = FormStep::from_index(index).with_context(|| format!("no step {index}"))?;
            validate_step(draft, step.index()).with_context(|| step.title())?;
        }
        None => {
            for step in FormStep::ALL {
                validate_step(draft, step.index()).with_context(|| step.title())?;
            }
            validate_submission(draft).context("Submission")?;
        }
    }
    Ok(())
}

pub fn format_employee_list(records: &[EmployeeRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No employees\n");
        return out;
    }
    for record in records {
        let name = format!("{} {}", record.first_name(), record.last_name());
        let _ = writeln!(
            out,
            "{:<8} {:<28} {}",
            record.id().unwrap_or_else(|| "-".to_string()),
            name.trim(),
            record.email()
        );
    }
    out
}

/// Every form field under its section heading, in form order
///
/// Selections from a fixed list and the reporting manager are shown by name
/// when `masters` knows the id.
pub fn format_record(record: &EmployeeRecord, masters: &MasterDataSet) -> String {
    let draft = EmployeeDraft::from_record(record);
    let mut out = String::new();
    if let Some(id) = record.id() {
        let _ = writeln!(out, "{:<22} {}", "Employee ID", id);
    }
    let mut section = None;
    for field in DraftField::ALL {
        if section != Some(field.section()) {
            section = Some(field.section());
            let _ = writeln!(out, "\n[{}]", field.section().title());
        }
        let _ = writeln!(out, "  {:<20} {}", field.label(), display_value(field, draft.get(field), masters));
    }
    out
}

fn display_value(field: DraftField, value: &str, masters: &MasterDataSet) -> String {
    let name = match field {
        DraftField::ReportingManagerId => masters.manager(value).map(ManagerCandidate::display_name),
        _ => MasterList::for_field(field)
            .and_then(|list| find_item(masters.list(list), value))
            .map(|item| item.name.clone()),
    };
    match name {
        Some(name) => format!("{name} ({value})"),
        None => value.to_string(),
    }
}

pub fn format_masters(masters: &MasterDataSet) -> String {
    let mut out = String::new();
    for list in MasterList::ALL {
        let items = masters.list(list);
        let _ = writeln!(out, "{} ({})", list.path().trim_start_matches("masters/"), items.len());
        for item in items {
            let _ = writeln!(out, "  {:<6} {}", item.id, item.name);
        }
    }
    let _ = writeln!(out, "managers ({})", masters.managers.len());
    for manager in &masters.managers {
        let _ = writeln!(out, "  {:<6} {}", manager.employee_id, manager.display_name());
    }
    out
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use staffdesk::hr::types::{
    ApprovalDecision, ChangePasswordRequest, DepartmentFilter, EmployeeFilter, EmployeeStatus, LeaveApproval,
    LeaveFilter, LeaveStatus, LeaveType,
};
use staffdesk::tracker::types::{AdminAttendanceQuery, AttendanceNote, RegisterRequest, StatsQuery};
use staffdesk::{ApiClient, ApiError, ClientConfig, ConfigError, FileStore, PageQuery, StoreError, Variant};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid HTTP method `{0}`")]
    InvalidMethod(String),
    #[error("invalid query pair `{0}`; expected key=value")]
    InvalidQuery(String),
}

#[derive(Parser, Debug)]
#[command(name = "staffdesk", about = "Attendance tracker and HR backend CLI")]
struct Cli {
    /// Backend for `status`, `logout` and `api`; else `STAFFDESK_VARIANT`.
    #[arg(long, global = true)]
    variant: Option<Variant>,

    /// Overrides `STAFFDESK_API_URL` / `NEXT_PUBLIC_API_URL`.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Overrides `STAFFDESK_LOGIN_PATH`.
    #[arg(long, global = true)]
    login_path: Option<String>,

    /// Overrides `STAFFDESK_REQUEST_TIMEOUT_SECS`.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Session file; defaults to `.staffdesk-<variant>.json`.
    #[arg(long, env = "STAFFDESK_SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Restore the stored session and print the signed-in principal.
    Status,
    Logout,
    /// Raw call: `api GET /attendance/today`.
    Api(RawArgs),
    Tracker(TrackerCommand),
    Hr(HrCommand),
}

#[derive(Args, Debug)]
struct RawArgs {
    method: String,
    path: String,
    #[arg(long)]
    data: Option<String>,
    /// Repeatable `key=value`.
    #[arg(long = "query", short = 'q')]
    query: Vec<String>,
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

impl From<PageArgs> for PageQuery {
    fn from(args: PageArgs) -> Self {
        PageQuery::new(args.page, args.limit)
    }
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long, env = "STAFFDESK_EMAIL")]
    email: String,
    #[arg(long, env = "STAFFDESK_PASSWORD", hide_env_values = true)]
    password: String,
}

// =============================================================================
// TRACKER
// =============================================================================

#[derive(Args, Debug)]
struct TrackerCommand {
    #[command(subcommand)]
    command: TrackerSubcommand,
}

#[derive(Subcommand, Debug)]
enum TrackerSubcommand {
    Login(Credentials),
    Register {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        name: String,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        department: Option<String>,
    },
    Logout,
    Profile,
    /// Partial profile update from a JSON object.
    UpdateProfile {
        #[arg(long)]
        data: String,
    },
    CheckIn {
        #[arg(long)]
        notes: Option<String>,
    },
    CheckOut {
        #[arg(long)]
        notes: Option<String>,
    },
    Today,
    History(PageArgs),
    Stats {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    Admin(TrackerAdminCommand),
}

#[derive(Args, Debug)]
struct TrackerAdminCommand {
    #[command(subcommand)]
    command: TrackerAdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum TrackerAdminSubcommand {
    Users(PageArgs),
    Attendance {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        user_id: Option<u64>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    UpdateUser {
        id: u64,
        #[arg(long)]
        data: String,
    },
    DeleteUser {
        id: u64,
    },
}

// =============================================================================
// HR
// =============================================================================

#[derive(Args, Debug)]
struct HrCommand {
    #[command(subcommand)]
    command: HrSubcommand,
}

#[derive(Subcommand, Debug)]
enum HrSubcommand {
    Login(Credentials),
    /// Create an account from a JSON object; does not sign in.
    Register {
        #[arg(long)]
        data: String,
    },
    Logout,
    Profile,
    ChangePassword {
        #[arg(long, env = "STAFFDESK_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long)]
        new: String,
    },
    Employee(EmployeeCommand),
    Department(DepartmentCommand),
    Leave(LeaveCommand),
}

#[derive(Args, Debug)]
struct EmployeeCommand {
    #[command(subcommand)]
    command: EmployeeSubcommand,
}

#[derive(Subcommand, Debug)]
enum EmployeeSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Department id.
        #[arg(long)]
        department: Option<u64>,
        #[arg(long, value_parser = parse_wire::<EmployeeStatus>)]
        status: Option<EmployeeStatus>,
        #[arg(long)]
        search: Option<String>,
    },
    Get {
        id: u64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: u64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: u64,
    },
}

#[derive(Args, Debug)]
struct DepartmentCommand {
    #[command(subcommand)]
    command: DepartmentSubcommand,
}

#[derive(Subcommand, Debug)]
enum DepartmentSubcommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Get {
        id: u64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: u64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: u64,
    },
}

#[derive(Args, Debug)]
struct LeaveCommand {
    #[command(subcommand)]
    command: LeaveSubcommand,
}

#[derive(Subcommand, Debug)]
enum LeaveSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Employee id.
        #[arg(long)]
        employee: Option<u64>,
        #[arg(long, value_parser = parse_wire::<LeaveStatus>)]
        status: Option<LeaveStatus>,
        #[arg(long = "type", value_parser = parse_wire::<LeaveType>)]
        leave_type: Option<LeaveType>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    Get {
        id: u64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: u64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: u64,
    },
    Approve {
        id: u64,
        #[arg(long)]
        comments: Option<String>,
    },
    Reject {
        id: u64,
        #[arg(long)]
        comments: Option<String>,
    },
    Types,
    Statuses,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    if let Err(error) = dotenv {
        if !error.not_found() {
            tracing::warn!(%error, "failed to load .env");
        }
    }

    let cli = Cli::parse();
    let config = match command_variant(&cli) {
        Some(variant) => ClientConfig::from_env_for(variant)?,
        None => ClientConfig::from_env()?,
    };
    let client = build_client(&cli, apply_overrides(&cli, config))?;

    match cli.command {
        Command::Status => run_status(&client).await,
        Command::Logout => {
            client.end_session()?;
            eprintln!("signed out");
            Ok(())
        }
        Command::Api(args) => run_raw(&client, args).await,
        Command::Tracker(tracker) => run_tracker(&client, tracker).await,
        Command::Hr(hr) => run_hr(&client, hr).await,
    }
}

/// `tracker` and `hr` subcommands pin their backend; the rest follow `--variant`.
fn command_variant(cli: &Cli) -> Option<Variant> {
    match &cli.command {
        Command::Tracker(_) => Some(Variant::Tracker),
        Command::Hr(_) => Some(Variant::Hr),
        _ => cli.variant,
    }
}

fn apply_overrides(cli: &Cli, mut config: ClientConfig) -> ClientConfig {
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url);
    }
    if let Some(path) = &cli.login_path {
        config.login_path.clone_from(path);
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout_secs = Some(secs);
    }
    config
}

fn build_client(cli: &Cli, config: ClientConfig) -> Result<ApiClient, CliError> {
    let path = cli
        .session_file
        .clone()
        .unwrap_or_else(|| default_session_file(config.variant));
    let store = FileStore::open(path)?;
    tracing::debug!(base_url = %config.base_url, session = %store.path().display(), "client configured");

    Ok(ApiClient::new(config, Arc::new(store))?)
}

fn default_session_file(variant: Variant) -> PathBuf {
    match variant {
        Variant::Tracker => PathBuf::from(".staffdesk-tracker.json"),
        Variant::Hr => PathBuf::from(".staffdesk-hr.json"),
    }
}

async fn run_status(client: &ApiClient) -> Result<(), CliError> {
    let principal = match client.config().variant {
        Variant::Tracker => client
            .tracker()
            .auth()
            .restore()
            .await?
            .map(|session| serde_json::to_value(session.principal))
            .transpose()?,
        Variant::Hr => client
            .hr()
            .auth()
            .restore()
            .await?
            .map(|session| serde_json::to_value(session.principal))
            .transpose()?,
    };
    print_json(&serde_json::json!({
        "authenticated": client.state().is_authenticated(),
        "principal": principal,
    }))
}

async fn run_raw(client: &ApiClient, args: RawArgs) -> Result<(), CliError> {
    let method = reqwest::Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .map_err(|_| CliError::InvalidMethod(args.method.clone()))?;
    let body = args
        .data
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()?;
    let query = args
        .query
        .iter()
        .map(|pair| parse_query_pair(pair))
        .collect::<Result<Vec<_>, _>>()?;

    let json: Value = client
        .request(method, &args.path, body.as_ref(), &query)
        .await?;
    print_json(&json)
}

async fn run_tracker(client: &ApiClient, tracker: TrackerCommand) -> Result<(), CliError> {
    let api = client.tracker();
    match tracker.command {
        TrackerSubcommand::Login(credentials) => {
            let session = api
                .auth()
                .login(&credentials.email, &credentials.password)
                .await?;
            print_json(&session.principal)
        }
        TrackerSubcommand::Register { credentials, name, position, department } => {
            let request = RegisterRequest {
                email: credentials.email,
                name,
                password: credentials.password,
                position,
                department,
            };
            let session = api.auth().register(&request).await?;
            print_json(&session.principal)
        }
        TrackerSubcommand::Logout => {
            api.auth().logout()?;
            eprintln!("signed out");
            Ok(())
        }
        TrackerSubcommand::Profile => print_json(&api.auth().refresh_profile().await?),
        TrackerSubcommand::UpdateProfile { data } => {
            let request = parse_data(&data)?;
            print_json(&api.auth().update_profile(&request).await?)
        }
        TrackerSubcommand::CheckIn { notes } => {
            print_json(&api.attendance().check_in(&AttendanceNote::new(notes)).await?)
        }
        TrackerSubcommand::CheckOut { notes } => {
            print_json(&api.attendance().check_out(&AttendanceNote::new(notes)).await?)
        }
        TrackerSubcommand::Today => print_json(&api.attendance().today().await?),
        TrackerSubcommand::History(page) => print_json(&api.attendance().history(page.into()).await?),
        TrackerSubcommand::Stats { start_date, end_date } => {
            let query = StatsQuery { start_date, end_date };
            print_json(&api.attendance().stats(&query).await?)
        }
        TrackerSubcommand::Admin(admin) => run_tracker_admin(client, admin).await,
    }
}

async fn run_tracker_admin(client: &ApiClient, admin: TrackerAdminCommand) -> Result<(), CliError> {
    let api = client.tracker().admin();
    match admin.command {
        TrackerAdminSubcommand::Users(page) => print_json(&api.users(page.into()).await?),
        TrackerAdminSubcommand::Attendance { page, user_id, start_date, end_date } => {
            let query = AdminAttendanceQuery { page: page.page, limit: page.limit, user_id, start_date, end_date };
            print_json(&api.attendance(&query).await?)
        }
        TrackerAdminSubcommand::UpdateUser { id, data } => {
            let request = parse_data(&data)?;
            print_json(&api.update_user(id, &request).await?)
        }
        TrackerAdminSubcommand::DeleteUser { id } => print_json(&api.delete_user(id).await?),
    }
}

async fn run_hr(client: &ApiClient, hr: HrCommand) -> Result<(), CliError> {
    let api = client.hr();
    match hr.command {
        HrSubcommand::Login(credentials) => {
            let session = api
                .auth()
                .login(&credentials.email, &credentials.password)
                .await?;
            print_json(&session.principal)
        }
        HrSubcommand::Register { data } => {
            let request = parse_data(&data)?;
            print_json(&api.auth().register(&request).await?)
        }
        HrSubcommand::Logout => {
            api.auth().logout()?;
            eprintln!("signed out");
            Ok(())
        }
        HrSubcommand::Profile => print_json(&api.auth().refresh_profile().await?),
        HrSubcommand::ChangePassword { current, new } => {
            let request = ChangePasswordRequest { current_password: current, new_password: new };
            print_json(&api.auth().change_password(&request).await?)
        }
        HrSubcommand::Employee(employee) => run_hr_employee(client, employee).await,
        HrSubcommand::Department(department) => run_hr_department(client, department).await,
        HrSubcommand::Leave(leave) => run_hr_leave(client, leave).await,
    }
}

async fn run_hr_employee(client: &ApiClient, employee: EmployeeCommand) -> Result<(), CliError> {
    let api = client.hr().employees();
    match employee.command {
        EmployeeSubcommand::List { page, department, status, search } => {
            let filter = EmployeeFilter { page: page.page, limit: page.limit, department, status, search };
            print_json(&api.list(&filter).await?)
        }
        EmployeeSubcommand::Get { id } => print_json(&api.get(id).await?),
        EmployeeSubcommand::Create { data } => {
            let request = parse_data(&data)?;
            print_json(&api.create(&request).await?)
        }
        EmployeeSubcommand::Update { id, data } => {
            let request = parse_data(&data)?;
            print_json(&api.update(id, &request).await?)
        }
        EmployeeSubcommand::Delete { id } => print_json(&api.delete(id).await?),
    }
}

async fn run_hr_department(client: &ApiClient, department: DepartmentCommand) -> Result<(), CliError> {
    let api = client.hr().departments();
    match department.command {
        DepartmentSubcommand::List { search, active } => {
            print_json(&api.list(&DepartmentFilter { search, active }).await?)
        }
        DepartmentSubcommand::Get { id } => print_json(&api.get(id).await?),
        DepartmentSubcommand::Create { data } => {
            let request = parse_data(&data)?;
            print_json(&api.create(&request).await?)
        }
        DepartmentSubcommand::Update { id, data } => {
            let request = parse_data(&data)?;
            print_json(&api.update(id, &request).await?)
        }
        DepartmentSubcommand::Delete { id } => print_json(&api.delete(id).await?),
    }
}

async fn run_hr_leave(client: &ApiClient, leave: LeaveCommand) -> Result<(), CliError> {
    let api = client.hr().leaves();
    match leave.command {
        LeaveSubcommand::List { page, employee, status, leave_type, start_date, end_date } => {
            let filter = LeaveFilter {
                page: page.page,
                limit: page.limit,
                employee,
                status,
                leave_type,
                start_date,
                end_date,
            };
            print_json(&api.list(&filter).await?)
        }
        LeaveSubcommand::Get { id } => print_json(&api.get(id).await?),
        LeaveSubcommand::Create { data } => {
            let request = parse_data(&data)?;
            print_json(&api.create(&request).await?)
        }
        LeaveSubcommand::Update { id, data } => {
            let request = parse_data(&data)?;
            print_json(&api.update(id, &request).await?)
        }
        LeaveSubcommand::Delete { id } => print_json(&api.delete(id).await?),
        LeaveSubcommand::Approve { id, comments } => {
            let approval = LeaveApproval::new(ApprovalDecision::Approved, comments.unwrap_or_default());
            print_json(&api.approve(id, &approval).await?)
        }
        LeaveSubcommand::Reject { id, comments } => {
            let approval = LeaveApproval::new(ApprovalDecision::Rejected, comments.unwrap_or_default());
            print_json(&api.approve(id, &approval).await?)
        }
        LeaveSubcommand::Types => print_json(&api.types().await?),
        LeaveSubcommand::Statuses => print_json(&api.statuses().await?),
    }
}

fn parse_data<T: DeserializeOwned>(data: &str) -> Result<T, CliError> {
    Ok(serde_json::from_str(data)?)
}

/// Parse a value the way the backend spells it, e.g. `Active` or `Annual`.
fn parse_wire<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(Value::String(raw.to_owned())).map_err(|error| error.to_string())
}

fn parse_query_pair(pair: &str) -> Result<(&str, String), CliError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value.to_owned())),
        _ => Err(CliError::InvalidQuery(pair.to_owned())),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

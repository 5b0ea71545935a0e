//! `gridlead` CLI — early-access requests for The Grid from a terminal.
//!
//! Runs the same validation and delivery pipeline as the landing page form,
//! with the terminal standing in for the page.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod terminal;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use gridlead_core::config::{
    DEFAULT_CONFIRM_DELAY_MS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOG_LEVEL, DEFAULT_PRODUCT,
    DEFAULT_RECIPIENT, DEFAULT_SOURCE, DeliveryMode, LeadFormConfig,
};
use gridlead_core::controller::REJECTED_STATUS;
use gridlead_core::delivery::MailtoComposer;
use gridlead_core::lead::{self, TIMELINE_OPTIONS};
use gridlead_core::validate::{ValidationResult, validate};
use gridlead_core::{FormController, SubmitOutcome};
use gridlead_surface::{Confirmation, FieldId, MemorySurface};

use terminal::{ConfirmMode, TerminalSurface};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ── CLI structure ────────────────────────────────────────────────────

/// gridlead — request early access to The Grid.
#[derive(Parser)]
#[command(
    name = "gridlead",
    version,
    about = "gridlead — submit, compose, and validate early-access requests for The Grid",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         GRIDLEAD_DELIVERY           mailto (default) or http\n  \
         GRIDLEAD_ENDPOINT           Form backend URL for http delivery\n  \
         GRIDLEAD_RECIPIENT          Mailbox for mailto delivery\n  \
         GRIDLEAD_PRODUCT            Product named in the subject and body\n  \
         GRIDLEAD_SOURCE             Site named in the body footer\n  \
         GRIDLEAD_CONFIRM_DELAY_MS   Pause before asking whether the email went out\n  \
         GRIDLEAD_HTTP_TIMEOUT_SECS  HTTP request timeout\n  \
         GRIDLEAD_LOG                Log filter (default: warn)\n\n\
         Flags take precedence over the environment.\n\n\
         {DIM}Examples:{RESET}\n  \
         gridlead validate --name Ada --email ada@x.com --usecase 'index search' --consent\n  \
         gridlead compose --name Ada --email ada@x.com --usecase 'index search' --consent\n  \
         gridlead submit --delivery http --endpoint https://forms.example/leads --name Ada ..."
    ),
)]
struct Cli {
    /// Log filter.
    #[arg(long, global = true, env = "GRIDLEAD_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value = "false")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and deliver an early-access request.
    Submit {
        #[command(flatten)]
        lead: LeadArgs,
        #[command(flatten)]
        message: MessageArgs,
        #[command(flatten)]
        delivery: DeliveryArgs,
        /// Hand the mailto link to the system opener instead of printing it.
        #[arg(long, default_value = "false")]
        open: bool,
        /// How to answer "did your email go out?".
        #[arg(long, value_enum, default_value = "ask")]
        confirm: ConfirmMode,
    },
    /// Validate a request and print the mailto link it would open.
    Compose {
        #[command(flatten)]
        lead: LeadArgs,
        #[command(flatten)]
        message: MessageArgs,
        /// Also print the plain-text body.
        #[arg(long, default_value = "false")]
        body: bool,
        /// Print the composed message as JSON.
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Check a request without sending it.
    Validate {
        #[command(flatten)]
        lead: LeadArgs,
        /// Print the result as JSON.
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// List the accepted timeline choices.
    Timelines,
}

/// The form fields, one flag each.
#[derive(Args)]
struct LeadArgs {
    /// Full name.
    #[arg(long)]
    name: Option<String>,
    /// Work email.
    #[arg(long)]
    email: Option<String>,
    /// Role or title.
    #[arg(long)]
    role: Option<String>,
    /// Company or organization.
    #[arg(long)]
    org: Option<String>,
    /// What you want to build on The Grid.
    #[arg(long)]
    usecase: Option<String>,
    /// Rough timeline (see `gridlead timelines`).
    #[arg(long)]
    timeline: Option<String>,
    /// Allow the team to contact you about early access.
    #[arg(long, default_value = "false")]
    consent: bool,
}

impl LeadArgs {
    /// Type the flags into a fresh in-memory page.
    fn into_page(self) -> MemorySurface {
        let typed = [
            (FieldId::Name, self.name),
            (FieldId::Email, self.email),
            (FieldId::Role, self.role),
            (FieldId::Org, self.org),
            (FieldId::Usecase, self.usecase),
            (FieldId::Timeline, self.timeline),
        ];
        let page = MemorySurface::new();
        for (field, value) in typed {
            if let Some(value) = value {
                page.set_value(field, value);
            }
        }
        page.set_checked(FieldId::Consent, self.consent);
        page
    }
}

/// What the composed email says and where it goes.
#[derive(Args)]
struct MessageArgs {
    /// Mailbox that receives mailto requests.
    #[arg(long, env = "GRIDLEAD_RECIPIENT", default_value = DEFAULT_RECIPIENT)]
    recipient: String,
    /// Product named in the subject and body.
    #[arg(long, env = "GRIDLEAD_PRODUCT", default_value = DEFAULT_PRODUCT)]
    product: String,
    /// Site named in the body footer.
    #[arg(long, env = "GRIDLEAD_SOURCE", default_value = DEFAULT_SOURCE)]
    source: String,
}

impl MessageArgs {
    fn apply(self, config: &mut LeadFormConfig) {
        config.recipient = self.recipient;
        config.product = self.product;
        config.source = self.source;
    }
}

/// How the request is delivered.
#[derive(Args)]
struct DeliveryArgs {
    /// `mailto` or `http`.
    #[arg(long, env = "GRIDLEAD_DELIVERY", default_value = "mailto")]
    delivery: String,
    /// Form backend URL for `http` delivery.
    #[arg(long, env = "GRIDLEAD_ENDPOINT")]
    endpoint: Option<String>,
    /// Pause before the confirmation question, in milliseconds.
    #[arg(long, env = "GRIDLEAD_CONFIRM_DELAY_MS", default_value_t = DEFAULT_CONFIRM_DELAY_MS)]
    confirm_delay_ms: u64,
    /// HTTP request timeout, in seconds.
    #[arg(long, env = "GRIDLEAD_HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl DeliveryArgs {
    fn apply(self, config: &mut LeadFormConfig) -> Result<()> {
        config.delivery = DeliveryMode::parse(&self.delivery, self.endpoint.as_deref())
            .context("invalid delivery settings")?;
        config.confirm_delay = Duration::from_millis(self.confirm_delay_ms);
        config.http_timeout = Duration::from_secs(self.timeout_secs);
        Ok(())
    }
}

// ── Output helpers ───────────────────────────────────────────────────

fn header(icon: &str, title: &str) {
    println!("{BOLD}{CYAN}{icon} {title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<20}{RESET} {WHITE}{value}{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

fn print_errors(result: &ValidationResult) {
    for (field, message) in &result.errors {
        println!("  {RED}✗{RESET} {BOLD}{:<8}{RESET} {message}", field.as_str());
    }
}

fn init_tracing(filter: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter '{filter}'"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

// ── Main ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    init_tracing(&cli.log, cli.log_json)?;
    let mut config = LeadFormConfig {
        log_level: cli.log,
        ..LeadFormConfig::default()
    };

    match cli.command {
        Commands::Submit {
            lead,
            message,
            delivery,
            open,
            confirm,
        } => {
            message.apply(&mut config);
            delivery.apply(&mut config)?;
            cmd_submit(&config, lead, open, confirm).await
        }
        Commands::Compose {
            lead,
            message,
            body,
            json,
        } => {
            message.apply(&mut config);
            cmd_compose(&config, lead, body, json)
        }
        Commands::Validate { lead, json } => cmd_validate(lead, json),
        Commands::Timelines => {
            cmd_timelines();
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

async fn cmd_submit(
    config: &LeadFormConfig,
    lead: LeadArgs,
    open: bool,
    confirm: ConfirmMode,
) -> Result<ExitCode> {
    debug!(delivery = config.delivery.name(), "submitting lead");
    let surface = Arc::new(TerminalSurface::new(lead.into_page(), open, confirm));
    let controller = FormController::from_config(config, surface)
        .context("failed to set up delivery")?
        .context("no lead form to submit")?;

    header("✉", &format!("Early access · {}", config.product));
    let outcome = controller.submit().await;

    let code = match outcome {
        SubmitOutcome::Delivered {
            confirmation: Some(Confirmation::CouldNotSend),
            ..
        }
        | SubmitOutcome::Rejected(_)
        | SubmitOutcome::Failed(_) => ExitCode::FAILURE,
        SubmitOutcome::Delivered { .. } => ExitCode::SUCCESS,
        SubmitOutcome::Ignored => {
            warning("A submission is already in progress.");
            ExitCode::FAILURE
        }
    };
    Ok(code)
}

fn cmd_compose(config: &LeadFormConfig, lead: LeadArgs, body: bool, json: bool) -> Result<ExitCode> {
    let page = lead.into_page();
    let record = lead::collect(&page);
    let result = validate(&record);
    if !result.valid {
        warning("The request is incomplete.");
        print_errors(&result);
        return Ok(ExitCode::FAILURE);
    }

    let mail = MailtoComposer::from_config(config, Arc::new(page)).compose(&record);
    if json {
        let value = serde_json::json!({
            "to": mail.to,
            "subject": mail.subject,
            "body": mail.body,
            "uri": mail.uri,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ExitCode::SUCCESS);
    }

    header("✉", "Composed request");
    kv_line("To", &mail.to);
    kv_line("Subject", &mail.subject);
    println!();
    println!("{}", mail.uri);
    if body {
        println!();
        println!("{DIM}─────────────────────────────────────────{RESET}");
        println!("{}", mail.body);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_validate(lead: LeadArgs, json: bool) -> Result<ExitCode> {
    let record = lead::collect(&lead.into_page());
    let result = validate(&record);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.valid {
        success("The request is complete.");
    } else {
        warning(REJECTED_STATUS);
        print_errors(&result);
    }

    Ok(if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_timelines() {
    header("◷", "Timeline options");
    for option in TIMELINE_OPTIONS {
        println!("  {option}");
    }
}

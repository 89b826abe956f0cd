// crates/formgate-cli/src/main.rs
// ============================================================================
// Module: FormGate CLI Entry Point
// Description: Command dispatcher for offline form validation workflows.
// Purpose: Validate filled forms, single values, and rule structure from files.
// Dependencies: clap, formgate-config, formgate-core, serde, serde_jcs, thiserror.
// ============================================================================

//! ## Overview
//! The `formgate` binary validates a saved component tree against a form
//! context, checks one value against a rule set, lints form structure, and
//! prints default rule sets. Results are written as canonical JSON. Exit
//! codes: `0` success, `1` error, `2` validation or lint failure.
//!
//! Security posture: template, context, and rule files are untrusted and are
//! read with hard size limits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::ArgGroup;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use formgate_cli::t;
use formgate_config::FormGateConfig;
use formgate_core::ComponentTree;
use formgate_core::FormContext;
use formgate_core::GateEvaluation;
use formgate_core::LintIssue;
use formgate_core::ValidationEngine;
use formgate_core::ValidationRuleSet;
use formgate_core::ValidationVerdict;
use formgate_core::default_rules_for_input;
use formgate_core::evaluate_gate;
use formgate_core::library_default_rules;
use formgate_core::lint_component_tree;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a component tree file.
const MAX_TEMPLATE_BYTES: usize = 4 * 1024 * 1024;
/// Maximum size of a form context file.
const MAX_CONTEXT_BYTES: usize = 4 * 1024 * 1024;
/// Maximum size of a rule set file.
const MAX_RULES_BYTES: usize = 1024 * 1024;
/// Exit status for a failed validation or lint.
const EXIT_REJECTED: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "formgate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every rule-bearing field of a filled form.
    Validate(ValidateCommand),
    /// Validate one value against one rule set.
    Field(FieldCommand),
    /// Report structural issues in a component tree.
    Lint(LintCommand),
    /// Print a default rule set.
    Defaults(DefaultsCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for form validation.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Component tree JSON file.
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
    /// Form context JSON file.
    #[arg(long, value_name = "PATH")]
    context: PathBuf,
    /// Optional config file path (defaults to formgate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for single-value validation.
#[derive(Args, Debug)]
struct FieldCommand {
    /// Rule set JSON file.
    #[arg(long, value_name = "PATH")]
    rules: PathBuf,
    /// Field value as JSON; omitted means unset.
    #[arg(long, value_name = "JSON")]
    value: Option<String>,
    /// Optional form context JSON file; omitted means an empty form.
    #[arg(long, value_name = "PATH")]
    context: Option<PathBuf>,
    /// Include the condition gate trace in the output.
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,
    /// Optional config file path (defaults to formgate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for structural lint.
#[derive(Args, Debug)]
struct LintCommand {
    /// Component tree JSON file.
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = LintFormat::Json)]
    format: LintFormat,
    /// Optional config file path (defaults to formgate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for default rule sets.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["kind", "component"])))]
struct DefaultsCommand {
    /// Input kind (`email`, `url`, `number`, `phone`, ...).
    #[arg(long, value_name = "KIND")]
    kind: Option<String>,
    /// Component type as dropped from the library (`input`, `select`, ...).
    #[arg(long, value_name = "TYPE")]
    component: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a FormGate configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to formgate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output formats for lint reports.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LintFormat {
    /// Canonical JSON output.
    Json,
    /// Human-readable text output.
    Text,
}

// ============================================================================
// SECTION: Output Types
// ============================================================================

/// Single-value validation output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReport {
    /// Validation outcome.
    #[serde(flatten)]
    verdict: ValidationVerdict,
    /// Gate trace, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    gate: Option<GateEvaluation>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Validate(command) => command_validate(&command),
        Commands::Field(command) => command_field(&command),
        Commands::Lint(command) => command_lint(&command),
        Commands::Defaults(command) => command_defaults(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Validation Commands
// ============================================================================

/// Executes the form validation command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let engine = load_engine(command.config.as_deref())?;
    let tree: ComponentTree =
        read_json_input(&command.template, &t!("input.kind.template"), MAX_TEMPLATE_BYTES)?;
    let context: FormContext =
        read_json_input(&command.context, &t!("input.kind.context"), MAX_CONTEXT_BYTES)?;
    let verdict = engine
        .validate_form(&tree, &context)
        .map_err(|err| CliError::new(t!("validate.failed", error = err)))?;
    write_canonical_json(&verdict)?;
    Ok(exit_for(verdict.can_submit()))
}

/// Executes the single-value validation command.
fn command_field(command: &FieldCommand) -> CliResult<ExitCode> {
    let engine = load_engine(command.config.as_deref())?;
    let rules: ValidationRuleSet =
        read_json_input(&command.rules, &t!("input.kind.rules"), MAX_RULES_BYTES)?;
    let context: FormContext = match &command.context {
        Some(path) => read_json_input(path, &t!("input.kind.context"), MAX_CONTEXT_BYTES)?,
        None => FormContext::new(),
    };
    let value = command
        .value
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .map_err(|err| CliError::new(t!("field.value_parse_failed", error = err)))?;
    let verdict = engine
        .verdict(value.as_ref(), Some(&rules), &context)
        .map_err(|err| CliError::new(t!("validate.failed", error = err)))?;
    let valid = verdict.is_valid();
    let gate = command.trace.then(|| evaluate_gate(&rules.conditions, &context));
    write_canonical_json(&FieldReport {
        verdict,
        gate,
    })?;
    Ok(exit_for(valid))
}

/// Executes the structural lint command.
fn command_lint(command: &LintCommand) -> CliResult<ExitCode> {
    let engine = load_engine(command.config.as_deref())?;
    let tree: ComponentTree =
        read_json_input(&command.template, &t!("input.kind.template"), MAX_TEMPLATE_BYTES)?;
    let issues = lint_component_tree(&tree, engine.limits());
    match command.format {
        LintFormat::Json => write_canonical_json(&issues)?,
        LintFormat::Text => render_lint_text(&issues)?,
    }
    Ok(exit_for(issues.is_empty()))
}

/// Executes the default rule set command.
fn command_defaults(command: &DefaultsCommand) -> CliResult<ExitCode> {
    match (&command.kind, &command.component) {
        (Some(kind), _) => write_canonical_json(&default_rules_for_input(kind))?,
        (None, Some(component)) => write_canonical_json(&library_default_rules(component))?,
        (None, None) => show_help()?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration and builds the validation engine.
fn load_engine(path: Option<&Path>) -> CliResult<ValidationEngine> {
    let config = FormGateConfig::load_or_default(path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    config.build_engine().map_err(|err| CliError::new(t!("engine.audit_failed", error = err)))
}

/// Maps an accept/reject outcome to an exit code.
fn exit_for(accepted: bool) -> ExitCode {
    if accepted { ExitCode::SUCCESS } else { ExitCode::from(EXIT_REJECTED) }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = FormGateConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads and parses a bounded JSON input file.
fn read_json_input<T: DeserializeOwned>(path: &Path, kind: &str, max_bytes: usize) -> CliResult<T> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = err
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes canonical JSON to stdout followed by a newline.
fn write_canonical_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Renders lint issues in text form.
fn render_lint_text(issues: &[LintIssue]) -> CliResult<()> {
    let mut output = String::new();
    if issues.is_empty() {
        output.push_str(&t!("lint.text.none"));
        output.push('\n');
    } else {
        for issue in issues {
            output.push_str(&t!("lint.text.issue", issue = issue));
            output.push('\n');
        }
        output.push_str(&t!("lint.text.summary", count = issues.len()));
        output.push('\n');
    }
    write_stdout_bytes(output.as_bytes()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

//! OATMEAL command-line interpreter.
//!
//! Usage: `oatmeal <program.oat>`, `oatmeal -e '<code>'` or `oatmeal --repl`

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use oatmeal::audit::{self, ActionCategory, AuditConfig, AuditEntry, AuditFormat};
use oatmeal::{EngineConfig, Interpreter, OatError, OatResult, Repl, ReplConfig};

const DEFAULT_AUDIT_LOG: &str = "oatmeal-audit.log";

#[derive(Parser, Debug)]
#[command(name = "oatmeal", version)]
#[command(about = "Run OATMEAL programs")]
struct Args {
    /// Program file to run
    file: Option<PathBuf>,

    /// Run CODE instead of a file
    #[arg(short = 'e', long = "eval", value_name = "CODE", conflicts_with = "file")]
    eval: Option<String>,

    /// Start an interactive session
    #[arg(long, conflicts_with_all = ["file", "eval"])]
    repl: bool,

    /// Abort when calls nest deeper than N
    #[arg(long, value_name = "N")]
    max_call_depth: Option<usize>,

    /// Abort after N dispatched instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Write an audit trail (default file: oatmeal-audit.log)
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_AUDIT_LOG)]
    audit: Option<PathBuf>,

    /// Write the audit trail as JSON Lines
    #[arg(long)]
    audit_json: bool,
}

impl Args {
    fn engine_config(&self, base: EngineConfig) -> EngineConfig {
        let mut config = base;
        if let Some(depth) = self.max_call_depth {
            config = config.with_max_call_depth(depth);
        }
        if let Some(steps) = self.max_steps {
            config = config.with_max_steps(steps);
        }
        config
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn init_audit(args: &Args) {
    let Some(path) = &args.audit else {
        return;
    };
    let format = if args.audit_json {
        AuditFormat::JsonLines
    } else {
        AuditFormat::Text
    };
    if let Err(e) = audit::init_global_logger(AuditConfig::file(path).with_format(format)) {
        eprintln!("Warning: Could not initialize audit logger: {}", e);
    }
}

fn print_usage() {
    println!("OATMEAL Interpreter");
    println!("Usage: oatmeal <program.oat>");
    println!("       oatmeal -e '<code>'");
    println!("       oatmeal --repl");
}

fn run_file(config: EngineConfig, path: &Path) -> OatResult<()> {
    let display = path.display().to_string();
    let source = fs::read_to_string(path).map_err(|source| OatError::ReadSource {
        path: display.clone(),
        source,
    })?;
    Interpreter::with_config(config).run_named(&display, &source)?;
    Ok(())
}

fn run(args: &Args) -> OatResult<()> {
    if args.repl {
        let config = ReplConfig {
            engine: args.engine_config(EngineConfig::sandboxed()),
            ..ReplConfig::default()
        };
        return Repl::with_config(config).run();
    }
    let config = args.engine_config(EngineConfig::default());
    if let Some(code) = &args.eval {
        Interpreter::with_config(config).run(code)?;
        return Ok(());
    }
    match &args.file {
        Some(path) => run_file(config, path),
        None => {
            print_usage();
            Ok(())
        }
    }
}

fn main() {
    init_logging();
    let args = Args::parse();
    init_audit(&args);

    audit::audit(
        AuditEntry::new("STARTUP", "System", "oatmeal", "CLI session started")
            .with_category(ActionCategory::Session),
    );

    let result = run(&args);

    if let Some(logger) = audit::global_logger() {
        if let Err(e) = logger.flush() {
            eprintln!("Warning: Could not flush audit log: {}", e);
        }
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

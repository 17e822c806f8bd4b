//! RISC-V compliance I/O macro CLI.
//!
//! This binary provides two entry points. It performs:
//! 1. **Expand:** Preprocess a compliance test source, replacing `RVTEST_IO_*` uses.
//! 2. **Check:** Assemble a single GPR assertion against a value and run it on the host hart.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use rvtest_io_core::common::Reg;
use rvtest_io_core::config::Config;
use rvtest_io_core::io::header::Preprocessor;
use rvtest_io_core::io::parse::parse_immediate;
use rvtest_io_core::isa::Pseudo;
use rvtest_io_core::{ComplianceIo, IoMacro, Outcome, ProgramBuilder, sim};

/// Label the check program jumps to after a passing assertion.
const PASS_LABEL: &str = "rvtest_pass";

#[derive(Parser, Debug)]
#[command(
    name = "rvtest-io",
    author,
    version,
    about = "RISC-V compliance test I/O macros",
    long_about = "Expand RVTEST_IO_* macros in compliance test sources, or check a single GPR assertion on the host.\n\nExamples:\n  rvtest-io expand tests/I-ADD-01.S\n  rvtest-io check --result a0 --value 7 --expected 5"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file (XLEN, scratch registers, failure label).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Preprocess a test source and print the result.
    Expand {
        /// Source file to expand.
        file: PathBuf,
    },

    /// Run `RVTEST_IO_ASSERT_GPR_EQ` with a preset result register.
    Check {
        /// Register holding the result.
        #[arg(long, default_value = "a0")]
        result: String,

        /// Value placed in the result register.
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Expected immediate.
        #[arg(long, allow_hyphen_values = true)]
        expected: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Print all integer registers after the run.
        #[arg(long)]
        dump: bool,
    },
}

/// Result of `check`, as printed with `--json`.
#[derive(Debug, Serialize)]
struct CheckReport {
    passed: bool,
    steps: u64,
    candidate_reg: Reg,
    candidate: u64,
    expected_reg: Reg,
    expected: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loaded = match cli.config.as_deref() {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    debug!(?config, "loaded configuration");

    let result = match cli.command {
        Commands::Expand { file } => cmd_expand(&config, file),
        Commands::Check {
            result,
            value,
            expected,
            json,
            dump,
        } => cmd_check(&config, &result, &value, &expected, json, dump),
    };
    result.unwrap_or_else(|e| fail(&e))
}

/// Installs the fmt subscriber; `-v` flags pick the default filter.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Logs an error and returns the error exit code.
fn fail(e: &rvtest_io_core::Error) -> ExitCode {
    error!("{e}");
    eprintln!("Error: {e}");
    ExitCode::from(2)
}

/// Expands a source file and prints it.
fn cmd_expand(config: &Config, file: PathBuf) -> rvtest_io_core::Result<ExitCode> {
    let mut pre = Preprocessor::new(config);
    let expanded = pre.expand_file(file)?;
    print!("{expanded}");
    Ok(ExitCode::SUCCESS)
}

/// Assembles and runs one assertion.
fn cmd_check(
    config: &Config,
    result: &str,
    value: &str,
    expected: &str,
    json: bool,
    dump: bool,
) -> rvtest_io_core::Result<ExitCode> {
    let xlen = config.general.xlen;
    let result: Reg = result.parse()?;
    let value = parse_immediate(value, xlen)?;
    let assertion = IoMacro::AssertGprEq {
        status: "x31".to_string(),
        result,
        expected: parse_immediate(expected, xlen)?,
    };

    let hooks = ComplianceIo::new(config);
    let failure = config.assertion.failure_label.clone();
    let program = ProgramBuilder::new(config)
        .op(Pseudo::Li {
            rd: result,
            imm: value,
        })
        .invoke(&hooks, &assertion)
        .op(Pseudo::J {
            label: PASS_LABEL.to_string(),
        })
        .label(failure.clone())
        .op(Pseudo::J { label: failure })
        .label(PASS_LABEL)
        .build()?;

    let (outcome, hart) = sim::run(config, &program, &[])?;
    let candidate_reg = config.assertion.candidate_reg;
    let expected_reg = config.assertion.expected_reg;
    let report = CheckReport {
        passed: outcome.passed(),
        steps: outcome.steps(),
        candidate_reg,
        candidate: hart.reg(candidate_reg),
        expected_reg,
        expected: hart.reg(expected_reg),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{outcome}");
        println!("  {candidate_reg} = {:#x}", report.candidate);
        println!("  {expected_reg} = {:#x}", report.expected);
    }
    if dump {
        print!("{}", hart.regs.dump());
    }

    Ok(match outcome {
        Outcome::Passed { .. } => ExitCode::SUCCESS,
        Outcome::Failed { .. } => ExitCode::from(1),
    })
}

// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! refreshctl - Display Refresh Rate Control
//!
//! Switches the refresh rate of a monitor at its current resolution through
//! the GNOME/Mutter DisplayConfig D-Bus API.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use displaycfg::{
    ApplyMethod, ApplyOptions, ConfigFile, DisplayConfigError, DisplayConfigService, ModeApplier,
    MutterDisplayConfig, SetOutcome, Settings,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Display refresh rate control
#[derive(Parser, Debug)]
#[command(name = "refreshctl")]
#[command(about = "Set display refresh rate via the Mutter DisplayConfig API", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Target refresh rate in Hz (e.g. 240)
    rate: Option<String>,

    /// List available modes
    #[arg(short, long, conflicts_with_all = ["rate", "current"])]
    list: bool,

    /// Show current mode
    #[arg(short, long, conflicts_with = "rate")]
    current: bool,

    /// Connector to operate on (e.g. DP-1)
    #[arg(short = 'o', long)]
    connector: Option<String>,

    /// Apply method: verify, temporary or persistent
    #[arg(short, long)]
    method: Option<ApplyMethod>,

    /// Settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, PartialEq)]
enum Request {
    List,
    Current,
    Set(f64),
    Usage,
    Invalid(String),
}

impl Args {
    fn request(&self) -> Request {
        if self.list {
            return Request::List;
        }
        if self.current {
            return Request::Current;
        }
        match &self.rate {
            None => Request::Usage,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(rate) if rate.is_finite() && rate > 0.0 => Request::Set(rate),
                _ => Request::Invalid(raw.clone()),
            },
        }
    }

    fn options(&self) -> Result<ApplyOptions> {
        let settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load()?,
        };

        let mut options = ApplyOptions::from(&settings);
        if let Some(connector) = &self.connector {
            options.connector = Some(connector.clone());
        }
        if let Some(method) = self.method {
            options.method = method;
        }
        Ok(options)
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    init_logging(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("refreshctl: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn run(args: &Args) -> Result<ExitCode> {
    let rate = match args.request() {
        Request::Usage => {
            print_usage()?;
            return Ok(ExitCode::FAILURE);
        }
        Request::Invalid(raw) => {
            eprintln!("{}", DisplayConfigError::InvalidArgument(raw));
            print_usage()?;
            return Ok(ExitCode::FAILURE);
        }
        Request::Set(rate) => Some(rate),
        Request::List | Request::Current => None,
    };

    let options = args.options()?;
    let service = MutterDisplayConfig::connect()?;
    let applier = ModeApplier::new(service, options);
    log::debug!("options: {:?}", applier.options());

    let stdout = io::stdout();
    let stderr = io::stderr();
    let (mut out, mut err) = (stdout.lock(), stderr.lock());

    match rate {
        Some(rate) => set_refresh_rate(&applier, rate, &mut out, &mut err),
        None if args.list => {
            list_modes(&applier, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            show_current(&applier, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_usage() -> Result<()> {
    Args::command().print_help().context("failed to print usage")?;
    println!();
    Ok(())
}

fn list_modes<S: DisplayConfigService>(applier: &ModeApplier<S>, out: &mut impl Write) -> Result<()> {
    let modes = applier.list_modes()?;

    writeln!(out, "Available modes:")?;
    for mode in &modes {
        writeln!(out, "  {}", mode.listing())?;
    }
    Ok(())
}

fn show_current<S: DisplayConfigService>(applier: &ModeApplier<S>, out: &mut impl Write) -> Result<()> {
    match applier.current_mode()? {
        Some(mode) => writeln!(out, "{}", mode)?,
        None => writeln!(out, "Could not detect current mode")?,
    }
    Ok(())
}

fn set_refresh_rate<S: DisplayConfigService>(
    applier: &ModeApplier<S>,
    rate: f64,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<ExitCode> {
    match applier.set_refresh_rate(rate) {
        Ok(SetOutcome::Applied(mode)) => {
            writeln!(out, "Refresh rate set to {:.0}Hz", mode.refresh)?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(SetOutcome::AlreadyAtRate(_)) => {
            writeln!(out, "Already at {}Hz", rate)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_error(&e, err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report_error(error: &DisplayConfigError, err: &mut impl Write) -> io::Result<()> {
    writeln!(err, "Error: {}", error)?;

    if let DisplayConfigError::ModeNotFound { available, .. } = error {
        writeln!(err, "Available refresh rates:")?;
        for rate in available {
            writeln!(err, "  {:.2}Hz", rate)?;
        }
    }
    Ok(())
}

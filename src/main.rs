// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Keyhint and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyhint CLI entrypoint.
//!
//! By default this runs the interactive hint demo. `--labels <n>` prints `n` generated labels and
//! exits instead.

use std::error::Error;
use std::fs::File;
use std::sync::Mutex;

use keyhint::tui::DEFAULT_TARGET_COUNT;
use keyhint::HintSettings;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <file>] [--hint-chars <chars>] [--targets <n>] [--log <file>]\n  {program} [--config <file>] [--hint-chars <chars>] --labels <n>\n\nSettings are read from the JSON file given by --config, then KEYHINT_HINT_CHARS, then --hint-chars.\n--targets sets the number of demo buttons (default {DEFAULT_TARGET_COUNT}).\n--labels prints <n> hint labels, one per line, and exits.\n--log writes tracing output to <file> (filter from RUST_LOG, default debug)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<String>,
    hint_chars: Option<String>,
    targets: Option<usize>,
    labels: Option<usize>,
    log: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--hint-chars" => {
                if options.hint_chars.is_some() {
                    return Err(());
                }
                options.hint_chars = Some(args.next().ok_or(())?);
            }
            "--targets" => {
                if options.targets.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.targets = Some(raw.parse().map_err(|_| ())?);
            }
            "--labels" => {
                if options.labels.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.labels = Some(raw.parse().map_err(|_| ())?);
            }
            "--log" => {
                if options.log.is_some() {
                    return Err(());
                }
                options.log = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    if options.labels.is_some() && options.targets.is_some() {
        return Err(());
    }

    Ok(options)
}

fn resolve_settings(options: &CliOptions) -> Result<HintSettings, Box<dyn Error>> {
    let settings = match &options.config {
        Some(path) => HintSettings::load(path)?,
        None => HintSettings::default(),
    };
    let mut settings = settings.with_env()?;
    if let Some(hint_chars) = &options.hint_chars {
        settings.hint_chars = hint_chars.clone();
    }
    Ok(settings.normalized())
}

fn init_logging(path: &str) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "keyhint".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(path) = &options.log {
            init_logging(path)?;
        }

        let settings = resolve_settings(&options)?;

        if let Some(count) = options.labels {
            for label in keyhint::generate(count, &settings.alphabet()) {
                println!("{label}");
            }
            return Ok(());
        }

        keyhint::tui::run(&settings, options.targets.unwrap_or(DEFAULT_TARGET_COUNT))
    })();

    if let Err(err) = result {
        eprintln!("keyhint: {err}");
        std::process::exit(1);
    }
}

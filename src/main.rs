// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea CLI entrypoint.
//!
//! Loads a project directory (or the built-in demo project) and runs the interactive
//! analysis TUI. Assistant calls need `GEMINI_API_KEY` in the environment.

use std::error::Error;
use std::path::PathBuf;

use galatea::assistant::gemini::{self, GeminiAssistant};
use galatea::dispatch;
use galatea::source;
use galatea::tui::{self, App, DocumentOrigin, TuiTheme};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<project-dir>] [--model <name>]\n  {program} [--project <dir>] [--model <name>]\n  {program} --demo [--model <name>]\n\nIf project-dir/--project is omitted, the current working directory is used.\n--demo uses a built-in demo project and cannot be combined with project-dir/--project.\n--model selects the Gemini model (default {default_model}).\n\nSet GEMINI_API_KEY to authenticate assistant requests; set GALATEA_THEME to light or dark.",
        default_model = gemini::DEFAULT_MODEL,
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    project_dir: Option<String>,
    model: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--project" => {
                if options.project_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.project_dir = Some(dir);
            }
            "--model" => {
                if options.model.is_some() {
                    return Err(());
                }
                let model = args.next().ok_or(())?;
                if model.is_empty() {
                    return Err(());
                }
                options.model = Some(model);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.project_dir.is_some() {
                    return Err(());
                }
                options.project_dir = Some(arg);
            }
        }
    }

    if options.demo && options.project_dir.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "galatea".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let theme = TuiTheme::from_env()?;

        let (documents, origin) = if options.demo {
            (source::demo_documents(), DocumentOrigin::Demo)
        } else {
            let dir = PathBuf::from(options.project_dir.unwrap_or_else(|| ".".to_owned()));
            let documents = source::load_dir(&dir)?;
            (documents, DocumentOrigin::Dir(dir))
        };

        let model = options.model.unwrap_or_else(|| gemini::DEFAULT_MODEL.to_owned());
        let assistant = GeminiAssistant::new(model);

        let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let worker = tokio::spawn(async move {
                dispatch::run_worker(assistant, request_rx, event_tx).await;
            });

            let app = App::new(documents, origin, theme, request_tx, event_rx);
            let tui_join = tokio::task::spawn_blocking(move || {
                tui::run(app).map_err(|err| err.to_string())
            })
            .await;

            worker.abort();
            let _ = worker.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("galatea: {err}");
        std::process::exit(1);
    }
}

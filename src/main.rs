//! Quickstash CLI
//!
//! Each capture subcommand fills the matching form and submits it through
//! the [`FormSubmitter`]; the exit code reflects the final status tone.

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use quickstash::cli::{Cli, Commands, ConfigCommands};
use quickstash::{
    code_capture, file_capture, note_capture, url_capture, Config, ConsoleStatus, Form,
    FormSubmitter, PayloadBuilder, Result, StashClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

async fn run(cli: Cli) -> Result<bool> {
    let mut config = Config::load()?;
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }

    match cli.command {
        Commands::Config { command } => {
            handle_config(command)?;
            Ok(true)
        }
        Commands::Health => {
            let client = StashClient::new(&config)?;
            let health = client.health().await?;
            println!(
                "{} {} at {}",
                "✓".green().bold(),
                health.status,
                config.server_url
            );
            if let Some(root) = health.root {
                println!("  root: {}", root);
            }
            Ok(true)
        }
        command => {
            let client = StashClient::new(&config)?;
            let status = Arc::new(ConsoleStatus::new());
            let submitter = FormSubmitter::new(client, status);

            let (form, builder) = build_form(command)?;
            let mut binding = submitter.bind(form, builder);
            Ok(submitter.submit(&mut binding).await)
        }
    }
}

fn handle_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => {
            let path = Config::write_default(force)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigCommands::Print => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

/// Map one capture subcommand onto its form and payload builder.
fn build_form(command: Commands) -> Result<(Form, PayloadBuilder)> {
    match command {
        Commands::Url {
            url,
            title,
            selection,
            tags,
        } => {
            let mut form = Form::new("url");
            form.set("url", url);
            if let Some(title) = title {
                form.set("title", title);
            }
            if let Some(selection) = selection {
                form.set("selection", selection);
            }
            set_tags(&mut form, &tags);
            Ok((form, url_capture as PayloadBuilder))
        }
        Commands::Note { body, title, tags } => {
            let body = match body {
                Some(body) => body,
                None => read_stdin()?,
            };
            let mut form = Form::new("note");
            form.set("body", body);
            if let Some(title) = title {
                form.set("title", title);
            }
            set_tags(&mut form, &tags);
            Ok((form, note_capture as PayloadBuilder))
        }
        Commands::Code {
            file,
            title,
            lang,
            tags,
        } => {
            let code = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => read_stdin()?,
            };
            let mut form = Form::new("code");
            form.set("code", code);
            if let Some(title) = title {
                form.set("title", title);
            }
            if let Some(lang) = lang {
                form.set("lang", lang);
            }
            set_tags(&mut form, &tags);
            Ok((form, code_capture as PayloadBuilder))
        }
        Commands::File { path, name, tags } => {
            let bytes = std::fs::read(&path)?;
            let name = name.unwrap_or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            });
            let mut form = Form::new("file");
            form.set("name", name);
            form.set("content_b64", BASE64.encode(&bytes));
            set_tags(&mut form, &tags);
            Ok((form, file_capture as PayloadBuilder))
        }
        Commands::Health | Commands::Config { .. } => {
            unreachable!("handled before build_form")
        }
    }
}

fn set_tags(form: &mut Form, tags: &[String]) {
    if !tags.is_empty() {
        form.set("tags", tags.join(","));
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

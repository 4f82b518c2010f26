//! tezz - terminal client for the TEZZ education dashboard

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use tezz::{
    ApiClient, ModuleSource, SessionStore, StoredSession,
    account::ProfileUpdate,
    cli::{Cli, Command, ProfileAction},
    commands::{api_config, load_diary, load_schedule, upload_file_name},
    error::{Result, TezzError},
    output::get_formatter,
    timezone::TimezoneConfig,
    types::{LessonId, ModuleId},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run `future` behind a spinner when writing to a terminal
async fn with_spinner<F: Future>(enabled: bool, message: &str, future: F) -> F::Output {
    let progress = if enabled {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let output = future.await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    output
}

/// Client carrying the stored bearer token
async fn authenticated_client(cli: &Cli, store: &SessionStore) -> Result<ApiClient> {
    let session = store.load().await?.ok_or(TezzError::NotLoggedIn)?;
    let config = api_config(cli.base_url.as_deref(), Some(&session), cli.timeout)?;
    info!("Using API at {} as {}", config.base_url, session.username);

    Ok(ApiClient::new(&config)?.with_token(session.tokens.access))
}

async fn run(cli: Cli) -> Result<()> {
    let store = SessionStore::default_location()?;
    let show_progress = !cli.json && is_terminal::is_terminal(std::io::stdout());
    let formatter = get_formatter(cli.json);

    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());

    match &cli.command {
        Command::Login { username, password } => {
            info!("Logging in as {}", username);
            let config = api_config(cli.base_url.as_deref(), None, cli.timeout)?;
            let client = ApiClient::new(&config)?;

            let tokens =
                with_spinner(show_progress, "Logging in", client.login(username, password)).await?;
            store
                .save(&StoredSession {
                    username: username.clone(),
                    base_url: config.base_url.to_string(),
                    tokens,
                    saved_at: Utc::now(),
                })
                .await?;

            println!("Logged in as {username}");
        }
        Command::Logout => {
            if store.clear().await? {
                println!("Logged out");
            } else {
                println!("No stored session");
            }
        }
        Command::Profile { action } => {
            let client = authenticated_client(&cli, &store).await?;
            let profile = match action {
                None => with_spinner(show_progress, "Loading profile", client.profile()).await?,
                Some(ProfileAction::Update(args)) => {
                    info!("Updating profile");
                    let update = ProfileUpdate::from(args.clone());
                    with_spinner(
                        show_progress,
                        "Saving profile",
                        client.update_profile(&update),
                    )
                    .await?
                }
            };
            println!("{}", formatter.format_profile(&profile));
        }
        Command::Modules => {
            let client = authenticated_client(&cli, &store).await?;
            let modules =
                with_spinner(show_progress, "Loading modules", client.fetch_modules()).await?;
            println!("{}", formatter.format_modules(&modules));
        }
        Command::Module { id } => {
            let client = authenticated_client(&cli, &store).await?;
            let module = with_spinner(
                show_progress,
                "Loading module",
                client.module(ModuleId::new(*id)),
            )
            .await?;
            println!("{}", formatter.format_module(&module, &tz_config.tz));
        }
        Command::Lesson { id } => {
            let client = authenticated_client(&cli, &store).await?;
            let page = with_spinner(
                show_progress,
                "Loading lesson",
                client.lesson_page(LessonId::new(*id)),
            )
            .await?;
            println!("{}", formatter.format_lesson_page(&page, &tz_config.tz));
        }
        Command::Schedule(args) => {
            info!("Running {} schedule", args.view);
            let client = authenticated_client(&cli, &store).await?;
            let view = with_spinner(
                show_progress,
                "Loading schedule",
                load_schedule(&client, args, &tz_config, Utc::now()),
            )
            .await?;
            println!("{}", formatter.format_schedule(&view, &tz_config.tz));
        }
        Command::Diary => {
            info!("Running diary report");
            let client = authenticated_client(&cli, &store).await?;
            let (report, modules) =
                with_spinner(show_progress, "Loading diary", load_diary(&client)).await?;
            println!(
                "{}",
                formatter.format_diary(&report, &modules, &tz_config.tz)
            );
        }
        Command::Grade { scores } => {
            let client = authenticated_client(&cli, &store).await?;
            let saved =
                with_spinner(show_progress, "Saving scores", client.save_scores(scores)).await?;
            println!("Saved {saved} scores");
        }
        Command::Submit { mark, file } => {
            let file_name = upload_file_name(file)?;
            let bytes = tokio::fs::read(file).await?;
            info!("Uploading {} ({} bytes)", file_name, bytes.len());

            let client = authenticated_client(&cli, &store).await?;
            with_spinner(
                show_progress,
                "Uploading answer",
                client.upload_answer(*mark, &file_name, bytes),
            )
            .await?;
            println!("Uploaded {file_name}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging. The --verbose flag raises the default level.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            tracing_subscriber::EnvFilter::new("tezz=info")
        } else {
            tracing_subscriber::EnvFilter::new("tezz=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

//! Counterparty CLI
//!
//! Terminal client for the marketplace:
//! - Sign in, register, sign out
//! - Search counterparties by city
//! - List and create applications
//! - View, like and comment on other users

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use counterparty::config::{generate_default_config, Config, LoggingConfig};
use counterparty::gateway::{ApiClient, ReqwestTransport};
use counterparty::model::WORLD_CITIES;
use counterparty::pages::{
    ApplicationsController, ApplicationsView, LoginController, ProfileCard, RegisterController,
    SearchController, SearchView, UserDialog,
};
use counterparty::{Applied, Backend, Blocked, FileStorage, Page, Shell};

#[derive(Parser)]
#[command(name = "counterparty")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find counterparties for city-to-city cash transfers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./counterparty.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides config
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "COUNTERPARTY_PASSWORD")]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// International format, e.g. +447700900123
        #[arg(long)]
        phone: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        city: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date_of_birth: String,
        #[arg(long, env = "COUNTERPARTY_PASSWORD")]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Find counterparties living in a city
    Search {
        /// City the counterparty lives in
        city: String,
    },

    /// Your applications
    Applications {
        #[command(subcommand)]
        action: Option<ApplicationsAction>,
    },

    /// Show another user's profile and comments
    User { id: String },

    /// Like or unlike a user
    Like { id: String },

    /// Leave a comment on a user's profile
    Comment { id: String, text: String },

    /// List supported cities
    Cities,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ApplicationsAction {
    /// List your applications (default)
    List,

    /// Post a new application
    Create {
        /// City where you need a counterparty
        #[arg(long)]
        target_city: String,
        /// At most 6000
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    init_logging(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let transport = ReqwestTransport::new(config.api.transport())?;
    let backend = ApiClient::new(transport);

    let session_file = config.session.path();
    if let Some(dir) = session_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating session directory {}", dir.display()))?;
    }
    let mut shell = Shell::new(FileStorage::new(session_file));
    shell.start();

    tracing::debug!(base_url = %config.api.base_url, "Backend configured");

    let format = cli.format;
    match cli.command {
        Commands::Login { email, password } => {
            let mut login = LoginController::new();
            login.form.email = email;
            login.form.password = password;

            let result = login.submit(&backend, &mut shell).await;
            ensure(result, || login.error_message());
            if let Some(warning) = login.warning() {
                eprintln!("Warning: {}", warning);
            }
            if let Some(user) = shell.session().user() {
                println!("Signed in as {} ({})", user.full_name(), user.city);
            }
        }

        Commands::Register {
            first_name,
            last_name,
            email,
            phone,
            country,
            city,
            date_of_birth,
            password,
        } => {
            let mut register = RegisterController::new();
            register.form.first_name = first_name;
            register.form.last_name = last_name;
            register.form.email = email;
            register.form.phone = phone;
            register.form.country = country;
            register.form.city = city;
            register.form.date_of_birth = date_of_birth;
            register.form.password = password;

            let result = register.submit(&backend, &mut shell).await;
            ensure(result, || register.error_message());
            if let Some(warning) = register.warning() {
                eprintln!("Warning: {}", warning);
            }
            if let Some(user) = shell.session().user() {
                println!(
                    "Welcome, {}. Your business card number is {}",
                    user.full_name(),
                    user.business_card_number
                );
            }
        }

        Commands::Logout => {
            shell.logout().context("removing stored session")?;
            println!("Signed out");
        }

        Commands::Whoami => match ProfileCard::from_session(shell.current_session()) {
            Some(card) => print_profile(&card, format),
            None => println!("Not signed in"),
        },

        Commands::Search { city } => {
            enter(&mut shell, Page::Search);
            let mut search = SearchController::new();
            search.target_city = city;

            let result = search.submit(&backend, &mut shell).await;
            match search.view() {
                SearchView::Found(results) => {
                    if format == OutputFormat::Json {
                        let rates = results.rates.as_ref().map(|r| &r.rates);
                        print_json(&serde_json::json!({
                            "applications": results.applications,
                            "rates": rates,
                        }))?;
                    } else {
                        for hit in &results.applications {
                            let user = &hit.user;
                            println!(
                                "{:<24} {:<16} {:>14}  {:>3} days  {}  id={}",
                                user.full_name(),
                                user.city,
                                hit.application.amount_label(),
                                hit.application.days_active,
                                if user.is_trusted { "trusted" } else { "new    " },
                                user.id
                            );
                        }
                        if let Some(rates) = &results.rates {
                            let entries: Vec<String> = rates
                                .display_entries()
                                .into_iter()
                                .map(|(c, r)| format!("{} {}", c, r))
                                .collect();
                            println!("\n1 {} = {}", rates.base, entries.join(", "));
                        }
                    }
                }
                SearchView::Empty => println!("No counterparties found in that city yet"),
                SearchView::Failed(e) => ensure(result, || Some(e.message())),
                _ => ensure(result, || None),
            }
        }

        Commands::Applications { action } => {
            enter(&mut shell, Page::Applications);
            let mut applications = ApplicationsController::new();

            if let Some(ApplicationsAction::Create {
                target_city,
                amount,
                currency,
            }) = action
            {
                applications.open_form();
                applications.form.target_city = target_city;
                applications.form.amount = amount;
                applications.form.currency = currency;

                let result = applications.create(&backend, &mut shell).await;
                ensure(result, || applications.create_error());
                println!("Application created");
            } else {
                let result = applications.load(&backend, &mut shell).await;
                ensure(result, || match applications.view() {
                    ApplicationsView::Failed(e) => Some(e.message()),
                    _ => None,
                });
            }

            match applications.view() {
                ApplicationsView::Listed(apps) if format == OutputFormat::Json => print_json(&apps)?,
                ApplicationsView::Listed(apps) => {
                    for app in apps {
                        let expires = app
                            .expires_at
                            .map(|t| t.date_label())
                            .unwrap_or_else(|| "-".to_string());
                        println!(
                            "{:<16} {:>14}  {:<8} created {}  expires {}",
                            app.target_city,
                            app.amount_label(),
                            app.status,
                            app.created_at.date_label(),
                            expires
                        );
                    }
                }
                ApplicationsView::Empty => println!("No applications yet"),
                ApplicationsView::Failed(e) => fail(e),
                ApplicationsView::Loading => {}
            }
        }

        Commands::User { id } => {
            enter(&mut shell, Page::UserDetail(id.clone()));
            let mut dialog = UserDialog::open_id(id);
            let result = dialog.load(&backend, &mut shell).await;
            ensure(result, || dialog.load_state().error().map(|e| e.message()));
            print_user(&dialog, format)?;
        }

        Commands::Like { id } => {
            enter(&mut shell, Page::UserDetail(id.clone()));
            let mut dialog = UserDialog::open_id(id);
            let result = dialog.load(&backend, &mut shell).await;
            ensure(result, || dialog.load_state().error().map(|e| e.message()));

            let result = dialog.toggle_like(&backend, &mut shell).await;
            ensure(result, || dialog.like_state().error().map(|e| e.message()));
            println!(
                "{} ({} likes{})",
                if dialog.has_liked() { "Liked" } else { "Like removed" },
                dialog.likes_count(),
                if dialog.is_trusted() { ", trusted" } else { "" }
            );
        }

        Commands::Comment { id, text } => {
            enter(&mut shell, Page::UserDetail(id.clone()));
            let mut dialog = UserDialog::open_id(id);
            dialog.draft = text;

            let result = dialog.post_comment(&backend, &mut shell).await;
            ensure(result, || dialog.comment_state().error().map(|e| e.message()));
            println!("Comment posted");
            print_user(&dialog, format)?;
        }

        Commands::Cities => {
            let cities = match backend.cities().await {
                Ok(cities) => cities,
                Err(e) => {
                    tracing::warn!(error = %e, "City list unavailable, using built-in catalogue");
                    WORLD_CITIES.iter().map(|c| c.to_string()).collect()
                }
            };
            if format == OutputFormat::Json {
                print_json(&cities)?;
            } else {
                for city in cities {
                    println!("{}", city);
                }
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("counterparty={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries command output
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn fail(message: impl Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

/// Navigate to a gated page or exit asking the user to sign in
fn enter(shell: &mut Shell<FileStorage>, page: Page) {
    if shell.navigate(page) == &Page::Home {
        fail("Not signed in. Run `counterparty login` first.");
    }
}

/// Exit with the controller's message unless the action succeeded
fn ensure(result: Result<Applied, Blocked>, error: impl FnOnce() -> Option<String>) {
    match result {
        Ok(Applied::Succeeded) => {}
        Ok(Applied::SessionExpired) => fail("Session expired. Run `counterparty login` again."),
        Ok(Applied::Failed) => fail(error().unwrap_or_else(|| "Request failed".to_string())),
        Ok(Applied::Discarded) => fail("Request was superseded"),
        Err(Blocked::SignedOut) => fail("Not signed in. Run `counterparty login` first."),
        Err(blocked) => fail(blocked),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_profile(card: &ProfileCard, format: OutputFormat) {
    if format == OutputFormat::Json {
        let value = serde_json::json!({
            "name": card.full_name,
            "business_card_number": card.business_card_number,
            "trusted": card.trusted,
            "likes_count": card.likes_count,
            "email": card.email,
            "phone": card.phone,
            "location": card.location,
            "date_of_birth": card.date_of_birth,
            "member_since": card.member_since,
        });
        println!("{:#}", value);
        return;
    }

    println!("{}  #{}", card.full_name, card.business_card_number);
    println!("  {}", card.trust_label());
    println!("  Likes:        {}", card.likes_count);
    println!("  Email:        {}", card.email);
    println!("  Phone:        {}", card.phone);
    println!("  Location:     {}", card.location);
    println!("  Born:         {}", card.date_of_birth);
    println!("  Member since: {}", card.member_since);
}

fn print_user(dialog: &UserDialog, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "user": dialog.user(),
            "likes_count": dialog.likes_count(),
            "has_liked": dialog.has_liked(),
            "comments": dialog.comments(),
        }));
    }

    match dialog.user() {
        Some(user) => {
            println!("{}  #{}", user.full_name(), user.business_card_number);
            println!("  {}, {}  {}", user.city, user.country, user.phone);
        }
        None => println!("User {}", dialog.user_id()),
    }
    println!(
        "  {} likes{}{}",
        dialog.likes_count(),
        if dialog.is_trusted() { ", trusted" } else { "" },
        if dialog.has_liked() { ", liked by you" } else { "" }
    );

    if dialog.comments().is_empty() {
        println!("  No comments yet");
    }
    for comment in dialog.comments() {
        println!(
            "  [{}] {}: {}",
            comment.created_at.date_label(),
            comment.commenter_name,
            comment.content
        );
    }
    Ok(())
}

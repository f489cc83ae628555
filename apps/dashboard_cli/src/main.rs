use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_base_url},
    AlwaysConfirm, ConfirmPrompt, Gateway, HttpGateway, InsightFormView, InsightSection,
    UserDetailView, UserFormView, UserListView,
};
use shared::domain::{User, UserDraft, UserId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Manage users and generate topic insights")]
struct Cli {
    /// Backend origin; overrides dashboard.toml and the environment
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Print raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Users(UsersCommand),
    /// Generate an AI overview of a topic
    Insight {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List,
    Show {
        id: i64,
    },
    Find {
        username: String,
    },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Asks on the terminal; anything other than "y"/"yes" declines.
struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(base_url) = cli.base_url.clone() {
        settings.base_url = base_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();

    let base_url = normalize_base_url(&settings.base_url)?;
    tracing::debug!(%base_url, "using backend");
    let gateway = HttpGateway::new(base_url);

    match cli.command {
        Command::Users(command) => run_users(&gateway, command, cli.json).await,
        Command::Insight { topic } => run_insight(&gateway, &topic.join(" "), cli.json).await,
    }
}

async fn run_users(gateway: &dyn Gateway, command: UsersCommand, json: bool) -> Result<()> {
    match command {
        UsersCommand::List => {
            let mut view = UserListView::new();
            view.load(gateway).await;
            if let Some(err) = view.error() {
                bail!("could not load users: {err}");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(view.users())?);
            } else if view.is_empty_notice() {
                println!("No users found.");
            } else {
                print_user_table(view.users());
            }
        }
        UsersCommand::Show { id } => {
            let mut view = UserDetailView::new();
            view.open(gateway, UserId(id)).await;
            let user = loaded_user(view.user(), view.error())?;
            print_user(user, json)?;
        }
        UsersCommand::Find { username } => {
            let user = gateway
                .find_user_by_username(&username)
                .await
                .with_context(|| format!("could not find user '{username}'"))?;
            print_user(&user, json)?;
        }
        UsersCommand::Create { username, email } => {
            let mut form = UserFormView::new();
            form.set_user_id(None);
            *form.draft_mut() = UserDraft::new(username, email);
            submit_form(gateway, &mut form).await?;
        }
        UsersCommand::Update {
            id,
            username,
            email,
        } => {
            let mut form = UserFormView::new();
            form.open(gateway, Some(UserId(id))).await;
            if let Some(err) = form.error() {
                bail!("could not load user {id}: {err}");
            }
            let draft = form.draft_mut();
            if let Some(username) = username {
                draft.username = username;
            }
            if let Some(email) = email {
                draft.email = email;
            }
            submit_form(gateway, &mut form).await?;
        }
        UsersCommand::Delete { id, yes } => {
            let mut view = UserDetailView::new();
            view.open(gateway, UserId(id)).await;
            let user = loaded_user(view.user(), view.error())?;
            if !json {
                println!("{} <{}>", user.username, user.email);
            }

            let mut prompt: Box<dyn ConfirmPrompt> = if yes {
                Box::new(AlwaysConfirm)
            } else {
                Box::new(StdinConfirm)
            };
            if view.delete(gateway, prompt.as_mut()).await.is_some() {
                println!("User {id} deleted.");
            } else if let Some(err) = view.error() {
                bail!("could not delete user {id}: {err}");
            } else {
                println!("Cancelled.");
            }
        }
    }
    Ok(())
}

async fn submit_form(gateway: &dyn Gateway, form: &mut UserFormView) -> Result<()> {
    if form.submit(gateway).await.is_some() {
        println!("User saved.");
        return Ok(());
    }
    match form.error() {
        Some(err) => bail!("could not save user: {err}"),
        None => bail!("could not save user"),
    }
}

async fn run_insight(gateway: &dyn Gateway, topic: &str, json: bool) -> Result<()> {
    let mut view = InsightFormView::new();
    view.set_topic(topic);
    view.submit(gateway).await;
    if let Some(err) = view.error() {
        bail!("{err}");
    }

    if json {
        if let Some(result) = view.result() {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        return Ok(());
    }

    let sections = view.sections();
    if sections.is_empty() {
        println!("No insights returned for '{}'.", topic.trim());
    }
    for section in sections {
        print_section(section);
    }
    Ok(())
}

fn loaded_user<'a>(user: Option<&'a User>, error: Option<&str>) -> Result<&'a User> {
    match (user, error) {
        (Some(user), None) => Ok(user),
        (_, Some(err)) => bail!("{err}"),
        (None, None) => bail!("no user returned"),
    }
}

fn print_user(user: &User, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
        return Ok(());
    }
    println!("id:       {}", user.id);
    println!("username: {}", user.username);
    println!("email:    {}", user.email);
    println!("enabled:  {}", user.enabled);
    if !user.roles.is_empty() {
        println!("roles:    {}", user.roles.join(", "));
    }
    if let Some(created_at) = user.created_at {
        println!("created:  {created_at}");
    }
    if let Some(last_login) = user.last_login {
        println!("login:    {last_login}");
    }
    Ok(())
}

fn print_user_table(users: &[User]) {
    let name_width = users
        .iter()
        .map(|user| user.username.len())
        .max()
        .unwrap_or(0)
        .max("USERNAME".len());
    println!("{:>6}  {:<name_width$}  EMAIL", "ID", "USERNAME");
    for user in users {
        println!(
            "{:>6}  {:<name_width$}  {}",
            user.id.to_string(),
            user.username,
            user.email
        );
    }
}

fn print_section(section: InsightSection<'_>) {
    match section {
        InsightSection::Overview(text) => println!("== AI Summary ==\n{text}\n"),
        InsightSection::KeyConcepts(items) => print_list("Key Concepts", items),
        InsightSection::Facts(items) => print_list("Key Facts", items),
        InsightSection::Applications(text) => println!("== Applications ==\n{text}\n"),
        InsightSection::RelatedLinks(links) => {
            println!("== Further Reading ==");
            for link in links {
                match &link.description {
                    Some(description) => {
                        println!("- {} <{}>: {description}", link.title, link.url)
                    }
                    None => println!("- {} <{}>", link.title, link.url),
                }
            }
            println!();
        }
    }
}

fn print_list(title: &str, items: &[String]) {
    println!("== {title} ==");
    for item in items {
        println!("- {item}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_subcommands() {
        let cli = Cli::try_parse_from([
            "dashboard",
            "users",
            "delete",
            "7",
            "--yes",
            "--json",
            "--base-url",
            "http://backend:9000",
        ])
        .expect("parse");
        assert!(cli.json);
        assert_eq!(cli.base_url.as_deref(), Some("http://backend:9000"));
        assert!(matches!(
            cli.command,
            Command::Users(UsersCommand::Delete { id: 7, yes: true })
        ));
    }

    #[test]
    fn insight_topic_words_are_collected() {
        let cli = Cli::try_parse_from(["dashboard", "insight", "quantum", "computing"])
            .expect("parse");
        match cli.command {
            Command::Insight { topic } => assert_eq!(topic.join(" "), "quantum computing"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn update_fields_are_optional() {
        let cli = Cli::try_parse_from(["dashboard", "users", "update", "3", "--email", "x@y.io"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Command::Users(UsersCommand::Update {
                id: 3,
                username: None,
                email: Some(_),
            })
        ));
    }

    #[test]
    fn loaded_user_prefers_the_error() {
        let user = User::new(UserId(1), "alice", "alice@example.com");
        assert!(loaded_user(Some(&user), None).is_ok());
        let err = loaded_user(Some(&user), Some("forbidden")).expect_err("error wins");
        assert_eq!(err.to_string(), "forbidden");
        assert!(loaded_user(None, None).is_err());
    }
}

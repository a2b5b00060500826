//! `shelf`: run the RPC server or call its procedures over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use shelf_app::{modules::books::UpdateBookInput, RemoteRpcClient, RpcClient};
use shelf_catalog::schema::{
    BookForm, BookId, BookQuery, CreateTagInput, ListTagsInput, Schema, TagId, TagQuery,
};
use shelf_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Book catalog RPC server and client")]
#[command(version)]
struct Cli {
    /// Base URL of a running shelf server; defaults to `web.base_url`
    #[arg(long, global = true, env = "SHELF_RPC_URL")]
    url: Option<String>,

    /// Bearer token sent with every call
    #[arg(long, global = true, env = "SHELF_RPC_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the RPC server
    Serve,
    /// Check that the server answers
    Ping,
    /// Book procedures
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Tag procedures
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Photo procedures
    Photo {
        #[command(subcommand)]
        command: PhotoCommands,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// List all books
    List,
    /// Get a book by id
    Get { id: BookId },
    /// Create a book from a JSON file holding a book without its id
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace every field of a book from a JSON file
    Update {
        id: BookId,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete an existing book
    Delete { id: BookId },
}

#[derive(Subcommand)]
enum TagCommands {
    /// List tags, optionally filtered by keyword
    List {
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Get a tag by id
    Get { id: TagId },
    /// Create a tag (requires --token)
    Create { name: String },
    /// Delete a tag (requires --token)
    Delete { id: TagId },
}

#[derive(Subcommand)]
enum PhotoCommands {
    /// List all photos
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            let settings = load_settings()?;
            shelf_telemetry::init(&settings.telemetry)?;
            shelf_app::serve(settings).await
        }
        Commands::Ping => print(connect(cli.url, cli.token)?.ping().await?),
        Commands::Book { command } => {
            handle_book_command(&connect(cli.url, cli.token)?, command).await
        }
        Commands::Tag { command } => {
            handle_tag_command(&connect(cli.url, cli.token)?, command).await
        }
        Commands::Photo { command } => match command {
            PhotoCommands::List => print(connect(cli.url, cli.token)?.photo_list().await?),
        },
    }
}

/// Client for a running server; logs go to stderr so stdout stays JSON
fn connect(url: Option<String>, token: Option<String>) -> anyhow::Result<RemoteRpcClient> {
    shelf_telemetry::init_stderr("warn")?;

    let url = match url {
        Some(url) => url,
        None => load_settings()?.web.base_url,
    };
    tracing::debug!(%url, "calling shelf server");

    RemoteRpcClient::new(&url, token).with_context(|| format!("failed to build RPC client for {url}"))
}

fn load_settings() -> anyhow::Result<Settings> {
    Settings::load().context("failed to load shelf settings")
}

async fn handle_book_command(client: &dyn RpcClient, command: BookCommands) -> anyhow::Result<()> {
    match command {
        BookCommands::List => print(client.book_list().await?),
        BookCommands::Get { id } => print(client.book_find_one(BookQuery::new(id)).await?),
        BookCommands::Create { file } => {
            let form = read_form(&file)?;
            print(client.book_create(form).await?)
        }
        BookCommands::Update { id, file } => {
            let input = UpdateBookInput {
                book_id: BookQuery::new(id),
                data: read_form(&file)?,
            };
            print(client.book_update(input).await?)
        }
        BookCommands::Delete { id } => print(client.book_delete(BookQuery::new(id)).await?),
    }
}

async fn handle_tag_command(client: &dyn RpcClient, command: TagCommands) -> anyhow::Result<()> {
    match command {
        TagCommands::List { keyword } => print(client.tag_list(ListTagsInput { keyword }).await?),
        TagCommands::Get { id } => print(client.tag_get(TagQuery { id }).await?),
        TagCommands::Create { name } => print(client.tag_create(CreateTagInput { name }).await?),
        TagCommands::Delete { id } => print(client.tag_delete(TagQuery { id }).await?),
    }
}

fn read_form(path: &Path) -> anyhow::Result<BookForm> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    BookForm::parse(&raw).with_context(|| format!("{} is not a valid book", path.display()))
}

fn print<T: Serialize>(value: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

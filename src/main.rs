//! `assets-plus` - run the picker core against an assets directory or a
//! JSON manifest, either for a single query or driven by JSONL on stdin.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;
use tracing::warn;

use assets_plus::config::{load_config, load_config_from};
use assets_plus::logging;
use assets_plus::session::FetchTicket;
use assets_plus::source::{spawn_fetch, AssetSource, DirectorySource, ManifestSource};
use assets_plus::stdin_commands::{apply_command, start_stdin_listener, CommandEffect};
use assets_plus::{Category, Commit, CommitAction, Session};

#[derive(Parser, Debug)]
#[command(name = "assets-plus", about = "Fuzzy picker over a graph's asset files")]
struct Cli {
    /// Assets directory to list
    #[arg(long, conflicts_with = "manifest")]
    assets_dir: Option<PathBuf>,

    /// JSON array of {"path", "size"} records to use instead of a directory
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Config file (default: ~/.assets-plus/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Query to run
    #[arg(short, long, default_value = "")]
    query: String,

    /// Tab to filter by: all, books, images, audios, videos
    #[arg(short, long, default_value = "all")]
    category: Category,

    /// Read JSONL commands from stdin instead of running a single query
    #[arg(long)]
    stdin: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    let source: Arc<dyn AssetSource> = match (&cli.assets_dir, &cli.manifest) {
        (Some(dir), _) => Arc::new(DirectorySource::new(dir)),
        (None, Some(manifest)) => Arc::new(ManifestSource::new(manifest)),
        (None, None) => bail!("one of --assets-dir or --manifest is required"),
    };

    let mut session = Session::new(&config);

    if cli.stdin {
        run_commands(&mut session, &source)
    } else {
        let ticket = session.open().context("fresh session refused to open")?;
        fetch(&mut session, &source, ticket)?;
        session.set_category(cli.category);
        session.set_query(cli.query);
        println!("{}", snapshot(&session));
        Ok(())
    }
}

fn run_commands(session: &mut Session, source: &Arc<dyn AssetSource>) -> anyhow::Result<()> {
    let commands = start_stdin_listener();
    while let Ok(command) = commands.recv_blocking() {
        match apply_command(session, command) {
            CommandEffect::Fetch(ticket) => fetch(session, source, ticket)?,
            CommandEffect::Committed(commit) => println!("{}", commit_json(&commit)),
            CommandEffect::Updated(_) => {}
        }
        println!("{}", snapshot(session));
    }
    Ok(())
}

/// Block on the background listing and hand it to the session.
fn fetch(
    session: &mut Session,
    source: &Arc<dyn AssetSource>,
    ticket: FetchTicket,
) -> anyhow::Result<()> {
    let outcome = spawn_fetch(Arc::clone(source), ticket)
        .recv_blocking()
        .context("asset listing thread exited without a result")?;

    if let Err(e) = session.complete_fetch(outcome.ticket, outcome.result) {
        warn!(error = %e, severity = ?e.severity(), "Showing fetch notice");
        println!("{}", json!({ "notice": e.user_message() }));
    }
    Ok(())
}

fn snapshot(session: &Session) -> serde_json::Value {
    let results: Vec<serde_json::Value> = session
        .displayed_results()
        .iter()
        .map(|r| {
            json!({
                "item": &*r.item,
                "tier": r.tier,
                "ranges": r.ranges,
                "segments": r.segments(),
            })
        })
        .collect();

    json!({
        "phase": session.phase(),
        "query": session.query(),
        "category": session.active_category(),
        "tabs": session.tabs(),
        "total": session.total_count(),
        "cursor": session.cursor(),
        "results": results,
    })
}

fn commit_json(commit: &Commit) -> serde_json::Value {
    match &commit.action {
        CommitAction::InsertLink(link) => json!({
            "commit": "insert_link",
            "path": commit.item.path,
            "link": link,
        }),
        CommitAction::OpenExternal(url) => json!({
            "commit": "open_external",
            "path": commit.item.path,
            "url": url,
        }),
    }
}

//! Command execution for the navsync CLI.
//!
//! Every command works against a [`ConfigStore`] for repository settings and,
//! when it touches the remote file, a [`ContentsApi`] client. Keeping both as
//! parameters lets tests drive commands with in-memory storage and a mocked
//! API.

use crate::{
    cli::{Args, Command},
    config::ConfigStore,
    error::Result,
    github::{ContentsApi, GithubContents},
};

/// Show, change and reset saved repository settings.
pub mod config;

/// List, add and remove links, each edit being a fetch-modify-write cycle.
pub mod links;

/// Print or save the remote navigation file.
pub mod pull;

/// Upload a local file over the remote navigation file.
pub mod push;

/// Run the command selected on the command line.
pub async fn execute(args: Args) -> Result<()> {
    let mut store = args.config_store()?;
    let api = GithubContents::new()?;

    run(&mut store, &api, args.command).await
}

/// Dispatch a command. Only `config` leaves the API untouched.
pub async fn run(
    store: &mut ConfigStore,
    api: &dyn ContentsApi,
    command: Command,
) -> Result<()> {
    match command {
        Command::Config(cmd) => config::execute(store, cmd),
        Command::Pull { output } => pull::execute(store, api, output).await,
        Command::Push { file } => push::execute(store, api, file).await,
        Command::Links(cmd) => links::execute(store, api, cmd).await,
    }
}

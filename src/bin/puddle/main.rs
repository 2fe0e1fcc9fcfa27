use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::{debug, warn};

use puddle::logger::configure_logger;

use crate::commands::{add_cmd, delete_cmd, list_cmd, show_cmd, tags_cmd};
use crate::config::open_config;

mod commands;
mod config;

const CFG_FILE_NAME: &str = "puddle.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
pub(crate) struct AddArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Tag of the post. Repeat for more than one
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Image url, or a path relative to the site root
    #[arg(short, long)]
    image: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Adds a post and creates its empty body file
    Add(AddArgs),
    /// Deletes a post and its body file
    Delete {
        id: u32,
    },
    /// Lists posts, newest first
    List {
        /// Only posts with this tag
        #[arg(short, long)]
        tag: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Shows link, image and description of a post
    Show {
        id: u32,
    },
    /// Lists tags, most used first
    Tags,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run puddle --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    debug!("Using index {}", config.paths.metadata_file.display());

    match args.command {
        Command::Add(add_args) => add_cmd(&config, add_args),
        Command::Delete { id } => delete_cmd(&config, id),
        Command::List { tag, page } => list_cmd(&config, tag.as_deref(), page),
        Command::Show { id } => show_cmd(&config, id),
        Command::Tags => tags_cmd(&config),
    }
}

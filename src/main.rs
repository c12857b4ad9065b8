use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tidpack::bundle::{
    collect_dir, collect_listed, read_manifest, write_json, write_plugin_tid,
};
use tidpack::{ParserRegistry, PluginInfo};

#[derive(Parser)]
#[command(
    name = "tidpack",
    version,
    about = "Build distributable plugin packages from tiddler sources"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bundle every tiddler in a directory into a JSON plugin document
    Json {
        /// Directory containing .tid and .js tiddler sources
        #[arg(long, default_value = "tiddlers")]
        source_dir: PathBuf,
        /// Output path for the JSON plugin document
        #[arg(long, default_value = "plugin.json")]
        output: PathBuf,
    },
    /// Build a single-file .tid plugin from a curated source list
    Tid {
        /// JSON document with package-level plugin metadata
        #[arg(long, default_value = "plugin.info")]
        plugin_info: PathBuf,
        /// Text file listing the core tiddler sources, one path per line
        #[arg(long, default_value = "core-tiddlers.txt")]
        manifest: PathBuf,
        /// Output path for the single-file plugin
        #[arg(long, default_value = "plugin.tid")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let registry = ParserRegistry::new();

    match cli.command {
        Command::Json { source_dir, output } => {
            let bundle = collect_dir(&source_dir, &registry)?;
            write_json(&bundle, &output)?;
            println!(
                "Created {} with {} tiddlers",
                output.display(),
                bundle.len()
            );
        }
        Command::Tid {
            plugin_info,
            manifest,
            output,
        } => {
            let info = PluginInfo::load(&plugin_info)?;
            let sources = read_manifest(&manifest)?;
            let bundle = collect_listed(&sources, &registry)?;
            write_plugin_tid(&info, &bundle, &output)?;
            println!(
                "Created {} with {} core tiddlers",
                output.display(),
                bundle.len()
            );
            println!("Version: {}", info.version);
        }
    }

    Ok(())
}

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use inlinemark::{build_syntax_tree, dump, parse_with};

#[derive(Parser)]
#[command(name = "inlinemark")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve inline markup and print the resulting node tree")]
struct Cli {
    /// Input file holding one inline span (stdin if not provided)
    file: Option<PathBuf>,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the lossless syntax tree instead of the node outline
    #[arg(long)]
    cst: bool,
}

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let start_dir = start_dir_for(&cli.file)?;
    let (cfg, cfg_path) = inlinemark::config::load(cli.config.as_deref(), &start_dir)?;
    if let Some(path) = &cfg_path {
        log::info!("Using config {}", path.display());
    }

    let input = read_all(cli.file.as_ref())?.replace("\r\n", "\n");
    let span = input.trim_end_matches('\n');

    let definitions = cfg.definitions();
    let tree = parse_with(span, &definitions, cfg.parse_options());

    if cli.cst {
        println!("{:#?}", build_syntax_tree(span, &tree));
    } else {
        print!("{}", dump(&tree, span));
    }

    Ok(())
}

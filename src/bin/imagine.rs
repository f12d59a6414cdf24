use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "imagine", version)]
struct Cli {
    /// Log operation dispatch to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the filename suffix for an operation list.
    Key(KeyArgs),
    /// Apply an operation list to an image and write the result.
    Process(ProcessArgs),
    /// Print the dimensions of an image as WIDTHxHEIGHT.
    Size(SizeArgs),
}

#[derive(Parser, Debug)]
struct KeyArgs {
    /// Operations as JSON, or `@path` to read them from a file.
    #[arg(long)]
    ops: String,

    /// Print a fixed-length digest instead of the readable key.
    #[arg(long)]
    hash: bool,

    /// Digest length (defaults to the config's `hashLength`).
    #[arg(long)]
    hash_length: Option<usize>,

    /// Config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(long)]
    out: PathBuf,

    /// Operations as JSON, or `@path` to read them from a file.
    #[arg(long)]
    ops: String,

    /// JPEG quality override.
    #[arg(long)]
    quality: Option<u8>,

    /// Config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SizeArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Key(args) => cmd_key(args),
        Command::Process(args) => cmd_process(args),
        Command::Size(args) => cmd_size(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<imagine::ImagineConfig> {
    match path {
        Some(p) => Ok(imagine::ImagineConfig::from_path(p)?),
        None => Ok(imagine::ImagineConfig::default()),
    }
}

fn read_ops(arg: &str) -> anyhow::Result<imagine::OperationSequence> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read operations file '{path}'"))?,
        None => arg.to_string(),
    };
    Ok(imagine::OperationSequence::from_json(&text)?)
}

fn cmd_key(args: KeyArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(len) = args.hash_length {
        config.hash_length = len;
    }
    let ops = read_ops(&args.ops)?;
    let key = imagine::derive_key(&ops, &config.separators, args.hash, config.hash_length)?;
    println!("{key}");
    Ok(())
}

fn cmd_process(args: ProcessArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let ops = read_ops(&args.ops)?;
    let imagine = imagine::Imagine::new(config);
    let opts = imagine::SaveOptions {
        jpeg_quality: args.quality,
        ..Default::default()
    };
    imagine
        .process_image_to(args.in_path.as_path(), &ops, &args.out, &opts)
        .with_context(|| format!("process '{}'", args.in_path.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_size(args: SizeArgs) -> anyhow::Result<()> {
    let (w, h) = imagine::Imagine::default().image_size(&args.in_path)?;
    println!("{w}x{h}");
    Ok(())
}

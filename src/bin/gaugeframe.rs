use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gaugeframe", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default preset as JSON.
    Init(InitArgs),
    /// Print the number of states a preset exports.
    States(StatesArgs),
    /// Render a single state as a PNG.
    Frame(FrameArgs),
    /// Render every state into a zip archive.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Output preset JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct StatesArgs {
    /// Input preset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input preset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// State index (0-based). Defaults to the last (full) state.
    #[arg(long)]
    state: Option<u32>,

    /// Output PNG path. Defaults to `<prefix>_single.png`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override output width.
    #[arg(long)]
    width: Option<u32>,

    /// Override output height.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input preset JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output zip path. Defaults to `<prefix>_states_<count>.zip`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Entry name prefix. Defaults to the preset's `namePrefix`.
    #[arg(long)]
    prefix: Option<String>,

    /// Render states in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render at the preset size even when the gauge overflows it.
    #[arg(long, default_value_t = false)]
    no_fit: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::States(args) => cmd_states(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load_preset(path: &Path) -> anyhow::Result<gaugeframe::Preset> {
    let f = std::fs::File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    gaugeframe::Preset::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("load preset '{}'", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let json = gaugeframe::Preset::default().to_json_string()?;
    write_output(&args.out, json.as_bytes())
}

fn cmd_states(args: StatesArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.in_path)?;
    println!("{}", gaugeframe::effective_export_states(&preset));
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.in_path)?;
    let total = gaugeframe::effective_export_states(&preset);
    let state = args.state.unwrap_or(total - 1);
    let png = gaugeframe::render_state_image(&preset, state, total, args.width, args.height)
        .with_context(|| format!("render state {state} of {total}"))?;

    let out = args.out.unwrap_or_else(|| {
        PathBuf::from(gaugeframe::single_file_name(
            preset.effective_name_prefix(),
        ))
    });
    write_output(&out, &png)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.in_path)?;
    let total = gaugeframe::effective_export_states(&preset);

    let mut opts = gaugeframe::ExportOpts::from_env();
    if args.parallel || args.threads.is_some() {
        opts.threading = gaugeframe::ExportThreading {
            parallel: true,
            threads: args.threads,
        };
    }
    opts.fit_to_canvas = !args.no_fit;

    let bytes = gaugeframe::export_archive_with_opts(&preset, args.prefix.as_deref(), &opts)
        .context("export states")?;

    let out = args.out.unwrap_or_else(|| {
        let prefix = args
            .prefix
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| preset.effective_name_prefix());
        PathBuf::from(gaugeframe::archive_file_name(prefix, total))
    });
    write_output(&out, &bytes)
}

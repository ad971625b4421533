use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use solbind::emit::DEFAULT_RUNTIME_CRATE;
use solbind::{
    generate_bindings, ContractSource, Diagnostic, EmitterConfig, GenerationOptions,
    RepresentationMode,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "solbind")]
#[command(about = "Generate typed Rust bindings from contract interface descriptions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings for one contract
    Generate(GenerateArgs),

    /// Same commands behind a `solidity` prefix, for build scripts that namespace by language
    Solidity {
        #[command(subcommand)]
        command: SolidityCommands,
    },
}

#[derive(Subcommand)]
enum SolidityCommands {
    /// Generate bindings for one contract
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Interface description: a JSON array or a compiler artifact. `-` reads standard input
    #[arg(short = 'a', long = "abi")]
    abi: PathBuf,

    /// File holding the deployment bytecode as hex
    #[arg(short = 'b', long = "bin")]
    bin: Option<PathBuf>,

    /// Root directory of the generated module tree
    #[arg(short = 'o', long)]
    output_dir: PathBuf,

    /// Destination module, e.g. `contracts.token`
    #[arg(short = 'p', long)]
    package: String,

    /// Contract name. Defaults to the interface file stem
    #[arg(short = 'c', long)]
    contract_name: Option<String>,

    /// Map integers onto primitive types; widths above 128 bits are rejected
    #[arg(long, conflicts_with = "precise")]
    native: bool,

    /// Map every integer onto a 256-bit word (default)
    #[arg(long)]
    precise: bool,

    /// Generate both a call and a transaction method for every function
    #[arg(long)]
    call_and_send: bool,

    /// Make the calldata encoder functions public
    #[arg(long)]
    abi_funcs: bool,

    /// Runtime crate the generated code imports
    #[arg(long, default_value = DEFAULT_RUNTIME_CRATE)]
    runtime_crate: String,

    #[arg(short, long)]
    verbose: bool,
}

impl GenerateArgs {
    fn reads_stdin(&self) -> bool {
        self.abi == Path::new("-")
    }

    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            representation: if self.native {
                RepresentationMode::Native
            } else {
                RepresentationMode::Precise
            },
            call_and_send: self.call_and_send,
            abi_funcs: self.abi_funcs,
        }
    }

    fn contract_name(&self) -> Result<String> {
        if let Some(name) = &self.contract_name {
            return Ok(name.clone());
        }
        if self.reads_stdin() {
            bail!("--contract-name is required when the interface is read from standard input");
        }
        self.abi
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .with_context(|| format!("Cannot derive a contract name from {}", self.abi.display()))
    }

    fn read_interface(&self) -> Result<String> {
        if self.reads_stdin() {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read the interface from standard input")?;
            return Ok(buffer);
        }
        std::fs::read_to_string(&self.abi)
            .with_context(|| format!("Failed to read {}", self.abi.display()))
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args)
        | Commands::Solidity {
            command: SolidityCommands::Generate(args),
        } => cmd_generate(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    init_tracing(args.verbose);

    let name = args.contract_name()?;
    let interface = args.read_interface()?;
    let bytecode = args
        .bin
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .transpose()?;

    if args.verbose {
        eprintln!("{}", " solbind".bright_blue().bold());
        eprintln!("{}", "=".repeat(50).bright_blue());
        eprintln!(" Contract: {}", name);
        eprintln!(" Package: {}", args.package);
        eprintln!(" Mode: {:?}", args.options().representation);
        eprintln!();
    }

    let source = ContractSource {
        name,
        interface,
        bytecode,
        package: args.package.clone(),
    };
    let config = EmitterConfig::default().with_runtime_crate(args.runtime_crate.clone());

    let start = Instant::now();
    let mut warnings = 0usize;
    let path = {
        let mut reporter = |diagnostic: Diagnostic| {
            warnings += 1;
            eprintln!("{} {}", "warning:".yellow().bold(), diagnostic);
        };
        generate_bindings(
            &source,
            &args.options(),
            &config,
            &args.output_dir,
            &mut reporter,
        )?
    };

    println!(
        "{} {}",
        "Generated".bright_green().bold(),
        path.display()
    );
    if args.verbose {
        eprintln!("   Warnings: {}", warnings);
        eprintln!("   Time: {:.3}s", start.elapsed().as_secs_f64());
    }

    Ok(())
}

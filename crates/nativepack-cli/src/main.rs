mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{
    ResolveArgs, EXIT_CONFIG_ERROR, EXIT_DEPENDENCY_ERROR, EXIT_FAILURE, EXIT_PLATFORM_ERROR,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "nativepack",
    version,
    about = "Generate runtime-specific NuGet projects for a native library and its dependencies"
)]
struct Cli {
    /// Path to a nativepack.toml config file (default: ./nativepack.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List dependencies and write <id-prefix>.<platform>.csproj.
    Generate {
        #[command(flatten)]
        resolve: ResolveArgs,
        /// Directory the project file is written to.
        #[arg(long, short, default_value = ".")]
        output_dir: PathBuf,
        /// Print the rendered project to stdout instead of writing it.
        #[arg(long, visible_alias = "stdout", default_value_t = false)]
        dry_run: bool,
    },
    /// Print the platform identifier of this machine.
    Platform {
        /// Validate and normalize this identifier instead of the host's.
        #[arg(long)]
        platform: Option<String>,
    },
    /// List the deduplicated dependencies of the target library.
    Deps {
        #[command(flatten)]
        resolve: ResolveArgs,
    },
    /// Show the auxiliary files and asset trees packaged with every run.
    Catalog {
        #[command(flatten)]
        resolve: ResolveArgs,
    },
    /// Check the toolchain, lister, and config on this machine.
    Doctor {
        #[command(flatten)]
        resolve: ResolveArgs,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("NATIVEPACK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = cli.config.as_deref();
    let json_output = cli.json;

    let result = match cli.command {
        Commands::Generate {
            resolve,
            output_dir,
            dry_run,
        } => commands::generate::run(config, &resolve, &output_dir, dry_run, json_output),
        Commands::Platform { platform } => {
            commands::platform::run(platform.as_deref(), json_output)
        }
        Commands::Deps { resolve } => commands::deps::run(config, &resolve, json_output),
        Commands::Catalog { resolve } => commands::catalog::run(config, &resolve, json_output),
        Commands::Doctor { resolve } => commands::doctor::run(config, &resolve, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(exit_code_for(&msg))
        }
    }
}

fn exit_code_for(msg: &str) -> u8 {
    if msg.starts_with("unknown platform:") {
        EXIT_PLATFORM_ERROR
    } else if msg.starts_with("dependency resolution failed:") {
        EXIT_DEPENDENCY_ERROR
    } else if msg.starts_with("config error:") {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_FAILURE
    }
}

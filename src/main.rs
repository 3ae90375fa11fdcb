use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sealed_keys::cli::{
    handle_decrypt_command, handle_encrypt_command, handle_generate_command,
    handle_init_config_command, handle_inspect_command, handle_keygen_command,
    handle_lookup_command, GenerateArgs,
};
use sealed_keys::config::settings::{GeneratorSettings, DEFAULT_SETTINGS_FILE};
use sealed_keys::crypto::keygen::DEFAULT_SECRET_BYTES;
use sealed_keys::crypto::SecretEncoding;
use sealed_keys::logging;

#[derive(Parser)]
#[command(
    name = "sealed-keys",
    version,
    about = "Encrypt API credentials at build time for embedding in client bundles",
    long_about = "sealed-keys reads named secrets from an env file, encrypts each one into a \
                  salt:iv:ciphertext envelope derived from three master secrets, and writes \
                  a lookup module that decrypts them on demand."
)]
struct Cli {
    /// Settings file
    #[arg(
        short,
        long,
        global = true,
        env = "SEALED_KEYS_CONFIG",
        default_value = DEFAULT_SETTINGS_FILE
    )]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt the configured secrets into a lookup module
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Encrypt a single value and print its envelope
    Encrypt {
        /// Value to encrypt ('-' reads a line from stdin; omit to be prompted)
        plaintext: Option<String>,
    },

    /// Decrypt a single envelope and print the value
    Decrypt {
        /// Envelope in salt:iv:ciphertext form
        envelope: String,
    },

    /// Decrypt one entry of a JSON lookup table
    Lookup {
        /// JSON lookup table
        #[arg(short, long)]
        table: PathBuf,
        /// Entry name
        name: String,
    },

    /// List the entries of a JSON lookup table
    Inspect {
        /// JSON lookup table
        #[arg(short, long)]
        table: PathBuf,
        /// Try to decrypt every entry with the current master material
        #[arg(long)]
        verify: bool,
    },

    /// Generate fresh master material
    Keygen {
        /// Random bytes per secret
        #[arg(short, long, default_value_t = DEFAULT_SECRET_BYTES)]
        bytes: usize,
        /// Encoding: hex or base64
        #[arg(short, long, default_value = "hex")]
        encoding: SecretEncoding,
    },

    /// Write a settings file with the default secret list
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = cli.config;
    let load_settings = || {
        GeneratorSettings::load_or_default(&config)
            .with_context(|| format!("Failed to load settings from {}", config.display()))
    };

    match cli.command {
        Commands::Generate(args) => {
            let settings = load_settings()?;
            let output = args.output.clone();
            handle_generate_command(&settings, args)
                .with_context(|| format!("Generation of {} aborted", output.display()))?;
        }
        Commands::Encrypt { plaintext } => {
            handle_encrypt_command(&load_settings()?, plaintext)?;
        }
        Commands::Decrypt { envelope } => {
            handle_decrypt_command(&load_settings()?, &envelope)?;
        }
        Commands::Lookup { table, name } => {
            handle_lookup_command(&load_settings()?, &table, &name)?;
        }
        Commands::Inspect { table, verify } => {
            handle_inspect_command(&load_settings()?, &table, verify)?;
        }
        Commands::Keygen { bytes, encoding } => {
            handle_keygen_command(&load_settings()?, bytes, encoding)?;
        }
        Commands::InitConfig { force } => {
            handle_init_config_command(&config, force)?;
        }
    }

    Ok(())
}

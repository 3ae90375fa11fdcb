//! Generate CLI command
//!
//! Encrypts the configured secrets from an env file into a lookup module.

use std::path::PathBuf;

use clap::Args;

use crate::config::{GeneratorSettings, OutputFormat};
use crate::error::SealResult;
use crate::generate;

/// Arguments for `sealed-keys generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Env file holding the plaintext secrets
    #[arg(short, long, default_value = ".env.production")]
    pub env_file: PathBuf,

    /// Where to write the generated lookup module
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format: rust or json (defaults to the settings file)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// Handle the generate command
pub fn handle_generate_command(settings: &GeneratorSettings, args: GenerateArgs) -> SealResult<()> {
    let format = args.format.unwrap_or(settings.output_format);
    let report = generate::run(settings, &args.env_file, &args.output, format)?;

    println!(
        "Encrypted {} secret(s) into {} ({})",
        report.names.len(),
        report.output.display(),
        report.format
    );
    for name in &report.names {
        println!("  {}", name);
    }

    Ok(())
}

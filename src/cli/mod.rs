//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library.

pub mod generate;
pub mod keygen;
pub mod secret;
pub mod table;

pub use generate::{handle_generate_command, GenerateArgs};
pub use keygen::{handle_init_config_command, handle_keygen_command};
pub use secret::{handle_decrypt_command, handle_encrypt_command};
pub use table::{handle_inspect_command, handle_lookup_command};

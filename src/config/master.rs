//! Master secret material
//!
//! The three independent secrets every envelope is derived from. Built once
//! at process start and passed by reference into each derive/encrypt/decrypt
//! call; nothing here is global.

use std::fmt;

use crate::crypto::SecretString;
use crate::error::{SealError, SealResult};

use super::settings::MasterVars;

/// Default environment variable holding the pepper
pub const DEFAULT_PEPPER_VAR: &str = "VITE_PEPPER";

/// Default environment variable holding the application secret key
pub const DEFAULT_SECRET_KEY_VAR: &str = "VITE_SECRET_KEY";

/// Default environment variable holding the environment salt
pub const DEFAULT_SALT_VAR: &str = "VITE_SALT";

/// Application secret key, pepper and environment salt
#[derive(Clone)]
pub struct MasterMaterial {
    pepper: SecretString,
    secret_key: SecretString,
    env_salt: SecretString,
}

impl MasterMaterial {
    /// Build master material from its three components.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first empty component.
    pub fn new(
        pepper: impl Into<SecretString>,
        secret_key: impl Into<SecretString>,
        env_salt: impl Into<SecretString>,
    ) -> SealResult<Self> {
        let material = Self {
            pepper: pepper.into(),
            secret_key: secret_key.into(),
            env_salt: env_salt.into(),
        };
        material.validate()?;
        Ok(material)
    }

    /// Read master material from the process environment using the default
    /// variable names
    pub fn from_env() -> SealResult<Self> {
        Self::from_env_with(&MasterVars::default())
    }

    /// Read master material from the process environment using the given
    /// variable names
    pub fn from_env_with(vars: &MasterVars) -> SealResult<Self> {
        Self::from_lookup(vars, |name| std::env::var(name).ok().map(SecretString::from))
    }

    /// Resolve each component through `lookup`.
    ///
    /// Every missing component is reported in one error so a misconfigured
    /// build fails once with the full list.
    pub fn from_lookup<F>(vars: &MasterVars, mut lookup: F) -> SealResult<Self>
    where
        F: FnMut(&str) -> Option<SecretString>,
    {
        let mut missing = Vec::new();
        let mut fetch = |name: &str| match lookup(name) {
            Some(value) if !value.is_blank() => Some(value),
            _ => {
                missing.push(name.to_string());
                None
            }
        };

        let pepper = fetch(&vars.pepper_var);
        let secret_key = fetch(&vars.secret_key_var);
        let env_salt = fetch(&vars.salt_var);

        match (pepper, secret_key, env_salt) {
            (Some(pepper), Some(secret_key), Some(env_salt)) => {
                Self::new(pepper, secret_key, env_salt)
            }
            _ => Err(SealError::Config(format!(
                "Missing required master material: {}",
                missing.join(", ")
            ))),
        }
    }

    /// Fail if any component is empty
    pub fn validate(&self) -> SealResult<()> {
        for (label, value) in [
            ("pepper", &self.pepper),
            ("secret key", &self.secret_key),
            ("environment salt", &self.env_salt),
        ] {
            if value.is_empty() {
                return Err(SealError::Config(format!(
                    "Master material component '{}' is empty",
                    label
                )));
            }
        }
        Ok(())
    }

    pub fn pepper(&self) -> &SecretString {
        &self.pepper
    }

    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }

    pub fn env_salt(&self) -> &SecretString {
        &self.env_salt
    }
}

impl fmt::Debug for MasterMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterMaterial")
            .field("pepper", &self.pepper)
            .field("secret_key", &self.secret_key)
            .field("env_salt", &self.env_salt)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_new_accepts_complete_material() {
        let master = MasterMaterial::new("pepper1", "secret2", "envsalt3").unwrap();
        assert_eq!(master.pepper().expose(), "pepper1");
        assert_eq!(master.secret_key().expose(), "secret2");
        assert_eq!(master.env_salt().expose(), "envsalt3");
    }

    #[test]
    fn test_new_rejects_empty_component() {
        let err = MasterMaterial::new("pepper1", "", "envsalt3").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("secret key"));

        assert!(MasterMaterial::new("", "secret2", "envsalt3").is_err());
        assert!(MasterMaterial::new("pepper1", "secret2", "").is_err());
    }

    #[test]
    fn test_from_lookup_reports_all_missing() {
        let mut vars = HashMap::new();
        vars.insert("VITE_SECRET_KEY", "secret2");
        vars.insert("VITE_SALT", "   ");

        let err = MasterMaterial::from_lookup(&MasterVars::default(), |name| {
            vars.get(name).map(|v| SecretString::from(*v))
        })
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("VITE_PEPPER"));
        assert!(message.contains("VITE_SALT"));
        assert!(!message.contains("VITE_SECRET_KEY"));
    }

    #[test]
    fn test_from_lookup_custom_names() {
        let vars = MasterVars {
            pepper_var: "P".into(),
            secret_key_var: "K".into(),
            salt_var: "S".into(),
        };
        let master = MasterMaterial::from_lookup(&vars, |name| Some(format!("{}-value", name).into()))
            .unwrap();
        assert_eq!(master.pepper().expose(), "P-value");
        assert_eq!(master.env_salt().expose(), "S-value");
    }

    #[test]
    fn test_debug_is_redacted() {
        let master = MasterMaterial::new("pepper1", "secret2", "envsalt3").unwrap();
        let debug = format!("{:?}", master);
        assert!(!debug.contains("pepper1"));
        assert!(!debug.contains("secret2"));
        assert!(!debug.contains("envsalt3"));
    }
}

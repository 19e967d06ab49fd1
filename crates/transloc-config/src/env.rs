//! Environment variable handling.

use std::env;

use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    pub const TRANSLOC_CONFIG_PATH: &str = "TRANSLOC_CONFIG_PATH";
    pub const TRANSLOC_ENV: &str = "TRANSLOC_ENV";
}

/// Process environment setup.
pub struct Environment;

impl Environment {
    /// Load `.env`, `.env.local` and `.env.{TRANSLOC_ENV}` from the current
    /// directory. Later files override earlier ones; missing files are skipped.
    pub fn init() -> Result<(), EnvError> {
        load(".env")?;
        load(".env.local")?;

        if let Ok(env) = env::var(vars::TRANSLOC_ENV) {
            load(&format!(".env.{}", env))?;
        }

        Ok(())
    }
}

fn load(file: &str) -> Result<(), EnvError> {
    match dotenvy::from_filename(file) {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

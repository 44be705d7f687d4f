use std::path::PathBuf;

use clap::Parser;
use sales_report::{CurrencyLocale, FontSource};

/// Serves the sales-by-customer PDF report over HTTP.
///
/// Fonts are searched under `assets/fonts` next to the binary or the
/// `sales_report` crate unless `--fonts-dir` is given.
#[derive(Debug, Parser)]
#[command(author, version, about = "Sales-by-customer PDF report server")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Directory holding the DejaVu Sans font files.
    #[arg(long, env = "SALES_REPORT_FONTS_DIR")]
    pub fonts_dir: Option<PathBuf>,

    /// Locale used to format amounts (pt-BR, en-US, de-DE).
    #[arg(long, env = "REPORT_LOCALE", default_value = "pt-BR")]
    pub locale: CurrencyLocale,
}

impl Config {
    /// Font source selected by the configuration.
    pub fn font_source(&self) -> FontSource {
        match &self.fonts_dir {
            Some(dir) => FontSource::Directory(dir.clone()),
            None => FontSource::Default,
        }
    }
}

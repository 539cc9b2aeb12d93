use clap::{CommandFactory, Parser};

#[derive(Debug, Default, Parser)]
#[command(
    name = "rfc-finder",
    version,
    about = "Search the RFC corpus and explore discovered topics"
)]
pub struct CliArgs {
    /// Run once without the terminal UI and print to stdout
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Query to run in headless mode
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Print the topics of the current page in headless mode
    #[arg(long)]
    pub topics: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the session cache database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// URL of the page being read; enables Topics for RFC pages
    #[arg(long = "page-url", value_name = "URL")]
    pub page_url: Option<String>,

    /// Chart entrance animation length in milliseconds
    #[arg(long = "animation-ms", value_name = "MS")]
    pub animation_ms: Option<u64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("API_URL", url);
        }
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(url) = &self.page_url {
            std::env::set_var("PAGE_URL", url);
        }
        if let Some(ms) = self.animation_ms {
            std::env::set_var("ANIMATION_MS", ms.to_string());
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

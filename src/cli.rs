use crate::config::{DEFAULT_MODEL, Settings};
use clap::Parser;
use std::time::Duration;

/// Hephaestus-Alpha, an execution agent backed by Gemini on Vertex AI
#[derive(Parser, Debug, Clone)]
#[command(name = "hephaestus", version, about, long_about = None)]
pub struct Cli {
    /// Google Cloud project identifier
    #[arg(long, env = "PROJECT_ID")]
    pub project_id: Option<String>,

    /// Vertex AI region, e.g. us-central1
    #[arg(long, env = "LOCATION")]
    pub location: Option<String>,

    /// Gemini model driving the agent
    #[arg(long, env = "HEPHAESTUS_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Seconds to wait for the model per command (0 waits forever)
    #[arg(long, env = "HEPHAESTUS_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Run a single command and exit instead of starting the interactive loop
    #[arg(short, long)]
    pub command: Option<String>,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            project_id: self.project_id.clone(),
            location: self.location.clone(),
            model: self.model.clone(),
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_settings() {
        let cli = Cli::try_parse_from([
            "hephaestus",
            "--project-id",
            "test-project",
            "--location",
            "us-central1",
            "--model",
            "gemini-2.0-flash",
            "--timeout-secs",
            "15",
        ])
        .unwrap();

        let settings = cli.settings();
        assert_eq!(settings.project_id.as_deref(), Some("test-project"));
        assert_eq!(settings.location.as_deref(), Some("us-central1"));
        assert_eq!(settings.model, "gemini-2.0-flash");
        assert_eq!(settings.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn zero_timeout_disables_limit() {
        let cli = Cli::try_parse_from(["hephaestus", "--timeout-secs", "0", "-c", "what time"])
            .unwrap();

        assert_eq!(cli.settings().timeout, None);
        assert_eq!(cli.command.as_deref(), Some("what time"));
    }
}

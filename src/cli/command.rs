use clap::Parser;

use crate::storage::json::DEFAULT_JSON_PATH;

/// Startup configuration. Every flag falls back to an environment variable,
/// which may come from a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(name = "rolodex-api", version, about = "Contact book HTTP/JSON service")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value_t = String::from("0.0.0.0"))]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Storage choice (mem, json) are available
    #[arg(long, env = "STORAGE_CHOICE", default_value_t = String::from("json"))]
    pub storage_choice: String,

    /// Path of the contacts file used by the json storage
    #[arg(long, env = "JSON_STORAGE_PATH", default_value_t = String::from(DEFAULT_JSON_PATH))]
    pub json_path: String,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "rolodex-api",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--storage-choice",
            "mem",
        ]);

        assert_eq!(cli.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cli.storage_choice, "mem");
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["rolodex-api", "--port", "http"]).is_err());
    }
}

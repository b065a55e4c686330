//! `plaquette-studio` command line.
//!
//! ```text
//! plaquette-studio export <payload.json> [out.stim]
//! plaquette-studio template <name>
//! ```
//!
//! `export` replays a payload saved from the editor on the configured lattice,
//! then sends it to the backend and writes the circuit. `template` fetches a template and prints it as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use canvas::export::ExportPayload;
use plaquette_studio::backend::{Backend, HttpBackend};
use plaquette_studio::config::StudioConfig;
use plaquette_studio::workflow::{self, DEFAULT_CIRCUIT_FILE};

const USAGE: &str = "usage: plaquette-studio export <payload.json> [out.stim] | template <name>";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(std::env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            tracing::error!(error = %msg, "plaquette-studio failed");
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> Result<(), String> {
    let config = StudioConfig::from_env().map_err(|e| e.to_string())?;
    let backend = HttpBackend::from_config(&config).map_err(|e| e.to_string())?;
    tracing::info!(backend = %backend.base_url(), "plaquette-studio starting");

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["export", input, rest @ ..] if rest.len() <= 1 => {
            let out = PathBuf::from(rest.first().copied().unwrap_or(DEFAULT_CIRCUIT_FILE));
            let raw = tokio::fs::read_to_string(input)
                .await
                .map_err(|e| format!("failed to read {input}: {e}"))?;
            let payload: ExportPayload =
                serde_json::from_str(&raw).map_err(|e| format!("invalid payload {input}: {e}"))?;
            workflow::validate_payload(&payload, &config.lattice_config()).map_err(|e| e.to_string())?;
            let written = workflow::export_payload(&backend, &payload, &out)
                .await
                .map_err(|e| e.to_string())?;
            println!("wrote {written} bytes to {}", out.display());
            Ok(())
        }
        ["template", name] => {
            let template = backend.fetch_template(name).await.map_err(|e| e.to_string())?;
            let json = serde_json::to_string_pretty(&template).map_err(|e| e.to_string())?;
            println!("{json}");
            Ok(())
        }
        _ => Err(USAGE.to_string()),
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use cc_app::CanvasDropResult;
use cc_core::canvas::Point;
use cc_core::paste::Outcome;
use cc_core::ports::FileHandle;
use cc_core::{CanvasConfig, ClipboardPayload};
use cc_infra::PresetDialog;
use clipcanvas::bootstrap::{init_tracing_subscriber, load_config, wire_canvas};
use tracing::{error, info};

const DEFAULT_CONFIG: &str = "clipcanvas.toml";

/// `clipcanvas [CONFIG] [FILE...]`
///
/// Restores the canvas found under the configured root, then drops each FILE
/// onto it.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing_subscriber()?;

    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string()));
    let config = if config_path.exists() {
        load_config(&config_path)?
    } else {
        let data_dir = std::env::current_dir().context("Failed to resolve working directory")?;
        info!(config = %config_path.display(), "Config file not found, using defaults");
        CanvasConfig::with_system_defaults(data_dir)
    };

    // Nothing is deleted from the command line, so confirmations always cancel.
    let app = wire_canvas(&config, Arc::new(PresetDialog::cancelling())).await?;
    app.restore_from_disk().await?;

    for (i, file) in args.enumerate() {
        let point = Point::new(40.0 * i as f64, 40.0 * i as f64);
        let payload = ClipboardPayload::from_files([FileHandle::new(&file)]);
        log_drop(&file, app.drop.execute(point, None, payload).await);
    }

    for record in app.session.snapshot().await {
        info!(
            item = %record.item,
            x = record.position.x,
            y = record.position.y,
            z = record.z,
            "Canvas item"
        );
    }

    Ok(())
}

fn log_drop(file: &str, result: CanvasDropResult) {
    match result {
        CanvasDropResult::Pasted(Outcome::Success(item)) => {
            info!(file, item = %item, "Added file to canvas");
        }
        CanvasDropResult::Pasted(Outcome::Failure(failure)) => {
            error!(file, error = %failure, "Failed to add file to canvas");
        }
        CanvasDropResult::Pasted(Outcome::Cancel) => {
            info!(file, "Adding file was cancelled");
        }
        CanvasDropResult::Rearranged { item, .. } => {
            info!(file, item = %item, "Rearranged canvas item");
        }
    }
}

//! `reelgen` -- prompt-to-video generation CLI.
//!
//! Submits a prompt to the configured video-generation provider, polls the
//! resulting operation to completion, stores the video under the public
//! directory, and prints the generation result as JSON. Without provider
//! credentials it serves a bundled sample clip instead.
//!
//! Usage: `reelgen <prompt> [style-reference]`
//!
//! # Environment variables
//!
//! | Variable                   | Required | Default          | Description                               |
//! |----------------------------|----------|------------------|-------------------------------------------|
//! | `REELGEN_ENDPOINT`         | for live | --               | Provider API base URL                     |
//! | `REELGEN_PROJECT_ID`       | for live | --               | Provider project identifier               |
//! | `REELGEN_REGION`           | no       | `us-central1`    | Provider region                           |
//! | `REELGEN_MODEL_ID`         | no       | `reel-video-001` | Generation model                          |
//! | `REELGEN_CREDENTIALS_FILE` | no       | --               | Access-token file; unset serves the sample |
//! | `REELGEN_PUBLIC_DIR`       | no       | `public`         | Root of the publicly served directory     |

use reelgen_pipeline::Generator;
use reelgen_provider::ProviderSettings;
use reelgen_store::{ArtifactStore, DEFAULT_PUBLIC_DIR};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(prompt) = args.next() else {
        eprintln!("Usage: reelgen <prompt> [style-reference]");
        std::process::exit(2);
    };
    let style_reference = args.next();

    let settings = ProviderSettings::from_env();
    let public_dir = std::env::var("REELGEN_PUBLIC_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string());

    tracing::info!(
        public_dir = %public_dir,
        live = settings.credentials_file.is_some(),
        "Starting reelgen",
    );

    let generator = Generator::new(settings, ArtifactStore::new(&public_dir));
    let result = generator.generate(&prompt, style_reference.as_deref()).await;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize generation result");
            std::process::exit(1);
        }
    }

    if !result.success {
        std::process::exit(1);
    }
}

//! Download the ArkhamDB card dump

use std::path::Path;

use serde_json::value::RawValue;
use tracing::info;

use crate::error::IngestError;
use crate::FetchArgs;

/// Fetch every card from `args.url` and write them to `args.output`.
///
/// Records are kept verbatim; only the outer array is re-indented.
pub async fn run_fetch(args: &FetchArgs) -> Result<usize, IngestError> {
    info!(url = %args.url, "fetching cards");

    let client = reqwest::Client::builder()
        .user_agent(concat!("codex/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let body = client
        .get(&args.url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let cards: Vec<Box<RawValue>> =
        serde_json::from_str(&body).map_err(|source| IngestError::Decode {
            url: args.url.clone(),
            source,
        })?;

    write_cards(&args.output, &cards).await?;
    info!(count = cards.len(), path = %args.output.display(), "wrote cards");

    Ok(cards.len())
}

pub async fn write_cards(path: &Path, cards: &[Box<RawValue>]) -> Result<(), IngestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| IngestError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let json = serde_json::to_vec_pretty(cards).map_err(IngestError::Encode)?;

    tokio::fs::write(path, json)
        .await
        .map_err(|source| IngestError::Write {
            path: path.to_path_buf(),
            source,
        })
}

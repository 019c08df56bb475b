#![allow(clippy::needless_for_each)]

use anyhow::Result;
use serde_json::to_string_pretty;
use std::path::PathBuf;
use utoipa::OpenApi;
use utoipauto::utoipauto;

#[utoipauto(paths = "./crates/dsd-api/src/")]
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "dsd_bin", description = "DSD on-chain activity dashboard"),
        (name = "Protocol", description = "Epoch and loading state"),
        (name = "Holdings", description = "DAO, LP and coupon holdings by epoch")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn generate_openapi_json(output_path: PathBuf) -> Result<()> {
        let openapi = Self::openapi();
        let json = to_string_pretty(&openapi)?;

        let file_path = output_path.join("openapi.json");

        tracing::info!("Saving OpenAPI specs to {}...", file_path.display());

        std::fs::write(&file_path, json)?;
        tracing::info!("OpenAPI specs saved!");
        Ok(())
    }
}

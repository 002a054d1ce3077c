use crate::error::{Result, SeedError};
use rust_embed::Embed;

/// Resources bundled into the binary so seeded repos never need a path back
/// to this source tree.
#[derive(Embed)]
#[folder = "assets/"]
struct SeedAssets;

/// Read an embedded asset as UTF-8 text.
pub fn read_text(name: &str) -> Result<String> {
    let file =
        <SeedAssets as Embed>::get(name).ok_or_else(|| SeedError::AssetMissing(name.to_string()))?;
    String::from_utf8(file.data.into_owned())
        .map_err(|e| SeedError::ContractInvalid(format!("{name} is not UTF-8: {e}")))
}

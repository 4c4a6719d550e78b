//! Avatar bundle assembly.
//!
//! A `.xavatar` file is a ZIP container with a fixed member layout:
//!
//! - `avatar.png` - the 440x440 master image
//! - `avatar{440,260,128,64}.dds` - DXT5 thumbnail variants
//!
//! Activated bundles additionally carry a profile mirror set:
//!
//! - `picture.png` and `picture{440,260,128,64}.dds` - byte-identical
//!   copies of the avatar entries under the profile naming
//! - `online.json` - a fixed profile metadata stub

use anyhow::Result;

use crate::texture::{self, AvatarTextures};
use crate::zip::ZipWriter;

/// Profile metadata stub shipped in activated bundles, byte-for-byte.
const ONLINE_JSON: &str = r#"{"avatarUrl":"http:\/\/static-resource.np.community.playstation.net\/avatar_xl\/WWS_E\/E0012_XL.png","firstName":"","lastName":"","pictureUrl":"https:\/\/image.api.np.km.playstation.net\/images\/?format=png&w=440&h=440&image=https%3A%2F%2Fkfscdn.api.np.km.playstation.net%2F00000000000008%2F000000000000003.png&sign=blablabla019501","trophySummary":"{\"level\":1,\"progress\":0,\"earnedTrophies\":{\"platinum\":0,\"gold\":0,\"silver\":0,\"bronze\":0}}","isOfficiallyVerified":"true"}"#;

/// Build a complete `.xavatar` archive from a raw image payload.
///
/// Renders the master PNG and all DDS variants, then packages them into
/// the ZIP container. With `activated` set, the profile mirror set and
/// metadata stub are included.
pub fn build(payload: &[u8], activated: bool) -> Result<Vec<u8>> {
    let textures = texture::render(payload)?;
    pack(&textures, activated)
}

/// Package rendered textures into the `.xavatar` ZIP container.
pub fn pack(textures: &AvatarTextures, activated: bool) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new();

    writer.add_file("avatar.png", &textures.png)?;
    for variant in &textures.variants {
        writer.add_file(&format!("avatar{}.dds", variant.size), &variant.dds)?;
    }

    if activated {
        writer.add_file("picture.png", &textures.png)?;
        for variant in &textures.variants {
            writer.add_file(&format!("picture{}.dds", variant.size), &variant.dds)?;
        }
        writer.add_file("online.json", ONLINE_JSON.as_bytes())?;
    }

    writer.finish()
}

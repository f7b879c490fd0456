use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use color_realm_core::Cue;
use tracing::{debug, warn};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;
const CUE_KEYS: [AssetKey; 3] = [
    AssetKey::CueCorrect,
    AssetKey::CueIncorrect,
    AssetKey::CueComplete,
];

/// Named entries an asset manifest may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// Image drawn behind the completion banner.
    Background,
    /// Sound played when a color puzzle is matched.
    CueCorrect,
    /// Sound played when a color change misses the target.
    CueIncorrect,
    /// Sound played when a time puzzle is cleared.
    CueComplete,
}

impl AssetKey {
    const fn cue(self) -> Option<Cue> {
        match self {
            Self::Background => None,
            Self::CueCorrect => Some(Cue::Correct),
            Self::CueIncorrect => Some(Cue::Incorrect),
            Self::CueComplete => Some(Cue::Complete),
        }
    }
}

/// Background image decoded into tightly packed RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundImage {
    width: u16,
    height: u16,
    rgba: Vec<u8>,
}

impl BackgroundImage {
    /// Decodes an encoded image, rejecting data the decoder cannot read.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .context("failed to decode background image")?
            .into_rgba8();
        let (width, height) = image.dimensions();
        let width = u16::try_from(width)
            .with_context(|| format!("background image width {width} is too large"))?;
        let height = u16::try_from(height)
            .with_context(|| format!("background image height {height} is too large"))?;
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Row-major RGBA8 pixel data.
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Assets read and decoded from disk before the window exists.
///
/// The background image is mandatory. Cue sounds are all-or-nothing: if any
/// of them cannot be read, the bundle carries no sounds at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetBundle {
    background: BackgroundImage,
    cues: Option<HashMap<Cue, Vec<u8>>>,
}

impl AssetBundle {
    /// Loads the assets listed by the manifest located at the provided path.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, |path| {
            fs::read(path).with_context(|| format!("failed to read asset at {}", path.display()))
        })
    }

    /// Decoded background image.
    #[must_use]
    pub fn background(&self) -> &BackgroundImage {
        &self.background
    }

    /// Encoded cue sounds, or `None` when audio cues are disabled.
    #[must_use]
    pub fn cues(&self) -> Option<&HashMap<Cue, Vec<u8>>> {
        self.cues.as_ref()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(&Path) -> Result<Vec<u8>>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read asset manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    fn from_entries(
        mut entries: HashMap<AssetKey, PathBuf>,
        loader: &mut impl FnMut(&Path) -> Result<Vec<u8>>,
    ) -> Result<Self> {
        let Some(background_path) = entries.remove(&AssetKey::Background) else {
            bail!("asset manifest missing entry for {:?}", AssetKey::Background);
        };
        let background = loader(&background_path)
            .and_then(|bytes| BackgroundImage::decode(&bytes))
            .with_context(|| {
                format!(
                    "failed to load background image from {}",
                    background_path.display()
                )
            })?;
        debug!(
            width = background.width(),
            height = background.height(),
            "background image decoded"
        );

        let cues = load_cues(&entries, loader);
        Ok(Self { background, cues })
    }
}

fn load_cues(
    entries: &HashMap<AssetKey, PathBuf>,
    loader: &mut impl FnMut(&Path) -> Result<Vec<u8>>,
) -> Option<HashMap<Cue, Vec<u8>>> {
    let mut cues = HashMap::with_capacity(CUE_KEYS.len());
    for key in CUE_KEYS {
        let Some(path) = entries.get(&key) else {
            warn!("asset manifest has no {key:?} entry; audio cues disabled");
            return None;
        };
        let Some(cue) = key.cue() else {
            continue;
        };
        match loader(path) {
            Ok(bytes) => {
                let _ = cues.insert(cue, bytes);
            }
            Err(error) => {
                warn!("sound files not found ({error:#}); the game will run without sound effects");
                return None;
            }
        }
    }
    Some(cues)
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    assets: HashMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<HashMap<AssetKey, PathBuf>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse asset manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported asset manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::with_capacity(manifest.assets.len());
    for (name, relative_path) in manifest.assets {
        let key = parse_asset_key(&name)
            .with_context(|| format!("unknown asset key `{name}` in manifest"))?;
        if resolved.insert(key, base_path.join(relative_path)).is_some() {
            bail!("asset manifest contains duplicate entry for {key:?}");
        }
    }
    Ok(resolved)
}

fn parse_asset_key(name: &str) -> Result<AssetKey> {
    match name {
        "Background" => Ok(AssetKey::Background),
        "CueCorrect" => Ok(AssetKey::CueCorrect),
        "CueIncorrect" => Ok(AssetKey::CueIncorrect),
        "CueComplete" => Ok(AssetKey::CueComplete),
        _ => bail!("unknown asset key `{name}`"),
    }
}

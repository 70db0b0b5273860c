use anyhow::Context;
use hermes::BirthParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried for the registry when no explicit file is given,
/// from the workspace root and from inside `apps/<bin>`.
pub const REGISTRY_PATHS: [&str; 2] = ["configs/natals.toml", "../../configs/natals.toml"];

/// One `[[instrument]]` row of the registry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstrumentRecord {
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub birth_location: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub utc_offset: Option<String>,
}

impl InstrumentRecord {
    pub fn to_params(&self) -> BirthParams {
        BirthParams {
            instrument: self.name.clone(),
            birth_date: self.birth_date.clone(),
            birth_time: self.birth_time.clone(),
            birth_location: self.birth_location.clone(),
            lat: self.lat.clone(),
            lon: self.lon.clone(),
            utc_offset: self.utc_offset.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstrumentRegistry {
    #[serde(default, rename = "instrument")]
    pub instruments: Vec<InstrumentRecord>,
}

impl InstrumentRegistry {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let registry: InstrumentRegistry =
            toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse instrument registry: {e}"))?;
        for record in &registry.instruments {
            if record.name.trim().is_empty() {
                log::warn!("Instrument registry row without a name is never matched");
            }
        }
        Ok(registry)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read instrument registry {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid registry file {}", path.display()))
    }

    /// Case-insensitive lookup by instrument name.
    pub fn find(&self, name: &str) -> Option<&InstrumentRecord> {
        let wanted = name.trim();
        self.instruments
            .iter()
            .find(|r| r.name.trim().eq_ignore_ascii_case(wanted))
    }
}

/// Try the common relative paths for `configs/natals.toml`.
///
/// `Ok(None)` when none of them exists.
pub fn read_registry_toml_text() -> anyhow::Result<Option<(PathBuf, String)>> {
    for p in &REGISTRY_PATHS {
        let path = PathBuf::from(p);
        if !path.exists() {
            continue;
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Could not read instrument registry {}", path.display()))?;
        return Ok(Some((path, text)));
    }
    Ok(None)
}

/// Registry from an explicit file, or from the default locations.
///
/// An explicit file must exist; a missing default registry yields `None`.
pub fn load_registry(explicit: Option<&Path>) -> anyhow::Result<Option<InstrumentRegistry>> {
    if let Some(path) = explicit {
        return InstrumentRegistry::load(path).map(Some);
    }
    match read_registry_toml_text()? {
        Some((path, text)) => {
            log::debug!("Using instrument registry {}", path.display());
            InstrumentRegistry::parse(&text)
                .with_context(|| format!("Invalid registry file {}", path.display()))
                .map(Some)
        }
        None => Ok(None),
    }
}

/// Birth parameters registered for `name`, if any.
pub fn load_instrument(name: &str, explicit: Option<&Path>) -> anyhow::Result<Option<BirthParams>> {
    let Some(registry) = load_registry(explicit)? else {
        log::debug!("No instrument registry found in {:?}", REGISTRY_PATHS);
        return Ok(None);
    };
    Ok(registry.find(name).map(InstrumentRecord::to_params))
}

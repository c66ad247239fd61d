use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Format, Json, Toml, Yaml};
use serde::Deserialize;
use squeeze_compress::{Endian, Instance, Level, Registry, Tuning, with_endian, with_level, with_lit_width};
use std::path::Path;

/// A level given by name in a profile.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NamedLevel {
    Default,
    Fastest,
    Best,
    HuffmanOnly,
    None,
}

/// A level as written in a profile: either a name or the codec's own number.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LevelSetting {
    Named(NamedLevel),
    Numeric(i32),
}

impl From<LevelSetting> for Level {
    fn from(setting: LevelSetting) -> Self {
        match setting {
            LevelSetting::Named(NamedLevel::Default) => Level::Default,
            LevelSetting::Named(NamedLevel::Fastest) => Level::Fastest,
            LevelSetting::Named(NamedLevel::Best) => Level::Best,
            LevelSetting::Named(NamedLevel::HuffmanOnly) => Level::HuffmanOnly,
            LevelSetting::Named(NamedLevel::None) => Level::NONE,
            LevelSetting::Numeric(n) => Level::Precise(n),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EndianSetting {
    Little,
    Big,
}

impl From<EndianSetting> for Endian {
    fn from(setting: EndianSetting) -> Self {
        match setting {
            EndianSetting::Little => Endian::Little,
            EndianSetting::Big => Endian::Big,
        }
    }
}

/// A named algorithm plus the settings to construct it with.
///
/// Settings left out of the profile keep the algorithm's defaults. Settings
/// the algorithm does not support are rejected at [`construct`](Self::construct)
/// time, not at load time, since which options exist depends on the registry.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub algorithm: String,
    #[serde(default)]
    pub level: Option<LevelSetting>,
    #[serde(default)]
    pub lit_width: Option<u8>,
    #[serde(default)]
    pub endian: Option<EndianSetting>,
}

impl Profile {
    /// Load a profile from a TOML, YAML or JSON file, picked by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
        let figment = match extension.as_deref() {
            Some("toml") => Figment::from(Toml::file_exact(path)),
            Some("yaml" | "yml") => Figment::from(Yaml::file_exact(path)),
            Some("json") => Figment::from(Json::file_exact(path)),
            _ => exn::bail!(ErrorKind::Load(format!("unrecognised profile format: {}", path.display()))),
        };
        let profile = Self::from_figment(figment)?;
        tracing::debug!(path = %path.display(), algorithm = %profile.algorithm, "Loaded compression profile");
        Ok(profile)
    }

    /// Extract a profile from an already assembled [`Figment`].
    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().or_raise(|| ErrorKind::Load("invalid compression profile".to_string()))
    }

    /// Settings in the order they are applied: level, literal width, endian.
    pub fn tunings(&self) -> Vec<Tuning> {
        let level = self.level.map(|level| with_level(Level::from(level)));
        let lit_width = self.lit_width.map(with_lit_width);
        let endian = self.endian.map(|endian| with_endian(endian.into()));
        [level, lit_width, endian].into_iter().flatten().collect()
    }

    /// Construct the configured algorithm from `registry`.
    pub fn construct(&self, registry: &Registry) -> Result<Instance> {
        registry.construct(&self.algorithm, self.tunings()).map_err(ErrorKind::compression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use squeeze_compress::TuningKind;
    use squeeze_compress::error::ErrorKind as CompressionErrorKind;
    use std::io::Write;

    fn from_toml(toml: &str) -> Result<Profile> {
        Profile::from_figment(Figment::from(Toml::string(toml)))
    }

    #[rstest]
    #[case("level = 9", Level::Precise(9))]
    #[case("level = 0", Level::Precise(0))]
    #[case("level = \"best\"", Level::Best)]
    #[case("level = \"huffman-only\"", Level::HuffmanOnly)]
    #[case("level = \"none\"", Level::NONE)]
    fn test_level_settings(#[case] line: &str, #[case] expected: Level) {
        let profile = from_toml(&format!("algorithm = \"gzip\"\n{line}")).unwrap();
        assert_eq!(profile.tunings(), vec![with_level(expected)]);
    }

    #[test]
    fn test_tunings_order() {
        let profile = from_toml("endian = \"big\"\nlit_width = 6\nalgorithm = \"lzw\"\nlevel = 3").unwrap();
        let kinds: Vec<_> = profile.tunings().iter().map(Tuning::kind).collect();
        assert_eq!(kinds, vec![TuningKind::Level, TuningKind::LitWidth, TuningKind::Endian]);
    }

    #[test]
    fn test_defaults_only() {
        let profile = from_toml("algorithm = \"bzip2\"").unwrap();
        assert!(profile.tunings().is_empty());
        let instance = profile.construct(&Registry::with_defaults()).unwrap();
        assert_eq!(instance.name(), "bzip2");
    }

    #[rstest]
    #[case("level = 9")]
    #[case("algorithm = \"gzip\"\nlevel = \"loudest\"")]
    #[case("algorithm = \"lzw\"\nendian = \"middle\"")]
    #[case("algorithm = \"lzw\"\nlit_width = 300")]
    #[case("algorithm = \"gzip\"\ncolour = \"blue\"")]
    fn test_invalid_profiles(#[case] toml: &str) {
        let err = from_toml(toml).unwrap_err();
        assert!(matches!(*err, ErrorKind::Load(_)), "{err:?}");
    }

    #[test]
    fn test_construct_rejections() {
        let registry = Registry::with_defaults();

        let err = from_toml("algorithm = \"gzip\"\nlit_width = 7").unwrap().construct(&registry).unwrap_err();
        assert!(matches!(
            &*err,
            ErrorKind::Compression(CompressionErrorKind::UnsupportedOption { option: TuningKind::LitWidth, .. })
        ));

        let err = from_toml("algorithm = \"rot13\"").unwrap().construct(&registry).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Compression(CompressionErrorKind::Unregistered(_))));

        let err = from_toml("algorithm = \"gzip\"\nlevel = 12").unwrap().construct(&registry).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Compression(CompressionErrorKind::Config(_))));
    }

    #[rstest]
    #[case("profile.toml", "algorithm = \"lzw\"\nlit_width = 7\nendian = \"big\"\n")]
    #[case("profile.yaml", "algorithm: lzw\nlit_width: 7\nendian: big\n")]
    #[case("profile.yml", "algorithm: lzw\nlit_width: 7\nendian: big\n")]
    #[case("profile.json", r#"{"algorithm": "lzw", "lit_width": 7, "endian": "big"}"#)]
    fn test_load_file(#[case] file_name: &str, #[case] contents: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(file_name);
        std::fs::File::create(&path).unwrap().write_all(contents.as_bytes()).unwrap();

        let profile = Profile::load(&path).unwrap();
        assert_eq!(
            profile,
            Profile {
                algorithm: "lzw".to_string(),
                level: None,
                lit_width: Some(7),
                endian: Some(EndianSetting::Big),
            }
        );
        let lzw = profile.construct(&Registry::with_defaults()).unwrap();
        let compressed = lzw.encode(b"TOBEORNOTTOBEORTOBEORNOT").unwrap();
        assert_eq!(lzw.decode(&compressed).unwrap(), b"TOBEORNOTTOBEORTOBEORNOT");
    }

    #[rstest]
    #[case("profile.ini")]
    #[case("profile")]
    #[case("missing.toml")]
    fn test_load_failures(#[case] file_name: &str) {
        let dir = tempfile::tempdir().unwrap();
        let err = Profile::load(dir.path().join(file_name)).unwrap_err();
        assert!(matches!(*err, ErrorKind::Load(_)), "{err:?}");
    }
}

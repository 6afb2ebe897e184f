use std::ffi::OsStr;

use stunner_gateway_model::BoxError;

/// A serialization format snapshot files can be written in, recognized by file extension.
pub trait ConfigFormat {
    fn extension(&self) -> &OsStr;
    fn de<T: serde::de::DeserializeOwned>(&self, slice: &[u8]) -> Result<T, BoxError>;
    fn ser<T: serde::Serialize>(&self, t: &T) -> Result<Vec<u8>, BoxError>;
}

/// Formats known to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    /// Pick the format matching a file extension, case-insensitively.
    pub fn from_extension(extension: &OsStr) -> Option<Self> {
        let extension = extension.to_str()?;
        [SnapshotFormat::Json, SnapshotFormat::Toml].into_iter().find(|format| format.extension().eq_ignore_ascii_case(extension))
    }
}

impl ConfigFormat for SnapshotFormat {
    fn extension(&self) -> &OsStr {
        match self {
            SnapshotFormat::Json => OsStr::new("json"),
            SnapshotFormat::Toml => OsStr::new("toml"),
        }
    }
    fn de<T: serde::de::DeserializeOwned>(&self, slice: &[u8]) -> Result<T, BoxError> {
        match self {
            SnapshotFormat::Json => Ok(serde_json::from_slice(slice)?),
            SnapshotFormat::Toml => Ok(toml::from_str(std::str::from_utf8(slice)?)?),
        }
    }
    fn ser<T: serde::Serialize>(&self, t: &T) -> Result<Vec<u8>, BoxError> {
        match self {
            SnapshotFormat::Json => Ok(serde_json::to_vec_pretty(t)?),
            SnapshotFormat::Toml => Ok(toml::to_string_pretty(t)?.into_bytes()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use stunner_gateway_model::StunnerConfig;

    #[test]
    fn test_from_extension() {
        assert_eq!(SnapshotFormat::from_extension(OsStr::new("JSON")), Some(SnapshotFormat::Json));
        assert_eq!(SnapshotFormat::from_extension(OsStr::new("toml")), Some(SnapshotFormat::Toml));
        assert!(SnapshotFormat::from_extension(OsStr::new("yaml")).is_none());
    }

    #[test]
    fn test_toml_and_json_agree() {
        let config = StunnerConfig::default();
        let json = SnapshotFormat::Json;
        let toml = SnapshotFormat::Toml;
        let from_json: StunnerConfig = json.de(&json.ser(&config).expect("ser json")).expect("de json");
        let from_toml: StunnerConfig = toml.de(&toml.ser(&config).expect("ser toml")).expect("de toml");
        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_toml_rejects_invalid_utf8() {
        assert!(SnapshotFormat::Toml.de::<StunnerConfig>(&[0xff, 0xfe]).is_err());
    }
}

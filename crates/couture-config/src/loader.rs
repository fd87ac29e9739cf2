//! Configuration file loading and error types.

use std::{fs, path::Path};

use crate::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format")]
    UnsupportedFormat,
    #[error("validation: {0}")]
    Validation(String),
}

/// Load a config file, picking the parser from the extension.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    match path.extension().and_then(|s| s.to_str()).unwrap_or("") {
        "json" | "jsonc" => {
            let stripped = json_comments::StripComments::new(data.as_bytes());
            Ok(serde_json::from_reader(stripped)?)
        }
        "yaml" | "yml" => Ok(serde_yaml::from_str(&data)?),
        "toml" => Ok(toml::from_str(&data)?),
        _ => Err(ConfigError::UnsupportedFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn load_each_format() {
        let dir = tempfile::tempdir().unwrap();

        let jsonc = write(
            &dir,
            "couture.jsonc",
            r#"{
                // local workshop laptop
                "store": { "location": "memory:" }
            }"#,
        );
        assert_eq!(load_config(jsonc).unwrap().store.location, "memory:");

        let yaml = write(&dir, "couture.yml", "server:\n  listen: 0.0.0.0:4000\n");
        assert_eq!(load_config(yaml).unwrap().server.listen, "0.0.0.0:4000");

        let toml = write(&dir, "couture.toml", "[store]\nseed_on_start = true\n");
        assert!(load_config(toml).unwrap().store.seed_on_start);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let ini = write(&dir, "couture.ini", "listen=1");
        assert!(matches!(load_config(ini), Err(ConfigError::UnsupportedFormat)));
    }

    #[test]
    fn load_missing_file_is_io() {
        assert!(matches!(
            load_config("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}

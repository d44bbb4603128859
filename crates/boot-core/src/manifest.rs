//! Patching of the generated app manifest (manifest.json)

use crate::builders::Builder;
use crate::config::Configuration;
use crate::error::{BootError, Result};
use semver::VersionReq;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Builder entries for the enabled flags, merged in manifest order
pub fn builder_versions(config: &Configuration) -> Map<String, Value> {
    let mut versions = Map::new();
    for builder in Builder::MANIFEST_ORDER {
        if !config.is_enabled(builder) {
            continue;
        }
        for (key, version) in builder.manifest_entries() {
            versions.insert(key.to_string(), Value::String(version.to_string()));
        }
    }
    versions
}

/// Overwrite identity fields and overlay the builder map onto `manifest`.
/// Keys already in `builders` that no enabled flag touches are kept.
pub fn apply(manifest: &mut Value, config: &Configuration, path: &Path) -> Result<()> {
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| BootError::manifest(path, "top level is not a JSON object"))?;

    root.insert("name".into(), Value::from(config.app_slug()));
    root.insert("vendor".into(), Value::from(config.vendor()));
    root.insert("title".into(), Value::from(config.app_name()));

    let builders = root
        .entry("builders")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| BootError::manifest(path, "\"builders\" is not a JSON object"))?;

    for (key, version) in builder_versions(config) {
        if let Some(constraint) = version.as_str() {
            VersionReq::parse(constraint).map_err(|e| {
                BootError::manifest(path, format!("invalid version '{}' for {}: {}", constraint, key, e))
            })?;
        }
        builders.insert(key, version);
    }

    Ok(())
}

/// Read the manifest at `path`, patch it, and write it back with 2-space indentation
pub async fn patch_manifest(path: &Path, config: &Configuration) -> Result<Value> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| BootError::io("Failed to read", path, e))?;
    let mut manifest: Value =
        serde_json::from_str(&content).map_err(|e| BootError::manifest(path, e))?;

    apply(&mut manifest, config, path)?;

    let mut output =
        serde_json::to_string_pretty(&manifest).map_err(|e| BootError::manifest(path, e))?;
    output.push('\n');
    fs::write(path, output)
        .await
        .map_err(|e| BootError::io("Failed to write", path, e))?;

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationInput;
    use serde_json::json;

    fn config(builders: &[Builder]) -> Configuration {
        Configuration::resolve(ConfigurationInput {
            name: Some("My App".to_string()),
            vendor: Some("acme".to_string()),
            builders: builders.iter().copied().collect(),
        })
        .unwrap()
    }

    fn keys(map: &Map<String, Value>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_single_builder() {
        let versions = builder_versions(&config(&[Builder::Node]));
        assert_eq!(Value::Object(versions), json!({"node": "7.x"}));
    }

    #[test]
    fn test_admin_brings_react() {
        let versions = builder_versions(&config(&[Builder::Admin]));
        assert_eq!(Value::Object(versions), json!({"admin": "0.x", "react": "3.x"}));
    }

    #[test]
    fn test_pixel_brings_react_and_store() {
        let versions = builder_versions(&config(&[Builder::Pixel]));
        assert_eq!(keys(&versions), vec!["pixel", "react", "store"]);
    }

    #[test]
    fn test_union_for_every_subset() {
        // 2^8 subsets: the map is exactly the union of the expansion table
        for mask in 0u32..(1 << Builder::ALL.len()) {
            let enabled: Vec<Builder> = Builder::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, b)| *b)
                .collect();
            if enabled.is_empty() {
                continue;
            }
            let versions = builder_versions(&config(&enabled));

            let mut expected = std::collections::BTreeMap::new();
            for b in &enabled {
                for (k, v) in b.manifest_entries() {
                    expected.insert(k.to_string(), v.to_string());
                }
            }
            let actual: std::collections::BTreeMap<String, String> = versions
                .iter()
                .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
                .collect();
            assert_eq!(actual, expected, "mask {:#b}", mask);
        }
    }

    #[test]
    fn test_every_table_version_is_a_valid_requirement() {
        for builder in Builder::ALL {
            for (key, version) in builder.manifest_entries() {
                assert!(VersionReq::parse(version).is_ok(), "{} -> {}", key, version);
            }
        }
    }

    #[test]
    fn test_apply_keeps_untouched_entries_and_fields() {
        let mut manifest = json!({
            "name": "",
            "vendor": "",
            "version": "0.0.1",
            "title": "",
            "builders": {"docs": "0.x", "react": "2.x"},
            "dependencies": {}
        });
        apply(&mut manifest, &config(&[Builder::Admin]), Path::new(MANIFEST_FILE)).unwrap();

        assert_eq!(manifest["name"], "my-app");
        assert_eq!(manifest["vendor"], "acme");
        assert_eq!(manifest["title"], "My App");
        assert_eq!(manifest["version"], "0.0.1");
        assert_eq!(
            manifest["builders"],
            json!({"docs": "0.x", "react": "3.x", "admin": "0.x"})
        );
    }

    #[test]
    fn test_apply_creates_missing_builders() {
        let mut manifest = json!({"name": "x"});
        apply(&mut manifest, &config(&[Builder::Messages]), Path::new(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest["builders"], json!({"messages": "1.x"}));
    }

    #[test]
    fn test_apply_rejects_wrong_shapes() {
        let path = Path::new(MANIFEST_FILE);
        let cfg = config(&[Builder::Node]);

        let mut not_object = json!(["name"]);
        assert!(matches!(
            apply(&mut not_object, &cfg, path),
            Err(BootError::Manifest { .. })
        ));

        let mut bad_builders = json!({"builders": ["node"]});
        assert!(matches!(
            apply(&mut bad_builders, &cfg, path),
            Err(BootError::Manifest { .. })
        ));
    }

    #[tokio::test]
    async fn test_patch_manifest_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(
            &path,
            r#"{"name":"","vendor":"","version":"0.0.1","title":"","builders":{"docs":"0.x"}}"#,
        )
        .unwrap();

        patch_manifest(&path, &config(&[Builder::Node])).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"name\": \"my-app\",\n  \"vendor\": \"acme\",\n  \"version\": \"0.0.1\",\n  \"title\": \"My App\",\n  \"builders\": {\n    \"docs\": \"0.x\",\n    \"node\": \"7.x\"\n  }\n}\n"
        );
    }

    #[tokio::test]
    async fn test_patch_manifest_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = patch_manifest(&path, &config(&[Builder::Node])).await.unwrap_err();
        assert!(matches!(err, BootError::Manifest { .. }));
    }

    #[tokio::test]
    async fn test_patch_manifest_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = patch_manifest(&dir.path().join(MANIFEST_FILE), &config(&[Builder::Node]))
            .await
            .unwrap_err();
        assert!(matches!(err, BootError::Io { .. }));
    }
}

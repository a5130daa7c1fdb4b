use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    info,
    warn,
};

use crate::core::FlashdeckError;

const APP_NAME: &str = "flashdeck";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), FlashdeckError> {
    save_json_at(data, &get_data_file_path(filename))
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    load_json_or_default_at(&get_data_file_path(filename))
}

fn save_json_at<T: Serialize>(data: &T, file_path: &Path) -> Result<(), FlashdeckError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    info!("Data saved to: {}", file_path.display());
    Ok(())
}

fn load_json_at<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, FlashdeckError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    info!("Data loaded from: {}", file_path.display());
    Ok(data)
}

fn load_json_or_default_at<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> T {
    match load_json_at::<T>(file_path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", file_path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::settings::SettingsData;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flashdeck-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_settings_survive_save_and_load() {
        let path = scratch_file("settings_roundtrip.json");
        let settings = SettingsData {
            document_id: "doc".to_string(),
            gemini_api_key: "key".to_string(),
            dark_mode: false,
            ..SettingsData::default()
        };

        save_json_at(&settings, &path).unwrap();
        let loaded: SettingsData = load_json_or_default_at(&path);

        assert_eq!(loaded, settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_env_api_key_stays_out_of_settings_file() {
        let path = scratch_file("settings_env_key.json");
        let settings =
            SettingsData::default().apply_overrides(None, Some("secret-from-env".to_string()));

        save_json_at(&settings, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("secret-from-env"));

        let loaded: SettingsData = load_json_or_default_at(&path);
        assert_eq!(loaded.api_key(), "");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let path = scratch_file("does_not_exist.json");
        let loaded: SettingsData = load_json_or_default_at(&path);
        assert_eq!(loaded, SettingsData::default());
    }

    #[test]
    fn test_corrupt_file_gives_default() {
        let path = scratch_file("corrupt.json");
        fs::write(&path, "{ not json").unwrap();

        let loaded: SettingsData = load_json_or_default_at(&path);

        assert_eq!(loaded, SettingsData::default());
        let _ = fs::remove_file(&path);
    }
}

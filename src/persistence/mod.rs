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

use crate::core::VocabError;

const APP_NAME: &str = "vocab-trainer";

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

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), VocabError> {
    save_json_to(data, &get_data_file_path(filename))
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> Result<T, VocabError> {
    load_json_from(&get_data_file_path(filename))
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

pub fn save_json_to<T: Serialize>(data: &T, file_path: &Path) -> Result<(), VocabError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    info!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json_from<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, VocabError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    info!("Data loaded from: {}", file_path.display());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn round_trips_and_defaults_when_missing() {
        let dir = std::env::temp_dir().join(format!("vocab-trainer-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.json");
        let _ = fs::remove_file(&path);

        let missing: HashMap<String, u32> = load_json_from(&path).unwrap();
        assert!(missing.is_empty());

        let data = HashMap::from([("page".to_string(), 3u32)]);
        save_json_to(&data, &path).unwrap();
        let loaded: HashMap<String, u32> = load_json_from(&path).unwrap();
        assert_eq!(loaded, data);

        fs::write(&path, "{ not json").unwrap();
        assert!(load_json_from::<HashMap<String, u32>>(&path).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}

use std::path::PathBuf;

use once_cell::sync::Lazy;

/// Directory holding everything the wallet persists on this device
pub static ROOT_DATA_DIR: Lazy<PathBuf> = Lazy::new(data_dir_init);

pub const DATABASE_FILE_NAME: &str = "paisa.db";

fn data_dir_init() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(std::env::temp_dir).join("paisa")
}

pub fn database_location() -> PathBuf {
    ROOT_DATA_DIR.join(DATABASE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_lives_in_root_data_dir() {
        let location = database_location();
        assert!(location.starts_with(&*ROOT_DATA_DIR));
        assert_eq!(location.file_name().and_then(|name| name.to_str()), Some(DATABASE_FILE_NAME));
    }
}

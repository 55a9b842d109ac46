use crate::Result;
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

pub fn default_output_dir() -> Result<PathBuf> {
    #[allow(deprecated)]
    let dir = std::env::home_dir()
        .ok_or("Home directory does not exist")?
        .join(".local/share/urban-roi");
    Ok(dir)
}

pub fn output_file_path(dir: &Path, file_name: &str) -> Result<PathBuf> {
    if !dir.exists() {
        create_dir_all(dir)?;
    }
    Ok(dir.join(file_name))
}

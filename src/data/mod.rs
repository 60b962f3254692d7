/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of downforce-lab.
 *
 * downforce-lab is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * downforce-lab is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with downforce-lab. If not, see <https://www.gnu.org/licenses/>.
 */


use std::path::{Path, PathBuf};
use directories::BaseDirs;
use tracing::{error, info};

use vehicle_catalog::VehicleCatalog;

const LOCAL_DATA_DIRNAME: &'static str = "DownforceLab";
const DEFAULT_CHART_DIRNAME: &'static str = "charts";
const DEFAULT_CATALOG_DIRNAME: &'static str = "vehicles";

#[cfg(target_os = "windows")]
fn backup_data_dir() -> PathBuf {
    let username = whoami::username();
    PathBuf::from_iter(["C:", "Users", &username, "AppData", "Local"])
}

#[cfg(not(target_os = "windows"))]
fn backup_data_dir() -> PathBuf {
    let username = whoami::username();
    PathBuf::from_iter(["/home", &username, ".local", "share"])
}

pub fn get_local_app_data_path() -> PathBuf {
    let mut local_data_root : PathBuf = match BaseDirs::new() {
        None => backup_data_dir(),
        Some(basedirs) => { basedirs.data_local_dir().to_path_buf() }
    };
    local_data_root.push(LOCAL_DATA_DIRNAME);
    local_data_root
}

pub fn get_default_output_path() -> PathBuf {
    let mut path = get_local_app_data_path();
    path.push(DEFAULT_CHART_DIRNAME);
    path
}

/// Directory searched for user catalog files layered on top of the builtin vehicles
pub fn get_default_catalog_path() -> PathBuf {
    let mut path = get_local_app_data_path();
    path.push(DEFAULT_CATALOG_DIRNAME);
    path
}

pub fn load_catalog(user_catalog_path: Option<&Path>) -> vehicle_catalog::Result<VehicleCatalog> {
    let catalog = VehicleCatalog::builtin_with_overrides(user_catalog_path).map_err(|e| {
        error!("Failed to load vehicle catalog. {}", e);
        e
    })?;
    info!("Vehicle catalog contains {} vehicles", catalog.len());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use crate::data::{get_default_catalog_path, get_default_output_path, load_catalog};

    #[test]
    fn default_paths_share_a_root() {
        let output = get_default_output_path();
        let catalog = get_default_catalog_path();
        assert_eq!(output.parent(), catalog.parent());
        assert!(output.parent().unwrap().ends_with("DownforceLab"));
    }

    #[test]
    fn builtin_catalog_without_user_files() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.get("bugatti_chiron").is_some());
    }
}

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


mod error;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use serde::Deserialize;
use tracing::{info, warn};

use aero_model::VehicleSpec;
pub use error::{CatalogError, Result};

const BUILTIN_CATALOG: &'static str = include_str!("../data/vehicles.toml");
pub const CATALOG_FILE_SUFFIX: &'static str = "toml";

/// Resolve a vehicle identifier to its physical description
pub trait VehicleLookup {
    fn lookup(&self, key: &str) -> Option<&VehicleSpec>;

    fn require(&self, key: &str) -> Result<&VehicleSpec> {
        self.lookup(key).ok_or_else(|| CatalogError::UnknownVehicle(key.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    vehicles: BTreeMap<String, VehicleSpec>
}

/// Read-only table of vehicles keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct VehicleCatalog {
    vehicles: BTreeMap<String, VehicleSpec>
}

impl VehicleCatalog {
    /// The vehicles that ship with the application
    pub fn builtin() -> Result<VehicleCatalog> {
        VehicleCatalog::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog document of the form
    /// ```toml
    /// [vehicles.some_key]
    /// name = "Some car"
    /// mass_kg = 1200.0
    /// ```
    /// Entries with negative or non-finite values are rejected. Missing values are kept,
    /// those vehicles just won't simulate.
    pub fn from_toml_str(data: &str) -> Result<VehicleCatalog> {
        let file: CatalogFile = toml::from_str(data)?;
        for (key, spec) in file.vehicles.iter() {
            spec.check_physical().map_err(|e| CatalogError::InvalidEntry(key.clone(), e))?;
        }
        let mut vehicles = file.vehicles;
        for (key, spec) in vehicles.iter_mut() {
            if spec.name.is_empty() {
                spec.name = key.clone();
            }
        }
        Ok(VehicleCatalog { vehicles })
    }

    pub fn load_from_path(path: &Path) -> Result<VehicleCatalog> {
        let data = fs::read_to_string(path).map_err(|e| CatalogError::Io(path.display().to_string(), e))?;
        VehicleCatalog::from_toml_str(&data)
    }

    /// Add the entries of `other` to this catalog. Entries in `other` replace any
    /// existing entry with the same key.
    pub fn extend_from(&mut self, other: VehicleCatalog) {
        for (key, spec) in other.vehicles.into_iter() {
            if let Some(previous) = self.vehicles.insert(key.clone(), spec) {
                info!("Catalog entry {} ({}) overridden", key, previous.name);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&VehicleSpec> {
        self.vehicles.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item=(&String, &VehicleSpec)> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Builtin vehicles layered with every catalog file found at `path`. `path` may be a single
    /// file or a directory of `.toml` files. Files that fail to load are skipped with a warning.
    pub fn builtin_with_overrides(path: Option<&Path>) -> Result<VehicleCatalog> {
        let mut catalog = VehicleCatalog::builtin()?;
        let path = match path {
            None => return Ok(catalog),
            Some(p) => p
        };
        let files = if path.is_dir() {
            utils::filesystem::get_filetypes_in_path(path, CATALOG_FILE_SUFFIX)
                .map_err(|e| CatalogError::Io(path.display().to_string(), e))?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            info!("No user catalog at {}", path.display());
            Vec::new()
        };
        for file in files {
            match VehicleCatalog::load_from_path(&file) {
                Ok(user_catalog) => {
                    info!("Loaded {} vehicles from {}", user_catalog.len(), file.display());
                    catalog.extend_from(user_catalog)
                }
                Err(e) => warn!("Skipping catalog {}. {}", file.display(), e)
            }
        }
        Ok(catalog)
    }
}

impl VehicleLookup for VehicleCatalog {
    fn lookup(&self, key: &str) -> Option<&VehicleSpec> {
        self.get(key)
    }
}

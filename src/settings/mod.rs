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


use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlobalSettings {
    output_path: String,
    catalog_path: String,
    default_target_speed_kmh: f64,
    chart_width: u32,
    chart_height: u32
}

impl GlobalSettings {
    const OUTPUT_PATH: &'static str = "output_path";
    const CATALOG_PATH: &'static str = "catalog_path";
    const DEFAULT_TARGET_SPEED: &'static str = "default_target_speed_kmh";
    const CHART_WIDTH: &'static str = "chart_width";
    const CHART_HEIGHT: &'static str = "chart_height";
    const CONFIG_FILENAME: &'static str = "downforce-lab-conf";
    const ENV_PREFIX: &'static str = "DOWNFORCE";

    pub const DEFAULT_TARGET_SPEED_KMH: f64 = 300.0;
    pub const DEFAULT_CHART_WIDTH: u32 = 1024;
    pub const DEFAULT_CHART_HEIGHT: u32 = 768;

    pub fn default() -> Self {
        GlobalSettings {
            output_path: crate::data::get_default_output_path().to_string_lossy().into_owned(),
            catalog_path: crate::data::get_default_catalog_path().to_string_lossy().into_owned(),
            default_target_speed_kmh: GlobalSettings::DEFAULT_TARGET_SPEED_KMH,
            chart_width: GlobalSettings::DEFAULT_CHART_WIDTH,
            chart_height: GlobalSettings::DEFAULT_CHART_HEIGHT
        }
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default(GlobalSettings::OUTPUT_PATH, crate::data::get_default_output_path().to_string_lossy().into_owned())?
            .set_default(GlobalSettings::CATALOG_PATH, crate::data::get_default_catalog_path().to_string_lossy().into_owned())?
            .set_default(GlobalSettings::DEFAULT_TARGET_SPEED, GlobalSettings::DEFAULT_TARGET_SPEED_KMH)?
            .set_default(GlobalSettings::CHART_WIDTH, GlobalSettings::DEFAULT_CHART_WIDTH as i64)?
            .set_default(GlobalSettings::CHART_HEIGHT, GlobalSettings::DEFAULT_CHART_HEIGHT as i64)
    }

    pub fn load() -> Result<Self, ConfigError> {
        return match GlobalSettings::builder_with_defaults()?
            .add_source(config::File::with_name(GlobalSettings::CONFIG_FILENAME))
            .add_source(config::Environment::with_prefix(GlobalSettings::ENV_PREFIX))
            .build() {
            Ok(settings) => {
                settings.try_deserialize()
            }
            Err(e) => {
                warn!("Failed to load settings. {}", e.to_string());
                let settings = GlobalSettings::builder_with_defaults()?
                    .add_source(config::Environment::with_prefix(GlobalSettings::ENV_PREFIX))
                    .build()?;
                let ret: GlobalSettings = settings.try_deserialize()?;
                ret.write().unwrap_or_else(|e| { error!("Failed to write settings. {}", e.to_string())});
                Ok(ret)
            }
        }
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_path)
    }

    pub fn set_output_path(&mut self, new_path: &Path) {
        self.output_path = new_path.to_string_lossy().into_owned();
    }

    /// The user catalog location, if one has been configured
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if self.catalog_path.is_empty() {
            return None;
        }
        Some(PathBuf::from(&self.catalog_path))
    }

    pub fn set_catalog_path(&mut self, new_path: &Path) {
        self.catalog_path = new_path.to_string_lossy().into_owned();
    }

    pub fn default_target_speed_kmh(&self) -> f64 {
        self.default_target_speed_kmh
    }

    pub fn chart_size(&self) -> (u32, u32) {
        (self.chart_width.max(1), self.chart_height.max(1))
    }

    pub fn write(&self) -> std::io::Result<()> {
        fs::write(format!("{}.toml", GlobalSettings::CONFIG_FILENAME), toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })?)
    }
}

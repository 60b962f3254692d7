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


use std::{io, result};

pub type Result<T> = result::Result<T, CatalogError>;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("io error reading `{0}`. {1}")]
    Io(String, #[source] io::Error),
    #[error("catalog decode error. {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("invalid catalog entry `{0}`. {1}")]
    InvalidEntry(String, aero_model::ModelError),
    #[error("unknown vehicle `{0}`")]
    UnknownVehicle(String)
}

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


use std::result;

pub type Result<T> = result::Result<T, ModelError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("missing vehicle data `{0}`")]
    MissingField(&'static str),
    #[error("invalid vehicle data `{0}`. `{1}`")]
    InvalidField(&'static str, f64),
    #[error("invalid target speed `{0}` km/h")]
    InvalidTarget(f64)
}

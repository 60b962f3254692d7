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


use std::{fs, io};
use std::path::{Path, PathBuf};

/// List the files directly inside `path` with the extension `file_type`, sorted by path so
/// that callers layering the results get a stable order
pub fn get_filetypes_in_path(path: &Path, file_type: &str) -> io::Result<Vec<PathBuf>> {
    let dir_entries = fs::read_dir(path)?;
    let mut found: Vec<PathBuf> = dir_entries.filter_map(|e| {
        match e {
            Ok(dir_entry) => {
                let entry_path = dir_entry.path();
                if !entry_path.is_file() {
                    return None;
                }
                match entry_path.extension() {
                    Some(ext) if ext == file_type => Some(entry_path),
                    _ => None
                }
            },
            _ => None
        }
    }).collect();
    found.sort();
    Ok(found)
}

/// Takes a name and turns it into a safe filename in the provided path. The filename
/// will be "safe" in the sense that the returned filename will be free of any characters that
/// would be illegal to use in a filesystem path and also unique so as not to
/// override anything else in the provided path. Additionally, any spaces in the filename will
/// be replaced with underscores.
///
/// To provide uniqueness a number will be appended to the returned filename if the name would
/// clash with anything else in the provided path. i.e. if you have a file called test.png present
/// in the path then the next filename returned would be test2.png
///
pub fn create_safe_filename_in_path(path: &Path, name: &str, extension: &str) -> PathBuf {
    let sanitized_name = sanitize_filename::sanitize(name).replace(' ', "_");
    let mut file_path = path.join(format!("{}.{}", sanitized_name, extension));
    let mut extra_num = 2;
    while file_path.exists() {
        file_path = path.join(format!("{}{}.{}", sanitized_name, extra_num, extension));
        extra_num += 1;
    }
    file_path
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use crate::filesystem::{create_safe_filename_in_path, get_filetypes_in_path};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("downforce-lab-utils-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn safe_filenames_do_not_clobber() {
        let dir = scratch_dir("safe_filenames");
        let first = create_safe_filename_in_path(&dir, "F1 Williams FW11 (1986)", "png");
        assert_eq!(first, dir.join("F1_Williams_FW11_(1986).png"));
        fs::write(&first, b"x").unwrap();

        let second = create_safe_filename_in_path(&dir, "F1 Williams FW11 (1986)", "png");
        assert_eq!(second, dir.join("F1_Williams_FW11_(1986)2.png"));

        let slashed = create_safe_filename_in_path(&dir, "MP4/4", "png");
        assert!(!slashed.file_name().unwrap().to_string_lossy().contains('/'));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn filetypes_filtered_and_sorted() {
        let dir = scratch_dir("filetypes");
        fs::write(dir.join("b.toml"), b"").unwrap();
        fs::write(dir.join("a.toml"), b"").unwrap();
        fs::write(dir.join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.join("nested.toml")).unwrap();

        let found = get_filetypes_in_path(&dir, "toml").unwrap();
        assert_eq!(found, vec![dir.join("a.toml"), dir.join("b.toml")]);
        fs::remove_dir_all(&dir).unwrap();
    }
}

//! Level files on disk (RON).

use std::path::Path;

use polarcraft_world::Level;
use tracing::{debug, info};

use crate::builtin::find_builtin;
use crate::error::LevelError;

pub const LEVEL_FILE_EXTENSION: &str = "ron";

/// Reads a level from a RON file.
pub fn load_level_file(path: &Path) -> Result<Level, LevelError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LevelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let level: Level = ron::from_str(&contents).map_err(|source| LevelError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(level = %level.name, path = %path.display(), "loaded level file");
    Ok(level)
}

/// Writes `level` as pretty RON, creating parent directories as needed.
pub fn save_level_file(level: &Level, path: &Path) -> Result<(), LevelError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LevelError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .enumerate_arrays(false);
    let serialized = ron::ser::to_string_pretty(level, pretty).map_err(LevelError::Serialize)?;
    std::fs::write(path, serialized).map_err(|source| LevelError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(level = %level.name, path = %path.display(), "saved level file");
    Ok(())
}

/// Resolves a built-in level name, falling back to a file path.
pub fn resolve_level(name_or_path: &str) -> Result<Level, LevelError> {
    if let Some(level) = find_builtin(name_or_path) {
        return Ok(level);
    }
    let path = Path::new(name_or_path);
    if path.is_file() {
        return load_level_file(path);
    }
    Err(LevelError::Unknown(name_or_path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin_levels;

    #[test]
    fn test_level_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        for level in builtin_levels() {
            let path = dir
                .path()
                .join(&level.name)
                .with_extension(LEVEL_FILE_EXTENSION);
            save_level_file(&level, &path).unwrap();
            assert_eq!(load_level_file(&path).unwrap(), level);
        }
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/level.ron");
        let level = Level::new("empty", "");
        save_level_file(&level, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_level_file(&dir.path().join("nope.ron"));
        assert!(matches!(result, Err(LevelError::Read { .. })));
    }

    #[test]
    fn test_bad_ron_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ron");
        std::fs::write(&path, "(name: \"x\", blocks: [oops").unwrap();
        let result = load_level_file(&path);
        assert!(matches!(result, Err(LevelError::Parse { .. })));
    }

    #[test]
    fn test_hand_written_level_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hand.ron");
        std::fs::write(
            &path,
            r#"(
                name: "hand",
                blocks: [
                    (x: 0, y: 1, z: 0, block: emitter, state: Some((facing: Some(east), polarization: Some(90)))),
                    (x: 2, y: 1, z: 0, block: sensor),
                ],
                goal: (sensors: [(x: 2, y: 1, z: 0)]),
            )"#,
        )
        .unwrap();
        let level = load_level_file(&path).unwrap();
        assert_eq!(level.blocks.len(), 2);
        assert!(level.solution.is_empty());
        assert_eq!(level.description, "");
    }

    #[test]
    fn test_resolve_prefers_builtin_then_file() {
        assert_eq!(resolve_level("waveplate").unwrap().name, "waveplate");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.ron");
        save_level_file(&Level::new("custom", "mine"), &path).unwrap();
        let path_str = path.to_str().unwrap();
        assert_eq!(resolve_level(path_str).unwrap().name, "custom");

        assert!(matches!(
            resolve_level("definitely-not-a-level"),
            Err(LevelError::Unknown(_))
        ));
    }
}

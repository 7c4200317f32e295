use std::fs;
use std::path::Path;

use super::AssetError;

/// Reads a UTF-8 text file in full.
///
/// A missing or unreadable path yields an error value; no partial content is
/// ever produced.
pub fn read_text(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a binary file in full.
pub fn read_binary(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn missing_path() -> PathBuf {
        std::env::temp_dir().join("blitbox-does-not-exist-9c1f/nope.txt")
    }

    #[test]
    fn read_text_missing_path_is_an_error() {
        let err = read_text(&missing_path()).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn read_binary_missing_path_is_an_error() {
        assert!(read_binary(&missing_path()).is_err());
    }

    #[test]
    fn read_text_round_trip() {
        let path = std::env::temp_dir().join(format!("blitbox-io-{}.txt", std::process::id()));
        fs::write(&path, "fn main() {}\n").unwrap();
        let text = read_text(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(text, "fn main() {}\n");
    }

    #[test]
    fn read_binary_round_trip() {
        let path = std::env::temp_dir().join(format!("blitbox-io-{}.bin", std::process::id()));
        fs::write(&path, [0u8, 1, 2, 255]).unwrap();
        let bytes = read_binary(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(bytes, vec![0, 1, 2, 255]);
    }
}

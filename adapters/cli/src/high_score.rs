//! Single-integer high-score file.

use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};

/// Reads the stored high score, treating a missing file as zero.
pub(crate) fn load(path: &Path) -> Result<u32> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(0),
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read high score at {}", path.display()))
        }
    };

    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .with_context(|| format!("high score file {} is not an integer", path.display()))
}

/// Writes `value` when it beats the stored score. Returns whether it did.
pub(crate) fn record(path: &Path, value: u32) -> Result<bool> {
    if value <= load(path)? {
        return Ok(false);
    }
    fs::write(path, format!("{value}\n"))
        .with_context(|| format!("failed to write high score to {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "garden-guardian-{}-{name}.score",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let path = scratch("missing");
        assert_eq!(load(&path).unwrap(), 0);
    }

    #[test]
    fn only_higher_scores_are_written() {
        let path = scratch("higher");

        assert!(record(&path, 120).unwrap());
        assert!(!record(&path, 90).unwrap());
        assert!(!record(&path, 120).unwrap());
        assert_eq!(load(&path).unwrap(), 120);

        assert!(record(&path, 130).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "130\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn garbage_is_reported() {
        let path = scratch("garbage");
        fs::write(&path, "lots").unwrap();

        let error = load(&path).unwrap_err();
        assert!(error.to_string().contains("is not an integer"));
        fs::remove_file(&path).unwrap();
    }
}

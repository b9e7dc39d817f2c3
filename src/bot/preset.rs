//! Presets are plain text files under a single directory, one system
//! instruction per line, named `<preset>.txt`.
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tokio::fs;

use super::error::{BotError, Result};
use super::rule::Rule;

const PRESET_EXT: &str = "txt";

// Lines this short or shorter are noise (stray bullets, numbering)
const MIN_LINE_CHARS: usize = 2;

static PRESET_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").expect("Invalid regex"));

/// Rejects anything that could escape the presets directory once
/// turned into a path.
pub fn validate_preset_name(name: &str) -> Result<()> {
    if name.contains("..") || !PRESET_NAME_RE.is_match(name) {
        return Err(BotError::InvalidPresetName(name.to_string()));
    }
    Ok(())
}

/// Turns the raw text of a preset into system rules. Lines are
/// trimmed and anything of `MIN_LINE_CHARS` characters or fewer is
/// dropped. Order is preserved.
pub fn parse_rules(text: &str) -> Vec<Rule> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .map(Rule::system)
        .collect()
}

/// Derives a preset name from a `Content-Disposition` header value
/// such as `attachment; filename="preset3.txt"`.
pub fn preset_name_from_content_disposition(header: &str) -> Result<String> {
    let value = header
        .split_once("filename=")
        .map(|(_, rest)| rest.trim_start())
        .ok_or_else(|| BotError::Download(format!("No filename in {}", header)))?;

    // A quoted value runs to the closing quote and may contain `;`
    let file_name = match value.strip_prefix('"') {
        Some(quoted) => quoted
            .split_once('"')
            .map(|(name, _)| name)
            .ok_or_else(|| BotError::Download(format!("Unterminated filename in {}", header)))?,
        None => value.split(';').next().unwrap_or_default().trim(),
    };

    // Only the final path component counts, whatever the uploader sent
    let file_name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .to_string();
    let name = file_name
        .strip_suffix(&format!(".{}", PRESET_EXT))
        .unwrap_or(&file_name)
        .to_string();

    validate_preset_name(&name)?;
    Ok(name)
}

#[derive(Clone, Debug)]
pub struct PresetStore {
    root: PathBuf,
}

impl PresetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_preset_name(name)?;
        Ok(self.root.join(format!("{}.{}", name, PRESET_EXT)))
    }

    fn not_found(name: &str, err: std::io::Error) -> BotError {
        if err.kind() == ErrorKind::NotFound {
            BotError::NotFound(name.to_string())
        } else {
            BotError::Io(err)
        }
    }

    /// Reads the preset from disk every time. There is no cache so
    /// edits to a preset file apply to the very next question.
    pub async fn load(&self, name: &str) -> Result<Vec<Rule>> {
        let text = self.inspect(name).await?;
        Ok(parse_rules(&text))
    }

    /// The raw, unfiltered contents of the preset.
    pub async fn inspect(&self, name: &str) -> Result<String> {
        let path = self.path_for(name)?;
        fs::read_to_string(&path)
            .await
            .map_err(|e| Self::not_found(name, e))
    }

    /// Names of all stored presets, sorted.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PRESET_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();

        Ok(names)
    }

    pub async fn remove(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| Self::not_found(name, e))?;
        tracing::info!("Removed preset {}", name);
        Ok(())
    }

    /// Writes (or overwrites) a preset. The contents are not
    /// validated, only the name is.
    pub async fn store(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.root).await?;
        fs::write(&path, bytes).await?;
        tracing::info!("Stored preset {} ({} bytes)", name, bytes.len());
        Ok(())
    }
}

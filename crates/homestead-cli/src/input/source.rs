use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

type InputResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Load the input document from `--input <path>`, or from piped stdin.
///
/// Returns `None` when no path is given and stdin is an interactive TTY
/// or empty.
pub fn read_document(path: Option<&str>) -> InputResult<Option<Value>> {
    match path {
        Some(path) => read_file(path).map(Some),
        None => read_piped_stdin(),
    }
}

/// Write a value as pretty JSON, creating or truncating the file.
pub fn write_json(path: &str, value: &Value) -> InputResult<()> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents).map_err(|e| format!("Failed to write '{}': {}", path, e))?;
    Ok(())
}

fn read_file(path: &str) -> InputResult<Value> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;

    parse_document(&contents, is_yaml(&resolved))
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e).into())
}

fn read_piped_stdin() -> InputResult<Option<Value>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Ok(None);
    }

    // Piped input has no extension to go by: JSON first, YAML otherwise
    let value = parse_document(&buffer, false).or_else(|_| parse_document(&buffer, true))?;
    Ok(Some(value))
}

fn parse_document(text: &str, yaml: bool) -> InputResult<Value> {
    if yaml {
        Ok(serde_yaml::from_str(text)?)
    } else {
        Ok(serde_json::from_str(text.trim())?)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve relative paths against the working directory and require an
/// existing regular file.
fn resolve_path(path: &str) -> InputResult<PathBuf> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        return Err(format!("Input file not found: {}", resolved.display()).into());
    }
    Ok(resolved)
}

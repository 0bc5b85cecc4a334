use crate::error::{ConvertError, ConvertResult};
use crate::types::{Dataset, OutputFormat};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Render a dataset to text.
///
/// JSON honours `indent`: `Some(n)` pretty-prints with n spaces per level,
/// `None` gives a single compact line. YAML ignores `indent`.
/// Non-ASCII text is written as-is, never escaped.
pub fn render(
    dataset: &Dataset,
    format: OutputFormat,
    indent: Option<usize>,
) -> ConvertResult<Vec<u8>> {
    match format {
        OutputFormat::Json => render_json(dataset, indent),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(dataset)?.into_bytes()),
    }
}

fn render_json(dataset: &Dataset, indent: Option<usize>) -> ConvertResult<Vec<u8>> {
    let Some(width) = indent else {
        return Ok(serde_json::to_vec(dataset)?);
    };

    let pad = vec![b' '; width];
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&pad));
    dataset.serialize(&mut ser)?;
    Ok(buf)
}

/// Derive the output path by swapping the input's extension
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

/// Write `contents` to `path`.
///
/// The bytes go to a uniquely named temp file in the target directory and
/// are persisted over `path` only once fully written, so `path` never holds
/// a half-written document.
pub fn write_output(path: &Path, contents: &[u8]) -> ConvertResult<()> {
    let write_err = |source: std::io::Error| ConvertError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HeaderRow;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> Dataset {
        let header = HeaderRow::from_cells(vec![Some("Name".to_string()), Some("Age".to_string())]);
        vec![
            header.zip_row(vec![json!("Ada"), json!(36)]),
            header.zip_row(vec![json!("Zoë"), json!("")]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_compact_is_single_line() {
        let out = String::from_utf8(render(&sample(), OutputFormat::Json, None).unwrap()).unwrap();
        assert_eq!(out, r#"[{"Name":"Ada","Age":36},{"Name":"Zoë","Age":""}]"#);
    }

    #[test]
    fn test_render_indent_width() {
        let out = String::from_utf8(render(&sample(), OutputFormat::Json, Some(2)).unwrap()).unwrap();
        assert!(out.starts_with("[\n  {\n    \"Name\": \"Ada\""));
    }

    #[test]
    fn test_render_default_indent_four() {
        let out = String::from_utf8(render(&sample(), OutputFormat::Json, Some(4)).unwrap()).unwrap();
        assert!(out.contains("\n        \"Age\": 36\n"));
    }

    #[test]
    fn test_render_zero_indent_keeps_newlines() {
        let out = String::from_utf8(render(&sample(), OutputFormat::Json, Some(0)).unwrap()).unwrap();
        assert!(out.starts_with("[\n{\n\"Name\": \"Ada\""));
    }

    #[test]
    fn test_render_keeps_non_ascii() {
        let out = String::from_utf8(render(&sample(), OutputFormat::Json, Some(4)).unwrap()).unwrap();
        assert!(out.contains("Zoë"));
        assert!(!out.contains("\\u"));
    }

    #[test]
    fn test_render_yaml_keeps_key_order() {
        let out = String::from_utf8(render(&sample(), OutputFormat::Yaml, Some(4)).unwrap()).unwrap();
        assert!(out.starts_with("- Name: Ada\n  Age: 36\n"));
    }

    #[test]
    fn test_render_empty_dataset() {
        let out = render(&Dataset::default(), OutputFormat::Json, Some(4)).unwrap();
        assert_eq!(out, b"[]");
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("dir/people.xlsx"), OutputFormat::Json),
            PathBuf::from("dir/people.json")
        );
        assert_eq!(
            default_output_path(Path::new("people"), OutputFormat::Yaml),
            PathBuf::from("people.yaml")
        );
    }

    #[test]
    fn test_write_output_replaces_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        fs::write(&path, "old").unwrap();

        write_output(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        // Only the target is left behind
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_output_keeps_neighbouring_tmp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        let neighbour = temp_dir.path().join(".out.json.tmp");
        fs::write(&neighbour, "user data").unwrap();

        write_output(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(fs::read_to_string(&neighbour).unwrap(), "user data");
    }

    #[test]
    fn test_write_output_ignores_tmp_named_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        fs::create_dir(temp_dir.path().join(".out.json.tmp")).unwrap();

        write_output(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(temp_dir.path().join(".out.json.tmp").is_dir());
    }

    #[test]
    fn test_write_output_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.json");

        let err = write_output(&path, b"[]").unwrap_err();
        assert!(matches!(err, ConvertError::OutputWrite { .. }));
        assert!(!path.exists());
    }
}

mod entity;
mod error;
mod nodes;
mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use entity::{build_entities, TranslationEntity};
pub use error::ConvertError;
pub use nodes::{parse_translation_nodes, TranslationNode, TranslationNodeSet};
pub use report::{report_success, report_usage};

static INIT: Once = Once::new();

/// Logs go to stderr at WARN unless `RUST_LOG` says otherwise.
/// Leaves an already installed global subscriber in place.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
    });
}

/// Input and output paths of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub output: PathBuf,
}

pub fn read_input(path: &Path) -> Result<Vec<u8>, ConvertError> {
    fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Single-line JSON array, no trailing newline.
pub fn serialize(entities: &[TranslationEntity]) -> Result<String, ConvertError> {
    Ok(serde_json::to_string(entities)?)
}

pub fn write_output(path: &Path, json: &str) -> Result<(), ConvertError> {
    fs::write(path, json).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Converts XLIFF content to JSON text, returning it with the number of entries.
pub fn convert_bytes(xml: &[u8]) -> Result<(String, usize), ConvertError> {
    let nodes = parse_translation_nodes(xml)?;
    let entities = build_entities(&nodes)?;
    let json = serialize(&entities)?;
    Ok((json, entities.len()))
}

/// Nothing is written unless the whole conversion succeeds.
pub fn convert_file(args: &ConvertArgs) -> Result<usize, ConvertError> {
    info!("Converting {:?} to {:?}", args.input, args.output);

    let xml = read_input(&args.input)?;
    debug!("Read {} bytes", xml.len());

    let (json, count) = convert_bytes(&xml)?;
    write_output(&args.output, &json)?;

    info!("Wrote {} translations to {:?}", count, args.output);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_single_pair() {
        let (json, count) =
            convert_bytes(b"<xliff><source>Hello</source><target>Bonjour</target></xliff>")
                .unwrap();
        assert_eq!(json, r#"[{"source":"Hello","target":"Bonjour"}]"#);
        assert_eq!(count, 1);
    }

    #[test]
    fn no_pairs_is_empty_array() {
        let (json, count) = convert_bytes(b"<xliff><file><body/></file></xliff>").unwrap();
        assert_eq!(json, "[]");
        assert_eq!(count, 0);
    }

    #[test]
    fn escapes_json_strings() {
        let xml = "<x><source>Say &quot;hi&quot;\n\\</source><target>Dis « salut »</target></x>";
        let (json, _) = convert_bytes(xml.as_bytes()).unwrap();
        assert_eq!(
            json,
            r#"[{"source":"Say \"hi\"\n\\","target":"Dis « salut »"}]"#
        );
    }

    #[test]
    fn output_length_matches_source_count() {
        let xml = b"<x><u><source>a</source><target>1</target></u>\
                    <u><source>b</source><target>2</target></u>\
                    <u><source/><target>3</target></u></x>";
        let (json, _) = convert_bytes(xml).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[2]["source"], "");
        assert_eq!(array[2]["target"], "3");
    }

    #[test]
    fn mismatch_leaves_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.xliff");
        let output = dir.path().join("out.json");
        fs::write(&input, "<x><source>a</source><source>b</source><target>1</target></x>").unwrap();

        let err = convert_file(&ConvertArgs {
            input,
            output: output.clone(),
        })
        .unwrap_err();
        assert!(matches!(err, ConvertError::MissingTarget { index: 1, .. }));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(&ConvertArgs {
            input: dir.path().join("nope.xliff"),
            output: dir.path().join("out.json"),
        })
        .unwrap_err();
        assert!(matches!(err, ConvertError::Read { .. }));
    }

    #[test]
    fn unwritable_output_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.xliff");
        fs::write(&input, "<x/>").unwrap();
        let err = convert_file(&ConvertArgs {
            input,
            output: dir.path().join("missing-dir").join("out.json"),
        })
        .unwrap_err();
        assert!(matches!(err, ConvertError::Write { .. }));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.xliff");
        let output = dir.path().join("out.json");
        fs::write(&input, "<x><source>a</source><target>b</target></x>").unwrap();
        let args = ConvertArgs { input, output };

        convert_file(&args).unwrap();
        let first = fs::read(&args.output).unwrap();
        convert_file(&args).unwrap();
        let second = fs::read(&args.output).unwrap();
        assert_eq!(first, second);
    }
}

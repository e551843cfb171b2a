use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use magicparse_core::{Category, ParseResult, Registry, Schema, SchemaConfig};

/// Reads a schema configuration, choosing the format by file extension.
///
/// `.toml` files are read as TOML; everything else as JSON.
pub fn load_schema_config(path: &Path) -> Result<SchemaConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read schema {}", path.display()))?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config = if is_toml {
        toml::from_str(&text).with_context(|| format!("parse TOML schema {}", path.display()))?
    } else {
        SchemaConfig::from_json(&text)
            .with_context(|| format!("parse JSON schema {}", path.display()))?
    };
    Ok(config)
}

/// Loads and builds a schema against the process-wide registry.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let config = load_schema_config(path)?;
    let schema =
        Schema::build(&config).with_context(|| format!("build schema {}", path.display()))?;
    debug!(
        schema = %path.display(),
        file_type = schema.file_type(),
        fields = schema.fields().len(),
        "loaded schema"
    );
    Ok(schema)
}

pub fn parse_file(schema: &Schema, input: &Path) -> Result<ParseResult> {
    let span = info_span!("parse_file", input = %input.display());
    let _guard = span.enter();

    if input.is_dir() {
        bail!("{} is a directory", input.display());
    }
    let bytes = fs::read(input).with_context(|| format!("read input {}", input.display()))?;

    let start = Instant::now();
    let result = schema.parse(&bytes);
    info!(
        rows = result.rows.len(),
        errors = result.errors.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "parsed file"
    );
    Ok(result)
}

/// Registered names per transform category, in pipeline order.
pub fn transform_names(registry: &Registry) -> Vec<(Category, Vec<String>)> {
    Category::ALL
        .iter()
        .map(|&category| {
            let names = registry
                .transforms()
                .registry(category)
                .names()
                .into_iter()
                .map(str::to_string)
                .collect();
            (category, names)
        })
        .collect()
}

/// Registered file type keys, sorted.
pub fn file_type_names(registry: &Registry) -> Vec<String> {
    registry
        .file_types()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Exit code for a finished parse: 0 when clean, 2 when rows were rejected.
pub fn exit_code(result: &ParseResult) -> i32 {
    if result.is_clean() { 0 } else { 2 }
}

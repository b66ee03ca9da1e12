//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use polman_types::ids::{SCHEMA_CONFIG_V1, SCHEMA_STORE_V1};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    id: &'static str,
    generate: fn() -> schemars::Schema,
}

impl SchemaSpec {
    fn filename(&self) -> String {
        format!("{}.json", self.id)
    }
}

fn generate_store_schema() -> schemars::Schema {
    schema_for!(polman_types::StoreDocument)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(polman_settings::PolmanConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            id: SCHEMA_STORE_V1,
            generate: generate_store_schema,
        },
        SchemaSpec {
            id: SCHEMA_CONFIG_V1,
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename());
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename());
        if !path.exists() {
            missing.push(spec.filename());
            continue;
        }
        let expected =
            serde_json::to_value((spec.generate)()).context("Failed to serialize schema")?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let actual: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        // Key order and whitespace are not significant.
        if expected != actual {
            mismatched.push(spec.filename());
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate tests/fixtures store files against the store schema");
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Validate fixture store files.
///
/// Every `policies.json` must match the store schema and load into a store.
/// Every `expected.policies.json` must also be fully normalized (timestamps are placeholders).
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_store_schema()).context("serialize store schema")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile store schema: {e}"))?;
    println!("✓ {SCHEMA_STORE_V1} schema compiles");

    let dir = fixtures_dir();
    let mut checked = 0usize;
    let mut errors = Vec::new();

    let mut fixtures: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    fixtures.sort();

    for fixture in fixtures {
        for name in ["policies.json", "expected.policies.json"] {
            let path = fixture.join(name);
            if !path.exists() {
                continue;
            }
            checked += 1;
            let label = path
                .strip_prefix(&dir)
                .unwrap_or(&path)
                .display()
                .to_string();

            let value = read_json(&path)?;
            for err in validator.iter_errors(&value) {
                errors.push(format!("{label}: {err}"));
            }

            if name == "policies.json" {
                let text = fs::read_to_string(&path)?;
                if let Err(err) = polman_storage::fuzz::parse_store_document(&text) {
                    errors.push(format!("{label}: does not load: {err:#}"));
                }
            } else if polman_test_util::normalize_nondeterministic(value.clone()) != value {
                errors.push(format!("{label}: timestamps are not normalized"));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {checked} fixture files conform");
        return Ok(());
    }
    for err in &errors {
        eprintln!("✗ {err}");
    }
    bail!("Conformance failed with {} errors", errors.len())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.id);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}

use lifecycle_common::fs::write_file_fsynced;
use lifecycle_data::buildpack_id::{escape, BuildpackId};
use lifecycle_data::layer::LayerMetadata;
use nix::unistd::{chown, Gid, Uid};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The UID:GID that newly created files and directories should be owned by.
///
/// Only consulted when the current process is running as root; see [`write_layer`].
#[derive(Clone, Copy, Debug)]
pub struct Owner {
    pub uid: u32,
    pub gid: u32,
}

#[derive(thiserror::Error, Debug)]
pub enum WriteLayerError {
    #[error("I/O error while writing layer: {0}")]
    Io(#[from] io::Error),

    #[error("error serializing layer metadata as TOML: {0}")]
    TomlSerialization(#[from] toml::ser::Error),
}

/// Writes a single layer's `.toml` and `.sha` files under `layers_dir`, creating the buildpack's
/// directory (and `layers_dir` itself) if necessary.
///
/// When `owner` is set, every path newly created by this call (and only those paths) has its
/// ownership set to `owner`. Paths that already existed are left untouched.
pub fn write_layer(
    layers_dir: &Path,
    buildpack_id: &BuildpackId,
    layer_name: &str,
    layer: &LayerMetadata,
    owner: Option<Owner>,
) -> Result<(), WriteLayerError> {
    let buildpack_dir = layers_dir.join(escape(buildpack_id));
    let created_dirs = create_dir_all_tracking(layers_dir, &buildpack_dir)?;

    let toml_path = buildpack_dir.join(format!("{layer_name}.toml"));
    let sha_path = buildpack_dir.join(format!("{layer_name}.sha"));

    write_file_fsynced(&toml_path, render_layer_toml(&layer.data)?)?;
    write_file_fsynced(&sha_path, &layer.sha)?;

    if let Some(owner) = owner {
        for dir in &created_dirs {
            chown_path(dir, owner)?;
        }
        chown_path(&toml_path, owner)?;
        chown_path(&sha_path, owner)?;
    }

    Ok(())
}

/// Whether the current process is running privileged, i.e. should chown files it writes.
#[must_use]
pub fn running_as_root() -> bool {
    Uid::effective().is_root()
}

/// Creates every missing directory between `layers_dir` (inclusive) and `target`, in outermost-
/// to-innermost order, and returns the paths that were actually created.
///
/// `target` MUST be `layers_dir` itself or a descendant of it; directories above `layers_dir` are
/// never created or considered, even if `layers_dir` itself is missing.
fn create_dir_all_tracking(layers_dir: &Path, target: &Path) -> io::Result<Vec<PathBuf>> {
    let mut missing = Vec::new();
    let mut current = target.to_path_buf();

    loop {
        if current.exists() {
            break;
        }
        missing.push(current.clone());
        if current == layers_dir {
            break;
        }
        if !current.pop() {
            break;
        }
    }

    missing.reverse();
    for dir in &missing {
        fs::create_dir(dir)?;
    }

    Ok(missing)
}

fn chown_path(path: &Path, owner: Owner) -> io::Result<()> {
    chown(
        path,
        Some(Uid::from_raw(owner.uid)),
        Some(Gid::from_raw(owner.gid)),
    )
    .map_err(|errno| io::Error::from_raw_os_error(errno as i32))
}

/// Renders a layer's `data` table as a `.toml` file body: a `[metadata]` header followed by the
/// table's scalar entries indented two spaces, matching the on-disk format expected by the
/// restore and build phases. An empty table still produces a header-only file.
///
/// Sub-tables within `data` are rendered as their own `[metadata.<path>]` header at the matching
/// indentation depth, rather than by indenting `toml::to_string`'s flat output: that would
/// leave a nested table's own `[sub]` header un-rewritten, turning it into a bogus top-level
/// table once written out (TOML headers ignore leading whitespace).
fn render_layer_toml(data: &toml::value::Table) -> Result<String, toml::ser::Error> {
    let mut out = String::new();
    render_table(&mut out, &["metadata".to_string()], data)?;
    Ok(out)
}

fn render_table(
    out: &mut String,
    path: &[String],
    table: &toml::value::Table,
) -> Result<(), toml::ser::Error> {
    let indent = "  ".repeat(path.len() - 1);
    out.push_str(&indent);
    out.push('[');
    out.push_str(&path.join("."));
    out.push_str("]\n");

    let mut scalars = toml::value::Table::new();
    let mut subtables = Vec::new();

    for (key, value) in table {
        if let toml::Value::Table(sub) = value {
            subtables.push((key, sub));
        } else {
            scalars.insert(key.clone(), value.clone());
        }
    }

    if !scalars.is_empty() {
        let body = toml::to_string(&scalars)?;
        for line in body.lines() {
            out.push_str(&indent);
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }

    for (key, sub) in subtables {
        let mut sub_path = path.to_vec();
        sub_path.push(key.clone());
        render_table(out, &sub_path, sub)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::value::Table;

    #[test]
    fn render_empty_table_is_header_only() {
        assert_eq!(render_layer_toml(&Table::new()).unwrap(), "[metadata]\n");
    }

    #[test]
    fn render_single_key_matches_expected_byte_format() {
        let mut table = Table::new();
        table.insert(
            "some-layer-key".to_string(),
            toml::Value::String("some-layer-value".to_string()),
        );
        assert_eq!(
            render_layer_toml(&table).unwrap(),
            "[metadata]\n  some-layer-key = \"some-layer-value\"\n"
        );
    }

    #[test]
    fn render_nested_table_gets_its_own_dotted_header() {
        let mut sub = Table::new();
        sub.insert(
            "inner-key".to_string(),
            toml::Value::String("inner-value".to_string()),
        );
        let mut table = Table::new();
        table.insert("outer-key".to_string(), toml::Value::Integer(1));
        table.insert("sub".to_string(), toml::Value::Table(sub));

        let rendered = render_layer_toml(&table).unwrap();
        assert_eq!(
            rendered,
            "[metadata]\n  outer-key = 1\n  [metadata.sub]\n    inner-key = \"inner-value\"\n"
        );
    }

    #[test]
    fn write_layer_creates_buildpack_dir_and_files() {
        let tmpdir = tempfile::tempdir().unwrap();
        let layers_dir = tmpdir.path().join("layers");
        fs::create_dir(&layers_dir).unwrap();

        let buildpack_id: BuildpackId = "heroku/jvm".parse().unwrap();
        let mut data = Table::new();
        data.insert(
            "version".to_string(),
            toml::Value::String("1.2.3".to_string()),
        );
        let layer = LayerMetadata {
            sha: "sha256:abc".to_string(),
            data,
            launch: true,
            ..LayerMetadata::default()
        };

        write_layer(&layers_dir, &buildpack_id, "jdk", &layer, None).unwrap();

        let bp_dir = layers_dir.join("heroku_jvm");
        assert_eq!(
            fs::read_to_string(bp_dir.join("jdk.toml")).unwrap(),
            "[metadata]\n  version = \"1.2.3\"\n"
        );
        assert_eq!(
            fs::read_to_string(bp_dir.join("jdk.sha")).unwrap(),
            "sha256:abc"
        );
    }

    #[test]
    fn write_layer_does_not_recreate_existing_layers_dir() {
        let tmpdir = tempfile::tempdir().unwrap();
        let layers_dir = tmpdir.path().join("layers");
        fs::create_dir(&layers_dir).unwrap();

        let buildpack_id: BuildpackId = "heroku/jvm".parse().unwrap();
        let layer = LayerMetadata {
            sha: "sha256:abc".to_string(),
            launch: true,
            ..LayerMetadata::default()
        };

        let created = create_dir_all_tracking(&layers_dir, &layers_dir.join("heroku_jvm"))
            .unwrap();
        assert_eq!(created, vec![layers_dir.join("heroku_jvm")]);

        write_layer(&layers_dir, &buildpack_id, "jdk", &layer, None).unwrap();
        assert!(layers_dir.exists());
    }
}

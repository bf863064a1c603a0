use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|err| panic!("read_dir({}): {err}", dir.display()));
    for entry in entries {
        let entry = entry.unwrap_or_else(|err| panic!("read_dir entry ({}): {err}", dir.display()));
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
            out.push(path);
        }
    }
}

fn offenders(layer: &str, forbidden: &[&str]) -> Vec<String> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let mut files = Vec::new();
    collect_rs_files(&manifest_dir.join("src").join(layer), &mut files);
    files.sort();

    files
        .into_iter()
        .filter(|file| {
            let contents = fs::read_to_string(file)
                .unwrap_or_else(|err| panic!("read_to_string({}): {err}", file.display()));
            forbidden.iter().any(|needle| contents.contains(needle))
        })
        .map(|path| {
            path.strip_prefix(&manifest_dir)
                .unwrap_or(path.as_path())
                .display()
                .to_string()
        })
        .collect()
}

#[test]
fn core_does_not_depend_on_runtime_or_render() {
    let found = offenders(
        "core",
        &["crate::runtime", "crate::render", "crate::platform"],
    );
    assert!(
        found.is_empty(),
        "core must not import higher layers, but found imports in:\n{}",
        found.join("\n")
    );
}

#[test]
fn backends_do_not_depend_on_runtime() {
    let found = offenders("render", &["crate::runtime"]);
    assert!(
        found.is_empty(),
        "backends must depend on `core` only, but found runtime imports in:\n{}",
        found.join("\n")
    );
}

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use yamlptr::file::loader::load_yaml_file;
use yamlptr::pointer::find;

const DEPLOYMENT: &str = "spec:\n  containers:\n  - name: app\n    image: nginx\n";

/// Helper function to create a temporary file path with the given name
fn temp_file_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn test_load_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "deploy.yaml");
    fs::write(&path, DEPLOYMENT).unwrap();

    let docs = load_yaml_file(&path).unwrap();
    assert_eq!(docs.len(), 1);

    let image = find(&docs[0], r#"/spec/containers/~{"name":"app"}/image"#).unwrap();
    assert_eq!((image.line, image.column), (4, 12));
}

#[test]
fn test_load_gzipped_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "deploy.yaml.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(DEPLOYMENT.as_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    let docs = load_yaml_file(&path).unwrap();
    assert_eq!(find(&docs[0], "/spec/containers/0/image").unwrap().value, "nginx");
}

#[test]
fn test_load_multi_document_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "multi.yaml");
    fs::write(&path, "name: first\n---\nname: second\n").unwrap();

    let docs = load_yaml_file(&path).unwrap();
    assert_eq!(docs.len(), 2);
    let second = find(&docs[1], "/name").unwrap();
    assert_eq!((second.value.as_str(), second.line), ("second", 3));
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = load_yaml_file(temp_file_path(&dir, "absent.yaml")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read file"));
}

#[test]
fn test_load_corrupted_gzip_fails() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "broken.yaml.gz");
    fs::write(&path, b"definitely not gzip").unwrap();

    let err = load_yaml_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("decompress"));
}

#[test]
fn test_load_invalid_yaml_fails() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "bad.yaml");
    fs::write(&path, "a: [1, 2\n").unwrap();

    let err = load_yaml_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse YAML"));
}

use std::fs;

use ifupdown_core::{ensure_dir, write_file, write_private_file, WriteError};

#[test]
fn write_file_creates_and_overwrites() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("interfaces");

    write_file(&path, "auto lo\n").expect("first write");
    write_file(&path, "auto eth0\n").expect("second write");

    assert_eq!(fs::read_to_string(&path).expect("read back"), "auto eth0\n");
}

#[test]
fn ensure_dir_creates_nested_directories() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let nested = dir.path().join("out").join("wpa_supplicant");

    ensure_dir(&nested).expect("create nested");
    ensure_dir(&nested).expect("existing directory is fine");

    assert!(nested.is_dir());
}

#[test]
fn write_reports_missing_parent_as_io_error() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("missing").join("interfaces");

    let err = write_file(&path, "auto lo\n").expect_err("parent does not exist");
    assert!(matches!(err, WriteError::Io { .. }));
    assert!(err.to_string().contains("interfaces"));
}

#[cfg(unix)]
#[test]
fn private_file_is_owner_only_even_when_it_already_existed() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("wpa_supplicant-wlan0.conf");

    fs::write(&path, "old").expect("seed file");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("widen mode");

    write_private_file(&path, "update_config=1\n").expect("private write");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert_eq!(
        fs::read_to_string(&path).expect("read back"),
        "update_config=1\n"
    );
}

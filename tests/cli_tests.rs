use assert_cmd::Command;
use filetime::FileTime;
use predicates::prelude::*;
use tempfile::tempdir;

// 2022-07-12 10:00:00 UTC
const DAY_ONE: i64 = 1_657_620_000;

fn create_clips(dir: &std::path::Path) {
    for (i, name) in ["MVI_0902.MP4", "MVI_0903.MP4"].iter().enumerate() {
        let path = dir.join(name);
        std::fs::write(&path, "footage").unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(DAY_ONE + i as i64 * 60, 0))
            .unwrap();
    }
}

fn virin() -> Command {
    let mut cmd = Command::cargo_bin("virin").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("VIRIN_BRANCH")
        .env_remove("VIRIN_UNIT_ID");
    cmd
}

#[test]
fn test_help_flag() {
    virin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("VIRIN identifiers"));
}

#[test]
fn test_version_flag() {
    virin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_extension() {
    let dir = tempdir().unwrap();

    virin()
        .arg(dir.path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--ext"));
}

#[test]
fn test_renames_files() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args([dir.path().to_str().unwrap(), "-e", "mp4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MVI_0902 > 20220712-F-F3965-0001"))
        .stdout(predicate::str::contains("MVI_0903 > 20220712-F-F3965-0002"));

    assert!(dir.path().join("20220712-F-F3965-0001.MP4").exists());
    assert!(dir.path().join("20220712-F-F3965-0002.MP4").exists());
}

#[test]
fn test_shoot_seq_and_date_flags() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args([
            dir.path().to_str().unwrap(),
            "-e",
            "MP4",
            "--date",
            "20240101",
            "--shoot",
            "4",
            "--seq",
            "15",
        ])
        .assert()
        .success();

    assert!(dir.path().join("20240101-F-F3965-4015.MP4").exists());
    assert!(dir.path().join("20240101-F-F3965-4016.MP4").exists());
}

#[test]
fn test_branch_and_unit_from_env() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .env("VIRIN_BRANCH", "N")
        .env("VIRIN_UNIT_ID", "XY123")
        .args([dir.path().to_str().unwrap(), "-e", "MP4"])
        .assert()
        .success();

    assert!(dir.path().join("20220712-N-XY123-0001.MP4").exists());
}

#[test]
fn test_dry_flag_no_filesystem_changes() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args(["--dry", dir.path().to_str().unwrap(), "-e", "MP4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("To:   20220712-F-F3965-0001.MP4"));

    assert!(dir.path().join("MVI_0902.MP4").exists());
    assert!(dir.path().join("MVI_0903.MP4").exists());
}

#[test]
fn test_no_matching_files() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args([dir.path().to_str().unwrap(), "-e", "mov"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Could not find any files with extension mov",
        ));
}

#[test]
fn test_json_output() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args([dir.path().to_str().unwrap(), "-e", "MP4", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"renamed\""))
        .stdout(predicate::str::contains("\"recorded\": true"));
}

#[test]
fn test_interactive_undo() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args([dir.path().to_str().unwrap(), "-e", "MP4", "--interactive"])
        .write_stdin("undo\nundo\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Undo procedure stats:"))
        .stdout(predicate::str::contains("Nothing to undo"));

    assert!(dir.path().join("MVI_0902.MP4").exists());
    assert!(dir.path().join("MVI_0903.MP4").exists());
}

#[test]
fn test_verbose_flag() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args(["-v", dir.path().to_str().unwrap(), "-e", "MP4"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Renamed: MVI_0902.MP4"));
}

#[test]
fn test_invalid_date() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args([dir.path().to_str().unwrap(), "-e", "MP4", "-D", "2022-07-12"])
        .assert()
        .code(5) // ExitCode::InvalidDate
        .stderr(predicate::str::contains("YYYYMMDD"));

    assert!(dir.path().join("MVI_0902.MP4").exists());
}

#[test]
fn test_start_sequence_overflow() {
    let dir = tempdir().unwrap();
    create_clips(dir.path());

    virin()
        .args([dir.path().to_str().unwrap(), "-e", "MP4", "-q", "4294967295"])
        .assert()
        .code(2) // ExitCode::InvalidArguments
        .stderr(predicate::str::contains("starting sequence"));

    assert!(dir.path().join("MVI_0902.MP4").exists());
    assert!(dir.path().join("MVI_0903.MP4").exists());
}

#[test]
fn test_nonexistent_directory() {
    virin()
        .args(["/nonexistent/path", "-e", "MP4"])
        .assert()
        .code(3) // ExitCode::DirectoryNotFound
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_file_instead_of_directory() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("file.txt");
    std::fs::write(&file_path, "content").unwrap();

    virin()
        .args([file_path.to_str().unwrap(), "-e", "MP4"])
        .assert()
        .code(3) // ExitCode::DirectoryNotFound (NotADirectory maps to same code)
        .stderr(predicate::str::contains("not a directory"));
}

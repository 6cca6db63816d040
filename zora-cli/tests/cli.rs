//! CLI integration tests for zora-cli
//!
//! Runs the binary the way a user would.

use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE: &str = "H~2:@ ←2♦yq GB3●( 6♥?↑6";

fn zora() -> Command {
    let mut cmd = Command::cargo_bin("zora-cli").unwrap();
    cmd.env_remove("ZORA_REGION").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    zora()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Oracle game secret"));
}

#[test]
fn test_decode_sample() {
    zora()
        .args(["decode", SAMPLE])
        .assert()
        .success()
        .stdout(predicate::str::contains("game id:     14129"))
        .stdout(predicate::str::contains("game:        ages"))
        .stdout(predicate::str::contains("hero:        Link"))
        .stdout(predicate::str::contains("child:       Pip"))
        .stdout(predicate::str::contains("animal:      dimitri (0x0c)"))
        .stdout(predicate::str::contains("pal:         ok"));
}

#[test]
fn test_decode_raw() {
    zora()
        .args([
            "decode",
            "--raw",
            "4, 37, 51, 36, 63, 61, 51, 10, 44, 39, 3, 0, 52, 21, 44, 55, 9, 45, 59, 59",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("animal:      ricky (0x0b)"));
}

#[test]
fn test_encode_sample() {
    zora()
        .args([
            "encode",
            "--game-id",
            "14129",
            "--game",
            "ages",
            "--hero",
            "Link",
            "--child",
            "Pip",
            "--behavior",
            "4",
            "--animal",
            "dimitri",
            "--linked",
            "--free-ring",
            "--raw",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(SAMPLE))
        .stdout(predicate::str::contains(
            "4, 37, 51, 36, 63, 61, 51, 10, 44, 39, 3, 0, 52, 21, 48, 55, 9, 45, 59, 55",
        ));
}

#[test]
fn test_decode_bad_checksum() {
    zora()
        .args(["decode", "H~2:@ ←2♦yq GB3●( 6♥?↑7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("checksum"));
}

#[test]
fn test_decode_wrong_length() {
    zora()
        .args(["decode", "H~2:@"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong length"));
}

#[test]
fn test_encode_rejects_out_of_range_behavior() {
    zora()
        .args(["encode", "--game-id", "1", "--behavior", "64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("behavior value 64 is out of range"));
}

#[test]
fn test_region_from_env() {
    zora()
        .env("ZORA_REGION", "japan")
        .args(["decode", SAMPLE])
        .assert()
        .success()
        .stdout(predicate::str::contains("region:      japan"));
}

const UNMAPPED_HERO: &str = "4, 37, 51, 38, 13, 61, 51, 10, 44, 39, 3, 0, 52, 21, 48, 55, 9, 45, 59, 55";

#[test]
fn test_decode_unmapped_name_byte() {
    zora()
        .args(["decode", "--raw", UNMAPPED_HERO])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode game secret"));
}

#[test]
fn test_decode_lossy_shows_placeholder() {
    zora()
        .args(["decode", "--raw", "--lossy", UNMAPPED_HERO])
        .assert()
        .success()
        .stdout(predicate::str::contains("hero:        ?ink"))
        .stdout(predicate::str::contains("child:       Pip"));
}

#[test]
fn test_decode_unclosed_alias() {
    zora()
        .args(["decode", "H~2:@{left"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read secret glyphs"));
}

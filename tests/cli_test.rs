use assert_cmd::prelude::*;
use std::process::Command;
type STDRESULT = Result<(), Box<dyn std::error::Error>>;

fn round_trip_test(text: &str) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.txt");
    let packed_path = temp_dir.path().join("input.wbwt");
    let out_path = temp_dir.path().join("output.txt");

    std::fs::write(&in_path, text)?;

    Command::cargo_bin("wbwt")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&packed_path)
        .assert()
        .success();

    Command::cargo_bin("wbwt")?
        .arg("decompress")
        .arg("-i").arg(&packed_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();

    let recovered = std::fs::read_to_string(&out_path)?;
    assert_eq!(recovered, text);
    Ok(())
}

#[test]
fn round_trips_empty_file() -> STDRESULT {
    round_trip_test("")
}

#[test]
fn round_trips_plain_sentence() -> STDRESULT {
    round_trip_test("The quick brown fox jumps over the lazy dog.\n")
}

#[test]
fn round_trips_repetitive_text() -> STDRESULT {
    round_trip_test("word word word word word word word\n")
}

#[test]
fn compression_shrinks_repetitive_text() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let text = "banana banana banana banana banana banana banana banana\n".repeat(20);
    let in_path = temp_dir.path().join("input.txt");
    let packed_path = temp_dir.path().join("input.wbwt");
    std::fs::write(&in_path, &text)?;

    Command::cargo_bin("wbwt")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&packed_path)
        .assert()
        .success();

    let packed_len = std::fs::metadata(&packed_path)?.len() as usize;
    assert!(packed_len < text.len());
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use seedselect_core::{derive_fingerprint, select, select_with, KeyWidth, SelectionOptions};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SelectionFixture {
    name: String,
    seed: String,
    sequence: u64,
    n: usize,
    #[serde(default)]
    key_width: KeyWidth,
    candidates: Vec<String>,
    expected: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FingerprintFixture {
    name: String,
    seed: String,
    sequence: u64,
    digest: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_paths(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .expect("fixtures directory must exist")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();
    entries
}

#[test]
fn fingerprint_vectors() {
    let path = fixtures_root().join("fingerprint/vectors.json");
    let data = fs::read_to_string(&path).expect("fixture should be readable");
    let vectors: Vec<FingerprintFixture> =
        serde_json::from_str(&data).expect("fixture should deserialize");
    assert!(!vectors.is_empty());

    for vector in vectors {
        let fingerprint = derive_fingerprint(&vector.name, vector.seed.as_bytes(), vector.sequence);
        assert_eq!(fingerprint.to_hex(), vector.digest, "vector {vector:?}");
    }
}

#[test]
fn selection_golden_parity() {
    let entries = fixture_paths(&fixtures_root().join("selection"));
    assert!(!entries.is_empty(), "expected at least one selection fixture");

    for path in entries {
        let data = fs::read_to_string(&path).expect("fixture should be readable");
        let fixture: SelectionFixture =
            serde_json::from_str(&data).expect("fixture should deserialize");
        let options = SelectionOptions::default().with_key_width(fixture.key_width);
        let mut hasher = sha2::Sha256::default();
        let selected = select_with(
            &mut hasher,
            &options,
            &fixture.name,
            fixture.seed.as_bytes(),
            fixture.sequence,
            fixture.n,
            &fixture.candidates,
        )
        .expect("selection succeeds");
        assert_eq!(selected, fixture.expected, "fixture {path:?}");

        if fixture.key_width == KeyWidth::Low64 {
            let pooled = select(
                &fixture.name,
                fixture.seed.as_bytes(),
                fixture.sequence,
                fixture.n,
                &fixture.candidates,
            )
            .expect("selection succeeds");
            assert_eq!(pooled, fixture.expected, "fixture {path:?} (pooled hasher)");
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let candidates: Vec<String> = (0..256).map(|i| format!("node-{i:03}")).collect();
    let first = select("committee", b"round-seed", 42, 16, &candidates).unwrap();
    for _ in 0..8 {
        assert_eq!(select("committee", b"round-seed", 42, 16, &candidates).unwrap(), first);
    }
}

#[test]
fn concurrent_callers_agree() {
    let candidates: Vec<String> = (0..512).map(|i| format!("validator-{i}")).collect();
    let expected: Vec<Vec<String>> =
        (0..8u64).map(|seq| select("parallel", b"seed", seq, 7, &candidates).unwrap()).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8u64)
            .map(|seq| {
                let candidates = &candidates;
                scope.spawn(move || select("parallel", b"seed", seq, 7, candidates).unwrap())
            })
            .collect();
        for (seq, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), expected[seq]);
        }
    });
}

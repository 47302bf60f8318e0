//! End-to-end encode/repair roundtrip over real files on disk, exercising
//! the library crate the way the CLI shell does (shard-per-file, existence
//! as the survival signal).

use std::fs;
use std::path::Path;

use rserasure::codec::Codec;
use rserasure::field::Width;

fn deterministic_shard(seed: u8, len: usize) -> Vec<u8> {
    (0..len)
        .map(|j| seed.wrapping_mul(j as u8).wrapping_add(seed))
        .collect()
}

fn shard_path(dir: &Path, prefix: &str, global: usize, k: usize) -> std::path::PathBuf {
    if global < k {
        dir.join(format!("{prefix}.d{global}"))
    } else {
        dir.join(format!("{prefix}.c{}", global - k))
    }
}

#[test]
fn encode_delete_three_of_six_then_repair_restores_originals() {
    let k = 3;
    let m = 3;
    let shard_len = 1024;
    let dir = tempfile::tempdir().unwrap();
    let prefix = "shard";

    let codec = Codec::new(Width::W8, k, m, false).unwrap();

    let data: Vec<Vec<u8>> = (0..k as u8).map(|i| deterministic_shard(i + 1, shard_len)).collect();
    let parity = codec.encode(&data).unwrap();

    for (i, buf) in data.iter().enumerate() {
        fs::write(shard_path(dir.path(), prefix, i, k), buf).unwrap();
    }
    for (j, buf) in parity.iter().enumerate() {
        fs::write(shard_path(dir.path(), prefix, k + j, k), buf).unwrap();
    }

    // delete three of the six shards: two data, one coding
    fs::remove_file(shard_path(dir.path(), prefix, 0, k)).unwrap();
    fs::remove_file(shard_path(dir.path(), prefix, 2, k)).unwrap();
    fs::remove_file(shard_path(dir.path(), prefix, k, k)).unwrap();

    let mut shards: Vec<Option<Vec<u8>>> = (0..k + m)
        .map(|i| {
            let p = shard_path(dir.path(), prefix, i, k);
            if p.exists() {
                Some(fs::read(p).unwrap())
            } else {
                None
            }
        })
        .collect();

    codec.repair(&mut shards).unwrap();

    for i in 0..k {
        assert_eq!(
            shards[i].as_ref().unwrap(),
            &data[i],
            "data shard {i} not restored byte-for-byte"
        );
    }
    // the surviving coding shard slot is untouched, the deleted one stays
    // unfilled -- repair only restores missing data.
    assert!(shards[k].is_none());
    assert_eq!(shards[k + 1].as_ref().unwrap(), &parity[1]);
}

#[test]
fn cauchy_matrix_round_trips_too() {
    let k = 4;
    let m = 2;
    let shard_len = 256;
    let codec = Codec::new(Width::W8, k, m, true).unwrap();

    let data: Vec<Vec<u8>> = (0..k as u8).map(|i| deterministic_shard(i + 5, shard_len)).collect();
    let parity = codec.encode(&data).unwrap();

    let mut shards: Vec<Option<Vec<u8>>> = data
        .iter()
        .cloned()
        .map(Some)
        .chain(parity.iter().cloned().map(Some))
        .collect();
    shards[0] = None;
    shards[1] = None;

    codec.repair(&mut shards).unwrap();
    for i in 0..k {
        assert_eq!(shards[i].as_ref().unwrap(), &data[i]);
    }
}

#[test]
fn w4_round_trip_with_nibble_packing() {
    let k = 3;
    let m = 2;
    let codec = Codec::new(Width::W4, k, m, false).unwrap();
    let data: Vec<Vec<u8>> = (0..k as u8).map(|i| deterministic_shard(i + 1, 32)).collect();
    let parity = codec.encode(&data).unwrap();

    let mut shards: Vec<Option<Vec<u8>>> = data
        .iter()
        .cloned()
        .map(Some)
        .chain(parity.iter().cloned().map(Some))
        .collect();
    shards[1] = None;

    codec.repair(&mut shards).unwrap();
    assert_eq!(shards[1].as_ref().unwrap(), &data[1]);
}

#[test]
fn self_test_reproduces_concrete_scenarios() {
    rserasure::self_test::run().unwrap();
}

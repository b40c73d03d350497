//! Fixture builders shared by the integration tests.
//!
//! The library only reads the formats; these helpers write minimal but
//! layout-exact files so tests can control bucket and chunk boundaries.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::DeflateEncoder;
use flate2::Compression;
use wapidx_reader::{fast_key, PrefixKey};

pub fn deflate(raw: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).expect("deflate write");
    encoder.finish().expect("deflate finish")
}

/// Decompressed definition chunk: text runs, sub-index, sub-index offset.
pub fn definition_chunk(entries: &[(String, String)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut offsets = Vec::new();
    for (word, definition) in entries {
        offsets.push(bytes.len() as u32);
        bytes.extend_from_slice(word.as_bytes());
        bytes.push(b'\n');
        bytes.extend_from_slice(definition.as_bytes());
    }
    let sub_index = bytes.len() as u32;
    for offset in offsets {
        bytes.extend_from_slice(&offset.to_be_bytes());
    }
    bytes.extend_from_slice(&sub_index.to_be_bytes());
    bytes
}

/// Definition store from explicit buckets, keyed by bucket number.
pub fn store_from_buckets(buckets: &BTreeMap<u16, Vec<(String, String)>>) -> Vec<u8> {
    let mut file = Vec::new();
    let mut table = Vec::new();

    for (&key, entries) in buckets {
        let mut entries = entries.clone();
        entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        table.extend_from_slice(&(file.len() as u32).to_be_bytes());
        table.extend_from_slice(&key.to_be_bytes());
        file.extend_from_slice(&deflate(&definition_chunk(&entries)));
    }

    let index_start = file.len() as u32;
    file.extend_from_slice(&table);
    file.extend_from_slice(&index_start.to_be_bytes());
    file
}

fn bucketize(entries: &[(&str, &str)]) -> BTreeMap<u16, Vec<(String, String)>> {
    let mut buckets: BTreeMap<u16, Vec<(String, String)>> = BTreeMap::new();
    for (word, definition) in entries {
        buckets
            .entry(fast_key(word))
            .or_default()
            .push((word.to_string(), definition.to_string()));
    }
    buckets
}

/// Definition store holding only the buckets its words hash to.
pub fn build_store(entries: &[(&str, &str)]) -> Vec<u8> {
    store_from_buckets(&bucketize(entries))
}

/// Definition store where every bucket `0..bucket_count` exists, so that
/// each bucket sits at the table position equal to its key.
pub fn build_dense_store(entries: &[(&str, &str)], bucket_count: u16) -> Vec<u8> {
    let mut buckets = bucketize(entries);
    assert!(
        buckets.keys().all(|&k| k < bucket_count),
        "dense store fixture words must hash below {}",
        bucket_count
    );
    for key in 0..bucket_count {
        buckets.entry(key).or_default();
    }
    store_from_buckets(&buckets)
}

/// Suggestion index with one chunk per slice; words must already be sorted.
pub fn build_index(chunks: &[&[&str]]) -> Vec<u8> {
    let mut file = Vec::new();
    let mut table = Vec::new();

    for words in chunks {
        let first = words.first().expect("chunk fixture must not be empty");
        let last = words.last().expect("chunk fixture must not be empty");

        table.extend_from_slice(&(file.len() as u32).to_be_bytes());
        table.extend_from_slice(&(words.len() as u32).to_be_bytes());
        table.extend_from_slice(&PrefixKey::pack(first).key.to_be_bytes());
        table.extend_from_slice(&PrefixKey::pack(last).key.to_be_bytes());

        let mut text = words.join("\n");
        text.push('\n');
        file.extend_from_slice(&deflate(text.as_bytes()));
    }

    let index_start = file.len() as u32;
    file.extend_from_slice(&table);
    file.extend_from_slice(&index_start.to_be_bytes());
    file
}

/// Ukrainian word list laid out in nine chunks.
///
/// Chunk 0 ends and chunk 1 starts with "безхитріс…" words; chunk 4 holds
/// every "коров…" word; the last word is U+1F77F.
pub const UK_CHUNKS: &[&[&str]] = &[
    &["(бути) в своєму репертуарі", "абажур", "абетка", "безхитрісний"],
    &["безхитрісно", "біда", "білка", "вишня"],
    &["вода", "гора", "дуб", "звір"],
    &["змія", "кит"],
    &[
        "клен",
        "книга",
        "коза",
        "коров'як",
        "корова",
        "коровай",
        "коровайка",
        "Коровайна",
        "Коровайник",
        "коровайниця",
        "короварня",
        "Коровчинський",
        "коров’як",
        "король",
        "лев",
    ],
    &["лис", "місто", "ніч"],
    &["озеро", "пісня", "річка"],
    &["сонце", "тиша", "яблуко"],
    &["ящірка", "\u{1F77F}"],
];

pub fn uk_words() -> Vec<String> {
    UK_CHUNKS
        .iter()
        .flat_map(|chunk| chunk.iter().map(|w| w.to_string()))
        .collect()
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap_or_else(|e| panic!("write {}: {}", path.display(), e));
    path
}

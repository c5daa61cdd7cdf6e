// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{encode_key_segment, write_temp_file, FileStore};
use crate::store::{KeyValueStore, StoreError, WriteDurability};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("uml-tutor-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct FileStoreTestCtx {
    tmp: TempDir,
    store: FileStore,
}

#[fixture]
fn ctx() -> FileStoreTestCtx {
    let tmp = TempDir::new("file-store");
    let store = FileStore::new(tmp.path().join("data"));
    FileStoreTestCtx { tmp, store }
}

#[rstest]
fn missing_key_reads_as_none_and_root_is_created_lazily(ctx: FileStoreTestCtx) {
    assert_eq!(ctx.store.get("uml-challenge-lesson-1").expect("get"), None);
    assert!(!ctx.tmp.path().join("data").exists());
}

#[rstest]
fn put_writes_one_json_file_per_key(mut ctx: FileStoreTestCtx) {
    ctx.store.put("uml-challenge-lesson-1", r#"{"classes":[],"relationships":[]}"#).expect("put");
    ctx.store.put("uml-progress", "{}").expect("put");

    let path = ctx.store.entry_path("uml-challenge-lesson-1").expect("path");
    assert_eq!(path, ctx.tmp.path().join("data").join("uml-challenge-lesson-1.json"));
    assert_eq!(
        ctx.store.get("uml-challenge-lesson-1").expect("get").as_deref(),
        Some(r#"{"classes":[],"relationships":[]}"#)
    );

    let mut names: Vec<String> = std::fs::read_dir(ctx.tmp.path().join("data"))
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["uml-challenge-lesson-1.json", "uml-progress.json"]);
}

#[rstest]
fn put_overwrites_and_remove_is_idempotent(mut ctx: FileStoreTestCtx) {
    ctx.store.put("k", "one").expect("put");
    ctx.store.put("k", "two").expect("overwrite");
    assert_eq!(ctx.store.get("k").expect("get").as_deref(), Some("two"));

    ctx.store.remove("k").expect("remove");
    ctx.store.remove("k").expect("remove again");
    assert_eq!(ctx.store.get("k").expect("get"), None);
}

#[rstest]
fn durable_writes_round_trip(ctx: FileStoreTestCtx) {
    let mut store = ctx.store.clone().with_durability(WriteDurability::Durable);
    store.put("k", "durable").expect("put");
    assert_eq!(store.get("k").expect("get").as_deref(), Some("durable"));
}

#[rstest]
fn failed_flush_removes_the_temp_file(ctx: FileStoreTestCtx) {
    let tmp_path = ctx.tmp.path().join(".uml-tutor.tmp.k.json.1");

    let err = write_temp_file(&tmp_path, b"{}", |_| Err(io::Error::other("flush failed")))
        .expect_err("flush fails");

    assert!(matches!(err, StoreError::Io { .. }));
    assert!(!tmp_path.exists());
    assert_eq!(std::fs::read_dir(ctx.tmp.path()).expect("read dir").count(), 0);
}

#[rstest]
fn write_temp_file_keeps_contents_on_success(ctx: FileStoreTestCtx) {
    let tmp_path = ctx.tmp.path().join(".uml-tutor.tmp.k.json.2");

    write_temp_file(&tmp_path, b"{}", |_| Ok(())).expect("write");

    assert_eq!(std::fs::read_to_string(&tmp_path).expect("read"), "{}");
}

#[rstest]
#[case("")]
#[case("a/b")]
#[case("a\\b")]
fn invalid_keys_are_rejected(mut ctx: FileStoreTestCtx, #[case] key: &str) {
    assert!(matches!(ctx.store.put(key, "v"), Err(StoreError::InvalidKey { .. })));
    assert!(matches!(ctx.store.get(key), Err(StoreError::InvalidKey { .. })));
}

#[rstest]
#[case("uml-challenge-class_diagram", "uml-challenge-class_diagram")]
#[case("CON", "~434f4e")]
#[case("a:b", "~613a62")]
#[case(".hidden", "~2e68696464656e")]
#[case("~x", "~7e78")]
fn unsafe_key_segments_are_hex_encoded(#[case] key: &str, #[case] expected: &str) {
    assert_eq!(encode_key_segment(key), expected);
}

#[cfg(unix)]
#[rstest]
fn symlinked_entries_are_refused(mut ctx: FileStoreTestCtx) {
    ctx.store.put("real", "v").expect("put");
    let target = ctx.store.entry_path("real").expect("path");
    let link = ctx.store.entry_path("link").expect("path");
    std::os::unix::fs::symlink(&target, &link).expect("symlink");

    assert!(matches!(ctx.store.get("link"), Err(StoreError::SymlinkRefused { .. })));
    assert!(matches!(ctx.store.put("link", "w"), Err(StoreError::SymlinkRefused { .. })));
}

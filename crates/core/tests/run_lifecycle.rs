//! End-to-end run tests: collection, per-file invocation, relocation and
//! summary, exercised both with real subprocesses (`cp` standing in for a
//! codec) and with mocks for scripted failures.

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use tempfile::TempDir;
use tokio::sync::mpsc;

use tracklift_core::{
    collector::{CollectorConfig, FileCollector},
    invoker::{InvokerConfig, ProcessInvoker},
    registry::{AudioFormat, Platform, ToolRegistry, ToolsConfig},
    relocator::{FsRelocator, RelocatorConfig},
    testing::{MockInvoker, MockRelocator},
    Operation, Orchestrator, RunOptions,
};

/// Tool paths that resolve via PATH; used with mocks, never spawned.
fn cp_tools() -> ToolsConfig {
    ToolsConfig {
        opus_encoder: PathBuf::from("cp"),
        opus_decoder: PathBuf::from("cp"),
        flac: PathBuf::from("cp"),
    }
}

/// Installs a script that "transcodes" by copying its first argument to its
/// last, swallowing the option flags in between, so the real argument
/// templates can be exercised without codec tools installed.
fn install_fake_codec(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("fake-codec");
    std::fs::write(
        &path,
        "#!/bin/sh\nfirst=\"$1\"\nfor last; do :; done\ncp \"$first\" \"$last\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn registry(tools: ToolsConfig) -> ToolRegistry {
    ToolRegistry::new(Platform::Linux, &tools)
}

/// An orchestrator whose three tools are all the fake codec script. The
/// returned TempDir keeps the script alive.
fn process_orchestrator() -> (TempDir, Orchestrator<ProcessInvoker, FsRelocator>) {
    let tool_dir = TempDir::new().unwrap();
    let tool = install_fake_codec(tool_dir.path());
    let tools = ToolsConfig {
        opus_encoder: tool.clone(),
        opus_decoder: tool.clone(),
        flac: tool,
    };
    let orchestrator = Orchestrator::new(
        registry(tools),
        FileCollector::new(CollectorConfig::default()),
        ProcessInvoker::new(InvokerConfig::default()),
        FsRelocator::new(RelocatorConfig::default()),
    );
    (tool_dir, orchestrator)
}

fn mock_orchestrator() -> Orchestrator<MockInvoker, MockRelocator> {
    Orchestrator::new(
        registry(cp_tools()),
        FileCollector::new(CollectorConfig::default()),
        MockInvoker::new(),
        MockRelocator::new(),
    )
}

fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_full_run_with_relocation() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let album = source_dir.path().join("album");

    write_file(&album.join("a.wav"), b"wav data a");
    write_file(&album.join("b.wav"), b"wav data b");
    write_file(&album.join("cover.jpg"), b"jpeg data");

    let (_tool_dir, orchestrator) = process_orchestrator();
    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: Some(target_dir.path().to_path_buf()),
        operation: Operation::EncodeTo(AudioFormat::Opus),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_clean());
    assert!(!summary.cancelled);

    // Outputs moved into the target, mirroring the source layout.
    assert!(target_dir.path().join("album/a.opus").is_file());
    assert!(target_dir.path().join("album/b.opus").is_file());
    assert!(!album.join("a.opus").exists());

    // Sidecar copied; the original stays put.
    assert!(target_dir.path().join("album/cover.jpg").is_file());
    assert!(album.join("cover.jpg").is_file());

    // Originals are never touched.
    assert!(album.join("a.wav").is_file());
    assert!(album.join("b.wav").is_file());

    let relocation = summary.relocation.unwrap();
    assert_eq!(relocation.moved.len(), 2);
    assert_eq!(relocation.copied.len(), 1);
    assert!(relocation.is_clean());
}

#[tokio::test]
async fn test_run_without_target_leaves_outputs_in_place() {
    let source_dir = TempDir::new().unwrap();
    write_file(&source_dir.path().join("track.wav"), b"wav data");

    let (_tool_dir, orchestrator) = process_orchestrator();
    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: None,
        operation: Operation::EncodeTo(AudioFormat::Opus),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert_eq!(summary.succeeded, 1);
    assert!(summary.relocation.is_none());
    assert!(source_dir.path().join("track.opus").is_file());
}

#[tokio::test]
async fn test_failure_is_isolated_to_its_file() {
    let source_dir = TempDir::new().unwrap();
    write_file(&source_dir.path().join("a.wav"), b"a");
    write_file(&source_dir.path().join("b.wav"), b"b");
    write_file(&source_dir.path().join("c.wav"), b"c");

    let invoker = MockInvoker::new();
    invoker
        .set_failure(source_dir.path().join("b.wav"), "exit code 1")
        .await;

    let orchestrator = Orchestrator::new(
        registry(cp_tools()),
        FileCollector::new(CollectorConfig::default()),
        invoker,
        MockRelocator::new(),
    );

    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: None,
        operation: Operation::EncodeTo(AudioFormat::Opus),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].path, source_dir.path().join("b.wav"));
    assert_eq!(summary.failures[0].reason, "exit code 1");
}

#[tokio::test]
async fn test_missing_output_counts_as_failure() {
    let source_dir = TempDir::new().unwrap();
    write_file(&source_dir.path().join("track.flac"), b"flac data");

    // `true` exits zero without producing the output file.
    let tools = ToolsConfig {
        flac: PathBuf::from("true"),
        ..cp_tools()
    };

    let orchestrator = Orchestrator::new(
        registry(tools),
        FileCollector::new(CollectorConfig::default()),
        ProcessInvoker::new(InvokerConfig::default()),
        FsRelocator::new(RelocatorConfig::default()),
    );

    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: None,
        operation: Operation::DecodeFrom(AudioFormat::Flac),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn test_zero_byte_source_yields_failed_summary() {
    let source_dir = TempDir::new().unwrap();
    // A corrupt, zero-byte file: the tool exits zero but the output is
    // empty, which counts as a failure.
    write_file(&source_dir.path().join("track.flac"), b"");

    let (_tool_dir, orchestrator) = process_orchestrator();
    let options = RunOptions {
        sources: vec![source_dir.path().join("track.flac")],
        target: None,
        operation: Operation::DecodeFrom(AudioFormat::Flac),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn test_rerun_overwrites_previous_output() {
    let source_dir = TempDir::new().unwrap();
    let track = source_dir.path().join("track.wav");
    write_file(&track, b"fresh wav data");
    // A stale output from an earlier interrupted run.
    write_file(&source_dir.path().join("track.opus"), b"stale");

    let (_tool_dir, orchestrator) = process_orchestrator();
    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: None,
        operation: Operation::EncodeTo(AudioFormat::Opus),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert_eq!(summary.succeeded, 1);

    let output = std::fs::read(source_dir.path().join("track.opus")).unwrap();
    assert_eq!(output, b"fresh wav data");
}

#[tokio::test]
async fn test_move_format_relocates_without_invoking_tools() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    write_file(&source_dir.path().join("track.opus"), b"opus data");
    write_file(&source_dir.path().join("track.wav"), b"wav data");

    let invoker = MockInvoker::new();
    let orchestrator = Orchestrator::new(
        registry(cp_tools()),
        FileCollector::new(CollectorConfig::default()),
        invoker,
        FsRelocator::new(RelocatorConfig::default()),
    );

    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: Some(target_dir.path().to_path_buf()),
        operation: Operation::MoveFormat(AudioFormat::Opus),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert_eq!(summary.succeeded, 1);

    // Only the .opus file moves; the .wav is not collected.
    assert!(target_dir.path().join("track.opus").is_file());
    assert!(!source_dir.path().join("track.opus").exists());
    assert!(source_dir.path().join("track.wav").is_file());
}

#[tokio::test]
async fn test_move_format_never_calls_invoker() {
    let source_dir = TempDir::new().unwrap();
    write_file(&source_dir.path().join("track.flac"), b"flac data");

    let invoker = MockInvoker::new();
    let orchestrator = Orchestrator::new(
        registry(cp_tools()),
        FileCollector::new(CollectorConfig::default()),
        invoker.clone(),
        MockRelocator::new(),
    );

    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: None,
        operation: Operation::MoveFormat(AudioFormat::Flac),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert_eq!(summary.succeeded, 1);
    assert_eq!(invoker.invocation_count().await, 0);
}

#[tokio::test]
async fn test_progress_percentages() {
    let source_dir = TempDir::new().unwrap();
    write_file(&source_dir.path().join("a.wav"), b"a");
    write_file(&source_dir.path().join("b.wav"), b"b");
    write_file(&source_dir.path().join("c.wav"), b"c");
    write_file(&source_dir.path().join("d.wav"), b"d");

    let orchestrator = mock_orchestrator();
    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: None,
        operation: Operation::EncodeTo(AudioFormat::Opus),
    };

    let (tx, mut rx) = mpsc::channel(16);
    let summary = orchestrator.run(&options, Some(tx)).await.unwrap();
    assert_eq!(summary.attempted, 4);

    let mut events = Vec::new();
    while let Some(progress) = rx.recv().await {
        events.push(progress);
    }

    let percents: Vec<u8> = events.iter().map(|p| p.percent).collect();
    assert_eq!(percents, vec![25, 50, 75, 100]);
    assert_eq!(events[0].index, 1);
    assert_eq!(events[0].total, 4);
    assert!(events.iter().all(|p| p.success));
}

#[tokio::test]
async fn test_shutdown_stops_at_file_boundary() {
    let source_dir = TempDir::new().unwrap();
    write_file(&source_dir.path().join("a.wav"), b"a");
    write_file(&source_dir.path().join("b.wav"), b"b");

    let orchestrator = mock_orchestrator();
    orchestrator.shutdown_handle().store(true, Ordering::SeqCst);

    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: None,
        operation: Operation::EncodeTo(AudioFormat::Opus),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert!(summary.cancelled);
    assert_eq!(summary.attempted, 0);
}

#[tokio::test]
async fn test_empty_collection_produces_empty_summary() {
    let source_dir = TempDir::new().unwrap();
    write_file(&source_dir.path().join("notes.txt"), b"not audio");

    let (_tool_dir, orchestrator) = process_orchestrator();
    let options = RunOptions {
        sources: vec![source_dir.path().to_path_buf()],
        target: None,
        operation: Operation::EncodeTo(AudioFormat::Opus),
    };

    let summary = orchestrator.run(&options, None).await.unwrap();
    assert_eq!(summary.attempted, 0);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_clean());
}

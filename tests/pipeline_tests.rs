//! End-to-end pipeline tests over blank and image sources.
//!
//! None of these jobs contain a document item, so the whole pipeline runs
//! without a Pdfium library being present.

use booklet_press::*;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn blank_raw() -> RawItem {
    RawItem {
        kind: ItemKind::Blank,
        location: None,
        display_name: String::new(),
    }
}

fn blank_items(count: usize) -> Vec<Item> {
    validate_items(&vec![blank_raw(); count]).unwrap()
}

fn png_item(dir: &Path, name: &str) -> Item {
    let path = dir.join(name);
    RgbImage::from_pixel(64, 48, Rgb([40, 80, 120]))
        .save(&path)
        .unwrap();
    let raw = RawItem {
        kind: ItemKind::Image,
        location: Some(path),
        display_name: String::new(),
    };
    validate_items(&[raw]).unwrap().remove(0)
}

fn output_page_count(path: &Path) -> usize {
    lopdf::Document::load(path).unwrap().get_pages().len()
}

#[test]
fn booklet_of_blanks_produces_two_spreads_per_sheet() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("booklet.pdf");

    // 3 pages pad to 4: one sheet, two sides
    generate_sync(
        &blank_items(3),
        &GenerateOptions::default(),
        &out,
        &JobCallbacks::new(),
    )
    .unwrap();

    assert!(out.is_file());
    assert_eq!(output_page_count(&out), 2);
}

#[test]
fn two_up_with_cover_offsets_the_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("twoup.pdf");
    let options = GenerateOptions {
        layout_mode: LayoutMode::TwoUp,
        cover_preview: true,
        ..GenerateOptions::default()
    };

    // cover blank + 3 pages pads to 4: two spreads
    generate_sync(&blank_items(3), &options, &out, &JobCallbacks::new()).unwrap();
    assert_eq!(output_page_count(&out), 2);
}

#[test]
fn image_job_renders_grayscale_and_compact() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("photo.pdf");
    let items = vec![png_item(dir.path(), "photo.png")];
    let options = GenerateOptions {
        layout_mode: LayoutMode::TwoUp,
        cover_preview: false,
        grayscale: true,
        compress: true,
    };

    generate_sync(&items, &options, &out, &JobCallbacks::new()).unwrap();
    assert_eq!(output_page_count(&out), 1);
}

#[test]
fn progress_fires_once_per_spread_and_logs_hit_milestones() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.pdf");

    let progress = Arc::new(Mutex::new(Vec::new()));
    let logs = Arc::new(Mutex::new(Vec::new()));
    let progress_sink = Arc::clone(&progress);
    let log_sink = Arc::clone(&logs);

    let callbacks = JobCallbacks::new()
        .on_progress(move |current, total| progress_sink.lock().unwrap().push((current, total)))
        .on_log(move |line| log_sink.lock().unwrap().push(line.to_string()));

    // 25 pages pad to 28: 14 spreads
    generate_sync(&blank_items(25), &GenerateOptions::default(), &out, &callbacks).unwrap();

    let progress = progress.lock().unwrap();
    assert_eq!(progress.len(), 14);
    assert_eq!(progress.first(), Some(&(1, 14)));
    assert_eq!(progress.last(), Some(&(14, 14)));
    assert!(progress.windows(2).all(|w| w[1].0 == w[0].0 + 1));

    // First, every 10th, and last spread
    let logs = logs.lock().unwrap();
    assert_eq!(
        *logs,
        vec![
            "processed spread 1/14",
            "processed spread 10/14",
            "processed spread 14/14",
        ]
    );
}

#[test]
fn cancellation_stops_at_the_next_spread_boundary() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("canceled.pdf");

    let completed = Arc::new(AtomicUsize::new(0));
    let completed_in_progress = Arc::clone(&completed);
    let completed_in_cancel = Arc::clone(&completed);

    let callbacks = JobCallbacks::new()
        .on_progress(move |_, _| {
            completed_in_progress.fetch_add(1, Ordering::SeqCst);
        })
        .on_cancel(move || completed_in_cancel.load(Ordering::SeqCst) >= 1);

    // 8 blanks booklet: 4 spreads, canceled after the first completes
    let result = generate_sync(
        &blank_items(8),
        &GenerateOptions::default(),
        &out,
        &callbacks,
    );

    assert!(matches!(result, Err(BookletError::Canceled)));
    assert_eq!(completed.load(Ordering::SeqCst), 1);
    // Zero writes to the destination directory
    assert!(!out.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn cancellation_before_the_first_spread_processes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("never.pdf");

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_sink = Arc::clone(&fired);
    let callbacks = JobCallbacks::new()
        .on_progress(move |_, _| {
            fired_sink.fetch_add(1, Ordering::SeqCst);
        })
        .on_cancel(|| true);

    let result = generate_sync(
        &blank_items(4),
        &GenerateOptions::default(),
        &out,
        &callbacks,
    );

    assert!(matches!(result, Err(BookletError::Canceled)));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(!out.exists());
}

#[test]
fn rendering_failure_is_redacted_and_leaves_the_destination_untouched() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("existing.pdf");
    fs::write(&out, b"previous result").unwrap();

    // Valid extension, garbage content: passes validation, fails decoding
    let bad = dir.path().join("broken.png");
    fs::write(&bad, b"this is not a png").unwrap();
    let items = validate_items(&[RawItem {
        kind: ItemKind::Image,
        location: Some(bad),
        display_name: String::new(),
    }])
    .unwrap();

    let options = GenerateOptions {
        layout_mode: LayoutMode::TwoUp,
        cover_preview: false,
        ..GenerateOptions::default()
    };
    let result = generate_sync(&items, &options, &out, &JobCallbacks::new());

    // Internal decode details are not surfaced
    assert!(matches!(result, Err(BookletError::Generation)));
    assert_eq!(fs::read(&out).unwrap(), b"previous result");
    // No temp file left behind
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tmp_"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn missing_destination_directories_are_created() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("deep").join("out.pdf");

    generate_sync(
        &blank_items(4),
        &GenerateOptions::default(),
        &out,
        &JobCallbacks::new(),
    )
    .unwrap();
    assert!(out.is_file());
}

#[tokio::test]
async fn async_generate_runs_off_the_calling_thread() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("async.pdf");

    generate(
        blank_items(4),
        GenerateOptions::default(),
        out.clone(),
        JobCallbacks::new(),
    )
    .await
    .unwrap();

    assert_eq!(output_page_count(&out), 2);
}

#[tokio::test]
async fn worker_panic_is_redacted_like_any_internal_failure() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("panicked.pdf");
    let callbacks = JobCallbacks::new().on_progress(|_, _| panic!("internal detail"));

    let error = generate(
        blank_items(4),
        GenerateOptions::default(),
        out.clone(),
        callbacks,
    )
    .await
    .unwrap_err();

    assert!(matches!(error, BookletError::Generation));
    assert!(!error.to_string().contains("internal detail"));
    assert!(!out.exists());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn manifest_drives_a_full_job() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("from_manifest.pdf");
    let manifest_path = dir.path().join("job.json");

    let manifest = serde_json::json!({
        "items": [
            {"kind": "blank"},
            {"kind": "blank"},
            {"kind": "blank"}
        ],
        "options": {"layout_mode": "two_up", "cover_preview": false},
        "output_pdf": out,
    });
    fs::write(&manifest_path, manifest.to_string()).unwrap();

    run_manifest(&manifest_path).await.unwrap();
    assert_eq!(output_page_count(&out), 2);
}

#[test]
fn preview_matches_the_two_up_plan() {
    let dir = TempDir::new().unwrap();
    let items = vec![png_item(dir.path(), "page.png")];
    let pages = expand_pages(&items).unwrap();

    // WYSIWYG: the preview plan is the output plan
    let spreads = preview_spreads(&pages, true);
    assert_eq!(spreads, two_up_spreads(&pages, true));

    let canvas = render_spread_preview(&items, &spreads[0], 72, false).unwrap();
    assert_eq!(canvas.width(), (11.69f32 * 72.0).round() as u32);
    assert_eq!(canvas.height(), (8.27f32 * 72.0).round() as u32);
}

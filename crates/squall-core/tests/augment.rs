//! End-to-end runs of the augmentation pipeline against temporary directories.

use std::collections::BTreeSet;
use std::path::Path;

use image::{Rgb, RgbImage};
use squall_core::{
    AugmentationJob, Augmenter, CancelToken, Config, EffectKind, RunError, SkipKind, SquallError,
};

fn sample_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn seeded_config() -> Config {
    let mut config = Config::default();
    config.processing.seed = Some(7);
    config
}

fn output_names(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

async fn run(dir: &Path, config: &Config) -> Result<squall_core::RunReport, SquallError> {
    let job = AugmentationJob::new(dir, config);
    Augmenter::new(config)?.run(&job, &CancelToken::new()).await
}

#[tokio::test]
async fn missing_directory_is_fatal_and_writes_nothing() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("does-not-exist");

    let err = run(&missing, &seeded_config()).await.unwrap_err();

    assert!(matches!(err, SquallError::Run(RunError::DirectoryNotFound(ref p)) if p == &missing));
    assert!(!missing.exists());
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn directory_without_images_is_fatal_and_creates_no_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.txt"), "no images here").unwrap();
    std::fs::write(dir.path().join("data.csv"), "a,b").unwrap();

    let err = run(dir.path(), &seeded_config()).await.unwrap_err();

    assert!(matches!(err, SquallError::Run(RunError::NoImagesFound(_))));
    assert!(!dir.path().join("Augmented_Images").exists());
}

#[tokio::test]
async fn valid_images_plus_one_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    sample_image(32, 24).save(dir.path().join("field.png")).unwrap();
    sample_image(20, 20).save(dir.path().join("roof.PNG")).unwrap();
    sample_image(16, 40).save(dir.path().join("road.jpg")).unwrap();
    std::fs::write(dir.path().join("corrupt.jpeg"), b"\xFF\xD8\xFF garbage").unwrap();

    let report = run(dir.path(), &seeded_config()).await.unwrap();

    assert_eq!(report.images_found, 4);
    assert_eq!(report.images_processed, 3);
    assert_eq!(report.images_skipped_unreadable, 1);
    assert_eq!(report.outputs_written, 9);
    assert_eq!(report.outputs_failed, 0);
    assert!(!report.cancelled);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].kind, SkipKind::ImageDecodeError);
    assert_eq!(report.skipped[0].file, dir.path().join("corrupt.jpeg"));

    let out = dir.path().join("Augmented_Images");
    assert_eq!(report.output_dir, out);
    let names = output_names(&out);
    let expected: BTreeSet<String> = [
        "rain_field.png",
        "fog_field.png",
        "dark_field.png",
        "rain_roof.PNG",
        "fog_roof.PNG",
        "dark_roof.PNG",
        "rain_road.jpg",
        "fog_road.jpg",
        "dark_road.jpg",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn outputs_keep_source_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    sample_image(45, 17).save(dir.path().join("strip.png")).unwrap();
    sample_image(30, 50).save(dir.path().join("tall.jpg")).unwrap();

    run(dir.path(), &seeded_config()).await.unwrap();

    let out = dir.path().join("Augmented_Images");
    for prefix in ["rain", "fog", "dark"] {
        let strip = image::open(out.join(format!("{prefix}_strip.png"))).unwrap();
        assert_eq!((strip.width(), strip.height()), (45, 17));
        let tall = image::open(out.join(format!("{prefix}_tall.jpg"))).unwrap();
        assert_eq!((tall.width(), tall.height()), (30, 50));
    }
}

#[tokio::test]
async fn rerun_overwrites_instead_of_duplicating() {
    let dir = tempfile::tempdir().unwrap();
    sample_image(10, 10).save(dir.path().join("a.png")).unwrap();
    sample_image(12, 8).save(dir.path().join("b.jpg")).unwrap();
    let config = seeded_config();

    let first = run(dir.path(), &config).await.unwrap();
    let names_after_first = output_names(&dir.path().join("Augmented_Images"));
    let second = run(dir.path(), &config).await.unwrap();
    let names_after_second = output_names(&dir.path().join("Augmented_Images"));

    assert_eq!(first.images_found, 2);
    // Outputs live in a subdirectory, so they are not picked up as new input
    assert_eq!(second.images_found, 2);
    assert_eq!(names_after_first.len(), 6);
    assert_eq!(names_after_first, names_after_second);
}

#[tokio::test]
async fn low_light_output_is_half_brightness_at_fixed_scale() {
    let dir = tempfile::tempdir().unwrap();
    let source = sample_image(8, 8);
    source.save(dir.path().join("tile.png")).unwrap();

    let mut config = seeded_config();
    config.effects.low_light.min_scale = 0.5;
    config.effects.low_light.max_scale = 0.5;
    run(dir.path(), &config).await.unwrap();

    let dark = image::open(dir.path().join("Augmented_Images").join("dark_tile.png"))
        .unwrap()
        .to_rgb8();
    for (src, dst) in source.pixels().zip(dark.pixels()) {
        for c in 0..3 {
            assert_eq!(dst[c], (0.5 * src[c] as f64).round() as u8);
        }
    }
}

#[tokio::test]
async fn fog_output_matches_blend_when_blur_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let source = sample_image(8, 8);
    source.save(dir.path().join("tile.png")).unwrap();

    let mut config = seeded_config();
    config.effects.fog.min_intensity = 0.5;
    config.effects.fog.max_intensity = 0.5;
    config.effects.fog.blur_kernel_size = 1;
    run(dir.path(), &config).await.unwrap();

    let fog = image::open(dir.path().join("Augmented_Images").join("fog_tile.png"))
        .unwrap()
        .to_rgb8();
    for (src, dst) in source.pixels().zip(fog.pixels()) {
        for c in 0..3 {
            let expected = (0.5 * src[c] as f64 + 0.5 * 255.0).round().min(255.0) as u8;
            assert_eq!(dst[c], expected);
        }
    }
}

#[tokio::test]
async fn rain_without_streaks_is_scaled_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = RgbImage::from_pixel(6, 6, Rgb([100, 50, 255]));
    source.save(dir.path().join("tile.png")).unwrap();

    let mut config = seeded_config();
    config.effects.rain.min_streaks = 0;
    config.effects.rain.max_streaks = 0;
    run(dir.path(), &config).await.unwrap();

    let rain = image::open(dir.path().join("Augmented_Images").join("rain_tile.png"))
        .unwrap()
        .to_rgb8();
    assert!(rain.pixels().all(|p| p == &Rgb([80, 40, 204])));
}

#[tokio::test]
async fn single_worker_processes_everything() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..5 {
        sample_image(9, 9).save(dir.path().join(format!("img_{i}.png"))).unwrap();
    }
    let mut config = seeded_config();
    config.processing.parallel_workers = 1;

    let report = run(dir.path(), &config).await.unwrap();

    assert_eq!(report.images_processed, 5);
    assert_eq!(report.outputs_written, 15);
}

#[cfg(unix)]
#[tokio::test]
async fn write_failures_are_isolated_per_output() {
    let dir = tempfile::tempdir().unwrap();
    sample_image(10, 10).save(dir.path().join("a.png")).unwrap();
    let out = dir.path().join("Augmented_Images");
    std::fs::create_dir(&out).unwrap();
    // A directory squatting on one output name makes that single write fail
    std::fs::create_dir(out.join("fog_a.png")).unwrap();

    let report = run(dir.path(), &seeded_config()).await.unwrap();

    assert_eq!(report.images_processed, 1);
    assert_eq!(report.outputs_written, 2);
    assert_eq!(report.outputs_failed, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].kind, SkipKind::ImageWriteError);
    assert!(out.join("rain_a.png").is_file());
    assert!(out.join("dark_a.png").is_file());
}

#[tokio::test]
async fn file_over_budget_keeps_written_outputs_and_counts_as_timeout() {
    let dir = tempfile::tempdir().unwrap();
    sample_image(600, 600).save(dir.path().join("big.png")).unwrap();

    let mut config = seeded_config();
    config.processing.parallel_workers = 1;
    config.processing.effects = vec![EffectKind::Fog, EffectKind::LowLight];
    // The 15-tap fog blur alone outlasts this budget
    config.limits.file_timeout_ms = 1;

    let report = run(dir.path(), &config).await.unwrap();

    assert_eq!(report.images_timed_out, 1);
    assert_eq!(report.images_processed, 0);
    assert_eq!(report.images_skipped_unreadable, 0);
    assert_eq!(report.images_handled(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].kind, SkipKind::Timeout);

    // The run joins the worker, so the disk is settled and matches the report
    let out = dir.path().join("Augmented_Images");
    let on_disk = if out.exists() { output_names(&out).len() } else { 0 };
    assert!(report.outputs_written <= 1);
    assert_eq!(report.outputs_written, on_disk);
    assert!(!out.join("dark_big.png").exists());
}

#[tokio::test]
async fn unvalidated_config_is_rejected_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    sample_image(8, 8).save(dir.path().join("a.png")).unwrap();

    let mut config = seeded_config();
    config.processing.parallel_workers = 0;
    let err = run(dir.path(), &config).await.unwrap_err();
    assert!(matches!(err, SquallError::Config(_)));

    let mut config = seeded_config();
    config.effects.low_light.min_scale = f32::NAN;
    let err = run(dir.path(), &config).await.unwrap_err();
    assert!(matches!(err, SquallError::Config(_)));

    assert!(!dir.path().join("Augmented_Images").exists());
}

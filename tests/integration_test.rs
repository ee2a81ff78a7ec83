use std::env;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;

use gifforge::render::preview_temp_path;
use gifforge::{build_plan, export, render_preview, Error, ExportSettings, FrameList};

/// Fresh per-test directory under the system temp dir. The pid suffix keeps
/// concurrent test runs from different processes apart.
fn fixture_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("gifforge-test-{}-{}", process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    // JPEG cannot carry an alpha channel; everything else is written as RGBA.
    if path.extension().is_some_and(|e| e == "jpg" || e == "jpeg") {
        image::RgbImage::from_pixel(width, height, image::Rgb([120, 40, 200]))
            .save(&path)
            .unwrap();
    } else {
        image::RgbaImage::from_pixel(width, height, image::Rgba([120, 40, 200, 255]))
            .save(&path)
            .unwrap();
    }
    path
}

#[test]
fn scan_sorts_lexicographically_and_filters_extensions() {
    let dir = fixture_dir("scan");
    write_image(&dir, "c.bmp", 8, 8);
    write_image(&dir, "a.png", 8, 8);
    write_image(&dir, "b.jpg", 8, 8);
    fs::write(dir.join("notes.txt"), "not an image").unwrap();

    let frames = FrameList::scan(&dir).unwrap();
    let names: Vec<_> = frames
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.png", "b.jpg", "c.bmp"]);
}

#[test]
fn scan_missing_directory_fails() {
    let dir = env::temp_dir().join(format!("gifforge-test-{}-missing", process::id()));
    let _ = fs::remove_dir_all(&dir);

    let result = FrameList::scan(&dir);
    assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
}

#[test]
fn empty_list_is_rejected_before_anything_is_written() {
    let dir = fixture_dir("empty-export");
    let dest = dir.join("out.gif");

    let result = build_plan(&FrameList::default(), &ExportSettings::default());
    assert!(matches!(result, Err(Error::EmptyFrameList)));
    assert!(!dest.exists());
}

#[test]
fn export_round_trips_frames_and_delay() {
    let dir = fixture_dir("export");
    write_image(&dir, "a.png", 64, 48);
    write_image(&dir, "b.png", 64, 48);
    write_image(&dir, "c.png", 64, 48);

    let frames = FrameList::scan(&dir).unwrap();
    let plan = build_plan(
        &frames,
        &ExportSettings {
            delay: 0.5,
            random_order: false,
        },
    )
    .unwrap();
    assert_eq!(plan.delay_ms, 500);

    let dest = dir.join("out.gif");
    export(&plan, &dest).unwrap();

    let decoded = GifDecoder::new(BufReader::new(fs::File::open(&dest).unwrap()))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();

    assert_eq!(decoded.len(), 3);
    for frame in &decoded {
        assert_eq!(frame.delay().numer_denom_ms(), (500, 1));
        assert_eq!(frame.buffer().dimensions(), (64, 48));
    }
}

#[test]
fn failed_export_leaves_no_partial_file() {
    let dir = fixture_dir("partial");
    write_image(&dir, "a.png", 16, 16);
    fs::write(dir.join("b.png"), "not a png").unwrap();

    let frames = FrameList::scan(&dir).unwrap();
    let plan = build_plan(&frames, &ExportSettings::default()).unwrap();
    let dest = dir.join("out.gif");

    assert!(export(&plan, &dest).is_err());
    assert!(!dest.exists());
}

#[test]
fn preview_downscales_and_cleans_up_its_temp_file() {
    let dir = fixture_dir("preview");
    write_image(&dir, "a.png", 640, 480);
    write_image(&dir, "b.png", 640, 480);

    let frames = FrameList::scan(&dir).unwrap();
    let settings = ExportSettings {
        delay: 0.3,
        random_order: false,
    };

    let preview = render_preview(&build_plan(&frames, &settings).unwrap()).unwrap();
    assert_eq!(preview.delay_ms, 300);
    assert_eq!(preview.frames.len(), 2);
    assert_eq!(preview.frames[0].dimensions(), (300, 225));
    assert!(!preview_temp_path().exists());

    // A frame that fails to decode aborts the preview; the temp file must
    // still be removed.
    fs::write(dir.join("c.png"), "not a png").unwrap();
    let frames = FrameList::scan(&dir).unwrap();
    assert!(render_preview(&build_plan(&frames, &settings).unwrap()).is_err());
    assert!(!preview_temp_path().exists());
}

#[test]
fn settings_round_trip_and_fallbacks() {
    let dir = fixture_dir("settings");
    let path = dir.join("settings.json");

    // Absent file falls back to defaults without an error.
    assert_eq!(
        ExportSettings::load_or_default(&path),
        ExportSettings::default()
    );

    let saved = ExportSettings {
        delay: 2.0,
        random_order: true,
    };
    saved.try_save(&path).unwrap();
    assert_eq!(ExportSettings::load_or_default(&path), saved);

    // Corrupt contents also fall back to defaults.
    fs::write(&path, "{ not json").unwrap();
    assert_eq!(
        ExportSettings::load_or_default(&path),
        ExportSettings::default()
    );
}

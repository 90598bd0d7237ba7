use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgba, RgbaImage};
use image_engine::{GridDetector, SymbolDetector};
use tabular::Dataset;

fn detect_file(path: &Path) -> Option<String> {
    let img = image::open(path).expect("Failed to open generated image");
    GridDetector.detect(&img)
}

fn detect(img: &image::RgbImage) -> Option<String> {
    GridDetector.detect(&DynamicImage::ImageRgb8(img.clone()))
}

/// A 300x300 logo: dark red disc on a transparent background.
fn write_logo(dir: &Path) -> PathBuf {
    let path = dir.join("logo.png");
    let logo = RgbaImage::from_fn(300, 300, |x, y| {
        let (dx, dy) = (x as i32 - 150, y as i32 - 150);
        if dx * dx + dy * dy < 140 * 140 {
            Rgba([150, 10, 10, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    logo.save(&path).expect("Failed to write logo");
    path
}

fn write_broken_logo(dir: &Path) -> PathBuf {
    let path = dir.join("broken.png");
    std::fs::write(&path, b"definitely not a png").expect("Failed to write logo");
    path
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn roll_dataset() -> Dataset {
    Dataset::new(
        strings(&["Roll", "Name"]),
        vec![
            strings(&["101", "Asha"]),
            strings(&["", "Ravi"]),
            strings(&["103", "Omar"]),
        ],
    )
}

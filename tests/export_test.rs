//! PDF output integration tests

use cableway_common::export::assembler::assemble;
use cableway_common::{FormSnapshot, ImageList, Section};
use cableway_report::export::{generate_report, render_pdf};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

fn station_form() -> FormSnapshot {
    FormSnapshot::from_pairs([
        ("Station Name", "Intake"),
        ("Station Number", "12"),
        ("Inspector Name", "J. Doe"),
        ("Reviewer Name", "R. Roe"),
        ("Date Inspected", "2024-03-10"),
        ("Span (m)", "85"),
        ("Rust", "Light surface rust near anchor"),
        ("Comments", "Retension next season"),
    ])
    .expect("valid form")
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(8, 6, image::Rgb([120, 160, 200]))
        .save(&path)
        .expect("write png");
    path
}

fn write_jpeg(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(8, 6, image::Rgb([30, 90, 60]))
        .save(&path)
        .expect("write jpeg");
    path
}

fn write_broken(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not an image").expect("write broken");
    path
}

#[test]
fn test_generate_without_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    let report = generate_report(&station_form(), &ImageList::new(), date(), dir.path())
        .expect("generation failed");

    assert_eq!(report.file_name, "Cableway_Inspection_2024-03-14_Intake_12.pdf");
    assert_eq!(report.path, dir.path().join(&report.file_name));
    assert_eq!(report.page_count, 3);
    assert_eq!(report.placed_images, 0);

    let bytes = std::fs::read(&report.path).expect("read report");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_generate_empty_form() {
    let dir = tempdir().expect("Failed to create temp dir");

    let report = generate_report(&FormSnapshot::empty(), &ImageList::new(), date(), dir.path())
        .expect("empty form must still generate");

    assert_eq!(report.file_name, "Cableway_Inspection_2024-03-14__.pdf");
    assert!(report.path.exists());
}

#[test]
fn test_generate_with_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut images = ImageList::new();
    for i in 0..7 {
        let path = if i % 2 == 0 {
            write_png(dir.path(), &format!("photo_{i}.png"))
        } else {
            write_jpeg(dir.path(), &format!("photo_{i}.jpg"))
        };
        assert!(images.push(path));
    }

    let report = generate_report(&station_form(), &images, date(), dir.path()).expect("generation failed");

    // title, cable, 2 photo pages, summary
    assert_eq!(report.page_count, 5);
    assert_eq!(report.placed_images, 7);
    assert_eq!(report.skipped_images, 0);
}

#[test]
fn test_undecodable_image_is_skipped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut images = ImageList::new();
    images.push(write_png(dir.path(), "a.png"));
    images.push(write_png(dir.path(), "b.png"));
    images.push(write_jpeg(dir.path(), "c.jpg"));
    images.push(write_broken(dir.path(), "broken.jpg"));
    images.push(write_png(dir.path(), "d.png"));
    images.push(dir.path().join("missing.png"));

    let document = assemble(&station_form(), &images, date());
    let rendered = render_pdf(&document).expect("render must not abort");

    assert_eq!(rendered.placed_images, 4);
    assert_eq!(rendered.skipped_images, 2);
    assert!(rendered.bytes.starts_with(b"%PDF"));
}

#[test]
fn test_three_valid_one_broken_two_valid() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut images = ImageList::new();
    for name in ["1.png", "2.png", "3.png"] {
        images.push(write_png(dir.path(), name));
    }
    images.push(write_broken(dir.path(), "4.png"));
    for name in ["5.jpg", "6.jpg"] {
        images.push(write_jpeg(dir.path(), name));
    }

    let report = generate_report(&station_form(), &images, date(), dir.path()).expect("generation failed");
    assert_eq!(report.placed_images, 5);
    assert_eq!(report.skipped_images, 1);
    assert_eq!(report.page_count, 4);
}

#[test]
fn test_photo_page_counts() {
    for (count, expected) in [(0usize, 0usize), (1, 1), (6, 1), (7, 2), (13, 3)] {
        let mut images = ImageList::new();
        for i in 0..count {
            images.push(format!("photo_{i}.jpg"));
        }
        let document = assemble(&station_form(), &images, date());
        assert_eq!(document.pages_in(Section::Photos).count(), expected, "{count} images");
    }
}

#[test]
fn test_same_input_same_document() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut images = ImageList::new();
    images.push(write_png(dir.path(), "a.png"));

    let first = assemble(&station_form(), &images, date());
    let second = assemble(&station_form(), &images, date());
    assert_eq!(first, second);

    let a = render_pdf(&first).expect("render");
    std::thread::sleep(std::time::Duration::from_millis(1100));
    let b = render_pdf(&second).expect("render");
    assert_eq!(a.page_count, b.page_count);
    assert_eq!(a.placed_images, b.placed_images);
    assert!(a.bytes == b.bytes, "renders differ");
}

#[test]
fn test_regenerated_file_is_byte_identical() {
    let dir = tempdir().expect("Failed to create temp dir");
    let photos = dir.path().join("photos");
    std::fs::create_dir(&photos).expect("create photos dir");
    let mut images = ImageList::new();
    images.push(write_png(&photos, "a.png"));
    images.push(write_jpeg(&photos, "b.jpg"));

    let out_a = dir.path().join("a");
    let out_b = dir.path().join("b");
    std::fs::create_dir(&out_a).expect("create out a");
    std::fs::create_dir(&out_b).expect("create out b");

    let first = generate_report(&station_form(), &images, date(), &out_a).expect("generation failed");
    let second = generate_report(&station_form(), &images, date(), &out_b).expect("generation failed");

    let bytes_a = std::fs::read(&first.path).expect("read first");
    let bytes_b = std::fs::read(&second.path).expect("read second");
    assert!(bytes_a == bytes_b, "regenerated report differs");
}

#[test]
fn test_regenerate_overwrites_existing_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("Cableway_Inspection_2024-03-14_Intake_12.pdf");
    std::fs::write(&path, b"stale").expect("write stale");

    generate_report(&station_form(), &ImageList::new(), date(), dir.path()).expect("generation failed");

    let bytes = std::fs::read(&path).expect("read report");
    assert!(bytes.starts_with(b"%PDF"));
    let entries = std::fs::read_dir(dir.path()).expect("list dir").count();
    assert_eq!(entries, 1, "temp file left behind");
}

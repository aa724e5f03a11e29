use deck_manual::content::SCREENSHOT_PAGES;
use deck_manual::DeckAssembler;
use deck_pptx::{DeckOutline, PptxReader};
use std::path::Path;

fn write_screenshots(dir: &Path) {
    std::fs::create_dir_all(dir.join("guide-screenshots")).unwrap();
    for page in &SCREENSHOT_PAGES {
        image::RgbImage::new(160, 100).save(dir.join(page.image)).unwrap();
    }
}

fn build(dir: &Path) -> DeckOutline {
    let path = DeckAssembler::new(dir).run().unwrap();
    assert!(path.is_file());
    PptxReader::new().open(&path).unwrap()
}

#[test]
fn test_deck_without_screenshots() {
    let dir = tempfile::tempdir().unwrap();
    let outline = build(dir.path());

    assert_eq!(outline.slide_count(), 8);
    assert!(outline.slides.iter().all(|s| s.pictures == 0));
}

#[test]
fn test_deck_with_all_screenshots() {
    let dir = tempfile::tempdir().unwrap();
    write_screenshots(dir.path());
    let outline = build(dir.path());

    assert_eq!(outline.slide_count(), 8);
    let pictures: Vec<usize> = outline.slides.iter().map(|s| s.pictures).collect();
    assert_eq!(pictures, vec![0, 0, 1, 1, 1, 1, 1, 0]);
}

#[test]
fn test_partial_screenshots_are_skipped_silently() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("guide-screenshots")).unwrap();
    image::RgbImage::new(40, 20)
        .save(dir.path().join(SCREENSHOT_PAGES[1].image))
        .unwrap();

    let outline = build(dir.path());
    assert_eq!(outline.picture_count(), 1);
    assert_eq!(outline.slides[3].pictures, 1);
}

#[test]
fn test_rerun_overwrites_output() {
    let dir = tempfile::tempdir().unwrap();
    let first = build(dir.path());

    write_screenshots(dir.path());
    let second = build(dir.path());

    assert_eq!(first.slide_count(), second.slide_count());
    assert_eq!(first.picture_count(), 0);
    assert_eq!(second.picture_count(), 5);

    std::fs::remove_dir_all(dir.path().join("guide-screenshots")).unwrap();
    let third = build(dir.path());
    assert_eq!(third, first);
}

#[test]
fn test_every_slide_has_one_title() {
    let dir = tempfile::tempdir().unwrap();
    let outline = build(dir.path());

    for slide in &outline.slides {
        assert_eq!(slide.title_boxes, 1, "slide {}", slide.number);
    }

    let sizes: Vec<f64> = outline
        .slides
        .iter()
        .map(|s| s.title_size_pt.unwrap())
        .collect();
    assert_eq!(sizes, vec![60.0, 40.0, 40.0, 40.0, 40.0, 40.0, 40.0, 48.0]);
    assert!(sizes[0] > sizes[1] && sizes[7] > sizes[1]);
}

#[test]
fn test_written_content() {
    let dir = tempfile::tempdir().unwrap();
    let outline = build(dir.path());

    assert_eq!(outline.slides[0].title.as_deref(), Some("LNポータルシステム"));
    assert_eq!(outline.slides[7].title.as_deref(), Some("まとめ"));
    assert_eq!(outline.slides[0].background, Some(deck_core::BRAND_BLUE));
    assert_eq!(outline.slides[1].background, Some(deck_core::Rgb(248, 250, 252)));

    let summary = &outline.slides[7].paragraphs;
    assert!(summary
        .iter()
        .any(|p| p == "https://todaizumi-itj.github.io/ln-public/lnportal.html"));

    let overview = &outline.slides[1].paragraphs;
    assert!(overview.iter().any(|p| p == "案件（LN）の一元管理"));
}

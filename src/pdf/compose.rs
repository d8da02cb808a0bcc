//! PDF composition: combining images into a document and rendering
//! filled text templates onto pages.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::{AppError, Result};

// US Letter in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 36.0;

const FONT_SIZE: f32 = 11.0;
const LEADING: f32 = 14.0;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2.0 * MARGIN) / LEADING) as usize;

/// Combine raster image files into one PDF, one image per page, scaled
/// to fit the page while keeping its aspect ratio.
pub fn images_to_pdf(images: &[PathBuf], output: &Path) -> Result<()> {
    if images.is_empty() {
        return Err(AppError::validation("No images selected"));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();

    for path in images {
        let (jpeg, width, height) = load_as_jpeg(path)?;

        let xobject_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(width as i64),
                "Height" => Object::Integer(height as i64),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        // Fit inside the printable area.
        let avail_w = PAGE_WIDTH - 2.0 * MARGIN;
        let avail_h = PAGE_HEIGHT - 2.0 * MARGIN;
        let scale = (avail_w / width as f32).min(avail_h / height as f32).min(1.0);
        let draw_w = width as f32 * scale;
        let draw_h = height as f32 * scale;
        let x = (PAGE_WIDTH - draw_w) / 2.0;
        let y = (PAGE_HEIGHT - draw_h) / 2.0;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(draw_w),
                        Object::Real(0.0),
                        Object::Real(0.0),
                        Object::Real(draw_h),
                        Object::Real(x),
                        Object::Real(y),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => xobject_id },
            },
        });
        kids.push(page_id.into());
    }

    finish_document(&mut doc, pages_id, kids, output)
}

/// Render plain text onto one or more PDF pages (Helvetica, fixed
/// leading). Used for generated invoices.
pub fn text_to_pdf(text: &str, output: &Path) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let lines: Vec<&str> = text.lines().collect();
    let mut kids = Vec::new();

    for chunk in lines.chunks(LINES_PER_PAGE.max(1)) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Real(FONT_SIZE)]),
            Operation::new("TL", vec![Object::Real(LEADING)]),
            Operation::new(
                "Td",
                vec![Object::Real(MARGIN), Object::Real(PAGE_HEIGHT - MARGIN - FONT_SIZE)],
            ),
        ];
        for line in chunk {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    finish_document(&mut doc, pages_id, kids, output)
}

/// Attach the page tree and catalog, then save.
fn finish_document(doc: &mut Document, pages_id: lopdf::ObjectId, kids: Vec<Object>, output: &Path) -> Result<()> {
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    doc.save(output)?;
    Ok(())
}

/// Read an image file as JPEG bytes plus dimensions. JPEG inputs are
/// embedded verbatim; anything else is decoded and re-encoded.
fn load_as_jpeg(path: &Path) -> Result<(Vec<u8>, u32, u32)> {
    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes)?;

    if format == ImageFormat::Jpeg {
        let (width, height) = image::load_from_memory(&bytes).map(|img| (img.width(), img.height()))?;
        return Ok((bytes, width, height));
    }

    let decoded = image::load_from_memory(&bytes)?.to_rgb8();
    let (width, height) = (decoded.width(), decoded.height());

    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 90);
    decoded.write_with_encoder(encoder)?;
    Ok((jpeg, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_to_pdf_one_page_per_image() {
        let dir = tempfile::tempdir().unwrap();

        let mut inputs = Vec::new();
        for (i, color) in [[255u8, 0, 0], [0, 255, 0]].iter().enumerate() {
            let path = dir.path().join(format!("img{i}.png"));
            image::RgbImage::from_pixel(20, 10, image::Rgb(*color))
                .save(&path)
                .unwrap();
            inputs.push(path);
        }

        let out = dir.path().join("album.pdf");
        images_to_pdf(&inputs, &out).unwrap();

        assert_eq!(crate::pdf::page_count(&out).unwrap(), 2);
    }

    #[test]
    fn test_images_to_pdf_rejects_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.pdf");
        assert!(images_to_pdf(&[], &out).is_err());
    }

    #[test]
    fn test_text_to_pdf_paginates_long_text() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("long.pdf");

        let text = (0..150).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        text_to_pdf(&text, &out).unwrap();

        assert!(crate::pdf::page_count(&out).unwrap() >= 2);
    }
}

//! Embedded image extraction.
//!
//! Walks each page's XObject resources and writes raster images to an
//! output folder. DCTDecode streams are already JPEG data and are saved
//! as-is; flate-compressed raw samples are rebuilt into PNGs when the
//! color space is one we can map.

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, Stream};
use tracing::warn;

use crate::error::{AppError, Result};

/// Record of one image pulled out of a PDF. Session-scoped; nothing is
/// persisted beyond the written file.
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    pub filename: String,
    pub page: u32,
    pub byte_size: u64,
}

/// Extract all embedded raster images from a PDF into `output_dir`.
///
/// Returns one record per written file. Streams with unsupported filters
/// or color spaces are skipped with a warning.
pub fn extract_images(pdf_path: &Path, output_dir: &Path) -> Result<Vec<ExtractedImage>> {
    let doc = Document::load(pdf_path)?;
    std::fs::create_dir_all(output_dir)?;

    let mut extracted = Vec::new();

    for (page_num, page_id) in doc.get_pages() {
        let page_dict = doc.get_dictionary(page_id)?;
        let Some(resources) = resolve_dict(&doc, page_dict.get(b"Resources").ok()) else {
            continue;
        };
        let Some(xobjects) = resolve_dict(&doc, resources.get(b"XObject").ok()) else {
            continue;
        };

        let mut index = 0u32;
        for (_name, obj) in xobjects.iter() {
            let Some(stream) = resolve_stream(&doc, obj) else {
                continue;
            };
            if !is_image(stream) {
                continue;
            }

            index += 1;
            match write_image(stream, output_dir, page_num, index) {
                Ok(Some(record)) => extracted.push(record),
                Ok(None) => {
                    warn!("Skipped unsupported image on page {page_num}");
                }
                Err(e) => {
                    warn!("Failed to extract image on page {page_num}: {e}");
                }
            }
        }
    }

    Ok(extracted)
}

/// Follow a reference (or take an inline dictionary) to a dictionary.
fn resolve_dict<'a>(doc: &'a Document, obj: Option<&'a Object>) -> Option<&'a Dictionary> {
    match obj? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Follow a reference to a stream object.
fn resolve_stream<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Stream> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_stream().ok(),
        Object::Stream(stream) => Some(stream),
        _ => None,
    }
}

fn is_image(stream: &Stream) -> bool {
    stream
        .dict
        .get(b"Subtype")
        .and_then(|o| o.as_name())
        .map(|name| name == b"Image")
        .unwrap_or(false)
}

/// First filter name applied to the stream, if any.
fn first_filter(stream: &Stream) -> Option<Vec<u8>> {
    match stream.dict.get(b"Filter").ok()? {
        Object::Name(name) => Some(name.clone()),
        Object::Array(array) => array.first().and_then(|o| o.as_name().ok()).map(|n| n.to_vec()),
        _ => None,
    }
}

fn dict_i64(dict: &Dictionary, key: &[u8]) -> Result<i64> {
    dict.get(key)?
        .as_i64()
        .map_err(|_| AppError::parse("Image stream missing integer attribute"))
}

/// Write one image stream to disk. Returns `None` for formats that can't
/// be represented.
fn write_image(stream: &Stream, output_dir: &Path, page: u32, index: u32) -> Result<Option<ExtractedImage>> {
    let filter = first_filter(stream);

    let (filename, path): (String, PathBuf);
    match filter.as_deref() {
        // JPEG data embedded directly.
        Some(b"DCTDecode") => {
            filename = format!("page{page}_img{index}.jpg");
            path = output_dir.join(&filename);
            std::fs::write(&path, &stream.content)?;
        }
        // Raw samples behind flate (or no) compression: rebuild a PNG.
        Some(b"FlateDecode") | None => {
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            let width = dict_i64(&stream.dict, b"Width")? as u32;
            let height = dict_i64(&stream.dict, b"Height")? as u32;

            let Some(image) = rebuild_raster(&stream.dict, data, width, height) else {
                return Ok(None);
            };

            filename = format!("page{page}_img{index}.png");
            path = output_dir.join(&filename);
            image.save(&path)?;
        }
        _ => return Ok(None),
    }

    let byte_size = std::fs::metadata(&path)?.len();
    Ok(Some(ExtractedImage {
        filename,
        page,
        byte_size,
    }))
}

/// Map raw samples to an image buffer for DeviceRGB / DeviceGray, 8 bpc.
fn rebuild_raster(dict: &Dictionary, data: Vec<u8>, width: u32, height: u32) -> Option<image::DynamicImage> {
    let bits = dict.get(b"BitsPerComponent").ok()?.as_i64().ok()?;
    if bits != 8 {
        return None;
    }

    let color_space = match dict.get(b"ColorSpace").ok()? {
        Object::Name(name) => name.clone(),
        _ => return None,
    };

    match color_space.as_slice() {
        b"DeviceRGB" => image::RgbImage::from_raw(width, height, data).map(image::DynamicImage::ImageRgb8),
        b"DeviceGray" => image::GrayImage::from_raw(width, height, data).map(image::DynamicImage::ImageLuma8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::compose;

    #[test]
    fn test_extract_images_from_composed_pdf() {
        let dir = tempfile::tempdir().unwrap();

        // Build a small JPEG on disk.
        let jpg_path = dir.path().join("input.jpg");
        let rgb = image::RgbImage::from_pixel(32, 24, image::Rgb([200, 40, 40]));
        rgb.save(&jpg_path).unwrap();

        // Combine it into a PDF, then pull it back out.
        let pdf_path = dir.path().join("combined.pdf");
        compose::images_to_pdf(&[jpg_path], &pdf_path).unwrap();

        let out_dir = dir.path().join("extracted");
        let images = extract_images(&pdf_path, &out_dir).unwrap();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].page, 1);
        assert!(images[0].filename.ends_with(".jpg"));
        assert!(images[0].byte_size > 0);

        // The embedded DCTDecode stream is the JPEG verbatim.
        let extracted = std::fs::read(out_dir.join(&images[0].filename)).unwrap();
        let original = std::fs::read(dir.path().join("input.jpg")).unwrap();
        assert_eq!(extracted, original);
    }

    #[test]
    fn test_pdf_without_images_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pdf_path = dir.path().join("text.pdf");
        compose::text_to_pdf("no pictures here", &pdf_path).unwrap();

        let out_dir = dir.path().join("extracted");
        let images = extract_images(&pdf_path, &out_dir).unwrap();
        assert!(images.is_empty());
    }
}

//! TrOCR encoder/decoder inference.
//!
//! The engine owns two ONNX sessions (vision encoder, text decoder) and
//! a tokenizer. Recognition runs the encoder once per image, then greedy
//! autoregressive decoding until EOS, a repetition loop, or the token
//! budget from config.

use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;
use ort::inputs;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Value;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::config::OcrConfig;
use crate::error::{AppError, Result};

// TrOCR expects 384x384 RGB input.
const INPUT_SIZE: u32 = 384;

// Roberta-style special tokens used by the TrOCR decoder.
const BOS_TOKEN_ID: u32 = 0;
const EOS_TOKEN_ID: u32 = 2;

#[derive(Debug)]
pub struct OcrEngine {
    encoder: Session,
    decoder: Session,
    tokenizer: Tokenizer,
    max_tokens: usize,
}

impl OcrEngine {
    /// Load the encoder, decoder, and tokenizer from the configured
    /// paths. Fails with a descriptive error when a file is missing.
    pub fn load(config: &OcrConfig) -> Result<Self> {
        for (label, path) in [
            ("encoder model", &config.encoder_model),
            ("decoder model", &config.decoder_model),
            ("tokenizer", &config.tokenizer),
        ] {
            if !path.exists() {
                return Err(AppError::ocr(format!(
                    "OCR {label} not found at {}",
                    path.display()
                )));
            }
        }

        info!("Loading OCR models");
        let encoder = build_session(&config.encoder_model)?;
        let decoder = build_session(&config.decoder_model)?;
        let tokenizer = Tokenizer::from_file(&config.tokenizer)
            .map_err(|e| AppError::ocr(format!("Failed to load tokenizer: {e}")))?;

        Ok(Self {
            encoder,
            decoder,
            tokenizer,
            max_tokens: config.max_tokens,
        })
    }

    /// Recognize text in an image file.
    pub fn recognize_file(&mut self, path: &Path) -> Result<String> {
        let image = image::open(path)?;
        self.recognize(&image)
    }

    /// Recognize text in an already-decoded image.
    pub fn recognize(&mut self, image: &DynamicImage) -> Result<String> {
        let pixels = preprocess(image);

        let encoder_input = Value::from_array((
            [1_usize, 3, INPUT_SIZE as usize, INPUT_SIZE as usize],
            pixels.into_boxed_slice(),
        ))
        .map_err(ocr_err)?;
        let encoder_outputs = self.encoder.run(inputs![encoder_input]).map_err(ocr_err)?;

        let (enc_shape, enc_data) = encoder_outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(ocr_err)?;
        debug!("Encoder hidden states shape: {enc_shape:?}");
        let enc_data: Vec<f32> = enc_data.to_vec();

        let mut input_ids: Vec<i64> = vec![BOS_TOKEN_ID as i64];
        let mut generated: Vec<u32> = Vec::new();

        for _ in 0..self.max_tokens {
            let ids = Value::from_array(([1_usize, input_ids.len()], input_ids.clone().into_boxed_slice()))
                .map_err(ocr_err)?;
            let hidden = Value::from_array((enc_shape.clone(), enc_data.clone().into_boxed_slice()))
                .map_err(ocr_err)?;
            let use_cache = Value::from_array(([1_usize], vec![false].into_boxed_slice())).map_err(ocr_err)?;

            let outputs = self
                .decoder
                .run(inputs![
                    "input_ids" => ids,
                    "encoder_hidden_states" => hidden,
                    "use_cache_branch" => use_cache
                ])
                .map_err(ocr_err)?;

            let (logits_shape, logits) = outputs[0].try_extract_tensor::<f32>().map_err(ocr_err)?;
            let vocab_size = logits_shape[2] as usize;
            let last_start = ((logits_shape[1] - 1) * logits_shape[2]) as usize;
            let last_logits = &logits[last_start..last_start + vocab_size];

            let next_token = last_logits
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(idx, _)| idx as u32)
                .ok_or_else(|| AppError::ocr("Decoder produced empty logits"))?;

            if next_token == EOS_TOKEN_ID {
                break;
            }

            generated.push(next_token);
            input_ids.push(next_token as i64);

            if is_repeating(&generated) {
                debug!("Stopping decode on repetition loop after {} tokens", generated.len());
                break;
            }
        }

        let text = self
            .tokenizer
            .decode(&generated, true)
            .map_err(|e| AppError::ocr(format!("Token decode failed: {e}")))?;
        debug!("Decoded {} tokens into {} chars", generated.len(), text.len());

        Ok(text.trim().to_string())
    }
}

fn build_session(path: &Path) -> Result<Session> {
    Session::builder()
        .and_then(|b| Ok(b.with_optimization_level(GraphOptimizationLevel::Level3)?))
        .and_then(|b| Ok(b.with_intra_threads(4)?))
        .and_then(|mut b| Ok(b.commit_from_file(path)?))
        .map_err(|e| AppError::ocr(format!("Failed to load model {}: {e}", path.display())))
}

fn ocr_err(e: ort::Error) -> AppError {
    AppError::ocr(e.to_string())
}

/// Flatten an image into normalized CHW samples at the model input size.
///
/// Input is converted to grayscale first (scanned documents recognize
/// better without color noise) and replicated back into three channels.
fn preprocess(image: &DynamicImage) -> Vec<f32> {
    let gray = image.to_luma8();
    let mut rgb = image::RgbImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let v = pixel[0];
        rgb.put_pixel(x, y, image::Rgb([v, v, v]));
    }

    let resized = DynamicImage::ImageRgb8(rgb)
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Lanczos3)
        .to_rgb8();

    let size = INPUT_SIZE as usize;
    let mut pixels = Vec::with_capacity(3 * size * size);
    for channel in 0..3 {
        for y in 0..INPUT_SIZE {
            for x in 0..INPUT_SIZE {
                pixels.push(resized.get_pixel(x, y)[channel] as f32 / 255.0);
            }
        }
    }
    pixels
}

/// Detect short repeating tails (1, 2, or 3 token cycles) that signal a
/// stuck decoder.
fn is_repeating(tokens: &[u32]) -> bool {
    for period in 1..=3usize {
        let window = period * 3;
        if tokens.len() < window.max(5) {
            continue;
        }
        let tail = &tokens[tokens.len() - window.max(5)..];
        if tail
            .iter()
            .enumerate()
            .all(|(i, &t)| t == tail[i % period])
        {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_shape_and_range() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(100, 40, image::Rgb([10, 200, 90])));
        let pixels = preprocess(&img);

        assert_eq!(pixels.len(), 3 * 384 * 384);
        assert!(pixels.iter().all(|&v| (0.0..=1.0).contains(&v)));

        // Grayscale conversion makes all three channels identical.
        let plane = 384 * 384;
        assert_eq!(pixels[0], pixels[plane]);
        assert_eq!(pixels[0], pixels[2 * plane]);
    }

    #[test]
    fn test_repetition_detection() {
        assert!(is_repeating(&[7, 7, 7, 7, 7]));
        assert!(is_repeating(&[1, 2, 1, 2, 1, 2]));
        assert!(is_repeating(&[5, 6, 7, 5, 6, 7, 5, 6, 7]));
        assert!(!is_repeating(&[1, 2, 3, 4, 5, 6, 7, 8]));
        assert!(!is_repeating(&[7, 7]));
    }

    #[test]
    fn test_load_fails_without_model_files() {
        let config = OcrConfig {
            encoder_model: "/nonexistent/encoder.onnx".into(),
            decoder_model: "/nonexistent/decoder.onnx".into(),
            tokenizer: "/nonexistent/tokenizer.json".into(),
            max_tokens: 16,
        };
        let err = OcrEngine::load(&config).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

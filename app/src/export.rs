//! Saving generated images as PNG, JPEG or a one-page PDF.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::info;

use crate::error::{Result, VericodeError};

/// A4 portrait in PDF points.
const PAGE_WIDTH_PT: f64 = 595.28;
const PAGE_HEIGHT_PT: f64 = 841.89;
/// Image placement on the page, in millimetres from the top-left corner.
const PDF_IMAGE_X_MM: f64 = 50.0;
const PDF_IMAGE_Y_MM: f64 = 50.0;
const PDF_IMAGE_WIDTH_MM: f64 = 100.0;

const JPEG_QUALITY: u8 = 100;

fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Pdf,
}

impl ExportFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| VericodeError::validation("Output file needs a .png, .jpg or .pdf extension"))?;
        ext.parse()
    }
}

impl FromStr for ExportFormat {
    type Err = VericodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            other => Err(VericodeError::validation(format!(
                "Unsupported output format '{other}' (expected png, jpg or pdf)"
            ))),
        }
    }
}

/// Files produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub path: PathBuf,
    /// Raster written next to a PDF; the caller may delete it.
    pub companion: Option<PathBuf>,
}

/// Write `image` to `path` in `format`.
pub fn export(image: &RgbImage, path: &Path, format: ExportFormat) -> Result<Exported> {
    let companion = match format {
        ExportFormat::Png => {
            image.save_with_format(path, ImageFormat::Png)?;
            None
        }
        ExportFormat::Jpeg => {
            let mut writer = BufWriter::new(File::create(path)?);
            image.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY))?;
            None
        }
        ExportFormat::Pdf => {
            let mut raster = path.with_extension("png");
            if raster == path {
                raster = path.with_extension("raster.png");
            }
            image.save_with_format(&raster, ImageFormat::Png)?;
            write_pdf(image, path)?;
            Some(raster)
        }
    };

    info!(path = %path.display(), ?format, "Saved QR code");
    Ok(Exported {
        path: path.to_path_buf(),
        companion,
    })
}

/// One A4 page with `image` 100 mm wide at (50 mm, 50 mm) from the top-left.
fn write_pdf(image: &RgbImage, path: &Path) -> Result<()> {
    let (w, h) = image.dimensions();
    let draw_w = mm_to_pt(PDF_IMAGE_WIDTH_MM);
    let draw_h = draw_w * f64::from(h) / f64::from(w.max(1));
    let x = mm_to_pt(PDF_IMAGE_X_MM);
    // PDF space grows upward from the bottom edge.
    let y = PAGE_HEIGHT_PT - mm_to_pt(PDF_IMAGE_Y_MM) - draw_h;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let xobject = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(w),
            "Height" => i64::from(h),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        image.as_raw().clone(),
    );
    let image_id = doc.add_object(xobject);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(draw_w),
                    0.into(),
                    0.into(),
                    real(draw_h),
                    real(x),
                    real(y),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content.encode().map_err(pdf_error)?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH_PT), real(PAGE_HEIGHT_PT)],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).map_err(pdf_error)?;
    Ok(())
}

fn real(v: f64) -> Object {
    Object::from(v)
}

fn pdf_error(e: impl std::fmt::Display) -> VericodeError {
    VericodeError::Export(e.to_string())
}

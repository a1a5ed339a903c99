//! Export boundary: pages in, artifact out.

use crate::error::Result;
use crate::model::{Document, Page};
use crate::paginate::paginate;
use crate::render::{to_markdown_page, RenderOptions};

/// Physical page size and raster scale for page captures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width in millimetres
    pub width_mm: f32,
    /// Page height in millimetres
    pub height_mm: f32,
    /// Raster scale factor
    pub scale: f32,
}

impl PageGeometry {
    /// A4 portrait (210 x 297 mm) at 2x raster scale.
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            scale: 2.0,
        }
    }

    /// Raster size in pixels at 96 dpi times `scale`.
    pub fn raster_size(&self) -> (u32, u32) {
        let px = |mm: f32| (mm / 25.4 * 96.0 * self.scale).round() as u32;
        (px(self.width_mm), px(self.height_mm))
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width_mm > self.height_mm
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Where and how to export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTarget {
    /// Output file name
    pub file_name: String,
    /// Page geometry
    pub geometry: PageGeometry,
}

impl ExportTarget {
    /// Create an A4 target with the given file name.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            geometry: PageGeometry::a4(),
        }
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

/// Output of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    /// Output file name
    pub file_name: String,
    /// MIME type of `data`
    pub mime_type: &'static str,
    /// Encoded output
    pub data: Vec<u8>,
    /// Number of pages captured
    pub page_count: usize,
}

/// Trait for page exporters.
///
/// Implementations capture one output page per input page, in order.
pub trait ExportAdapter: Send + Sync {
    /// Get the name of this adapter.
    fn name(&self) -> &str;

    /// Render the pages into an artifact.
    fn render(&self, pages: &[Page], target: &ExportTarget) -> Result<ExportArtifact>;
}

/// Paginate a document and hand all pages to `adapter` in one call.
pub fn export_document(
    adapter: &dyn ExportAdapter,
    document: &Document,
    target: &ExportTarget,
) -> Result<ExportArtifact> {
    let pages = paginate(&document.blocks);
    log::debug!("exporting {} page(s) via {}", pages.len(), adapter.name());
    adapter.render(&pages, target)
}

/// Exporter producing one Markdown section per page.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter {
    options: RenderOptions,
}

impl MarkdownExporter {
    /// Create an exporter with default render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter with custom render options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ExportAdapter for MarkdownExporter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn render(&self, pages: &[Page], target: &ExportTarget) -> Result<ExportArtifact> {
        let sections: Vec<String> = pages
            .iter()
            .map(|page| to_markdown_page(page, &self.options))
            .collect();

        Ok(ExportArtifact {
            file_name: target.file_name.clone(),
            mime_type: "text/markdown",
            data: sections.join("\n\n").into_bytes(),
            page_count: pages.len(),
        })
    }
}

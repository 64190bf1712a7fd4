use std::path::Path;

use paint_quantize::{
    CancelToken, CompileSummary, DrawOrderPlanner, IndexGrid, InstructionCompiler,
    InstructionStore, Palette, PlannedColor, Quantizer, RgbImage,
};

use crate::error::PipelineError;
use crate::models::RunSettings;
use crate::rendering::png_io;
use crate::services::JsonFileStore;

/// Result of a full compile run
#[derive(Debug)]
pub struct RunReport {
    /// Palette the image was quantized against
    pub palette: Palette,
    /// Instruction statistics
    pub summary: CompileSummary,
    /// Palette keys in draw order with their run counts
    pub order: Vec<PlannedColor>,
}

/// Pipeline that orchestrates palette → quantize → compile → order
pub struct CompilePipeline {
    settings: RunSettings,
    cancel: CancelToken,
}

impl CompilePipeline {
    pub fn new(settings: RunSettings) -> Self {
        Self {
            settings,
            cancel: CancelToken::new(),
        }
    }

    /// Use an externally controlled cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Derive the working palette for an image.
    pub fn build_palette(&self, image: &RgbImage) -> Result<Palette, PipelineError> {
        let palette = self.settings.palette_builder().build(image)?;
        tracing::info!(
            accents = palette.accents().len(),
            rows = palette.rows(),
            "Built palette"
        );
        Ok(palette)
    }

    /// Build the palette and quantize the image against it.
    pub fn quantize(&self, image: &RgbImage) -> Result<(Palette, IndexGrid), PipelineError> {
        let palette = self.build_palette(image)?;
        let grid = Quantizer::new(self.settings.metric).quantize_with_cancel(
            image,
            &palette,
            &self.cancel,
        )?;
        tracing::info!(width = grid.width(), height = grid.height(), "Quantized image");
        Ok((palette, grid))
    }

    /// Run the whole pipeline into `store`.
    pub fn run_into<S: InstructionStore + ?Sized>(
        &self,
        image: &RgbImage,
        store: &mut S,
    ) -> Result<RunReport, PipelineError> {
        let (palette, grid) = self.quantize(image)?;
        let summary = InstructionCompiler::new().compile_into(&grid, &palette, store, &self.cancel)?;
        let order = DrawOrderPlanner::new().plan_with_counts(&*store)?;
        Ok(RunReport {
            palette,
            summary,
            order,
        })
    }

    /// Run the whole pipeline into the configured JSON store.
    pub fn run(&self, image: &RgbImage) -> Result<RunReport, PipelineError> {
        let mut store = JsonFileStore::create(&self.settings.store_path)?;
        let report = self.run_into(image, &mut store)?;
        tracing::info!(
            store = %store.path().display(),
            colors = report.summary.colors,
            runs = report.summary.runs,
            "Compile run finished"
        );
        Ok(report)
    }

    /// Decode a PNG file and run the whole pipeline.
    pub fn run_file(&self, image_path: &Path) -> Result<RunReport, PipelineError> {
        let image = png_io::read_png(image_path)?;
        tracing::info!(
            path = %image_path.display(),
            width = image.width(),
            height = image.height(),
            "Loaded image"
        );
        self.run(&image)
    }
}

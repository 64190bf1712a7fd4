//! Domain-critical regression tests for paint-quantize.
//!
//! These tests exercise the whole pipeline and check properties that must
//! hold for any image, not just individual stage outputs. Each test documents
//! the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use crate::cancel::CancelToken;
    use crate::color::{Rgb, RgbImage};
    use crate::instructions::{
        compile_color, Instruction, InstructionCompiler, InstructionStore, MemoryStore,
    };
    use crate::metric::DistanceMetric;
    use crate::order::DrawOrderPlanner;
    use crate::palette::{Palette, PaletteBuilder, PaletteCoord, BASE_COLORS};
    use crate::quantize::{IndexGrid, Quantizer};

    /// Deterministic pseudo-random image (xorshift), so failures reproduce.
    fn noisy_image(width: usize, height: usize, seed: u32) -> RgbImage {
        let mut state = seed.max(1);
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        };
        let pixels = (0..width * height)
            .map(|_| {
                let v = next();
                // Few distinct values so runs actually form.
                Rgb::new(
                    ((v & 0x3) * 85) as u8,
                    (((v >> 2) & 0x3) * 85) as u8,
                    (((v >> 4) & 0x1) * 255) as u8,
                )
            })
            .collect();
        RgbImage::new(width, height, pixels).unwrap()
    }

    fn run_pipeline(image: &RgbImage, metric: DistanceMetric) -> (Palette, IndexGrid, MemoryStore) {
        let palette = PaletteBuilder::new(metric).build(image).unwrap();
        let grid = Quantizer::new(metric).quantize(image, &palette);
        let mut store = MemoryStore::new();
        InstructionCompiler::new()
            .compile_into(&grid, &palette, &mut store, &CancelToken::new())
            .unwrap();
        (palette, grid, store)
    }

    // ========================================================================
    // Quantization fidelity
    // ========================================================================

    /// If this breaks, it means: pixels that already use a palette color are
    /// being moved to a different entry, so a redraw of a paint-program
    /// screenshot would not reproduce it exactly.
    #[test]
    fn test_exact_palette_image_reproduces_coordinates() {
        let mut pixels = Vec::new();
        let mut expected = Vec::new();
        for (row, colors) in BASE_COLORS.iter().enumerate() {
            for (col, &color) in colors.iter().enumerate() {
                pixels.push(color);
                expected.push(PaletteCoord::new(row as u8, col as u8));
            }
        }
        let image = RgbImage::new(10, 2, pixels).unwrap();

        for metric in DistanceMetric::ALL {
            let grid = Quantizer::new(metric).quantize(&image, &Palette::base());
            assert_eq!(
                grid.cells(),
                expected.as_slice(),
                "REGRESSION: {metric} moved an exact palette color"
            );
        }
    }

    // ========================================================================
    // Run-length coverage
    // ========================================================================

    /// If this breaks, it means: runs overlap, leave gaps, or extend past the
    /// row they belong to. Summing run lengths over all colors must equal the
    /// cell count, each run must stay inside its row, and every cell must be
    /// covered by exactly one run of its own color.
    #[test]
    fn test_runs_tile_the_grid_exactly() {
        for (seed, metric) in [(7, DistanceMetric::Redmean), (11, DistanceMetric::Euclidean)] {
            let image = noisy_image(23, 9, seed);
            let (palette, grid, store) = run_pipeline(&image, metric);

            let mut covered = vec![false; grid.width() * grid.height()];
            let mut total = 0usize;
            for coord in palette.coords() {
                let encoded = store.get(coord).unwrap().unwrap();
                for run in Instruction::parse_sequence(&encoded).unwrap() {
                    assert!(
                        run.end() as usize <= grid.width(),
                        "REGRESSION: run {run} crosses the end of row {}",
                        run.line
                    );
                    for x in run.offset..run.end() {
                        let idx = run.line as usize * grid.width() + x as usize;
                        assert!(!covered[idx], "REGRESSION: cell {idx} covered twice");
                        assert_eq!(grid.cells()[idx], coord);
                        covered[idx] = true;
                    }
                    total += run.length as usize;
                }
            }
            assert_eq!(total, grid.width() * grid.height());
            assert!(covered.iter().all(|&c| c));
        }
    }

    /// If this breaks, it means: adjacent runs of one color were not merged,
    /// inflating the instruction count the replay agent has to execute.
    #[test]
    fn test_runs_are_maximal() {
        let image = noisy_image(31, 7, 3);
        let (palette, grid, _) = run_pipeline(&image, DistanceMetric::Redmean);
        for coord in palette.coords() {
            for run in compile_color(&grid, coord) {
                let y = run.line as usize;
                if run.offset > 0 {
                    assert_ne!(grid.get(run.offset as usize - 1, y), Some(coord));
                }
                assert_ne!(grid.get(run.end() as usize, y), Some(coord));
            }
        }
    }

    /// The canonical 2x2 example: [[R,R],[B,G]] yields exactly three runs.
    #[test]
    fn test_two_by_two_example() {
        let r = PaletteCoord::new(0, 3);
        let b = PaletteCoord::new(0, 8);
        let g = PaletteCoord::new(0, 6);
        let grid = IndexGrid::from_rows(&[vec![r, r], vec![b, g]]);

        assert_eq!(compile_color(&grid, r), vec![Instruction::new(0, 0, 2)]);
        assert_eq!(compile_color(&grid, b), vec![Instruction::new(1, 0, 1)]);
        assert_eq!(compile_color(&grid, g), vec![Instruction::new(1, 1, 1)]);

        let all: usize = Palette::base()
            .coords()
            .map(|c| compile_color(&grid, c).len())
            .sum();
        assert_eq!(all, 3);
    }

    // ========================================================================
    // Draw order
    // ========================================================================

    /// If this breaks, it means: the draw order drops or duplicates a color,
    /// or is not sorted by run count with enumeration-order ties.
    #[test]
    fn test_draw_order_is_sorted_permutation() {
        let image = noisy_image(40, 12, 19);
        let (palette, _, store) = run_pipeline(&image, DistanceMetric::DeltaE);
        let planned = DrawOrderPlanner::new().plan_with_counts(&store).unwrap();

        let keys: HashSet<PaletteCoord> = planned.iter().map(|p| p.coord).collect();
        let expected: HashSet<PaletteCoord> = palette.coords().collect();
        assert_eq!(planned.len(), palette.len());
        assert_eq!(keys, expected);

        for pair in planned.windows(2) {
            assert!(pair[0].runs >= pair[1].runs);
            if pair[0].runs == pair[1].runs {
                assert!(
                    pair[0].coord.flat() < pair[1].coord.flat(),
                    "REGRESSION: tie between {} and {} not in enumeration order",
                    pair[0].coord,
                    pair[1].coord
                );
            }
        }
    }

    // ========================================================================
    // Degenerate images
    // ========================================================================

    /// If this breaks, it means: a uniform image now produces accents or
    /// errors instead of completing with the base palette.
    #[test]
    fn test_uniform_image_completes_with_base_palette() {
        let image = RgbImage::filled(5, 3, Rgb::new(77, 140, 20)).unwrap();
        for metric in DistanceMetric::ALL {
            let (palette, grid, store) = run_pipeline(&image, metric);
            assert!(palette.accents().is_empty());

            let order = DrawOrderPlanner::new().plan_with_counts(&store).unwrap();
            // One color holds one run per row; every other entry is empty.
            assert_eq!(order[0].runs, 3);
            assert_eq!(order[0].coord, grid.get(0, 0).unwrap());
            assert!(order[1..].iter().all(|p| p.runs == 0));
        }
    }

    /// If this breaks, it means: a candidate pool smaller than the number of
    /// distinct colors no longer terminates cleanly within the accent target.
    #[test]
    fn test_small_candidate_pool_terminates() {
        let pixels: Vec<Rgb> = (0..256u32)
            .map(|i| Rgb::new(i as u8, (i * 7 % 256) as u8, (i * 13 % 256) as u8))
            .collect();
        let image = RgbImage::new(16, 16, pixels).unwrap();
        let palette = PaletteBuilder::new(DistanceMetric::Euclidean)
            .candidate_pool(12)
            .accent_count(10)
            .build(&image)
            .unwrap();
        assert!(palette.accents().len() <= 10);
    }

    /// If this breaks, it means: accents are no longer pairwise distinct or
    /// collide with the base palette.
    #[test]
    fn test_accents_respect_distinctiveness() {
        let image = noisy_image(64, 64, 5);
        for metric in DistanceMetric::ALL {
            let threshold = metric.default_distinctiveness();
            let palette = PaletteBuilder::new(metric).build(&image).unwrap();
            let accents = palette.accents();
            for (i, &a) in accents.iter().enumerate() {
                for &other in palette.colors()[..20 + i].iter() {
                    assert!(
                        metric.distance(a, other) > threshold,
                        "REGRESSION: {metric} accent {a} within {threshold} of {other}"
                    );
                }
            }
        }
    }
}

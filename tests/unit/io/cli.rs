//! Tests for command-line interface parsing and batch puzzle processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use rodgrid::io::cli::{Cli, PuzzleRunner};
    use rodgrid::io::configuration::{
        DEFAULT_CELL_PIXELS, DEFAULT_OUTPUT_DIR, DEFAULT_PUZZLE_COUNT, DEFAULT_SEED,
        SCATTER_SUFFIX, SOLVED_SUFFIX, START_SUFFIX,
    };
    use rodgrid::puzzle::policy::Difficulty;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn quiet_cli(output: &TempDir, extra: &[&str]) -> Cli {
        let output = output.path().to_string_lossy().into_owned();
        let mut args = vec!["rodgrid", "--quiet", "--output", output.as_str()];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    // Tests CLI parsing with no arguments uses defaults
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["rodgrid"]);

        assert_eq!(cli.source, None);
        assert_eq!(cli.difficulty, Difficulty::Medium);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.puzzles, DEFAULT_PUZZLE_COUNT);
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(cli.cell_pixels, DEFAULT_CELL_PIXELS);
        assert_eq!(cli.scatter, 0);
        assert!(!cli.solve);
        assert!(!cli.hint);
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming a long flag
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "rodgrid",
            "art/lake.png",
            "--difficulty",
            "large",
            "--seed",
            "123",
            "--puzzles",
            "3",
            "--output",
            "renders",
            "--cell-pixels",
            "16",
            "--scatter",
            "2",
            "--solve",
            "--hint",
            "--quiet",
        ]);

        assert_eq!(cli.source, Some(PathBuf::from("art/lake.png")));
        assert_eq!(cli.difficulty, Difficulty::Large);
        assert_eq!(cli.seed, 123);
        assert_eq!(cli.puzzles, 3);
        assert_eq!(cli.output, PathBuf::from("renders"));
        assert_eq!(cli.cell_pixels, 16);
        assert_eq!(cli.scatter, 2);
        assert!(cli.solve && cli.hint);
        assert!(!cli.should_show_progress());
    }

    // Tests short flags map to the same options
    // Verified by removing a short alias
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["rodgrid", "-d", "small", "-s", "7", "-n", "2", "-x", "1", "-S", "-q"]);

        assert_eq!(cli.difficulty, Difficulty::Small);
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.puzzles, 2);
        assert_eq!(cli.scatter, 1);
        assert!(cli.solve && cli.quiet);
    }

    // Tests unknown difficulty names are rejected
    // Verified by accepting free-form difficulty strings
    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["rodgrid", "--difficulty", "extreme"]).is_err());
    }

    // Tests output stems follow the source file name
    // Verified by always using the default stem
    #[test]
    fn test_stem_and_output_path() {
        let with_source = Cli::parse_from(["rodgrid", "pics/harbour.jpg", "-o", "renders"]);
        let without_source = Cli::parse_from(["rodgrid", "-o", "renders"]);

        assert_eq!(with_source.stem(), "harbour");
        assert_eq!(without_source.stem(), "puzzle");

        let runner = PuzzleRunner::new(with_source);
        assert_eq!(
            runner.output_path(2, START_SUFFIX),
            PathBuf::from("renders/harbour_2_start.png")
        );
    }

    // Tests a plain run writes one start layout per puzzle
    // Verified by exporting only the first puzzle
    #[test]
    fn test_process_writes_start_layouts() {
        let dir = TempDir::new().expect("temp dir");
        let mut runner = PuzzleRunner::new(quiet_cli(&dir, &["-n", "2", "-p", "4"]));

        runner.process().expect("process");

        for index in 0..2 {
            assert!(runner.output_path(index, START_SUFFIX).exists());
            assert!(!runner.output_path(index, SOLVED_SUFFIX).exists());
        }
    }

    // Tests scatter and solve stages each write their own layout
    // Verified by skipping the solved export
    #[test]
    fn test_process_scatter_and_solve() {
        let dir = TempDir::new().expect("temp dir");
        let source = dir.path().join("stripes.png");
        RgbaImage::from_fn(12, 12, |x, y| Rgba([(x * 20) as u8, (y * 20) as u8, 90, 255]))
            .save(&source)
            .expect("write source");
        let source = source.to_string_lossy().into_owned();
        let mut runner = PuzzleRunner::new(quiet_cli(
            &dir,
            &[source.as_str(), "-d", "small", "-x", "2", "-S", "-H", "-p", "3"],
        ));

        runner.process().expect("process");

        for suffix in [START_SUFFIX, SCATTER_SUFFIX, SOLVED_SUFFIX] {
            let path = runner.output_path(0, suffix);
            let written = image::open(&path).expect("readable png");
            assert_eq!((written.width(), written.height()), (12, 12));
        }
    }

    // Tests a zero puzzle count does nothing
    // Verified by processing one puzzle regardless of count
    #[test]
    fn test_process_zero_puzzles() {
        let dir = TempDir::new().expect("temp dir");
        let mut runner = PuzzleRunner::new(quiet_cli(&dir, &["-n", "0"]));

        runner.process().expect("process");

        assert!(!runner.output_path(0, START_SUFFIX).exists());
    }

    // Tests a missing source image is reported before any output
    // Verified by falling back to palette colours on load errors
    #[test]
    fn test_process_missing_source() {
        let dir = TempDir::new().expect("temp dir");
        let mut runner = PuzzleRunner::new(quiet_cli(&dir, &["does/not/exist.png"]));

        assert!(runner.process().is_err());
    }

    // Tests invalid cell sizes surface as errors
    // Verified by clamping the cell size silently
    #[test]
    fn test_process_invalid_cell_pixels() {
        let dir = TempDir::new().expect("temp dir");
        let mut runner = PuzzleRunner::new(quiet_cli(&dir, &["-p", "0"]));

        assert!(runner.process().is_err());
    }
}

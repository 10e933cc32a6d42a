use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_scene_hints(err);
        collector.collect_viewer_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use molscene::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser encountered an issue near line {} in {} format",
                    line, format
                ));
                self.add("Inspect the file around that line for malformed entries");
                self.add("Try specifying --infmt to ensure correct format detection");
                self.add_format_specific_parse_hints(*format);
            }

            IoError::UnsupportedTrajectoryFormat(fmt) => {
                self.add(format!(
                    "The '{}' format holds a single structure only",
                    fmt
                ));
                self.add("The animation style needs a multi-frame XYZ trajectory");
                self.add("Concatenate frames into one .xyz file and retry");
            }

            IoError::Trajectory(_) => {
                self.add("Trajectory frames are inconsistent");
                self.add("All frames must carry the same atoms in the same order");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
                self.add("Ensure you have read/write access as needed");
            }

            ErrorKind::AlreadyExists => {
                self.add("File already exists");
                self.add("Use a different output path or remove the existing file");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("Verify the file is not truncated or corrupted");
            }

            ErrorKind::UnexpectedEof => {
                self.add("Unexpected end of file encountered");
                self.add("The file may be truncated or incomplete");
            }

            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe — output consumer terminated");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn add_format_specific_parse_hints(&mut self, format: molscene::io::Format) {
        use molscene::io::Format;

        match format {
            Format::Xyz => {
                self.add("XYZ: Check the atom count line and per-atom columns");
                self.add("XYZ: Extended properties need a Properties=... declaration");
            }

            Format::Pdb => {
                self.add("PDB: Check ATOM/HETATM record formatting (columns 1-80)");
                self.add("PDB: Ensure proper spacing in coordinate fields");
            }
        }
    }

    fn collect_scene_hints(&mut self, err: &Error) {
        use molscene::scene::Error as SceneError;

        let Some(scene_err) = err.downcast_ref::<SceneError>() else {
            return;
        };

        self.mark_typed();

        match scene_err {
            SceneError::Io(source) => {
                self.collect_std_io_hints(source);
            }

            SceneError::PaletteToml(_) => {
                self.add("Palette TOML file has invalid syntax");
                self.add("Check for missing quotes, brackets, or invalid values");
            }

            SceneError::PaletteParse { line, .. } => {
                self.add(format!("Palette file has a malformed entry at line {}", line));
                self.add("Entries need an element symbol and an #rrggbb color");
            }

            SceneError::UnsupportedPalette(ext) => {
                self.add(format!("'{}' is not a recognized palette extension", ext));
                self.add("Supported palette formats: .ini, .csv, .toml");
            }

            SceneError::UnknownParameter { style, parameter } => {
                self.add(format!(
                    "The '{}' style does not use the '{}' option",
                    style, parameter
                ));
                self.add("Run `mscene blender --help` for per-style options");
                self.collect_parameter_hints(parameter);
            }

            SceneError::InvalidParameter { parameter, .. } => {
                self.add(format!("Check the value passed for '{}'", parameter));
                self.add("Radii, scales and subdivision levels must be positive");
            }

            SceneError::EmptyStructure => {
                self.add("Input contains no atoms");
                self.add("Verify the input file is not empty or corrupt");
                self.add("Check that the correct format was detected");
            }

            SceneError::NotEnoughFrames => {
                self.add("The animation style needs at least 2 frames");
                self.add("Provide a multi-frame XYZ trajectory as input");
                self.add("Or pick a static style (ball-and-stick, stick, ...)");
            }

            SceneError::SourceMismatch { style, expected } => {
                self.add(format!("The '{}' style expects {}", style, expected));
                self.add("Use --style anim for trajectories, a static style otherwise");
            }

            SceneError::Structure(_) => {
                self.add("Structure indexing failed");
                self.add("Check --select ranges are within the atom count");
            }

            SceneError::Json(_) => {
                self.add("Scene serialization failed");
                self.add("This may indicate a bug — please report if reproducible");
            }
        }
    }

    fn collect_parameter_hints(&mut self, parameter: &str) {
        match parameter {
            "bicolor" | "stick_radius" | "stick_color" => {
                self.add("Stick options apply to ball-and-stick and stick styles");
            }
            "cartoon" | "cartoon_ior" | "cartoon_color" => {
                self.add("Cartoon shading applies to static styles only");
            }
            "start" | "step" => {
                self.add("Keyframe options require --style anim");
            }
            _ => {}
        }
    }

    fn collect_viewer_hints(&mut self, err: &Error) {
        use molscene::viewer::Error as ViewerError;

        let Some(viewer_err) = err.downcast_ref::<ViewerError>() else {
            return;
        };

        self.mark_typed();

        match viewer_err {
            ViewerError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            ViewerError::MissingCharges => {
                self.add("The input carries no per-atom charges");
                self.add("Extended XYZ needs a charge:R:1 column in Properties");
                self.add("Drop --charges / --label charge, or add charge data");
            }

            ViewerError::MissingForces => {
                self.add("The input carries no per-atom forces");
                self.add("Extended XYZ needs a forces:R:3 column in Properties");
                self.add("Drop --forces, or add force data to the input");
            }

            ViewerError::Pdb(_) => {
                self.add("Embedding the structure as PDB failed");
                self.add("Check for atoms with non-finite coordinates");
            }

            ViewerError::Json(_) => {
                self.add("Viewer configuration serialization failed");
                self.add("This may indicate a bug — please report if reproducible");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") || msg.contains("tty") {
            self.add("Input appears to be from a terminal");
            self.add("Provide input via -i/--input or pipe data to stdin");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
            self.add("Ensure you have the required access rights");
            return;
        }

        if msg.contains("empty") && !self.has_typed_hints {
            self.add("Input appears to be empty");
            self.add("Verify the input contains valid molecular data");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}

//! # Cinta CLI
//!
//! Command-line interface for composing continuous-tape labels.
//!
//! ## Usage
//!
//! ```bash
//! # Compose a label with a QR code and save a preview
//! cinta render --template horizontal --tape 29 --text "BOX 18" \
//!     --payload https://inventory.local/box/18 --png box18.png
//!
//! # Shelf label with a large number, "printed" twice into a spool directory
//! cinta render --template shelf --tape 62 --text SHELF --number 7 \
//!     --spool ./spool --copies 2
//!
//! # Compose a JSON batch in parallel, with a stacked preview
//! cinta batch labels.json --out-dir out --preview out/preview.png
//!
//! # List tape classes and templates
//! cinta tapes
//! cinta templates
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) to see every font fit decision.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cinta::{
    BatchFile, Composer, FontSpec, LabelContent, LabelError, OverflowPolicy, PngSink, PrintJob,
    Rotation, TapeClass, TemplateVariant, batch, label, transport,
};

/// Cinta - adaptive label composer for continuous-tape label printers
#[derive(Parser, Debug)]
#[command(name = "cinta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every fit decision (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where a composed label goes.
#[derive(clap::Args, Debug)]
struct Output {
    /// Transmit through the PNG spool sink into this directory
    #[arg(long, value_name = "DIR")]
    spool: Option<PathBuf>,

    /// Counterclockwise rotation before transmission (0, 90, 180, 270)
    #[arg(long, default_value = "90")]
    rotate: u32,

    /// Do not cut the tape after each label
    #[arg(long)]
    no_cut: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose one label
    Render {
        /// Template number (1-8) or name (e.g. horizontal, rotated, shelf)
        #[arg(long, default_value = "horizontal", value_parser = parse_template)]
        template: TemplateVariant,

        /// Tape width in millimeters (29, 38, 50, 62)
        #[arg(long, default_value = "29")]
        tape: u32,

        /// Label text (the word on shelf labels, the caption on storage labels)
        #[arg(long)]
        text: String,

        /// Prefix joined before the text (Box, Container, Shelf or Asset)
        #[arg(long, value_parser = parse_prefix)]
        prefix: Option<String>,

        /// Data to encode in the QR code
        #[arg(long)]
        payload: Option<String>,

        /// Leave the code out even if a payload is given
        #[arg(long)]
        no_code: bool,

        /// Large number for the shelf-number and storage-code templates
        #[arg(long)]
        number: Option<String>,

        /// Font file (defaults to the bundled DejaVu Sans Bold)
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,

        /// Requested maximum font size in points
        #[arg(long)]
        font_size: Option<u32>,

        /// Fail instead of shrinking text below the template minimum
        #[arg(long)]
        strict: bool,

        /// Save the label as a PNG preview
        #[arg(long, value_name = "FILE", conflicts_with = "spool")]
        png: Option<PathBuf>,

        /// Copies to transmit (with --spool)
        #[arg(long, default_value = "1")]
        copies: u32,

        #[command(flatten)]
        output: Output,
    },

    /// Compose every label of a JSON batch file in parallel
    Batch {
        /// Batch file
        file: PathBuf,

        /// Directory for one PNG per label
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Also save all labels stacked into one preview image
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,

        /// Fail instead of shrinking text below the template minimum
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        output: Output,
    },

    /// List supported tape classes
    Tapes,

    /// List label templates
    Templates,
}

fn parse_template(s: &str) -> Result<TemplateVariant, String> {
    s.parse().map_err(|e: LabelError| e.to_string())
}

fn parse_prefix(s: &str) -> Result<String, String> {
    label::known_prefix(s)
        .map(str::to_string)
        .map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "info" });
    env_logger::Builder::from_env(env).init();
}

fn policy(strict: bool) -> OverflowPolicy {
    if strict {
        OverflowPolicy::Strict
    } else {
        OverflowPolicy::Shrink
    }
}

fn run(command: Commands) -> Result<(), LabelError> {
    match command {
        Commands::Render {
            template,
            tape,
            text,
            prefix,
            payload,
            no_code,
            number,
            font,
            font_size,
            strict,
            png,
            copies,
            output,
        } => {
            let tape = TapeClass::from_mm(tape)?;

            let mut content = LabelContent::new(label::with_prefix(prefix.as_deref(), &text));
            if let Some(payload) = payload {
                content = content.with_code(payload);
                if no_code {
                    content = content.without_code();
                }
            }
            if let Some(number) = number {
                content = content.with_number(number);
            }

            let spec = FontSpec {
                max_size_pt: font_size,
                ..font.map(FontSpec::new).unwrap_or_default()
            };
            let composer = Composer::new(&spec)?.with_overflow_policy(policy(strict));
            log::info!("Using font {}", composer.font().path().display());
            let image = composer.compose(template, &content, tape)?;

            println!(
                "Composed {} label on {} tape ({}x{}px, scale {:.3})",
                template,
                tape,
                image.width(),
                image.height(),
                tape.scale()
            );

            if let Some(path) = png {
                image.save_png(&path)?;
                println!("Saved to {}", path.display());
            }

            if let Some(dir) = output.spool {
                let job = PrintJob::new(tape)
                    .with_rotation(Rotation::from_degrees(output.rotate)?)
                    .with_cut(!output.no_cut);
                let mut sink = PngSink::new(dir)?;
                let printed = transport::print_copies(&mut sink, &image, &job, copies)?;
                println!("Spooled {} copies to {}", printed, sink.dir().display());
            }
        }

        Commands::Batch {
            file,
            out_dir,
            preview,
            strict,
            output,
        } => {
            let batch_file = BatchFile::load(&file)?;
            let composer =
                Composer::new(&batch_file.font_spec())?.with_overflow_policy(policy(strict));

            println!(
                "Composing {} {} labels on {} tape...",
                batch_file.labels.len(),
                batch_file.template,
                batch_file.tape_mm
            );
            let report = batch::compose_batch(
                &composer,
                batch_file.template,
                batch_file.tape_mm,
                &batch_file.labels,
            );

            fs::create_dir_all(&out_dir)?;
            for label in &report.labels {
                let path = out_dir.join(format!("label-{:03}.png", label.index + 1));
                label.image.save_png(&path)?;
                println!("  #{} -> {} ({} copies)", label.index + 1, path.display(), label.copies);
            }

            if let Some(path) = preview {
                let strip = batch::preview_strip(report.labels.iter().map(|l| &l.image));
                strip
                    .save(&path)
                    .map_err(|e| LabelError::Image(format!("Failed to save preview: {}", e)))?;
                println!("Preview saved to {}", path.display());
            }

            if let Some(dir) = output.spool {
                let job = PrintJob::new(batch_file.tape_mm)
                    .with_rotation(Rotation::from_degrees(output.rotate)?)
                    .with_cut(!output.no_cut);
                let mut sink = PngSink::new(dir)?;
                for label in &report.labels {
                    transport::print_copies(&mut sink, &label.image, &job, label.copies)?;
                }
                println!(
                    "Spooled {} copies to {}",
                    report.total_copies(),
                    sink.dir().display()
                );
            }

            for (index, error) in &report.failures {
                eprintln!("  #{} failed: {}", index + 1, error);
            }
            if !report.is_complete() {
                return Err(LabelError::Validation(format!(
                    "{} of {} labels failed",
                    report.failures.len(),
                    batch_file.labels.len()
                )));
            }
        }

        Commands::Tapes => {
            println!("Supported tape classes:");
            for tape in TapeClass::ALL {
                println!(
                    "  {:>4}  {:>3}px  scale {:.3}",
                    tape.to_string(),
                    tape.height_px(),
                    tape.scale()
                );
            }
        }

        Commands::Templates => {
            println!("Label templates:");
            for template in TemplateVariant::ALL {
                let code = if template.supports_code() { "code" } else { "    " };
                let number = if template.requires_number() { "number" } else { "" };
                println!(
                    "  {}  {:<16} {} {:<6}  {}",
                    template.id(),
                    template.name(),
                    code,
                    number,
                    template.description()
                );
            }
        }
    }

    Ok(())
}

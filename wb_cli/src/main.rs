//! # Echo Weight & Balance CLI
//!
//! Command line front end for the question engine in `wb_core`.
//!
//! ```text
//! wb_cli generate --types percent-mac,ballast --count 2 --seed 7 --out week3.wbq
//! wb_cli show week3.wbq --answers
//! wb_cli print week3.wbq --out week3.pdf
//! wb_cli calc --arms
//! wb_cli types
//! wb_cli reference
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wb_core::calculator::{CalculatorResult, CalculatorRowId, ManualCalculator};
use wb_core::file_io::{load_for_print, load_question_set, save_question_set, write_atomic};
use wb_core::pdf::render_question_sheet_pdf;
use wb_core::question_set::{QuestionSet, SheetSettings, DEFAULT_SHEET_TITLE};
use wb_core::reference::reference_text;
use wb_core::render::{format_arm, format_index, format_weight, loading_table_text, question_list_text, NOT_APPLICABLE};
use wb_core::{QuestionType, WbError, WbResult, ECHO};

#[derive(Parser)]
#[command(name = "wb_cli", version, about = "CPL weight & balance practice questions for the Echo loading system")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a question set
    Generate(GenerateArgs),
    /// Display a saved question set
    Show(ShowArgs),
    /// Render a saved question set to a printable PDF
    Print(PrintArgs),
    /// Manual weight & balance worksheet
    Calc(CalcArgs),
    /// Echo aircraft reference data and formulas
    Reference,
    /// List the question types
    Types,
}

#[derive(Args)]
struct GenerateArgs {
    /// Question types, comma separated (percent-mac, forward-cg-limit, weight-balance, ballast)
    #[arg(long, value_delimiter = ',', default_value = "percent-mac,forward-cg-limit,weight-balance,ballast")]
    types: Vec<QuestionType>,

    /// Questions per type
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    count: u8,

    /// Seed for reproducible sets
    #[arg(long, env = "WB_SEED")]
    seed: Option<u64>,

    /// Sheet title
    #[arg(long, default_value = DEFAULT_SHEET_TITLE)]
    title: String,

    /// Save the set to this .wbq file
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the set as JSON
    #[arg(long)]
    json: bool,

    /// Include answers and workings in text output
    #[arg(long)]
    answers: bool,
}

#[derive(Args)]
struct ShowArgs {
    /// Saved .wbq file
    file: PathBuf,

    /// Include answers and workings
    #[arg(long)]
    answers: bool,

    /// Also print each question's loading table
    #[arg(long)]
    tables: bool,
}

#[derive(Args)]
struct PrintArgs {
    /// Saved .wbq file (or a JSON array of questions)
    file: PathBuf,

    /// PDF output path
    #[arg(long)]
    out: PathBuf,

    /// Sheet title (defaults to the title stored in the set)
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args)]
struct CalcArgs {
    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Also prompt for each row's arm (blank keeps the preset arm)
    #[arg(long)]
    arms: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Show(args) => run_show(args),
        Commands::Print(args) => run_print(args),
        Commands::Calc(args) => run_calc(args),
        Commands::Reference => {
            println!("{}", reference_text(&ECHO));
            Ok(())
        }
        Commands::Types => {
            print_types();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = retry_hint(&e) {
                eprintln!("{}", hint);
            }
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                debug!("error detail: {}", json);
            }
            ExitCode::FAILURE
        }
    }
}

/// Suggestion printed after errors that a fresh random draw can clear
fn retry_hint(err: &WbError) -> Option<&'static str> {
    err.is_recoverable()
        .then_some("Run the command again, or pass a different --seed.")
}

fn print_types() {
    for question_type in QuestionType::ALL {
        println!(
            "{:<18} {:<18} {}",
            question_type.as_str(),
            question_type.label(),
            question_type.description()
        );
    }
}

fn run_generate(args: GenerateArgs) -> WbResult<()> {
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let settings = SheetSettings::new(args.types, usize::from(args.count))
        .with_title(args.title.clone())
        .with_seed(args.seed);
    let set = QuestionSet::generate(args.title, settings, &mut rng)?;

    if let Some(path) = &args.out {
        save_question_set(&set, path)?;
        eprintln!("Saved {} questions to {}", set.len(), path.display());
    }

    if args.json {
        let json = serde_json::to_string_pretty(&set).map_err(|e| WbError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
    } else if args.out.is_none() {
        println!("{}", question_list_text(&set.questions, args.answers));
    }
    Ok(())
}

fn run_show(args: ShowArgs) -> WbResult<()> {
    let set = load_question_set(&args.file)?;
    println!("{} ({} questions)", set.settings.title, set.len());
    println!();

    if args.tables {
        for (i, question) in set.questions.iter().enumerate() {
            println!("Question {} loading table:", i + 1);
            println!("{}", loading_table_text(&question.loading_table));
            println!();
        }
    }
    println!("{}", question_list_text(&set.questions, args.answers));
    Ok(())
}

fn run_print(args: PrintArgs) -> WbResult<()> {
    let questions = load_for_print(&args.file);
    if questions.is_empty() {
        return Err(WbError::invalid_input(
            "file",
            args.file.display().to_string(),
            "No questions to print. Generate a set first.",
        ));
    }

    let title = match args.title {
        Some(title) => title,
        None => load_question_set(&args.file)
            .map(|set| set.settings.title)
            .unwrap_or_else(|_| DEFAULT_SHEET_TITLE.to_string()),
    };

    let pdf = render_question_sheet_pdf(&questions, &title)?;
    write_atomic(&args.out, &pdf)?;
    println!(
        "Wrote {} pages for {} questions to {}",
        2 * questions.len(),
        questions.len(),
        args.out.display()
    );
    Ok(())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn run_calc(args: CalcArgs) -> WbResult<()> {
    let mut calc = ManualCalculator::for_aircraft(&ECHO);

    println!("Echo Weight & Balance Calculator");
    println!("================================");
    println!("Enter weights in kg. Leave blank for zero.");
    println!();

    for id in CalculatorRowId::ALL {
        let weight = prompt_f64(&format!("{} weight (kg): ", id.label()), 0.0);
        calc.set_weight(id, weight)?;

        let preset_arm = calc.row(id).map_or(0.0, |row| row.arm_mm);
        let arm = if args.arms {
            let arm = prompt_f64(&format!("{} arm (mm) [{}]: ", id.label(), preset_arm), preset_arm);
            calc.set_arm(id, arm)?;
            arm
        } else {
            preset_arm
        };

        if arm <= 0.0 {
            let index = prompt_f64(&format!("{} moment index: ", id.label()), 0.0);
            calc.set_index(id, index)?;
        }
    }

    let result = calc.evaluate(&ECHO);
    println!();

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| WbError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
        return Ok(());
    }

    print_worksheet(&calc, &result);
    Ok(())
}

fn print_worksheet(calc: &ManualCalculator, result: &CalculatorResult) {
    println!("{:<22} {:>12} {:>9} {:>13}", "Item", "Weight (kg)", "Arm (mm)", "Moment Index");
    println!("{}", "-".repeat(59));
    for row in &calc.rows {
        let weight = if row.weight_kg == 0.0 {
            NOT_APPLICABLE.to_string()
        } else {
            format_weight(row.weight_kg)
        };
        println!(
            "{:<22} {:>12} {:>9} {:>13}",
            row.id.label(),
            weight,
            format_arm(row.arm_mm),
            format_index(row.index)
        );
    }
    println!("{}", "-".repeat(59));
    println!(
        "{:<22} {:>12} {:>9} {:>13}",
        "TOTAL",
        format!("{:.0}", result.totals.weight),
        NOT_APPLICABLE,
        format!("{:.1}", result.totals.index)
    );
    println!();

    let Some(balance) = result.balance else {
        println!("Enter weights to see the CG position.");
        return;
    };

    println!("Total Weight: {:.0} kg", result.totals.weight);
    println!("CG Position:  {:.1} mm", balance.cg_mm);
    println!("%MAC:         {:.1}%", balance.percent_mac);
    println!(
        "Limits:       {} (forward {:.1} mm, aft {} mm, MTOW {} kg)",
        if balance.within_limits() { "WITHIN LIMITS" } else { "OUTSIDE LIMITS" },
        balance.forward_limit_mm,
        balance.aft_limit_mm,
        ECHO.weights.max_takeoff_kg
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_hint_only_for_exhausted_scenarios() {
        let exhausted = WbError::ScenarioExhausted {
            question_type: "ballast".to_string(),
            attempts: 100,
        };
        assert!(retry_hint(&exhausted).is_some_and(|hint| hint.contains("--seed")));
        assert!(retry_hint(&WbError::invalid_input("count", "0", "too small")).is_none());
    }
}

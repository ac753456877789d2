//! # Printable Question Sheets
//!
//! Renders question sets to PDF using Typst.
//!
//! ## Layout
//!
//! Each question takes two pages:
//!
//! - a question page: sheet header, "Question N: Title" with a type badge,
//!   the scenario narrative, a boxed question and an empty working space
//! - an answer page: the boxed answer, the detailed working in monospace and
//!   a quick-reference block for the aircraft
//!
//! Every page carries a "Page k of 2N" footer.
//!
//! ## Architecture
//!
//! - The page template is an embedded string constant
//! - Question text is injected as Typst string literals, never as markup
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use wb_core::pdf::render_question_sheet_pdf;
//! use wb_core::questions::{generate_question_set, QuestionType};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let questions = generate_question_set(&[QuestionType::PercentMac], 2, &mut rng).unwrap();
//! let pdf = render_question_sheet_pdf(&questions, "CPL Weight & Balance Questions").unwrap();
//! std::fs::write("questions.pdf", pdf).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::aircraft::{AircraftConfig, ECHO};
use crate::equations::aft_cg_limit;
use crate::equations::balance::INDEX_DIVISOR;
use crate::errors::{WbError, WbResult};
use crate::questions::Question;
use crate::render::type_badge;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (Libertinus Serif, DejaVu Sans Mono, ...)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Templates
// ============================================================================

const SHEET_PREAMBLE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  footer: context align(center)[
    #text(size: 8pt, fill: gray)[Page #counter(page).display() of {{TOTAL_PAGES}}]
  ],
)

#set text(font: "Libertinus Serif", size: 10.5pt)
#set par(justify: false, leading: 0.7em)
#show raw: set text(font: "DejaVu Sans Mono", size: 7.5pt)

#let sheet-header(title, subtitle) = block(
  width: 100%,
  stroke: (bottom: 1.5pt + silver),
  inset: (bottom: 8pt),
)[
  #text(size: 15pt, weight: "bold")[#title]
  #linebreak()
  #text(size: 9pt, fill: gray)[#subtitle]
]

#let field-label(body) = text(size: 9pt, weight: "bold", fill: rgb("#444444"))[#body]
"##;

const QUESTION_PAGE: &str = r##"
#sheet-header({{SHEET_TITLE}}, {{SUBTITLE}})
#v(10pt)
#grid(
  columns: (1fr, auto),
  align: (left + horizon, right + horizon),
  text(size: 13pt, weight: "bold")[Question {{NUMBER}}: #{{TITLE}}],
  box(stroke: 0.5pt + gray, inset: 4pt, radius: 2pt)[#text(size: 8pt)[#{{BADGE}}]],
)
#v(8pt)
#field-label[Scenario:]
{{SCENARIO}}
#v(8pt)
#block(width: 100%, fill: rgb("#f5f5f5"), stroke: 1.5pt + gray, inset: 10pt, radius: 3pt)[
  *Question:*
  #linebreak()
  #{{QUESTION}}
]
#v(12pt)
#field-label[Working Space:]
#rect(width: 100%, height: 8cm, stroke: (paint: silver, thickness: 1.5pt, dash: "dashed"), radius: 3pt)
"##;

const ANSWER_PAGE: &str = r##"
#sheet-header({{ANSWER_TITLE}}, {{ANSWER_SUBTITLE}})
#v(10pt)
#block(width: 100%, fill: rgb("#eeeeee"), stroke: 1.5pt + black, inset: 10pt, radius: 3pt)[
  *Answer:*
  #linebreak()
  #text(weight: "bold")[#{{ANSWER}}]
]
#v(10pt)
#field-label[Detailed Working:]
#block(width: 100%, fill: rgb("#f2f2f2"), inset: 8pt, radius: 3pt)[
  #raw(block: true, {{WORKINGS}})
]
#v(10pt)
#block(width: 100%, fill: rgb("#fafafa"), stroke: 0.5pt + silver, inset: 8pt, radius: 3pt)[
  #text(size: 9pt, weight: "bold")[Quick Reference - #{{AIRCRAFT}} Aircraft:]
  #v(4pt)
  #set text(size: 8.5pt)
  #grid(
    columns: (1fr, 1fr),
    row-gutter: 4pt,
    [*MAC Length:* {{MAC_LENGTH}} mm], [*MLW:* {{MLW}} kg],
    [*MAC LE:* {{MAC_LE}} mm aft datum], [*MZFW:* {{MZFW}} kg],
    [*MTOW:* {{MTOW}} kg], [*CG Range:* {{FWD_LIMIT}}-{{AFT_LIMIT}} mm],
    [*Fuel SG:* {{FUEL_SG}}], [*Mom Index:* W × Arm ÷ {{INDEX_DIVISOR}}],
  )
]
"##;

// ============================================================================
// Rendering
// ============================================================================

/// Subtitle under the sheet title on question pages
pub fn configuration_line(config: &AircraftConfig) -> String {
    format!(
        "Loading System: {} | Aircraft Configuration: {} Seats",
        config.name.to_uppercase(),
        config.seats
    )
}

/// Typst source for a question sheet.
///
/// Two pages per question; an empty list gives a document with no pages.
pub fn sheet_source(questions: &[Question], title: &str, config: &AircraftConfig) -> String {
    let total_pages = 2 * questions.len();
    let mut pages = Vec::with_capacity(total_pages);

    for (i, question) in questions.iter().enumerate() {
        let number = (i + 1).to_string();
        pages.push(
            QUESTION_PAGE
                .replace("{{SHEET_TITLE}}", &typst_string(title))
                .replace("{{SUBTITLE}}", &typst_string(&configuration_line(config)))
                .replace("{{NUMBER}}", &number)
                .replace("{{TITLE}}", &typst_string(&question.title))
                .replace("{{BADGE}}", &typst_string(&type_badge(question.question_type)))
                .replace("{{SCENARIO}}", &paragraphs(&question.scenario_text))
                .replace("{{QUESTION}}", &typst_string(&question.question)),
        );
        pages.push(
            ANSWER_PAGE
                .replace("{{ANSWER_TITLE}}", &typst_string(&format!("{} - Answers", title)))
                .replace(
                    "{{ANSWER_SUBTITLE}}",
                    &typst_string(&format!("Question {}: {}", number, question.title)),
                )
                .replace("{{ANSWER}}", &typst_string(&question.answer))
                .replace("{{WORKINGS}}", &typst_string(&question.workings))
                .replace("{{AIRCRAFT}}", &typst_string(config.name))
                .replace("{{MAC_LENGTH}}", &config.mac.length_mm.to_string())
                .replace("{{MAC_LE}}", &config.mac.leading_edge_mm.to_string())
                .replace("{{MTOW}}", &config.weights.max_takeoff_kg.to_string())
                .replace("{{MLW}}", &config.weights.max_landing_kg.to_string())
                .replace("{{MZFW}}", &config.weights.max_zero_fuel_kg.to_string())
                .replace("{{FWD_LIMIT}}", &config.cg_range.light.forward_mm.to_string())
                .replace("{{AFT_LIMIT}}", &aft_cg_limit(config).to_string())
                .replace("{{FUEL_SG}}", &config.fuel.density_kg_per_l.to_string())
                .replace("{{INDEX_DIVISOR}}", &INDEX_DIVISOR.to_string()),
        );
    }

    let mut source = SHEET_PREAMBLE.replace("{{TOTAL_PAGES}}", &total_pages.to_string());
    source.push_str(&pages.join("\n#pagebreak()\n"));
    source
}

/// Render questions to a printable PDF for the Echo aircraft.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(WbError::InvalidInput)` - no questions to print
/// * `Err(WbError::Internal)` - Typst compilation failed
pub fn render_question_sheet_pdf(questions: &[Question], title: &str) -> WbResult<Vec<u8>> {
    if questions.is_empty() {
        return Err(WbError::invalid_input("questions", "[]", "No questions to print"));
    }
    compile_pdf(sheet_source(questions, title, &ECHO))
}

fn compile_pdf(source: String) -> WbResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        WbError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        WbError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })
}

/// Quote text as a Typst string literal so it is never parsed as markup.
fn typst_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// One Typst paragraph per blank-line-separated block of text
fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("#par[#{}]", typst_string(p)))
        .collect::<Vec<_>>()
        .join("\n")
}

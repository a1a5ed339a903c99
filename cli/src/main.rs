//! reportdoc CLI - report document inspection and export tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use reportdoc::adapter::{spawn_save, JsonFilePersistence};
use reportdoc::editor::Editor;
use reportdoc::extract::{chart_block, find_question, table_block};
use reportdoc::render::{to_markdown_page, RenderOptions};
use reportdoc::{
    extract_histogram, load_corpus, load_questions, open_document, paginate, write_document,
    BlockId, ChartType, Document, EditorOptions, Histogram, JsonFormat, Question, SaveRequest,
    SurveyScope,
};

#[derive(Parser)]
#[command(name = "reportdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Inspect, paginate, and export block-based report documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new report document
    New {
        /// Document title
        #[arg(short, long, default_value = reportdoc::model::DEFAULT_TITLE)]
        title: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List pages and their blocks
    Pages {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Build a histogram for one question from survey responses
    Extract {
        /// Question list (JSON array)
        #[arg(long, value_name = "FILE")]
        questions: PathBuf,

        /// Responses grouped by survey type (JSON object)
        #[arg(long, value_name = "FILE")]
        responses: PathBuf,

        /// Question id
        #[arg(long, value_name = "ID")]
        question: String,

        /// Limit to one survey type
        #[arg(long, value_name = "TYPE")]
        survey: Option<String>,

        /// Insert a table block
        #[arg(long, conflicts_with = "chart")]
        table: bool,

        /// Insert a chart block of the given type (bar, line, pie, area)
        #[arg(long, value_name = "TYPE")]
        chart: Option<String>,

        /// Document to insert the block into (saved in place)
        #[arg(long, value_name = "DOC")]
        into: Option<PathBuf>,

        /// Insert after this block id (end of document if not specified)
        #[arg(long, value_name = "BLOCK", requires = "into")]
        after: Option<String>,

        /// Print the histogram as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export each page to Markdown
    Export {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Omit chart data tables
        #[arg(long)]
        no_chart_data: bool,
    },

    /// Re-serialize a document as JSON
    Json {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Save a document into the local document cache
    Save {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Cache directory
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,

        /// Author id
        #[arg(long, env = "REPORTDOC_USER_ID", default_value = "local")]
        user: String,

        /// Organization id
        #[arg(long, env = "REPORTDOC_ORG_ID", default_value = "local")]
        org: String,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::New { title, output }) => cmd_new(&title, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Pages { input }) => cmd_pages(&input),
        Some(Commands::Extract {
            questions,
            responses,
            question,
            survey,
            table,
            chart,
            into,
            after,
            json,
        }) => cmd_extract(ExtractArgs {
            questions: &questions,
            responses: &responses,
            question: &question,
            survey: survey.as_deref(),
            table,
            chart: chart.as_deref(),
            into: into.as_deref(),
            after: after.as_deref(),
            json,
        }),
        Some(Commands::Export {
            input,
            output,
            no_chart_data,
        }) => cmd_export(&input, output.as_deref(), !no_chart_data),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Save {
            input,
            dir,
            user,
            org,
        }) => cmd_save(&input, &dir, &user, &org),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: reportdoc <COMMAND>".yellow());
            println!("       reportdoc --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_new(title: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Document::new(title);

    if let Some(path) = output {
        write_document(&doc, path, JsonFormat::Pretty)?;
        println!("{} {}", "Created".green(), path.display());
    } else {
        println!("{}", doc.to_json(JsonFormat::Pretty)?);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_document(input)?;
    let pages = paginate(&doc.blocks);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Id".bold(), doc.id);
    println!("{}: {}", "Title".bold(), doc.title);
    println!("{}: {}", "Created".bold(), doc.created_at.to_rfc3339());
    println!("{}: {}", "Modified".bold(), doc.updated_at.to_rfc3339());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    let data_blocks = doc
        .blocks
        .iter()
        .filter(|b| b.kind().is_data_backed())
        .count();

    println!("{}: {}", "Blocks".bold(), doc.block_count());
    println!("{}: {}", "Pages".bold(), pages.len());
    println!("{}: {}", "Charts/Tables".bold(), data_blocks);
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());

    Ok(())
}

fn cmd_pages(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_document(input)?;

    for page in paginate(&doc.blocks) {
        let title = page.title().unwrap_or("(untitled)");
        println!(
            "{} {} {}",
            format!("Page {}", page.number).cyan().bold(),
            "─".dimmed(),
            title
        );
        let count = page.blocks.len();
        for (i, block) in page.blocks.iter().enumerate() {
            let branch = if i + 1 == count { "└─" } else { "├─" };
            println!("  {} {} {}", branch.dimmed(), block.kind(), block.id.as_str().dimmed());
        }
    }

    Ok(())
}

struct ExtractArgs<'a> {
    questions: &'a Path,
    responses: &'a Path,
    question: &'a str,
    survey: Option<&'a str>,
    table: bool,
    chart: Option<&'a str>,
    into: Option<&'a Path>,
    after: Option<&'a str>,
    json: bool,
}

fn cmd_extract(args: ExtractArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let questions = load_questions(args.questions)?;
    let question = find_question(&questions, args.question)?;
    let corpus = load_corpus(args.responses)?;

    let scope = match args.survey {
        Some(survey_type) => {
            if !corpus.contains(survey_type) {
                return Err(reportdoc::Error::SurveyNotFound(survey_type.to_string()).into());
            }
            SurveyScope::only(survey_type)
        }
        None => SurveyScope::All,
    };

    let histogram = extract_histogram(question, &corpus, &scope);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&histogram)?);
    } else {
        print_histogram(question, &histogram);
    }

    let Some(doc_path) = args.into else {
        return Ok(());
    };

    let content = match args.chart {
        Some(chart_type) => chart_block(question, &histogram, chart_type.parse::<ChartType>()?),
        None if args.table => table_block(question, &histogram),
        None => chart_block(question, &histogram, ChartType::default()),
    };

    let doc = open_document(doc_path)?;
    let mut editor = Editor::with_document(doc, EditorOptions::default());
    let after = args.after.map(BlockId::from);
    if let Some(ref id) = after {
        if !editor.document().contains(id) {
            println!("{} block {} not found, appending", "Warning:".yellow(), id);
        }
    }
    let id = editor.insert_content(content, after.as_ref());
    write_document(editor.document(), doc_path, JsonFormat::Pretty)?;

    println!("\n{} block {} into {}", "Inserted".green(), id, doc_path.display());

    Ok(())
}

fn print_histogram(question: &Question, histogram: &Histogram) {
    println!("{}", question.text.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if histogram.is_empty() {
        println!("{}", "No data".yellow());
    } else {
        for row in &histogram.to_table().rows {
            let cells: Vec<String> = row.iter().map(|c| c.plain_text()).collect();
            println!("  {}", cells.join("  "));
        }
        println!("{}: {}", "Total".bold(), histogram.total());
        if question.is_numeric {
            if let Some(summary) = histogram.numeric_summary() {
                println!(
                    "{}: {:.2} (min {}, max {})",
                    "Mean".bold(),
                    summary.mean,
                    summary.min,
                    summary.max
                );
            }
        }
    }
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    include_chart_data: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_document(input)?;
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_pages", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let options = RenderOptions::new().with_chart_data(include_chart_data);
    let pages = paginate(&doc.blocks);

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut files = Vec::with_capacity(pages.len());
    for page in &pages {
        pb.set_message(format!("Rendering page {}...", page.number));
        let file_name = format!("page_{:03}.md", page.number);
        let path = output_dir.join(&file_name);
        fs::write(&path, to_markdown_page(page, &options))?;
        log::debug!("wrote page {} to {}", page.number, path.display());
        files.push(file_name);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, file) in files.iter().enumerate() {
        let branch = if i + 1 == files.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), file);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_document(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    if let Some(path) = output {
        write_document(&doc, path, format)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", doc.to_json(format)?);
    }

    Ok(())
}

fn cmd_save(
    input: &Path,
    dir: &Path,
    user: &str,
    org: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_document(input)?;
    let adapter = Arc::new(JsonFilePersistence::new(dir));
    let path = adapter.path_for(&doc.id);

    let job = spawn_save(adapter, SaveRequest::new(doc, user, org))?;
    let receipt = job.wait()?;

    println!("{} {} {}", "Saved".green(), receipt.id, path.display().to_string().dimmed());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "reportdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Report document editing core");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/reportdoc".dimmed());
    println!("License: MIT");
}

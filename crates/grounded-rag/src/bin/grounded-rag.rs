//! Grounded RAG command-line driver
//!
//! Run with: cargo run -p grounded-rag -- ask "What is Amazon Q Business?"

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use grounded_rag::{
    config::RagConfig,
    index::LocalVectorIndex,
    ingestion::{PassageStore, PdfIngestor},
    providers::{llm_from_config, EmbeddingProvider, OllamaEmbedder, VectorIndexProvider},
    EvidencePipeline, QaPipeline, RetrievalOutput, RetrievalPlanner, StaticSectionPlanner,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "grounded-rag", version, about = "Cited question answering over a single PDF")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "GROUNDED_RAG_CONFIG")]
    config: Option<PathBuf>,

    /// Override retrieval.top_k
    #[arg(long, global = true)]
    top_k: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract paragraph passages from a PDF and save them
    Ingest {
        pdf: PathBuf,
    },
    /// Embed the saved passages and write the vector index
    Index,
    /// Show the sections a query would search
    Plan {
        query: String,
    },
    /// Show the passages retrieved for a query
    Retrieve {
        query: String,
    },
    /// Print the cited evidence document for a query (no generation)
    Evidence {
        query: String,
    },
    /// Answer a query from the indexed document
    Ask {
        query: String,
        /// Also print the evidence document given to the generator
        #[arg(long)]
        show_evidence: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grounded_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RagConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RagConfig::default(),
    };
    if let Some(top_k) = cli.top_k {
        config.retrieval.top_k = top_k;
    }
    config.validate()?;

    match cli.command {
        Commands::Ingest { pdf } => ingest(&config, pdf).await,
        Commands::Index => index(&config).await,
        Commands::Plan { query } => {
            let plan = StaticSectionPlanner::from_config(&config.planner).plan(&query);
            println!("{}", serde_json::to_string_pretty(&plan)?);
            Ok(())
        }
        Commands::Retrieve { query } => {
            let pipeline = EvidencePipeline::from_config(&config, open_index(&config).await?).await?;
            let (_, output) = pipeline.retrieve(&query).await?;
            print_retrieval(&output);
            Ok(())
        }
        Commands::Evidence { query } => {
            let pipeline = EvidencePipeline::from_config(&config, open_index(&config).await?).await?;
            let (_, _, evidence) = pipeline.evidence(&query).await?;
            println!("{}", evidence);
            Ok(())
        }
        Commands::Ask {
            query,
            show_evidence,
        } => ask(&config, &query, show_evidence).await,
    }
}

async fn ingest(config: &RagConfig, pdf: PathBuf) -> anyhow::Result<()> {
    let passages = PdfIngestor::ingest_file(&pdf).await?;
    let store = PassageStore::new(passages)?;
    store.save(&config.storage.passages_path).await?;

    println!(
        "{} {} passages from {} → {}",
        style("Ingested").green().bold(),
        store.len(),
        pdf.display(),
        config.storage.passages_path.display()
    );
    Ok(())
}

async fn index(config: &RagConfig) -> anyhow::Result<()> {
    let store = PassageStore::load(&config.storage.passages_path)
        .await
        .context("no passages found; run `grounded-rag ingest <pdf>` first")?;

    let embedder = embedder(config).await?;

    let progress = ProgressBar::new(store.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} passages ({eta})")?
            .progress_chars("=> "),
    );

    let index = LocalVectorIndex::build(
        store.into_passages(),
        embedder,
        config.embeddings.batch_size,
        |n| progress.inc(n as u64),
    )
    .await?;
    progress.finish_and_clear();

    index.save(&config.storage.index_path).await?;

    println!(
        "{} {} passages → {}",
        style("Indexed").green().bold(),
        index.entries().len(),
        config.storage.index_path.display()
    );
    Ok(())
}

async fn ask(config: &RagConfig, query: &str, show_evidence: bool) -> anyhow::Result<()> {
    let llm = llm_from_config(config)?;
    let index = open_index(config).await?;
    let pipeline = QaPipeline::from_config(config, index, llm).await?;

    let answer = pipeline.answer(query).await?;

    if show_evidence {
        println!("{}\n", style("Evidence").cyan().bold());
        println!("{}\n", answer.evidence);
    }

    println!("{}\n", style("Answer").green().bold());
    println!("{}", answer.answer);
    println!(
        "\n{}",
        style(format!(
            "{} passages from {} sections in {}ms",
            answer.retrieval.results.len(),
            answer.plan.sections_to_search.len(),
            answer.processing_time_ms
        ))
        .dim()
    );
    Ok(())
}

async fn embedder(config: &RagConfig) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    let embedder = OllamaEmbedder::new(&config.embeddings)?;

    tracing::info!("Checking Ollama at {}...", config.embeddings.base_url);
    if !embedder.health_check().await.unwrap_or(false) {
        tracing::warn!("Ollama not available at {}", config.embeddings.base_url);
        tracing::warn!("  Start it with `ollama serve` and pull `{}`", config.embeddings.model);
    }

    Ok(Arc::new(embedder))
}

async fn open_index(config: &RagConfig) -> anyhow::Result<Arc<dyn VectorIndexProvider>> {
    let index = LocalVectorIndex::open(&config.storage.index_path, embedder(config).await?)
        .await
        .context("no vector index found; run `grounded-rag index` first")?;
    Ok(Arc::new(index))
}

fn print_retrieval(output: &RetrievalOutput) {
    if output.is_empty() {
        println!("{}", style("No passages retrieved").yellow());
        return;
    }

    for passage in &output.results {
        println!(
            "{} {} (page {}, distance {:.4})",
            style(&passage.passage_id).bold(),
            style(format!("[{} ← {}]", passage.section, passage.retrieved_from)).cyan(),
            passage.page,
            passage.score
        );
        println!("    {}", passage.text);
    }
}

use std::io::Write;

use anyhow::Context;

use trellis_core::models::Corpus;

use crate::args::ImportArgs;
use crate::exit::CliExitCode;
use crate::runtime::Runtime;

/// Write a corpus file into the store and embed every fragment into the
/// configured index. Re-importing the same file is a no-op.
pub fn run(runtime: &Runtime, args: &ImportArgs, out: &mut impl Write) -> anyhow::Result<CliExitCode> {
    let text = std::fs::read_to_string(&args.corpus)
        .with_context(|| format!("failed to read corpus {}", args.corpus.display()))?;
    let corpus = Corpus::from_json(&text)
        .with_context(|| format!("invalid corpus {}", args.corpus.display()))?;

    if runtime.store().is_in_memory() {
        tracing::warn!("importing into an in-memory store; pass --db to keep the data");
    }

    let config = runtime.config();
    let engine = runtime.embedder();
    let summary = runtime
        .store()
        .import_corpus(&corpus, &config.search.index_name, config.embedding.dimensions, |text| {
            engine.embed_query(text).map(|v| v.into_inner())
        })
        .context("import failed")?;

    writeln!(
        out,
        "imported {} authors, {} documents, {} fragments ({} embeddings into {})",
        summary.authors, summary.documents, summary.fragments, summary.embeddings, config.search.index_name
    )?;
    Ok(CliExitCode::Success)
}

use std::io::Write;

use tracing::debug;

use trellis_core::models::Query;
use trellis_tool::conversions::response::result_to_json;

use crate::args::QueryArgs;
use crate::exit::CliExitCode;
use crate::runtime::Runtime;

/// One retrieval. The response goes to `out`; a pipeline error goes to
/// stderr and yields [`CliExitCode::RetrievalError`]. No retries.
pub async fn run(runtime: &Runtime, args: &QueryArgs, out: &mut impl Write) -> anyhow::Result<CliExitCode> {
    let query = build_query(args);
    let pipeline = runtime.pipeline();

    match pipeline.retrieve(&query).await {
        Ok(result) => {
            debug!(results = result.results_count(), clamped = result.limit_clamped(), "query done");
            super::write_json(out, &result_to_json(&result), args.pretty)?;
            Ok(CliExitCode::Success)
        }
        Err(e) => {
            eprintln!("error [{}]: {e}", e.code());
            Ok(CliExitCode::RetrievalError)
        }
    }
}

pub fn build_query(args: &QueryArgs) -> Query {
    let mut query = Query::new(args.text.clone());
    if let Some(limit) = args.limit {
        query = query.with_limit(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    if args.no_expand {
        query = query.with_expand_graph(false);
    }
    query
}

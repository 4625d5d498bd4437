use crate::providers::{run_query, SearchProvider};
use crate::types::{SourceQuery, SourceResults};

/// Runs every query in order and records per-source outcomes.
///
/// A failing source gets an empty result list and its error message; the
/// remaining sources still run.
pub async fn run_searches<P: SearchProvider + ?Sized>(
    provider: &P,
    queries: &[SourceQuery],
    count: usize,
) -> Vec<SourceResults> {
    let mut out = Vec::with_capacity(queries.len());

    for q in queries {
        let (results, error) = match run_query(provider, q.mode, &q.query, count).await {
            Ok(results) => {
                tracing::info!(
                    source = %q.name,
                    mode = %q.mode,
                    hits = results.len(),
                    "source searched"
                );
                (results, None)
            }
            Err(e) => {
                tracing::warn!(source = %q.name, error = %e, "source search failed");
                (Vec::new(), Some(e.to_string()))
            }
        };

        out.push(SourceResults {
            name: q.name.clone(),
            query: q.query.clone(),
            mode: q.mode,
            results,
            error,
        });
    }

    out
}

use std::io::Write;
use std::time::{Duration, Instant};

use color_eyre::Result;
use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::app::identify_document;
use crate::charts::TopicCharts;
use crate::db::{SessionCache, SessionSnapshot};
use crate::domain::{SearchResult, Term, TopicSet};
use crate::results::{self, DisplayFragment, Notice, ScoreLabel};
use crate::ui::screens::topics::{docs_header, summary_header, toggle_label, words_header};

/// What a headless run should print.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRequest {
    pub query: Option<String>,
    pub topics: bool,
    pub json: bool,
    pub page_url: Option<String>,
}

#[derive(Serialize)]
struct HeadlessTopic<'a> {
    key: &'a str,
    weight: f64,
    words: &'a [Term],
    docs: &'a [SearchResult],
}

#[derive(Serialize)]
struct HeadlessTopics<'a> {
    doc_id: &'a str,
    k: u32,
    topics: Vec<HeadlessTopic<'a>>,
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(
    api: &ApiClient,
    session: Option<&SessionCache>,
    request: &HeadlessRequest,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(query) = &request.query {
        search(api, session, query, request.json, out).await?;
    }

    if request.topics {
        let doc_id = request
            .page_url
            .as_deref()
            .and_then(identify_document)
            .ok_or_else(|| {
                color_eyre::eyre::eyre!("--topics needs --page-url pointing at an rfc-editor.org RFC page")
            })?;
        topics(api, &doc_id, request.json, out).await?;
    }

    if request.query.is_none() && !request.topics {
        print_session(session, request.json, out).await?;
    }

    Ok(())
}

async fn search(
    api: &ApiClient,
    session: Option<&SessionCache>,
    query: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    match api.search(query).await {
        Ok(found) => {
            if let Some(cache) = session {
                if let Err(error) = cache.remember(query, &found).await {
                    tracing::warn!(%error, "could not save session cache");
                }
            }
            print_results(&found, json, out)
        }
        Err(error) => {
            tracing::error!(%error, "API request failed");
            print_notice(&Notice::BackendUnavailable, out)
        }
    }
}

fn print_results(found: &[SearchResult], json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(found)?)?;
    } else if found.is_empty() {
        print_notice(&Notice::NoResults, out)?;
    } else {
        print_fragments(&results::render(found, ScoreLabel::Score), out)?;
    }
    Ok(())
}

fn print_fragments(fragments: &[DisplayFragment], out: &mut impl Write) -> Result<()> {
    for fragment in fragments {
        for line in fragment.plain_lines() {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_notice(notice: &Notice, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", notice.message())?;
    Ok(())
}

async fn topics(api: &ApiClient, doc_id: &str, json: bool, out: &mut impl Write) -> Result<()> {
    match api.fetch_topics(doc_id).await {
        Ok(set) if json => {
            let payload = HeadlessTopics {
                doc_id: &set.doc_id,
                k: set.k,
                topics: set
                    .topics
                    .iter()
                    .map(|topic| HeadlessTopic {
                        key: &topic.key,
                        weight: topic.weight,
                        words: &topic.words,
                        docs: &topic.docs,
                    })
                    .collect(),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
            Ok(())
        }
        Ok(set) => print_topics(&set, out),
        Err(ApiError::NoTopics(doc_id)) => print_notice(&Notice::NoTopics(doc_id), out),
        Err(error) => {
            tracing::error!(%error, "API request failed");
            print_notice(&Notice::BackendUnavailable, out)
        }
    }
}

fn print_topics(set: &TopicSet, out: &mut impl Write) -> Result<()> {
    let charts = TopicCharts::build(set, Duration::ZERO, Instant::now());

    writeln!(out, "{}", summary_header(set))?;
    for topic in &set.topics {
        writeln!(out)?;
        writeln!(out, "== {} ==", toggle_label(topic))?;
        writeln!(out, "{}", words_header(topic))?;
        if let Some(binding) = charts.binding(&topic.key) {
            for term in binding.terms() {
                writeln!(out, "  {:<24} {:.4}", term.term, term.probability)?;
            }
        }
        writeln!(out, "{}", docs_header(topic))?;
        print_fragments(&results::render(&topic.docs, ScoreLabel::TopicCoverage), out)?;
    }
    Ok(())
}

async fn print_session(
    session: Option<&SessionCache>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let snapshot = match session {
        Some(cache) => cache.restore().await?,
        None => SessionSnapshot::default(),
    };

    match (snapshot.query, snapshot.results) {
        (Some(query), Some(found)) => {
            if !json {
                writeln!(out, "Last search: {query}")?;
                writeln!(out)?;
            }
            print_results(&found, json, out)
        }
        _ => {
            writeln!(out, "No cached search. Pass --query to search.")?;
            Ok(())
        }
    }
}

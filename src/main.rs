use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use os_advisor::advisor::{
    evaluate, AnswerSet, Catalog, Confidence, CsvAnswerImporter, Evaluation, JustificationDocument,
    KnowledgeBase, Outcome, ScoreTotals,
};
use os_advisor::config::{AppConfig, DataConfig};
use os_advisor::error::AppError;
use os_advisor::telemetry;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

/// Catalog and knowledge base, loaded once at startup and read-only for the
/// lifetime of the process.
#[derive(Debug)]
struct AdvisorData {
    catalog: Catalog,
    knowledge: KnowledgeBase,
}

impl AdvisorData {
    fn load(config: &DataConfig) -> Result<Self, AppError> {
        let catalog = match &config.catalog {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::standard(),
        };
        let knowledge = match &config.knowledge {
            Some(path) => KnowledgeBase::from_path(path)?,
            None => KnowledgeBase::standard(),
        };
        Ok(Self { catalog, knowledge })
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "OS Advisor",
    about = "Recommend an operating system from weighted questionnaire answers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate an answer set and print the recommendation
    Recommend(RecommendArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// Answer set as JSON (question id -> option id)
    #[arg(long, conflicts_with = "answers_csv")]
    answers: Option<PathBuf>,
    /// Answer set as a CSV export with Question ID and Option ID columns
    #[arg(long)]
    answers_csv: Option<PathBuf>,
    /// Question catalog file (defaults to the built-in questionnaire)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Knowledge base file (defaults to the built-in reference material)
    #[arg(long)]
    knowledge: Option<PathBuf>,
    /// Emit the full evaluation as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Deserialize)]
struct RecommendationRequest {
    #[serde(default)]
    answers: Option<AnswerSet>,
    #[serde(default)]
    answers_csv: Option<String>,
}

#[derive(Debug, Serialize)]
struct RecommendationResponse {
    evaluated_at: DateTime<Local>,
    answer_source: AnswerSource,
    answered: usize,
    recommendation: Outcome,
    recommendation_label: &'static str,
    score: i32,
    margin: i32,
    confidence: Confidence,
    confidence_label: &'static str,
    totals: ScoreTotals,
    justification: JustificationDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum AnswerSource {
    Inline,
    Csv,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Recommend(args) => run_recommend(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let data = Arc::new(AdvisorData::load(&config.data)?);
    info!(questions = data.catalog.len(), "advisor data loaded");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = router(state, data).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "os advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState, data: Arc<AdvisorData>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/recommendation", post(recommendation_endpoint))
        .layer(Extension(data))
        .with_state(state)
}

fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        answers,
        answers_csv,
        catalog,
        knowledge,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if catalog.is_some() {
        config.data.catalog = catalog;
    }
    if knowledge.is_some() {
        config.data.knowledge = knowledge;
    }
    let data = AdvisorData::load(&config.data)?;

    let answer_set = match (answers, answers_csv) {
        (Some(path), _) => AnswerSet::from_path(path)?,
        (None, Some(path)) => CsvAnswerImporter::from_path(path)?,
        (None, None) => AnswerSet::new(),
    };

    let evaluation = evaluate(&data.catalog, &data.knowledge, &answer_set)?;

    if json {
        let rendered = serde_json::to_string_pretty(&evaluation)
            .map_err(os_advisor::advisor::LoadError::Json)?;
        println!("{rendered}");
    } else {
        render_recommendation(&evaluation, &answer_set, data.catalog.len());
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn recommendation_endpoint(
    Extension(data): Extension<Arc<AdvisorData>>,
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let RecommendationRequest {
        answers,
        answers_csv,
    } = payload;

    let (answer_set, answer_source) = match answers_csv {
        Some(csv) => {
            let reader = Cursor::new(csv.into_bytes());
            (CsvAnswerImporter::from_reader(reader)?, AnswerSource::Csv)
        }
        None => (answers.unwrap_or_default(), AnswerSource::Inline),
    };

    let evaluation = evaluate(&data.catalog, &data.knowledge, &answer_set)?;
    let winner = evaluation.recommendation();

    Ok(Json(RecommendationResponse {
        evaluated_at: Local::now(),
        answer_source,
        answered: answer_set.len(),
        recommendation: winner.outcome,
        recommendation_label: winner.outcome_label,
        score: winner.score,
        margin: evaluation.ranking.margin(),
        confidence: evaluation.confidence,
        confidence_label: evaluation.confidence.label(),
        totals: evaluation.totals,
        justification: evaluation.justification,
    }))
}

fn render_recommendation(evaluation: &Evaluation, answers: &AnswerSet, question_count: usize) {
    let winner = evaluation.recommendation();

    println!("{}", evaluation.justification.headline);
    println!(
        "Recommendation: {} (confidence {}, score {}, margin {} over {})",
        winner.outcome_label,
        evaluation.confidence.label(),
        winner.score,
        evaluation.ranking.margin(),
        evaluation.ranking.runner_up().outcome_label
    );
    println!("Answered {} of {} questions", answers.len(), question_count);

    println!("\nAnswers that favored {}", winner.outcome_label);
    for reason in &evaluation.justification.reasons {
        println!("- {}", reason.summary());
    }

    println!("\nTechnical comparison");
    for row in &evaluation.justification.comparison {
        println!("- {}", row.outcome_label);
        println!("  architecture: {}", row.architecture);
        println!("  security: {}", row.security);
        println!("  use cases: {}", row.use_cases);
    }

    if !evaluation.justification.conclusion.is_empty() {
        println!("\nConclusion: {}", evaluation.justification.conclusion);
    }

    println!("\nFinal scores");
    for entry in &evaluation.justification.scores {
        println!("- {}: {}", entry.outcome_label, entry.score);
    }
}

//! Draw service: generate draws (ephemeral, regenerate freely), save one realization per competition.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT. DRAW_DATA_DIR persists draws as JSON files (in memory otherwise),
//! DRAW_COURTS sets the court list (default 1,2,3).

use actix_web::{
    get, post,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use draw_engine::{
    generate_bracket, read_roster, store::is_valid_competition_id, Bracket, BracketShape,
    BracketStore, CompetitionId, Competitor, CompetitorId, DrawId, EngineConfig,
    JsonFileBracketStore, MemoryBracketStore, PendingDraws, StoreError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

struct AppState {
    /// Latest unsaved draw per competition.
    draws: PendingDraws,
    store: Arc<dyn BracketStore>,
    config: EngineConfig,
}

type SharedState = Data<AppState>;

/// Unsaved draws not touched for this long are dropped.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct GenerateDrawBody {
    competitors: Vec<Competitor>,
    #[serde(default)]
    seeding: Vec<CompetitorId>,
    /// Replay a previous draw; a fresh seed is drawn when absent.
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct SeedQuery {
    seed: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedDraw<'a> {
    /// None for an empty draw, which cannot be saved.
    draw_id: Option<DrawId>,
    seed: u64,
    shape: BracketShape,
    matches: &'a Bracket,
}

/// Path segment: competition id (e.g. /api/competitions/{id}/pairings)
#[derive(Deserialize)]
struct CompetitionPath {
    id: CompetitionId,
}

/// Path segments: competition id and draw id
#[derive(Deserialize)]
struct DrawPath {
    id: CompetitionId,
    draw_id: DrawId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "draw-engine",
    })
}

/// Generate a draw from a JSON competitor list. Calling again regenerates.
#[post("/api/competitions/{id}/draws")]
async fn api_generate_draw(
    state: SharedState,
    path: Path<CompetitionPath>,
    body: Json<GenerateDrawBody>,
) -> HttpResponse {
    let body = body.into_inner();
    create_draw(&state, path.into_inner().id, &body.competitors, &body.seeding, body.seed)
}

/// Generate a draw from a CSV roster (`athleteId,clubId`).
#[post("/api/competitions/{id}/draws/csv")]
async fn api_generate_draw_csv(
    state: SharedState,
    path: Path<CompetitionPath>,
    query: Query<SeedQuery>,
    body: String,
) -> HttpResponse {
    let competitors = match read_roster(body.as_bytes()) {
        Ok(c) => c,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    create_draw(&state, path.into_inner().id, &competitors, &[], query.seed)
}

fn create_draw(
    state: &AppState,
    competition_id: CompetitionId,
    competitors: &[Competitor],
    seeding: &[CompetitorId],
    seed: Option<u64>,
) -> HttpResponse {
    if !is_valid_competition_id(&competition_id) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Invalid competition id" }));
    }
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let bracket = match generate_bracket(competitors, seeding, &state.config, &mut rng) {
        Ok(b) => b,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };

    let shape = BracketShape::for_field(competitors.len());
    let draw_id = match state.draws.insert(&competition_id, bracket.clone()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(GeneratedDraw {
        draw_id,
        seed,
        shape,
        matches: &bracket,
    })
}

/// Persist one generated draw, replacing whatever was saved for the competition before.
#[post("/api/competitions/{id}/draws/{draw_id}/save")]
async fn api_save_draw(state: SharedState, path: Path<DrawPath>) -> HttpResponse {
    let DrawPath { id, draw_id } = path.into_inner();
    let bracket = match state.draws.get(&id, draw_id) {
        Ok(Some(b)) => b,
        Ok(None) => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No draw" })),
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };

    let store = Arc::clone(&state.store);
    let competition_id = id.clone();
    let result = web::block(move || store.create_or_replace_pairings(&competition_id, &bracket)).await;
    match result {
        Ok(Ok(record)) => {
            if let Err(e) = state.draws.remove(draw_id) {
                log::warn!("Could not drop saved draw {}: {}", draw_id, e);
            }
            HttpResponse::Ok().json(record)
        }
        Ok(Err(e @ (StoreError::Rejected(_) | StoreError::InvalidCompetitionId(_)))) => {
            log::warn!("Refused to save draw {} for {}: {}", draw_id, id, e);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
        Ok(Err(e)) => {
            log::warn!("Saving draw {} for {} failed: {}", draw_id, id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => {
            log::warn!("Saving draw {} for {} did not run: {}", draw_id, id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// The saved draw for a competition (404 if none).
#[get("/api/competitions/{id}/pairings")]
async fn api_get_pairings(state: SharedState, path: Path<CompetitionPath>) -> HttpResponse {
    let store = Arc::clone(&state.store);
    let id = path.into_inner().id;
    let competition_id = id.clone();
    match web::block(move || store.load_pairings(&competition_id)).await {
        Ok(Ok(Some(record))) => HttpResponse::Ok().json(record),
        Ok(Ok(None)) => HttpResponse::NotFound().json(serde_json::json!({ "error": "No draw saved" })),
        Ok(Err(e @ StoreError::InvalidCompetitionId(_))) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
        Ok(Err(e)) => {
            log::warn!("Loading draw for {} failed: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => {
            log::warn!("Loading draw for {} did not run: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn open_store() -> std::io::Result<Arc<dyn BracketStore>> {
    match std::env::var("DRAW_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let store = JsonFileBracketStore::open(dir.trim())
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            log::info!("Persisting draws under {}", store.dir().display());
            Ok(Arc::new(store))
        }
        _ => {
            log::info!("DRAW_DATA_DIR not set, saved draws live in memory only");
            Ok(Arc::new(MemoryBracketStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let config = EngineConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    log::info!("Courts: {:?}", config.courts());

    let state = Data::new(AppState {
        draws: PendingDraws::new(),
        store: open_store()?,
        config,
    });

    // Background task: every 30 minutes, drop unsaved draws inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let removed = match state_cleanup.draws.sweep(INACTIVITY_TIMEOUT) {
                Ok(n) => n,
                Err(_) => continue,
            };
            if removed > 0 {
                log::info!("Dropped {} unsaved draw(s) (no activity for 12h)", removed);
            }
        }
    });

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_generate_draw_csv)
            .service(api_generate_draw)
            .service(api_save_draw)
            .service(api_get_pairings)
    })
    .bind(bind)?
    .run()
    .await
}

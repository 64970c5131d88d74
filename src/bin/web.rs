//! Single binary JSON API over the tournament core.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pickleball_tournament_web::{
    confirm_schedule, generate_elimination_stage, generate_pairings, parse_roster, report_score,
    RankTier, Tournament, TournamentConfig, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Every mutation goes through the write lock.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// How often the cleanup task runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    rank: RankTier,
    #[serde(default)]
    exclusions: Vec<String>,
}

#[derive(Deserialize)]
struct ReportScoreBody {
    match_id: String,
    score_1: u32,
    score_2: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: String,
}

/// Path segments: tournament id and standings view (pairs, players or groups).
#[derive(Deserialize)]
struct StandingsPath {
    id: TournamentId,
    view: String,
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `action` against one tournament under the write lock, refreshing its activity time.
/// Responds 404 for unknown ids and 400 with the error text when `action` fails.
fn with_tournament<F>(state: &AppState, id: TournamentId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<HttpResponse, TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    action(&mut entry.tournament).unwrap_or_else(bad_request)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pickleball-tournament-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<TournamentConfig>>) -> HttpResponse {
    let config = body.map(|b| b.into_inner()).unwrap_or_default();
    if let Err(e) = config.validate() {
        return bad_request(e);
    }
    let tournament = Tournament::new(config);
    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created tournament {}", tournament.id);
    g.insert(
        tournament.id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| Ok(HttpResponse::Ok().json(&*t)))
}

/// Replace the config (Setup only).
#[put("/api/tournaments/{id}/config")]
async fn api_set_config(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentConfig>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.set_config(body.into_inner())?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Register a player (Setup only).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.add_player(body.name.as_str(), body.rank, &body.exclusions)?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Register every player from a CSV roster sent as the request body (Setup only).
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let entries = parse_roster(body.as_bytes())?;
        let added = t.import_roster(&entries)?;
        log::info!("Tournament {}: imported {} players", t.id, added);
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Remove a player by id (Setup only).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.remove_player(&path.player_id)?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Generate or re-roll pairs and groups (Setup or Pairing).
#[post("/api/tournaments/{id}/pairs/generate")]
async fn api_generate_pairs(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        generate_pairings(t)?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Confirm pairs and build the group-stage schedule (Pairing -> Schedule).
#[post("/api/tournaments/{id}/schedule")]
async fn api_confirm_schedule(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        confirm_schedule(t)?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Report a score for one match (Schedule only).
#[put("/api/tournaments/{id}/matches/score")]
async fn api_report_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ReportScoreBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        report_score(t, &body.match_id, body.score_1, body.score_2)?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Build the playoff bracket from current standings (Schedule only).
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        generate_elimination_stage(t)?;
        Ok(HttpResponse::Ok().json(&*t))
    })
}

/// Ranked standings: `pairs`, `players`, or `groups` (one table per group).
#[get("/api/tournaments/{id}/standings/{view}")]
async fn api_standings(state: AppState, path: Path<StandingsPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let response = match path.view.as_str() {
            "pairs" => HttpResponse::Ok().json(t.pair_standings()),
            "players" => HttpResponse::Ok().json(t.player_standings()),
            "groups" => {
                let tables: Vec<_> = t
                    .group_standings()
                    .into_iter()
                    .map(|(group, rows)| serde_json::json!({ "group": group, "rows": rows }))
                    .collect();
                HttpResponse::Ok().json(tables)
            }
            _ => HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Unknown standings view" })),
        };
        Ok(response)
    })
}

/// Restart tournament: back to Setup with the same roster and config.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.restart();
        Ok(HttpResponse::Ok().json(&*t))
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: periodically remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_set_config)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_generate_pairs)
            .service(api_confirm_schedule)
            .service(api_report_score)
            .service(api_generate_bracket)
            .service(api_standings)
            .service(api_restart_tournament)
    })
    .bind(bind)?
    .run()
    .await
}

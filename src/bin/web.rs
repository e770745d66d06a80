//! Single binary web server: JSON/CSV API over the tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, INACTIVITY_HOURS, LONG_POLL_SECONDS.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pickleball_bracket_web::logic::{clamp_score, roster_lines};
use pickleball_bracket_web::{
    apply_results_csv, export_json, import_json, parse_roster_csv, podium, rebuild_from_roster,
    record_score, regenerate_from_roster, results_csv, standings_csv, update_knockout_config,
    KnockoutConfigPatch, Tournament, TournamentConfig, TournamentError, TournamentId,
    TournamentStore,
};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

type AppState = Data<TournamentStore>;

/// How often the cleanup task looks for idle tournaments.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Server settings read from the environment.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    /// Tournaments not accessed for this long are removed.
    inactivity_timeout: Duration,
    /// How long an update request waits for a new snapshot.
    long_poll: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let inactivity_hours: u64 = env_or("INACTIVITY_HOURS", 12);
        let long_poll_seconds: u64 = env_or("LONG_POLL_SECONDS", 25);
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 8080),
            inactivity_timeout: hours(inactivity_hours),
            long_poll: Duration::from_secs(long_poll_seconds),
        }
    }
}

fn hours(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(3600))
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    created_by: String,
    /// One entrant per line, `name [- tier]`.
    roster: String,
    #[serde(default)]
    config: TournamentConfig,
}

#[derive(Deserialize)]
struct RebuildBody {
    roster: String,
    #[serde(default)]
    config: Option<TournamentConfig>,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_1: Option<i64>,
    score_2: Option<i64>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::StoreUnavailable | TournamentError::Export(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn respond(result: Result<Tournament, TournamentError>) -> HttpResponse {
    match result {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Download name like `pickleball_Summer_Cup_2026-10-19.json`.
fn export_file_name(t: &Tournament, extension: &str) -> String {
    let name = t.name.split_whitespace().collect::<Vec<_>>().join("_");
    format!(
        "pickleball_{}_{}.{}",
        name,
        chrono::Utc::now().format("%Y-%m-%d"),
        extension
    )
}

fn attachment(t: &Tournament, extension: &str, content_type: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", export_file_name(t, extension)),
        ))
        .body(body)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pickleball-bracket-web",
    })
}

/// List stored tournaments, most recently updated first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.list() {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(&e),
    }
}

/// Create a tournament from a roster: teams, groups, fixtures, and placeholder bracket.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Tournament name is required" }));
    }
    let result = regenerate_from_roster(name, &body.created_by, &body.roster, body.config)
        .and_then(|t| state.insert(t));
    if let Ok(t) = &result {
        log::info!("Tournament {} ('{}') created", t.id, t.name);
    }
    respond(result)
}

/// Get a tournament by id (404 if not found). Touching it refreshes its activity time.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.get(path.id))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.remove(path.id) {
        Ok(()) => {
            log::info!("Tournament {} deleted", path.id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&e),
    }
}

/// Redraw teams, groups, and fixtures from a new roster. Discards all results.
#[put("/api/tournaments/{id}/roster")]
async fn api_rebuild_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RebuildBody>,
) -> HttpResponse {
    let body = body.into_inner();
    respond(state.update(path.id, |t| {
        rebuild_from_roster(t, &body.roster, body.config, &mut rand::thread_rng())
    }))
}

/// Record or clear a match score. Negative scores are clamped to zero.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let score_1 = body.score_1.map(clamp_score);
    let score_2 = body.score_2.map(clamp_score);
    respond(state.update(path.id, |t| {
        record_score(t, &path.match_id, score_1, score_2)
    }))
}

/// Change knockout settings (advancement rule, third place, on/off).
#[put("/api/tournaments/{id}/knockout")]
async fn api_update_knockout(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<KnockoutConfigPatch>,
) -> HttpResponse {
    respond(state.update(path.id, |t| Ok(update_knockout_config(t, &body))))
}

/// Champion, runner-up, and third place once the final is decided (null before).
#[get("/api/tournaments/{id}/podium")]
async fn api_podium(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get(path.id) {
        Ok(t) => HttpResponse::Ok().json(podium(&t)),
        Err(e) => error_response(&e),
    }
}

/// Long poll: wait for the next snapshot of this tournament (204 on timeout).
#[get("/api/tournaments/{id}/updates")]
async fn api_wait_for_update(
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let id = path.id;
    let mut updates = state.subscribe();
    if let Err(e) = state.get(id) {
        return error_response(&e);
    }
    let next = async {
        loop {
            match updates.recv().await {
                Ok(t) if t.id == id => return Some(t),
                Ok(_) => continue,
                // Each snapshot replaces the last one, so the stored state covers what was missed.
                Err(RecvError::Lagged(_)) => return state.get(id).ok(),
                Err(RecvError::Closed) => return None,
            }
        }
    };
    match tokio::time::timeout(config.long_poll, next).await {
        Ok(Some(t)) => HttpResponse::Ok().json(t),
        _ => HttpResponse::NoContent().finish(),
    }
}

#[get("/api/tournaments/{id}/export.json")]
async fn api_export_json(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let t = match state.get(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    match export_json(&t) {
        Ok(json) => attachment(&t, "json", "application/json", json),
        Err(e) => error_response(&e),
    }
}

/// Import a JSON snapshot. Replaces the stored tournament with the same id, if any.
#[post("/api/tournaments/import")]
async fn api_import_json(state: AppState, body: String) -> HttpResponse {
    respond(import_json(&body).and_then(|t| state.insert(t)))
}

#[get("/api/tournaments/{id}/results.csv")]
async fn api_export_results(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let t = match state.get(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    match results_csv(&t) {
        Ok(csv) => attachment(&t, "csv", "text/csv; charset=utf-8", csv),
        Err(e) => error_response(&e),
    }
}

/// Apply an edited results sheet (scores matched by match id).
#[put("/api/tournaments/{id}/results.csv")]
async fn api_import_results(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    respond(state.update(path.id, |t| apply_results_csv(t, &body)))
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_export_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let t = match state.get(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    match standings_csv(&t) {
        Ok(csv) => attachment(&t, "csv", "text/csv; charset=utf-8", csv),
        Err(e) => error_response(&e),
    }
}

/// Parse a player sheet (`name, address, level` with header) into players and roster lines.
#[post("/api/roster/csv")]
async fn api_parse_roster_csv(body: String) -> HttpResponse {
    match parse_roster_csv(body.as_bytes()) {
        Ok(players) => HttpResponse::Ok().json(serde_json::json!({
            "roster": roster_lines(&players),
            "players": players,
        })),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(TournamentStore::new());
    let server_config = Data::new(config.clone());

    // Background task: periodically remove tournaments past the inactivity timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            match state_cleanup.evict_inactive(inactivity_timeout) {
                Ok(0) => {}
                Ok(removed) => log::info!("Cleaned up {} inactive tournament(s)", removed),
                Err(e) => log::error!("Cleanup skipped: {}", e),
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(server_config.clone())
            .service(api_health)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_import_json)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_rebuild_tournament)
            .service(api_record_score)
            .service(api_update_knockout)
            .service(api_podium)
            .service(api_wait_for_update)
            .service(api_export_json)
            .service(api_export_results)
            .service(api_import_results)
            .service(api_export_standings)
            .service(api_parse_roster_csv)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_inactivity_setting_saturates() {
        assert_eq!(hours(12), Duration::from_secs(12 * 3600));
        assert_eq!(hours(u64::MAX), Duration::from_secs(u64::MAX));
    }
}

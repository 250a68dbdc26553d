//! Demo de extremo a extremo contra colaboradores en memoria: búsqueda con
//! debounce, miss de caché, disparo del trabajo y sondeo hasta resolver.
//! El "trabajo externo" se simula haciendo visible el registro tras dos
//! sondeos. Ejecutar con `RUST_LOG=debug` para ver los tags del sondeo.

use medinteract_core::{
    derive_token, CacheRecord, DrugIdentity, InMemoryCacheStore, InMemoryDrugCatalog,
    InteractionSession, MockJobSubmitter, SearchDebouncer, SessionPhase, SessionState, CONFIG,
};

fn phase_name(state: &SessionState) -> &'static str {
    match state.phase {
        SessionPhase::Idle => "Idle",
        SessionPhase::Submitting => "Submitting",
        SessionPhase::AwaitingJob => "AwaitingJob",
        SessionPhase::Resolved { .. } => "Resolved",
        SessionPhase::Failed { .. } => "Failed",
        SessionPhase::TimedOut => "TimedOut",
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let catalog = InMemoryDrugCatalog::new(vec![
        DrugIdentity::new("Panadol", "Paracetamol", "LP-001", "Paracetamol"),
        DrugIdentity::new("Nurofen", "Ibuprofen", "LP-002", "Ibuprofen"),
        DrugIdentity::new("Nurofen Plus", "Ibuprofen + Codeine", "LP-003", "Ibuprofen + Codeine"),
    ]);

    // Búsqueda incremental: el usuario teclea "nu" y pausa.
    let mut search = SearchDebouncer::new(catalog.clone());
    let mut search_rx = search.subscribe();
    search.on_input("nu");
    loop {
        search_rx.changed().await.expect("search channel");
        let results = search_rx.borrow().clone();
        if !results.candidates.is_empty() {
            println!("[search] {:?} -> {} candidates", results.query, results.candidates.len());
            break;
        }
    }

    let drug_a = DrugIdentity::new("Panadol", "Paracetamol", "LP-001", "Paracetamol");
    let drug_b = DrugIdentity::new("Nurofen", "Ibuprofen", "LP-002", "Ibuprofen");

    // Tiempos de configuración, acortados para que la demo termine en segundos.
    let mut timing = CONFIG.timing.clone();
    timing.poll_interval_ms = 300;
    timing.timeout_ms = 10_000;
    timing.progress_tick_ms = 100;

    let store = InMemoryCacheStore::new();
    let token = derive_token(&drug_a, &drug_b);
    let record = CacheRecord::new(
        vec!["low risk".into()],
        vec!["No clinically relevant interaction described.".into()],
        vec!["Paracetamol + Ibuprofen".into()],
    );
    // El registro aparece tras la consulta inicial y dos sondeos.
    store.insert_visible_after(token, record, 3);

    let mut session = InteractionSession::with_timing(store, MockJobSubmitter::accepting(), timing);
    let mut rx = session.subscribe();

    let outcome = session
        .start(Some(&drug_a), Some(&drug_b))
        .await
        .expect("session start");
    println!("[session] start -> {outcome:?}");

    loop {
        rx.changed().await.expect("session channel");
        let state = rx.borrow().clone();
        println!(
            "[session] phase={} pair {}/{} ({})",
            phase_name(&state),
            state.current_pair_index,
            state.total_pair_count,
            state.current_pair_label,
        );
        match state.phase {
            SessionPhase::Resolved { record, from_cache } => {
                println!("[session] resolved (from_cache={from_cache})");
                for (i, label) in record.pair_labels.iter().enumerate() {
                    let verdict = record.verdicts.get(i).map(String::as_str).unwrap_or("-");
                    println!("  {label}: {verdict}");
                }
                break;
            }
            SessionPhase::Failed { message } => {
                println!("[session] failed: {message}");
                break;
            }
            SessionPhase::TimedOut => {
                println!("[session] timed out");
                break;
            }
            _ => {}
        }
    }
}

//! Comportamiento del debounce de búsqueda con el reloj pausado.

use tokio::sync::watch;

use medinteract_core::{DrugIdentity, InMemoryDrugCatalog, SearchDebouncer, SearchResults};

fn catalog() -> InMemoryDrugCatalog {
    InMemoryDrugCatalog::new(vec![
        DrugIdentity::new("Panadol", "Paracetamol", "LP-001", "Paracetamol"),
        DrugIdentity::new("Nurofen", "Ibuprofen", "LP-002", "Ibuprofen"),
        DrugIdentity::new("Nurofen Plus", "Ibuprofen + Codeine", "LP-003", "Ibuprofen + Codeine"),
    ])
}

async fn wait_results(
    rx: &mut watch::Receiver<SearchResults>,
    pred: impl Fn(&SearchResults) -> bool,
) -> SearchResults {
    loop {
        {
            let results = rx.borrow_and_update();
            if pred(&results) {
                return results.clone();
            }
        }
        rx.changed().await.expect("search channel closed");
    }
}

#[tokio::test(start_paused = true)]
async fn queries_below_minimum_length_never_hit_the_store() {
    let provider = catalog();
    let mut search = SearchDebouncer::new(provider.clone());

    search.on_input("n");
    tokio::time::advance(std::time::Duration::from_secs(2)).await;
    tokio::task::yield_now().await;

    assert!(search.results().candidates.is_empty());
    assert_eq!(provider.search_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn rapid_retypes_collapse_into_one_lookup() {
    let provider = catalog();
    let mut search = SearchDebouncer::new(provider.clone());
    let mut rx = search.subscribe();

    // Tres pulsaciones seguidas dentro de la ventana de debounce.
    search.on_input("pa");
    search.on_input("par");
    search.on_input("para");

    let results = wait_results(&mut rx, |r| !r.candidates.is_empty()).await;
    assert_eq!(results.query, "para");
    assert_eq!(results.candidates.len(), 1);
    assert_eq!(results.candidates[0].mnn_name, "Paracetamol");
    assert_eq!(provider.search_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn matches_both_name_fields_case_insensitively() {
    let provider = catalog();
    let mut search = SearchDebouncer::new(provider.clone());
    let mut rx = search.subscribe();

    // Prefijo del MNN, en mayúsculas.
    search.on_input("IBU");
    let results = wait_results(&mut rx, |r| !r.candidates.is_empty()).await;
    assert_eq!(results.candidates.len(), 2);

    // Prefijo del nombre comercial.
    search.on_input("nuro");
    let results = wait_results(&mut rx, |r| r.query == "nuro" && !r.candidates.is_empty()).await;
    assert_eq!(results.candidates.len(), 2);
    assert!(results
        .candidates
        .iter()
        .all(|d| d.commercial_name.starts_with("Nurofen")));
}

#[tokio::test(start_paused = true)]
async fn result_count_is_limited() {
    let drugs: Vec<DrugIdentity> = (0..12)
        .map(|i| DrugIdentity::new(format!("Generic{i:02}"), "", format!("LP-{i:03}"), ""))
        .collect();
    let provider = InMemoryDrugCatalog::new(drugs);
    let mut search = SearchDebouncer::new(provider);
    let mut rx = search.subscribe();

    search.on_input("gen");
    let results = wait_results(&mut rx, |r| !r.candidates.is_empty()).await;
    assert_eq!(results.candidates.len(), 10);
}

#[tokio::test(start_paused = true)]
async fn shortening_the_query_clears_candidates() {
    let provider = catalog();
    let mut search = SearchDebouncer::new(provider.clone());
    let mut rx = search.subscribe();

    search.on_input("nuro");
    let _ = wait_results(&mut rx, |r| !r.candidates.is_empty()).await;

    // Borrar hasta quedar por debajo del mínimo limpia en el acto.
    search.on_input("n");
    let results = search.results();
    assert_eq!(results.query, "n");
    assert!(results.candidates.is_empty());
    assert_eq!(provider.search_count(), 1);
}

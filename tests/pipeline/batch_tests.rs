use indexmap::IndexMap;
use synthtap::pipeline::run::plan_batches;

fn ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

#[test]
fn test_chunks_never_exceed_chunk_size() {
    let mut tests = IndexMap::new();
    tests.insert("web".to_string(), ids("w", 120));

    let planned = plan_batches(&tests, 50);
    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0].iter().map(Vec::len).collect::<Vec<_>>(), [50, 50, 20]);
}

#[test]
fn test_chunk_concatenation_covers_original_ids() {
    let mut tests = IndexMap::new();
    tests.insert("web".to_string(), ids("w", 73));
    tests.insert("transaction".to_string(), ids("t", 3));

    let planned = plan_batches(&tests, 50);

    let rejoined: Vec<String> = planned[0].iter().flatten().cloned().collect();
    assert_eq!(rejoined, tests["web"]);

    let rejoined: Vec<String> = planned[1].iter().flatten().cloned().collect();
    assert_eq!(rejoined, tests["transaction"]);
}

#[test]
fn test_category_insertion_order_preserved() {
    let mut tests = IndexMap::new();
    tests.insert("zeta".to_string(), ids("z", 1));
    tests.insert("alpha".to_string(), ids("a", 1));

    let planned = plan_batches(&tests, 50);
    assert_eq!(planned[0][0], ["z0"]);
    assert_eq!(planned[1][0], ["a0"]);
}

#[test]
fn test_empty_category_yields_no_chunks() {
    let mut tests = IndexMap::new();
    tests.insert("web".to_string(), Vec::new());

    let planned = plan_batches(&tests, 50);
    assert_eq!(planned, vec![Vec::<Vec<String>>::new()]);
}

#[test]
fn test_small_chunk_size() {
    let mut tests = IndexMap::new();
    tests.insert("web".to_string(), ids("w", 5));

    let planned = plan_batches(&tests, 2);
    assert_eq!(planned[0].iter().map(Vec::len).collect::<Vec<_>>(), [2, 2, 1]);
}

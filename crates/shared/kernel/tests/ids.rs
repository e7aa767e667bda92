use atelier_kernel::ids::{REFERENCE_ALPHABET, is_quote_reference, quote_reference};
use atelier_kernel::{SAFE_ALPHABET, safe_nanoid, time};

#[test]
fn nanoid_uses_safe_alphabet() {
    let id = safe_nanoid!();
    assert_eq!(id.len(), 12);
    assert!(id.chars().all(|ch| SAFE_ALPHABET.contains(&ch)), "{id}");
    assert_eq!(safe_nanoid!(20).len(), 20);
}

#[test]
fn quote_references_are_well_formed_and_vary() {
    let now = time::now();
    let references: Vec<String> = (0..32).map(|_| quote_reference(now)).collect();

    for reference in &references {
        assert!(is_quote_reference(reference), "{reference}");
        assert!(reference[10..].chars().all(|c| REFERENCE_ALPHABET.contains(&c)));
    }

    let mut unique = references.clone();
    unique.sort();
    unique.dedup();
    assert!(unique.len() > 1);
}

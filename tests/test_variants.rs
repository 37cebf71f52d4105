//! Exact card-number extraction and lookup against captured markup.

mod common;

use opcg_memo::{extract_variants, CatalogError, Extractor};

const IMG: &str = "https://www.onepiece-cardgame.com/images/cardlist/card";
const OP06_PACK: &str = "ブースターパック 双璧の覇者【OP-06】";
const PRB_PACK: &str = "プレミアムブースター ONE PIECE CARD THE BEST【PRB-01】";
const PROMO_PACK: &str = "プロモーションカード フラッグシップバトル 大会記念";

// ---------------------------------------------------------------------------
// extract_variants
// ---------------------------------------------------------------------------

#[test]
fn extracts_every_matching_block() {
    let variants = extract_variants(common::OP06_118_PAGE, "OP06-118").unwrap();

    let ids: Vec<&str> = variants.iter().map(|v| v.variant_id.as_str()).collect();
    assert_eq!(ids, vec!["OP06-118", "OP06-118_p1", "OP06-118_p2"]);
    assert!(variants.iter().all(|v| v.card_no == "OP06-118"));
    assert!(variants.iter().all(|v| v.card_name == "ロロノア・ゾロ"));
}

#[test]
fn remarks_sections_are_excluded() {
    let variants = extract_variants(common::OP06_118_PAGE, "OP06-118").unwrap();
    assert_eq!(variants[0].packs, vec![OP06_PACK]);
}

#[test]
fn packs_are_collapsed_and_deduplicated_per_block() {
    let variants = extract_variants(common::OP06_118_PAGE, "OP06-118").unwrap();
    assert_eq!(variants[1].packs, vec![OP06_PACK, PRB_PACK]);
    assert_eq!(variants[2].packs, vec![PROMO_PACK]);
}

#[test]
fn image_paths_are_absolutized() {
    let variants = extract_variants(common::OP06_118_PAGE, "OP06-118").unwrap();
    assert_eq!(
        variants[0].image_url.as_deref(),
        Some(format!("{IMG}/OP06-118.png?250301").as_str())
    );
    assert_eq!(
        variants[1].image_url.as_deref(),
        Some(format!("{IMG}/OP06-118_p1.png?250301").as_str())
    );
}

#[test]
fn block_without_data_src_has_no_image() {
    let variants = extract_variants(common::OP06_118_PAGE, "OP06-118").unwrap();
    assert_eq!(variants[2].variant_id, "OP06-118_p2");
    assert!(variants[2].image_url.is_none());
}

#[test]
fn prefix_of_a_number_matches_nothing() {
    let variants = extract_variants(common::OP06_118_PAGE, "OP06-11").unwrap();
    assert!(variants.is_empty());
}

#[test]
fn neighbouring_number_is_kept_apart() {
    let variants = extract_variants(common::OP06_118_PAGE, "OP06-119").unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].card_name, "ヤマト");
}

#[test]
fn empty_page_yields_no_variants() {
    assert!(extract_variants(common::EMPTY_PAGE, "OP06-118").unwrap().is_empty());
}

#[test]
fn custom_origin_is_used_for_images() {
    let extractor = Extractor::new("http://localhost:8080/").unwrap();
    let variants = extractor.variants(common::OP06_118_PAGE, "OP06-119").unwrap();
    assert_eq!(
        variants[0].image_url.as_deref(),
        Some("http://localhost:8080/images/cardlist/card/OP06-119.png?250301")
    );
}

#[test]
fn missing_id_gets_placeholder() {
    let html = r#"<dl class="modalCol">
        <dt><div class="infoCol"><span>OP01-001</span></div><div class="cardName">ロロノア・ゾロ</div></dt>
        <dd></dd></dl>"#;
    let variants = extract_variants(html, "OP01-001").unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].variant_id, "(no-id)");
    assert!(variants[0].packs.is_empty());
}

// ---------------------------------------------------------------------------
// VariantQuery::lookup
// ---------------------------------------------------------------------------

#[test]
fn lookup_aggregates_variants() {
    let (memo, _source) = common::setup_memo(common::fixture_source());
    let lookup = memo.variants().lookup("OP06-118").unwrap();

    assert_eq!(lookup.card_no, "OP06-118");
    assert_eq!(lookup.card_name, "ロロノア・ゾロ");
    assert_eq!(lookup.packs, vec![OP06_PACK, PRB_PACK, PROMO_PACK]);
    // The image-less parallel is dropped but its pack survives above.
    assert_eq!(lookup.variants.len(), 2);
    assert_eq!(lookup.image_urls().len(), 2);
}

#[test]
fn lookup_normalizes_input_case() {
    let (memo, source) = common::setup_memo(common::fixture_source());
    let lookup = memo.variants().lookup(" op06-118 ").unwrap();
    assert_eq!(lookup.card_no, "OP06-118");
    assert_eq!(source.queries.lock().unwrap()[0].freewords, "OP06-118");
}

#[test]
fn lookup_parts_joins_prefix_and_number() {
    let (memo, _source) = common::setup_memo(common::fixture_source());
    let lookup = memo.variants().lookup_parts("OP", "06-118").unwrap();
    assert_eq!(lookup.card_no, "OP06-118");
}

#[test]
fn unknown_number_is_not_found() {
    let (memo, source) = common::setup_memo(common::fixture_source());
    let err = memo.variants().lookup("OP99-999").unwrap_err();
    match err {
        CatalogError::NotFound(msg) => assert!(msg.contains("OP99-999")),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(source.fetch_count(), 1);
}

#[test]
fn malformed_number_is_rejected_before_fetching() {
    let (memo, source) = common::setup_memo(common::fixture_source());

    for bad in ["6-118", "OP6-118", "OP06118", ""] {
        let err = memo.variants().lookup(bad).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)), "{bad}: {err:?}");
    }
    assert!(matches!(
        memo.variants().lookup_parts("OP", "6-118"),
        Err(CatalogError::Validation(_))
    ));
    assert_eq!(source.fetch_count(), 0);
}

#[test]
fn lookups_are_memoized() {
    let (memo, source) = common::setup_memo(common::fixture_source());
    let first = memo.variants().lookup("OP06-118").unwrap();
    let second = memo.variants().lookup("OP06-118").unwrap();
    assert_eq!(first, second);
    assert_eq!(source.fetch_count(), 1);

    memo.clear_cache();
    memo.variants().lookup("OP06-118").unwrap();
    assert_eq!(source.fetch_count(), 2);
}

#[test]
fn memo_counts_track_lookups_and_clearing() {
    let (memo, _source) = common::setup_memo(common::fixture_source());
    assert_eq!(memo.catalog().memoized_lookups(), 0);

    memo.variants().lookup("OP06-118").unwrap();
    memo.variants().lookup("op06-118").unwrap();
    memo.candidates().search("ゾロ", &[]).unwrap();
    assert_eq!(memo.catalog().memoized_lookups(), 1);
    assert_eq!(memo.catalog().memoized_candidate_lists(), 1);
    assert!(memo.to_string().contains("memoized_lookups=1"));

    memo.clear_cache();
    assert_eq!(memo.catalog().memoized_lookups(), 0);
    assert_eq!(memo.catalog().memoized_candidate_lists(), 0);
}

#[test]
fn not_found_is_not_memoized() {
    let (memo, source) = common::setup_memo(common::fixture_source());
    assert!(memo.variants().lookup("OP99-999").is_err());
    assert!(memo.variants().lookup("OP99-999").is_err());
    assert_eq!(source.fetch_count(), 2);
}

#[test]
fn expired_lookups_are_refetched() {
    let (memo, source) = common::setup_memo_without_cache(common::fixture_source());
    memo.variants().lookup("OP06-118").unwrap();
    memo.variants().lookup("OP06-118").unwrap();
    assert_eq!(source.fetch_count(), 2);
}

#[test]
fn raw_variants_keep_imageless_printings() {
    let (memo, _source) = common::setup_memo(common::fixture_source());
    let variants = memo.variants().variants("OP06-118").unwrap();
    assert_eq!(variants.len(), 3);
}

#[test]
fn source_errors_propagate_unchanged() {
    let memo = opcg_memo::OpcgMemo::builder()
        .source(Box::new(common::FailingSource))
        .build()
        .unwrap();
    assert!(matches!(
        memo.variants().lookup("OP06-118"),
        Err(CatalogError::Io(_))
    ));
}

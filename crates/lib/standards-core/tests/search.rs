mod common;

use standards_core::envelope::VariationsEnvelope;

use crate::common::{FakeSynapse, bundle, explorer_with, http_error, row, topics_bundle};

fn standards_row(id: &str, name: &str) -> standards_synapse::TableRow {
    row(&[Some(id), Some(name), Some("a standard")])
}

const STANDARD_COLUMNS: &[&str] = &["id", "name", "description"];

#[tokio::test]
async fn run_sql_submits_the_statement_verbatim() {
    let transport = FakeSynapse::new(vec![Ok(bundle(
        vec![standards_row("B2AI_STANDARD:1", "FHIR")],
        STANDARD_COLUMNS,
    ))]);
    let explorer = explorer_with(transport.clone());

    let output = explorer
        .run_sql("SELECT * FROM syn100 LIMIT 5")
        .await
        .expect("query should succeed");

    assert_eq!(transport.submitted(), vec!["SELECT * FROM syn100 LIMIT 5"]);
    assert_eq!(output.returned(), 1);
    assert_eq!(output.columns.len(), 3);
}

#[tokio::test]
async fn search_one_builds_a_like_disjunction() {
    let transport = FakeSynapse::new(vec![Ok(bundle(
        vec![standards_row("B2AI_STANDARD:1", "FHIR")],
        STANDARD_COLUMNS,
    ))]);
    let explorer = explorer_with(transport.clone());

    let outcome = explorer
        .search_one("FHIR", 10, 0, false)
        .await
        .expect("search should succeed");

    let submitted = transport.submitted();
    assert_eq!(submitted.len(), 1, "plain search must not load topics");
    assert_eq!(
        submitted[0],
        "SELECT * FROM syn100 WHERE (name LIKE '%FHIR%' OR description LIKE '%FHIR%') LIMIT 10 OFFSET 0"
    );
    assert!(outcome.matched_topic.is_none());
    assert_eq!(outcome.output.returned(), 1);
}

#[tokio::test]
async fn topic_aware_search_widens_the_where_clause() {
    let transport = FakeSynapse::new(vec![
        Ok(topics_bundle(&[(
            "B2AI_TOPIC:1",
            "Genomics",
            Some("Genome sequencing data"),
        )])),
        Ok(bundle(
            vec![standards_row("B2AI_STANDARD:1", "FHIR")],
            STANDARD_COLUMNS,
        )),
    ]);
    let explorer = explorer_with(transport.clone());

    let outcome = explorer
        .search_one("Genomics", 10, 0, true)
        .await
        .expect("search should succeed");

    let matched = outcome.matched_topic.expect("topic should match");
    assert_eq!(matched.id, "B2AI_TOPIC:1");

    let submitted = transport.submitted();
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[0], "SELECT id, name, description FROM syn200");
    assert!(submitted[1].contains("concerns_data_topic LIKE '%B2AI_TOPIC:1%'"));
}

#[tokio::test]
async fn topic_aware_search_degrades_when_nothing_resolves() {
    let transport = FakeSynapse::new(vec![
        Ok(topics_bundle(&[("B2AI_TOPIC:1", "Genomics", None)])),
        Ok(bundle(Vec::new(), STANDARD_COLUMNS)),
    ]);
    let explorer = explorer_with(transport.clone());

    let outcome = explorer
        .search_one("proteomics", 10, 0, true)
        .await
        .expect("search should succeed without a topic");

    assert!(outcome.matched_topic.is_none());
    let submitted = transport.submitted();
    assert!(!submitted[1].contains("concerns_data_topic"));
}

#[tokio::test]
async fn variations_dedupe_by_identifier_with_first_term_winning() {
    let transport = FakeSynapse::new(vec![
        // "fhir" finds standards 1 and 2.
        Ok(bundle(
            vec![
                standards_row("B2AI_STANDARD:1", "FHIR"),
                standards_row("B2AI_STANDARD:2", "FHIR R4"),
            ],
            STANDARD_COLUMNS,
        )),
        // "hl7 fhir" finds 2 (duplicate) and 3.
        Ok(bundle(
            vec![
                standards_row("B2AI_STANDARD:2", "FHIR R4"),
                standards_row("B2AI_STANDARD:3", "HL7 v2"),
            ],
            STANDARD_COLUMNS,
        )),
        // Follow-up column-metadata query.
        Ok(bundle(
            vec![standards_row("B2AI_STANDARD:1", "FHIR")],
            STANDARD_COLUMNS,
        )),
    ]);
    let explorer = explorer_with(transport.clone());

    let terms = vec!["fhir".to_string(), "hl7 fhir".to_string()];
    let aggregate = explorer.search_variations("fhir", &terms, 10).await;

    assert_eq!(aggregate.hits.len(), 3);
    assert_eq!(aggregate.hits[0].values[0].as_deref(), Some("B2AI_STANDARD:1"));
    assert_eq!(aggregate.hits[0].matched_term, "fhir");
    assert!(aggregate.hits[0].is_original_term);
    assert_eq!(aggregate.hits[1].matched_term, "fhir");
    assert_eq!(aggregate.hits[2].values[0].as_deref(), Some("B2AI_STANDARD:3"));
    assert_eq!(aggregate.hits[2].matched_term, "hl7 fhir");
    assert!(!aggregate.hits[2].is_original_term);

    assert_eq!(aggregate.columns.len(), 3);
    assert_eq!(transport.submit_count(), 3);
}

#[tokio::test]
async fn empty_variations_skip_the_column_followup() {
    let transport = FakeSynapse::new(vec![
        Ok(bundle(Vec::new(), STANDARD_COLUMNS)),
        Ok(bundle(Vec::new(), STANDARD_COLUMNS)),
    ]);
    let explorer = explorer_with(transport.clone());

    let terms = vec!["alpha".to_string(), "beta".to_string()];
    let aggregate = explorer.search_variations("alpha", &terms, 10).await;

    assert!(aggregate.hits.is_empty());
    assert!(aggregate.columns.is_empty());
    assert_eq!(
        transport.submit_count(),
        2,
        "no rows means no follow-up metadata query"
    );

    let envelope = VariationsEnvelope::new("alpha", aggregate);
    let value = serde_json::to_value(&envelope).expect("envelope should serialize");
    assert_eq!(value["success"], true);
    assert_eq!(value["total_results"], 0);
    assert!(value["columns"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn a_failing_term_is_skipped_not_fatal() {
    let transport = FakeSynapse::new(vec![
        Err(http_error(500)),
        Ok(bundle(
            vec![standards_row("B2AI_STANDARD:3", "HL7 v2")],
            STANDARD_COLUMNS,
        )),
        Ok(bundle(
            vec![standards_row("B2AI_STANDARD:3", "HL7 v2")],
            STANDARD_COLUMNS,
        )),
    ]);
    let explorer = explorer_with(transport.clone());

    let terms = vec!["alpha".to_string(), "beta".to_string()];
    let aggregate = explorer.search_variations("alpha", &terms, 10).await;

    assert_eq!(aggregate.hits.len(), 1);
    assert_eq!(aggregate.hits[0].matched_term, "beta");
    assert!(!aggregate.hits[0].is_original_term);
}

#[tokio::test]
async fn per_term_limit_is_applied_to_each_query() {
    let transport = FakeSynapse::new(Vec::new());
    let explorer = explorer_with(transport.clone());

    let terms = vec!["alpha".to_string(), "beta".to_string()];
    let _ = explorer.search_variations("alpha", &terms, 7).await;

    for statement in transport.submitted() {
        assert!(statement.contains("LIMIT 7 OFFSET 0"));
    }
}

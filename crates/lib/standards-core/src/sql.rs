//! SQL assembly for table searches.
//!
//! Synapse accepts a SQL dialect over table entities and the statements are
//! built textually. Every user-supplied substring passes through
//! [`escape_term`] before interpolation so the injection surface stays
//! auditable in one place.

/// Doubles single quotes so a term can sit inside a quoted SQL literal.
#[must_use]
pub fn escape_term(raw: &str) -> String {
    raw.replace('\'', "''")
}

/// Builds the search statement: a disjunction of `LIKE '%text%'` predicates
/// over `columns`, optionally ORed with a topic-column predicate, bounded by
/// `LIMIT`/`OFFSET`.
#[must_use]
pub fn build_search_sql(
    table_id: &str,
    columns: &[String],
    text: &str,
    limit: usize,
    offset: usize,
    topic_column: &str,
    topic_id: Option<&str>,
) -> String {
    let term = escape_term(text);
    let mut predicates: Vec<String> = columns
        .iter()
        .map(|column| format!("{column} LIKE '%{term}%'"))
        .collect();
    if let Some(topic_id) = topic_id {
        let topic = escape_term(topic_id);
        predicates.push(format!("{topic_column} LIKE '%{topic}%'"));
    }
    format!(
        "SELECT * FROM {table_id} WHERE ({}) LIMIT {limit} OFFSET {offset}",
        predicates.join(" OR ")
    )
}

/// Builds the full-table load for the topics lookup table.
#[must_use]
pub fn build_topics_sql(topics_table_id: &str) -> String {
    format!("SELECT id, name, description FROM {topics_table_id}")
}

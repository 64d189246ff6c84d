use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub label: &'static str,
}

/// Frequently searched procedures, used for code suggestions.
pub const COMMON_PROCEDURES: &[CatalogEntry] = &[
    CatalogEntry { code: "70551", label: "MRI brain without contrast" },
    CatalogEntry { code: "74177", label: "CT abdomen/pelvis with contrast" },
    CatalogEntry { code: "45378", label: "Colonoscopy (diagnostic)" },
    CatalogEntry { code: "66984", label: "Cataract surgery w/ IOL" },
    CatalogEntry { code: "77067", label: "Screening mammography, bilateral" },
    CatalogEntry { code: "97110", label: "Therapeutic exercises" },
    CatalogEntry { code: "36415", label: "Collection of venous blood" },
    CatalogEntry { code: "99213", label: "Office/outpatient visit, established" },
];

pub fn search_catalog<'a>(
    catalog: &'a [CatalogEntry],
    query: &str,
    limit: usize,
) -> Vec<&'a CatalogEntry> {
    let q = query.trim().to_lowercase();
    catalog
        .iter()
        .filter(|e| q.is_empty() || e.code.contains(&q) || e.label.to_lowercase().contains(&q))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searches_by_code_or_label() {
        let hits = search_catalog(COMMON_PROCEDURES, "mri", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "70551");

        let hits = search_catalog(COMMON_PROCEDURES, "77", 10);
        let codes: Vec<&str> = hits.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec!["74177", "77067"]);
    }

    #[test]
    fn blank_query_lists_up_to_limit() {
        assert_eq!(search_catalog(COMMON_PROCEDURES, "", 3).len(), 3);
        assert_eq!(search_catalog(COMMON_PROCEDURES, "  ", 100).len(), 8);
    }
}

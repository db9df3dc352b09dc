use crate::model::{MenuRecord, Section, CATEGORIES};

/// Group flat records into display sections, one per known category, in the
/// fixed category order. Intra-category order follows the input; categories
/// with no records are omitted rather than rendered empty. Pure and total.
pub fn to_sections(records: &[MenuRecord]) -> Vec<Section> {
    CATEGORIES
        .iter()
        .filter_map(|&category| {
            let data: Vec<MenuRecord> = records
                .iter()
                .filter(|record| record.category == category)
                .cloned()
                .collect();
            if data.is_empty() {
                None
            } else {
                Some(Section {
                    name: category.to_string(),
                    data,
                })
            }
        })
        .collect()
}

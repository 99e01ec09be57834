//! Symptom category classification.
//!
//! Symptom codes reported by patients are free strings; clinically they fall
//! into five fixed groupings used for both cascade branching and score
//! weighting. Membership is a single static enum-keyed table so the five
//! groups cannot drift apart. A code may belong to zero, one or several
//! categories; unknown codes match nothing.

use alma_types::SymptomSet;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// The reported code that confirms absent fetal movements, as opposed to the
/// boolean observation field that merely reports them not being perceived.
pub const CONFIRMED_FETAL_INACTIVITY: &str = "ausencia_movimiento_fetal_confirmada";

/// The five fixed symptom groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymptomCategory {
    Emergency,
    Hemorrhage,
    Sepsis,
    Labor,
    Preeclampsia,
}

impl SymptomCategory {
    pub const ALL: [SymptomCategory; 5] = [
        SymptomCategory::Emergency,
        SymptomCategory::Hemorrhage,
        SymptomCategory::Sepsis,
        SymptomCategory::Labor,
        SymptomCategory::Preeclampsia,
    ];
}

/// Category membership, one row per category.
const CATEGORY_TABLE: &[(SymptomCategory, &[&str])] = &[
    (
        SymptomCategory::Emergency,
        &[
            CONFIRMED_FETAL_INACTIVITY,
            "convulsiones",
            "perdida_de_conciencia",
            "dificultad_respiratoria_severa",
            "dolor_toracico",
            "sangrado_masivo",
        ],
    ),
    (
        SymptomCategory::Hemorrhage,
        &[
            "sangrado_vaginal_abundante",
            "sangrado_vaginal_con_coagulos",
            "hemorragia_vaginal",
            "perdida_sangre_abundante",
            "sangrado_postparto",
        ],
    ),
    (
        SymptomCategory::Sepsis,
        &[
            "escalofrios",
            "malestar_general_severo",
            "confusion_mental",
            "dolor_abdominal_severo",
            "flujo_vaginal_fetido",
            "dolor_pelvico_intenso",
        ],
    ),
    (
        SymptomCategory::Labor,
        &[
            "contracciones_regulares",
            "dolor_abdominal_ritmico",
            "presion_pelvica",
            "ruptura_membranas",
            "perdida_liquido_amniotico",
            "dolor_lumbar_intenso",
        ],
    ),
    (
        SymptomCategory::Preeclampsia,
        &[
            "dolor_cabeza_severo",
            "vision_borrosa",
            "dolor_epigastrico",
            "nauseas_vomitos_severos",
            "edema_facial",
            "edema_manos",
        ],
    ),
];

static CATEGORY_SETS: Lazy<HashMap<SymptomCategory, HashSet<&'static str>>> =
    Lazy::new(|| {
        CATEGORY_TABLE
            .iter()
            .map(|(category, codes)| (*category, codes.iter().copied().collect()))
            .collect()
    });

/// The membership set for one category.
pub fn codes_for(category: SymptomCategory) -> &'static HashSet<&'static str> {
    // Every category has a table row; a miss here is a programmer error.
    debug_assert!(CATEGORY_SETS.len() == SymptomCategory::ALL.len());
    &CATEGORY_SETS[&category]
}

/// Whether at least one reported code belongs to `category`.
pub fn is_category_present(symptoms: &SymptomSet, category: SymptomCategory) -> bool {
    let members = codes_for(category);
    symptoms.codes().iter().any(|code| members.contains(code.as_str()))
}

/// How many reported codes belong to `category`, counting occurrences.
pub fn category_count(symptoms: &SymptomSet, category: SymptomCategory) -> usize {
    let members = codes_for(category);
    symptoms
        .codes()
        .iter()
        .filter(|code| members.contains(code.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_match_their_category() {
        let set = SymptomSet::new(["convulsiones"]);
        assert!(is_category_present(&set, SymptomCategory::Emergency));
        assert!(!is_category_present(&set, SymptomCategory::Sepsis));

        let set = SymptomSet::new(["dolor_cabeza_severo"]);
        assert!(is_category_present(&set, SymptomCategory::Preeclampsia));
    }

    #[test]
    fn test_unknown_codes_match_no_category() {
        let set = SymptomSet::new(["cansancio_leve", "antojo_dulce"]);
        for category in SymptomCategory::ALL {
            assert!(!is_category_present(&set, category));
            assert_eq!(category_count(&set, category), 0);
        }
    }

    #[test]
    fn test_category_count_counts_occurrences() {
        let set = SymptomSet::new(["escalofrios", "escalofrios", "confusion_mental"]);
        assert_eq!(category_count(&set, SymptomCategory::Sepsis), 3);
    }

    #[test]
    fn test_classification_is_order_independent() {
        let forward = SymptomSet::new(["vision_borrosa", "contracciones_regulares"]);
        let reversed = SymptomSet::new(["contracciones_regulares", "vision_borrosa"]);
        for category in SymptomCategory::ALL {
            assert_eq!(
                is_category_present(&forward, category),
                is_category_present(&reversed, category)
            );
            assert_eq!(
                category_count(&forward, category),
                category_count(&reversed, category)
            );
        }
    }

    #[test]
    fn test_confirmed_inactivity_code_is_an_emergency_member() {
        let set = SymptomSet::new([CONFIRMED_FETAL_INACTIVITY]);
        assert!(is_category_present(&set, SymptomCategory::Emergency));
    }

    #[test]
    fn test_every_category_has_members() {
        for category in SymptomCategory::ALL {
            assert!(!codes_for(category).is_empty());
        }
    }
}

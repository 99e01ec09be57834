//! Reported symptom sets.

use serde::{Deserialize, Serialize};

/// An unordered collection of symptom codes reported at evaluation time.
///
/// Codes are normalised on construction: surrounding whitespace is trimmed,
/// ASCII letters are lowercased and empty entries are dropped. Duplicates are
/// kept — scoring counts occurrences, not just presence. Unknown codes are
/// valid; they simply match no category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymptomSet(Vec<String>);

impl SymptomSet {
    /// Builds a symptom set from raw reported codes, normalising each entry.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .filter_map(|code| {
                let trimmed = code.as_ref().trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_ascii_lowercase())
                }
            })
            .collect();
        Self(codes)
    }

    /// The normalised codes, in reported order.
    pub fn codes(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'de> Deserialize<'de> for SymptomSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let codes = Vec::<String>::deserialize(deserializer)?;
        Ok(SymptomSet::new(codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalises_codes() {
        let set = SymptomSet::new(["  Convulsiones ", "vision_borrosa", ""]);
        assert_eq!(set.codes(), ["convulsiones", "vision_borrosa"]);
        assert!(set.contains("convulsiones"));
        assert!(!set.contains("escalofrios"));
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let set = SymptomSet::new(["escalofrios", "escalofrios"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_deserialize_routes_through_normalisation() {
        let set: SymptomSet = serde_json::from_str(r#"[" Dolor_Cabeza_Severo "]"#)
            .expect("symptom list should deserialize");
        assert_eq!(set.codes(), ["dolor_cabeza_severo"]);
    }

    #[test]
    fn test_empty_set() {
        let set = SymptomSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}

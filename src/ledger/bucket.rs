use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Fixed spending buckets used by the bucket-based schema versions.
///
/// Declaration order matters: it is the display order of monthly bucket totals
/// and the tie-break order when bucket totals are equal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Bucket {
    Housing,
    Transportation,
    Bills,
    Food,
    Lifestyle,
    #[serde(rename = "Health & Finance")]
    HealthAndFinance,
    #[default]
    Other,
}

impl Bucket {
    pub const ALL: [Bucket; 7] = [
        Bucket::Housing,
        Bucket::Transportation,
        Bucket::Bills,
        Bucket::Food,
        Bucket::Lifestyle,
        Bucket::HealthAndFinance,
        Bucket::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Housing => "Housing",
            Bucket::Transportation => "Transportation",
            Bucket::Bills => "Bills",
            Bucket::Food => "Food",
            Bucket::Lifestyle => "Lifestyle",
            Bucket::HealthAndFinance => "Health & Finance",
            Bucket::Other => "Other",
        }
    }

    /// Case-insensitive exact match against the bucket names.
    pub fn from_label(label: &str) -> Option<Bucket> {
        let needle = label.trim();
        Bucket::ALL
            .into_iter()
            .find(|bucket| bucket.as_str().eq_ignore_ascii_case(needle))
    }

    /// Resolves a stored label, falling back to [`Bucket::Other`].
    pub fn from_label_or_other(label: &str) -> Bucket {
        Bucket::from_label(label).unwrap_or(Bucket::Other)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Bucket::from_label(value).ok_or_else(|| {
            let names: Vec<&str> = Bucket::ALL.iter().map(Bucket::as_str).collect();
            format!("unknown bucket `{}` (expected one of: {})", value, names.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_case_insensitively() {
        assert_eq!(Bucket::from_label("food"), Some(Bucket::Food));
        assert_eq!(
            Bucket::from_label("  health & finance "),
            Some(Bucket::HealthAndFinance)
        );
        assert_eq!(Bucket::from_label("Groceries"), None);
        assert_eq!(Bucket::from_label_or_other("Groceries"), Bucket::Other);
    }

    #[test]
    fn serializes_display_names() {
        let json = serde_json::to_string(&Bucket::HealthAndFinance).unwrap();
        assert_eq!(json, "\"Health & Finance\"");
    }

    #[test]
    fn from_str_lists_known_buckets_on_failure() {
        let err = "Snacks".parse::<Bucket>().unwrap_err();
        assert!(err.contains("Housing"));
    }
}

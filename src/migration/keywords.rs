use crate::ledger::Bucket;

/// Old free-text category keywords per bucket, evaluated top to bottom.
///
/// The order is part of the backup format: reordering changes migration output.
pub const CATEGORY_KEYWORDS: &[(Bucket, &[&str])] = &[
    (
        Bucket::Housing,
        &[
            "rent",
            "mortgage",
            "hoa",
            "home insurance",
            "property tax",
            "maintenance/repairs",
        ],
    ),
    (
        Bucket::Transportation,
        &[
            "car",
            "auto insurance",
            "gas",
            "parking",
            "toll",
            "transit",
            "rideshare",
        ],
    ),
    (
        Bucket::Bills,
        &["electric", "water", "utility", "trash", "phone", "internet"],
    ),
    (
        Bucket::Food,
        &["grocery", "dining", "coffee", "snack", "food"],
    ),
    (
        Bucket::Lifestyle,
        &[
            "subscription",
            "movie",
            "entertainment",
            "shopping",
            "gym",
            "beauty",
            "hobbies",
        ],
    ),
    (
        Bucket::HealthAndFinance,
        &["health", "medical", "debt", "investment", "savings", "insurance"],
    ),
];

/// Maps an old category to a bucket: case-insensitive substring match,
/// first matching bucket wins, no match yields [`Bucket::Other`].
pub fn guess_bucket(category: &str) -> Bucket {
    let needle = category.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| needle.contains(keyword)))
        .map(|(bucket, _)| *bucket)
        .unwrap_or(Bucket::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_buckets() {
        assert_eq!(guess_bucket("Gym"), Bucket::Lifestyle);
        assert_eq!(guess_bucket("Car Payment"), Bucket::Transportation);
        assert_eq!(guess_bucket("Grocery store"), Bucket::Food);
        assert_eq!(guess_bucket("Medical"), Bucket::HealthAndFinance);
        assert_eq!(guess_bucket("Property Tax"), Bucket::Housing);
    }

    #[test]
    fn unknown_categories_fall_back_to_other() {
        assert_eq!(guess_bucket("Pet supplies"), Bucket::Other);
        assert_eq!(guess_bucket(""), Bucket::Other);
    }

    #[test]
    fn first_matching_bucket_wins() {
        // "home insurance" is listed under Housing before the generic "insurance".
        assert_eq!(guess_bucket("Home Insurance"), Bucket::Housing);
        assert_eq!(guess_bucket("Auto Insurance"), Bucket::Transportation);
        // Substring matching: "Scarf" contains "car".
        assert_eq!(guess_bucket("Scarf"), Bucket::Transportation);
        assert_eq!(guess_bucket("Life insurance"), Bucket::HealthAndFinance);
    }
}

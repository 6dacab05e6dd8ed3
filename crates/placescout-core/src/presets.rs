/// A one-tap search suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickSearch {
    /// Short key for command-line selection.
    pub key: &'static str,
    pub label: &'static str,
    /// Topic text sent as if the user had typed it.
    pub topic: &'static str,
}

pub const QUICK_SEARCHES: &[QuickSearch] = &[
    QuickSearch {
        key: "cafes",
        label: "Cozy cafes",
        topic: "cafes with a nice atmosphere and photogenic interiors near me",
    },
    QuickSearch {
        key: "food",
        label: "Good food",
        topic: "well-known delicious restaurants near me",
    },
    QuickSearch {
        key: "shopping",
        label: "Shopping",
        topic: "shopping malls or markets near me",
    },
    QuickSearch {
        key: "pharmacy",
        label: "Pharmacies",
        topic: "pharmacies near me",
    },
    QuickSearch {
        key: "fuel",
        label: "Fuel stations",
        topic: "petrol stations near me",
    },
];

/// Looks a preset up by key, ignoring case.
#[must_use]
pub fn find_preset(key: &str) -> Option<&'static QuickSearch> {
    let key = key.trim();
    QUICK_SEARCHES
        .iter()
        .find(|preset| preset.key.eq_ignore_ascii_case(key))
}

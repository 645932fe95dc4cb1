//! Cluster Explainer
//!
//! Static descriptions of the four behavioral clusters found at training
//! time. The text is product copy and ships as-is.

use crate::domain::ports::ClusterId;

/// Description returned for a cluster id the model was not trained to emit
pub const FALLBACK_DESCRIPTION: &str = "Informations non disponibles pour ce cluster";

const DESCRIPTIONS: [(i64, &str); 4] = [
    (
        0,
        "Cluster 0: semble avoir un faible pourcentage de temps d'activité, une quantité modérée de données utilisées et de recharges, avec un revenu opérationnel relativement faible.",
    ),
    (
        1,
        "Cluster 1: a un pourcentage de temps d'activité très faible, une quantité élevée de données utilisées et de recharges, avec un revenu opérationnel supérieur aux autres clusters.",
    ),
    (
        2,
        "Cluster 2: montre un faible pourcentage de temps d'activité, mais avec une quantité très élevée de données utilisées et de recharges, et un revenu opérationnel considérablement élevé par rapport aux autres clusters.",
    ),
    (
        3,
        "Cluster 3: a un pourcentage de temps d'activité élevé, une très grande quantité de données utilisées et de recharges, avec un revenu opérationnel relativement élevé.",
    ),
];

/// Description for a cluster id; total over all ids
pub fn describe(cluster: ClusterId) -> &'static str {
    DESCRIPTIONS
        .iter()
        .find(|(id, _)| *id == cluster.value())
        .map(|(_, text)| *text)
        .unwrap_or(FALLBACK_DESCRIPTION)
}

/// Every cluster with a known description, in id order
pub fn known_clusters() -> impl Iterator<Item = (ClusterId, &'static str)> {
    DESCRIPTIONS
        .iter()
        .map(|(id, text)| (ClusterId(*id), *text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_clusters() {
        for id in 0..=3 {
            let text = describe(ClusterId(id));
            assert!(text.starts_with(&format!("Cluster {}:", id)));
        }
        assert_eq!(known_clusters().count(), 4);
    }

    #[test]
    fn test_fallback_for_unknown_ids() {
        for id in [-1, 4, 5, 42, i64::MAX, i64::MIN] {
            assert_eq!(describe(ClusterId(id)), FALLBACK_DESCRIPTION);
        }
    }
}

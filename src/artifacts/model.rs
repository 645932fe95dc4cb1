//! K-Means Model
//!
//! Fitted cluster centres; a row is assigned to its nearest centre by squared
//! Euclidean distance. Ties go to the lowest centre index.

use crate::domain::ports::{ClusterId, ClusterModel};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fitted k-means centres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansModel {
    cluster_centers: Vec<Vec<f64>>,
    /// Label emitted for each centre; defaults to the centre index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<i64>>,
}

impl KMeansModel {
    pub fn new(cluster_centers: Vec<Vec<f64>>) -> Result<Self> {
        let model = Self {
            cluster_centers,
            labels: None,
        };
        model.validate()?;
        Ok(model)
    }

    /// Override the label emitted for each centre
    pub fn with_labels(mut self, labels: Vec<i64>) -> Result<Self> {
        self.labels = Some(labels);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::ArtifactInvalid {
            artifact: "model".into(),
            reason,
        };

        let first = self
            .cluster_centers
            .first()
            .ok_or_else(|| invalid("model has no cluster centres".into()))?;
        if first.is_empty() {
            return Err(invalid("cluster centres have no features".into()));
        }

        for (i, center) in self.cluster_centers.iter().enumerate() {
            if center.len() != first.len() {
                return Err(invalid(format!(
                    "centre {} has {} features, expected {}",
                    i,
                    center.len(),
                    first.len()
                )));
            }
            if center.iter().any(|v| !v.is_finite()) {
                return Err(invalid(format!("centre {} is not finite", i)));
            }
        }

        if let Some(labels) = &self.labels {
            if labels.len() != self.cluster_centers.len() {
                return Err(invalid(format!(
                    "{} labels for {} centres",
                    labels.len(),
                    self.cluster_centers.len()
                )));
            }
        }

        Ok(())
    }

    pub fn cluster_centers(&self) -> &[Vec<f64>] {
        &self.cluster_centers
    }

    /// Label for the centre at `index`
    fn label(&self, index: usize) -> ClusterId {
        match &self.labels {
            Some(labels) => ClusterId(labels[index]),
            None => ClusterId(index as i64),
        }
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl ClusterModel for KMeansModel {
    fn n_features(&self) -> usize {
        self.cluster_centers.first().map(Vec::len).unwrap_or(0)
    }

    fn n_clusters(&self) -> usize {
        self.cluster_centers.len()
    }

    fn predict(&self, features: &[f64]) -> Result<ClusterId> {
        if features.len() != self.n_features() {
            return Err(Error::DimensionMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, center) in self.cluster_centers.iter().enumerate() {
            let distance = squared_distance(features, center);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }

        best.map(|(index, _)| self.label(index))
            .ok_or_else(|| Error::Internal("model has no cluster centres".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn grid_model() -> KMeansModel {
        KMeansModel::new(vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![0.0, 10.0],
            vec![10.0, 10.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_predict_nearest_center() {
        let model = grid_model();

        assert_eq!(model.predict(&[1.0, 1.0]).unwrap(), ClusterId(0));
        assert_eq!(model.predict(&[9.0, -2.0]).unwrap(), ClusterId(1));
        assert_eq!(model.predict(&[-1.0, 8.0]).unwrap(), ClusterId(2));
        assert_eq!(model.predict(&[7.0, 7.0]).unwrap(), ClusterId(3));
        assert_eq!(model.n_clusters(), 4);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let model = grid_model();
        assert_eq!(model.predict(&[5.0, 0.0]).unwrap(), ClusterId(0));
    }

    #[test]
    fn test_custom_labels() {
        let model = grid_model().with_labels(vec![3, 2, 1, 0]).unwrap();
        assert_eq!(model.predict(&[0.5, 0.5]).unwrap(), ClusterId(3));
        assert!(grid_model().with_labels(vec![0, 1]).is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = grid_model();
        assert_matches!(
            model.predict(&[1.0, 2.0, 3.0]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_validation() {
        assert!(KMeansModel::new(vec![]).is_err());
        assert!(KMeansModel::new(vec![vec![]]).is_err());
        assert!(KMeansModel::new(vec![vec![0.0, 1.0], vec![0.0]]).is_err());
        assert!(KMeansModel::new(vec![vec![f64::INFINITY]]).is_err());
    }
}

use std::ops::Deref;

use geo_types::Point;

use super::prioritize::prioritize;
use crate::feature::{FeatureKey, RenderedFeature};

/// Features selected under the cursor, closest first. An empty set means nothing is selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet(Vec<RenderedFeature>);

impl SelectionSet {
    /// Keys of the features that can carry engine state. Features without an id are skipped.
    pub fn keys(&self) -> Vec<FeatureKey> {
        self.0.iter().filter_map(RenderedFeature::key).collect()
    }
}

impl Deref for SelectionSet {
    type Target = [RenderedFeature];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a RenderedFeature;
    type IntoIter = std::slice::Iter<'a, RenderedFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds a selection from the features found under the cursor.
///
/// Candidates are narrowed with [`prioritize`] and then ordered by the geodesic distance to
/// `cursor`.
pub fn rank(candidates: Vec<RenderedFeature>, cursor: &Point<f64>) -> SelectionSet {
    rank_by(candidates, |feature| {
        tileview_types::distance(&feature.geometry, cursor)
    })
}

/// Same as [`rank`], but with a custom distance function.
///
/// Sorting is stable: features at equal distance keep the order in which the engine returned
/// them.
pub fn rank_by(
    candidates: Vec<RenderedFeature>,
    mut distance: impl FnMut(&RenderedFeature) -> f64,
) -> SelectionSet {
    let mut measured: Vec<(f64, RenderedFeature)> = prioritize(candidates)
        .into_iter()
        .map(|feature| (distance(&feature), feature))
        .collect();
    measured.sort_by(|a, b| a.0.total_cmp(&b.0));

    SelectionSet(measured.into_iter().map(|(_, feature)| feature).collect())
}

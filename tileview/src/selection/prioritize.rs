use tileview_types::GeometryFamily;

use crate::feature::RenderedFeature;

/// Narrows the features found under the pointer to a single geometry family.
///
/// Points win over lines and lines win over polygons: the result contains only the features of
/// the highest priority family present in `features`, in their original order. Features of other
/// families are dropped, not appended. Features with geometries outside of the three families are
/// never selected.
pub fn prioritize(features: Vec<RenderedFeature>) -> Vec<RenderedFeature> {
    let Some(family) = features.iter().filter_map(RenderedFeature::family).min() else {
        return vec![];
    };

    features
        .into_iter()
        .filter(|feature| feature.family() == Some(family))
        .collect()
}

#[cfg(test)]
mod tests {
    use geo_types::{line_string, polygon, Geometry, Rect};
    use tileview_types::lonlat;

    use super::*;

    fn point(id: u64) -> RenderedFeature {
        RenderedFeature::new(lonlat!(0.0, 0.0), "tiles", "poi").with_id(id)
    }

    fn line(id: u64) -> RenderedFeature {
        RenderedFeature::new(
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            "tiles",
            "roads",
        )
        .with_id(id)
    }

    fn area(id: u64) -> RenderedFeature {
        RenderedFeature::new(
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
            "tiles",
            "landuse",
        )
        .with_id(id)
    }

    fn ids(features: &[RenderedFeature]) -> Vec<u64> {
        features.iter().filter_map(|f| f.id).collect()
    }

    #[test]
    fn empty_input() {
        assert!(prioritize(vec![]).is_empty());
    }

    #[test]
    fn points_win_and_keep_order() {
        let selected = prioritize(vec![area(1), point(2), line(3), point(4), area(5)]);
        assert_eq!(ids(&selected), vec![2, 4]);
    }

    #[test]
    fn lines_win_over_polygons() {
        let selected = prioritize(vec![area(1), line(2), area(3), line(4)]);
        assert_eq!(ids(&selected), vec![2, 4]);
    }

    #[test]
    fn polygons_when_nothing_else() {
        let selected = prioritize(vec![area(1), area(2)]);
        assert_eq!(ids(&selected), vec![1, 2]);
    }

    #[test]
    fn unsupported_geometries_are_never_selected() {
        let rect = RenderedFeature::new(
            Geometry::Rect(Rect::new((0.0, 0.0), (1.0, 1.0))),
            "tiles",
            "other",
        )
        .with_id(9);

        assert!(prioritize(vec![rect.clone()]).is_empty());
        assert_eq!(ids(&prioritize(vec![rect, area(1)])), vec![1]);
    }
}

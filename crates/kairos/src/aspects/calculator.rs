use std::collections::BTreeMap;

use crate::aspects::types::{Aspect, AspectSet, AspectSetKind, AspectStrength, AspectType, OrbTable};
use crate::ephemeris::types::{Body, LayerPositions};

/// Angular separation folded into [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs() % 360.0;
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Every aspect type whose orb window contains the separation between two
/// longitudes, with the orb for each. Overlapping windows (only possible
/// with widened orbs) yield one entry per matching type.
pub fn matching_aspects(lon1: f64, lon2: f64, orbs: &OrbTable) -> Vec<(AspectType, f64)> {
    let separation = angular_separation(lon1, lon2);
    AspectType::ALL
        .iter()
        .filter_map(|&aspect_type| {
            let orb = (separation - aspect_type.angle()).abs();
            (orb <= orbs.orb_for(aspect_type)).then_some((aspect_type, orb))
        })
        .collect()
}

/// Aspects between every unordered pair of distinct bodies.
pub fn find_aspects(longitudes: &BTreeMap<Body, f64>, orbs: &OrbTable) -> Vec<Aspect> {
    AspectCalculator::new(*orbs).compute_aspects(longitudes)
}

/// Aspect calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator {
    pub orbs: OrbTable,
}

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new(orbs: OrbTable) -> Self {
        Self { orbs }
    }

    /// Aspects within one set of longitudes, pairs in chart order.
    pub fn compute_aspects(&self, longitudes: &BTreeMap<Body, f64>) -> Vec<Aspect> {
        let entries: Vec<(Body, f64)> = longitudes.iter().map(|(b, l)| (*b, *l)).collect();

        let mut pairs = Vec::new();
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let (body_a, lon_a) = entries[i];
                let (body_b, lon_b) = entries[j];
                self.push_aspects(&mut pairs, body_a, lon_a, body_b, lon_b);
            }
        }
        pairs
    }

    /// Aspects from each body of `from` to each other body of `to`.
    /// A body is never paired with itself.
    pub fn compute_cross_aspects(
        &self,
        from: &BTreeMap<Body, f64>,
        to: &BTreeMap<Body, f64>,
    ) -> Vec<Aspect> {
        let mut pairs = Vec::new();
        for (&body_a, &lon_a) in from {
            for (&body_b, &lon_b) in to {
                if body_a == body_b {
                    continue;
                }
                self.push_aspects(&mut pairs, body_a, lon_a, body_b, lon_b);
            }
        }
        pairs
    }

    /// Compute aspects within a single layer
    pub fn compute_intra_layer_aspects(&self, layer_id: &str, positions: &LayerPositions) -> AspectSet {
        AspectSet {
            id: layer_id.to_string(),
            label: format!("{} Aspects", capitalize_first(layer_id)),
            kind: AspectSetKind::IntraLayer,
            layer_ids: vec![layer_id.to_string()],
            pairs: self.compute_aspects(&positions.longitudes()),
        }
    }

    /// Compute aspects between two layers
    pub fn compute_inter_layer_aspects(
        &self,
        layer_id_a: &str,
        layer_id_b: &str,
        positions_a: &LayerPositions,
        positions_b: &LayerPositions,
    ) -> AspectSet {
        AspectSet {
            id: format!("{}:{}", layer_id_a, layer_id_b),
            label: format!(
                "{} / {} Aspects",
                capitalize_first(layer_id_a),
                capitalize_first(layer_id_b)
            ),
            kind: AspectSetKind::InterLayer,
            layer_ids: vec![layer_id_a.to_string(), layer_id_b.to_string()],
            pairs: self.compute_cross_aspects(&positions_a.longitudes(), &positions_b.longitudes()),
        }
    }

    fn push_aspects(&self, out: &mut Vec<Aspect>, body_a: Body, lon_a: f64, body_b: Body, lon_b: f64) {
        for (aspect_type, orb) in matching_aspects(lon_a, lon_b, &self.orbs) {
            out.push(Aspect {
                body_a,
                body_b,
                aspect_type,
                orb_degrees: orb,
                strength: AspectStrength::from_orb(orb),
            });
        }
    }
}

/// Capitalize first letter of a string
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separation_folds() {
        assert_eq!(angular_separation(10.0, 350.0), 20.0);
        assert_eq!(angular_separation(350.0, 10.0), 20.0);
        assert_eq!(angular_separation(100.0, 280.0), 180.0);
        assert_eq!(angular_separation(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_widened_orbs_emit_every_match() {
        // 75° sits inside both the sextile and square windows at 20°
        let matches = matching_aspects(0.0, 75.0, &OrbTable::uniform(20.0));
        let types: Vec<AspectType> = matches.iter().map(|(t, _)| *t).collect();
        assert_eq!(types, vec![AspectType::Sextile, AspectType::Square]);
    }

    #[test]
    fn test_cross_aspects_skip_same_body() {
        let natal = BTreeMap::from([(Body::Sun, 10.0), (Body::Moon, 40.0)]);
        let transit = BTreeMap::from([(Body::Sun, 10.0), (Body::Jupiter, 190.0)]);
        let aspects = AspectCalculator::new(OrbTable::standard()).compute_cross_aspects(&transit, &natal);
        assert!(aspects.iter().all(|a| a.body_a != a.body_b));
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].body_a, Body::Jupiter);
        assert_eq!(aspects[0].aspect_type, AspectType::Opposition);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("natal"), "Natal");
        assert_eq!(capitalize_first(""), "");
    }
}

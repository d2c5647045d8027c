//! Bounding boxes as the generated `VEGLBBox` sees them.
use serde::Serialize;

use crate::model::FieldModel;

/// Field holding the projection zone of the padded bounds.
pub const ZONE_FIELD: &str = "mgaZone";

/// `(kwarg, model field)` corner pairs, in the order the generated constructors pass them.
pub const PADDED_CORNERS: [(&str, &str); 4] = [
    ("maxNorthing", "paddingMaxNorthing"),
    ("maxEasting", "paddingMaxEasting"),
    ("minNorthing", "paddingMinNorthing"),
    ("minEasting", "paddingMinEasting"),
];

pub const SELECTED_CORNERS: [(&str, &str); 4] = [
    ("maxNorthing", "selectionMaxNorthing"),
    ("maxEasting", "selectionMaxEasting"),
    ("minNorthing", "selectionMinNorthing"),
    ("minEasting", "selectionMinEasting"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub srs: String,
    pub max_northing: f64,
    pub min_northing: f64,
    pub max_easting: f64,
    pub min_easting: f64,
}

impl BoundingBox {
    /// Closed-interval containment. The point must already be in `self.srs`.
    pub fn contains(&self, northing: f64, easting: f64) -> bool {
        easting >= self.min_easting
            && easting <= self.max_easting
            && northing >= self.min_northing
            && northing <= self.max_northing
    }

    /// Bounds `getPaddedBounds()` will return, if the model has every field it reads.
    pub fn padded(model: &FieldModel) -> Option<Self> {
        let srs = model.string(ZONE_FIELD)?;
        Self::from_corners(model, srs, &PADDED_CORNERS)
    }

    /// Bounds `getSelectedBounds()` will return, if the model has every corner.
    pub fn selected(model: &FieldModel, srs: &str) -> Option<Self> {
        Self::from_corners(model, srs, &SELECTED_CORNERS)
    }

    fn from_corners(model: &FieldModel, srs: &str, corners: &[(&str, &str); 4]) -> Option<Self> {
        let [max_n, max_e, min_n, min_e] = (*corners).map(|(_, field)| model.number(field));
        Some(Self {
            srs: srs.to_string(),
            max_northing: max_n?,
            min_northing: min_n?,
            max_easting: max_e?,
            min_easting: min_e?,
        })
    }
}

use smallvec::SmallVec;

use super::{PredicateKind, Predicates};
use crate::common::{validate_latitude, validate_longitude, BoundingBox, Coordinate};
use crate::errors::{ErrorKind, PoiError, PoiResult};
use crate::index::{Attribute, AttributeValue};
use crate::PoiId;

type StepVec = SmallVec<[PlanStep; 4]>;

/// One predicate, lowered to the index access that evaluates it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlanStep {
    ById(PoiId),
    Attribute {
        kind: PredicateKind,
        attribute: Attribute,
        value: AttributeValue,
    },
    WithinRadius {
        center: Coordinate,
        radius_km: f64,
    },
    WithinBoundingBox(BoundingBox),
}

impl PlanStep {
    pub(crate) fn kind(&self) -> PredicateKind {
        match self {
            PlanStep::ById(_) => PredicateKind::Id,
            PlanStep::Attribute { kind, .. } => *kind,
            PlanStep::WithinRadius { .. } => PredicateKind::Radius,
            PlanStep::WithinBoundingBox(_) => PredicateKind::BoundingBox,
        }
    }

    /// Human readable condition for the query log.
    pub(crate) fn describe(&self) -> String {
        match self {
            PlanStep::ById(id) => format!("id is {}", id),
            PlanStep::Attribute {
                attribute, value, ..
            } => format!("{} is {}", attribute, value),
            PlanStep::WithinRadius { center, radius_km } => {
                format!("within {} km of {}", radius_km, center)
            }
            PlanStep::WithinBoundingBox(bbox) => format!("bounding box {}", bbox),
        }
    }

    /// Message reported when this step yields no candidates.
    pub(crate) fn no_match_message(&self) -> String {
        match self {
            PlanStep::ById(id) => format!("POI ID {} does not exist", id),
            PlanStep::Attribute {
                attribute: attribute @ (Attribute::Latitude | Attribute::Longitude),
                value,
                ..
            } => format!("no POI found at {} {}", attribute, value),
            PlanStep::Attribute {
                attribute, value, ..
            } => format!("no POI found with {} '{}'", attribute, value),
            PlanStep::WithinRadius { center, radius_km } => {
                format!("no POI found within {} km of {}", radius_km, center)
            }
            PlanStep::WithinBoundingBox(bbox) => {
                format!("no POI found in bounding box {}", bbox)
            }
        }
    }

    pub(crate) fn needs_geo_index(&self) -> bool {
        matches!(
            self,
            PlanStep::WithinRadius { .. } | PlanStep::WithinBoundingBox(_)
        )
    }
}

/// A validated query: one step per supplied predicate, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    steps: StepVec,
}

impl QueryPlan {
    pub(crate) fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// The predicates this plan evaluates, in evaluation order.
    pub fn predicate_kinds(&self) -> Vec<PredicateKind> {
        self.steps.iter().map(PlanStep::kind).collect()
    }

    /// True when a radius or bounding-box step needs the geo index.
    pub fn needs_geo_index(&self) -> bool {
        self.steps.iter().any(PlanStep::needs_geo_index)
    }
}

/// Validates predicate sets and orders them for evaluation.
///
/// Evaluation order is fixed: id, amenity, name, latitude/longitude (radius
/// or exact), phone, bounding box. The order decides which predicate is
/// reported when several would come back empty.
pub struct QueryPlanner;

impl QueryPlanner {
    /// Builds the plan for `predicates`.
    ///
    /// # Errors
    ///
    /// * `NoPredicate` if nothing is supplied.
    /// * `InvalidPredicateCombination` if `id` comes with anything else, a
    ///   bounding box comes with latitude or longitude, latitude and
    ///   longitude come without a radius, or a radius comes without both.
    /// * `InvalidCoordinate` / `InvalidDataType` for out-of-domain values.
    pub fn plan(predicates: &Predicates) -> PoiResult<QueryPlan> {
        Self::validate(predicates)?;

        let mut steps = StepVec::new();
        if let Some(id) = predicates.id {
            steps.push(PlanStep::ById(id));
        }
        if let Some(amenity) = &predicates.amenity {
            steps.push(PlanStep::Attribute {
                kind: PredicateKind::Amenity,
                attribute: Attribute::Amenity,
                value: AttributeValue::from(amenity.as_str()),
            });
        }
        if let Some(name) = &predicates.name {
            steps.push(PlanStep::Attribute {
                kind: PredicateKind::Name,
                attribute: Attribute::Name,
                value: AttributeValue::from(name.as_str()),
            });
        }
        match (predicates.latitude, predicates.longitude, predicates.radius_km) {
            (Some(latitude), Some(longitude), Some(radius_km)) => {
                steps.push(PlanStep::WithinRadius {
                    center: Coordinate::new(longitude, latitude),
                    radius_km,
                });
            }
            (Some(latitude), None, None) => steps.push(PlanStep::Attribute {
                kind: PredicateKind::Latitude,
                attribute: Attribute::Latitude,
                value: AttributeValue::from(latitude),
            }),
            (None, Some(longitude), None) => steps.push(PlanStep::Attribute {
                kind: PredicateKind::Longitude,
                attribute: Attribute::Longitude,
                value: AttributeValue::from(longitude),
            }),
            _ => {}
        }
        if let Some(phone) = &predicates.phone {
            steps.push(PlanStep::Attribute {
                kind: PredicateKind::Phone,
                attribute: Attribute::Phone,
                value: AttributeValue::from(phone.as_str()),
            });
        }
        if let Some(bbox) = predicates.bbox {
            steps.push(PlanStep::WithinBoundingBox(bbox));
        }

        log::debug!(
            "Planned query {} as {:?}",
            predicates,
            steps.iter().map(PlanStep::kind).collect::<Vec<_>>()
        );
        Ok(QueryPlan { steps })
    }

    fn validate(predicates: &Predicates) -> PoiResult<()> {
        if predicates.is_empty() {
            log::error!("Query has no predicate");
            return Err(PoiError::new(
                "No query predicate supplied",
                ErrorKind::NoPredicate,
            ));
        }

        let has_coordinate = predicates.latitude.is_some() || predicates.longitude.is_some();

        if predicates.id.is_some() {
            let others = Predicates {
                id: None,
                ..predicates.clone()
            };
            if !others.is_empty() {
                return Err(invalid_combination(
                    "If id is provided, no other predicate may be provided",
                ));
            }
        }

        if predicates.bbox.is_some() && has_coordinate {
            return Err(invalid_combination(
                "If a bounding box is provided, latitude and longitude may not be provided",
            ));
        }

        match (
            predicates.latitude.is_some(),
            predicates.longitude.is_some(),
            predicates.radius_km.is_some(),
        ) {
            (true, true, false) => {
                return Err(invalid_combination(
                    "If latitude and longitude are provided, a radius is required",
                ))
            }
            (true, false, true) => {
                return Err(invalid_combination(
                    "If only latitude is provided, a radius may not be provided",
                ))
            }
            (false, true, true) => {
                return Err(invalid_combination(
                    "If only longitude is provided, a radius may not be provided",
                ))
            }
            (false, false, true) => {
                return Err(invalid_combination(
                    "A radius requires both latitude and longitude",
                ))
            }
            _ => {}
        }

        if let Some(latitude) = predicates.latitude {
            validate_latitude(latitude)?;
        }
        if let Some(longitude) = predicates.longitude {
            validate_longitude(longitude)?;
        }
        if let Some(radius_km) = predicates.radius_km {
            if !radius_km.is_finite() || radius_km < 0.0 {
                log::error!("Invalid radius: {}", radius_km);
                return Err(PoiError::new(
                    &format!("Radius must be a non-negative number of km, got: {}", radius_km),
                    ErrorKind::InvalidDataType,
                ));
            }
        }
        Ok(())
    }
}

fn invalid_combination(message: &str) -> PoiError {
    log::error!("{}", message);
    PoiError::new(message, ErrorKind::InvalidPredicateCombination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox() -> BoundingBox {
        BoundingBox::parse("40.10,-74.10,39.90,-73.90").unwrap()
    }

    fn kind_of(predicates: Predicates) -> ErrorKind {
        QueryPlanner::plan(&predicates).unwrap_err().kind().clone()
    }

    #[test]
    fn test_no_predicate() {
        assert_eq!(kind_of(Predicates::new()), ErrorKind::NoPredicate);
    }

    #[test]
    fn test_id_with_other_predicate_is_invalid() {
        assert_eq!(
            kind_of(Predicates::new().id(1).amenity("cafe")),
            ErrorKind::InvalidPredicateCombination
        );
        assert_eq!(
            kind_of(Predicates::new().id(1).bbox(bbox())),
            ErrorKind::InvalidPredicateCombination
        );
        assert_eq!(
            kind_of(Predicates::new().id(1).radius_km(3.0)),
            ErrorKind::InvalidPredicateCombination
        );
    }

    #[test]
    fn test_bbox_with_coordinates_is_invalid() {
        assert_eq!(
            kind_of(Predicates::new().bbox(bbox()).latitude(40.0)),
            ErrorKind::InvalidPredicateCombination
        );
        assert_eq!(
            kind_of(
                Predicates::new()
                    .bbox(bbox())
                    .latitude(40.0)
                    .longitude(-74.0)
                    .radius_km(1.0)
            ),
            ErrorKind::InvalidPredicateCombination
        );
    }

    #[test]
    fn test_latitude_and_longitude_require_radius() {
        assert_eq!(
            kind_of(Predicates::new().latitude(40.0).longitude(-74.0)),
            ErrorKind::InvalidPredicateCombination
        );
    }

    #[test]
    fn test_single_coordinate_forbids_radius() {
        assert_eq!(
            kind_of(Predicates::new().latitude(40.0).radius_km(5.0)),
            ErrorKind::InvalidPredicateCombination
        );
        assert_eq!(
            kind_of(Predicates::new().longitude(-74.0).radius_km(5.0)),
            ErrorKind::InvalidPredicateCombination
        );
    }

    #[test]
    fn test_radius_alone_is_invalid() {
        assert_eq!(
            kind_of(Predicates::new().amenity("cafe").radius_km(5.0)),
            ErrorKind::InvalidPredicateCombination
        );
    }

    #[test]
    fn test_out_of_domain_values() {
        assert_eq!(
            kind_of(Predicates::new().latitude(120.0)),
            ErrorKind::InvalidCoordinate
        );
        assert_eq!(
            kind_of(Predicates::new().latitude(40.0).longitude(-74.0).radius_km(-1.0)),
            ErrorKind::InvalidDataType
        );
    }

    #[test]
    fn test_evaluation_order_is_fixed() {
        let plan = QueryPlanner::plan(
            &Predicates::new()
                .bbox(bbox())
                .phone("555")
                .name("Corner")
                .amenity("cafe"),
        )
        .unwrap();
        assert_eq!(
            plan.predicate_kinds(),
            vec![
                PredicateKind::Amenity,
                PredicateKind::Name,
                PredicateKind::Phone,
                PredicateKind::BoundingBox
            ]
        );
        assert!(plan.needs_geo_index());
    }

    #[test]
    fn test_coordinate_lowering() {
        let plan = QueryPlanner::plan(
            &Predicates::new()
                .latitude(40.0)
                .longitude(-74.0)
                .radius_km(2.0)
                .amenity("cafe"),
        )
        .unwrap();
        assert_eq!(
            plan.predicate_kinds(),
            vec![PredicateKind::Amenity, PredicateKind::Radius]
        );

        let plan = QueryPlanner::plan(&Predicates::new().latitude(40.0)).unwrap();
        assert_eq!(plan.predicate_kinds(), vec![PredicateKind::Latitude]);
        assert!(!plan.needs_geo_index());

        let plan = QueryPlanner::plan(&Predicates::new().longitude(-74.0)).unwrap();
        assert_eq!(plan.predicate_kinds(), vec![PredicateKind::Longitude]);
    }

    #[test]
    fn test_id_alone_is_valid() {
        let plan = QueryPlanner::plan(&Predicates::new().id(9)).unwrap();
        assert_eq!(plan.predicate_kinds(), vec![PredicateKind::Id]);
    }

    #[test]
    fn test_step_messages() {
        let step = PlanStep::Attribute {
            kind: PredicateKind::Amenity,
            attribute: Attribute::Amenity,
            value: "bakery".into(),
        };
        assert_eq!(step.describe(), "amenity is bakery");
        assert_eq!(step.no_match_message(), "no POI found with amenity 'bakery'");

        let step = PlanStep::Attribute {
            kind: PredicateKind::Latitude,
            attribute: Attribute::Latitude,
            value: 40.5.into(),
        };
        assert_eq!(step.no_match_message(), "no POI found at latitude 40.5");
    }
}

//! TSPLIB/CVRPLIB instance reader.
//!
//! # Format
//!
//! ```text
//! NAME : small
//! CAPACITY : 10
//! VEHICLES : 2
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! 1 0 0
//! 2 3 4
//! DEMAND_SECTION
//! 1 0
//! 2 5
//! DEPOT_SECTION
//! 1
//! -1
//! EOF
//! ```
//!
//! `CAPACITY` and `NODE_COORD_SECTION` are required. Nodes without a demand
//! line get demand 0. The first depot listed is the depot; without a
//! `DEPOT_SECTION` the first node is. `VEHICLES` defaults to one per customer.
//! Unrecognized keys and sections are skipped.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ParseError;
use crate::models::{Location, VrpInput};

/// A parsed instance with its header metadata.
#[derive(Debug, Clone)]
pub struct ParsedInstance {
    /// `NAME`, if given.
    pub name: Option<String>,
    /// `EDGE_WEIGHT_TYPE`, if given. Recorded only; the metric is configured
    /// separately.
    pub edge_weight_type: Option<String>,
    /// The validated problem snapshot.
    pub input: VrpInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Coords,
    Demands,
    Depots,
    Skipped,
}

/// Parses an instance file's contents.
///
/// # Errors
///
/// [`ParseError::InvalidValue`] with the 1-based line number for malformed
/// numbers or short lines, [`ParseError::Missing`] for an absent required
/// entry, [`ParseError::DimensionMismatch`], [`ParseError::UnknownDepot`],
/// [`ParseError::UnknownNode`], or [`ParseError::Input`] when the assembled
/// instance breaks a model invariant.
///
/// # Examples
///
/// ```
/// use u_dvrp::data::parse_instance;
///
/// let text = "CAPACITY : 10\nNODE_COORD_SECTION\n1 0 0\n2 3 4\nDEMAND_SECTION\n2 5\nEOF\n";
/// let parsed = parse_instance(text).unwrap();
/// assert_eq!(parsed.input.depot().id(), 1);
/// assert_eq!(parsed.input.num_customers(), 1);
/// assert_eq!(parsed.input.customers()[0].demand(), 5);
/// ```
pub fn parse_instance(text: &str) -> Result<ParsedInstance, ParseError> {
    let mut name = None;
    let mut edge_weight_type = None;
    let mut dimension: Option<usize> = None;
    let mut capacity: Option<u32> = None;
    let mut vehicles: Option<usize> = None;
    let mut coords: Option<Vec<(usize, f64, f64)>> = None;
    let mut demands: HashMap<usize, u32> = HashMap::new();
    let mut depot: Option<usize> = None;
    let mut section = Section::Header;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }

        // Specification lines (KEY : VALUE)
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();
            section = Section::Header;
            match key.trim().to_uppercase().as_str() {
                "NAME" => name = Some(value.to_string()),
                "EDGE_WEIGHT_TYPE" => edge_weight_type = Some(value.to_string()),
                "DIMENSION" => dimension = Some(number(Some(value), line_no, "DIMENSION")?),
                "CAPACITY" => capacity = Some(number(Some(value), line_no, "CAPACITY")?),
                "VEHICLES" => vehicles = Some(number(Some(value), line_no, "VEHICLES")?),
                _ => {}
            }
            continue;
        }

        if line.ends_with("_SECTION") {
            section = match line {
                "NODE_COORD_SECTION" => {
                    coords.get_or_insert_with(Vec::new);
                    Section::Coords
                }
                "DEMAND_SECTION" => Section::Demands,
                "DEPOT_SECTION" => Section::Depots,
                _ => Section::Skipped,
            };
            continue;
        }

        let mut parts = line.split_whitespace();
        match section {
            Section::Coords => {
                let id = number(parts.next(), line_no, "node id")?;
                let x = coordinate(parts.next(), line_no, "x coordinate")?;
                let y = coordinate(parts.next(), line_no, "y coordinate")?;
                if let Some(nodes) = coords.as_mut() {
                    nodes.push((id, x, y));
                }
            }
            Section::Demands => {
                let id = number(parts.next(), line_no, "node id")?;
                let demand = number(parts.next(), line_no, "demand")?;
                demands.insert(id, demand);
            }
            Section::Depots => {
                for token in parts {
                    let id: i64 = number(Some(token), line_no, "depot id")?;
                    if id < 0 {
                        section = Section::Skipped;
                        break;
                    }
                    if depot.is_none() {
                        depot = Some(id as usize);
                    }
                }
            }
            Section::Skipped => {}
            Section::Header => {
                return Err(ParseError::InvalidValue {
                    line: line_no,
                    field: "specification",
                    value: line.to_string(),
                });
            }
        }
    }

    let capacity = capacity.ok_or(ParseError::Missing("CAPACITY"))?;
    let coords = match coords {
        Some(nodes) if !nodes.is_empty() => nodes,
        _ => return Err(ParseError::Missing("NODE_COORD_SECTION")),
    };
    if let Some(declared) = dimension {
        if declared != coords.len() {
            return Err(ParseError::DimensionMismatch {
                declared,
                found: coords.len(),
            });
        }
    }
    if let Some(&unknown) = demands
        .keys()
        .filter(|&&id| !coords.iter().any(|&(node, _, _)| node == id))
        .min()
    {
        return Err(ParseError::UnknownNode(unknown));
    }

    let depot_id = depot.unwrap_or(coords[0].0);
    let mut depot_location = None;
    let mut customers = Vec::with_capacity(coords.len().saturating_sub(1));
    for &(id, x, y) in &coords {
        if id == depot_id && depot_location.is_none() {
            depot_location = Some(Location::depot(id, x, y));
        } else {
            let demand = demands.get(&id).copied().unwrap_or(0);
            customers.push(Location::new(id, x, y, demand));
        }
    }
    let depot_location = depot_location.ok_or(ParseError::UnknownDepot(depot_id))?;
    let vehicles = vehicles.unwrap_or(customers.len().max(1));

    let input = VrpInput::new(depot_location, customers, vehicles, capacity)?;
    Ok(ParsedInstance {
        name,
        edge_weight_type,
        input,
    })
}

fn number<T: FromStr>(token: Option<&str>, line: usize, field: &'static str) -> Result<T, ParseError> {
    let token = token.unwrap_or_default();
    token.parse().map_err(|_| ParseError::InvalidValue {
        line,
        field,
        value: token.to_string(),
    })
}

/// Like [`number`], but also rejects `nan` and infinities.
fn coordinate(token: Option<&str>, line: usize, field: &'static str) -> Result<f64, ParseError> {
    let value: f64 = number(token, line, field)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::InvalidValue {
            line,
            field,
            value: token.unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    const SMALL: &str = "\
NAME : small
COMMENT : three customers
TYPE : CVRP
DIMENSION : 4
CAPACITY : 10
VEHICLES : 2
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
 1 0 0
 2 3 4
 3 -3 4
 4 0 -5
DEMAND_SECTION
1 0
2 5
3 5
4 7
DEPOT_SECTION
 1
 -1
EOF
";

    fn customers_of(text: &str) -> Result<usize, ParseError> {
        parse_instance(text).map(|p| p.input.num_customers())
    }

    #[test]
    fn test_parse_full_instance() {
        let parsed = parse_instance(SMALL).expect("valid instance");
        assert_eq!(parsed.name.as_deref(), Some("small"));
        assert_eq!(parsed.edge_weight_type.as_deref(), Some("EUC_2D"));
        let input = parsed.input;
        assert_eq!(input.depot().id(), 1);
        assert_eq!(input.num_customers(), 3);
        assert_eq!(input.vehicle_count(), 2);
        assert_eq!(input.capacity(), 10);
        assert_eq!(input.customers()[2].demand(), 7);
        assert_eq!(input.customers()[1].x(), -3.0);
    }

    #[test]
    fn test_defaults() {
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\n2 1 0\n3 2 0\n";
        let input = parse_instance(text).expect("valid").input;
        assert_eq!(input.depot().id(), 1);
        assert_eq!(input.vehicle_count(), 2);
        assert!(input.customers().iter().all(|c| c.demand() == 0));
    }

    #[test]
    fn test_depot_not_first() {
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\n2 1 0\n3 2 0\nDEPOT_SECTION\n2\n-1\n";
        let input = parse_instance(text).expect("valid").input;
        assert_eq!(input.depot().id(), 2);
        let ids: Vec<usize> = input.customers().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_depot_only_instance() {
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 4 4\n";
        let input = parse_instance(text).expect("valid").input;
        assert_eq!(input.num_customers(), 0);
        assert_eq!(input.vehicle_count(), 1);
    }

    #[test]
    fn test_missing_capacity() {
        assert_eq!(
            customers_of("NODE_COORD_SECTION\n1 0 0\n"),
            Err(ParseError::Missing("CAPACITY"))
        );
    }

    #[test]
    fn test_missing_coords() {
        assert_eq!(
            customers_of("CAPACITY : 5\n"),
            Err(ParseError::Missing("NODE_COORD_SECTION"))
        );
        assert_eq!(
            customers_of("CAPACITY : 5\nNODE_COORD_SECTION\n"),
            Err(ParseError::Missing("NODE_COORD_SECTION"))
        );
        assert!(parse_instance("").is_err());
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\n2 abc 0\n";
        assert_eq!(
            customers_of(text),
            Err(ParseError::InvalidValue {
                line: 4,
                field: "x coordinate",
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_non_finite_coordinates() {
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\n2 nan 0\n";
        assert_eq!(
            customers_of(text),
            Err(ParseError::InvalidValue {
                line: 4,
                field: "x coordinate",
                value: "nan".to_string()
            })
        );
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\n2 1 -inf\n";
        assert_eq!(
            customers_of(text),
            Err(ParseError::InvalidValue {
                line: 4,
                field: "y coordinate",
                value: "-inf".to_string()
            })
        );
    }

    #[test]
    fn test_short_line() {
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0\n";
        assert!(matches!(
            customers_of(text),
            Err(ParseError::InvalidValue {
                line: 3,
                field: "y coordinate",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_capacity() {
        let text = "CAPACITY : -4\nNODE_COORD_SECTION\n1 0 0\n";
        assert!(matches!(
            customers_of(text),
            Err(ParseError::InvalidValue { line: 1, field: "CAPACITY", .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let text = "DIMENSION : 3\nCAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\n2 1 1\n";
        assert_eq!(
            customers_of(text),
            Err(ParseError::DimensionMismatch {
                declared: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_unknown_depot_and_node() {
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\nDEPOT_SECTION\n9\n-1\n";
        assert_eq!(customers_of(text), Err(ParseError::UnknownDepot(9)));

        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\nDEMAND_SECTION\n4 2\n";
        assert_eq!(customers_of(text), Err(ParseError::UnknownNode(4)));
    }

    #[test]
    fn test_model_invariants_surface() {
        let text = "CAPACITY : 0\nNODE_COORD_SECTION\n1 0 0\n";
        assert_eq!(
            customers_of(text),
            Err(ParseError::Input(InputError::ZeroCapacity))
        );

        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\n2 1 1\n2 2 2\n";
        assert_eq!(
            customers_of(text),
            Err(ParseError::Input(InputError::DuplicateLocationId(2)))
        );
    }

    #[test]
    fn test_stray_header_line() {
        let text = "CAPACITY : 5\nhello\nNODE_COORD_SECTION\n1 0 0\n";
        assert!(matches!(
            customers_of(text),
            Err(ParseError::InvalidValue {
                line: 2,
                field: "specification",
                ..
            })
        ));
    }

    #[test]
    fn test_skips_unknown_sections() {
        let text = "CAPACITY : 5\nNODE_COORD_SECTION\n1 0 0\n2 1 0\nDISPLAY_DATA_SECTION\n1 9 9\n";
        assert_eq!(customers_of(text), Ok(1));
    }
}

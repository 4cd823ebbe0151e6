//! Field classification table
//!
//! Every declared form field appears here exactly once, with the group it is
//! entered under and the report section that prints it. The title page, both
//! tables and the summary page all route through [`Placement`], so a field can
//! never be printed twice or silently dropped.

/// Form group a field is entered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    General,
    Cable,
}

impl FieldGroup {
    /// Heading used by the entry forms
    pub fn heading(&self) -> &'static str {
        match self {
            FieldGroup::General => "General Data:",
            FieldGroup::Cable => "Cable Data:",
        }
    }
}

/// Report section that prints a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Centered lines under the report title
    TitlePage,
    /// "General Information" table
    GeneralTable,
    /// "Cable Information" table
    CableTable,
    /// Narrative summary page
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub group: FieldGroup,
    pub placement: Placement,
}

pub const STATION_NAME: &str = "Station Name";
pub const STATION_NUMBER: &str = "Station Number";
pub const DATE_INSPECTED: &str = "Date Inspected";

const fn general(name: &'static str, placement: Placement) -> FieldDefinition {
    FieldDefinition { name, group: FieldGroup::General, placement }
}

const fn cable(name: &'static str) -> FieldDefinition {
    FieldDefinition { name, group: FieldGroup::Cable, placement: Placement::CableTable }
}

/// All declared fields in entry order
pub const FIELDS: &[FieldDefinition] = &[
    general(STATION_NAME, Placement::TitlePage),
    general(STATION_NUMBER, Placement::TitlePage),
    general("Inspector Name", Placement::Summary),
    general("Reviewer Name", Placement::Summary),
    general(DATE_INSPECTED, Placement::TitlePage),
    general("Weather Conditions", Placement::GeneralTable),
    general("Temperature (°C)", Placement::GeneralTable),
    general("Span (m)", Placement::GeneralTable),
    general("Sag (m)", Placement::GeneralTable),
    general("Design Load (kg)", Placement::GeneralTable),
    general("Recommendations", Placement::GeneralTable),
    cable("Diameter (in)"),
    cable("Angle from Vertical (deg)"),
    cable("Cable Type"),
    cable("Core Type"),
    cable("Broken Wires"),
    cable("Pinched Wires"),
    cable("Broken Strands"),
    cable("Frays"),
    cable("Rust"),
    cable("Distortion"),
    cable("Chainage Marks"),
    cable("Comments"),
];

/// Look up a declared field by name
pub fn find(name: &str) -> Option<&'static FieldDefinition> {
    FIELDS.iter().find(|field| field.name == name)
}

pub fn is_declared(name: &str) -> bool {
    find(name).is_some()
}

/// Fields of one group, in entry order
pub fn in_group(group: FieldGroup) -> impl Iterator<Item = &'static FieldDefinition> {
    FIELDS.iter().filter(move |field| field.group == group)
}

/// Fields printed by one section, in entry order
pub fn placed_in(placement: Placement) -> impl Iterator<Item = &'static FieldDefinition> {
    FIELDS.iter().filter(move |field| field.placement == placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_declared_counts() {
        assert_eq!(FIELDS.len(), 23);
        assert_eq!(in_group(FieldGroup::General).count(), 11);
        assert_eq!(in_group(FieldGroup::Cable).count(), 12);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), FIELDS.len());
    }

    #[test]
    fn test_general_table_fields() {
        let names: Vec<_> = placed_in(Placement::GeneralTable).map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "Weather Conditions",
                "Temperature (°C)",
                "Span (m)",
                "Sag (m)",
                "Design Load (kg)",
                "Recommendations",
            ]
        );
    }

    #[test]
    fn test_cable_table_is_cable_group() {
        let table: Vec<_> = placed_in(Placement::CableTable).map(|f| f.name).collect();
        let group: Vec<_> = in_group(FieldGroup::Cable).map(|f| f.name).collect();
        assert_eq!(table, group);
        assert_eq!(table.last(), Some(&"Comments"));
    }

    #[test]
    fn test_summary_fields() {
        let names: Vec<_> = placed_in(Placement::Summary).map(|f| f.name).collect();
        assert_eq!(names, vec!["Inspector Name", "Reviewer Name"]);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("Rust").map(|f| f.group), Some(FieldGroup::Cable));
        assert_eq!(find(STATION_NAME).map(|f| f.placement), Some(Placement::TitlePage));
        assert!(find("Colour").is_none());
        assert!(!is_declared(""));
    }
}

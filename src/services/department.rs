use super::frontend_code::CodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The business domains a quality-control entry can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Department {
    Production,
    Overhaul,
    Rekayasa,
    Kalibrasi,
}

/// Table and identifying column probed when resolving a frontend code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackingTable {
    pub table: &'static str,
    pub primary_key: &'static str,
}

struct DepartmentEntry {
    department: Department,
    prefix: &'static str,
    name: &'static str,
    backing_table: BackingTable,
}

// Kalibrasi codes resolve against inventory items; calibration rows are not link targets.
const DEPARTMENTS: [DepartmentEntry; 4] = [
    DepartmentEntry {
        department: Department::Production,
        prefix: "PRD",
        name: "Production",
        backing_table: BackingTable {
            table: "produksi",
            primary_key: "produksi_id",
        },
    },
    DepartmentEntry {
        department: Department::Overhaul,
        prefix: "OVH",
        name: "Overhaul",
        backing_table: BackingTable {
            table: "overhaul",
            primary_key: "overhaul_id",
        },
    },
    DepartmentEntry {
        department: Department::Rekayasa,
        prefix: "RKY",
        name: "Rekayasa",
        backing_table: BackingTable {
            table: "rekayasa",
            primary_key: "rekayasa_id",
        },
    },
    DepartmentEntry {
        department: Department::Kalibrasi,
        prefix: "KAL",
        name: "Kalibrasi",
        backing_table: BackingTable {
            table: "inventory",
            primary_key: "inventory_id",
        },
    },
];

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Production,
        Department::Overhaul,
        Department::Rekayasa,
        Department::Kalibrasi,
    ];

    fn entry(self) -> &'static DepartmentEntry {
        // DEPARTMENTS is ordered like the enum
        &DEPARTMENTS[self as usize]
    }

    pub fn prefix(self) -> &'static str {
        self.entry().prefix
    }

    /// Name stored in `quality_control.department`
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn backing_table(self) -> BackingTable {
        self.entry().backing_table
    }

    /// Case-insensitive prefix lookup; anything outside the closed set is an error.
    pub fn from_prefix(prefix: &str) -> Result<Self, CodeError> {
        DEPARTMENTS
            .iter()
            .find(|entry| entry.prefix.eq_ignore_ascii_case(prefix))
            .map(|entry| entry.department)
            .ok_or_else(|| CodeError::UnknownDepartment(prefix.to_string()))
    }

    /// Exact match on the department name as submitted by the UI
    pub fn from_name(name: &str) -> Option<Self> {
        DEPARTMENTS
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.department)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{EntityName, IdenStatic};
    use std::collections::HashSet;

    #[test]
    fn test_table_is_indexed_like_the_enum() {
        for department in Department::ALL {
            assert_eq!(department.entry().department, department);
        }
    }

    #[test]
    fn test_prefix_mapping_is_a_bijection() {
        let prefixes: HashSet<_> = Department::ALL.iter().map(|d| d.prefix()).collect();
        let tables: HashSet<_> = Department::ALL
            .iter()
            .map(|d| d.backing_table().table)
            .collect();
        assert_eq!(prefixes.len(), 4);
        assert_eq!(tables.len(), 4);

        for department in Department::ALL {
            assert_eq!(Department::from_prefix(department.prefix()), Ok(department));
        }
    }

    #[test]
    fn test_prefix_lookup_ignores_case() {
        assert_eq!(Department::from_prefix("prd"), Ok(Department::Production));
        assert_eq!(Department::from_prefix("Ovh"), Ok(Department::Overhaul));
        assert_eq!(
            Department::from_prefix("XYZ"),
            Err(CodeError::UnknownDepartment("XYZ".to_string()))
        );
        assert!(Department::from_prefix("").is_err());
    }

    #[test]
    fn test_name_lookup_is_exact() {
        assert_eq!(Department::from_name("Rekayasa"), Some(Department::Rekayasa));
        assert_eq!(Department::from_name("rekayasa"), None);
        assert_eq!(Department::from_name("Engineering"), None);
    }

    #[test]
    fn test_backing_tables_match_entities() {
        let cases = [
            (
                Department::Production,
                crate::production::models::Entity.table_name(),
                crate::production::models::Column::ProduksiId.as_str(),
            ),
            (
                Department::Overhaul,
                crate::overhaul::models::Entity.table_name(),
                crate::overhaul::models::Column::OverhaulId.as_str(),
            ),
            (
                Department::Rekayasa,
                crate::engineering::models::Entity.table_name(),
                crate::engineering::models::Column::RekayasaId.as_str(),
            ),
            (
                Department::Kalibrasi,
                crate::inventory::models::Entity.table_name(),
                crate::inventory::models::Column::InventoryId.as_str(),
            ),
        ];

        for (department, table, primary_key) in cases {
            let backing = department.backing_table();
            assert_eq!(backing.table, table);
            assert_eq!(backing.primary_key, primary_key);
        }
    }
}

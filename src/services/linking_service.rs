//! Turns the frontend code submitted with a quality-control entry into at most
//! one populated department foreign key.

use super::department::Department;
use super::department_resolver::{PrimaryKeyLookup, ResolveError, resolve};
use super::frontend_code::{CodeError, decode};
use sea_orm::DbErr;
use serde::Serialize;
use utoipa::ToSchema;

/// The four nullable department foreign keys of a quality-control entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepartmentLinks {
    pub produksi_id: Option<i32>,
    pub overhaul_id: Option<i32>,
    pub rekayasa_id: Option<i32>,
    /// Kalibrasi codes link to inventory items
    pub inventory_id: Option<i32>,
}

impl DepartmentLinks {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn slot(&mut self, department: Department) -> &mut Option<i32> {
        match department {
            Department::Production => &mut self.produksi_id,
            Department::Overhaul => &mut self.overhaul_id,
            Department::Rekayasa => &mut self.rekayasa_id,
            Department::Kalibrasi => &mut self.inventory_id,
        }
    }

    pub fn set(&mut self, department: Department, primary_key: Option<i32>) {
        *self.slot(department) = primary_key;
    }

    pub fn get(&self, department: Department) -> Option<i32> {
        match department {
            Department::Production => self.produksi_id,
            Department::Overhaul => self.overhaul_id,
            Department::Rekayasa => self.rekayasa_id,
            Department::Kalibrasi => self.inventory_id,
        }
    }

    pub fn linked_count(&self) -> usize {
        Department::ALL
            .iter()
            .filter(|department| self.get(**department).is_some())
            .count()
    }
}

/// What happened to the links of one entry; only storage faults are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// No code was supplied
    Unlinked,
    Linked {
        department: Department,
        primary_key: i32,
    },
    /// Department recognised but no row with that id; its key is explicitly null
    TargetNotFound {
        department: Department,
        numeric_id: u64,
    },
    /// Code could not be decoded or named no known department
    Rejected(CodeError),
}

/// Clears every link, then resolves `code` and sets the one matching key.
///
/// Decode and unknown-prefix failures leave the entry unlinked and are
/// reported through [`LinkOutcome::Rejected`]. Only a failing lookup aborts.
pub async fn apply_frontend_code<L>(
    links: &mut DepartmentLinks,
    code: Option<&str>,
    lookup: &L,
) -> Result<LinkOutcome, DbErr>
where
    L: PrimaryKeyLookup + ?Sized,
{
    links.clear();

    let Some(code) = code.filter(|code| !code.is_empty()) else {
        return Ok(LinkOutcome::Unlinked);
    };

    let decoded = match decode(code) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::warn!(code, "Frontend code not decoded, entry left unlinked: {err}");
            return Ok(LinkOutcome::Rejected(err));
        }
    };

    match resolve(lookup, &decoded.prefix, decoded.numeric_id).await {
        Ok(resolution) => {
            links.set(resolution.department, resolution.primary_key);
            Ok(match resolution.primary_key {
                Some(primary_key) => {
                    tracing::debug!(code, department = %resolution.department, primary_key, "Linked entry");
                    LinkOutcome::Linked {
                        department: resolution.department,
                        primary_key,
                    }
                }
                None => {
                    tracing::warn!(code, department = %resolution.department, "No row matches frontend code");
                    LinkOutcome::TargetNotFound {
                        department: resolution.department,
                        numeric_id: decoded.numeric_id,
                    }
                }
            })
        }
        Err(ResolveError::Code(err)) => {
            tracing::warn!(code, "Frontend code not resolved, entry left unlinked: {err}");
            Ok(LinkOutcome::Rejected(err))
        }
        Err(ResolveError::Storage(err)) => Err(err),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Linked,
    NotFound,
    Rejected,
    Unlinked,
}

/// Client-facing summary of a [`LinkOutcome`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LinkReport {
    pub status: LinkStatus,
    pub department: Option<Department>,
    /// Key of the linked row
    pub primary_key: Option<i32>,
    pub reason: Option<String>,
}

impl From<&LinkOutcome> for LinkReport {
    fn from(outcome: &LinkOutcome) -> Self {
        match outcome {
            LinkOutcome::Unlinked => LinkReport {
                status: LinkStatus::Unlinked,
                department: None,
                primary_key: None,
                reason: None,
            },
            LinkOutcome::Linked {
                department,
                primary_key,
            } => LinkReport {
                status: LinkStatus::Linked,
                department: Some(*department),
                primary_key: Some(*primary_key),
                reason: None,
            },
            LinkOutcome::TargetNotFound {
                department,
                numeric_id,
            } => LinkReport {
                status: LinkStatus::NotFound,
                department: Some(*department),
                primary_key: None,
                reason: Some(format!("no {department} row with id {numeric_id}")),
            },
            LinkOutcome::Rejected(err) => LinkReport {
                status: LinkStatus::Rejected,
                department: None,
                primary_key: None,
                reason: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::FakeLookup;

    fn populated() -> FakeLookup {
        FakeLookup::default()
            .with_row(Department::Production, 7)
            .with_row(Department::Overhaul, 3)
            .with_row(Department::Rekayasa, 5)
            .with_row(Department::Kalibrasi, 9)
    }

    fn stale_links() -> DepartmentLinks {
        DepartmentLinks {
            produksi_id: Some(1),
            overhaul_id: Some(2),
            rekayasa_id: Some(3),
            inventory_id: Some(4),
        }
    }

    #[tokio::test]
    async fn test_missing_code_clears_everything() {
        let mut links = stale_links();

        let outcome = apply_frontend_code(&mut links, None, &populated()).await.unwrap();

        assert_eq!(outcome, LinkOutcome::Unlinked);
        assert_eq!(links, DepartmentLinks::default());
    }

    #[tokio::test]
    async fn test_empty_code_counts_as_missing() {
        let lookup = populated();
        let mut links = stale_links();

        let outcome = apply_frontend_code(&mut links, Some(""), &lookup).await.unwrap();

        assert_eq!(outcome, LinkOutcome::Unlinked);
        assert_eq!(links, DepartmentLinks::default());
        assert_eq!(lookup.probe_count(), 0);
    }

    #[tokio::test]
    async fn test_each_department_sets_only_its_own_key() {
        let lookup = populated();
        let cases = [
            ("PRD-7", Department::Production, 7),
            ("OVH-3", Department::Overhaul, 3),
            ("RKY-5", Department::Rekayasa, 5),
            ("KAL-9", Department::Kalibrasi, 9),
        ];

        for (code, department, primary_key) in cases {
            let mut links = stale_links();
            let outcome = apply_frontend_code(&mut links, Some(code), &lookup)
                .await
                .unwrap();

            assert_eq!(
                outcome,
                LinkOutcome::Linked {
                    department,
                    primary_key
                }
            );
            assert_eq!(links.get(department), Some(primary_key));
            assert_eq!(links.linked_count(), 1, "{code} linked more than one key");
        }
    }

    #[tokio::test]
    async fn test_missing_target_nulls_its_key() {
        let lookup = populated();

        for department in Department::ALL {
            let mut links = stale_links();
            let code = format!("{}-404", department.prefix());
            let outcome = apply_frontend_code(&mut links, Some(&code), &lookup)
                .await
                .unwrap();

            assert_eq!(
                outcome,
                LinkOutcome::TargetNotFound {
                    department,
                    numeric_id: 404
                }
            );
            assert_eq!(links, DepartmentLinks::default());
        }
    }

    #[tokio::test]
    async fn test_bad_codes_are_absorbed() {
        let lookup = populated();
        let cases = [
            ("PRD7", CodeError::InvalidFormat("PRD7".to_string())),
            ("PRD-7-1", CodeError::InvalidFormat("PRD-7-1".to_string())),
            ("PRD-x", CodeError::InvalidNumericPart("PRD-x".to_string())),
            ("XYZ-3", CodeError::UnknownDepartment("XYZ".to_string())),
        ];

        for (code, expected) in cases {
            let mut links = stale_links();
            let outcome = apply_frontend_code(&mut links, Some(code), &lookup)
                .await
                .unwrap();

            assert_eq!(outcome, LinkOutcome::Rejected(expected));
            assert_eq!(links, DepartmentLinks::default());
        }
        assert_eq!(lookup.probe_count(), 0);
    }

    #[tokio::test]
    async fn test_prefix_case_is_ignored() {
        let mut links = DepartmentLinks::default();

        let outcome = apply_frontend_code(&mut links, Some("prd-007"), &populated())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            LinkOutcome::Linked {
                department: Department::Production,
                primary_key: 7
            }
        );
    }

    #[tokio::test]
    async fn test_storage_fault_is_fatal() {
        let mut links = DepartmentLinks::default();

        let result = apply_frontend_code(&mut links, Some("PRD-7"), &FakeLookup::failing()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_applying_twice_is_idempotent() {
        let lookup = populated();
        let mut once = DepartmentLinks::default();
        apply_frontend_code(&mut once, Some("RKY-5"), &lookup)
            .await
            .unwrap();

        let mut twice = once;
        apply_frontend_code(&mut twice, Some("RKY-5"), &lookup)
            .await
            .unwrap();

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_relinking_clears_previous_department() {
        let lookup = populated();
        let mut links = DepartmentLinks::default();

        apply_frontend_code(&mut links, Some("PRD-7"), &lookup)
            .await
            .unwrap();
        assert_eq!(links.produksi_id, Some(7));

        apply_frontend_code(&mut links, Some("OVH-3"), &lookup)
            .await
            .unwrap();
        assert_eq!(
            links,
            DepartmentLinks {
                overhaul_id: Some(3),
                ..DepartmentLinks::default()
            }
        );
    }

    #[test]
    fn test_link_report_shapes() {
        let report = LinkReport::from(&LinkOutcome::TargetNotFound {
            department: Department::Overhaul,
            numeric_id: 4,
        });
        assert_eq!(report.status, LinkStatus::NotFound);
        assert_eq!(report.department, Some(Department::Overhaul));
        assert_eq!(report.reason.as_deref(), Some("no Overhaul row with id 4"));

        let json = serde_json::to_value(LinkReport::from(&LinkOutcome::Rejected(
            CodeError::UnknownDepartment("XYZ".to_string()),
        )))
        .unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["department"], serde_json::Value::Null);
        assert_eq!(json["primary_key"], serde_json::Value::Null);

        let linked = LinkReport::from(&LinkOutcome::Linked {
            department: Department::Kalibrasi,
            primary_key: 9,
        });
        assert_eq!(linked.primary_key, Some(9));
    }
}

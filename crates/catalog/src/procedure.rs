//! Procedure flashcards: categories, procedures and their ordered steps.

use crate::wire::CategoryWire;
use crate::{CatalogError, CatalogResult};
use serde::Serialize;
use sickseek_types::CategoryId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Procedure {
    pub title: String,
    /// Never empty.
    pub steps: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcedureCategory {
    pub id: CategoryId,
    pub label: String,
    pub procedures: Vec<Procedure>,
}

impl ProcedureCategory {
    pub fn procedure(&self, index: usize) -> Option<&Procedure> {
        self.procedures.get(index)
    }

    pub(crate) fn from_wire(wire: CategoryWire) -> CatalogResult<Self> {
        let mut procedures = Vec::with_capacity(wire.procedures.len());
        for p in wire.procedures {
            if p.steps.is_empty() {
                return Err(CatalogError::Validation(format!(
                    "procedure '{}' in category '{}' has no steps",
                    p.title, wire.id
                )));
            }
            procedures.push(Procedure {
                title: p.title,
                steps: p.steps,
            });
        }

        Ok(Self {
            id: CategoryId::new(wire.id),
            label: wire.label,
            procedures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ProcedureWire;

    #[test]
    fn test_from_wire_rejects_procedure_without_steps() {
        let wire = CategoryWire {
            id: "admin".into(),
            label: "Admin / Insurance".into(),
            procedures: vec![ProcedureWire {
                title: "Getting a Receipt".into(),
                steps: vec![],
            }],
        };
        let err = ProcedureCategory::from_wire(wire).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn test_procedure_lookup_by_index() {
        let wire = CategoryWire {
            id: "pharmacy".into(),
            label: "Pharmacy".into(),
            procedures: vec![ProcedureWire {
                title: "Buying OTC Meds".into(),
                steps: vec!["Describe symptoms.".into()],
            }],
        };
        let category = ProcedureCategory::from_wire(wire).unwrap();
        assert_eq!(category.procedure(0).unwrap().title, "Buying OTC Meds");
        assert!(category.procedure(1).is_none());
    }
}

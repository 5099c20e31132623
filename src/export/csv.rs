//! CSV rendering of lead records.
//!
//! Every cell is double-quoted with embedded quotes doubled. Nested
//! fields (installments, invoices) are serialized as embedded JSON text
//! inside the quoted cell rather than flattened, so a row stays
//! unambiguous and machine-recoverable.

use anyhow::{Context, Result};

use crate::models::Lead;

/// Fixed export column list, in legacy storage (camelCase) names.
pub const CSV_HEADERS: [&str; 20] = [
    "id",
    "name",
    "contact",
    "email",
    "type",
    "stage",
    "paymentStage",
    "dateAdded",
    "demoStartDate",
    "demoEndDate",
    "paymentDate",
    "notes",
    "source",
    "reasonLostDelay",
    "recontactDate",
    "ribType",
    "numberOfInstallments",
    "installments",
    "numberOfInvoices",
    "invoices",
];

/// Default download file name.
pub const CSV_FILE_NAME: &str = "reef-leads.csv";

pub fn leads_to_csv(leads: &[Lead]) -> Result<String> {
    let header = CSV_HEADERS
        .iter()
        .map(|h| quote(h))
        .collect::<Vec<_>>()
        .join(",");

    let mut rows = vec![header];
    for lead in leads {
        // camelCase keys line up with the header list.
        let value = serde_json::to_value(lead)
            .with_context(|| format!("Failed to serialize lead '{}'", lead.id))?;
        let row = CSV_HEADERS
            .iter()
            .map(|header| quote(&cell_text(value.get(*header))))
            .collect::<Vec<_>>()
            .join(",");
        rows.push(row);
    }

    Ok(rows.join("\n"))
}

fn cell_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientType, Installment, PipelineStage};

    fn sample_lead() -> Lead {
        Lead::new(
            "Alex Johnson".to_string(),
            "555-0101".to_string(),
            ClientType::PrivateTeacher,
            "Ad Campaign A".to_string(),
        )
    }

    #[test]
    fn test_header_row_and_one_record() {
        let csv = leads_to_csv(&[sample_lead()]).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("\"id\",\"name\""));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut lead = sample_lead();
        lead.name = "The \"Best\" Academy".to_string();
        let csv = leads_to_csv(&[lead]).unwrap();
        assert!(csv.contains("\"The \"\"Best\"\" Academy\""));
    }

    #[test]
    fn test_missing_optionals_render_empty() {
        let csv = leads_to_csv(&[sample_lead()]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        // email column is the fourth cell and the lead has none.
        let cells: Vec<&str> = row.split("\",\"").collect();
        assert_eq!(cells[3], "");
    }

    #[test]
    fn test_nested_fields_serialize_as_embedded_json() {
        let mut lead = sample_lead();
        lead.stage = PipelineStage::ClosedPaid;
        lead.installments = Some(vec![Installment {
            date: "2026-01-15".to_string(),
            ..Installment::default()
        }]);

        let csv = leads_to_csv(&[lead]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("[{\"\"date\"\":\"\"2026-01-15\"\"}]"));
    }
}

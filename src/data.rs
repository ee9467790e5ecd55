use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};
use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub created_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Void,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Issued => "Issued",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Void => "Void",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub customer: String,
    pub issued_on: NaiveDate,
    pub total_cents: i64,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Total formatted as `1234.56`.
    pub fn total_display(&self) -> String {
        let sign = if self.total_cents < 0 { "-" } else { "" };
        let cents = self.total_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub subject: String,
    pub requester: String,
    pub opened_on: NaiveDate,
    pub status: TicketStatus,
}

/// All records the application can list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub customers: Vec<Customer>,
    pub invoices: Vec<Invoice>,
    pub tickets: Vec<Ticket>,
}

const COMPANY_STEMS: [&str; 12] = [
    "Andes", "Pacifico", "Sierra", "Norte", "Costa", "Inca", "Amazonia", "Lima", "Cusco",
    "Arequipa", "Piura", "Callao",
];
const COMPANY_KINDS: [&str; 6] = [
    "Trading",
    "Logistics",
    "Foods",
    "Textiles",
    "Services",
    "Hardware",
];
const TICKET_SUBJECTS: [&str; 8] = [
    "Printer not responding",
    "Invoice total mismatch",
    "Cannot log in",
    "Request credit note",
    "Update billing address",
    "Duplicate payment",
    "Report export is empty",
    "Password reset",
];

impl Ledger {
    /// Deterministic demo data set.
    pub fn seeded() -> Self {
        Self::with_counts(237, 1240, 318)
    }

    /// Demo data with the given number of records per collection.
    pub fn with_counts(customers: usize, invoices: usize, tickets: usize) -> Self {
        let epoch = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
        let day = |i: usize| epoch + Days::new((i % 640) as u64);

        let customer_name = |i: usize| {
            format!(
                "{} {} {}",
                COMPANY_STEMS[i % COMPANY_STEMS.len()],
                COMPANY_KINDS[(i / COMPANY_STEMS.len()) % COMPANY_KINDS.len()],
                i / (COMPANY_STEMS.len() * COMPANY_KINDS.len()) + 1
            )
        };

        let customers = (0..customers)
            .map(|i| Customer {
                id: Uuid::from_u128(0x1000_0000 + i as u128),
                name: customer_name(i),
                tax_id: format!("20{:09}", 100_000 + i * 7919 % 900_000),
                email: format!("billing{}@example.com", i + 1),
                created_on: day(i * 3),
            })
            .collect::<Vec<_>>();

        let invoices = (0..invoices)
            .map(|i| Invoice {
                id: Uuid::from_u128(0x2000_0000 + i as u128),
                number: format!("F001-{:08}", i + 1),
                customer: customer_name(i % customers.len().max(1)),
                issued_on: day(i),
                total_cents: ((i * 48_271) % 2_500_000) as i64 + 1_000,
                status: match i % 9 {
                    0 => InvoiceStatus::Draft,
                    1..=3 => InvoiceStatus::Issued,
                    8 => InvoiceStatus::Void,
                    _ => InvoiceStatus::Paid,
                },
            })
            .collect();

        let tickets = (0..tickets)
            .map(|i| Ticket {
                id: Uuid::from_u128(0x3000_0000 + i as u128),
                subject: TICKET_SUBJECTS[i % TICKET_SUBJECTS.len()].to_string(),
                requester: customer_name((i * 5) % customers.len().max(1)),
                opened_on: day(i * 2),
                status: match i % 4 {
                    0 => TicketStatus::Open,
                    1 => TicketStatus::InProgress,
                    2 => TicketStatus::Resolved,
                    _ => TicketStatus::Closed,
                },
            })
            .collect();

        Self {
            customers,
            invoices,
            tickets,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading ledger from {}", path.display()))?;
        serde_json::from_str(&raw).wrap_err_with(|| format!("parsing ledger in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(self)?;
        fs::write(path, json).wrap_err_with(|| format!("writing ledger to {}", path.display()))?;
        Ok(())
    }

    /// Loads `path` when it exists, otherwise returns the demo data set.
    pub fn load_or_seed(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            _ => Ok(Self::seeded()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_seeded_counts() {
        let ledger = Ledger::seeded();
        assert_eq!(ledger.customers.len(), 237);
        assert_eq!(ledger.invoices.len(), 1240);
        assert_eq!(ledger.tickets.len(), 318);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        assert_eq!(Ledger::with_counts(10, 20, 5), Ledger::with_counts(10, 20, 5));
    }

    #[test]
    fn test_empty_customers_still_seeds_invoices() {
        let ledger = Ledger::with_counts(0, 3, 2);
        assert_eq!(ledger.invoices.len(), 3);
        assert_eq!(ledger.tickets.len(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("ledger.json");
        let ledger = Ledger::with_counts(4, 6, 2);

        ledger.save(&path).unwrap();
        assert_eq!(Ledger::load(&path).unwrap(), ledger);
        assert_eq!(Ledger::load_or_seed(Some(&path)).unwrap(), ledger);
    }

    #[test]
    fn test_load_or_seed_falls_back() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::load_or_seed(Some(&dir.path().join("missing.json"))).unwrap();
        assert_eq!(ledger.customers.len(), 237);
    }

    #[test]
    fn test_invoice_total_display() {
        let mut invoice = Ledger::with_counts(1, 1, 0).invoices.remove(0);
        invoice.total_cents = 123_456;
        assert_eq!(invoice.total_display(), "1234.56");
        invoice.total_cents = -5;
        assert_eq!(invoice.total_display(), "-0.05");
    }

    #[test]
    fn test_ticket_status_label() {
        assert_eq!(TicketStatus::InProgress.to_string(), "In progress");
    }
}

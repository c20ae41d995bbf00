//! Invoice records as supplied by the persistence layer.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One invoice from the snapshot being searched.
///
/// Records are read-only for the duration of a query. Every field except the
/// identifier, client name, status and amount may be missing; a record with a
/// missing field simply never matches a filter on that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Unique identifier.
    pub id: String,

    /// Client (customer) name as free text.
    pub client_name: String,

    /// Customer contract identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_contract: Option<String>,

    /// Canonical invoice type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,

    /// Date the invoice was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,

    /// Payment due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Payment status.
    #[serde(default)]
    pub status: InvoiceStatus,

    /// Amount still due, in `currency`.
    pub amount_due: Decimal,

    /// ISO currency code (default: USD).
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Date the invoice was paid. Only present when the status is Paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl InvoiceRecord {
    /// Create a pending invoice with only the mandatory fields set.
    pub fn new(id: impl Into<String>, client_name: impl Into<String>, amount_due: Decimal) -> Self {
        Self {
            id: id.into(),
            client_name: client_name.into(),
            customer_contract: None,
            invoice_type: None,
            invoice_date: None,
            due_date: None,
            status: InvoiceStatus::Pending,
            amount_due,
            currency: default_currency(),
            payment_date: None,
        }
    }

    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.customer_contract = Some(contract.into());
        self
    }

    pub fn with_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = Some(invoice_type);
        self
    }

    pub fn with_invoice_date(mut self, date: NaiveDate) -> Self {
        self.invoice_date = Some(date);
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Mark the invoice as paid on the given date.
    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.status = InvoiceStatus::Paid;
        self.payment_date = Some(date);
        self
    }

    /// Whether the invoice is a credit memo.
    pub fn is_credit_memo(&self) -> bool {
        self.invoice_type == Some(InvoiceType::CreditMemo)
    }

    /// Whether money is still expected for this invoice.
    pub fn is_unsettled(&self) -> bool {
        !matches!(self.status, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }
}

/// Canonical invoice type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvoiceType {
    /// Professional services.
    #[serde(rename = "PS")]
    ProfessionalServices,
    /// Maintenance.
    #[serde(rename = "Maint")]
    Maintenance,
    /// Subscription.
    #[serde(rename = "Sub")]
    Subscription,
    /// Hosting.
    #[serde(rename = "Hosting")]
    Hosting,
    /// Managed services.
    #[serde(rename = "MS")]
    ManagedServices,
    /// Software.
    #[serde(rename = "SW")]
    Software,
    /// Hardware.
    #[serde(rename = "HW")]
    Hardware,
    /// Third-party product.
    #[serde(rename = "3PP")]
    ThirdPartyProduct,
    /// Credit memo.
    #[serde(rename = "Credit Memo")]
    CreditMemo,
}

impl InvoiceType {
    /// All types in declaration order.
    pub const ALL: [InvoiceType; 9] = [
        InvoiceType::ProfessionalServices,
        InvoiceType::Maintenance,
        InvoiceType::Subscription,
        InvoiceType::Hosting,
        InvoiceType::ManagedServices,
        InvoiceType::Software,
        InvoiceType::Hardware,
        InvoiceType::ThirdPartyProduct,
        InvoiceType::CreditMemo,
    ];

    /// The canonical short code.
    pub fn code(&self) -> &'static str {
        match self {
            InvoiceType::ProfessionalServices => "PS",
            InvoiceType::Maintenance => "Maint",
            InvoiceType::Subscription => "Sub",
            InvoiceType::Hosting => "Hosting",
            InvoiceType::ManagedServices => "MS",
            InvoiceType::Software => "SW",
            InvoiceType::Hardware => "HW",
            InvoiceType::ThirdPartyProduct => "3PP",
            InvoiceType::CreditMemo => "Credit Memo",
        }
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for InvoiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        InvoiceType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown invoice type: {s}"))
    }
}

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
    /// Any status the persistence layer knows about and we don't.
    #[serde(other)]
    Other,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
            InvoiceStatus::Other => "Other",
        };
        f.write_str(s)
    }
}

//! Regex patterns for query extraction.
//!
//! All patterns run against the normalized (lower-cased, whitespace-collapsed)
//! query.

use lazy_static::lazy_static;
use regex::Regex;

use super::vocabulary::MONTH_NAMES;

lazy_static! {
    static ref MONTHS: String = MONTH_NAMES.join("|");

    // Contract: "on contract X", "for contract X", "contract X"
    pub static ref CONTRACT: Regex = Regex::new(&format!(
        r"\b(?:(?:on|for)\s+)?contract\s+(?:(?:number|num|no\.?)\s+|#\s*)?([a-z0-9][a-z0-9\s\-_'.&,]*?)(?:\s+(?:what|total|sum|how|in|during|are|is|invoices?|this|last|next|current|previous|{months})\b|\s*\?|\s*[^a-z0-9\s\-_'.&,]|\s*$)",
        months = *MONTHS
    )).unwrap();

    // Status keywords
    pub static ref STATUS: Regex = Regex::new(
        r"\b(unpaid|paid|overdue|pending|outstanding)\b"
    ).unwrap();

    // Temporal: "this month", "previous year", ...
    pub static ref RELATIVE_PERIOD: Regex = Regex::new(
        r"\b(this|current|last|previous|next)\s+(month|year)\b"
    ).unwrap();

    // Temporal: "january", "january 2025"
    pub static ref MONTH_REFERENCE: Regex = Regex::new(&format!(
        r"\b({months})(?:\s+((?:19|20)\d{{2}}))?\b",
        months = *MONTHS
    )).unwrap();

    // Temporal: "2025"
    pub static ref BARE_YEAR: Regex = Regex::new(
        r"\b((?:19|20)\d{2})\b"
    ).unwrap();

    // A whole candidate that is really a date: "2025", "1/7/2025", "2025-07", "q3 2025"
    pub static ref DATE_LIKE: Regex = Regex::new(
        r"^(?:\d{4}|\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{4}[/.\-]\d{1,2}(?:[/.\-]\d{1,2})?|q[1-4](?:\s+\d{4})?)$"
    ).unwrap();

    // Client 1: "which X invoices", "what X contracts"
    pub static ref CLIENT_INTERROGATIVE: Regex = Regex::new(
        r"\b(?:which|what)\s+(.+?)\s+(?:contracts|invoices)\b"
    ).unwrap();

    // Client 2: "show me X invoices"; group 2 marks a trailing contract phrase
    pub static ref CLIENT_SHOW_ME: Regex = Regex::new(
        r"\bshow\s+me\s+(.+?)\s+(?:contracts|invoices)\b(\s+(?:on|for)\s+contract\b)?"
    ).unwrap();

    // Client 3: "invoices for X", "contracts from X"
    pub static ref CLIENT_PREPOSITION: Regex = Regex::new(&format!(
        r"\b(?:invoices|contracts)\s+(?:for|from|to|by)\s+(.+?)(?:\s+(?:this|last|next|current|previous|in|during|since|before|after|on\s+contract|for\s+contract|that|which|are|is|due|(?:19|20)\d{{2}}|{months})\b|\s*\?|\s*$)",
        months = *MONTHS
    )).unwrap();

    // Client 4: "X invoices" at the start; group 2 marks a trailing preposition
    pub static ref CLIENT_LEADING: Regex = Regex::new(
        r"^(.+?)\s+(?:contracts|invoices)\b(\s+(?:for|from|to|by)\b)?"
    ).unwrap();
}

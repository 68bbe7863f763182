use std::fmt::Write;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use store::WithdrawalRecord;

const STYLE: &str = r#"
        body {
            font-family: Arial, sans-serif;
            margin: 20px;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #1564C0;
            color: white;
        }
        tr:nth-child(even) {
            background-color: #f2f2f2;
        }
        .error {
            color: #b00020;
        }"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{STYLE}
    </style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("${rounded}")
}

// records written by hand may carry anything as timestamp, those are shown verbatim
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn login_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Withdrawal Records</h1>\n");
    if let Some(error) = error {
        let _ = writeln!(body, r#"<p class="error">{}</p>"#, escape(error));
    }
    body.push_str(
        r#"<form method="get" action="/">
    <label>Password <input type="password" name="password" autofocus></label>
    <button type="submit">View</button>
</form>"#,
    );
    page("Withdrawal Records", &body)
}

pub fn records_page(records: &[WithdrawalRecord], password: &str) -> String {
    let password = escape(password);
    let mut rows = String::new();
    for w in records {
        let timestamp = escape(&w.timestamp);
        // writing into a String cannot fail
        let _ = write!(
            rows,
            r#"
    <tr>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>
            <form method="post" action="/delete">
                <input type="hidden" name="password" value="{password}">
                <input type="hidden" name="timestamp" value="{timestamp}">
                <button type="submit">Delete</button>
            </form>
        </td>
    </tr>"#,
            escape(&format_timestamp(&w.timestamp)),
            escape(&format_amount(w.amount)),
            escape(&w.card_number),
            escape(&w.card_exp),
            escape(&w.card_name),
            escape(&w.zip_code),
        );
    }

    let body = format!(
        r#"<h1>Withdrawal Records</h1>
<table>
    <tr>
        <th>Timestamp</th>
        <th>Amount</th>
        <th>Card Number</th>
        <th>Expiration</th>
        <th>Name</th>
        <th>Zip Code</th>
        <th></th>
    </tr>{rows}
</table>"#
    );
    page("Withdrawal Records", &body)
}

pub fn error_page(message: &str) -> String {
    page("Error", &format!(r#"<p class="error">{}</p>"#, escape(message)))
}

//! HTML Views
//!
//! The input form and the result page served to browsers.

use crate::domain::schema::form_fields;
use crate::inference::Assignment;
use indexmap::IndexMap;
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto}\
label{display:inline-block;width:4rem}\
.field{display:inline-block;margin:.25rem 1rem .25rem 0}\
.result{margin-top:1.5rem;padding:1rem;border:1px solid #ccc}\
.error{border-color:#c33;color:#c33}";

/// Escape text for an HTML body or attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <title>Usage cluster prediction</title><style>{}</style></head>\
         <body><h1>Usage cluster prediction</h1>{}</body></html>\n",
        STYLE, body
    )
}

fn form(values: &IndexMap<String, String>) -> String {
    let mut html = String::from("<form action=\"/predict\" method=\"post\">");
    for field in form_fields() {
        let value = values.get(&field).map(String::as_str).unwrap_or("");
        let _ = write!(
            html,
            "<span class=\"field\"><label for=\"{f}\">{f}</label>\
             <input id=\"{f}\" name=\"{f}\" value=\"{v}\"></span>",
            f = field,
            v = escape(value)
        );
    }
    html.push_str("<p><button type=\"submit\">Predict</button></p></form>");
    html
}

/// Empty input form
pub fn render_index() -> String {
    page(&form(&IndexMap::new()))
}

/// Form re-filled with the submission, followed by the assignment
pub fn render_result(values: &IndexMap<String, String>, assignment: &Assignment) -> String {
    let result = format!(
        "<div class=\"result\"><p>Predicted cluster: <strong>{}</strong></p><p>{}</p></div>",
        assignment.cluster,
        escape(assignment.description)
    );
    page(&(form(values) + &result))
}

/// Form re-filled with the submission, followed by an error message
pub fn render_error(values: &IndexMap<String, String>, message: &str) -> String {
    let result = format!(
        "<div class=\"result error\"><p>Prediction failed: {}</p></div>",
        escape(message)
    );
    page(&(form(values) + &result))
}

//! Comma-delimited text with double-quote escaping.
//!
//! The grammar is total: every input decodes to some sequence of rows, and
//! malformed quoting is absorbed rather than reported.

use std::mem;

pub const COMMA: char = ',';
pub const TAB: char = '\t';

/// Decode comma-delimited text into rows of fields
pub fn parse(text: &str) -> Vec<Vec<String>> {
    parse_delimited(text, COMMA)
}

/// Decode delimited text into rows of fields.
///
/// Rows end at `\n`, `\r` or `\r\n`. A quote opens a quoted section in which
/// delimiters and line breaks are literal and `""` stands for one quote; an
/// unterminated quoted section runs to the end of input. Input that ends on a
/// row boundary yields no trailing empty row.
pub fn parse_delimited(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Anything seen since the last row boundary
    let mut pending = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                pending = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(mem::take(&mut field));
                rows.push(mem::take(&mut row));
                pending = false;
            }
            c if c == delimiter => {
                row.push(mem::take(&mut field));
                pending = true;
            }
            c => {
                field.push(c);
                pending = true;
            }
        }
    }

    if pending {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// True when a field must be quoted to survive decoding
pub fn needs_quoting(field: &str, delimiter: char) -> bool {
    field.contains(|c: char| c == delimiter || c == '"' || c == '\n' || c == '\r')
}

fn push_field(out: &mut String, field: &str, delimiter: char) {
    if needs_quoting(field, delimiter) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Encode rows as comma-delimited text joined with `\n`
pub fn encode<S: AsRef<str>>(rows: &[Vec<S>]) -> String {
    encode_delimited(rows, COMMA)
}

/// Encode rows with the given delimiter, quoting only where needed.
///
/// A final row made of one empty field is written as `""`; written bare it
/// would be indistinguishable from the end of input.
pub fn encode_delimited<S: AsRef<str>>(rows: &[Vec<S>], delimiter: char) -> String {
    let mut out = String::new();

    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let is_last = i + 1 == rows.len();
        if is_last && row.len() == 1 && row[0].as_ref().is_empty() {
            out.push_str("\"\"");
            continue;
        }

        for (j, field) in row.iter().enumerate() {
            if j > 0 {
                out.push(delimiter);
            }
            push_field(&mut out, field.as_ref(), delimiter);
        }
    }

    out
}

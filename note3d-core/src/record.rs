/// Flat string records and their comma-separated text form
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{char, line_ending, none_of},
    combinator::{cut, eof, value},
    multi::{many0, separated_list1},
    sequence::terminated,
    IResult,
};
use std::borrow::Cow;

use crate::error::CodecError;

/// One persisted record. The first field is the tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record(Vec<String>);

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    pub fn with_tag(tag: &str) -> Self {
        Self(vec![tag.to_string()])
    }

    pub fn push(&mut self, field: impl Into<String>) -> &mut Self {
        self.0.push(field.into());
        self
    }

    pub fn tag(&self) -> &str {
        self.get(0).unwrap_or("")
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.0.get(i).map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_fields(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

fn quoted_field(input: &str) -> IResult<&str, String> {
    let (input, _) = char('"')(input)?;
    let (input, chars) = cut(many0(alt((value('"', tag("\"\"")), none_of("\"")))))(input)?;
    let (input, _) = cut(char('"'))(input)?;
    Ok((input, chars.into_iter().collect()))
}

fn bare_field(input: &str) -> IResult<&str, String> {
    let (input, text) = take_till(|c| c == ',' || c == '\r' || c == '\n')(input)?;
    Ok((input, text.to_string()))
}

fn field(input: &str) -> IResult<&str, String> {
    alt((quoted_field, bare_field))(input)
}

fn record_line(input: &str) -> IResult<&str, Vec<String>> {
    terminated(separated_list1(char(','), field), alt((line_ending, eof)))(input)
}

fn syntax_error(line: usize, err: nom::Err<nom::error::Error<&str>>) -> CodecError {
    let message = match err {
        nom::Err::Incomplete(_) => "incomplete input".to_string(),
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let near: String = e.input.chars().take(16).collect();
            format!("{:?} near {:?}", e.code, near)
        }
    };
    CodecError::Syntax { line, message }
}

/// Parse comma-separated text into records. Blank lines are skipped.
pub fn parse_text(text: &str) -> Result<Vec<Record>, CodecError> {
    let mut input = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut line = 1;
    let mut records = Vec::new();

    while !input.is_empty() {
        let (rest, fields) = record_line(input).map_err(|e| syntax_error(line, e))?;
        line += input[..input.len() - rest.len()].matches('\n').count();
        input = rest;
        if !matches!(fields.as_slice(), [only] if only.is_empty()) {
            records.push(Record(fields));
        }
    }

    Ok(records)
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// One line per record, fields quoted only when they need it.
pub fn write_text(records: &[Record]) -> String {
    let mut out = String::new();
    for record in records {
        let fields: Vec<Cow<'_, str>> = record.fields().iter().map(|f| escape(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fields: &[&str]) -> Record {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_parse_plain_records() {
        let records = parse_text("Parts,Root,0\nPartsEnd\n").unwrap();
        assert_eq!(records, vec![rec(&["Parts", "Root", "0"]), rec(&["PartsEnd"])]);
        assert_eq!(records[0].tag(), "Parts");
    }

    #[test]
    fn test_parse_crlf_blank_lines_and_missing_newline() {
        let records = parse_text("a,b\r\n\r\n\nc,,d").unwrap();
        assert_eq!(records, vec![rec(&["a", "b"]), rec(&["c", "", "d"])]);
    }

    #[test]
    fn test_quoted_fields() {
        let records = parse_text("Element,\"wheel, front\",3\nParts,\"say \"\"hi\"\"\",1\n").unwrap();
        assert_eq!(records[0].get(1), Some("wheel, front"));
        assert_eq!(records[1].get(1), Some("say \"hi\""));
    }

    #[test]
    fn test_quoted_newline_keeps_line_count() {
        let err = parse_text("Parts,\"two\nlines\",0\nx,\"open\n").unwrap_err();
        match err {
            CodecError::Syntax { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_garbage_after_quote_is_rejected() {
        assert!(matches!(
            parse_text("a,\"b\"c\n"),
            Err(CodecError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_write_quotes_only_when_needed() {
        let text = write_text(&[rec(&["Parts", "a,b", "0"]), rec(&["Element", "q\"t", "1"])]);
        assert_eq!(text, "Parts,\"a,b\",0\nElement,\"q\"\"t\",1\n");
    }

    #[test]
    fn test_written_text_parses_back() {
        let records = vec![
            rec(&["Parts", "multi\nline", "0"]),
            rec(&["Matrix", "4", "4", "-0.5", "1e-7"]),
        ];
        assert_eq!(parse_text(&write_text(&records)).unwrap(), records);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_text("").unwrap().is_empty());
        assert!(parse_text("\n\n").unwrap().is_empty());
    }
}

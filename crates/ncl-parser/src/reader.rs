//! Markup reader producing start/end element events.
//!
//! Only the subset of XML that NCL documents use is understood: elements,
//! attributes quoted with `'` or `"`, the predefined entities and character
//! references. Declarations, processing instructions, comments, CDATA
//! sections and DOCTYPE are skipped, and text content is ignored.
//!
//! The public entry point is [`read`], which keeps reading after an error
//! and reports every problem found in a single pass.

use log::trace;
use ncl_core::{
    builder::Attributes,
    error::{Diagnostic, ErrorCode},
};
use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, cut_err, delimited, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_till, take_until, take_while},
};

use crate::error::ParseError;

/// One element boundary in document order.
///
/// A self-closing tag produces a `Start` immediately followed by an `End`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    Start {
        name: &'a str,
        attributes: Attributes,
        offset: usize,
    },
    End {
        name: &'a str,
        offset: usize,
    },
}

/// Error information attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReaderDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// Where the construct being read starts.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<ReaderDiagnostic>>;

/// A raw attribute: name, offset of the name, undecoded value.
type RawAttribute<'a> = (&'a str, usize, &'a str);

#[derive(Debug, Clone)]
enum Item<'a> {
    Start {
        name: &'a str,
        attributes: Vec<RawAttribute<'a>>,
        empty: bool,
        offset: usize,
    },
    End {
        name: &'a str,
        offset: usize,
    },
    /// Anything without an event: text, comments, declarations.
    Skip,
}

fn name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_' || c == ':'),
        take_while(0.., |c: char| {
            c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
        }),
    )
        .take()
        .parse_next(input)
}

fn quoted<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    alt((
        delimited('"', take_till(0.., ['"', '<']), '"'),
        delimited('\'', take_till(0.., ['\'', '<']), '\''),
    ))
    .parse_next(input)
}

/// Parse `name = 'value'`, committing once the name is read.
fn attribute<'a>(input: &mut Input<'a>) -> IResult<RawAttribute<'a>> {
    let start = input.current_token_start();
    let name = name.parse_next(input)?;
    cut_err(preceded((multispace0, '=', multispace0), quoted))
        .context(ReaderDiagnostic {
            code: ErrorCode::E001,
            message: "malformed attribute",
            help: Some("write attributes as `name='value'`"),
            start,
        })
        .map(|value| (name, start, value))
        .parse_next(input)
}

fn start_tag<'a>(input: &mut Input<'a>) -> IResult<Item<'a>> {
    let start = input.current_token_start();
    '<'.parse_next(input)?;
    let name = name.parse_next(input)?;
    cut_err((
        repeat(0.., preceded(multispace1, attribute)),
        multispace0,
        alt(("/>".value(true), ">".value(false))),
    ))
    .context(ReaderDiagnostic {
        code: ErrorCode::E001,
        message: "malformed start tag",
        help: Some("close the tag with `>` or `/>`"),
        start,
    })
    .map(|(attributes, _, empty): (Vec<_>, _, bool)| Item::Start {
        name,
        attributes,
        empty,
        offset: start,
    })
    .parse_next(input)
}

fn end_tag<'a>(input: &mut Input<'a>) -> IResult<Item<'a>> {
    let start = input.current_token_start();
    "</".parse_next(input)?;
    cut_err(terminated(name, (multispace0, '>')))
        .context(ReaderDiagnostic {
            code: ErrorCode::E001,
            message: "malformed end tag",
            help: Some("write end tags as `</name>`"),
            start,
        })
        .map(|name| Item::End {
            name,
            offset: start,
        })
        .parse_next(input)
}

/// Parse a construct between `open` and `close` whose content is ignored.
fn skipped<'a>(
    input: &mut Input<'a>,
    mut open: &'static str,
    close: &'static str,
    message: &'static str,
) -> IResult<Item<'a>> {
    let start = input.current_token_start();
    open.parse_next(input)?;
    cut_err(terminated(take_until(0.., close), close))
        .context(ReaderDiagnostic {
            code: ErrorCode::E001,
            message,
            help: None,
            start,
        })
        .value(Item::Skip)
        .parse_next(input)
}

fn comment<'a>(input: &mut Input<'a>) -> IResult<Item<'a>> {
    skipped(input, "<!--", "-->", "unterminated comment")
}

fn cdata<'a>(input: &mut Input<'a>) -> IResult<Item<'a>> {
    skipped(input, "<![CDATA[", "]]>", "unterminated CDATA section")
}

fn doctype<'a>(input: &mut Input<'a>) -> IResult<Item<'a>> {
    skipped(input, "<!", ">", "unterminated declaration")
}

fn processing_instruction<'a>(input: &mut Input<'a>) -> IResult<Item<'a>> {
    skipped(input, "<?", "?>", "unterminated processing instruction")
}

fn text<'a>(input: &mut Input<'a>) -> IResult<Item<'a>> {
    take_while(1.., |c: char| c != '<')
        .value(Item::Skip)
        .parse_next(input)
}

fn item<'a>(input: &mut Input<'a>) -> IResult<Item<'a>> {
    alt((
        comment,                // Must come before doctype
        cdata,                  // Must come before doctype
        doctype,
        processing_instruction,
        end_tag,                // Must come before start_tag
        start_tag,
        text,
    ))
    .parse_next(input)
}

/// Decode entity and character references in an attribute value.
fn decode(raw: &str, offset: usize) -> Result<String, Diagnostic> {
    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let Some(semi) = after.find(';') else {
            return Err(entity_error(offset, "unterminated entity reference"));
        };
        let entity = &after[..semi];
        let ch = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "apos" => Some('\''),
            "quot" => Some('"'),
            _ => entity
                .strip_prefix("#x")
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                .and_then(Result::ok)
                .and_then(char::from_u32),
        };
        let Some(ch) = ch else {
            return Err(entity_error(offset, "unknown entity reference"));
        };
        decoded.push(ch);
        rest = &after[semi + 1..];
    }
    decoded.push_str(rest);
    Ok(decoded)
}

fn entity_error(offset: usize, message: &str) -> Diagnostic {
    Diagnostic::error(message)
        .with_code(ErrorCode::E001)
        .with_help("use `&lt;`, `&gt;`, `&amp;`, `&apos;`, `&quot;` or `&#N;`")
        .with_offset(offset)
}

/// Reader that accumulates events and diagnostics.
struct Reader<'a> {
    events: Vec<Event<'a>>,
    diagnostics: Vec<Diagnostic>,
    open: Vec<(&'a str, usize)>,
    root_seen: bool,
}

impl<'a> Reader<'a> {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            diagnostics: Vec::new(),
            open: Vec::new(),
            root_seen: false,
        }
    }

    fn read(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match item(&mut input) {
                Ok(item) => self.handle(item),
                Err(e) => {
                    let error_pos = input.current_token_start();
                    self.diagnostics.push(Self::convert_err_mode(e, error_pos));
                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn handle(&mut self, item: Item<'a>) {
        match item {
            Item::Skip => {}
            Item::Start {
                name,
                attributes,
                empty,
                offset,
            } => {
                if self.open.is_empty() && self.root_seen {
                    self.error(ErrorCode::E001, "content after the root element", offset);
                    return;
                }
                self.root_seen = true;
                let attributes = self.decode_attributes(&attributes);
                trace!(name, offset; "Start tag");
                self.events.push(Event::Start {
                    name,
                    attributes,
                    offset,
                });
                if empty {
                    self.events.push(Event::End { name, offset });
                } else {
                    self.open.push((name, offset));
                }
            }
            Item::End { name, offset } => self.close(name, offset),
        }
    }

    fn close(&mut self, name: &'a str, offset: usize) {
        let Some(position) = self.open.iter().rposition(|(open, _)| *open == name) else {
            if self.open.is_empty() {
                self.error(ErrorCode::E004, "unexpected end tag", offset);
            } else {
                self.error(ErrorCode::E002, "end tag does not match any open element", offset);
            }
            return;
        };
        // Elements left open inside the closed one end here.
        while self.open.len() > position + 1 {
            if let Some((inner, _)) = self.open.pop() {
                let message = format!("end tag `{name}` closes unclosed element `{inner}`");
                self.error(ErrorCode::E002, message, offset);
                self.events.push(Event::End {
                    name: inner,
                    offset,
                });
            }
        }
        self.open.pop();
        self.events.push(Event::End { name, offset });
    }

    fn decode_attributes(&mut self, raw: &[RawAttribute<'a>]) -> Attributes {
        let mut attributes = Attributes::new();
        for (name, offset, value) in raw {
            if attributes.contains_key(*name) {
                let message = format!("duplicate attribute `{name}`");
                self.error(ErrorCode::E001, message, *offset);
                continue;
            }
            match decode(value, *offset) {
                Ok(value) => {
                    attributes.insert((*name).to_string(), value);
                }
                Err(diagnostic) => self.diagnostics.push(diagnostic),
            }
        }
        attributes
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>, offset: usize) {
        self.diagnostics.push(
            Diagnostic::error(message)
                .with_code(code)
                .with_offset(offset),
        );
    }

    fn finish(mut self) -> Result<Vec<Event<'a>>, ParseError> {
        while let Some((name, offset)) = self.open.pop() {
            self.error(ErrorCode::E003, format!("unclosed element `{name}`"), offset);
        }
        if !self.root_seen {
            self.error(ErrorCode::E003, "no root element", 0);
        }
        if self.diagnostics.is_empty() {
            Ok(self.events)
        } else {
            Err(ParseError::new(self.diagnostics))
        }
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Falls back to E001 (malformed markup) if no context is found.
    fn convert_err_mode(err: ErrMode<ContextError<ReaderDiagnostic>>, error_pos: usize) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(ReaderDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_offset(*start);
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        Diagnostic::error("malformed markup")
            .with_code(ErrorCode::E001)
            .with_offset(error_pos)
    }
}

/// Read `source` into element events, collecting every error.
///
/// # Returns
///
/// - `Ok(events)` - balanced start and end events of a single root element
/// - `Err(ParseError)` - one or more errors occurred; contains all
///   diagnostics
pub fn read(source: &str) -> Result<Vec<Event<'_>>, ParseError> {
    let mut reader = Reader::new();
    reader.read(LocatingSlice::new(source));
    reader.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(err: &ParseError) -> Vec<Option<ErrorCode>> {
        err.diagnostics().iter().map(Diagnostic::code).collect()
    }

    #[test]
    fn test_start_and_end_events() {
        let events = read("<ncl id='doc'><body/></ncl>").unwrap();

        assert_eq!(events.len(), 4);
        let Event::Start {
            name, attributes, ..
        } = &events[0]
        else {
            panic!("expected a start event");
        };
        assert_eq!(*name, "ncl");
        assert_eq!(attributes.get("id").map(String::as_str), Some("doc"));
        assert!(matches!(events[1], Event::Start { name: "body", offset: 14, .. }));
        assert!(matches!(events[2], Event::End { name: "body", .. }));
        assert!(matches!(events[3], Event::End { name: "ncl", .. }));
    }

    #[test]
    fn test_skips_prolog_comments_and_text() {
        let source = "<?xml version=\"1.0\"?>\n<!DOCTYPE ncl>\n<!-- a <comment> -->\n\
                      <ncl>some text<![CDATA[<b>]]></ncl>\n";
        let events = read(source).unwrap();

        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_attribute_quoting_and_entities() {
        let events =
            read("<ncl title=\"Tom &amp; Jerry's\" xmlns = 'a&lt;b&#65;&#x42;'/>").unwrap();

        let Event::Start { attributes, .. } = &events[0] else {
            panic!("expected a start event");
        };
        assert_eq!(attributes["title"], "Tom & Jerry's");
        assert_eq!(attributes["xmlns"], "a<bAB");
    }

    #[test]
    fn test_unknown_entity() {
        let err = read("<ncl title='&nbsp;'/>").unwrap_err();

        assert_eq!(codes(&err), vec![Some(ErrorCode::E001)]);
        assert_eq!(err.diagnostics()[0].offset(), Some(5));
    }

    #[test]
    fn test_mismatched_end_tag() {
        let err = read("<ncl><body></head></ncl>").unwrap_err();

        // The stray `</head>`, then `body` left open by `</ncl>`.
        assert_eq!(
            codes(&err),
            vec![Some(ErrorCode::E002), Some(ErrorCode::E002)]
        );
        assert_eq!(err.diagnostics()[0].offset(), Some(11));
        assert_eq!(err.diagnostics()[1].offset(), Some(18));
    }

    #[test]
    fn test_unclosed_element() {
        let err = read("<ncl><body>").unwrap_err();

        assert_eq!(
            codes(&err),
            vec![Some(ErrorCode::E003), Some(ErrorCode::E003)]
        );
        assert_eq!(err.diagnostics()[0].message(), "unclosed element `body`");
    }

    #[test]
    fn test_unexpected_end_tag() {
        let err = read("<ncl/></ncl>").unwrap_err();

        assert_eq!(codes(&err), vec![Some(ErrorCode::E004)]);
    }

    #[test]
    fn test_malformed_attribute() {
        let err = read("<ncl id=doc></ncl>").unwrap_err();

        let first = &err.diagnostics()[0];
        assert_eq!(first.code(), Some(ErrorCode::E001));
        assert_eq!(first.message(), "malformed attribute");
        assert_eq!(first.offset(), Some(5));
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = read("<ncl id='a' id='b'/>").unwrap_err();

        assert_eq!(codes(&err), vec![Some(ErrorCode::E001)]);
        assert_eq!(err.diagnostics()[0].message(), "duplicate attribute `id`");
    }

    #[test]
    fn test_empty_source() {
        let err = read("  \n").unwrap_err();

        assert_eq!(err.diagnostics()[0].message(), "no root element");
    }
}

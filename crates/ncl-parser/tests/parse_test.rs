use ncl_core::{
    Document,
    builder::DocumentBuilder,
    config::ModelConfig,
    elements::{Body, CausalConnector, Link, Media, Property},
    error::ErrorCode,
    factory::{
        CompositionFactory, ConnectorFactory, DescriptorBaseFactory, DocumentFactory, HeadFactory,
        LinkFactory, RuleBaseFactory, TransitionBaseFactory,
    },
    identifier::Id,
    model::Handle,
};
use ncl_parser::{parse, parse_with};
use proptest::prelude::*;

const NEWS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Starts the caption together with the video. -->
<ncl id="news" xmlns="http://www.ncl.org.br/NCL3.0/EDTVProfile">
  <head>
    <transitionBase>
      <transition id="fade1" type="fade" dur="2s"/>
    </transitionBase>
    <descriptorBase>
      <descriptor id="dVideo" transIn="fade1"/>
    </descriptorBase>
    <connectorBase>
      <causalConnector id="onBeginStart">
        <simpleCondition role="onBegin"/>
        <simpleAction role="start" max="unbounded" qualifier="par"/>
      </causalConnector>
    </connectorBase>
  </head>
  <body>
    <port id="entry" component="video"/>
    <media id="video" src="video.mp4" descriptor="dVideo"/>
    <media id="caption" src="caption.txt"/>
    <link id="startCaption" xconnector="onBeginStart">
      <bind role="onBegin" component="video"/>
      <bind role="start" component="caption"/>
    </link>
  </body>
</ncl>
"#;

fn body(doc: &Document) -> Handle<Body> {
    let id = doc[doc.root()].body().first().expect("document has a body");
    doc.cast(id).expect("body element")
}

#[test]
fn test_parse_valid_document() {
    let mut doc = parse(NEWS).unwrap();

    assert!(doc.diagnostics(doc.root()).unwrap().is_empty());
    assert!(doc.validate());

    let video = doc.find_child::<_, Media>(body(&doc), "video").unwrap();
    let descriptor = doc[video].descriptor().unwrap();
    assert!(descriptor.is_resolved());
}

#[test]
fn test_serialization_is_stable() {
    let first = parse(NEWS).unwrap().to_ncl_string();
    let second = parse(&first).unwrap().to_ncl_string();

    assert_eq!(first, second);
    assert!(first.contains("\t\t\t\t<simpleAction role='start' max='unbounded' qualifier='par'/>\n"));
    // Nodes are ordered by id.
    let caption = first.find("<media id='caption'").unwrap();
    let video = first.find("<media id='video'").unwrap();
    assert!(caption < video);
}

#[test]
fn test_metadata_and_imports_round_trip() {
    let source = r#"<ncl id="doc">
  <head>
    <connectorBase>
      <importBase documentURI="connectors.ncl" alias="shared"/>
    </connectorBase>
  </head>
  <body>
    <meta name="title" content="News"/>
    <metadata>
      <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
        <rdf:Description rdf:about="news">
          <dc:creator>Newsroom</dc:creator>
        </rdf:Description>
      </rdf:RDF>
    </metadata>
  </body>
</ncl>"#;
    let mut doc = parse(source).unwrap();
    assert!(doc.diagnostics(doc.root()).unwrap().is_empty());
    assert!(doc.validate());

    let first = doc.to_ncl_string();
    let second = parse(&first).unwrap().to_ncl_string();
    assert_eq!(first, second);
    assert!(first.contains("\t\t\t<importBase documentURI='connectors.ncl' alias='shared'/>\n"));
    assert!(first.contains(
        "\t\t<metadata>\n\
         \t\t\t<rdf:RDF xmlns:rdf='http://www.w3.org/1999/02/22-rdf-syntax-ns#'>\n\
         \t\t\t\t<rdf:Description rdf:about='news'>\n\
         \t\t\t\t\t<dc:creator/>\n\
         \t\t\t\t</rdf:Description>\n\
         \t\t\t</rdf:RDF>\n\
         \t\t</metadata>\n"
    ));
}

#[test]
fn test_forward_reference_across_document() {
    let doc = parse(
        "<ncl id='fwd'>\
           <body><link id='l1' xconnector='later'/></body>\
           <head><connectorBase><causalConnector id='later'/></connectorBase></head>\
         </ncl>",
    )
    .unwrap();

    let link = doc.find_child::<_, Link>(body(&doc), "l1").unwrap();
    let reference = doc[link].xconnector().unwrap();
    let connector = doc
        .cast::<CausalConnector>(reference.target_id().unwrap())
        .unwrap();
    assert_eq!(doc[connector].id(), Some(reference.id()));
}

#[test]
fn test_unknown_content_is_a_warning_not_a_parse_error() {
    let doc = parse("<ncl id='doc'><body><region id='r1'/></body></ncl>").unwrap();

    let warnings = doc.warnings(doc.root());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), Some(ErrorCode::E103));
}

#[test]
fn test_markup_errors_fail() {
    let err = parse("<ncl><body></ncl").unwrap_err();

    assert!(!err.diagnostics().is_empty());
    assert!(
        err.diagnostics()
            .iter()
            .all(|diagnostic| diagnostic.offset().is_some())
    );
}

struct HtmlFactory;

impl CompositionFactory for HtmlFactory {
    fn create_media(&self) -> Media {
        let mut media = Media::new();
        media.set_media_type(Some("text/html"));
        media
    }
}

impl DocumentFactory for HtmlFactory {}
impl HeadFactory for HtmlFactory {}
impl RuleBaseFactory for HtmlFactory {}
impl TransitionBaseFactory for HtmlFactory {}
impl DescriptorBaseFactory for HtmlFactory {}
impl ConnectorFactory for HtmlFactory {}
impl LinkFactory for HtmlFactory {}

#[test]
fn test_parse_with_custom_factory() {
    let builder = DocumentBuilder::with_factory(HtmlFactory, ModelConfig::default());
    let doc = parse_with("<ncl><body><media id='page' src='index.html'/></body></ncl>", builder)
        .unwrap();

    let page = doc.find_child::<_, Media>(body(&doc), "page").unwrap();
    assert_eq!(doc[page].media_type(), Some("text/html"));
    assert!(
        doc.serialize(page, 0)
            .contains("src='index.html' type='text/html'")
    );
}

// ===================
// Strategies
// ===================

fn value_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,40}"
}

// ===================
// Properties
// ===================

/// Attribute text survives serialization and reading, whatever markup
/// characters it contains.
fn check_attribute_text_survives(value: &str) -> Result<(), TestCaseError> {
    let mut doc = Document::new();
    let mut media = Media::new();
    media.set_id(Id::parse("m").unwrap());
    let media = doc.create(media);
    let mut property = Property::new();
    property.set_name(Id::parse("label").unwrap());
    property.set_value(Some(value));
    let property = doc.create(property);
    prop_assert!(doc.add(media, property));

    let text = format!("<ncl><body>{}</body></ncl>", doc.serialize(media, 0));
    let parsed = parse(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;

    let media = parsed
        .find_child::<_, Media>(body(&parsed), "m")
        .ok_or_else(|| TestCaseError::fail("media missing"))?;
    let property = parsed
        .find_child::<_, Property>(media, "label")
        .ok_or_else(|| TestCaseError::fail("property missing"))?;
    prop_assert_eq!(parsed[property].value(), Some(value));
    Ok(())
}

proptest! {
    #[test]
    fn attribute_text_survives(value in value_strategy()) {
        check_attribute_text_survives(&value)?;
    }
}

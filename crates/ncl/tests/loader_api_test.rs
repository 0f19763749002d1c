use ncl::{
    DocumentLoader, NclError,
    config::{AppConfig, ModelConfig, ValidationConfig},
    elements::Context,
};

const VALID: &str = r#"
<ncl id="quiz">
  <head>
    <connectorBase>
      <causalConnector id="onSelectionStop">
        <connectorParam name="keyCode"/>
        <simpleCondition role="onSelection" key="$keyCode"/>
        <simpleAction role="stop"/>
      </causalConnector>
    </connectorBase>
  </head>
  <body>
    <media id="question" src="question.png"/>
    <media id="answer" src="answer.png"/>
    <link id="answered" xconnector="onSelectionStop">
      <linkParam name="keyCode" value="RED"/>
      <bind role="onSelection" component="answer"/>
      <bind role="stop" component="question"/>
    </link>
  </body>
</ncl>
"#;

#[test]
fn test_load_valid_document() {
    let loader = DocumentLoader::new(AppConfig::default());
    let document = loader.load(VALID).expect("valid document loads");

    assert!(document.diagnostics(document.root()).unwrap().is_empty());
}

#[test]
fn test_render_round_trip() {
    let loader = DocumentLoader::default();
    let document = loader.load(VALID).unwrap();

    let text = loader.render(&document);
    assert!(text.starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<ncl id='quiz'>\n"));
    assert!(text.contains("<simpleCondition role='onSelection' key='$keyCode'/>"));
    assert!(text.contains("<linkParam name='keyCode' value='RED'/>"));

    let reloaded = loader.load(&text).unwrap();
    assert_eq!(loader.render(&reloaded), text);
}

#[test]
fn test_load_rejects_errors() {
    let loader = DocumentLoader::default();
    let err = loader
        .load("<ncl id='loop'><body><context id='c1' refer='c1'/></body></ncl>")
        .unwrap_err();

    let NclError::Invalid { diagnostics } = &err else {
        panic!("expected an invalid document, got {err}");
    };
    assert_eq!(diagnostics.errors().len(), 1);
    assert!(err.to_string().starts_with("invalid document (1 errors, 0 warnings)"));
}

#[test]
fn test_warnings_pass_unless_denied() {
    // An empty rule base is only a warning.
    let source = "<ncl id='w'><head><ruleBase/></head></ncl>";

    let lenient = DocumentLoader::default();
    let document = lenient.load(source).unwrap();
    assert_eq!(document.warnings(document.root()).len(), 1);

    let strict = DocumentLoader::new(AppConfig::new(
        ModelConfig::default(),
        ValidationConfig::new(true, true),
    ));
    assert!(matches!(strict.load(source), Err(NclError::Invalid { .. })));
}

#[test]
fn test_unresolved_reference_is_reported() {
    let loader = DocumentLoader::new(AppConfig::new(
        ModelConfig::default(),
        ValidationConfig::new(true, true),
    ));
    let err = loader
        .load("<ncl id='u'><body><context id='c1' refer='missing'/></body></ncl>")
        .unwrap_err();

    let messages: Vec<_> = err.diagnostics().iter().map(|d| d.message()).collect();
    assert_eq!(
        messages,
        vec!["`context` `c1`: unresolved reference `missing` in attribute `refer`"]
    );
}

#[test]
fn test_validation_can_be_skipped() {
    let config = AppConfig::from_toml_str("[validation]\non_load = false").unwrap();
    let loader = DocumentLoader::new(config);

    let document = loader
        .load("<ncl><body><context id='c1' refer='c1'/></body></ncl>")
        .expect("loads without validation");
    let body = document[document.root()].body().first().unwrap();
    let context = document
        .child_ids(body)
        .into_iter()
        .find_map(|id| document.cast::<Context>(id))
        .unwrap();
    assert!(document[context].refer().unwrap().is_resolved());
    assert!(document.errors(document.root()).is_empty());
}

#[test]
fn test_parse_errors_pass_through() {
    let err = DocumentLoader::default().load("<ncl><body>").unwrap_err();

    assert!(matches!(err, NclError::Parse(_)));
    assert_eq!(err.diagnostics().len(), 2);
}

//! JSON serialization of parsed documents.

use pdf_structure::render::{from_json, to_json};
use pdf_structure::{parse_source, JsonFormat, MemorySource, SectionKind, TextContainer};

fn source() -> MemorySource {
    MemorySource::new(vec![
        TextContainer::single_line("Preface text before any heading.", 10.0, "Georgia", 0),
        TextContainer::single_line("Getting Started", 17.0, "Georgia-Bold", 0),
        TextContainer::single_line("Installation", 13.0, "Georgia-Bold", 0),
        TextContainer::single_line("Download the archive and unpack it.", 10.0, "Georgia", 0),
        TextContainer::single_line("Run the installer as usual.", 10.0, "Georgia", 1),
        TextContainer::single_line("Reference", 17.0, "Georgia-Bold", 1),
        TextContainer::single_line("All options are listed below.", 10.0, "Georgia", 1),
    ])
    .with_uri("manual.pdf")
}

#[test]
fn test_roundtrip_preserves_outline() {
    let doc = parse_source(&source()).unwrap();

    for format in [JsonFormat::Pretty, JsonFormat::Compact] {
        let json = to_json(&doc, format).unwrap();
        let restored = from_json(&json).unwrap();

        let before: Vec<_> = doc
            .in_order()
            .map(|s| (s.level, s.kind, s.heading_text().to_string()))
            .collect();
        let after: Vec<_> = restored
            .in_order()
            .map(|s| (s.level, s.kind, s.heading_text().to_string()))
            .collect();

        assert_eq!(before, after);
        assert_eq!(restored.metadata.filename.as_deref(), Some("manual.pdf"));
        assert_eq!(restored.title(), doc.title());
        assert_eq!(restored.style_distribution(), doc.style_distribution());
    }
}

#[test]
fn test_json_shape() {
    let doc = parse_source(&source()).unwrap();
    let json = to_json(&doc, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let elements = value["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0]["kind"], "dangling");
    assert!(elements[0]["heading"].is_null());
    assert_eq!(elements[1]["kind"], "heading");
    assert_eq!(elements[1]["heading"]["text"], "Getting Started");
    assert_eq!(elements[1]["children"][0]["level"], 1);
}

#[test]
fn test_kinds_inferred_without_kind_field() {
    let json = r#"{
        "elements": [{
            "heading": {"text": "Scope", "style": {
                "font_name": "Arial-Bold", "bold": true, "italic": false,
                "mapped_font_size": "large", "mean_size": 14.0, "max_size": 14.0}},
            "level": 0,
            "children": [{
                "heading": {"text": "Applies to all sites.", "style": {
                    "font_name": "Arial", "bold": false, "italic": false,
                    "mapped_font_size": "middle", "mean_size": 10.0, "max_size": 10.0}},
                "level": 1
            }]
        }],
        "metadata": {}
    }"#;

    let doc = from_json(json).unwrap();
    assert_eq!(doc.elements[0].kind, SectionKind::Heading);
    assert_eq!(doc.elements[0].children[0].kind, SectionKind::Content);
}

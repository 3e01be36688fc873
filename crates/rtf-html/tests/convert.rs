//! End-to-end conversion tests through the public API.

use pretty_assertions::assert_eq;
use rtf_html::{
    BreakKind, Color, ConvertError, ConvertScope, Document, HtmlBackend, HtmlConverter,
    HtmlSettings, ImageFormat, ImageSettings, MarkupSink, MarkupWriter, SemanticHtmlBackend,
    SpecialCharKind, Strikethrough, Style, TextAlignment, Underline, Visual, VisualImage,
    WriteError, to_html,
};

fn content_only() -> HtmlSettings {
    HtmlSettings::default().with_scope(ConvertScope::content())
}

fn convert(settings: HtmlSettings, visuals: Vec<Visual>) -> String {
    let result = HtmlConverter::<HtmlBackend>::new(settings)
        .unwrap()
        .convert(&Document::new(visuals))
        .unwrap();
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    result.html
}

fn marker(kind: SpecialCharKind) -> Visual {
    Visual::special(kind)
}

fn list_item(glyph: &str, text: &str) -> Vec<Visual> {
    vec![
        marker(SpecialCharKind::ParagraphNumberBegin),
        Visual::plain(glyph),
        marker(SpecialCharKind::ParagraphNumberEnd),
        Visual::plain(text),
    ]
}

/// Counts element starts and ends instead of writing anything.
#[derive(Default)]
struct CountingSink {
    starts: usize,
    ends: usize,
    max_depth: usize,
}

impl MarkupSink for CountingSink {
    fn doc_type(&mut self, _name: &str) -> Result<(), WriteError> {
        Ok(())
    }

    fn start_element(&mut self, _name: &str) -> Result<(), WriteError> {
        self.starts += 1;
        self.max_depth = self.max_depth.max(self.starts - self.ends);
        Ok(())
    }

    fn attribute(&mut self, _name: &str, _value: &str) -> Result<(), WriteError> {
        Ok(())
    }

    fn text(&mut self, _text: &str) -> Result<(), WriteError> {
        Ok(())
    }

    fn raw_text(&mut self, _text: &str) -> Result<(), WriteError> {
        Ok(())
    }

    fn entity_ref(&mut self, _name: &str) -> Result<(), WriteError> {
        Ok(())
    }

    fn whitespace(&mut self, _ws: &str) -> Result<(), WriteError> {
        Ok(())
    }

    fn end_element(&mut self) -> Result<(), WriteError> {
        self.ends += 1;
        Ok(())
    }

    fn full_end_element(&mut self) -> Result<(), WriteError> {
        self.ends += 1;
        Ok(())
    }
}

#[test]
fn test_hello_world_document() {
    let document = Document::new(vec![Visual::plain("Hello, World!")]);
    let html = to_html(&document, &HtmlSettings::default()).unwrap();
    assert_eq!(
        html,
        concat!(
            "<!DOCTYPE html><html><head>",
            r#"<meta http-equiv="content-type" content="text/html; charset=UTF-8" />"#,
            "</head><body><p>Hello, World!</p></body></html>"
        )
    );
}

#[test]
fn test_balance_across_mixed_content() {
    let mut visuals = vec![
        Visual::text("Title", Style::default().with_bold().with_italic()),
        Visual::Break(BreakKind::Paragraph),
        Visual::Break(BreakKind::Paragraph),
    ];
    visuals.extend(list_item("1.", "one"));
    visuals.push(Visual::Break(BreakKind::Line));
    visuals.push(Visual::Image(VisualImage::new(0, ImageFormat::Png, 720, 720)));
    visuals.push(Visual::Break(BreakKind::Paragraph));
    visuals.extend(list_item("2.", "two"));
    visuals.push(marker(SpecialCharKind::ObjectAttachPoint));
    visuals.push(Visual::Break(BreakKind::Section));
    visuals.extend(list_item("\u{2022}", "bullet"));
    visuals.push(Visual::Break(BreakKind::Paragraph));
    visuals.push(Visual::text(
        "tail",
        Style::default().with_underline(Underline::Wave).with_subscript(),
    ));
    let document = Document::new(visuals);

    let converter = HtmlConverter::<HtmlBackend>::new(HtmlSettings::default()).unwrap();
    let mut sink = CountingSink::default();
    let warnings = converter.convert_into(&document, &mut sink).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(sink.starts, sink.ends);
    assert!(sink.max_depth > 3);
}

#[test]
fn test_balance_for_every_prefix() {
    let mut visuals = list_item("\u{2022}", "Item");
    visuals.push(Visual::Break(BreakKind::Paragraph));
    visuals.extend(list_item("\u{2022}", "Item2"));
    visuals.push(Visual::Break(BreakKind::Paragraph));
    visuals.push(Visual::plain("After"));
    visuals.push(Visual::Break(BreakKind::Paragraph));

    let converter = HtmlConverter::<HtmlBackend>::new(HtmlSettings::default()).unwrap();
    for len in 0..=visuals.len() {
        let document = Document::new(visuals[..len].to_vec());
        let mut sink = CountingSink::default();
        let warnings = converter.convert_into(&document, &mut sink).unwrap();
        assert!(warnings.is_empty(), "prefix {len}: {warnings:?}");
        assert_eq!(sink.starts, sink.ends, "prefix {len}");
    }
}

#[test]
fn test_scope_stages_are_independent() {
    let visuals = vec![Visual::plain("x")];
    let full = convert(HtmlSettings::default().with_title("T"), visuals.clone());
    let content = convert(content_only().with_title("T"), visuals.clone());
    let head_only = convert(
        HtmlSettings::default()
            .with_title("T")
            .with_scope(ConvertScope {
                head: true,
                ..ConvertScope::none()
            }),
        visuals.clone(),
    );
    let without_doctype = convert(
        HtmlSettings::default()
            .with_title("T")
            .with_scope(ConvertScope {
                document: false,
                ..ConvertScope::all()
            }),
        visuals,
    );

    assert_eq!(content, "<p>x</p>");
    assert!(full.contains(&format!("<body>{content}</body>")));
    assert!(full.contains(&head_only));
    assert_eq!(format!("<!DOCTYPE html>{without_doctype}"), full);
}

#[test]
fn test_bulleted_list() {
    let mut visuals = list_item("\u{2022}", "Item");
    visuals.push(Visual::Break(BreakKind::Paragraph));
    visuals.extend(list_item("\u{2022}", "Item2"));
    visuals.push(marker(SpecialCharKind::ParagraphNumberEnd));

    let html = convert(content_only(), visuals);
    assert_eq!(html, "<ul><li>Item</li><li>Item2</li></ul>");
    assert_eq!(html.matches("<ul>").count(), 1);
    assert_eq!(html.matches("</ul>").count(), 1);
}

#[test]
fn test_list_kind_from_marker() {
    for (glyph, tag) in [("\u{b7}", "ul"), ("\u{2022}", "ul"), ("1.", "ol"), ("iv)", "ol")] {
        let html = convert(content_only(), list_item(glyph, "x"));
        assert_eq!(html, format!("<{tag}><li>x</li></{tag}>"), "marker {glyph:?}");
    }
}

#[test]
fn test_list_between_paragraphs() {
    let mut visuals = vec![Visual::plain("Before"), Visual::Break(BreakKind::Paragraph)];
    visuals.extend(list_item("1.", "First"));
    visuals.push(Visual::Break(BreakKind::Paragraph));
    visuals.extend(list_item("2.", "Second"));
    visuals.push(Visual::Break(BreakKind::Paragraph));
    visuals.push(Visual::plain("After"));

    assert_eq!(
        convert(content_only(), visuals),
        "<p>Before</p><ol><li>First</li><li>Second</li></ol><p>After</p>"
    );
}

#[test]
fn test_style_nesting() {
    let format = Style::default()
        .with_bold()
        .with_italic()
        .with_underline(Underline::Continuous)
        .with_background(Color::new(255, 255, 0));
    assert_eq!(
        convert(content_only(), vec![Visual::text("x", format)]),
        r#"<p><b><i><u><span style="background-color:#ffff00">x</span></u></i></b></p>"#
    );
}

#[test]
fn test_default_colors_not_styled() {
    let format = Style::default()
        .with_foreground(Color::BLACK)
        .with_background(Color::WHITE);
    assert_eq!(
        convert(content_only(), vec![Visual::text("x", format)]),
        "<p>x</p>"
    );
}

#[test]
fn test_hidden_text() {
    let hidden = Style::default().with_hidden();
    let visuals = vec![
        Visual::plain("shown "),
        Visual::text("hidden", hidden),
        Visual::plain(" shown"),
    ];
    assert_eq!(
        convert(content_only(), visuals.clone()),
        "<p>shown  shown</p>"
    );
    assert_eq!(
        convert(content_only().with_hidden_text(true), visuals),
        "<p>shown hidden shown</p>"
    );
}

#[test]
fn test_empty_paragraph() {
    assert_eq!(
        convert(content_only(), vec![Visual::Break(BreakKind::Paragraph)]),
        "<p>&nbsp;</p>"
    );
}

#[test]
fn test_subscript_and_superscript() {
    let both = Style::default().with_subscript().with_superscript();
    let sup = Style::default().with_superscript();
    assert_eq!(
        convert(
            content_only(),
            vec![Visual::plain("H"), Visual::text("2", both), Visual::text("n", sup)]
        ),
        "<p>H<sub>2</sub><sup>n</sup></p>"
    );
}

#[test]
fn test_visual_hyperlinks() {
    let settings = content_only().with_visual_hyperlinks(true);
    let visuals = vec![
        Visual::plain("Visit "),
        Visual::plain("http://www.example.org/docs"),
        Visual::plain(" today"),
    ];
    assert_eq!(
        convert(settings, visuals),
        r#"<p>Visit <a href="http://www.example.org/docs">http://www.example.org/docs</a> today</p>"#
    );
}

#[test]
fn test_custom_hyperlink_pattern() {
    let settings = content_only()
        .with_visual_hyperlinks(true)
        .with_visual_hyperlink_pattern(r"mailto:\S+");
    assert_eq!(
        convert(settings, vec![Visual::plain("mailto:someone@example.org")]),
        r#"<p><a href="mailto:someone@example.org">mailto:someone@example.org</a></p>"#
    );
}

#[test]
fn test_malformed_hyperlink_pattern() {
    let settings = content_only()
        .with_visual_hyperlinks(true)
        .with_visual_hyperlink_pattern("[a-");
    let err = to_html(&Document::default(), &settings).unwrap_err();
    assert!(matches!(err, ConvertError::HyperlinkPattern(_)));
}

#[test]
fn test_images_with_settings() {
    let settings = content_only().with_images(ImageSettings {
        file_name_pattern: "figure-{index}.{ext}".to_owned(),
        base_path: Some("assets/".to_owned()),
        dpi: 72,
    });
    let image = VisualImage::new(2, ImageFormat::Jpeg, 2880, 1440)
        .with_alignment(TextAlignment::Right)
        .with_scale(50, 50);
    assert_eq!(
        convert(settings, vec![Visual::Image(image)]),
        r#"<p style="text-align:right"><img width="72" height="36" src="assets/figure-2.jpg" /></p>"#
    );
}

#[test]
fn test_special_characters_in_list_item() {
    let mut visuals = list_item("\u{2022}", "a");
    visuals.push(marker(SpecialCharKind::EnDash));
    visuals.push(marker(SpecialCharKind::NonBreakingHyphen));
    visuals.push(Visual::plain("b"));
    assert_eq!(
        convert(content_only(), visuals),
        "<ul><li>a&ndash;&#8209;b</li></ul>"
    );
}

#[test]
fn test_semantic_backend_document() {
    let format = Style::default()
        .with_bold()
        .with_strikethrough(Strikethrough::Double);
    let result = HtmlConverter::<SemanticHtmlBackend>::new(content_only())
        .unwrap()
        .convert(&Document::new(vec![Visual::text("gone", format)]))
        .unwrap();
    assert_eq!(result.html, "<p><strong><del>gone</del></strong></p>");
}

#[test]
fn test_convert_into_existing_buffer() {
    let converter = HtmlConverter::<HtmlBackend>::new(content_only()).unwrap();
    let document = Document::new(vec![Visual::plain("embedded")]);

    let mut buffer = String::from(r#"<div class="rtf">"#);
    let mut writer = MarkupWriter::from_sink(&mut buffer);
    let warnings = converter.convert_into(&document, &mut writer).unwrap();
    writer.finish().unwrap();
    buffer.push_str("</div>");

    assert!(warnings.is_empty());
    assert_eq!(buffer, r#"<div class="rtf"><p>embedded</p></div>"#);
}

#[test]
fn test_settings_from_toml() {
    let settings = HtmlSettings::from_toml_str(
        r#"
title = "Report"
convert_visual_hyperlinks = true

[scope]
document = false
html = false

[[styles]]
selector = "p"
properties = { margin = "0" }
"#,
    )
    .unwrap();

    let html = convert(settings, vec![Visual::plain("https://example.com")]);
    assert_eq!(
        html,
        concat!(
            r#"<head><meta http-equiv="content-type" content="text/html; charset=UTF-8" />"#,
            "<title>Report</title><style>p {\r\n  margin: 0;\r\n}</style></head>",
            r#"<body><p><a href="https://example.com">https://example.com</a></p></body>"#
        )
    );
}

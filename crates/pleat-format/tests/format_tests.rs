//! Integration tests for parse-then-render formatting.

use pleat_common::{DiagnosticKind, Severity};
use pleat_format::{FormatConfig, format, format_with_diagnostics, render};
use pleat_markup::parse;
use pretty_assertions::assert_eq;

fn pretty(markup: &str) -> String {
    format(markup, &FormatConfig::default())
}

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>T</title></head>
<body><div class="a"><p>Hello <b>x</b></p></div></body></html>"#;

const PAGE_PRETTY: &str = r#"<!DOCTYPE html>
<html>
   <head>
      <title>T</title>
   </head>
   <body>
      <div class="a">
         <p>Hello <b>x</b></p>
      </div>
   </body>
</html>"#;

// ========== layout ==========

#[test]
fn test_page_is_stacked() {
    assert_eq!(pretty(PAGE), PAGE_PRETTY);
}

#[test]
fn test_whitespace_only_children_are_dropped() {
    assert_eq!(pretty("<div>   <p>x</p>   </div>"), "<div>\n   <p>x</p>\n</div>");
}

#[test]
fn test_pre_content_is_preserved() {
    assert_eq!(
        pretty("<div><pre>  a   b  </pre></div>"),
        "<div>\n   <pre>  a   b  </pre>\n</div>"
    );
}

#[test]
fn test_top_level_pre_is_preserved() {
    assert_eq!(pretty("<pre>  a  </pre>"), "<pre>  a  </pre>");
    assert_eq!(pretty("<p>\n  hi\n</p>"), "<p>\n  hi\n</p>");
}

#[test]
fn test_preservation_propagates_to_descendants() {
    // nothing below a whitespace-sensitive element is stacked or trimmed
    assert_eq!(
        pretty("<pre><div> <b>x</b> </div></pre>"),
        "<pre><div> <b>x</b> </div></pre>"
    );
}

#[test]
fn test_preservation_does_not_leak_to_siblings() {
    assert_eq!(
        pretty("<div><pre> a </pre><td> b </td></div>"),
        "<div>\n   <pre> a </pre>\n   <td>b</td>\n</div>"
    );
}

#[test]
fn test_text_is_trimmed_in_inline_elements() {
    assert_eq!(pretty("<div>  hello  </div>"), "<div>hello</div>");
    assert_eq!(pretty("<td> a <i>b</i> </td>"), "<td>a<i>b</i></td>");
}

#[test]
fn test_empty_element_is_inline() {
    assert_eq!(pretty("<div>\n\n</div>"), "<div></div>");
}

#[test]
fn test_inline_element_keeps_stacked_descendant_lines() {
    assert_eq!(
        pretty("<section><div>hi<ul><li>a</li></ul></div></section>"),
        "<section>\n   <div>hi<ul>\n      <li>a</li>\n   </ul></div>\n</section>"
    );
}

#[test]
fn test_comments_are_stacked_with_elements() {
    assert_eq!(
        pretty("<div><!-- note --><p>x</p></div>"),
        "<div>\n   <!-- note -->\n   <p>x</p>\n</div>"
    );
}

#[test]
fn test_comments_can_be_dropped() {
    let config = FormatConfig {
        include_comments: false,
        ..FormatConfig::default()
    };
    assert_eq!(
        format("<div><!-- note --><p>x</p></div>", &config),
        "<div>\n   <p>x</p>\n</div>"
    );
    assert_eq!(format("<!-- c -->\n<p>x</p>", &config), "<p>x</p>");
}

#[test]
fn test_script_content_is_trimmed_but_not_reindented() {
    assert_eq!(
        pretty("<head><script>\n  var a = 1;\n  var b = 2;\n</script></head>"),
        "<head>\n   <script>var a = 1;\n  var b = 2;</script>\n</head>"
    );
}

#[test]
fn test_xml_document() {
    assert_eq!(
        pretty("<?xml version=\"1.0\"?>\n<root><item id=\"1\"/><item id=\"2\"/></root>"),
        "<?xml version=\"1.0\"?>\n<root>\n   <item id=\"1\"/>\n   <item id=\"2\"/>\n</root>"
    );
}

#[test]
fn test_top_level_text_gets_its_own_line() {
    assert_eq!(pretty("hello <b>x</b>"), "hello\n<b>x</b>");
}

#[test]
fn test_custom_indent() {
    let config = FormatConfig {
        indent_unit: "\t".to_string(),
        ..FormatConfig::default()
    };
    assert_eq!(
        format("<ul><li>a</li><li>b</li></ul>", &config),
        "<ul>\n\t<li>a</li>\n\t<li>b</li>\n</ul>"
    );
}

// ========== attributes ==========

#[test]
fn test_attribute_value_forms() {
    assert_eq!(
        pretty("<input disabled value='x'>"),
        "<input disabled value=\"x\">"
    );
}

#[test]
fn test_self_closing_spacing_is_normalized() {
    assert_eq!(pretty("<br />"), "<br/>");
}

#[test]
fn test_indent_attributes() {
    let config = FormatConfig {
        indent_attributes: true,
        ..FormatConfig::default()
    };
    assert_eq!(
        format("<div id=\"main\" class=\"c\"><span>x</span></div>", &config),
        "<div\n   id=\"main\"\n   class=\"c\">\n   <span>x</span>\n</div>"
    );
    assert_eq!(format("<br>", &config), "<br>");
}

#[test]
fn test_recovered_open_tag_in_stacked_element() {
    let once = pretty("<div attr=unquoted><b>y</b></div>");
    assert_eq!(once, "<div attr=unquoted>\n   <b>y</b>\n</div>");
    assert_eq!(pretty(&once), once);
}

// ========== minify ==========

#[test]
fn test_minify() {
    let markup = "<div>\n  <ul>\n    <li>One</li>\n    <li>Two</li>\n  </ul>\n  <pre> keep  this </pre>\n</div>";
    assert_eq!(
        format(markup, &FormatConfig::minified()),
        "<div><ul><li>One</li><li>Two</li></ul><pre> keep  this </pre></div>"
    );
}

#[test]
fn test_minify_ignores_indent_attributes() {
    let config = FormatConfig {
        indent_attributes: true,
        ..FormatConfig::minified()
    };
    assert_eq!(
        format("<a href=\"/\" title=\"t\">home</a>\n<hr>", &config),
        "<a href=\"/\" title=\"t\">home</a><hr>"
    );
}

// ========== malformed input ==========

#[test]
fn test_mismatched_close_tag_renders_original_name() {
    let (output, diagnostics) = format_with_diagnostics("<a><b></a>", &FormatConfig::default());
    assert_eq!(output, "<a><b></a>");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0].kind,
        DiagnosticKind::MismatchedCloseTag { .. }
    ));
}

#[test]
fn test_unclosed_element_has_no_closing_line() {
    assert_eq!(pretty("<div><p>x</p>"), "<div>\n   <p>x</p>");
}

#[test]
fn test_recovered_open_tag_round_trips() {
    assert_eq!(pretty("<div class=bar>x</div>"), "<div class=bar>x</div>");
}

#[test]
fn test_unterminated_comment_is_emitted() {
    let (output, diagnostics) =
        format_with_diagnostics("<p>a</p>\n<!-- never closed", &FormatConfig::default());
    assert_eq!(output, "<p>a</p>\n<!-- never closed");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_trailing_text_is_reported_not_rendered() {
    let (output, diagnostics) =
        format_with_diagnostics("<p>x</p></div>", &FormatConfig::default());
    assert_eq!(output, "<p>x</p>");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::TrailingText);
}

#[test]
fn test_render_reuses_parsed_tree() {
    let parsed = parse("<ul><li>a</li></ul>");
    assert_eq!(
        render(&parsed.tree, &FormatConfig::default()),
        "<ul>\n   <li>a</li>\n</ul>"
    );
    assert_eq!(
        render(&parsed.tree, &FormatConfig::minified()),
        "<ul><li>a</li></ul>"
    );
}

// ========== idempotence ==========

#[test]
fn test_formatting_is_idempotent() {
    let samples = [
        PAGE,
        "<div>   <p>x</p>   </div>",
        "<section><div>hi<ul><li>a</li></ul></div></section>",
        "<head><script>\n  var a = 1;\n  var b = 2;\n</script></head>",
        "<div><pre>\n  a\n    b\n</pre><br></div>",
        "<table><tr><td> a </td><td><span> b </span></td></tr></table>",
        "<?xml version=\"1.0\"?><root><!-- c --><item/></root>",
        "<div attr=unquoted><b>y</b></div>",
        "<ul><li class=a b>x</li><li>y</li></ul>",
    ];
    let config = FormatConfig::default();
    for sample in samples {
        let once = format(sample, &config);
        let twice = format(&once, &config);
        assert_eq!(once, twice, "not idempotent for {sample:?}");
    }
}

#[test]
fn test_pretty_output_is_a_fixed_point() {
    assert_eq!(pretty(PAGE_PRETTY), PAGE_PRETTY);

    let config = FormatConfig {
        indent_attributes: true,
        ..FormatConfig::default()
    };
    let once = format("<form action=\"/x\" method=\"post\"><input name=\"q\"></form>", &config);
    assert_eq!(format(&once, &config), once);
}

// ========== deep nesting ==========

#[test]
fn test_unclosed_list_items_format_inline() {
    let items = 50_000;
    let markup = format!("<ul>\n{}</ul>", "<li>item\n".repeat(items));
    let (output, diagnostics) = format_with_diagnostics(&markup, &FormatConfig::default());
    assert_eq!(diagnostics.len(), items);
    assert_eq!(output, format!("<ul>\n   {}\n</ul>", "<li>item".repeat(items)));
}

#[test]
fn test_deeply_nested_preserved_elements() {
    let markup = "<span>\n".repeat(50_000);
    assert_eq!(pretty(&markup), markup.trim_end());
    assert_eq!(
        format(&markup, &FormatConfig::minified()),
        markup.trim_end()
    );
}

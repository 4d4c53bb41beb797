mod common;

use common::{FOO_BAR_LINK, FOO_LINK, Fixture};
use doclink_core::{Element, MarkupMode, PlainHighlighter, RenderConfig};

#[test]
fn unresolved_type_names_stay_plain() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let global = Element::global();
    assert_eq!(renderer.type_links("int|string", &global), "int|string");
    assert_eq!(renderer.type_links("<T>[]", &global), "&lt;T&gt;");
}

#[test]
fn resolved_type_names_link_and_keep_array_suffix() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    assert_eq!(
        renderer.type_links("Foo[]|null", &Element::global()),
        format!("{}[]|null", FOO_LINK)
    );
}

#[test]
fn resolve_link_wraps_only_resolved_references() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let global = Element::global();
    assert_eq!(
        renderer.resolve_link("Foo[]", &global),
        format!("<code>{}[]</code>", FOO_LINK)
    );
    assert_eq!(renderer.resolve_link("\\Missing\\Thing[]", &global), "Missing\\Thing");
    assert_eq!(renderer.resolve_link("<Bad>", &global), "&lt;Bad&gt;");
}

#[test]
fn resolve_link_uses_the_alias_expansion_as_guess() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let user = fixture.element("App\\Model\\User");
    assert_eq!(
        renderer.resolve_link("Carbon::now", &user),
        "Vendor\\Time\\Carbon::now"
    );
    assert_eq!(
        renderer.resolve_link("Carbon", &user),
        "<code><a href=\"class-Vendor.Time.Carbon.html\">Vendor\\Time\\Carbon</a></code>"
    );
}

#[test]
fn links_carry_deprecated_and_invalid_classes() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    assert_eq!(
        renderer.resolve_link("App\\Legacy", &Element::global()),
        "<code><a href=\"class-App.Legacy.html\" class=\"deprecated invalid\">App\\Legacy</a></code>"
    );
}

#[test]
fn link_tag_and_license_render_the_same_external_link() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let global = Element::global();
    let expected = "<a href=\"http://example.com\">label</a>";
    assert_eq!(
        renderer.doc("{@link http://example.com label}", &global, MarkupMode::Line),
        expected
    );
    assert_eq!(
        renderer.annotation("license", "http://example.com label", &global),
        expected
    );
}

#[test]
fn link_tags_decode_entities_before_linking() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    assert_eq!(
        renderer.doc(
            "{@link http://example.com/?a=1&b=2 Query}",
            &Element::global(),
            MarkupMode::Line
        ),
        "<a href=\"http://example.com/?a=1&amp;b=2\">Query</a>"
    );
}

#[test]
fn link_tag_descriptions_keep_their_markup() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let global = Element::global();
    assert_eq!(
        renderer.doc("{@link http://example.com *the* docs}", &global, MarkupMode::Line),
        "<a href=\"http://example.com\"><em>the</em> docs</a>"
    );
    assert_eq!(
        renderer.doc("{@link http://example.com `code` docs}", &global, MarkupMode::Block),
        "<p><a href=\"http://example.com\"><code>code</code> docs</a></p>"
    );
    assert_eq!(
        renderer.doc("{@link http://example.com/a_b}", &global, MarkupMode::Line),
        "<a href=\"http://example.com/a_b\">http://example.com/a_b</a>"
    );
}

#[test]
fn escaped_markup_renders_the_same_twice() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let global = Element::global();
    for (text, expected) in [
        ("\\*x\\*", "&#42;x&#42;"),
        ("`` `a` ``", "<code>&#96;a&#96;</code>"),
        ("\\[a\\](b)", "&#91;a&#93;(b)"),
    ] {
        let once = renderer.doc(text, &global, MarkupMode::Line);
        assert_eq!(once, expected);
        assert_eq!(renderer.doc(&once, &global, MarkupMode::Line), once);
    }
}

#[test]
fn link_tags_to_namespaced_symbols() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let link = renderer.doc(
        "See {@link App\\Model\\User}",
        &Element::global(),
        MarkupMode::Line,
    );
    assert!(link.contains("class-App.Model.User.html"), "{}", link);
    assert_eq!(
        renderer.doc("See {@link Foo_Missing}", &Element::global(), MarkupMode::Line),
        "See Foo&#95;Missing"
    );
}

#[test]
fn link_tags_to_symbols() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let global = Element::global();
    assert_eq!(
        renderer.doc("See {@link Foo::bar()} now", &global, MarkupMode::Line),
        format!("See <code>{}</code> now", FOO_BAR_LINK)
    );
    assert_eq!(
        renderer.doc("See {@see Nope the thing} now", &global, MarkupMode::Line),
        "See Nope now"
    );
    assert_eq!(
        renderer.doc("Blank {@link   } tag", &global, MarkupMode::Line),
        "Blank {@link   } tag"
    );
}

#[test]
fn internal_tags_follow_the_config_flag() {
    let fixture = Fixture::new();
    let global = Element::global();
    let hidden = fixture.renderer();
    let shown = fixture.renderer_with(RenderConfig {
        show_internal: true,
        ..RenderConfig::default()
    });
    assert_eq!(hidden.doc("{@internal secret}", &global, MarkupMode::Line), "");
    assert_eq!(shown.doc("{@internal secret}", &global, MarkupMode::Line), "secret");
    assert_eq!(
        shown.doc("{@internal *secret*}", &global, MarkupMode::Line),
        "<em>secret</em>"
    );
}

#[test]
fn internal_content_is_processed_before_link_tags() {
    let fixture = Fixture::new();
    let shown = fixture.renderer_with(RenderConfig {
        show_internal: true,
        ..RenderConfig::default()
    });
    assert_eq!(
        shown.doc("{@internal uses {@link Foo}}", &Element::global(), MarkupMode::Line),
        format!("uses <code>{}</code>", FOO_LINK)
    );
}

#[test]
fn block_mode_keeps_paragraphs() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    assert_eq!(
        renderer.doc("Para one.\n\nUses {@see Foo}.", &Element::global(), MarkupMode::Block),
        format!("<p>Para one.</p>\n<p>Uses <code>{}</code>.</p>", FOO_LINK)
    );
}

#[test]
fn descriptions_render_in_their_own_context() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let user = fixture.element("App\\Model\\User");
    assert_eq!(
        renderer.short_description(&user, MarkupMode::Line),
        "A <em>registered</em> user."
    );
    assert_eq!(
        renderer.long_description(&user),
        "<p>Users own carts. Each cart belongs to one user.</p>\n<pre>keep\n    indent</pre>"
    );
}

#[test]
fn highlight_code_links_single_symbols() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer();
    let global = Element::global();
    assert_eq!(
        renderer.highlight_code(" Foo[] ", &global, &PlainHighlighter),
        format!("<code>{}[]</code>", FOO_LINK)
    );
    assert_eq!(
        renderer.highlight_code("$a = new Foo() < 1;", &global, &PlainHighlighter),
        "$a = new Foo() &lt; 1;"
    );
    assert_eq!(
        renderer.highlight_code("Unknown", &global, &PlainHighlighter),
        "Unknown"
    );
}

#[test]
fn sanitize_strips_unsafe_markup() {
    let fixture = Fixture::new();
    let renderer = fixture.renderer_with(RenderConfig {
        sanitize: true,
        ..RenderConfig::default()
    });
    let html = renderer.doc(
        "<script>alert(1)</script>\n\nSee {@link Foo}.",
        &Element::global(),
        MarkupMode::Block,
    );
    assert!(!html.contains("<script"), "{}", html);
    assert!(html.contains(FOO_LINK), "{}", html);
}

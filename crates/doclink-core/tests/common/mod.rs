#![allow(dead_code)]

use doclink_core::{
    CommonMark, DocRenderer, Element, HtmlLinks, RenderConfig, SymbolTable,
};

pub struct Fixture {
    pub table: SymbolTable,
    pub links: HtmlLinks,
    pub markup: CommonMark,
}

impl Fixture {
    pub fn new() -> Self {
        let mut table = SymbolTable::new();
        table
            .add_class(Element::class("Foo"), None)
            .add_member(Element::method("Foo", "bar"))
            .add_member(Element::property("Foo", "baz"));
        table
            .add_class(
                Element::class("App\\Model\\User")
                    .with_alias("Carbon", "Vendor\\Time\\Carbon")
                    .with_descriptions(
                        "A *registered* user.",
                        "Users own carts.\n    Each cart belongs to\n\tone user.\n\n<pre>keep\n    indent</pre>",
                    ),
                None,
            )
            .add_member(Element::method("App\\Model\\User", "save"));
        table.add_class(Element::class("App\\Legacy").deprecated(true).valid(false), None);
        table.add_class(Element::class("Vendor\\Time\\Carbon"), None);
        table.add_function(Element::function("App\\helper"));

        Self {
            table,
            links: HtmlLinks::new(),
            markup: CommonMark::new(),
        }
    }

    pub fn renderer(&self) -> DocRenderer<'_> {
        self.renderer_with(RenderConfig::default())
    }

    pub fn renderer_with(&self, config: RenderConfig) -> DocRenderer<'_> {
        DocRenderer::new(&self.table, &self.links, &self.markup, config)
    }

    pub fn element(&self, path: &str) -> Element {
        self.table
            .element(path)
            .cloned()
            .unwrap_or_else(|| panic!("fixture element {}", path))
    }
}

pub const FOO_LINK: &str = "<a href=\"class-Foo.html\">Foo</a>";
pub const FOO_BAR_LINK: &str = "<a href=\"class-Foo.html#_bar\">Foo::bar()</a>";

//! page! macro: parse markup and generate pagebox builder calls.

use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Expr, Ident, Lit, Path, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// An attribute value: a literal or a braced expression.
#[derive(Clone)]
pub(crate) enum AttrValue {
    Lit(Lit),
    Expr(Expr),
}

impl ToTokens for AttrValue {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            AttrValue::Lit(lit) => lit.to_tokens(tokens),
            AttrValue::Expr(expr) => expr.to_tokens(tokens),
        }
    }
}

/// A parsed attribute: `name=value`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: Ident,
    pub value: AttrValue,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name.to_string())
            .field("value", &self.value.to_token_stream().to_string())
            .finish()
    }
}

/// A parsed element: `<Tag attrs... />` or `<Tag attrs...> children </Tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Path,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

impl Element {
    fn tag_name(&self) -> String {
        self.tag.to_token_stream().to_string()
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag_name())
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The whole page! input: `builder => elements...`.
struct PageInput {
    builder: Expr,
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Constructor arguments
// ---------------------------------------------------------------------------

/// Built-in widgets whose `::new()` takes an attribute value.
const CONSTRUCTOR_ATTRS: &[(&str, &str)] = &[
    ("Text", "value"),
    ("TextButton", "text"),
    ("ElevatedButton", "text"),
    ("Icon", "name"),
    ("Tab", "text"),
];

/// Attribute that names the constructor argument for any widget.
const EXPLICIT_CTOR: &str = "new";

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for PageInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let builder = Expr::parse_without_eager_brace(input)?;
        input.parse::<Token![=>]>()?;
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(PageInput { builder, elements })
    }
}

fn parse_value(input: ParseStream) -> Result<AttrValue> {
    if input.peek(syn::token::Brace) {
        let content;
        braced!(content in input);
        Ok(AttrValue::Expr(content.parse()?))
    } else {
        Ok(AttrValue::Lit(input.parse()?))
    }
}

/// Parse one element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag = Path::parse_mod_style(input)?;

    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = parse_value(input)?;
        if attrs.iter().any(|a: &Attribute| a.name == name) {
            return Err(Error::new(name.span(), format!("duplicate attribute `{name}`")));
        }
        attrs.push(Attribute { name, value });
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing = Path::parse_mod_style(input)?;
            let (open, close) = (tag.to_token_stream().to_string(), closing.to_token_stream().to_string());
            if open != close {
                return Err(Error::new_spanned(
                    &closing,
                    format!("mismatched closing tag: expected `</{open}>`, found `</{close}>`"),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else {
            return Err(input.error("expected `<` to start a child element or `</` to close the parent"));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// The constructor attribute for `elem`, if any.
fn constructor_attr(elem: &Element) -> Option<&Attribute> {
    if let Some(explicit) = elem.attrs.iter().find(|a| a.name == EXPLICIT_CTOR) {
        return Some(explicit);
    }
    let ident = elem.tag.get_ident()?.to_string();
    let (_, attr) = CONSTRUCTOR_ATTRS.iter().find(|(tag, _)| *tag == ident)?;
    elem.attrs.iter().find(|a| a.name == attr)
}

/// Expression constructing the widget for `elem`.
fn widget_expr(elem: &Element) -> TokenStream {
    let tag = &elem.tag;
    let path = if tag.get_ident().is_some() {
        quote! { ::pagebox::widgets::#tag }
    } else {
        quote! { #tag }
    };

    let ctor = constructor_attr(elem);
    let constructor = match ctor {
        Some(attr) => {
            let value = &attr.value;
            quote! { #path::new(#value) }
        }
        None => quote! { #path::new() },
    };

    let calls = elem
        .attrs
        .iter()
        .filter(|attr| ctor.map_or(true, |c| c.name != attr.name))
        .map(|attr| {
            let method = Ident::new(&format!("with_{}", attr.name), attr.name.span());
            let value = &attr.value;
            quote! { .#method(#value) }
        });

    quote! { #constructor #(#calls)* }
}

/// Statements attaching `elem` (and its subtree) through `__pb`.
fn generate_element(elem: &Element) -> TokenStream {
    let widget = widget_expr(elem);
    if elem.self_closing {
        return quote! { __pb.add(#widget)?; };
    }
    let children = elem.children.iter().map(generate_element);
    quote! {
        {
            let mut __scope = __pb.open(#widget)?;
            let __pb: &mut ::pagebox::Builder = &mut __scope;
            #(#children)*
        }
    }
}

/// Entry point for page!.
pub(crate) fn page_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: PageInput = syn::parse2(input)?;

    if parsed.elements.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "page! macro requires at least one element",
        ));
    }

    let builder = &parsed.builder;
    let elements = parsed.elements.iter().map(generate_element);

    Ok(quote! {
        {
            let __pb: &mut ::pagebox::Builder = &mut #builder;
            #(#elements)*
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse_page(tokens: TokenStream) -> Result<PageInput> {
        syn::parse2(tokens)
    }

    fn parse_single_element(tokens: TokenStream) -> Result<Element> {
        parse_page(quote! { b => #tokens }).map(|p| p.elements.into_iter().next().unwrap())
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn parse_self_closing_element() {
        let elem = parse_single_element(quote! { <Text value="hi" size=12 /> }).unwrap();
        assert_eq!(elem.tag_name(), "Text");
        assert!(elem.self_closing);
        assert_eq!(elem.attrs.len(), 2);
        assert_eq!(elem.attrs[0].name.to_string(), "value");
        assert_eq!(elem.attrs[1].name.to_string(), "size");
    }

    #[test]
    fn parse_element_with_children() {
        let elem = parse_single_element(quote! {
            <Column spacing=4>
                <Text value="a" />
                <Row>
                    <Icon name="star" />
                </Row>
            </Column>
        })
        .unwrap();
        assert!(!elem.self_closing);
        assert_eq!(elem.children.len(), 2);
        assert_eq!(elem.children[1].tag_name(), "Row");
        assert_eq!(elem.children[1].children[0].tag_name(), "Icon");
    }

    #[test]
    fn parse_path_tag_and_braced_value() {
        let elem = parse_single_element(quote! {
            <charts::LineChart points={data.len()} />
        })
        .unwrap();
        assert_eq!(elem.tag_name(), "charts :: LineChart");
        assert!(matches!(elem.attrs[0].value, AttrValue::Expr(_)));
    }

    #[test]
    fn parse_builder_expression() {
        let page = parse_page(quote! { cx.builder => <Text value="x" /> }).unwrap();
        assert_eq!(page.builder.to_token_stream().to_string(), "cx . builder");
        assert_eq!(page.elements.len(), 1);
    }

    #[test]
    fn parse_error_mismatched_closing_tag() {
        let err = parse_single_element(quote! { <Column></Row> }).unwrap_err();
        assert!(err.to_string().contains("mismatched closing tag"));
    }

    #[test]
    fn parse_error_duplicate_attribute() {
        let err = parse_single_element(quote! { <Text value="a" value="b" /> }).unwrap_err();
        assert!(err.to_string().contains("duplicate attribute"));
    }

    #[test]
    fn parse_error_missing_arrow() {
        assert!(parse_page(quote! { b <Text value="a" /> }).is_err());
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn codegen_constructor_attribute() {
        let elem = parse_single_element(quote! { <Text value="hi" size=12 /> }).unwrap();
        let code = widget_expr(&elem).to_string();
        assert!(code.contains(":: pagebox :: widgets :: Text :: new (\"hi\")"), "{code}");
        assert!(code.contains(". with_size (12)"), "{code}");
        assert!(!code.contains("with_value"), "{code}");
    }

    #[test]
    fn codegen_no_constructor_attribute() {
        let elem = parse_single_element(quote! { <TextField value="x" password=true /> }).unwrap();
        let code = widget_expr(&elem).to_string();
        assert!(code.contains("TextField :: new ()"), "{code}");
        assert!(code.contains(". with_value (\"x\")"), "{code}");
        assert!(code.contains(". with_password (true)"), "{code}");
    }

    #[test]
    fn codegen_explicit_constructor_on_path() {
        let elem = parse_single_element(quote! { <charts::LineChart new="sales" /> }).unwrap();
        let code = widget_expr(&elem).to_string();
        assert_eq!(code, "charts :: LineChart :: new (\"sales\")");
    }

    #[test]
    fn codegen_leaf_adds_and_parent_opens() {
        let elem = parse_single_element(quote! {
            <Column>
                <Text value="a" />
            </Column>
        })
        .unwrap();
        let code = generate_element(&elem).to_string();
        assert!(code.contains("__pb . open (:: pagebox :: widgets :: Column :: new ())"), "{code}");
        assert!(code.contains("__pb . add (:: pagebox :: widgets :: Text :: new (\"a\")) ?"), "{code}");
    }

    #[test]
    fn codegen_full_page() {
        let code = page_impl(quote! {
            cx.builder =>
            <Text value="title" />
            <Column><Divider /></Column>
        })
        .unwrap()
        .to_string();
        assert!(code.contains("& mut cx . builder"), "{code}");
        assert!(code.contains("Divider :: new ()"), "{code}");
    }

    #[test]
    fn codegen_empty_page_is_error() {
        let err = page_impl(quote! { b => }).unwrap_err();
        assert!(err.to_string().contains("at least one element"));
    }
}
